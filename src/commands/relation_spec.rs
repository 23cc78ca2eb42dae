//! Relation specification parsing for the build command.

use anyhow::{Result, anyhow};
use std::str::FromStr;

use crate::charm::RelationOptions;

/// A relation given on the command line.
/// Format: "relation:interface" or "relation:interface:key=value,key=value"
///
/// Option values are read as YAML scalars, so `limit=1` is an integer and
/// `optional=true` a boolean.
#[derive(Debug, PartialEq, Clone)]
pub struct RelationSpec {
    pub relation: String,
    pub interface: String,
    pub options: RelationOptions,
}

impl std::fmt::Display for RelationSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.relation, self.interface)?;
        if !self.options.is_empty() {
            let options = self
                .options
                .iter()
                .map(|(k, v)| format!("{}={}", k, scalar_to_string(v)))
                .collect::<Vec<_>>()
                .join(",");
            write!(f, ":{}", options)?;
        }
        Ok(())
    }
}

impl FromStr for RelationSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let relation = parts.next().unwrap_or_default();
        let interface = parts.next().ok_or_else(|| {
            anyhow!(
                "Invalid relation '{}': expected 'relation:interface[:key=value,...]'.",
                s
            )
        })?;

        if relation.is_empty() {
            return Err(anyhow!("Invalid relation '{}': relation name cannot be empty.", s));
        }
        if interface.is_empty() {
            return Err(anyhow!("Invalid relation '{}': interface cannot be empty.", s));
        }

        let options = match parts.next() {
            Some(raw) => parse_options(raw)?,
            None => RelationOptions::new(),
        };

        Ok(RelationSpec {
            relation: relation.to_string(),
            interface: interface.to_string(),
            options,
        })
    }
}

fn parse_options(raw: &str) -> Result<RelationOptions> {
    let mut options = RelationOptions::new();
    for pair in raw.split(',').filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid option '{}': expected 'key=value'.", pair))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(anyhow!("Invalid option '{}': key cannot be empty.", pair));
        }
        options.insert(key.to_string(), parse_scalar(value.trim()));
    }
    Ok(options)
}

fn parse_scalar(value: &str) -> serde_yaml::Value {
    match serde_yaml::from_str::<serde_yaml::Value>(value) {
        Ok(parsed @ (serde_yaml::Value::Bool(_) | serde_yaml::Value::Number(_))) => parsed,
        _ => serde_yaml::Value::String(value.to_string()),
    }
}

fn scalar_to_string(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        other => serde_yaml::to_string(other)
            .unwrap_or_default()
            .trim()
            .to_string(),
    }
}
