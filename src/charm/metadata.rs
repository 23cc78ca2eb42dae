use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::runtime::Runtime;

/// File name of the metadata document at the charm root.
pub const METADATA_FILE: &str = "metadata.yaml";

pub const DEFAULT_SUMMARY: &str = "Generated by charm-builder";
pub const DEFAULT_DESCRIPTION: &str = "Generated by charm-builder";
pub const DEFAULT_MAINTAINER: &str = "Charm Builder <juju@lists.ubuntu.com>";

/// Extra fields stored next to `interface` in a relation entry.
pub type RelationOptions = BTreeMap<String, serde_yaml::Value>;

/// Which side of a relation the charm declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Requires,
    Provides,
    Peers,
}

impl RelationKind {
    pub const ALL: [RelationKind; 3] = [
        RelationKind::Requires,
        RelationKind::Provides,
        RelationKind::Peers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::Requires => "requires",
            RelationKind::Provides => "provides",
            RelationKind::Peers => "peers",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single relation entry: the interface plus whatever options the caller supplied.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Relation {
    pub interface: String,
    #[serde(flatten)]
    pub options: RelationOptions,
}

impl Relation {
    /// An `interface` key in `options` is dropped; the explicit interface wins.
    pub fn new(interface: &str, mut options: RelationOptions) -> Self {
        options.remove("interface");
        Self {
            interface: interface.to_string(),
            options,
        }
    }
}

/// Contents of `metadata.yaml`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Metadata {
    pub name: String,
    pub summary: String,
    pub description: String,
    pub subordinate: bool,
    pub maintainer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<BTreeMap<String, Relation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provides: Option<BTreeMap<String, Relation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peers: Option<BTreeMap<String, Relation>>,
}

impl Metadata {
    pub fn new(name: &str, subordinate: bool) -> Self {
        Metadata {
            name: name.to_string(),
            summary: DEFAULT_SUMMARY.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            subordinate,
            maintainer: DEFAULT_MAINTAINER.to_string(),
            requires: None,
            provides: None,
            peers: None,
        }
    }

    pub fn relations(&self, kind: RelationKind) -> Option<&BTreeMap<String, Relation>> {
        match kind {
            RelationKind::Requires => self.requires.as_ref(),
            RelationKind::Provides => self.provides.as_ref(),
            RelationKind::Peers => self.peers.as_ref(),
        }
    }

    pub fn relation(&self, kind: RelationKind, name: &str) -> Option<&Relation> {
        self.relations(kind).and_then(|r| r.get(name))
    }

    /// The relation map for `kind`, created empty on first use.
    pub fn relations_mut(&mut self, kind: RelationKind) -> &mut BTreeMap<String, Relation> {
        let slot = match kind {
            RelationKind::Requires => &mut self.requires,
            RelationKind::Provides => &mut self.provides,
            RelationKind::Peers => &mut self.peers,
        };
        slot.get_or_insert_with(BTreeMap::new)
    }

    /// Insert or replace `relation` under `kind`.
    pub fn set_relation(&mut self, kind: RelationKind, relation: &str, entry: Relation) {
        self.relations_mut(kind).insert(relation.to_string(), entry);
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize metadata")
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse metadata")
    }

    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        Self::from_yaml(&content).with_context(|| format!("Invalid metadata in {:?}", path))
    }
}
