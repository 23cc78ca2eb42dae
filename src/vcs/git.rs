use anyhow::Result;
use std::path::Path;

use super::Vcs;
use super::command::run_quiet;

/// Git backend.
///
/// Commits pass the identity on the command line so they succeed on hosts
/// without a configured `user.name`/`user.email`.
#[derive(Debug, Clone, PartialEq)]
pub struct GitVcs {
    user_name: String,
    user_email: String,
}

impl GitVcs {
    pub fn new(user_name: impl Into<String>, user_email: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            user_email: user_email.into(),
        }
    }

    /// Derive the identity from a `Name <email>` maintainer string.
    /// Without angle brackets the whole string is used as the name.
    pub fn from_maintainer(maintainer: &str) -> Self {
        match (maintainer.find('<'), maintainer.rfind('>')) {
            (Some(open), Some(close)) if open < close => Self::new(
                maintainer[..open].trim(),
                maintainer[open + 1..close].trim(),
            ),
            _ => Self::new(maintainer.trim(), ""),
        }
    }

    fn init_args(&self) -> Vec<String> {
        vec!["init".to_string(), "-q".to_string()]
    }

    fn add_args(&self) -> Vec<String> {
        vec!["add".to_string(), "-A".to_string()]
    }

    fn commit_args(&self, message: &str) -> Vec<String> {
        vec![
            "-c".to_string(),
            format!("user.name={}", self.user_name),
            "-c".to_string(),
            format!("user.email={}", self.user_email),
            "-c".to_string(),
            "commit.gpgsign=false".to_string(),
            "commit".to_string(),
            "-q".to_string(),
            "--allow-empty".to_string(),
            "-m".to_string(),
            message.to_string(),
        ]
    }
}

impl Vcs for GitVcs {
    #[tracing::instrument(skip(self))]
    fn init_repository(&self, dir: &Path) -> Result<()> {
        run_quiet("git", &self.init_args(), dir)
    }

    #[tracing::instrument(skip(self))]
    fn commit_all(&self, dir: &Path, message: &str) -> Result<()> {
        run_quiet("git", &self.add_args(), dir)?;
        run_quiet("git", &self.commit_args(message), dir)
    }
}
