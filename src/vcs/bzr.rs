use anyhow::Result;
use std::path::Path;

use super::Vcs;
use super::command::run_quiet;

/// Bazaar backend. `bzr` picks the committer from its own configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct BzrVcs;

impl BzrVcs {
    fn commit_args(message: &str) -> Vec<String> {
        vec![
            "commit".to_string(),
            "--unchanged".to_string(),
            "-m".to_string(),
            message.to_string(),
        ]
    }
}

impl Vcs for BzrVcs {
    #[tracing::instrument(skip(self))]
    fn init_repository(&self, dir: &Path) -> Result<()> {
        run_quiet("bzr", &["init".to_string()], dir)
    }

    #[tracing::instrument(skip(self))]
    fn commit_all(&self, dir: &Path, message: &str) -> Result<()> {
        run_quiet("bzr", &["add".to_string(), ".".to_string()], dir)?;
        run_quiet("bzr", &Self::commit_args(message), dir)
    }
}
