//! Version control backends.
//!
//! The builder only needs two operations from a version control tool: create a
//! repository and record every change as a commit. Both are delegated to an
//! external binary (`git` or `bzr`) whose output is discarded; the exit status
//! is the only thing observed.

mod bzr;
mod command;
mod git;

use anyhow::Result;
use std::path::Path;

pub use bzr::BzrVcs;
pub use git::GitVcs;

/// Commit message used for every checkpoint.
pub const CHECKPOINT_MESSAGE: &str = "Checkpoint";

#[cfg_attr(test, mockall::automock)]
pub trait Vcs {
    /// Initialize an empty repository rooted at `dir`.
    fn init_repository(&self, dir: &Path) -> Result<()>;

    /// Stage every change under `dir` and commit it with `message`.
    /// A commit is recorded even when nothing changed.
    fn commit_all(&self, dir: &Path, message: &str) -> Result<()>;
}

impl<V: Vcs + ?Sized> Vcs for Box<V> {
    fn init_repository(&self, dir: &Path) -> Result<()> {
        (**self).init_repository(dir)
    }

    fn commit_all(&self, dir: &Path, message: &str) -> Result<()> {
        (**self).commit_all(dir, message)
    }
}

/// Backend that records nothing. Useful when only the file tree matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVcs;

impl Vcs for NoVcs {
    fn init_repository(&self, dir: &Path) -> Result<()> {
        log::debug!("Skipping repository init for {:?}", dir);
        Ok(())
    }

    fn commit_all(&self, dir: &Path, _message: &str) -> Result<()> {
        log::debug!("Skipping commit for {:?}", dir);
        Ok(())
    }
}

/// Selects a backend from the command line or environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum VcsKind {
    #[default]
    Git,
    Bzr,
    None,
}

impl VcsKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VcsKind::Git => "git",
            VcsKind::Bzr => "bzr",
            VcsKind::None => "none",
        }
    }

    /// Build the backend, committing as `maintainer` where the tool needs an identity.
    pub fn backend(self, maintainer: &str) -> Box<dyn Vcs> {
        match self {
            VcsKind::Git => Box::new(GitVcs::from_maintainer(maintainer)),
            VcsKind::Bzr => Box::new(BzrVcs),
            VcsKind::None => Box::new(NoVcs),
        }
    }
}

impl std::fmt::Display for VcsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;
    use std::path::PathBuf;

    #[test]
    fn test_vcs_kind_from_str() {
        assert_eq!(VcsKind::from_str("git", true).unwrap(), VcsKind::Git);
        assert_eq!(VcsKind::from_str("bzr", true).unwrap(), VcsKind::Bzr);
        assert_eq!(VcsKind::from_str("none", true).unwrap(), VcsKind::None);
        assert!(VcsKind::from_str("svn", true).is_err());
    }

    #[test]
    fn test_vcs_kind_display_matches_value() {
        for kind in VcsKind::value_variants() {
            assert_eq!(VcsKind::from_str(&kind.to_string(), false).unwrap(), *kind);
        }
    }

    #[test]
    fn test_no_vcs_always_succeeds() {
        let vcs = NoVcs;
        let dir = PathBuf::from("/does/not/matter");
        vcs.init_repository(&dir).unwrap();
        vcs.commit_all(&dir, CHECKPOINT_MESSAGE).unwrap();
    }

    #[test]
    fn test_boxed_vcs_delegates() {
        let mut mock = MockVcs::new();
        mock.expect_init_repository().times(1).returning(|_| Ok(()));
        mock.expect_commit_all()
            .withf(|_, message| message == CHECKPOINT_MESSAGE)
            .times(1)
            .returning(|_, _| Ok(()));

        let boxed: Box<dyn Vcs> = Box::new(mock);
        let dir = PathBuf::from("/charm");
        boxed.init_repository(&dir).unwrap();
        boxed.commit_all(&dir, CHECKPOINT_MESSAGE).unwrap();
    }
}
