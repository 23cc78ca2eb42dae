//! Temporary directory location and creation.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn temp_dir_impl(&self) -> PathBuf {
        env::temp_dir()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn make_temp_dir_impl(&self, parent: &Path, prefix: &str) -> Result<PathBuf> {
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(parent)
            .with_context(|| format!("Failed to create temporary directory in {:?}", parent))?;
        // The working copy is the delivered artifact, so it must outlive the TempDir handle.
        Ok(dir.keep())
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_temp_dir() {
        let runtime = RealRuntime;
        let temp = runtime.temp_dir();
        assert!(temp.is_absolute() || cfg!(windows));
    }

    #[test]
    fn test_make_temp_dir_is_unique_and_persistent() {
        let runtime = RealRuntime;
        let parent = tempdir().unwrap();

        let first = runtime.make_temp_dir(parent.path(), "sentry_").unwrap();
        let second = runtime.make_temp_dir(parent.path(), "sentry_").unwrap();

        assert_ne!(first, second);
        assert!(first.is_dir());
        assert!(second.is_dir());
        assert!(first.starts_with(parent.path()));
        let name = first.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("sentry_"));
    }

    #[test]
    fn test_make_temp_dir_missing_parent_fails() {
        let runtime = RealRuntime;
        let parent = tempdir().unwrap();
        let missing = parent.path().join("missing");

        assert!(runtime.make_temp_dir(&missing, "sentry_").is_err());
    }
}
