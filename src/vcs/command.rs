use anyhow::Result;
use log::debug;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::BuilderError;

/// Run `program args...` in `cwd` with all output discarded.
///
/// A spawn failure or a non-zero exit becomes [`BuilderError::Vcs`].
#[tracing::instrument]
pub(crate) fn run_quiet(program: &str, args: &[String], cwd: &Path) -> Result<()> {
    let command_line = std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    debug!("Running `{}` in {:?}", command_line, cwd);

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| BuilderError::Vcs {
            command: command_line.clone(),
            detail: e.to_string(),
        })?;

    if !status.success() {
        return Err(BuilderError::Vcs {
            command: command_line,
            detail: status.to_string(),
        }
        .into());
    }

    Ok(())
}

/// Whether `program` can be spawned on this host.
#[cfg(test)]
pub(crate) fn tool_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_run_quiet_success() {
        let dir = tempdir().unwrap();
        run_quiet("true", &[], dir.path()).unwrap();
    }

    #[test]
    fn test_run_quiet_non_zero_exit() {
        let dir = tempdir().unwrap();
        let err = run_quiet("false", &["--flag".to_string()], dir.path()).unwrap_err();

        match err.downcast_ref::<BuilderError>() {
            Some(BuilderError::Vcs { command, detail }) => {
                assert_eq!(command, "false --flag");
                assert!(detail.contains("exit status"));
            }
            other => panic!("Expected Vcs error, got {:?}", other),
        }
    }

    #[test]
    fn test_run_quiet_missing_program() {
        let dir = tempdir().unwrap();
        let err = run_quiet("charm-builder-no-such-tool", &[], dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuilderError>(),
            Some(BuilderError::Vcs { .. })
        ));
    }

    #[test]
    fn test_run_quiet_uses_cwd() {
        let dir = tempdir().unwrap();
        run_quiet(
            "sh",
            &["-c".to_string(), "touch marker".to_string()],
            dir.path(),
        )
        .unwrap();
        assert!(dir.path().join("marker").exists());
    }
}
