use std::path::PathBuf;
use thiserror::Error;

/// Failures a caller may want to tell apart.
///
/// Everything is still returned as `anyhow::Error`; use `downcast_ref::<BuilderError>()`
/// to inspect the kind.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// The template directory could not be resolved.
    #[error("{} does not exist", .0.display())]
    TemplateNotFound(PathBuf),

    /// The charm name cannot be used as a directory name.
    #[error("invalid charm name {0:?}")]
    InvalidName(String),

    /// A version control command could not be run or exited non-zero.
    #[error("`{command}` failed: {detail}")]
    Vcs { command: String, detail: String },
}
