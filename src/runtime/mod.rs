//! Runtime abstraction for system operations.
//!
//! The builder never touches `std::fs` directly; everything goes through
//! [`Runtime`] so tests can swap in a mock.
//!
//! # Structure
//!
//! - `env` - Temporary directory location and creation
//! - `fs` - File system operations (read, write, directory, permissions)
//! - `symlink` - Symlink operations (create, read, inspect)
//! - `tree` - Recursive directory copy that keeps symlinks as links

mod env;
mod fs;
mod symlink;
mod tree;

use anyhow::Result;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Set file permissions (mode) on Unix systems. No-op on Windows.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;

    /// Canonicalize a path by resolving all symlinks and returning the canonical absolute path.
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    // Symlinks
    fn symlink(&self, original: &Path, link: &Path) -> Result<()>;
    fn is_symlink(&self, path: &Path) -> bool;

    /// Copy `from` into `to` recursively. `to` must not exist yet.
    /// Symlinks are recreated as links with the same target instead of being followed.
    fn copy_tree(&self, from: &Path, to: &Path) -> Result<()>;

    // Temporary directories
    fn temp_dir(&self) -> PathBuf;

    /// Create a uniquely named directory under `parent` whose name starts with `prefix`.
    /// The directory is not removed when the process exits.
    fn make_temp_dir(&self, parent: &Path, prefix: &str) -> Result<PathBuf>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        self.set_permissions_impl(path, mode)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        self.canonicalize_impl(path)
    }

    fn symlink(&self, original: &Path, link: &Path) -> Result<()> {
        self.symlink_impl(original, link)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.is_symlink_impl(path)
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> Result<()> {
        self.copy_tree_impl(from, to)
    }

    fn temp_dir(&self) -> PathBuf {
        self.temp_dir_impl()
    }

    fn make_temp_dir(&self, parent: &Path, prefix: &str) -> Result<PathBuf> {
        self.make_temp_dir_impl(parent, prefix)
    }
}
