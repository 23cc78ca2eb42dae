//! Recursive directory copy that keeps symlinks as links.

use anyhow::{Context, Result};
use log::trace;
use std::fs;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn copy_tree_impl(&self, from: &Path, to: &Path) -> Result<()> {
        fs::create_dir(to).with_context(|| format!("Failed to create directory {:?}", to))?;

        for entry in fs::read_dir(from).with_context(|| format!("Failed to read {:?}", from))? {
            let entry = entry?;
            let src = entry.path();
            let dst = to.join(entry.file_name());
            let file_type = fs::symlink_metadata(&src)
                .with_context(|| format!("Failed to stat {:?}", src))?
                .file_type();

            if file_type.is_symlink() {
                let target = self.read_link_impl(&src)?;
                trace!("Copying symlink {:?} -> {:?}", dst, target);
                self.symlink_impl(&target, &dst)?;
            } else if file_type.is_dir() {
                self.copy_tree_impl(&src, &dst)?;
            } else {
                trace!("Copying file {:?}", src);
                // fs::copy carries the permission bits over, so executables stay executable.
                fs::copy(&src, &dst)
                    .with_context(|| format!("Failed to copy {:?} to {:?}", src, dst))?;
            }
        }

        // Directory modes are not copied: the copy must stay writable even when the template is not.
        Ok(())
    }
}
