pub mod charm;
pub mod commands;
pub mod error;
pub mod runtime;
pub mod vcs;

pub use error::BuilderError;

/// Test utilities shared by the unit tests.
#[cfg(test)]
pub mod test_utils {
    use crate::charm::RelationOptions;
    use std::fs;
    use std::path::Path;

    /// Lay out a minimal charm template under `root`:
    /// - `README.md`
    /// - `hooks/hooks.py` (the shared hook script)
    /// - `hooks/install` -> `hooks.py` (Unix only)
    pub fn create_template(root: &Path) {
        let hooks = root.join("hooks");
        fs::create_dir_all(&hooks).unwrap();
        fs::write(root.join("README.md"), "# test charm\n").unwrap();
        fs::write(hooks.join("hooks.py"), "#!/usr/bin/env python3\n").unwrap();
        #[cfg(unix)]
        std::os::unix::fs::symlink("hooks.py", hooks.join("install")).unwrap();
    }

    /// Build relation options from `key=value` pairs, reading values as YAML scalars.
    pub fn relation_options(pairs: &[(&str, &str)]) -> RelationOptions {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_yaml::from_str(v).unwrap()))
            .collect()
    }
}
