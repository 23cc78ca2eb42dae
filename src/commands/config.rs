use std::path::PathBuf;

use crate::{
    charm::DEFAULT_MAINTAINER,
    runtime::Runtime,
    vcs::{Vcs, VcsKind},
};

/// Everything a command needs besides its own arguments.
pub struct Config<R: Runtime, V: Vcs> {
    pub runtime: R,
    pub vcs: V,
    /// Parent of the working directories, `None` for the system temp dir.
    pub work_root: Option<PathBuf>,
}

impl<R: Runtime> Config<R, Box<dyn Vcs>> {
    pub fn new(runtime: R, vcs: VcsKind, work_root: Option<PathBuf>) -> Self {
        log::debug!("Using {} for version control", vcs);
        Self {
            runtime,
            vcs: vcs.backend(DEFAULT_MAINTAINER),
            work_root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use std::path::Path;

    #[test]
    fn test_config_new_keeps_work_root() {
        let config = Config::new(
            MockRuntime::new(),
            VcsKind::None,
            Some(PathBuf::from("/srv/charms")),
        );
        assert_eq!(config.work_root.as_deref(), Some(Path::new("/srv/charms")));
    }

    #[test]
    fn test_config_none_backend_is_noop() {
        let config = Config::new(MockRuntime::new(), VcsKind::None, None);
        config.vcs.init_repository(Path::new("/missing")).unwrap();
        config
            .vcs
            .commit_all(Path::new("/missing"), "Checkpoint")
            .unwrap();
    }
}
