use anyhow::Result;
use std::path::PathBuf;

use crate::{runtime::Runtime, vcs::VcsKind};

mod build;
pub mod config;
mod relation_spec;

pub use build::{BuildReport, BuildRequest, ReportedRelation, build_charm, print_report};
pub use relation_spec::RelationSpec;

use config::Config;

/// Build a charm from a template and print where it ended up.
#[tracing::instrument(skip(runtime))]
pub fn build<R: Runtime>(
    runtime: R,
    request: &BuildRequest,
    vcs: VcsKind,
    work_root: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = Config::new(runtime, vcs, work_root);
    let report = build_charm(config, request)?;
    print_report(&report, json)
}

/// Parse every `relation:interface[:options]` argument, failing on the first bad one.
pub fn parse_relations(values: &[String]) -> Result<Vec<RelationSpec>> {
    values.iter().map(|v| v.parse::<RelationSpec>()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RealRuntime;
    use crate::test_utils::create_template;
    use tempfile::tempdir;

    #[test]
    fn test_parse_relations_keeps_order() {
        let specs = parse_relations(&["db:mysql".to_string(), "cache:memcache".to_string()]).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].relation, "db");
        assert_eq!(specs[1].relation, "cache");
    }

    #[test]
    fn test_parse_relations_rejects_bad_entry() {
        let result = parse_relations(&["db:mysql".to_string(), "broken".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_without_vcs() {
        let template = tempdir().unwrap();
        create_template(template.path());
        let work_root = tempdir().unwrap();

        let request = BuildRequest {
            name: "mycharm".to_string(),
            template: template.path().to_path_buf(),
            subordinate: false,
            hook: Some("hooks.py".to_string()),
            requires: parse_relations(&["db:mysql".to_string()]).unwrap(),
            provides: vec![],
            peers: vec![],
        };
        build(
            RealRuntime,
            &request,
            VcsKind::None,
            Some(work_root.path().to_path_buf()),
            false,
        )
        .unwrap();

        // One working directory with the charm inside
        let work_dirs: Vec<_> = std::fs::read_dir(work_root.path()).unwrap().collect();
        assert_eq!(work_dirs.len(), 1);
        let charm_dir = work_dirs[0].as_ref().unwrap().path().join("mycharm");
        assert!(charm_dir.join("hooks/db-relation-joined").exists());
    }
}
