use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use super::config::Config;
use super::relation_spec::RelationSpec;
use crate::{
    charm::{BuildOptions, CharmBuilder, RelationKind},
    runtime::Runtime,
    vcs::Vcs,
};

/// What to build, as collected from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRequest {
    pub name: String,
    pub template: PathBuf,
    pub subordinate: bool,
    pub hook: Option<String>,
    pub requires: Vec<RelationSpec>,
    pub provides: Vec<RelationSpec>,
    pub peers: Vec<RelationSpec>,
}

impl BuildRequest {
    fn relations(&self) -> impl Iterator<Item = (RelationKind, &RelationSpec)> {
        let requires = self.requires.iter().map(|s| (RelationKind::Requires, s));
        let provides = self.provides.iter().map(|s| (RelationKind::Provides, s));
        let peers = self.peers.iter().map(|s| (RelationKind::Peers, s));
        requires.chain(provides).chain(peers)
    }
}

/// Result of a build, printed as JSON with `--json`.
#[derive(Debug, Serialize, PartialEq)]
pub struct BuildReport {
    pub name: String,
    pub charm_dir: PathBuf,
    pub template: PathBuf,
    pub subordinate: bool,
    pub relations: Vec<ReportedRelation>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ReportedRelation {
    pub kind: RelationKind,
    pub name: String,
    pub interface: String,
}

/// Build a charm and declare every requested relation, in the order
/// requires, provides, peers.
#[tracing::instrument(skip(config))]
pub fn build_charm<R: Runtime, V: Vcs>(
    config: Config<R, V>,
    request: &BuildRequest,
) -> Result<BuildReport> {
    let options = BuildOptions {
        subordinate: request.subordinate,
        hook: request.hook.clone(),
        work_root: config.work_root,
    };
    let mut builder = CharmBuilder::new(
        config.runtime,
        config.vcs,
        &request.name,
        &request.template,
        options,
    )?;

    for (kind, spec) in request.relations() {
        builder
            .add_relation(kind, &spec.relation, &spec.interface, spec.options.clone())
            .with_context(|| format!("Failed to declare {} relation {}", kind, spec))?;
    }

    info!("Built {} in {:?}", builder.name(), builder.charm_dir());

    let metadata = builder.metadata();
    let relations = RelationKind::ALL
        .iter()
        .flat_map(|kind| {
            metadata
                .relations(*kind)
                .into_iter()
                .flatten()
                .map(move |(name, relation)| ReportedRelation {
                    kind: *kind,
                    name: name.clone(),
                    interface: relation.interface.clone(),
                })
        })
        .collect();

    Ok(BuildReport {
        name: builder.name().to_string(),
        charm_dir: builder.charm_dir().to_path_buf(),
        template: builder.template().to_path_buf(),
        subordinate: metadata.subordinate,
        relations,
    })
}

pub fn print_report(report: &BuildReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.charm_dir.display());
    }
    Ok(())
}
