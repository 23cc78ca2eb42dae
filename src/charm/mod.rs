//! Charm scaffolding
//!
//! A charm is a directory with a `metadata.yaml` describing the package and
//! its relations, plus a `hooks/` directory of scripts run on lifecycle events.

mod builder;
mod hooks;
mod metadata;

pub use builder::{BuildOptions, CharmBuilder, SUBORDINATE_INTERFACE, SUBORDINATE_RELATION};
pub use hooks::{DEFAULT_HOOK, HOOKS_DIR, HookEvent, relation_hook_name, relation_hook_paths};
pub use metadata::{
    DEFAULT_DESCRIPTION, DEFAULT_MAINTAINER, DEFAULT_SUMMARY, METADATA_FILE, Metadata, Relation,
    RelationKind, RelationOptions,
};
