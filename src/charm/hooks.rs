use std::path::{Path, PathBuf};

/// Directory inside the charm holding hook scripts.
pub const HOOKS_DIR: &str = "hooks";

/// Shared hook script linked into every relation event unless disabled.
pub const DEFAULT_HOOK: &str = "hooks.py";

/// Relation lifecycle events that get a hook link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    Joined,
    Changed,
    Departed,
    Broken,
}

impl HookEvent {
    pub const ALL: [HookEvent; 4] = [
        HookEvent::Joined,
        HookEvent::Changed,
        HookEvent::Departed,
        HookEvent::Broken,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HookEvent::Joined => "joined",
            HookEvent::Changed => "changed",
            HookEvent::Departed => "departed",
            HookEvent::Broken => "broken",
        }
    }
}

/// `<relation>-relation-<event>`
pub fn relation_hook_name(relation: &str, event: HookEvent) -> String {
    format!("{}-relation-{}", relation, event.as_str())
}

/// Absolute paths of every hook a relation gets, in [`HookEvent::ALL`] order.
pub fn relation_hook_paths(charm_dir: &Path, relation: &str) -> Vec<PathBuf> {
    HookEvent::ALL
        .iter()
        .map(|event| {
            charm_dir
                .join(HOOKS_DIR)
                .join(relation_hook_name(relation, *event))
        })
        .collect()
}
