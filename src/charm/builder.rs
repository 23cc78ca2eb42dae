use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

use super::hooks::{DEFAULT_HOOK, HOOKS_DIR, relation_hook_paths};
use super::metadata::{METADATA_FILE, Metadata, Relation, RelationKind, RelationOptions};
use crate::error::BuilderError;
use crate::runtime::Runtime;
use crate::vcs::{CHECKPOINT_MESSAGE, Vcs};

/// Relation every subordinate charm requires to attach to its principal.
pub const SUBORDINATE_RELATION: &str = "juju-info";
pub const SUBORDINATE_INTERFACE: &str = "juju-info";

const STANDALONE_PREFIX: &str = "sentry_";
const SUBORDINATE_PREFIX: &str = "sentry-sub_";

/// Construction options for [`CharmBuilder::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    pub subordinate: bool,
    /// Shared hook script (relative to `hooks/`), `None` disables hook linking.
    pub hook: Option<String>,
    /// Parent of the working directory. Defaults to the system temp dir.
    pub work_root: Option<PathBuf>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            subordinate: false,
            hook: Some(DEFAULT_HOOK.to_string()),
            work_root: None,
        }
    }
}

/// Builds a charm in a private, version-controlled copy of a template.
///
/// Every relation declaration rewrites `metadata.yaml`, links the relation
/// hooks and records a commit before returning. The working copy is never
/// removed; it is the artifact handed back to the caller.
pub struct CharmBuilder<R: Runtime, V: Vcs> {
    runtime: R,
    vcs: V,
    metadata: Metadata,
    hook: Option<String>,
    template: PathBuf,
    charm_dir: PathBuf,
}

impl<R: Runtime, V: Vcs> CharmBuilder<R, V> {
    #[tracing::instrument(skip(runtime, vcs))]
    pub fn new(
        runtime: R,
        vcs: V,
        name: &str,
        template: &Path,
        options: BuildOptions,
    ) -> Result<Self> {
        validate_name(name)?;
        let metadata = Metadata::new(name, options.subordinate);
        let template = resolve_template(&runtime, template)?;

        let parent = match options.work_root {
            Some(root) => root,
            None => runtime.temp_dir(),
        };
        let prefix = if options.subordinate {
            SUBORDINATE_PREFIX
        } else {
            STANDALONE_PREFIX
        };
        let work_dir = runtime.make_temp_dir(&parent, prefix)?;
        let charm_dir = work_dir.join(name);

        info!("Copying template {:?} to {:?}", template, charm_dir);
        runtime
            .copy_tree(&template, &charm_dir)
            .with_context(|| format!("Failed to copy template {:?}", template))?;

        let mut builder = Self {
            runtime,
            vcs,
            metadata,
            hook: options.hook,
            template,
            charm_dir,
        };

        // Written now so the defaults are on disk even before the first declaration;
        // the first checkpoint commits it together with the template.
        builder.write_metadata_file()?;

        builder
            .vcs
            .init_repository(&builder.charm_dir)
            .with_context(|| format!("Unable to create repository in {:?}", builder.charm_dir))?;

        if options.subordinate {
            let mut opts = RelationOptions::new();
            opts.insert("scope".to_string(), "container".into());
            builder.require(SUBORDINATE_RELATION, SUBORDINATE_INTERFACE, opts)?;
        }

        if let Some(hook) = &builder.hook {
            let hook_path = builder.charm_dir.join(HOOKS_DIR).join(hook);
            builder
                .runtime
                .set_permissions(&hook_path, 0o755)
                .with_context(|| format!("Failed to make hook {:?} executable", hook_path))?;
        }

        Ok(builder)
    }

    pub fn require(&mut self, relation: &str, interface: &str, opts: RelationOptions) -> Result<()> {
        self.add_relation(RelationKind::Requires, relation, interface, opts)
    }

    pub fn provide(&mut self, relation: &str, interface: &str, opts: RelationOptions) -> Result<()> {
        self.add_relation(RelationKind::Provides, relation, interface, opts)
    }

    pub fn peer(&mut self, relation: &str, interface: &str, opts: RelationOptions) -> Result<()> {
        self.add_relation(RelationKind::Peers, relation, interface, opts)
    }

    /// Declare `relation` under `kind`, replacing any previous entry of the same name.
    #[tracing::instrument(skip(self, opts))]
    pub fn add_relation(
        &mut self,
        kind: RelationKind,
        relation: &str,
        interface: &str,
        opts: RelationOptions,
    ) -> Result<()> {
        debug!("Declaring {} {} ({})", kind, relation, interface);
        self.metadata
            .set_relation(kind, relation, Relation::new(interface, opts));
        self.link_relation_hooks(relation)?;
        self.write_metadata()
    }

    /// Point each relation event hook at the shared hook script.
    /// Anything already at a hook path, dangling links included, is left alone.
    fn link_relation_hooks(&self, relation: &str) -> Result<()> {
        let Some(hook) = &self.hook else {
            return Ok(());
        };

        for hook_path in relation_hook_paths(&self.charm_dir, relation) {
            if self.runtime.exists(&hook_path) || self.runtime.is_symlink(&hook_path) {
                debug!("Hook {:?} already exists, skipping", hook_path);
                continue;
            }
            self.runtime.symlink(Path::new(hook), &hook_path)?;
        }
        Ok(())
    }

    /// Rewrite `metadata.yaml` and commit.
    pub fn write_metadata(&self) -> Result<()> {
        self.write_metadata_file()?;
        self.save()
    }

    fn write_metadata_file(&self) -> Result<()> {
        let yaml = self.metadata.to_yaml()?;
        self.runtime
            .write(&self.metadata_path(), yaml.as_bytes())
            .with_context(|| format!("Failed to write {:?}", self.metadata_path()))
    }

    /// Commit everything in the working copy.
    #[tracing::instrument(skip(self))]
    pub fn save(&self) -> Result<()> {
        self.vcs
            .commit_all(&self.charm_dir, CHECKPOINT_MESSAGE)
            .with_context(|| format!("Unable to update repository in {:?}", self.charm_dir))
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn hook(&self) -> Option<&str> {
        self.hook.as_deref()
    }

    pub fn template(&self) -> &Path {
        &self.template
    }

    pub fn charm_dir(&self) -> &Path {
        &self.charm_dir
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.charm_dir.join(METADATA_FILE)
    }
}

/// The name becomes a directory under the working root, so it has to be a single plain component.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(BuilderError::InvalidName(name.to_string()).into());
    }
    Ok(())
}

fn resolve_template<R: Runtime>(runtime: &R, template: &Path) -> Result<PathBuf> {
    let resolved = runtime
        .canonicalize(template)
        .map_err(|_| BuilderError::TemplateNotFound(template.to_path_buf()))?;
    if !runtime.is_dir(&resolved) {
        return Err(BuilderError::TemplateNotFound(resolved).into());
    }
    Ok(resolved)
}
