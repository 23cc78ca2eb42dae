use anyhow::Result;
use charm_builder::charm::DEFAULT_HOOK;
use charm_builder::commands::{self, BuildRequest, parse_relations};
use charm_builder::vcs::VcsKind;
use clap::Parser;
use std::path::PathBuf;

/// charm-builder - scaffold throwaway charms from a template
///
/// Copies the template into a fresh temporary directory, writes metadata.yaml,
/// links relation hooks to a shared hook script and commits every step.
///
/// Examples:
///   charm-builder build mycharm -t ./templates/base --requires db:mysql
///   charm-builder build logger -t ./templates/base --subordinate --json
#[derive(Parser, Debug)]
#[command(author, version = env!("CHARM_BUILDER_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory to create working copies in (defaults to the system temp dir; also via CHARM_WORKDIR)
    #[arg(
        long = "workdir",
        short = 'w',
        env = "CHARM_WORKDIR",
        value_name = "PATH",
        global = true
    )]
    pub work_root: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Build a charm from a template
    Build(BuildArgs),
}

#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Charm name, also the directory name of the working copy
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Template directory to copy
    #[arg(long, short = 't', env = "CHARM_TEMPLATE", value_name = "PATH")]
    pub template: PathBuf,

    /// Mark the charm subordinate and require juju-info with container scope
    #[arg(long)]
    pub subordinate: bool,

    /// Shared hook script under hooks/ to link relation hooks to
    #[arg(long, value_name = "FILE", default_value = DEFAULT_HOOK, conflicts_with = "no_hook")]
    pub hook: String,

    /// Do not link relation hooks
    #[arg(long)]
    pub no_hook: bool,

    /// Version control tool for checkpoints
    #[arg(long, value_enum, env = "CHARM_VCS", default_value_t = VcsKind::Git)]
    pub vcs: VcsKind,

    /// Required relation, repeatable
    #[arg(long = "requires", value_name = "REL:IFACE[:K=V,...]")]
    pub requires: Vec<String>,

    /// Provided relation, repeatable
    #[arg(long = "provides", value_name = "REL:IFACE[:K=V,...]")]
    pub provides: Vec<String>,

    /// Peer relation, repeatable
    #[arg(long = "peers", value_name = "REL:IFACE[:K=V,...]")]
    pub peers: Vec<String>,

    /// Print a JSON report instead of the charm path
    #[arg(long)]
    pub json: bool,
}

impl BuildArgs {
    fn into_request(self) -> Result<BuildRequest> {
        Ok(BuildRequest {
            requires: parse_relations(&self.requires)?,
            provides: parse_relations(&self.provides)?,
            peers: parse_relations(&self.peers)?,
            name: self.name,
            template: self.template,
            subordinate: self.subordinate,
            hook: (!self.no_hook).then_some(self.hook),
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = charm_builder::runtime::RealRuntime;

    match cli.command {
        Commands::Build(args) => {
            let vcs = args.vcs;
            let json = args.json;
            let request = args.into_request()?;
            commands::build(runtime, &request, vcs, cli.work_root, json)?
        }
    }
    Ok(())
}
