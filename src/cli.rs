use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fndeploy::domain::value_objects::ExistsCheckPolicy;

/// fndeploy - layered config resolution and deployment for serverless functions
#[derive(Parser, Debug)]
#[command(name = "fndeploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Workspace root holding fndeploy.toml
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Stage whose environment layer is applied (overrides config)
    #[arg(long, global = true)]
    pub stage: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or update functions on the remote platform
    Deploy(DeployArgs),

    /// Show the merged config and request payload for one function
    Resolve(ResolveArgs),

    /// List the network presets visible to a stage
    Presets,

    /// Scaffold fndeploy.toml and the default/stage config layers
    Init(InitArgs),
}

#[derive(Args, Debug, Default)]
pub struct DeployArgs {
    /// Project whose functions are deployed
    pub project: String,

    /// Functions to deploy (default: every packaged function of the project)
    pub functions: Vec<String>,

    /// Remote API endpoint (overrides config)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Alias created for new functions (default: the stage)
    #[arg(long)]
    pub alias: Option<String>,

    /// Maximum functions reconciled at once
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// How a failed existence query is treated
    #[arg(long, value_parser = parse_exists_check)]
    pub exists_check: Option<ExistsCheckPolicy>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

#[derive(Args, Debug, Default)]
pub struct ResolveArgs {
    pub project: String,

    pub function: String,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Stages that get an environment layer
    #[arg(long, value_delimiter = ',', default_value = "production")]
    pub stages: Vec<String>,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

/// Deploy-time values that beat stored metadata
#[derive(Args, Debug, Default, Clone)]
pub struct OverrideArgs {
    /// Memory size in MiB
    #[arg(long)]
    pub memory: Option<u32>,

    /// Timeout in seconds
    #[arg(long)]
    pub timeout: Option<u32>,

    /// Execution role name or ARN
    #[arg(long)]
    pub role: Option<String>,

    /// Runtime identifier (e.g. nodejs20.x)
    #[arg(long)]
    pub runtime: Option<String>,
}

fn parse_exists_check(value: &str) -> Result<ExistsCheckPolicy, String> {
    value.parse()
}
