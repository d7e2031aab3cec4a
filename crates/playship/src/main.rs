mod commands;
mod config;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use playship_build::TargetName;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "playship", version)]
#[command(
    about = "Build, tag and push the playbot image, and run its compose environment",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: playship.yaml in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Local image name
    #[arg(long, global = true, env = "PLAYSHIP_IMAGE")]
    pub image: Option<String>,

    /// Registry namespace for push
    #[arg(long, global = true, env = "PLAYSHIP_NAMESPACE")]
    pub namespace: Option<String>,

    /// Dockerfile used by build
    #[arg(short = 'f', long = "file", global = true, env = "PLAYSHIP_DOCKERFILE")]
    pub dockerfile: Option<String>,

    /// Build context directory
    #[arg(long, global = true, env = "PLAYSHIP_CONTEXT")]
    pub context: Option<String>,

    /// Compose file used by up/down
    #[arg(long = "compose-file", global = true, env = "PLAYSHIP_COMPOSE_FILE")]
    pub compose_file: Option<String>,

    /// Print the docker commands instead of running them
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// More log output (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parameters after the target, make style
#[derive(Args, Debug, Clone, Default)]
struct TargetArgs {
    /// Parameters, e.g. version=1.2.0 (others are ignored)
    #[arg(value_name = "KEY=VALUE")]
    params: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the image; with version=<label> also tag it
    Build(TargetArgs),
    /// Build, then push <namespace>/<image>:latest
    Push(TargetArgs),
    /// Build and start the compose environment
    Up(TargetArgs),
    /// Stop and remove the compose environment
    Down(TargetArgs),
    /// Remove unused images, system resources and volumes
    Prune(TargetArgs),
    /// Show what a target would run, in order
    Plan {
        /// Target name (build, push, up, down, prune)
        target: TargetName,
    },
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("warn,playship=debug,playship_build=debug,playship_config=debug"),
        _ => EnvFilter::new("warn,playship=trace,playship_build=trace,playship_config=trace"),
    });

    // stdout is for the notices and dry-run output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), err);
        std::process::exit(commands::exit_code(&err));
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let current_dir = std::env::current_dir()?;
    let pipeline_config = config::resolve(&cli.global, &current_dir)?;

    let (target, args) = match cli.command {
        Commands::Plan { target } => {
            return commands::plan::handle(pipeline_config, target);
        }
        Commands::Build(args) => (TargetName::Build, args),
        Commands::Push(args) => (TargetName::Push, args),
        Commands::Up(args) => (TargetName::Up, args),
        Commands::Down(args) => (TargetName::Down, args),
        Commands::Prune(args) => (TargetName::Prune, args),
    };

    commands::run::handle(pipeline_config, target, &args.params, cli.global.dry_run).await
}
