mod cmd;
mod prompt;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sitekit",
    about = "Provision shared scripts and bootstrap local Drupal projects",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from composer.json or .git/)
    #[arg(long, global = true, env = "SITEKIT_ROOT")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Link the shared scripts into the project's scripts/ directory
    #[command(alias = "links")]
    Scaffold,

    /// Walk through the bootstrap of a freshly created project
    #[command(alias = "bootstrap")]
    Assistant {
        /// Project name (skips the interactive prompt)
        #[arg(long)]
        name: Option<String>,
    },

    /// Inspect the .sitekit.yml configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Scaffold => cmd::scaffold::run(&root),
        Commands::Assistant { name } => cmd::assistant::run(&root, name.as_deref()),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
