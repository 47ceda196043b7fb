mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lumen", about = "Real-time pixel filter pipeline")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the filter catalog with parameter defaults
    Filters(commands::filters::FiltersArgs),
    /// Apply a filter chain to a still image
    Apply(commands::apply::ApplyArgs),
    /// Play a directory of frames through a filter chain
    Play(commands::play::PlayArgs),
    /// Print or save a pipeline config
    Config(commands::config::ConfigArgs),
    /// Show image file metadata
    Info(commands::info::InfoArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Filters(args) => commands::filters::run(args),
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Play(args) => commands::play::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
