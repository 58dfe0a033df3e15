mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use neurolabel_core::config::LabelerConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "neurolabel", about = "Object detection annotation library tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML config file (library location, detector, canvas defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store an image and run detection on it
    Detect(commands::detect::DetectArgs),
    /// List processed images, newest first
    History(commands::history::HistoryArgs),
    /// Export the annotations of a stored image as JSON
    Export(commands::export::ExportArgs),
    /// Delete a stored image and its annotations
    Delete(commands::delete::DeleteArgs),
    /// Print or save the default config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &cli.config {
        Some(path) => LabelerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LabelerConfig::default(),
    };

    match &cli.command {
        Commands::Detect(args) => commands::detect::run(args, &config),
        Commands::History(args) => commands::history::run(args, &config),
        Commands::Export(args) => commands::export::run(args, &config),
        Commands::Delete(args) => commands::delete::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
