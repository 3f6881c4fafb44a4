mod commands;
mod csv;
mod session;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prism", about = "DIY spectrometer processing tool")]
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
    /// Show frame image metadata
    Info(commands::info::InfoArgs),
    /// Run the acquisition pipeline over a frame sequence
    Process(commands::process::ProcessArgs),
    /// Validate a session's calibration and sample its wavelength map
    Calibrate(commands::calibrate::CalibrateArgs),
    /// Print or save a default session file
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

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Process(args) => commands::process::run(args),
        Commands::Calibrate(args) => commands::calibrate::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
