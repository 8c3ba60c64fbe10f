mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "startrail", about = "Star-trail stacking and timelapse tools")]
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
    /// Stack a folder of photos into one star-trail image
    Stack(commands::stack::StackArgs),
    /// Take photos at a fixed interval with manual exposure
    Capture(commands::capture::CaptureArgs),
    /// Turn a folder of images into a timelapse video
    Video(commands::video::VideoArgs),
    /// List the images a stack would use
    Info(commands::info::InfoArgs),
    /// Print or save the default stacking config
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
        Commands::Stack(args) => commands::stack::run(args),
        Commands::Capture(args) => commands::capture::run(args),
        Commands::Video(args) => commands::video::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
