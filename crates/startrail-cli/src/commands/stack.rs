use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use startrail_core::consts::{DEFAULT_JPEG_QUALITY, DEFAULT_STACK_OUTPUT};
use startrail_core::pipeline::config::StarTrailConfig;
use startrail_core::pipeline::run_star_trail;
use tracing::debug;

use super::parse_extensions;
use crate::progress::BarReporter;
use crate::summary::{print_stack_config, print_stack_result};

#[derive(Args)]
pub struct StackArgs {
    /// Folder containing the photos to stack
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Stacking config file (TOML); replaces all other options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Comma-separated, case-sensitive file extensions to include
    #[arg(long, default_value = "jpg,JPG")]
    pub ext: String,

    /// JPEG quality of the stacked image (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    pub quality: u8,

    /// Decode and stack images on all CPU cores
    #[arg(long)]
    pub parallel: bool,

    /// Output file path
    #[arg(short, long, default_value = DEFAULT_STACK_OUTPUT)]
    pub output: PathBuf,
}

pub fn run(args: &StackArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid stacking config")?
    } else {
        build_config_from_args(args)
    };

    debug!(?config, "Resolved stacking config");
    print_stack_config(&config);

    let reporter = BarReporter::new();
    let summary = run_star_trail(&config, &reporter)
        .with_context(|| format!("Stacking {} failed", config.input_dir.display()))?;

    print_stack_result(&summary);
    Ok(())
}

fn build_config_from_args(args: &StackArgs) -> StarTrailConfig {
    StarTrailConfig {
        input_dir: args.dir.clone(),
        output: args.output.clone(),
        extensions: parse_extensions(&args.ext),
        jpeg_quality: args.quality,
        parallel: args.parallel,
    }
}
