use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;
use startrail_core::capture::{current_session_dir, run_capture, CaptureConfig, StillCommandCamera};
use startrail_core::consts::{
    DEFAULT_CAPTURE_HEIGHT, DEFAULT_CAPTURE_INTERVAL_SECS, DEFAULT_CAPTURE_PROGRAM,
    DEFAULT_CAPTURE_ROOT, DEFAULT_CAPTURE_WARMUP_SECS, DEFAULT_CAPTURE_WIDTH,
};

use crate::progress::BarReporter;
use crate::summary::print_capture_config;

#[derive(Args)]
pub struct CaptureArgs {
    /// Sensor ISO (100-800, or 0 for automatic)
    pub iso: u32,

    /// Shutter speed in microseconds
    pub shutter: u64,

    /// Brightness (0-100, 50 is neutral)
    pub brightness: u8,

    /// Parent folder for the timestamped session folder
    #[arg(long, default_value = DEFAULT_CAPTURE_ROOT)]
    pub root: PathBuf,

    /// Seconds between captures
    #[arg(long, default_value_t = DEFAULT_CAPTURE_INTERVAL_SECS)]
    pub interval: u64,

    /// Seconds to wait before the first capture
    #[arg(long, default_value_t = DEFAULT_CAPTURE_WARMUP_SECS)]
    pub warmup: u64,

    /// Image width in pixels
    #[arg(long, default_value_t = DEFAULT_CAPTURE_WIDTH)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = DEFAULT_CAPTURE_HEIGHT)]
    pub height: u32,

    /// Stop after this many frames (default: run until interrupted)
    #[arg(long)]
    pub frames: Option<usize>,

    /// Do not open a preview window
    #[arg(long)]
    pub no_preview: bool,

    /// Still-capture program (rpicam-still compatible)
    #[arg(long, default_value = DEFAULT_CAPTURE_PROGRAM)]
    pub program: String,
}

pub fn run(args: &CaptureArgs) -> Result<()> {
    let config = CaptureConfig {
        iso: args.iso,
        shutter_us: args.shutter,
        brightness: args.brightness,
        width: args.width,
        height: args.height,
        interval_secs: args.interval,
        warmup_secs: args.warmup,
        output_root: args.root.clone(),
        max_frames: args.frames,
        preview: !args.no_preview,
        program: args.program.clone(),
    };

    let dir = current_session_dir(&config.output_root);
    debug!(?config, session = %dir.display(), "Resolved capture config");
    print_capture_config(&config, &dir);

    let mut camera = StillCommandCamera::new(config.clone()).context("Invalid capture settings")?;
    let reporter = BarReporter::new();
    let captured = run_capture(&mut camera, &config, &dir, &reporter)
        .with_context(|| format!("Capture session in {} failed", dir.display()))?;

    println!("Captured {} frame(s) into {}", captured.len(), dir.display());
    Ok(())
}
