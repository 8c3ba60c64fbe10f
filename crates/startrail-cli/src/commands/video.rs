use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use startrail_core::consts::{DEFAULT_VIDEO_CODEC, DEFAULT_VIDEO_FPS, DEFAULT_VIDEO_QUALITY};
use startrail_core::video::{run_video, VideoConfig};

use super::parse_extensions;
use crate::progress::BarReporter;

#[derive(Args)]
pub struct VideoArgs {
    /// Folder containing the frames
    pub dir: PathBuf,

    /// Output video file
    pub output: PathBuf,

    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_VIDEO_FPS)]
    pub fps: u32,

    /// Comma-separated, case-sensitive file extensions to include
    #[arg(long, default_value = "jpg,png")]
    pub ext: String,

    /// ffmpeg video encoder
    #[arg(long, default_value = DEFAULT_VIDEO_CODEC)]
    pub codec: String,

    /// Encoder quality, 1 (best) to 31 (worst)
    #[arg(long, default_value_t = DEFAULT_VIDEO_QUALITY)]
    pub quality: u8,

    /// ffmpeg executable
    #[arg(long, default_value = "ffmpeg")]
    pub ffmpeg: String,
}

pub fn run(args: &VideoArgs) -> Result<()> {
    let config = VideoConfig {
        input_dir: args.dir.clone(),
        output: args.output.clone(),
        fps: args.fps,
        extensions: parse_extensions(&args.ext),
        codec: args.codec.clone(),
        quality: args.quality,
        program: args.ffmpeg.clone(),
    };

    let reporter = BarReporter::new();
    let summary = run_video(&config, &reporter)
        .with_context(|| format!("Encoding {} failed", config.input_dir.display()))?;

    println!(
        "Encoded {} frame(s) at {} ({} fps) to {}",
        summary.frames,
        summary.dimensions,
        config.fps,
        summary.output.display()
    );
    Ok(())
}
