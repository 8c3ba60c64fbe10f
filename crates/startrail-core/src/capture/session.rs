use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::consts::SESSION_DIR_FORMAT;
use crate::error::Result;
use crate::pipeline::{PipelineStage, ProgressReporter};

use super::camera::Camera;
use super::config::CaptureConfig;

/// `root/YYYY-MM-DD_HH-MM` for the given local time.
pub fn session_dir(root: &Path, started: NaiveDateTime) -> PathBuf {
    root.join(started.format(SESSION_DIR_FORMAT).to_string())
}

/// Session directory for a session starting now.
pub fn current_session_dir(root: &Path) -> PathBuf {
    session_dir(root, Local::now().naive_local())
}

/// Create the session directory. Reusing an existing one is fine, so two
/// sessions started in the same minute share a folder.
pub fn prepare_session_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    debug!(dir = %dir.display(), "Session directory ready");
    Ok(())
}

/// `img001.jpg`, `img002.jpg`, ... Counters above 999 widen naturally.
pub fn frame_path(dir: &Path, counter: usize) -> PathBuf {
    dir.join(format!("img{counter:03}.jpg"))
}

/// Capture stills into `dir` until `config.max_frames` is reached
/// (or forever when unset), pausing `config.interval()` between frames.
///
/// The first failed capture ends the session.
pub fn run_capture(
    camera: &mut dyn Camera,
    config: &CaptureConfig,
    dir: &Path,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<PathBuf>> {
    config.validate()?;
    prepare_session_dir(dir)?;

    reporter.begin_stage(PipelineStage::WarmingUp, None);
    thread::sleep(config.warmup());
    reporter.finish_stage();

    info!(
        dir = %dir.display(),
        iso = config.iso,
        shutter_us = config.shutter_us,
        brightness = config.brightness,
        "Starting capture session"
    );
    reporter.begin_stage(PipelineStage::Capturing, config.max_frames);

    let mut captured = Vec::new();
    let mut counter = 1;
    loop {
        let path = frame_path(dir, counter);
        camera.capture(&path)?;
        info!("Captured {}", path.display());
        captured.push(path);
        reporter.advance(captured.len());

        if config.max_frames.is_some_and(|max| captured.len() >= max) {
            break;
        }
        counter += 1;
        thread::sleep(config.interval());
    }

    reporter.finish_stage();
    Ok(captured)
}
