use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CAPTURE_HEIGHT, DEFAULT_CAPTURE_INTERVAL_SECS, DEFAULT_CAPTURE_PROGRAM,
    DEFAULT_CAPTURE_ROOT, DEFAULT_CAPTURE_WARMUP_SECS, DEFAULT_CAPTURE_WIDTH, MAX_ISO, MIN_ISO,
};
use crate::error::{Result, StarTrailError};

/// Exposure and scheduling settings for a timelapse capture session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Sensor sensitivity; 0 lets the camera choose.
    pub iso: u32,
    /// Exposure time in microseconds.
    pub shutter_us: u64,
    /// 0 (black) to 100 (white), 50 is neutral.
    pub brightness: u8,
    pub width: u32,
    pub height: u32,
    pub interval_secs: u64,
    pub warmup_secs: u64,
    /// Each session gets a timestamped subdirectory below this.
    pub output_root: PathBuf,
    /// Stop after this many frames; run until interrupted when unset.
    pub max_frames: Option<usize>,
    pub preview: bool,
    /// Still-capture executable, invoked once per frame.
    pub program: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            iso: 0,
            shutter_us: 1_000_000,
            brightness: 50,
            width: DEFAULT_CAPTURE_WIDTH,
            height: DEFAULT_CAPTURE_HEIGHT,
            interval_secs: DEFAULT_CAPTURE_INTERVAL_SECS,
            warmup_secs: DEFAULT_CAPTURE_WARMUP_SECS,
            output_root: PathBuf::from(DEFAULT_CAPTURE_ROOT),
            max_frames: None,
            preview: true,
            program: DEFAULT_CAPTURE_PROGRAM.to_string(),
        }
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<()> {
        if self.iso != 0 && !(MIN_ISO..=MAX_ISO).contains(&self.iso) {
            return Err(StarTrailError::InvalidConfig(format!(
                "ISO must be 0 (auto) or between {MIN_ISO} and {MAX_ISO}, got {}",
                self.iso
            )));
        }
        if self.shutter_us == 0 {
            return Err(StarTrailError::InvalidConfig(
                "shutter speed must be positive".into(),
            ));
        }
        if self.brightness > 100 {
            return Err(StarTrailError::InvalidConfig(format!(
                "brightness must be between 0 and 100, got {}",
                self.brightness
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(StarTrailError::InvalidConfig(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_frames == Some(0) {
            return Err(StarTrailError::InvalidConfig(
                "frame limit must be at least 1".into(),
            ));
        }
        if self.program.trim().is_empty() {
            return Err(StarTrailError::InvalidConfig(
                "capture program must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn warmup(&self) -> Duration {
        Duration::from_secs(self.warmup_secs)
    }

    /// Analogue gain equivalent of the ISO setting (ISO 100 = gain 1.0).
    pub fn gain(&self) -> Option<f32> {
        (self.iso != 0).then(|| self.iso as f32 / 100.0)
    }

    /// Brightness mapped from 0..=100 onto -1.0..=1.0.
    pub fn normalized_brightness(&self) -> f32 {
        (self.brightness as f32 - 50.0) / 50.0
    }
}
