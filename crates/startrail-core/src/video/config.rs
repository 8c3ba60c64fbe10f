use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_VIDEO_CODEC, DEFAULT_VIDEO_EXTENSIONS, DEFAULT_VIDEO_FPS, DEFAULT_VIDEO_QUALITY,
};
use crate::error::{Result, StarTrailError};

/// Settings for turning a folder of images into a timelapse video.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub fps: u32,
    /// Case-sensitive file extensions, without the dot.
    pub extensions: Vec<String>,
    /// ffmpeg encoder name.
    pub codec: String,
    /// ffmpeg `-q:v` (1 = best, 31 = worst).
    pub quality: u8,
    pub program: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output: PathBuf::from("timelapse.mp4"),
            fps: DEFAULT_VIDEO_FPS,
            extensions: DEFAULT_VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            quality: DEFAULT_VIDEO_QUALITY,
            program: "ffmpeg".to_string(),
        }
    }
}

impl VideoConfig {
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(StarTrailError::InvalidConfig("fps must be positive".into()));
        }
        if !(1..=31).contains(&self.quality) {
            return Err(StarTrailError::InvalidConfig(format!(
                "video quality must be between 1 and 31, got {}",
                self.quality
            )));
        }
        if self.codec.trim().is_empty() {
            return Err(StarTrailError::InvalidConfig("codec must not be empty".into()));
        }
        Ok(())
    }
}
