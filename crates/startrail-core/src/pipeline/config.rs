use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_JPEG_QUALITY, DEFAULT_STACK_EXTENSIONS, DEFAULT_STACK_OUTPUT};

/// Settings for a star-trail stacking run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarTrailConfig {
    /// Directory scanned for input images (not recursive).
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Case-sensitive file extensions, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// Decode and fold images on all cores.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for StarTrailConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output: default_output(),
            extensions: default_extensions(),
            jpeg_quality: default_jpeg_quality(),
            parallel: false,
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_STACK_OUTPUT)
}

fn default_extensions() -> Vec<String> {
    DEFAULT_STACK_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}
