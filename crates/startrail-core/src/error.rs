use std::path::PathBuf;

use thiserror::Error;

use crate::frame::Dimensions;

#[derive(Error, Debug)]
pub enum StarTrailError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No input images found in {}", dir.display())]
    NoInputImages { dir: PathBuf },

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Shape mismatch in {image}: expected {expected}, got {actual}")]
    ShapeMismatch {
        image: String,
        expected: Dimensions,
        actual: Dimensions,
    },

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Capture failed for {}: {message}", path.display())]
    Capture { path: PathBuf, message: String },

    #[error("Video encoding failed: {0}")]
    Video(String),
}

pub type Result<T> = std::result::Result<T, StarTrailError>;
