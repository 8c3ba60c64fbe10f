use std::fmt;
use std::path::PathBuf;

use image::RgbImage;
use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::consts::RGB_CHANNELS;

/// Pixel dimensions of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Array shape `(height, width, 3)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, RGB_CHANNELS)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A single RGB image frame.
/// Channel values are f32 in [0.0, 255.0], shape = (height, width, 3).
#[derive(Clone, Debug)]
pub struct Frame {
    pub data: Array3<f32>,
    /// File the frame was decoded from, if any.
    pub source: Option<PathBuf>,
}

impl Frame {
    pub fn new(data: Array3<f32>) -> Self {
        Self { data, source: None }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Frame with every channel of every pixel set to `value`.
    pub fn filled(dims: Dimensions, value: f32) -> Self {
        Self::new(Array3::from_elem(dims.shape(), value))
    }

    pub fn from_rgb8(img: &RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let data = Array3::from_shape_fn((h as usize, w as usize, RGB_CHANNELS), |(row, col, ch)| {
            img.get_pixel(col as u32, row as u32).0[ch] as f32
        });
        Self::new(data)
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width() as u32, self.height() as u32)
    }

    /// Name used in error messages and logs.
    pub fn label(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => "<in-memory frame>".to_string(),
        }
    }
}
