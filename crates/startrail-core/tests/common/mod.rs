#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use image::{Rgb, RgbImage};
use startrail_core::pipeline::{PipelineStage, ProgressReporter};

/// Write a PNG whose pixel (x, y) is `pixel(x, y)`. Returns its path.
pub fn write_png(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    pixel: impl Fn(u32, u32) -> [u8; 3],
) -> PathBuf {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb(pixel(x, y)));
    let path = dir.join(name);
    img.save(&path).expect("write test png");
    path
}

/// Write a PNG with the same value in every channel of every pixel.
pub fn write_uniform_png(dir: &Path, name: &str, width: u32, height: u32, value: u8) -> PathBuf {
    write_png(dir, name, width, height, |_, _| [value; 3])
}

/// Write a PNG from a grid of gray levels, `rows[y][x]`, replicated to all channels.
pub fn write_grid_png(dir: &Path, name: &str, rows: &[&[u8]]) -> PathBuf {
    let height = rows.len() as u32;
    let width = rows[0].len() as u32;
    write_png(dir, name, width, height, |x, y| [rows[y as usize][x as usize]; 3])
}

/// Records every stage and the highest item count seen.
#[derive(Default)]
pub struct RecordingReporter {
    pub stages: Mutex<Vec<PipelineStage>>,
    pub max_done: AtomicUsize,
    pub finished: AtomicUsize,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: PipelineStage, _total_items: Option<usize>) {
        self.stages.lock().unwrap().push(stage);
    }

    fn advance(&self, items_done: usize) {
        self.max_done.fetch_max(items_done, Ordering::Relaxed);
    }

    fn finish_stage(&self) {
        self.finished.fetch_add(1, Ordering::Relaxed);
    }
}
