use std::path::{Path, PathBuf};

use image::RgbImage;
use ndarray::{Array3, Zip};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::consts::{MAX_CHANNEL_VALUE, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{Result, StarTrailError};
use crate::frame::{Dimensions, Frame};
use crate::io::image_io::{load_frame, probe_dimensions};
use crate::pipeline::{PipelineStage, ProgressReporter};

/// Running per-pixel, per-channel maximum over a set of equally sized frames.
///
/// Starts at zero, so accumulating any 8-bit image never lowers a value and
/// the result only depends on the set of inputs, not their order.
#[derive(Clone, Debug)]
pub struct MaxAccumulator {
    state: Array3<f32>,
    dims: Dimensions,
    frames: usize,
}

impl MaxAccumulator {
    /// Zero-filled accumulator of the given size.
    pub fn new(dims: Dimensions) -> Self {
        Self {
            state: Array3::zeros(dims.shape()),
            dims,
            frames: 0,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Number of frames folded in so far, merged partials included.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn state(&self) -> &Array3<f32> {
        &self.state
    }

    /// Fold one frame into the running maximum.
    pub fn accumulate(&mut self, frame: &Frame) -> Result<()> {
        let actual = frame.dimensions();
        if actual != self.dims {
            return Err(StarTrailError::ShapeMismatch {
                image: frame.label(),
                expected: self.dims,
                actual,
            });
        }
        elementwise_max(&mut self.state, &frame.data, self.dims);
        self.frames += 1;
        Ok(())
    }

    /// Decode `path` and fold it into the running maximum.
    pub fn accumulate_path(&mut self, path: &Path) -> Result<()> {
        let frame = load_frame(path)?;
        self.accumulate(&frame)
    }

    /// Fold another partial accumulator into this one.
    pub fn merge(&mut self, other: &MaxAccumulator) -> Result<()> {
        if other.dims != self.dims {
            return Err(StarTrailError::ShapeMismatch {
                image: "<partial accumulator>".to_string(),
                expected: self.dims,
                actual: other.dims,
            });
        }
        elementwise_max(&mut self.state, &other.state, self.dims);
        self.frames += other.frames;
        Ok(())
    }

    /// Current state as a Frame, without rounding.
    pub fn to_frame(&self) -> Frame {
        Frame::new(self.state.clone())
    }

    /// Round to the nearest integer, clamp to [0, 255] and pack as 8-bit RGB.
    pub fn finalize(self) -> Result<RgbImage> {
        let pixels: Vec<u8> = self
            .state
            .iter()
            .map(|&v| v.round().clamp(0.0, MAX_CHANNEL_VALUE) as u8)
            .collect();
        let dims = self.dims;
        RgbImage::from_raw(dims.width, dims.height, pixels).ok_or_else(|| {
            StarTrailError::InvalidConfig(format!("accumulator buffer does not match {dims}"))
        })
    }
}

/// `acc = max(acc, other)` element-wise. Parallel for large images.
fn elementwise_max(acc: &mut Array3<f32>, other: &Array3<f32>, dims: Dimensions) {
    let zip = Zip::from(acc).and(other);
    if dims.pixel_count() >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(|a, &b| {
            if b > *a {
                *a = b;
            }
        });
    } else {
        zip.for_each(|a, &b| {
            if b > *a {
                *a = b;
            }
        });
    }
}

/// Stack in-memory frames by per-pixel maximum.
pub fn max_stack(frames: &[Frame]) -> Result<Frame> {
    let first = frames.first().ok_or(StarTrailError::NoInputImages {
        dir: PathBuf::from("<in-memory frames>"),
    })?;

    let mut acc = MaxAccumulator::new(first.dimensions());
    for frame in frames {
        acc.accumulate(frame)?;
    }
    Ok(acc.to_frame())
}

/// Decode and fold images one at a time; only the accumulator stays in memory.
///
/// The first path defines the expected dimensions. Stops at the first
/// decode failure or shape mismatch.
pub fn stack_paths(
    paths: &[PathBuf],
    reporter: &dyn ProgressReporter,
) -> Result<MaxAccumulator> {
    let Some(first) = paths.first() else {
        return Err(no_inputs(paths));
    };

    reporter.begin_stage(PipelineStage::Stacking, Some(paths.len()));

    let first_frame = load_frame(first)?;
    let mut acc = MaxAccumulator::new(first_frame.dimensions());
    info!(dimensions = %acc.dimensions(), frames = paths.len(), "Stacking");

    acc.accumulate(&first_frame)?;
    drop(first_frame);
    debug!(image = %first.display(), "Processed image 1");
    reporter.advance(1);

    for (i, path) in paths.iter().enumerate().skip(1) {
        acc.accumulate_path(path)?;
        debug!(image = %path.display(), "Processed image {}", i + 1);
        reporter.advance(i + 1);
    }

    reporter.finish_stage();
    Ok(acc)
}

/// Parallel version of [`stack_paths`].
///
/// Each Rayon worker folds its share of images into a private partial
/// accumulator; partials are merged by element-wise maximum at the end.
/// Expected dimensions come from the first file's header.
pub fn stack_paths_parallel(
    paths: &[PathBuf],
    reporter: &dyn ProgressReporter,
) -> Result<MaxAccumulator> {
    let Some(first) = paths.first() else {
        return Err(no_inputs(paths));
    };

    let dims = probe_dimensions(first)?;
    info!(dimensions = %dims, frames = paths.len(), "Stacking in parallel");
    reporter.begin_stage(PipelineStage::Stacking, Some(paths.len()));

    let done = std::sync::atomic::AtomicUsize::new(0);
    let merged = paths
        .par_iter()
        .try_fold(
            || None::<MaxAccumulator>,
            |partial, path| -> Result<Option<MaxAccumulator>> {
                let mut acc = partial.unwrap_or_else(|| MaxAccumulator::new(dims));
                acc.accumulate_path(path)?;
                let n = done.fetch_add(1, std::sync::atomic::Ordering::Relaxed) + 1;
                reporter.advance(n);
                Ok(Some(acc))
            },
        )
        .try_reduce(
            || None,
            |a, b| match (a, b) {
                (Some(mut a), Some(b)) => {
                    a.merge(&b)?;
                    Ok(Some(a))
                }
                (a, None) => Ok(a),
                (None, b) => Ok(b),
            },
        )?;

    reporter.finish_stage();
    merged.ok_or_else(|| no_inputs(paths))
}

fn no_inputs(paths: &[PathBuf]) -> StarTrailError {
    let dir = paths
        .first()
        .and_then(|p| p.parent())
        .map(Path::to_path_buf)
        .unwrap_or_default();
    StarTrailError::NoInputImages { dir }
}
