use std::path::PathBuf;

use tracing::info;

use crate::error::{Result, StarTrailError};
use crate::frame::Dimensions;
use crate::io::discover::list_images;
use crate::io::image_io::save_rgb_image;
use crate::stack::{stack_paths, stack_paths_parallel};

use super::config::StarTrailConfig;
use super::types::{PipelineStage, ProgressReporter};

/// What a completed stacking run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct StackSummary {
    pub frames: usize,
    pub dimensions: Dimensions,
    pub output: PathBuf,
}

/// Discover images, stack them by per-pixel maximum and write one output image.
///
/// Any failure aborts the run before the output file is created.
pub fn run_star_trail(
    config: &StarTrailConfig,
    reporter: &dyn ProgressReporter,
) -> Result<StackSummary> {
    reporter.begin_stage(PipelineStage::Discovering, None);
    let mut paths = list_images(&config.input_dir, &config.extensions)?;
    // A previous result left in the input folder must not feed the new stack.
    if let Ok(previous) = config.output.canonicalize() {
        paths.retain(|p| p.canonicalize().map_or(true, |p| p != previous));
    }
    reporter.finish_stage();

    if paths.is_empty() {
        return Err(StarTrailError::NoInputImages {
            dir: config.input_dir.clone(),
        });
    }
    info!(
        dir = %config.input_dir.display(),
        images = paths.len(),
        parallel = config.parallel,
        "Found images"
    );

    let acc = if config.parallel {
        stack_paths_parallel(&paths, reporter)?
    } else {
        stack_paths(&paths, reporter)?
    };
    let frames = acc.frame_count();
    let dimensions = acc.dimensions();

    reporter.begin_stage(PipelineStage::Writing, None);
    let image = acc.finalize()?;
    save_rgb_image(&image, &config.output, config.jpeg_quality)?;
    reporter.finish_stage();

    info!(output = %config.output.display(), frames, "Saved stacked image");
    Ok(StackSummary {
        frames,
        dimensions,
        output: config.output.clone(),
    })
}
