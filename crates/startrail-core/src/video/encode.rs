use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::error::{Result, StarTrailError};
use crate::frame::Dimensions;
use crate::io::discover::list_images;
use crate::io::image_io::{load_rgb8, probe_dimensions};
use crate::pipeline::{PipelineStage, ProgressReporter};

use super::config::VideoConfig;
use super::ffmpeg::FfmpegSink;

/// Destination for decoded video frames.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &RgbImage) -> Result<()>;

    /// Flush and close the stream. No frames may be written afterwards.
    fn finish(&mut self) -> Result<()>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct VideoSummary {
    pub frames: usize,
    pub dimensions: Dimensions,
    pub output: PathBuf,
}

/// Decode `paths` in order and push each one into `sink`.
///
/// Every image must match `expected`; the first one that does not aborts
/// the encode with `ShapeMismatch`. Returns the number of frames written.
pub fn encode_frames(
    paths: &[PathBuf],
    expected: Dimensions,
    sink: &mut dyn FrameSink,
    reporter: &dyn ProgressReporter,
) -> Result<usize> {
    reporter.begin_stage(PipelineStage::Encoding, Some(paths.len()));

    for (i, path) in paths.iter().enumerate() {
        let frame = load_rgb8(path)?;
        let (w, h) = frame.dimensions();
        let actual = Dimensions::new(w, h);
        if actual != expected {
            return Err(StarTrailError::ShapeMismatch {
                image: path.display().to_string(),
                expected,
                actual,
            });
        }
        sink.write_frame(&frame)?;
        debug!(image = %path.display(), "Encoded frame {}", i + 1);
        reporter.advance(i + 1);
    }

    reporter.finish_stage();
    Ok(paths.len())
}

/// Encode every matching image in `config.input_dir`, in file name order,
/// into `config.output` through ffmpeg.
pub fn run_video(config: &VideoConfig, reporter: &dyn ProgressReporter) -> Result<VideoSummary> {
    config.validate()?;

    reporter.begin_stage(PipelineStage::Discovering, None);
    let paths = list_images(&config.input_dir, &config.extensions)?;
    reporter.finish_stage();

    let first = paths.first().ok_or_else(|| StarTrailError::NoInputImages {
        dir: config.input_dir.clone(),
    })?;
    let dims = probe_dimensions(first)?;
    info!(
        frames = paths.len(),
        dimensions = %dims,
        fps = config.fps,
        output = %config.output.display(),
        "Encoding timelapse"
    );

    let mut sink = FfmpegSink::spawn(config, dims)?;
    let encoded = encode_frames(&paths, dims, &mut sink, reporter)
        .and_then(|frames| sink.finish().map(|()| frames));
    let frames = match encoded {
        Ok(frames) => frames,
        Err(e) => {
            // Kill the encoder before removing its half-written output.
            drop(sink);
            remove_partial_output(&config.output);
            return Err(e);
        }
    };

    info!(output = %config.output.display(), frames, "Saved video");
    Ok(VideoSummary {
        frames,
        dimensions: dims,
        output: config.output.clone(),
    })
}

fn remove_partial_output(path: &Path) {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
            warn!(error = %e, "Could not remove partial video");
        }
        _ => {}
    }
}
