use std::io::Write;
use std::process::{Child, ChildStdin, Command, Stdio};

use image::RgbImage;
use tracing::debug;

use crate::error::{Result, StarTrailError};
use crate::frame::Dimensions;

use super::config::VideoConfig;
use super::encode::FrameSink;

/// Arguments for an ffmpeg process reading raw RGB24 frames from stdin.
///
/// Odd dimensions are padded to even ones, which yuv420p requires.
pub fn ffmpeg_args(config: &VideoConfig, dims: Dimensions) -> Vec<String> {
    let mut args: Vec<String> = ["-y", "-loglevel", "error"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    // Input: headerless RGB24 frames on stdin.
    args.extend([
        "-f".to_string(),
        "rawvideo".to_string(),
        "-pix_fmt".to_string(),
        "rgb24".to_string(),
        "-s".to_string(),
        dims.to_string(),
        "-framerate".to_string(),
        config.fps.to_string(),
        "-i".to_string(),
        "-".to_string(),
    ]);

    args.extend([
        "-vf".to_string(),
        "pad=ceil(iw/2)*2:ceil(ih/2)*2".to_string(),
        "-c:v".to_string(),
        config.codec.clone(),
        "-q:v".to_string(),
        config.quality.to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        config.output.display().to_string(),
    ]);
    args
}

/// Streams frames into a child ffmpeg process.
pub struct FfmpegSink {
    child: Child,
    stdin: Option<ChildStdin>,
    dims: Dimensions,
    program: String,
}

impl FfmpegSink {
    pub fn spawn(config: &VideoConfig, dims: Dimensions) -> Result<Self> {
        let args = ffmpeg_args(config, dims);
        debug!(program = %config.program, ?args, "Spawning encoder");

        let mut child = Command::new(&config.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()?;
        let stdin = child.stdin.take();
        Ok(Self {
            child,
            stdin,
            dims,
            program: config.program.clone(),
        })
    }
}

impl FrameSink for FfmpegSink {
    fn write_frame(&mut self, frame: &RgbImage) -> Result<()> {
        let (w, h) = frame.dimensions();
        if Dimensions::new(w, h) != self.dims {
            return Err(StarTrailError::Video(format!(
                "frame is {w}x{h}, encoder expects {}",
                self.dims
            )));
        }
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| StarTrailError::Video("encoder input already closed".into()))?;
        stdin.write_all(frame.as_raw())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        // Closing stdin signals end of stream.
        drop(self.stdin.take());
        let status = self.child.wait()?;
        if !status.success() {
            return Err(StarTrailError::Video(format!(
                "{} exited with {status}",
                self.program
            )));
        }
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if self.stdin.is_some() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
