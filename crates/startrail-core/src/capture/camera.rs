use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::consts::DEFAULT_PREVIEW_WINDOW;
use crate::error::{Result, StarTrailError};

use super::config::CaptureConfig;

/// Something that can write one still photograph to a path.
pub trait Camera {
    fn capture(&mut self, path: &Path) -> Result<()>;
}

/// Runs an `rpicam-still` compatible program once per frame.
pub struct StillCommandCamera {
    config: CaptureConfig,
}

impl StillCommandCamera {
    pub fn new(config: CaptureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Arguments passed to the capture program for one frame.
    pub fn args(&self, path: &Path) -> Vec<String> {
        still_args(&self.config, path)
    }
}

impl Camera for StillCommandCamera {
    fn capture(&mut self, path: &Path) -> Result<()> {
        let args = self.args(path);
        debug!(program = %self.config.program, ?args, "Running capture command");

        let output = Command::new(&self.config.program).args(&args).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StarTrailError::Capture {
                path: path.to_path_buf(),
                message: format!(
                    "{} exited with {}: {}",
                    self.config.program,
                    output.status,
                    stderr.trim()
                ),
            });
        }
        Ok(())
    }
}

/// Command line for a single still with fixed exposure.
pub fn still_args(config: &CaptureConfig, path: &Path) -> Vec<String> {
    let mut args = vec![
        "--immediate".to_string(),
        "--width".to_string(),
        config.width.to_string(),
        "--height".to_string(),
        config.height.to_string(),
        "--shutter".to_string(),
        config.shutter_us.to_string(),
    ];

    if let Some(gain) = config.gain() {
        args.push("--gain".to_string());
        args.push(format!("{gain}"));
    }

    args.push("--brightness".to_string());
    args.push(format!("{}", config.normalized_brightness()));

    if config.preview {
        let (x, y, w, h) = DEFAULT_PREVIEW_WINDOW;
        args.push("--preview".to_string());
        args.push(format!("{x},{y},{w},{h}"));
    } else {
        args.push("--nopreview".to_string());
    }

    args.push("--output".to_string());
    args.push(path.display().to_string());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_and_brightness_are_mapped() {
        let config = CaptureConfig {
            iso: 400,
            brightness: 75,
            preview: false,
            ..Default::default()
        };
        let args = still_args(&config, Path::new("/tmp/img001.jpg"));
        let joined = args.join(" ");
        assert!(joined.contains("--gain 4"), "got: {joined}");
        assert!(joined.contains("--brightness 0.5"), "got: {joined}");
        assert!(joined.contains("--nopreview"), "got: {joined}");
        assert!(joined.ends_with("--output /tmp/img001.jpg"), "got: {joined}");
    }

    #[test]
    fn auto_iso_omits_gain() {
        let config = CaptureConfig::default();
        let args = still_args(&config, Path::new("x.jpg"));
        assert!(!args.iter().any(|a| a == "--gain"));
        assert!(args.iter().any(|a| a == "50,50,640,480"));
    }
}
