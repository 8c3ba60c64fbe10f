/// Minimum pixel count (h*w) to use Rayon parallelism for the element-wise maximum.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in every stacked image (R, G, B).
pub const RGB_CHANNELS: usize = 3;

/// Largest value an exported 8-bit channel can hold.
pub const MAX_CHANNEL_VALUE: f32 = 255.0;

/// File name of the stacked star-trail image.
pub const DEFAULT_STACK_OUTPUT: &str = "MiniTrail_stacked_image.jpg";

/// Extensions picked up by the star-trail stacker. Matching is case-sensitive.
pub const DEFAULT_STACK_EXTENSIONS: [&str; 2] = ["jpg", "JPG"];

/// JPEG quality used when nothing else is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Extensions picked up by the timelapse video encoder.
pub const DEFAULT_VIDEO_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// Frames per second of the encoded timelapse.
pub const DEFAULT_VIDEO_FPS: u32 = 24;

/// ffmpeg encoder for the MPEG-4 Part 2 (`mp4v`) stream.
pub const DEFAULT_VIDEO_CODEC: &str = "mpeg4";

/// ffmpeg `-q:v` value; 1 is best, 31 is worst.
pub const DEFAULT_VIDEO_QUALITY: u8 = 2;

/// Still-capture program compatible with `rpicam-still` options.
pub const DEFAULT_CAPTURE_PROGRAM: &str = "rpicam-still";

/// Root directory for timelapse capture sessions.
pub const DEFAULT_CAPTURE_ROOT: &str = "/home/pi/Pictures/timelapse";

/// Sensor readout size for captured stills.
pub const DEFAULT_CAPTURE_WIDTH: u32 = 2048;
pub const DEFAULT_CAPTURE_HEIGHT: u32 = 1080;

/// Seconds between two captures.
pub const DEFAULT_CAPTURE_INTERVAL_SECS: u64 = 10;

/// Seconds to let the sensor settle gain and white balance before the first capture.
pub const DEFAULT_CAPTURE_WARMUP_SECS: u64 = 2;

/// Preview window geometry `x,y,width,height`.
pub const DEFAULT_PREVIEW_WINDOW: (u32, u32, u32, u32) = (50, 50, 640, 480);

/// ISO range accepted by the camera; 0 selects automatic gain.
pub const MIN_ISO: u32 = 100;
pub const MAX_ISO: u32 = 800;

/// Session directory name format (local time).
pub const SESSION_DIR_FORMAT: &str = "%Y-%m-%d_%H-%M";
