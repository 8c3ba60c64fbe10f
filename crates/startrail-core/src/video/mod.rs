pub mod config;
pub mod encode;
pub mod ffmpeg;

pub use config::VideoConfig;
pub use encode::{encode_frames, run_video, FrameSink, VideoSummary};
pub use ffmpeg::{ffmpeg_args, FfmpegSink};
