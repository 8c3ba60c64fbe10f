pub mod camera;
pub mod config;
pub mod session;

pub use camera::{Camera, StillCommandCamera};
pub use config::CaptureConfig;
pub use session::{current_session_dir, frame_path, prepare_session_dir, run_capture, session_dir};
