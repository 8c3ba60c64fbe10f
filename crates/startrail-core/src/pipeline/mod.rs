pub mod config;
mod startrail;
mod types;

pub use startrail::{run_star_trail, StackSummary};
pub use types::{NoOpReporter, PipelineStage, ProgressReporter};
