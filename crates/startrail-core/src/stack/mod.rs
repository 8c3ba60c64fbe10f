pub mod max;

pub use max::{max_stack, stack_paths, stack_paths_parallel, MaxAccumulator};
