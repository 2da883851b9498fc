pub mod stats;

pub use stats::{achievements, calculate_task_stats, Achievement, TaskStats};
