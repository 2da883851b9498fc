pub mod enums;
pub mod quotes;
pub mod task;
pub mod views;

pub use enums::{Filter, TimerMode, ToastKind, UiMode};
pub use quotes::{random_quote, Quote};
pub use task::{Task, DEADLINE_FORMAT};
pub use views::{deadline_label, filter_tasks, format_clock, status_badge};
