pub mod enums;
pub mod task;

pub use enums::{Page, TaskStatus, UiMode};
pub use task::Task;
