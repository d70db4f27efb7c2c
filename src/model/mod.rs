pub mod context_menu;
pub mod list;
pub mod tag_model;
pub mod task_model;

pub use context_menu::{MenuOption, TaskContextMenuModel};
pub use tag_model::CheckableTagModel;
pub use task_model::{TaskModel, TaskStore};
