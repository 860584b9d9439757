pub mod intent;
pub mod task_list;

pub use intent::{Applied, Intent};
pub use task_list::{TaskList, TaskListError};
