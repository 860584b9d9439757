use serde::Serialize;

use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, PartialEq)]
pub struct TaskJson {
    /// 1-based, as accepted by `toggle` and `rm`
    pub position: usize,
    pub task: String,
    pub done: bool,
}

impl TaskJson {
    pub fn new(position: usize, task: &Task) -> Self {
        TaskJson {
            position,
            task: task.text.clone(),
            done: task.done,
        }
    }
}

pub fn tasks_to_json(tasks: &[Task]) -> Vec<TaskJson> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| TaskJson::new(i + 1, t))
        .collect()
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One line of `tick list`, e.g. ` 2. [x] walk dog`. Positions are padded
/// to the width of the largest one so the checkboxes line up.
pub fn format_task_line(position: usize, task: &Task, count: usize) -> String {
    let width = count.max(position).to_string().len();
    format!(
        "{:>width$}. {} {}",
        position,
        task.checkbox(),
        task.text,
        width = width
    )
}

pub fn format_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "Nothing in the list yet.".to_string();
    }
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| format_task_line(i + 1, t, tasks.len()))
        .collect::<Vec<_>>()
        .join("\n")
}
