use crate::ops::task_list::TaskListError;

/// A request collected while handling one frame's input, applied to the
/// task list once the frame's UI pass is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Add a new task with this text (blank text is ignored)
    Submit(String),
    /// Flip the done flag of the task at this index
    Toggle(usize),
    /// Remove the task at this index
    Delete(usize),
    /// Replace the in-memory list with the backing file's content
    Load,
    /// Write the in-memory list regardless of the autosave setting
    Save,
    /// Leave the application
    Exit,
}

impl Intent {
    /// The list index this intent refers to, if any
    pub fn index(&self) -> Option<usize> {
        match self {
            Intent::Toggle(i) | Intent::Delete(i) => Some(*i),
            _ => None,
        }
    }
}

/// What happened when a batch of intents was applied.
#[derive(Debug, Default)]
pub struct Applied {
    /// The in-memory list changed
    pub changed: bool,
    /// The list was replaced from disk
    pub loaded: bool,
    /// An explicit save succeeded
    pub saved: bool,
    pub exit_requested: bool,
    /// Index-bearing intents dropped because the index was out of range or
    /// captured before an earlier delete/load in the same batch
    pub skipped: usize,
    /// Errors worth showing to the user, in the order they happened
    pub errors: Vec<TaskListError>,
}

impl Applied {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}
