use serde::{Deserialize, Serialize};

/// Text stored for a task whose `task` key is missing or blank on disk.
pub const PLACEHOLDER_TEXT: &str = "(untitled)";

/// A single to-do entry.
///
/// Serializes as `{"task": ..., "done": ...}` in that key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "task", default = "placeholder_text")]
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

fn placeholder_text() -> String {
    PLACEHOLDER_TEXT.to_string()
}

impl Task {
    /// Create a not-done task. Callers are responsible for rejecting blank text.
    pub fn new(text: impl Into<String>) -> Self {
        Task {
            text: text.into(),
            done: false,
        }
    }

    /// Flip the done flag
    pub fn toggle(&mut self) {
        self.done = !self.done;
    }

    /// The checkbox shown for this task
    pub fn checkbox(&self) -> &'static str {
        if self.done { "[x]" } else { "[ ]" }
    }

    /// Replace blank text with the placeholder so stored text is never empty.
    pub(crate) fn normalized(mut self) -> Self {
        if self.text.trim().is_empty() {
            self.text = placeholder_text();
        }
        self
    }
}
