use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::task::Task;

/// Error type for task store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is not a valid task list: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not encode task list: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    /// True when the file exists but its content was rejected
    pub fn is_decode(&self) -> bool {
        matches!(self, StoreError::Decode { .. })
    }
}

/// Durable storage for an ordered task list.
pub trait TaskStore {
    /// Read the full list. A store with nothing saved yet yields an empty list.
    fn load(&self) -> Result<Vec<Task>, StoreError>;

    /// Replace the stored list with `tasks`.
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;

    /// Record a deleted task somewhere it can be recovered from.
    fn record_deletion(&self, _task: &Task) {}
}

/// A task list kept as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    recovery_log: bool,
    /// Recovery log writes that failed, waiting to be reported
    log_warnings: RefCell<Vec<String>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            path: path.into(),
            recovery_log: true,
            log_warnings: RefCell::new(Vec::new()),
        }
    }

    /// Enable or disable writing to the recovery log next to the file.
    pub fn with_recovery_log(mut self, enabled: bool) -> Self {
        self.recovery_log = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the recovery log that belongs to this file
    pub fn recovery_log_path(&self) -> PathBuf {
        recovery::recovery_log_path(&self.path)
    }

    /// Take the recovery log failures collected since the last call.
    pub fn take_log_warnings(&self) -> Vec<String> {
        self.log_warnings.take()
    }

    fn log(&self, entry: RecoveryEntry) {
        if !self.recovery_log {
            return;
        }
        let log_path = self.recovery_log_path();
        if let Err(e) = recovery::log_recovery(&log_path, entry) {
            self.log_warnings.borrow_mut().push(format!(
                "could not write to recovery log {}: {}",
                log_path.display(),
                e
            ));
        }
    }
}

impl TaskStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Task>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        decode_tasks(&text).map_err(|e| {
            self.log(
                RecoveryEntry::new(RecoveryCategory::Parser, "could not decode task list")
                    .field("File", self.path.display().to_string())
                    .field("Error", e.to_string())
                    .body(text.clone()),
            );
            StoreError::Decode {
                path: self.path.clone(),
                source: e,
            }
        })
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let content = encode_tasks(tasks)?;
        if let Err(e) = recovery::atomic_write(&self.path, content.as_bytes()) {
            self.log(
                RecoveryEntry::new(RecoveryCategory::Write, "task list write failed")
                    .field("File", self.path.display().to_string())
                    .field("Error", e.to_string())
                    .body(content),
            );
            return Err(StoreError::Write {
                path: self.path.clone(),
                source: e,
            });
        }
        Ok(())
    }

    fn record_deletion(&self, task: &Task) {
        self.log(
            RecoveryEntry::new(RecoveryCategory::Delete, "task deleted")
                .field("File", self.path.display().to_string())
                .field("Done", task.done.to_string())
                .body(task.text.clone()),
        );
    }
}

/// Decode a JSON array of task objects.
///
/// Every element must be an object; `task` and `done` fall back to their
/// defaults when absent, and blank text becomes the placeholder.
pub fn decode_tasks(text: &str) -> Result<Vec<Task>, serde_json::Error> {
    let objects: Vec<Map<String, Value>> = serde_json::from_str(text)?;
    objects
        .into_iter()
        .map(|obj| serde_json::from_value::<Task>(Value::Object(obj)).map(Task::normalized))
        .collect()
}

/// Encode tasks as a pretty-printed JSON array with a trailing newline.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(tasks)?;
    out.push('\n');
    Ok(out)
}
