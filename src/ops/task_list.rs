use crate::io::store::{StoreError, TaskStore};
use crate::model::task::Task;
use crate::ops::intent::{Applied, Intent};

/// Error type for task list operations
#[derive(Debug, thiserror::Error)]
pub enum TaskListError {
    #[error("no task at position {index} (list has {len})")]
    Index { index: usize, len: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The in-memory task list for one session, plus the pending entry text.
///
/// Mutations are applied in memory first. With autosave on, each successful
/// mutation is followed by a full save; if that save fails the mutation is
/// kept, the list stays dirty and the store error is returned.
#[derive(Debug)]
pub struct TaskList<S: TaskStore> {
    store: S,
    tasks: Vec<Task>,
    entry: String,
    autosave: bool,
    dirty: bool,
}

impl<S: TaskStore> TaskList<S> {
    /// Start with an empty list without touching the store.
    pub fn new(store: S, autosave: bool) -> Self {
        TaskList {
            store,
            tasks: Vec::new(),
            entry: String::new(),
            autosave,
            dirty: false,
        }
    }

    /// Start with whatever the store currently holds.
    pub fn open(store: S, autosave: bool) -> Result<Self, StoreError> {
        let mut list = Self::new(store, autosave);
        list.reload()?;
        Ok(list)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Text typed for the next task but not yet submitted
    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn entry_mut(&mut self) -> &mut String {
        &mut self.entry
    }

    pub fn set_entry(&mut self, text: impl Into<String>) {
        self.entry = text.into();
    }

    pub fn autosave(&self) -> bool {
        self.autosave
    }

    /// Switch autosave on or off. Turning it on does not save by itself.
    pub fn set_autosave(&mut self, autosave: bool) {
        self.autosave = autosave;
    }

    /// In-memory state differs from what was last loaded or saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a task. Blank text is rejected with `Ok(false)` and no save.
    pub fn add(&mut self, text: &str) -> Result<bool, TaskListError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        self.tasks.push(Task::new(text));
        self.entry.clear();
        self.mutated()?;
        Ok(true)
    }

    /// Add the entry buffer's text as a new task.
    pub fn submit_entry(&mut self) -> Result<bool, TaskListError> {
        let text = std::mem::take(&mut self.entry);
        let result = self.add(&text);
        if matches!(result, Ok(false)) {
            self.entry = text;
        }
        result
    }

    /// Flip the done flag of the task at `index`.
    pub fn toggle_done(&mut self, index: usize) -> Result<bool, TaskListError> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(TaskListError::Index { index, len })?;
        task.toggle();
        self.mutated()?;
        Ok(true)
    }

    /// Remove the task at `index`; later tasks move up one position.
    pub fn delete(&mut self, index: usize) -> Result<bool, TaskListError> {
        if index >= self.tasks.len() {
            return Err(TaskListError::Index {
                index,
                len: self.tasks.len(),
            });
        }
        let removed = self.tasks.remove(index);
        self.store.record_deletion(&removed);
        self.mutated()?;
        Ok(true)
    }

    /// Replace the list with the store's content. On error nothing changes.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.tasks = self.store.load()?;
        self.dirty = false;
        Ok(())
    }

    /// Save the current list regardless of the autosave setting.
    pub fn force_save(&mut self) -> Result<(), StoreError> {
        self.store.save(&self.tasks)?;
        self.dirty = false;
        Ok(())
    }

    fn mutated(&mut self) -> Result<(), StoreError> {
        self.dirty = true;
        if self.autosave {
            self.force_save()?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    /// Apply one frame's intents in order.
    ///
    /// Indices in a batch were captured against the list as it was drawn, so
    /// once a delete or load succeeds every later toggle/delete in the same
    /// batch is skipped.
    pub fn apply(&mut self, intents: impl IntoIterator<Item = Intent>) -> Applied {
        let mut applied = Applied::default();
        let mut indices_stale = false;

        for intent in intents {
            if indices_stale && intent.index().is_some() {
                applied.skipped += 1;
                continue;
            }
            match intent {
                Intent::Submit(text) => {
                    let result = self.add(&text);
                    record_mutation(&mut applied, result);
                }
                Intent::Toggle(index) => {
                    let result = self.toggle_done(index);
                    record_mutation(&mut applied, result);
                }
                Intent::Delete(index) => {
                    let result = self.delete(index);
                    if record_mutation(&mut applied, result) {
                        indices_stale = true;
                    }
                }
                Intent::Load => match self.reload() {
                    Ok(()) => {
                        applied.changed = true;
                        applied.loaded = true;
                        indices_stale = true;
                    }
                    Err(e) => applied.errors.push(e.into()),
                },
                Intent::Save => match self.force_save() {
                    Ok(()) => applied.saved = true,
                    Err(e) => applied.errors.push(e.into()),
                },
                Intent::Exit => applied.exit_requested = true,
            }
        }

        applied
    }
}

/// Fold a mutation result into `applied`. Returns whether the list changed.
fn record_mutation(applied: &mut Applied, result: Result<bool, TaskListError>) -> bool {
    match result {
        Ok(changed) => {
            applied.changed |= changed;
            changed
        }
        Err(TaskListError::Index { .. }) => {
            applied.skipped += 1;
            false
        }
        Err(e) => {
            // The mutation happened; only persisting it failed
            applied.changed = true;
            applied.errors.push(e);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::JsonFileStore;
    use std::cell::{Cell, RefCell};
    use std::fs;
    use tempfile::TempDir;

    /// In-memory store that can be told to fail.
    #[derive(Default)]
    struct MemoryStore {
        saved: RefCell<Vec<Task>>,
        saves: Cell<usize>,
        fail_writes: Cell<bool>,
        deleted: RefCell<Vec<Task>>,
    }

    impl TaskStore for MemoryStore {
        fn load(&self) -> Result<Vec<Task>, StoreError> {
            Ok(self.saved.borrow().clone())
        }

        fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
            if self.fail_writes.get() {
                return Err(StoreError::Write {
                    path: "memory".into(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.saves.set(self.saves.get() + 1);
            *self.saved.borrow_mut() = tasks.to_vec();
            Ok(())
        }

        fn record_deletion(&self, task: &Task) {
            self.deleted.borrow_mut().push(task.clone());
        }
    }

    fn texts<S: TaskStore>(list: &TaskList<S>) -> Vec<&str> {
        list.tasks().iter().map(|t| t.text.as_str()).collect()
    }

    fn list_of(items: &[&str], autosave: bool) -> TaskList<MemoryStore> {
        let mut list = TaskList::new(MemoryStore::default(), autosave);
        for item in items {
            list.add(item).unwrap();
        }
        list
    }

    #[test]
    fn add_rejects_blank_input() {
        let mut list = list_of(&["a"], true);
        let saves = list.store().saves.get();

        assert!(!list.add("").unwrap());
        assert!(!list.add("   ").unwrap());
        assert!(!list.add("\t\n").unwrap());

        assert_eq!(texts(&list), vec!["a"]);
        assert_eq!(list.store().saves.get(), saves);
    }

    #[test]
    fn add_trims_and_appends() {
        let mut list = list_of(&["first"], true);
        list.set_entry("  buy milk  ");
        assert!(list.add("  buy milk  ").unwrap());

        assert_eq!(list.tasks().last().unwrap(), &Task::new("buy milk"));
        assert_eq!(list.entry(), "");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn duplicates_are_allowed() {
        let list = list_of(&["same", "same"], true);
        assert_eq!(texts(&list), vec!["same", "same"]);
    }

    #[test]
    fn submit_entry_keeps_blank_buffer() {
        let mut list = list_of(&[], true);
        list.set_entry("   ");
        assert!(!list.submit_entry().unwrap());
        assert_eq!(list.entry(), "   ");

        list.set_entry(" walk dog ");
        assert!(list.submit_entry().unwrap());
        assert_eq!(list.entry(), "");
        assert_eq!(texts(&list), vec!["walk dog"]);
    }

    #[test]
    fn toggle_flips_exactly_one() {
        let mut list = list_of(&["a", "b"], true);
        assert!(list.toggle_done(1).unwrap());
        assert!(!list.tasks()[0].done);
        assert!(list.tasks()[1].done);

        assert!(list.toggle_done(1).unwrap());
        assert!(!list.tasks()[1].done);
    }

    #[test]
    fn toggle_out_of_range_changes_nothing() {
        let mut list = list_of(&["a", "b"], true);
        let saves = list.store().saves.get();
        let err = list.toggle_done(5).unwrap_err();
        assert!(matches!(err, TaskListError::Index { index: 5, len: 2 }));
        assert!(list.tasks().iter().all(|t| !t.done));
        assert_eq!(list.store().saves.get(), saves);
    }

    #[test]
    fn delete_preserves_order() {
        let mut list = list_of(&["a", "b", "c"], true);
        assert!(list.delete(1).unwrap());
        assert_eq!(texts(&list), vec!["a", "c"]);
        assert!(list.delete(1).unwrap());
        assert_eq!(texts(&list), vec!["a"]);
        assert!(matches!(
            list.delete(1),
            Err(TaskListError::Index { index: 1, len: 1 })
        ));
        assert_eq!(list.store().deleted.borrow().len(), 2);
    }

    #[test]
    fn autosave_keeps_store_in_step() {
        let mut list = list_of(&[], true);
        list.add("a").unwrap();
        assert_eq!(list.store().load().unwrap(), list.tasks());
        list.add("b").unwrap();
        list.toggle_done(0).unwrap();
        assert_eq!(list.store().load().unwrap(), list.tasks());
        list.delete(1).unwrap();
        assert_eq!(list.store().load().unwrap(), list.tasks());
        assert!(!list.is_dirty());
    }

    #[test]
    fn without_autosave_only_force_save_writes() {
        let mut list = list_of(&["a", "b"], false);
        list.toggle_done(0).unwrap();
        list.delete(1).unwrap();
        assert_eq!(list.store().saves.get(), 0);
        assert!(list.store().load().unwrap().is_empty());
        assert!(list.is_dirty());

        list.force_save().unwrap();
        assert_eq!(list.store().load().unwrap(), list.tasks());
        assert!(!list.is_dirty());
    }

    #[test]
    fn failed_autosave_keeps_mutation() {
        let mut list = list_of(&["a"], true);
        list.store().fail_writes.set(true);

        let err = list.add("b").unwrap_err();
        assert!(matches!(err, TaskListError::Store(StoreError::Write { .. })));
        assert_eq!(texts(&list), vec!["a", "b"]);
        assert!(list.is_dirty());

        // Still operating in memory while persistence fails
        assert!(list.toggle_done(0).is_err());
        assert!(list.tasks()[0].done);

        list.store().fail_writes.set(false);
        list.force_save().unwrap();
        assert_eq!(list.store().load().unwrap(), list.tasks());
        assert!(!list.is_dirty());
    }

    #[test]
    fn reload_replaces_list() {
        let mut list = list_of(&["a", "b"], false);
        list.force_save().unwrap();
        list.add("unsaved").unwrap();
        list.reload().unwrap();
        assert_eq!(texts(&list), vec!["a", "b"]);
        assert!(!list.is_dirty());
    }

    #[test]
    fn reload_decode_error_leaves_list_untouched() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("todo.json");
        let store = JsonFileStore::new(&path).with_recovery_log(false);
        let mut list = TaskList::new(store, false);
        list.add("keep me").unwrap();

        fs::write(&path, "\"not an array\"").unwrap();
        let err = list.reload().unwrap_err();
        assert!(err.is_decode());
        assert_eq!(texts(&list), vec!["keep me"]);
        assert!(list.is_dirty());
    }

    #[test]
    fn open_reads_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("todo.json");
        fs::write(&path, r#"[{"task":"a","done":true},{"task":"b"}]"#).unwrap();

        let list = TaskList::open(JsonFileStore::new(&path), true).unwrap();
        assert_eq!(texts(&list), vec!["a", "b"]);
        assert_eq!(list.done_count(), 1);
    }

    #[test]
    fn open_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let list = TaskList::open(JsonFileStore::new(tmp.path().join("todo.json")), true).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn autosave_writes_json_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("todo.json");
        let mut list = TaskList::new(JsonFileStore::new(&path), true);
        list.add("a").unwrap();
        list.add("b").unwrap();
        list.toggle_done(1).unwrap();

        let reloaded = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(reloaded, list.tasks());
    }

    // -----------------------------------------------------------------------
    // Intent batches
    // -----------------------------------------------------------------------

    #[test]
    fn apply_runs_intents_in_order() {
        let mut list = list_of(&["a", "b"], true);
        let applied = list.apply(vec![
            Intent::Submit("c".into()),
            Intent::Toggle(2),
            Intent::Save,
        ]);
        assert!(applied.changed);
        assert!(applied.saved);
        assert!(applied.is_ok());
        assert_eq!(texts(&list), vec!["a", "b", "c"]);
        assert!(list.tasks()[2].done);
    }

    #[test]
    fn apply_skips_indices_after_delete() {
        let mut list = list_of(&["a", "b", "c"], true);
        let applied = list.apply(vec![
            Intent::Delete(0),
            Intent::Delete(1),
            Intent::Toggle(0),
        ]);
        assert_eq!(texts(&list), vec!["b", "c"]);
        assert!(list.tasks().iter().all(|t| !t.done));
        assert_eq!(applied.skipped, 2);
        assert!(applied.is_ok());
    }

    #[test]
    fn apply_out_of_range_is_silent() {
        let mut list = list_of(&["a"], true);
        let applied = list.apply(vec![Intent::Toggle(9), Intent::Delete(9)]);
        assert!(!applied.changed);
        assert_eq!(applied.skipped, 2);
        assert!(applied.errors.is_empty());
    }

    #[test]
    fn apply_blank_submit_is_no_change() {
        let mut list = list_of(&[], true);
        let applied = list.apply(vec![Intent::Submit("  ".into())]);
        assert!(!applied.changed);
        assert!(list.is_empty());
    }

    #[test]
    fn apply_load_marks_indices_stale() {
        let mut list = list_of(&["a", "b"], false);
        list.force_save().unwrap();
        list.add("c").unwrap();

        let applied = list.apply(vec![Intent::Load, Intent::Delete(2)]);
        assert!(applied.loaded);
        assert_eq!(applied.skipped, 1);
        assert_eq!(texts(&list), vec!["a", "b"]);
    }

    #[test]
    fn apply_reports_store_errors() {
        let mut list = list_of(&["a"], true);
        list.store().fail_writes.set(true);

        let applied = list.apply(vec![Intent::Toggle(0), Intent::Save, Intent::Exit]);
        assert!(applied.changed);
        assert!(!applied.saved);
        assert!(applied.exit_requested);
        assert_eq!(applied.errors.len(), 2);
        assert!(list.tasks()[0].done);
    }
}
