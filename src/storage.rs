// JSON-backed task store
// Owns the ordered task list; every successful mutation rewrites the file

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Task, TaskRecord};

/// Default backing file, relative to the working directory.
pub const DEFAULT_FILE: &str = "tareas.json";

/// Failure of a store operation
#[derive(Debug, Error)]
pub enum StoreError {
    /// Index outside `[0, len)`. Nothing was mutated or persisted.
    #[error("index {index} out of range for {len} tasks")]
    IndexOutOfRange { index: usize, len: usize },
    /// The backing file could not be written. The mutation is already
    /// applied in memory but is not durable; callers should surface this
    /// as a warning rather than discard the session.
    #[error("failed to persist tasks to {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Ordered collection of tasks, synchronized to a JSON file.
///
/// Tasks are addressed by their 0-based position. The position is a
/// session-scoped identity only; on every load it is recomputed from the
/// file order.
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Open a store backed by `path`, loading any existing tasks.
    ///
    /// A missing file yields an empty store. An unreadable or corrupt
    /// file is logged and also yields an empty store, so the caller
    /// always gets a usable instance.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            tasks: Vec::new(),
        };
        store.load();
        store
    }

    /// Open a store backed by the default `tareas.json`.
    pub fn open_default() -> Self {
        Self::open(DEFAULT_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ============================================
    // READ ACCESS
    // ============================================

    /// Read-only view of the current sequence.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    // ============================================
    // MUTATIONS (each persists the full sequence)
    // ============================================

    /// Append a task at the end of the sequence.
    pub fn add(&mut self, task: Task) -> Result<(), StoreError> {
        self.tasks.push(task);
        self.save()
    }

    /// Remove and return the task at `index`; later tasks shift down.
    pub fn remove(&mut self, index: usize) -> Result<Task, StoreError> {
        self.check_index(index)?;
        let removed = self.tasks.remove(index);
        self.save()?;
        Ok(removed)
    }

    /// Replace the task at `index` with a freshly constructed one.
    pub fn update(&mut self, index: usize, task: Task) -> Result<(), StoreError> {
        self.check_index(index)?;
        self.tasks[index] = task;
        self.save()
    }

    /// Set the completion flag at `index`; `None` flips the current
    /// value. Returns the new state.
    pub fn toggle_completed(
        &mut self,
        index: usize,
        value: Option<bool>,
    ) -> Result<bool, StoreError> {
        self.check_index(index)?;
        let new_value = value.unwrap_or(!self.tasks[index].completed());
        self.tasks[index].set_completed(new_value);
        self.save()?;
        Ok(new_value)
    }

    /// Stable sort by due date. Undated tasks always sort last, in both
    /// directions.
    pub fn sort_by_due_date(&mut self, ascending: bool) -> Result<(), StoreError> {
        self.tasks.sort_by(|a, b| match (a.due_date(), b.due_date()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) if ascending => a.cmp(&b),
            (Some(a), Some(b)) => b.cmp(&a),
        });
        self.save()
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
        }
    }

    // ============================================
    // PERSISTENCE
    // ============================================

    /// Replace the in-memory sequence with the file's content.
    ///
    /// Individually malformed entries are skipped with a logged reason;
    /// they never abort the rest of the file.
    pub fn load(&mut self) {
        self.tasks.clear();
        if !self.path.exists() {
            return;
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                warn!(target: "tareas", "could not read {}: {}", self.path.display(), e);
                return;
            }
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                warn!(target: "tareas", "could not parse {}: {}", self.path.display(), e);
                return;
            }
        };

        for (position, entry) in entries.into_iter().enumerate() {
            let record = match serde_json::from_value::<TaskRecord>(entry) {
                Ok(r) => r,
                Err(e) => {
                    warn!(target: "tareas", "skipping entry {}: {}", position, e);
                    continue;
                }
            };
            match Task::from_record(&record) {
                Ok(task) => self.tasks.push(task),
                Err(e) => warn!(target: "tareas", "skipping entry {}: {}", position, e),
            }
        }

        info!(target: "tareas", "loaded {} tasks from {}", self.tasks.len(), self.path.display());
    }

    /// Write the whole sequence to the backing file.
    ///
    /// The content goes to a temporary sibling first and is renamed into
    /// place, so a failed write leaves the previous file intact.
    pub fn save(&self) -> Result<(), StoreError> {
        self.write_file().map_err(|source| {
            warn!(target: "tareas", "could not save {}: {}", self.path.display(), source);
            StoreError::Persistence {
                path: self.path.clone(),
                source,
            }
        })
    }

    fn write_file(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let records: Vec<TaskRecord> = self.tasks.iter().map(Task::to_record).collect();
        let json = serde_json::to_string_pretty(&records).map_err(io::Error::other)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }
}
