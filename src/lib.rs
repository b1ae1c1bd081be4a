// Core library for a single-user to-do manager
// Validated task entities, a JSON-backed store, and a printable report exporter

pub mod export;
pub mod models;
pub mod storage;

pub use export::{ExportError, render_report, write_report};
pub use models::{Task, TaskError, TaskRecord};
pub use storage::{StoreError, TaskStore};
