// Models module for the task manager core

pub mod task;

pub use task::{MAX_TITLE_LEN, Task, TaskError, TaskRecord};
