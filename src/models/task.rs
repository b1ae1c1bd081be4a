// Task model for the JSON-backed task list
// Validated at construction; only the completion flag mutates afterwards

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum title length in characters, after trimming.
pub const MAX_TITLE_LEN: usize = 100;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation failure while constructing a task
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("title cannot exceed 100 characters")]
    TitleTooLong,
    #[error("invalid date format, expected YYYY-MM-DD")]
    InvalidDate,
}

/// On-disk record shape (one element of the `tareas.json` array)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub fecha_limite: String,
    #[serde(default)]
    pub completada: bool,
}

/// A validated to-do item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    title: String,
    description: String,
    due_date: Option<NaiveDate>,
    completed: bool,
}

impl Task {
    /// Validate and build a task; the completion flag starts false.
    pub fn new(title: &str, description: &str, due_date: &str) -> Result<Self, TaskError> {
        Ok(Self {
            title: validate_title(title)?,
            description: description.trim().to_string(),
            due_date: parse_due_date(due_date)?,
            completed: false,
        })
    }

    /// Construction-time override of the completion flag.
    pub fn with_completed(mut self, value: bool) -> Self {
        self.completed = value;
        self
    }

    /// Rebuild a task from its on-disk record, re-running full validation.
    pub fn from_record(record: &TaskRecord) -> Result<Self, TaskError> {
        let mut task = Self::new(&record.titulo, &record.descripcion, &record.fecha_limite)?;
        task.completed = record.completada;
        Ok(task)
    }

    /// Serialize to the on-disk record shape. An absent due date becomes
    /// an empty string, never null.
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            titulo: self.title.clone(),
            descripcion: self.description.clone(),
            fecha_limite: self.due_date_str(),
            completada: self.completed,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Canonical `YYYY-MM-DD` rendering, empty when there is no due date.
    pub fn due_date_str(&self) -> String {
        self.due_date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Flip the completion flag in place; every other field stays fixed.
    pub(crate) fn set_completed(&mut self, value: bool) {
        self.completed = value;
    }
}

fn validate_title(title: &str) -> Result<String, TaskError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TaskError::TitleTooLong);
    }
    Ok(title.to_string())
}

fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>, TaskError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| TaskError::InvalidDate)
}
