// Printable report of tasks
// Pure renderer over a read-only task slice, plus a file-writing wrapper

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;

use crate::models::Task;

const ROWS_PER_PAGE: usize = 20;
const DESCRIPTION_WIDTH: usize = 50;
const EMPTY_CELL: &str = "-";
const GLYPH_DONE: &str = "[x]";
const GLYPH_PENDING: &str = "[ ]";

/// Failure while writing a rendered report
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Render tasks as a paginated plain-text table.
///
/// Each row shows a status glyph, the title, the description truncated
/// for display, and the due date. Callers pass the sequence they want
/// reported, typically pre-filtered to pending tasks. A summary of
/// total/completed/pending counts closes the report.
pub fn render_report(tasks: &[Task]) -> String {
    let generated = Local::now().format("%Y-%m-%d %H:%M").to_string();

    let mut pages: Vec<&[Task]> = tasks.chunks(ROWS_PER_PAGE).collect();
    if pages.is_empty() {
        pages.push(&[]);
    }
    let total_pages = pages.len();

    let mut out = String::new();
    for (number, page) in pages.iter().enumerate() {
        if number > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "TASK REPORT  (generated {})  page {} of {}\n\n",
            generated,
            number + 1,
            total_pages
        ));
        out.push_str(&format!(
            "{:<4}{:<42}{:<54}{}\n",
            "ST", "TITLE", "DESCRIPTION", "DUE DATE"
        ));
        out.push_str(&format!(
            "{}  {} {} {}\n",
            "-".repeat(2),
            "-".repeat(41),
            "-".repeat(53),
            "-".repeat(10)
        ));

        for task in page.iter() {
            let glyph = if task.completed() {
                GLYPH_DONE
            } else {
                GLYPH_PENDING
            };
            let description = match task.description() {
                "" => EMPTY_CELL.to_string(),
                d => truncate(d, DESCRIPTION_WIDTH),
            };
            let due = task.due_date_str();
            let due_cell = if due.is_empty() {
                EMPTY_CELL.to_string()
            } else {
                due
            };
            out.push_str(&format!(
                "{:<4}{:<42}{:<54}{}\n",
                glyph,
                task.title(),
                description,
                due_cell
            ));
        }
    }

    let completed = tasks.iter().filter(|t| t.completed()).count();
    out.push_str(&format!(
        "\nTotal: {} | Completed: {} | Pending: {}\n",
        tasks.len(),
        completed,
        tasks.len() - completed
    ));
    out
}

/// Render the report and write it to `path` as UTF-8, creating parent
/// directories if needed.
pub fn write_report(tasks: &[Task], path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let result = (|| -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, render_report(tasks))
    })();
    result.map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn task(title: &str, description: &str, due_date: &str, completed: bool) -> Task {
        Task::new(title, description, due_date)
            .unwrap()
            .with_completed(completed)
    }

    #[test]
    fn test_rows_show_glyph_title_and_due_date() {
        let tasks = vec![
            task("Buy milk", "two liters", "2024-03-01", false),
            task("Write report", "", "", true),
        ];
        let report = render_report(&tasks);

        assert!(report.contains("[ ] Buy milk"));
        assert!(report.contains("two liters"));
        assert!(report.contains("2024-03-01"));
        assert!(report.contains("[x] Write report"));
        assert!(report.contains("Total: 2 | Completed: 1 | Pending: 1"));
    }

    #[test]
    fn test_empty_fields_render_placeholder() {
        let report = render_report(&[task("bare", "", "", false)]);
        let row = report
            .lines()
            .find(|l| l.contains("bare"))
            .expect("row for task");
        assert!(row.trim_end().ends_with(EMPTY_CELL));
    }

    #[test]
    fn test_description_truncated_for_display() {
        let long = "x".repeat(51);
        let report = render_report(&[task("t", &long, "", false)]);
        assert!(report.contains(&format!("{}...", "x".repeat(50))));
        assert!(!report.contains(&long));

        let exact = "y".repeat(50);
        let report = render_report(&[task("t", &exact, "", false)]);
        assert!(report.contains(&exact));
        assert!(!report.contains(&format!("{exact}...")));
    }

    #[test]
    fn test_report_is_paginated() {
        let tasks: Vec<Task> = (0..45)
            .map(|i| task(&format!("task {i}"), "", "", false))
            .collect();
        let report = render_report(&tasks);

        assert!(report.contains("page 1 of 3"));
        assert!(report.contains("page 2 of 3"));
        assert!(report.contains("page 3 of 3"));
        assert_eq!(report.matches("TASK REPORT").count(), 3);
        assert_eq!(report.matches("task ").count(), 45);
    }

    #[test]
    fn test_empty_report_still_has_one_page() {
        let report = render_report(&[]);
        assert!(report.contains("page 1 of 1"));
        assert!(report.contains("Total: 0 | Completed: 0 | Pending: 0"));
    }

    #[test]
    fn test_write_report_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("pending.txt");
        write_report(&[task("persisted", "", "", false)], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("persisted"));
    }

    #[test]
    fn test_write_report_surfaces_io_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "a plain file").unwrap();

        let err = write_report(&[], blocker.join("report.txt")).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
