//! Export pipeline: turns the selected subjects into a printable timetable
//! and hands it to a [`TimetableRenderer`] implementation. The renderer
//! itself (PDF page assembly) lives outside this crate.

use std::path::Path;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::format::{format_duration, format_exam_label};
use crate::model::Subject;
use crate::schedule::{adjusted_minutes, flatten_exams};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no subjects selected")]
    NoSubjectsSelected,
    #[error("timetable rendering failed: {0}")]
    Renderer(String),
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// One printed row: a sitting heading, the subject it belongs to, and the
/// notes line (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableRow {
    pub heading: String,
    pub subject: String,
    pub notes: String,
}

/// The complete printable document. Rows are flattened across all selected
/// subjects and sorted chronologically. An empty `rows` means the selected
/// subjects carry no sittings; renderers print a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintableTimetable {
    pub title: String,
    pub generated_at: String,
    pub rows: Vec<TimetableRow>,
}

/// Renders a printable timetable to a file. Implementations drive the
/// external PDF assembly library.
pub trait TimetableRenderer {
    fn render(&self, timetable: &PrintableTimetable, out: &Path) -> Result<(), ExportError>;
}

/// Builds the printable document for the given selection. An empty selection
/// is rejected up front; no partial output is produced.
pub fn build_timetable(
    selected: &[&Subject],
    student: &str,
    extra_time: bool,
    generated_at: DateTime<Local>,
) -> Result<PrintableTimetable, ExportError> {
    if selected.is_empty() {
        return Err(ExportError::NoSubjectsSelected);
    }

    let student = student.trim();
    let title = if student.is_empty() {
        "Exam Timetable".to_string()
    } else {
        format!("{student} — Exam Timetable")
    };

    let rows = flatten_exams(selected)
        .into_iter()
        .map(|entry| {
            let adjusted = adjusted_minutes(entry.exam.length_minutes, extra_time);
            let suffix = if extra_time { " (incl. extra time)" } else { "" };
            TimetableRow {
                heading: format!(
                    "{} · {}{suffix}",
                    format_exam_label(entry.exam),
                    format_duration(adjusted)
                ),
                subject: entry.subject.to_string(),
                notes: entry.exam.notes.clone(),
            }
        })
        .collect();

    Ok(PrintableTimetable {
        title,
        generated_at: generated_at
            .format("Generated on: %a, %b %-d, %Y, %-I:%M %p")
            .to_string(),
        rows,
    })
}

/// Export file name: `<student-or-'timetable'>-exam-timetable.pdf`, with
/// whitespace runs replaced by underscores.
pub fn export_filename(student: &str) -> String {
    let stem = if student.trim().is_empty() {
        "timetable"
    } else {
        student.trim()
    };
    format!("{stem}-exam-timetable.pdf")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
