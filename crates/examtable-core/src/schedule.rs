//! Chronological ordering of subjects and sittings, plus the extra-time
//! duration adjustment. Sorting always produces views; stored order is never
//! mutated.

use chrono::NaiveDateTime;

use crate::model::{Exam, Subject};

/// Display/export-only multiplier applied when the extra-time flag is on.
pub const EXTRA_TIME_FACTOR: f64 = 1.25;

/// One flattened entry in the export list: a sitting paired with the subject
/// it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ExamEntry<'a> {
    pub subject: &'a str,
    pub exam: &'a Exam,
}

/// Earliest parsable sitting of a subject. `None` means the subject has no
/// exams or only unsortable ones, and it displays as "No exams".
pub fn earliest_exam(subject: &Subject) -> Option<NaiveDateTime> {
    subject
        .exams
        .iter()
        .filter_map(Exam::parsed_datetime)
        .min()
}

fn sort_epoch(instant: Option<NaiveDateTime>) -> i64 {
    // Subjects and sittings without a parsable instant sort last.
    instant.map_or(i64::MAX, |dt| dt.and_utc().timestamp())
}

/// Subjects in ascending order of earliest sitting. Stable: ties and
/// exam-less subjects keep their relative input order.
pub fn subjects_by_earliest<'a>(subjects: &'a [Subject]) -> Vec<&'a Subject> {
    let mut view: Vec<&Subject> = subjects.iter().collect();
    view.sort_by_key(|subject| sort_epoch(earliest_exam(subject)));
    view
}

/// A subject's sittings in chronological order.
pub fn exams_by_datetime<'a>(subject: &'a Subject) -> Vec<&'a Exam> {
    let mut view: Vec<&Exam> = subject.exams.iter().collect();
    view.sort_by_key(|exam| sort_epoch(exam.parsed_datetime()));
    view
}

/// Every sitting of the given subjects, flattened and sorted chronologically
/// across subject boundaries.
pub fn flatten_exams<'a>(subjects: &[&'a Subject]) -> Vec<ExamEntry<'a>> {
    let mut entries: Vec<ExamEntry<'a>> = subjects
        .iter()
        .flat_map(|subject| {
            subject.exams.iter().map(|exam| ExamEntry {
                subject: subject.name.as_str(),
                exam,
            })
        })
        .collect();
    entries.sort_by_key(|entry| sort_epoch(entry.exam.parsed_datetime()));
    entries
}

/// Applies the extra-time multiplier to a stored duration. The stored value
/// is never mutated; adjustment happens at display and export time only.
pub fn adjusted_minutes(length_minutes: u32, extra_time: bool) -> u32 {
    if extra_time {
        (length_minutes as f64 * EXTRA_TIME_FACTOR).round() as u32
    } else {
        length_minutes
    }
}
