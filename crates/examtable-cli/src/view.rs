//! Terminal rendering of the subject checklist and the timetable preview.

use examtable_core::format::{format_duration, format_exam_label};
use examtable_core::planner::Planner;
use examtable_core::schedule::{
    adjusted_minutes, earliest_exam, exams_by_datetime, subjects_by_earliest,
};
use examtable_core::store::KeyValueStore;

/// Subject checklist: selection state, sitting count, and next sitting date,
/// in earliest-sitting order.
pub fn render_checklist<S: KeyValueStore>(planner: &Planner<S>) -> String {
    let mut out = String::new();
    for subject in subjects_by_earliest(planner.subjects()) {
        let mark = if planner.is_selected(&subject.name) {
            'x'
        } else {
            ' '
        };
        let next = match earliest_exam(subject) {
            Some(instant) => instant.format("%a, %b %-d, %Y").to_string(),
            None => "No exams".to_string(),
        };
        let count = subject.exams.len();
        let plural = if count == 1 { "" } else { "s" };
        out.push_str(&format!(
            "[{mark}] {} — {count} exam{plural} · {next}\n",
            subject.name
        ));
    }
    if out.is_empty() {
        out.push_str("No subjects loaded.\n");
    }
    out
}

/// Timetable preview for the current selection, grouped by subject.
pub fn render_preview<S: KeyValueStore>(planner: &Planner<S>, student: &str) -> String {
    let student = student.trim();
    let mut out = if student.is_empty() {
        "Exam Timetable\n".to_string()
    } else {
        format!("{student} — Exam Timetable\n")
    };

    let selected = planner.effective_selection();
    if selected.is_empty() {
        out.push_str("\nNo subjects selected.\n");
        return out;
    }

    let extra = planner.extra_time();
    for subject in selected {
        out.push('\n');
        out.push_str(&subject.name);
        out.push('\n');
        let exams = exams_by_datetime(subject);
        if exams.is_empty() {
            out.push_str("  (no exams)\n");
            continue;
        }
        for exam in exams {
            let adjusted = adjusted_minutes(exam.length_minutes, extra);
            let suffix = if extra { " (incl. extra time)" } else { "" };
            out.push_str(&format!(
                "  {} · {}{suffix}\n",
                format_exam_label(exam),
                format_duration(adjusted)
            ));
            if !exam.notes.is_empty() {
                out.push_str(&format!("    {}\n", exam.notes));
            }
        }
    }
    out
}
