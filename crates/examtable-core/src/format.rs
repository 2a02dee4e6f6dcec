//! Pure string formatting for canonical exam data. These functions never
//! fail: an unparsable datetime is echoed back unchanged.

use crate::model::{Exam, parse_instant};

/// Weekday + date rendering of the date portion, e.g. `Sat, Jan 10, 2026`.
pub fn format_date_only(iso: &str) -> String {
    match parse_instant(iso) {
        Some(instant) => instant.format("%a, %b %-d, %Y").to_string(),
        None => iso.to_string(),
    }
}

/// Full date-time rendering, e.g. `Sat, Jan 10, 2026, 9:00 AM`. Last-resort
/// fallback when the date-only label cannot be produced.
pub fn format_date_time(iso: &str) -> String {
    match parse_instant(iso) {
        Some(instant) => instant.format("%a, %b %-d, %Y, %-I:%M %p").to_string(),
        None => iso.to_string(),
    }
}

/// Display label for one sitting: date plus capitalized period when both
/// resolve, date alone when the period is unset.
pub fn format_exam_label(exam: &Exam) -> String {
    let date_part = if exam.datetime.is_empty() {
        String::new()
    } else {
        format_date_only(&exam.datetime)
    };

    match (&date_part, exam.period) {
        (date, Some(period)) if !date.is_empty() => format!("{date} · {period}"),
        (date, None) if !date.is_empty() => date.clone(),
        _ => format_date_time(&exam.datetime),
    }
}

/// Renders minutes as `1h 30m` / `1h` / `45m`. Zero renders as `0m`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let remainder = minutes % 60;
    if hours > 0 && remainder > 0 {
        format!("{hours}h {remainder}m")
    } else if hours > 0 {
        format!("{hours}h")
    } else {
        format!("{remainder}m")
    }
}
