use examtable_core::model::{Exam, Period, Subject};
use examtable_core::schedule::{
    adjusted_minutes, earliest_exam, exams_by_datetime, flatten_exams, subjects_by_earliest,
};

fn exam(datetime: &str, minutes: u32) -> Exam {
    Exam {
        datetime: datetime.to_string(),
        period: Some(Period::Morning),
        notes: String::new(),
        length_minutes: minutes,
    }
}

fn subject(name: &str, datetimes: &[&str]) -> Subject {
    Subject {
        name: name.to_string(),
        exams: datetimes.iter().map(|dt| exam(dt, 60)).collect(),
    }
}

#[test]
fn subjects_order_ascending_by_earliest_sitting() {
    let subjects = vec![
        subject("Late", &["2026-01-10T09:00"]),
        subject("Early", &["2026-01-05T09:00"]),
    ];
    let ordered = subjects_by_earliest(&subjects);
    assert_eq!(ordered[0].name, "Early");
    assert_eq!(ordered[1].name, "Late");
    // Storage order is untouched.
    assert_eq!(subjects[0].name, "Late");
}

#[test]
fn subject_ordering_is_stable_on_ties() {
    let subjects = vec![
        subject("A", &["2026-01-10T09:00"]),
        subject("B", &["2026-01-10T09:00"]),
        subject("C", &["2026-01-10T09:00"]),
    ];
    let ordered: Vec<&str> = subjects_by_earliest(&subjects)
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(ordered, ["A", "B", "C"]);
}

#[test]
fn subjects_without_parsable_sittings_sort_last() {
    let subjects = vec![
        subject("NoExams", &[]),
        subject("Broken", &["not a date"]),
        subject("Real", &["2026-03-01T09:00"]),
    ];
    let ordered: Vec<&str> = subjects_by_earliest(&subjects)
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(ordered, ["Real", "NoExams", "Broken"]);
}

#[test]
fn earliest_exam_ignores_unparsable_sittings() {
    let mixed = subject("S", &["garbage", "2026-02-01T13:00", "2026-01-15T09:00"]);
    let earliest = earliest_exam(&mixed).expect("one parsable sitting");
    assert_eq!(earliest.format("%Y-%m-%dT%H:%M").to_string(), "2026-01-15T09:00");

    assert!(earliest_exam(&subject("None", &[])).is_none());
    assert!(earliest_exam(&subject("Broken", &["garbage"])).is_none());
}

#[test]
fn exams_within_a_subject_sort_chronologically() {
    let s = subject("S", &["2026-01-20T09:00", "2026-01-05T13:00", "2026-01-10T09:00"]);
    let ordered: Vec<&str> = exams_by_datetime(&s)
        .iter()
        .map(|e| e.datetime.as_str())
        .collect();
    assert_eq!(
        ordered,
        ["2026-01-05T13:00", "2026-01-10T09:00", "2026-01-20T09:00"]
    );
}

#[test]
fn flattened_export_list_sorts_across_subjects() {
    let a = subject("A", &["2026-01-10T09:00", "2026-01-02T09:00"]);
    let b = subject("B", &["2026-01-05T13:00"]);
    let entries = flatten_exams(&[&a, &b]);

    let order: Vec<(&str, &str)> = entries
        .iter()
        .map(|entry| (entry.subject, entry.exam.datetime.as_str()))
        .collect();
    assert_eq!(
        order,
        [
            ("A", "2026-01-02T09:00"),
            ("B", "2026-01-05T13:00"),
            ("A", "2026-01-10T09:00"),
        ]
    );
}

#[test]
fn extra_time_adjustment_rounds_the_quarter_multiplier() {
    assert_eq!(adjusted_minutes(60, true), 75);
    assert_eq!(adjusted_minutes(60, false), 60);
    assert_eq!(adjusted_minutes(90, true), 113);
    assert_eq!(adjusted_minutes(0, true), 0);
}
