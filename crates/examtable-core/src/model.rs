use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Default sitting length when no duration synonym resolves.
pub const DEFAULT_LENGTH_MINUTES: u32 = 60;
/// Time of day appended to bare dates that resolve to a morning sitting.
pub const MORNING_TIME: &str = "09:00";
/// Time of day appended to bare dates that resolve to an afternoon sitting.
pub const AFTERNOON_TIME: &str = "13:00";

/// Coarse time-of-day bucket. Doubles as the disambiguator for date-only
/// input records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Afternoon,
}

impl Period {
    /// Parses a free-form period token. Unknown tokens resolve to `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "morning" => Some(Self::Morning),
            "afternoon" => Some(Self::Afternoon),
            _ => None,
        }
    }

    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            Self::Morning
        } else {
            Self::Afternoon
        }
    }

    /// Capitalized display form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A duration value as it appears on the wire: legacy documents carry both
/// JSON numbers and numeric strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawMinutes {
    Number(f64),
    Text(String),
}

impl RawMinutes {
    /// Resolves to a positive whole-minute count, or `None` when the value
    /// is non-numeric or non-positive.
    pub fn minutes(&self) -> Option<u32> {
        let value = match self {
            RawMinutes::Number(value) => *value,
            RawMinutes::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        if value.is_finite() && value > 0.0 {
            Some(value.round() as u32)
        } else {
            None
        }
    }
}

/// One exam record in any of the accepted legacy shapes. Every field is
/// optional; synonym resolution happens in [`normalize_exam`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawExam {
    pub datetime: Option<String>,
    pub date: Option<String>,
    pub period: Option<String>,
    #[serde(rename = "timeOfDay")]
    pub time_of_day: Option<String>,
    pub notes: Option<String>,
    #[serde(rename = "lengthMinutes")]
    pub length_minutes: Option<RawMinutes>,
    pub length: Option<RawMinutes>,
    pub duration: Option<RawMinutes>,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: Option<RawMinutes>,
}

impl RawExam {
    /// True when the record carries its own instant, i.e. the subject-level
    /// single-implicit-exam shape.
    pub fn has_instant(&self) -> bool {
        self.datetime.is_some() || self.date.is_some()
    }
}

/// One subject record as found in input documents. Exams may be nested under
/// `exams` or inlined on the subject itself.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSubject {
    pub name: Option<String>,
    pub exams: Option<Vec<RawExam>>,
    #[serde(flatten)]
    pub inline: RawExam,
}

/// Canonical exam: the single normalized representation all display and
/// export logic operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exam {
    /// ISO-8601 local date-time, or empty when the input was unresolvable.
    /// Sole sort key.
    pub datetime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    pub notes: String,
    #[serde(rename = "lengthMinutes")]
    pub length_minutes: u32,
}

impl Exam {
    /// Parses the canonical datetime. `None` means the sitting is unsortable.
    pub fn parsed_datetime(&self) -> Option<NaiveDateTime> {
        parse_instant(&self.datetime)
    }
}

/// Canonical subject. Exams keep input order; display paths sort views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub name: String,
    pub exams: Vec<Exam>,
}

/// Lenient ISO parsing for canonical datetimes. Accepts local date-times
/// with or without seconds, plus RFC 3339 instants which are mapped onto the
/// local clock.
pub fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|instant| instant.with_timezone(&Local).naive_local())
}

/// Normalizes one raw exam record into its canonical form. Never fails:
/// malformed fields degrade to defaults and unresolvable instants stay empty.
pub fn normalize_exam(raw: &RawExam) -> Exam {
    let length_minutes = [
        &raw.length_minutes,
        &raw.length,
        &raw.duration,
        &raw.duration_minutes,
    ]
    .into_iter()
    .flatten()
    .find_map(RawMinutes::minutes)
    .unwrap_or(DEFAULT_LENGTH_MINUTES);

    let mut period = raw
        .period
        .as_deref()
        .filter(|token| !token.trim().is_empty())
        .or(raw.time_of_day.as_deref())
        .and_then(Period::parse);

    let instant = raw
        .datetime
        .as_deref()
        .or(raw.date.as_deref())
        .unwrap_or("")
        .trim();

    let datetime = if instant.is_empty() {
        String::new()
    } else if instant.contains('T') {
        // Explicit time-of-day marker: keep the raw instant verbatim.
        instant.to_string()
    } else {
        // Bare date: synthesize the fixed sitting time. Morning is the
        // default for anything that is not explicitly afternoon.
        match period {
            Some(Period::Afternoon) => format!("{instant}T{AFTERNOON_TIME}"),
            _ => format!("{instant}T{MORNING_TIME}"),
        }
    };

    if period.is_none() {
        period = parse_instant(&datetime).map(|parsed| Period::from_hour(parsed.hour()));
    }

    Exam {
        datetime,
        period,
        notes: raw.notes.clone().unwrap_or_default(),
        length_minutes,
    }
}

/// Normalizes one raw subject record, resolving whichever exam shape it
/// carries: a nested `exams` array, a single inlined exam, or none at all.
pub fn normalize_subject(raw: &RawSubject) -> Subject {
    let exams = if let Some(list) = &raw.exams {
        list.iter().map(normalize_exam).collect()
    } else if raw.inline.has_instant() {
        vec![normalize_exam(&raw.inline)]
    } else {
        Vec::new()
    };

    Subject {
        name: raw.name.clone().unwrap_or_default(),
        exams,
    }
}

/// Normalizes a whole input document.
pub fn normalize_subjects(raw: &[RawSubject]) -> Vec<Subject> {
    raw.iter().map(normalize_subject).collect()
}
