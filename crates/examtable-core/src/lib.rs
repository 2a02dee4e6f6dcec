//! Core library crate for the examtable timetable generator: canonical exam
//! model, normalization of legacy input shapes, scheduling order, display
//! formatting, persistence, and the export pipeline.

pub mod config;
pub mod export;
pub mod fetch;
pub mod format;
pub mod logging;
pub mod model;
pub mod planner;
pub mod schedule;
pub mod store;

pub use config::{
    ConfigError, ConfigLoadResult, ConfigSource, FileConfig, config_directory, config_path,
    load_config, save_config,
};
pub use export::{
    ExportError, PrintableTimetable, TimetableRenderer, TimetableRow, build_timetable,
    export_filename,
};
pub use format::{format_date_only, format_date_time, format_duration, format_exam_label};
pub use logging::{LoggingDestination, LoggingError, init_logging};
pub use model::{
    Exam, Period, RawExam, RawSubject, Subject, normalize_exam, normalize_subject,
    normalize_subjects, parse_instant,
};
pub use planner::{DataSource, ImportError, Planner, PlannerError};
pub use schedule::{
    ExamEntry, adjusted_minutes, earliest_exam, exams_by_datetime, flatten_exams,
    subjects_by_earliest,
};
pub use store::{
    DATA_KEY, EXTRA_KEY, FileStore, KeyValueStore, MemoryStore, SELECTION_KEY, StoreError,
};
