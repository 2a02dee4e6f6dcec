//! Application coordinator. Owns the whole mutable state of the tool
//! (subject list, selection, extra-time flag) and persists through an
//! injected [`KeyValueStore`] after every load and mutation.

use chrono::{Local, Timelike};
use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};

use crate::fetch;
use crate::model::{
    DEFAULT_LENGTH_MINUTES, Exam, Period, RawSubject, Subject, normalize_subjects,
};
use crate::schedule::subjects_by_earliest;
use crate::store::{DATA_KEY, EXTRA_KEY, KeyValueStore, SELECTION_KEY, StoreError};

/// Which fallback tier satisfied the initial load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Persisted subject list from a previous session.
    Stored,
    /// Remote static subject document.
    Fetched,
    /// Built-in single sample subject.
    Sample,
}

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("JSON must be an array of subjects")]
    NotAnArray,
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Persist(#[from] PlannerError),
}

/// Coordinator over the canonical subject list, the name-based selection,
/// and the extra-time toggle.
#[derive(Debug)]
pub struct Planner<S: KeyValueStore> {
    store: S,
    subjects: Vec<Subject>,
    selection: Vec<String>,
    extra_time: bool,
}

impl<S: KeyValueStore> Planner<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            subjects: Vec::new(),
            selection: Vec::new(),
            extra_time: false,
        }
    }

    /// Tiered initial load: persisted data, else the remote document at
    /// `data_url` (when configured), else the built-in sample. Each tier is
    /// re-normalized and the canonical result persisted before returning.
    pub async fn load_initial(
        &mut self,
        client: &Client,
        data_url: Option<&str>,
    ) -> Result<DataSource, PlannerError> {
        self.selection = self.load_selection();
        self.extra_time = self
            .store
            .load(EXTRA_KEY)
            .is_some_and(|value| value.trim() == "1");

        if let Some(text) = self.store.load(DATA_KEY) {
            match serde_json::from_str::<Vec<RawSubject>>(&text) {
                Ok(raw) => {
                    self.subjects = normalize_subjects(&raw);
                    self.save_subjects()?;
                    return Ok(DataSource::Stored);
                }
                Err(err) => {
                    warn!(error = %err, "stored subject list is corrupt; falling through");
                }
            }
        }

        if let Some(url) = data_url {
            if let Some(raw) = fetch::fetch_subjects(client, url).await {
                self.subjects = normalize_subjects(&raw);
                self.save_subjects()?;
                info!(url, count = self.subjects.len(), "loaded subjects from remote document");
                return Ok(DataSource::Fetched);
            }
        }

        self.subjects = sample_subjects();
        self.save_subjects()?;
        Ok(DataSource::Sample)
    }

    /// Releases the underlying store, e.g. to reuse it across sessions.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Canonical subject list in storage order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Stored selection as-is, orphans included.
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.iter().any(|selected| selected == name)
    }

    pub fn extra_time(&self) -> bool {
        self.extra_time
    }

    /// Selected subjects reconciled by name against the live list, ordered
    /// by earliest sitting. Stored names without a matching subject are
    /// silently dropped from the effective set but kept in storage.
    pub fn effective_selection(&self) -> Vec<&Subject> {
        subjects_by_earliest(&self.subjects)
            .into_iter()
            .filter(|subject| self.is_selected(&subject.name))
            .collect()
    }

    /// Adds the given names to the selection. Names that match no subject
    /// are skipped and returned to the caller.
    pub fn select(&mut self, names: &[String]) -> Result<Vec<String>, PlannerError> {
        let mut unknown = Vec::new();
        for name in names {
            if !self.subjects.iter().any(|subject| &subject.name == name) {
                unknown.push(name.clone());
            } else if !self.is_selected(name) {
                self.selection.push(name.clone());
            }
        }
        self.save_selection()?;
        Ok(unknown)
    }

    pub fn deselect(&mut self, names: &[String]) -> Result<(), PlannerError> {
        self.selection.retain(|selected| !names.contains(selected));
        self.save_selection()
    }

    pub fn select_all(&mut self) -> Result<(), PlannerError> {
        self.selection = self
            .subjects
            .iter()
            .filter(|subject| !subject.name.is_empty())
            .map(|subject| subject.name.clone())
            .collect();
        self.selection.dedup();
        self.save_selection()
    }

    pub fn clear_selection(&mut self) -> Result<(), PlannerError> {
        self.selection.clear();
        self.save_selection()
    }

    pub fn set_extra_time(&mut self, enabled: bool) -> Result<(), PlannerError> {
        self.extra_time = enabled;
        self.store
            .save(EXTRA_KEY, if enabled { "1" } else { "0" })?;
        Ok(())
    }

    /// Replaces the subject list wholesale from an imported JSON document.
    /// On any failure the in-memory state is left untouched. The stored
    /// selection is pruned to names that survive the import.
    pub fn import(&mut self, json: &str) -> Result<usize, ImportError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_array() {
            return Err(ImportError::NotAnArray);
        }
        let raw: Vec<RawSubject> = serde_json::from_value(value)?;
        let subjects = normalize_subjects(&raw);

        let kept: Vec<String> = subjects
            .iter()
            .map(|subject| subject.name.clone())
            .filter(|name| self.is_selected(name))
            .collect();

        self.subjects = subjects;
        self.selection = kept;
        self.save_subjects()?;
        self.save_selection()?;
        Ok(self.subjects.len())
    }

    /// Indented JSON of the canonical subject list, the `subjects.json`
    /// download format.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.subjects)
    }

    fn load_selection(&self) -> Vec<String> {
        let Some(raw) = self.store.load(SELECTION_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(names) => names,
            Err(err) => {
                warn!(error = %err, "stored selection is corrupt; treating as empty");
                Vec::new()
            }
        }
    }

    fn save_subjects(&mut self) -> Result<(), PlannerError> {
        let json = serde_json::to_string_pretty(&self.subjects)?;
        self.store.save(DATA_KEY, &json)?;
        Ok(())
    }

    fn save_selection(&mut self) -> Result<(), PlannerError> {
        let json = serde_json::to_string(&self.selection)?;
        self.store.save(SELECTION_KEY, &json)?;
        Ok(())
    }
}

/// The last-resort fallback tier: one sample subject with a sitting at the
/// current local time.
fn sample_subjects() -> Vec<Subject> {
    let now = Local::now();
    vec![Subject {
        name: "Sample Subject".to_string(),
        exams: vec![Exam {
            datetime: now.format("%Y-%m-%dT%H:%M").to_string(),
            period: Some(Period::from_hour(now.hour())),
            notes: String::new(),
            length_minutes: DEFAULT_LENGTH_MINUTES,
        }],
    }]
}
