//! Key-value persistence port. The planner only ever talks to the
//! [`KeyValueStore`] trait; production code injects [`FileStore`], tests
//! inject [`MemoryStore`].

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

/// Storage key for the canonical subject list (indented JSON).
pub const DATA_KEY: &str = "exam_timetable_data_v1";
/// Storage key for the selected subject names (JSON string array).
pub const SELECTION_KEY: &str = "exam_timetable_selected_v1";
/// Storage key for the extra-time flag (`"1"` / `"0"`).
pub const EXTRA_KEY: &str = "exam_timetable_extra_v1";

const DATA_DIR_NAME: &str = "examtable";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no platform data directory available")]
    NoDataDir,
    #[error("failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// Minimal persistence port: string values under fixed string keys.
///
/// A missing or unreadable value loads as `None`; only writes are fallible.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// File-backed store: one file per key under the platform data directory.
#[derive(Debug)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Opens the store at the default platform location
    /// (`<data dir>/examtable`), creating the directory if needed.
    pub fn open_default() -> Result<Self, StoreError> {
        let base = dirs::data_dir()
            .or_else(dirs::config_dir)
            .ok_or(StoreError::NoDataDir)?;
        Self::open(base.join(DATA_DIR_NAME))
    }

    /// Opens the store rooted at an explicit directory.
    pub fn open(base_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_dir).map_err(|source| StoreError::Write {
            key: base_dir.display().to_string(),
            source,
        })?;
        Ok(Self { base_dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(key, error = %err, "failed to read stored value; treating as absent");
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.key_path(key), value).map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a key, e.g. to simulate a previous session.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
