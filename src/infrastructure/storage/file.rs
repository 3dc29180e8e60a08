// SPDX-License-Identifier: MPL-2.0
//! File-backed session store.
//!
//! Entries live in memory and are written through to a CBOR file in the
//! application data directory on every change. Each entry records when it
//! was saved.
//!
//! # Path Resolution
//!
//! 1. `base_dir` parameter (if `Some`)
//! 2. `EVENT_LENS_DATA_DIR` environment variable (if set)
//! 3. Platform-specific data directory

use crate::app::paths;
use crate::application::lock;
use crate::application::port::{SessionStore, StoreError};
use crate::error::{Error, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Session file name inside the data directory.
const STORE_FILE: &str = "session.cbor";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredEntry {
    value: String,
    /// Milliseconds since the Unix epoch, UTC.
    saved_at_ms: i64,
}

#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, StoredEntry>>,
}

impl FileSessionStore {
    /// Opens the store in the resolved data directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] when no data directory can be determined.
    pub fn open(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = paths::get_app_data_dir_with_override(base_dir)
            .map(|dir| dir.join(STORE_FILE))
            .ok_or_else(|| Error::Store("no data directory available".to_string()))?;
        Ok(Self::open_at(path))
    }

    /// Opens the store backed by `path`.
    ///
    /// A missing file starts an empty store. An unreadable one is logged
    /// and also starts empty; it is overwritten on the next change.
    #[must_use]
    pub fn open_at(path: PathBuf) -> Self {
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Ignoring session file {}: {err}", path.display());
                BTreeMap::new()
            }
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When `key` was last written.
    #[must_use]
    pub fn saved_at(&self, key: &str) -> Option<DateTime<Utc>> {
        lock(&self.entries)
            .get(key)
            .and_then(|entry| DateTime::from_timestamp_millis(entry.saved_at_ms))
    }

    /// Time elapsed between the last write of `key` and `now`.
    #[must_use]
    pub fn age(&self, key: &str, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.saved_at(key).map(|saved| now - saved)
    }

    fn read_entries(path: &Path) -> std::result::Result<BTreeMap<String, StoredEntry>, StoreError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let file = fs::File::open(path).map_err(|e| StoreError::Io(e.to_string()))?;
        ciborium::from_reader(BufReader::new(file)).map_err(|e| StoreError::Encode(e.to_string()))
    }

    fn persist(&self, entries: &BTreeMap<String, StoredEntry>) -> std::result::Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let file = fs::File::create(&self.path).map_err(|e| StoreError::Io(e.to_string()))?;
        ciborium::into_writer(entries, BufWriter::new(file))
            .map_err(|e| StoreError::Encode(e.to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).map(|entry| entry.value.clone())
    }

    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        let mut entries = lock(&self.entries);
        entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                saved_at_ms: Utc::now().timestamp_millis(),
            },
        );
        self.persist(&entries)
    }

    fn clear(&self, key: &str) -> std::result::Result<(), StoreError> {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }
}
