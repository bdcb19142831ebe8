// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Durable user preferences.
//!
//! Preferences live in a flat string key/value store, the same shape a
//! browser's local storage has. Storage failures never reach the caller:
//! reads fall back to the default and writes keep the value in memory.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;

use crate::currencies::Currency;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not a JSON object of strings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// A single JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        // Only a corrupt file is replaced; an unreadable one is left alone.
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StorageError::Json(e)) => {
                tracing::warn!(path = %self.path.display(), "replacing corrupt preferences file: {e}");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-process store for tests and `--ephemeral` runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// A value that can be stored as a preference.
pub trait PreferenceValue: Copy + Default + Display + FromStr + Send + Sync + 'static {
    const STORAGE_KEY: &'static str;
}

impl PreferenceValue for Currency {
    const STORAGE_KEY: &'static str = "selectedCurrency";
}

/// One persisted preference, held in memory and mirrored to storage.
#[derive(Clone)]
pub struct Preference<T: PreferenceValue> {
    store: SharedStore,
    value: Arc<RwLock<T>>,
}

impl<T: PreferenceValue> Preference<T> {
    /// Load from storage. Missing, unreadable or unparseable values give
    /// the default.
    pub fn load(store: SharedStore) -> Self {
        let value = match store.get(T::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.parse::<T>() {
                Ok(value) => value,
                Err(_) => {
                    tracing::warn!(key = T::STORAGE_KEY, value = %raw, "ignoring unrecognised stored preference");
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key = T::STORAGE_KEY, "failed to read preference: {e}");
                T::default()
            }
        };
        tracing::debug!(key = T::STORAGE_KEY, %value, "preference loaded");

        Self {
            store,
            value: Arc::new(RwLock::new(value)),
        }
    }

    pub fn current(&self) -> T {
        match self.value.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Persist and switch to `value`. Readers see either the old or the new
    /// value, never anything in between.
    pub fn set(&self, value: T) {
        let mut guard = match self.value.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = self.store.set(T::STORAGE_KEY, &value.to_string()) {
            tracing::warn!(key = T::STORAGE_KEY, "failed to persist preference: {e}");
        }
        *guard = value;
    }
}
