// src/store.rs
use std::{collections::HashMap, fs, io, path::{Path, PathBuf}};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::consts::{KEY_BASELINE, KEY_BASELINE_AT, KEY_CHANGES, KEY_HISTORY, KV_SUBDIR};
use crate::detect::ChangeEvent;
use crate::error::{MetricsError, Result};
use crate::record::MetricRecord;

/// Small durable string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(s!(key), s!(value));
        Ok(())
    }
}

/// One file per key inside `dir` (`<dir>/<key>.json`).
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The key-value directory inside a store directory.
    pub fn under(store_dir: &Path) -> Self {
        Self::new(store_dir.join(KV_SUBDIR))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MetricsError::storage(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| MetricsError::storage(key, e))?;
        fs::write(self.path_for(key), value).map_err(|e| MetricsError::storage(key, e))
    }
}

/// Typed access to the snapshot and change-log keys.
///
/// Writes are best-effort: a failure is logged, the store is flagged as
/// degraded and the caller carries on with its in-memory copy.
pub struct SnapshotStore {
    kv: Box<dyn KeyValueStore>,
    degraded: bool,
}

impl SnapshotStore {
    pub fn new(kv: Box<dyn KeyValueStore>) -> Self {
        Self { kv, degraded: false }
    }

    /// True once any read or write has failed.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn save_baseline(&mut self, record: &MetricRecord, at: DateTime<Utc>) -> bool {
        self.write_json(KEY_BASELINE, record) && self.write(KEY_BASELINE_AT, &at.to_rfc3339())
    }

    /// The stored baseline; `None` when absent, unreadable or malformed.
    pub fn load_baseline(&mut self) -> Option<MetricRecord> {
        self.read_json(KEY_BASELINE)
    }

    pub fn baseline_at(&mut self) -> Option<DateTime<Utc>> {
        let raw = self.read(KEY_BASELINE_AT)?;
        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(at) => Some(at.with_timezone(&Utc)),
            Err(e) => {
                logw!("Store: {} unreadable ({}), ignoring", KEY_BASELINE_AT, e);
                None
            }
        }
    }

    pub fn save_log(&mut self, changes: &[ChangeEvent], history: &[ChangeEvent]) -> bool {
        let changes_ok = self.write_json(KEY_CHANGES, changes);
        let history_ok = self.write_json(KEY_HISTORY, history);
        changes_ok && history_ok
    }

    pub fn load_history(&mut self) -> Vec<ChangeEvent> {
        self.read_json(KEY_HISTORY).unwrap_or_default()
    }

    /* ---------- raw access ---------- */

    fn read(&mut self, key: &str) -> Option<String> {
        match self.kv.get(key) {
            Ok(v) => v,
            Err(e) => {
                self.mark_degraded(&e);
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        match self.kv.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                self.mark_degraded(&e);
                false
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                logw!("Store: {} is malformed ({}), treating as absent", key, e);
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(text) => self.write(key, &text),
            Err(e) => {
                loge!("Store: could not encode {}: {}", key, e);
                false
            }
        }
    }

    fn mark_degraded(&mut self, e: &MetricsError) {
        if !self.degraded {
            logw!("Store: {}, continuing in memory", e);
        } else {
            logd!("Store: {}", e);
        }
        self.degraded = true;
    }
}
