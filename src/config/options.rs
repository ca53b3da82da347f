// src/config/options.rs
use std::{fs, path::{Path, PathBuf}, time::Duration};

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::MetricsError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    /// Landing page to watch (HTML file on disk).
    pub page: Option<PathBuf>,
    pub store_dir: PathBuf,
    pub export_dir: PathBuf,
    pub tick_secs: u64,
    pub profile: Profile,
    pub extract: ExtractOptions,
    pub store: StoreOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            page: None,
            store_dir: PathBuf::from(STORE_DIR),
            export_dir: PathBuf::from(DEFAULT_OUT_DIR),
            tick_secs: TICK_SECS,
            profile: Profile::default(),
            extract: ExtractOptions::default(),
            store: StoreOptions::default(),
        }
    }
}

impl AppOptions {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_secs.max(1))
    }

    /// Parse options from TOML text. Missing keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self, MetricsError> {
        toml::from_str(text).map_err(|e| MetricsError::Config(e.to_string()))
    }

    pub fn try_load(path: &Path) -> Result<Self, MetricsError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Best-effort load: a missing or broken file means defaults. Nothing is
    /// logged here; call [`LoadStatus::report`] once logging is set up.
    pub fn load(path: &Path) -> (Self, LoadStatus) {
        if !path.exists() {
            return (Self::default(), LoadStatus::Missing);
        }
        match Self::try_load(path) {
            Ok(opts) => (opts, LoadStatus::Loaded),
            Err(e) => (Self::default(), LoadStatus::Ignored(e)),
        }
    }
}

/// How [`AppOptions::load`] went.
#[derive(Debug)]
pub enum LoadStatus {
    Missing,
    Loaded,
    Ignored(MetricsError),
}

impl LoadStatus {
    pub fn report(&self, path: &Path) {
        match self {
            LoadStatus::Missing => logd!("Config: {} not found, using defaults", path.display()),
            LoadStatus::Loaded => logf!("Config: loaded {}", path.display()),
            LoadStatus::Ignored(e) => loge!("Config: {} ignored, using defaults: {}", path.display(), e),
        }
    }
}

/// Identity of the investigator. Empty fields are looked up on the page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub institution: String,
    pub title: String,
    pub orcid: String,
    pub google_scholar: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Count reported when the patents section has no cards.
    pub patents_fallback: Option<u32>,
    /// Count reported when the books section has no cards.
    pub books_fallback: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Events kept in the cross-session history, newest last. 0 keeps all.
    pub history_limit: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { history_limit: HISTORY_LIMIT }
    }
}
