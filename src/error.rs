// src/error.rs
use thiserror::Error;

/// Every failure here is recoverable: callers log it and carry on with
/// degraded data rather than stopping the detection loop.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The document could not be read; the extractor falls back to zeros.
    #[error("document unavailable: {0}")]
    ExtractionUnavailable(String),

    /// The key-value store could not be read or written.
    #[error("store unavailable for key `{key}`: {reason}")]
    StorageUnavailable { key: String, reason: String },

    /// A persisted value could not be parsed or a report could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MetricsError {
    pub fn storage(key: &str, reason: impl ToString) -> Self {
        Self::StorageUnavailable { key: s!(key), reason: reason.to_string() }
    }
}

pub type Result<T, E = MetricsError> = std::result::Result<T, E>;
