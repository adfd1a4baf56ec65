use thiserror::Error;

/// Failures reported by a [`crate::storage::KeyValueStore`] backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("write rejected for key {key}: {reason}")]
    WriteRejected { key: String, reason: String },
}

/// Errors raised while persisting capture progress.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("failed to encode progress: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors raised while fetching or parsing a version config.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config {path} could not be fetched: {reason}")]
    Fetch { path: String, reason: String },

    #[error("config {path} is malformed: {reason}")]
    Parse { path: String, reason: String },

    #[error("config {path} lists no characters")]
    Empty { path: String },

    #[error("version {requested} failed ({requested_error}) and fallback {fallback} failed ({fallback_error})")]
    FallbackFailed {
        requested: String,
        requested_error: Box<ConfigError>,
        fallback: String,
        fallback_error: Box<ConfigError>,
    },
}
