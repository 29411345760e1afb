//! Error types for catalog loading.
//!
//! Only document- and session-level failures are errors. Problems with a
//! single element or a single property degrade to skipped cards or empty
//! values and never surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;

/// Document-level load failure.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The document exists but could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON (or not a valid game definition).
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configured data identifier does not locate a collection.
    #[error("{path}: data identifier '{identifier}' does not name a collection")]
    MissingData { path: PathBuf, identifier: String },

    /// The root is a scalar and no data identifier is configured.
    #[error("{path}: root is neither an array nor an object")]
    InvalidRoot { path: PathBuf },

    /// Invalid game configuration.
    #[error("Config error: {0}")]
    Config(String),
}

impl LoadError {
    /// Create a JSON error for an in-memory document.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        LoadError::Json {
            path: path.into(),
            source,
        }
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        LoadError::Config(msg.into())
    }
}
