use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by durable store backends.
///
/// None of these reach callers of [`PersistentValue`](super::PersistentValue):
/// reads fall back to defaults and write failures are logged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read store file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse store file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write store file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize value for '{key}': {source}")]
    SerializeError {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
