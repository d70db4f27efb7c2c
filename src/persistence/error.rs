use std::path::PathBuf;
use thiserror::Error;

/// Data file problems callers may want to tell apart from plain I/O errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} must contain a JSON object")]
    NotAnObject(PathBuf),
    #[error("flow directory already exists: {0}")]
    AlreadyInitialized(PathBuf),
}
