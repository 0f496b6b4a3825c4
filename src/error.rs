use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid ignore pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
impl SnapshotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SnapshotError::Io {
            path: path.into(),
            source,
        }
    }
}
