use serde::{Deserialize, Serialize};

/// One retained file in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scanned root, always `/`-separated.
    pub path: String,
    /// Normalized text content, or [`BINARY_PLACEHOLDER`](crate::BINARY_PLACEHOLDER)
    /// for binary files. Absent when content extraction is disabled or reading failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Why the file's bytes could not be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileRecord {
    pub(crate) fn bare(path: String) -> Self {
        Self {
            path,
            content: None,
            error: None,
        }
    }
}

/// A file that was enumerated but could not be described at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub path: String,
    pub error: String,
}

/// The complete result of a snapshot run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// ASCII rendering of the retained tree, present when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_structure: Option<String>,
    /// Retained files in enumeration order.
    pub files: Vec<FileRecord>,
    /// Traversal-level failures; omitted from JSON when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorRecord>,
}
