//! Serialization of a [`Snapshot`] to its JSON document.
//!
//! The document is pretty-printed with two-space indentation and LF line
//! endings, and keeps non-ASCII characters unescaped.

use crate::{Snapshot, SnapshotError};
use std::fs;
use std::path::Path;

/// Formats the snapshot as pretty-printed JSON.
pub fn to_json(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Writes the snapshot's JSON document to `path`.
pub fn write_snapshot(snapshot: &Snapshot, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
    let json = to_json(snapshot)?;
    fs::write(&path, json).map_err(|e| SnapshotError::io(path.as_ref(), e))?;
    Ok(())
}
