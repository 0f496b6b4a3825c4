use crate::content::{describe_file, display_relative};
use crate::error::SnapshotError;
use crate::filter::EntryFilter;
use crate::options::{BinaryDetection, SnapshotOptions};
use crate::tree::render_structure;
use crate::types::{ErrorRecord, FileRecord, Snapshot};
use ignore::{DirEntry, WalkBuilder};
use std::fs;
use std::path::Path;
struct Walker {
    inner: ignore::Walk,
}
impl Walker {
    fn new(root: &Path, filter: &EntryFilter) -> Self {
        let mut builder = WalkBuilder::new(root);
        builder.standard_filters(false).follow_links(false);
        let filter = filter.clone();
        builder.filter_entry(move |entry| {
            let excluded = filter.skips(entry.file_name(), is_dir_like(entry));
            if excluded {
                #[cfg(feature = "logging")]
                tracing::debug!("Pruned {}", entry.path().display());
            }
            !excluded
        });
        Self {
            inner: builder.build(),
        }
    }
    /// Yields every retained entry that is not a directory.
    fn into_files(self) -> impl Iterator<Item = DirEntry> {
        self.inner.filter_map(|result| match result {
            Ok(entry) if is_file_like(&entry) => Some(entry),
            Ok(_) => None,
            Err(_e) => {
                #[cfg(feature = "logging")]
                tracing::warn!("Skipping unreadable entry: {}", _e);
                None
            }
        })
    }
}
fn is_dir_like(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_symlink() => entry.path().is_dir(),
        Some(ft) => ft.is_dir(),
        None => false,
    }
}
/// Links are not followed: a link to a directory counts as a directory,
/// anything else (including a dangling link) as a file.
fn is_file_like(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_dir() => false,
        Some(ft) if ft.is_symlink() => !entry.path().is_dir(),
        Some(_) => true,
        None => false,
    }
}
/// Walks `root` and builds one record per retained file.
///
/// Entries excluded by `filter` are pruned before they are entered, so an
/// ignored directory is never opened. Records are returned in enumeration
/// order. Failures to describe a single file are collected as
/// [`ErrorRecord`]s and never abort the walk.
///
/// # Errors
///
/// Returns an error only if `root` itself cannot be listed.
pub fn walk(
    root: &Path,
    filter: &EntryFilter,
    include_content: bool,
    max_size: u64,
    detection: BinaryDetection,
) -> Result<(Vec<FileRecord>, Vec<ErrorRecord>), SnapshotError> {
    fs::read_dir(root).map_err(|e| SnapshotError::io(root, e))?;
    let mut files = Vec::new();
    let mut errors = Vec::new();
    for entry in Walker::new(root, filter).into_files() {
        let path = entry.path();
        match describe_file(path, root, include_content, max_size, detection) {
            Ok(record) => files.push(record),
            Err(e) => {
                #[cfg(feature = "logging")]
                tracing::warn!("Cannot describe {}: {}", path.display(), e);
                errors.push(ErrorRecord {
                    path: display_relative(path, root),
                    error: e.to_string(),
                });
            }
        }
    }
    Ok((files, errors))
}
/// Produces the full snapshot described by `options`.
pub fn snapshot(options: SnapshotOptions) -> Result<Snapshot, SnapshotError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Starting snapshot with root: {}", options.root.display());
    let filter = EntryFilter::new(&options.ignore_patterns, options.excluded_names.iter().cloned())?;
    let file_structure = if options.include_structure {
        Some(render_structure(&options.root, &filter)?)
    } else {
        None
    };
    let (files, errors) = walk(
        &options.root,
        &filter,
        options.include_content,
        options.max_size,
        options.binary_detection,
    )?;
    #[cfg(feature = "logging")]
    tracing::debug!("Collected {} files, {} errors", files.len(), errors.len());
    Ok(Snapshot {
        file_structure,
        files,
        errors,
    })
}
