use crate::error::SnapshotError;
use crate::options::BinaryDetection;
use crate::types::FileRecord;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path};

/// Number of leading bytes inspected when classifying a file.
pub const SAMPLE_SIZE: u64 = 8192;
/// Content stored for files classified as binary.
pub const BINARY_PLACEHOLDER: &str = "<binary_content>";

/// Returns `true` if the first [`SAMPLE_SIZE`] bytes of the file contain no NUL byte.
///
/// A file that cannot be opened or read is reported as binary.
pub fn is_text(path: impl AsRef<Path>) -> bool {
    classify(path, BinaryDetection::Simple)
}

/// Classifies a file as text (`true`) or binary using the given strategy.
pub fn classify(path: impl AsRef<Path>, detection: BinaryDetection) -> bool {
    if detection == BinaryDetection::None {
        return true;
    }
    let sample = match read_head(path.as_ref(), SAMPLE_SIZE) {
        Ok(sample) => sample,
        Err(_) => return false,
    };
    match detection {
        BinaryDetection::Simple => !sample.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(&sample).is_text(),
        BinaryDetection::None => true,
    }
}

/// Rewrites CRLF and lone CR line endings to LF.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Builds the record for one file under `base`.
///
/// Read failures are stored in the record's `error` field. An `Err` is returned
/// only when the file's relative path cannot be expressed.
pub fn describe_file(
    path: &Path,
    base: &Path,
    include_content: bool,
    max_size: u64,
    detection: BinaryDetection,
) -> Result<FileRecord, SnapshotError> {
    let mut record = FileRecord::bare(relative_path(path, base)?);
    if !include_content {
        return Ok(record);
    }
    match read_content(path, max_size, detection) {
        Ok(content) => record.content = Some(content),
        Err(e) => record.error = Some(SnapshotError::io(path, e).to_string()),
    }
    Ok(record)
}

fn read_content(path: &Path, max_size: u64, detection: BinaryDetection) -> io::Result<String> {
    let bytes = read_head(path, max_size)?;
    if !classify(path, detection) {
        #[cfg(feature = "logging")]
        tracing::debug!("Binary file detected: {}", path.display());
        return Ok(BINARY_PLACEHOLDER.to_string());
    }
    Ok(normalize_line_endings(&String::from_utf8_lossy(&bytes)))
}

fn read_head(path: &Path, limit: u64) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut buf = Vec::with_capacity(limit.min(SAMPLE_SIZE) as usize);
    file.take(limit).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Path of `path` relative to `base`, joined with `/`.
pub(crate) fn relative_path(path: &Path, base: &Path) -> Result<String, SnapshotError> {
    let relative = path.strip_prefix(base).map_err(|_| {
        SnapshotError::InvalidPath(format!(
            "{} is not under {}",
            path.display(),
            base.display()
        ))
    })?;
    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_str().ok_or_else(|| {
                SnapshotError::InvalidPath(format!(
                    "non UTF-8 name in {}",
                    relative.display()
                ))
            })?),
            Component::CurDir => {}
            _ => {
                return Err(SnapshotError::InvalidPath(format!(
                    "unexpected component in {}",
                    relative.display()
                )));
            }
        }
    }
    Ok(segments.join("/"))
}

/// Lossy variant of [`relative_path`] used when reporting traversal errors.
pub(crate) fn display_relative(path: &Path, base: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
