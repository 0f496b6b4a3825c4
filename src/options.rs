use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Patterns ignored when the caller supplies none.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 7] = [
    ".git",
    "node_modules",
    "*.pyc",
    "__pycache__",
    "*.log",
    "target",
    "Cargo.lock",
];
/// File name the snapshot is written to by default.
pub const DEFAULT_OUTPUT_NAME: &str = "directory_snapshot.json";
/// Maximum number of content bytes read per file by default (1 MiB).
pub const DEFAULT_MAX_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryDetection {
    Simple,
    Accurate,
    None,
}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotOptions {
    pub root: PathBuf,
    pub ignore_patterns: Vec<String>,
    pub excluded_names: Vec<String>,
    pub include_content: bool,
    pub max_size: u64,
    pub include_structure: bool,
    pub binary_detection: BinaryDetection,
}
impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            ignore_patterns: DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect(),
            excluded_names: vec![DEFAULT_OUTPUT_NAME.to_string()],
            include_content: true,
            max_size: DEFAULT_MAX_SIZE,
            include_structure: true,
            binary_detection: BinaryDetection::Simple,
        }
    }
}
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    options: SnapshotOptions,
}
impl SnapshotBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: SnapshotOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    /// Replaces the ignore patterns. The defaults are not kept.
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    /// Replaces the exact basenames that are always skipped.
    pub fn excluded_names(mut self, names: Vec<String>) -> Self {
        self.options.excluded_names = names;
        self
    }
    pub fn exclude_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.options.excluded_names.contains(&name) {
            self.options.excluded_names.push(name);
        }
        self
    }
    pub fn include_content(mut self, yes: bool) -> Self {
        self.options.include_content = yes;
        self
    }
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.options.max_size = bytes;
        self
    }
    pub fn include_structure(mut self, yes: bool) -> Self {
        self.options.include_structure = yes;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn build(self) -> SnapshotOptions {
        self.options
    }
}
