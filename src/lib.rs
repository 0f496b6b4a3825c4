//! # Dirsnap
//!
//! `dirsnap` walks a directory tree and captures it as a single [`Snapshot`]: a
//! `/`-separated listing of every retained file, optionally with its text
//! content, and optionally an ASCII rendering of the tree. The snapshot
//! serializes to one JSON document meant to be fed to code-analysis tools.
//!
//! Entries are filtered by basename against shell-glob ignore patterns and a
//! list of exact excluded names. Ignored directories are pruned before they
//! are entered. Binary files are replaced with [`BINARY_PLACEHOLDER`] and text
//! has its line endings normalized to LF.
//!
//! # Features
//!
//! - `logging` (default): Enables debug and warning events via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use dirsnap::{SnapshotBuilder, output, snapshot};
//!
//! let options = SnapshotBuilder::new(".")
//!     .ignore_patterns(vec![".git".into(), "target".into()])
//!     .max_size(64 * 1024)
//!     .build();
//!
//! let result = snapshot(options).expect("Failed to scan directory");
//!
//! println!("{}", result.file_structure.as_deref().unwrap_or(""));
//! output::write_snapshot(&result, "directory_snapshot.json").expect("Failed to write snapshot");
//! ```

mod content;
mod engine;
mod error;
mod filter;
mod options;
pub mod output;
mod tree;
mod types;

pub use content::{
    BINARY_PLACEHOLDER, SAMPLE_SIZE, classify, describe_file, is_text, normalize_line_endings,
};
pub use engine::{snapshot, walk};
pub use error::SnapshotError;
pub use filter::EntryFilter;
pub use options::{
    BinaryDetection, DEFAULT_IGNORE_PATTERNS, DEFAULT_MAX_SIZE, DEFAULT_OUTPUT_NAME,
    SnapshotBuilder, SnapshotOptions,
};
pub use tree::render_structure;
pub use types::{ErrorRecord, FileRecord, Snapshot};
