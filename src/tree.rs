//! Rendering of the retained directory structure as a box-drawing tree.

use crate::error::SnapshotError;
use crate::filter::EntryFilter;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

struct Child {
    name: OsString,
    path: PathBuf,
    is_dir: bool,
    descend: bool,
}

/// Renders the children of `root` in the style of the `tree` command.
///
/// Entries are sorted by name at every level, with directories and files
/// interleaved and directories suffixed with `/`. The root itself is not
/// printed, so an empty or fully ignored root renders as an empty string.
///
/// # Errors
///
/// Returns an error if `root` cannot be listed. Nested directories that cannot
/// be listed are rendered without children.
pub fn render_structure(root: &Path, filter: &EntryFilter) -> Result<String, SnapshotError> {
    let children = list_children(root, filter).map_err(|e| SnapshotError::io(root, e))?;
    let mut lines = Vec::new();
    render_children(&children, "", filter, &mut lines);
    Ok(lines.join("\n"))
}

fn render_children(children: &[Child], prefix: &str, filter: &EntryFilter, lines: &mut Vec<String>) {
    for (index, child) in children.iter().enumerate() {
        let is_last = index + 1 == children.len();
        let connector = if is_last { "└── " } else { "├── " };
        let name = child.name.to_string_lossy();
        if !child.is_dir {
            lines.push(format!("{prefix}{connector}{name}"));
            continue;
        }
        lines.push(format!("{prefix}{connector}{name}/"));
        if !child.descend {
            continue;
        }
        let nested = match list_children(&child.path, filter) {
            Ok(nested) => nested,
            Err(_e) => {
                #[cfg(feature = "logging")]
                tracing::warn!("Cannot list {}: {}", child.path.display(), _e);
                continue;
            }
        };
        let next_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        render_children(&nested, &next_prefix, filter, lines);
    }
}

fn list_children(dir: &Path, filter: &EntryFilter) -> io::Result<Vec<Child>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let path = entry.path();
        let file_type = entry.file_type()?;
        let (is_dir, descend) = if file_type.is_symlink() {
            (path.is_dir(), false)
        } else {
            (file_type.is_dir(), file_type.is_dir())
        };
        if filter.skips(&name, is_dir) {
            continue;
        }
        children.push(Child {
            name,
            path,
            is_dir,
            descend,
        });
    }
    children.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn default_filter() -> EntryFilter {
        EntryFilter::new([".git"], ["directory_snapshot.json"]).unwrap()
    }

    #[test]
    fn renders_nested_connectors() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("dir1/sub")).unwrap();
        fs::write(root.join("dir1/f1"), "").unwrap();
        fs::write(root.join("dir1/sub/deep"), "").unwrap();
        fs::write(root.join("f2"), "").unwrap();

        let out = render_structure(root, &default_filter()).unwrap();
        assert_eq!(
            out,
            concat!(
                "├── dir1/\n",
                "│   ├── f1\n",
                "│   └── sub/\n",
                "│       └── deep\n",
                "└── f2",
            )
        );
    }

    #[test]
    fn last_branch_drops_vertical_bar() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a"), "").unwrap();
        fs::create_dir_all(root.join("z/y")).unwrap();
        fs::write(root.join("z/y/x"), "").unwrap();

        let out = render_structure(root, &default_filter()).unwrap();
        assert_eq!(
            out,
            concat!("├── a\n", "└── z/\n", "    └── y/\n", "        └── x",)
        );
    }

    #[test]
    fn ignored_and_excluded_entries_are_hidden() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::write(root.join(".git/HEAD"), "").unwrap();
        fs::write(root.join("directory_snapshot.json"), "{}").unwrap();
        fs::write(root.join("kept.txt"), "").unwrap();

        let out = render_structure(root, &default_filter()).unwrap();
        assert_eq!(out, "└── kept.txt");
    }

    #[test]
    fn excluded_names_do_not_hide_directories() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("directory_snapshot.json")).unwrap();
        fs::write(root.join("directory_snapshot.json/inner"), "").unwrap();

        let out = render_structure(root, &default_filter()).unwrap();
        assert_eq!(out, "└── directory_snapshot.json/\n    └── inner");
    }

    #[test]
    fn empty_root_renders_empty_string() {
        let dir = tempdir().unwrap();
        assert_eq!(render_structure(dir.path(), &default_filter()).unwrap(), "");
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempdir().unwrap();
        let err = render_structure(&dir.path().join("missing"), &default_filter()).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}
