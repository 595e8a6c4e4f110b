//! Path normalization shared by the catalog, scanner and resolver.

use std::path::{Component, Path, PathBuf};

/// Make `path` absolute and remove `.` and `..` components lexically.
///
/// Symlinks are not resolved, so two spellings of the same directory through
/// different links stay distinct.
pub fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Identity string for a path, case-folded where the filesystem is.
pub fn identity_key(path: &Path) -> String {
    let text = normalize(path).to_string_lossy().to_string();
    if cfg!(windows) {
        text.to_lowercase()
    } else {
        text
    }
}

/// Last segment of a path-like string, accepting either separator.
///
/// Registry values use `\` even when this crate runs elsewhere, so this
/// doesn't go through `Path`.
pub fn last_segment(entry: &str) -> Option<&str> {
    entry
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
}

/// Second-to-last segment of a path-like string, accepting either separator.
pub fn parent_segment(entry: &str) -> Option<&str> {
    entry
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .nth(1)
        .filter(|s| !s.is_empty())
}
