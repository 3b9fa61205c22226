//! Path normalization utilities.

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Join path segments and resolve `.` and `..` lexically.
///
/// Only the first non-empty segment may carry a root; later segments are
/// appended even when absolute, so `["a", "/b", "../c"]` joins to `a/c`.
/// An empty result is `.`.
pub fn join_segments<I, P>(segments: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut joined = PathBuf::new();
    // Normal components that a following `..` may remove
    let mut depth = 0usize;
    let mut leading = true;

    for segment in segments {
        let segment = segment.as_ref();
        if segment.as_os_str().is_empty() {
            continue;
        }
        for component in segment.components() {
            match component {
                Component::Prefix(_) | Component::RootDir if leading => joined.push(component),
                Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
                Component::ParentDir if depth > 0 => {
                    joined.pop();
                    depth -= 1;
                }
                Component::ParentDir => {
                    if !joined.has_root() {
                        joined.push("..");
                    }
                }
                Component::Normal(name) => {
                    joined.push(name);
                    depth += 1;
                }
            }
        }
        leading = false;
    }

    if joined.as_os_str().is_empty() {
        joined.push(".");
    }
    joined
}

/// Turn an arbitrary string into a safe single file name component.
///
/// Every character outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    match sanitized.as_str() {
        "" | "." | ".." => format!("_{sanitized}"),
        _ => sanitized,
    }
}
