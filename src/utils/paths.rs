//! Path normalization

use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base` and normalize it lexically.
///
/// Absolute inputs ignore `base`. `.` segments are dropped and `..` pops a
/// segment without touching the filesystem, so the directory does not need to
/// exist yet.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() { path.to_path_buf() } else { base.join(path) };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Never pop past the root
                if !matches!(out.components().next_back(), None | Some(Component::RootDir)) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
