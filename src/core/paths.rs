//! Path normalization utilities
//!
//! Resource paths inside catalog keys always use '/' and start with '/'.

use std::path::{Component, Path, PathBuf};

/// Name of the per-workspace state directory
pub const STATE_DIR: &str = ".quickrun";

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Force a leading '/' onto a resource path
pub fn to_resource_path(relative: &str) -> String {
    if relative.starts_with('/') {
        relative.to_string()
    } else {
        format!("/{}", relative)
    }
}

/// Whether any directory segment of a '/'-separated path is named `icons`.
/// The final segment (the file name) is not considered.
pub fn has_icons_segment(resource_path: &str) -> bool {
    let mut segments: Vec<&str> = resource_path.split('/').filter(|s| !s.is_empty()).collect();
    segments.pop();
    segments.iter().any(|s| *s == "icons")
}

/// Map a resource path back onto a directory root, rejecting `..` escapes
pub fn resource_to_fs_path(root: &Path, resource_path: &str) -> Option<PathBuf> {
    let relative = Path::new(resource_path.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

/// Resolve a possibly-relative configured path against the workspace root
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Get the .quickrun state directory for a given root
pub fn state_dir(root: &Path) -> PathBuf {
    root.join(STATE_DIR)
}
