// Cache path utilities.
// Maps cache keys to JSON files under the platform cache directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/departures on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "departures").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the file backing a cache key.
pub fn key_path(root: &Path, key: &str) -> PathBuf {
    root.join(format!("{}.json", sanitize_name(key)))
}

/// Sanitize a key for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
