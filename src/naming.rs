//! Collision-free output paths: `name.ext`, `name_1.ext`, `name_2.ext`, ...

use std::path::{Path, PathBuf};

/// Return `desired` if nothing exists there, otherwise the first free `{stem}_{n}{.ext}` sibling
/// with `n` starting at 1.
pub fn unique_path(desired: &Path) -> PathBuf {
    unique_path_from(desired, 1)
}

/// Like [`unique_path`] with a custom first suffix number.
pub fn unique_path_from(desired: &Path, initial_number: u64) -> PathBuf {
    if !desired.exists() {
        return desired.to_path_buf();
    }

    let dir = desired.parent().unwrap_or_else(|| Path::new(""));
    let stem = desired
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = desired
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut n = initial_number;
    loop {
        let candidate = dir.join(format!("{stem}_{n}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
#[path = "../tests/unit/naming/naming.rs"]
mod tests;
