use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

/// Whether `path` ends in one of `extensions`. Matching is case-sensitive,
/// so `"jpg"` does not accept `photo.Jpg`.
pub fn has_allowed_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => extensions.iter().any(|allowed| allowed.as_ref() == ext),
        None => false,
    }
}

/// List regular files in `dir` whose extension is in `extensions`,
/// sorted by file name.
///
/// Symlinks are followed, so linked photos count as files. Subdirectories
/// are not descended into and dangling links are skipped.
pub fn list_images<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if has_allowed_extension(&path, extensions) {
            images.push(path);
        }
    }
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(dir = %dir.display(), count = images.len(), "Discovered images");
    Ok(images)
}
