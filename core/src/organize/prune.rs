use log::{debug, warn};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Removes empty subdirectories under `root`, children before parents
///
/// The root itself is never removed. Directories that still hold entries
/// are left alone; listing and removal errors are logged and skipped.
/// Symbolic links are not followed.
///
/// Returns the number of directories removed.
pub fn remove_empty_subdirs(root: &Path) -> usize {
    let mut removed = 0;

    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping during cleanup: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        match fs::remove_dir(path) {
            Ok(()) => {
                debug!("Removed empty directory {}", path.display());
                removed += 1;
            }
            Err(_) if is_non_empty(path) => {
                debug!("path {} is not empty", path.display());
            }
            Err(e) => {
                warn!("Could not remove directory {}: {}", path.display(), e);
            }
        }
    }

    removed
}

fn is_non_empty(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
