use log::{debug, warn};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Immediate contents of one visited directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListing {
    pub path: PathBuf,
    /// Names of subdirectories, sorted
    pub subdirs: Vec<OsString>,
    /// Names of non-directory entries, sorted
    pub files: Vec<OsString>,
}

impl DirListing {
    /// Full paths of the files in this directory
    pub fn file_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.files.iter().map(|name| self.path.join(name))
    }

    /// Whether this directory has no subdirectories
    pub fn is_leaf(&self) -> bool {
        self.subdirs.is_empty()
    }

    /// Whether files sit next to subdirectories, breaking one series per leaf
    pub fn is_mixed(&self) -> bool {
        !self.subdirs.is_empty() && !self.files.is_empty()
    }
}

/// Depth-first, preorder traversal of a directory tree
///
/// Yields one [`DirListing`] per directory, lazily. Directories that vanish
/// or cannot be listed during the walk are skipped. Symbolic links to
/// directories are listed as subdirectories but never descended into.
///
/// # Example
///
/// ```no_run
/// use dicomsort_core::TreeWalker;
///
/// for listing in TreeWalker::new("/data/scans") {
///     println!("{}: {} files", listing.path.display(), listing.files.len());
/// }
/// ```
#[derive(Debug)]
pub struct TreeWalker {
    pending: Vec<PathBuf>,
}

impl TreeWalker {
    /// Starts a new traversal at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            pending: vec![root.into()],
        }
    }

    fn list(path: &Path) -> std::io::Result<DirListing> {
        let mut subdirs = Vec::new();
        let mut files = Vec::new();

        for entry in fs::read_dir(path)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry in {}: {}", path.display(), e);
                    continue;
                }
            };

            // Follow symlinks for classification only
            let is_dir = fs::metadata(entry.path())
                .map(|m| m.is_dir())
                .unwrap_or(false);

            if is_dir {
                subdirs.push(entry.file_name());
            } else {
                files.push(entry.file_name());
            }
        }

        subdirs.sort();
        files.sort();

        Ok(DirListing {
            path: path.to_path_buf(),
            subdirs,
            files,
        })
    }
}

impl Iterator for TreeWalker {
    type Item = DirListing;

    fn next(&mut self) -> Option<DirListing> {
        while let Some(path) = self.pending.pop() {
            let listing = match Self::list(&path) {
                Ok(listing) => listing,
                Err(e) => {
                    debug!("Skipping directory {}: {}", path.display(), e);
                    continue;
                }
            };

            // Reverse push so subdirectories are visited in name order
            for name in listing.subdirs.iter().rev() {
                let child = path.join(name);
                let is_symlink = fs::symlink_metadata(&child)
                    .map(|m| m.file_type().is_symlink())
                    .unwrap_or(true);
                if !is_symlink {
                    self.pending.push(child);
                }
            }

            return Some(listing);
        }

        None
    }
}

/// Finds all directories under `root` (inclusive) with no subdirectories
///
/// Logs a warning for every directory holding both files and
/// subdirectories, since such a directory may mix series.
pub fn find_leaves(root: &Path) -> Vec<PathBuf> {
    let mut leaves = Vec::new();

    for listing in TreeWalker::new(root) {
        if listing.is_mixed() {
            warn!(
                "Directory structure may not be standard! Found files in a non-leaf directory {}",
                listing.path.display()
            );
        }
        if listing.is_leaf() {
            leaves.push(listing.path);
        }
    }

    leaves
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn make_tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/x")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        File::create(root.join("top.txt")).unwrap();
        File::create(root.join("a/x/1.dcm")).unwrap();
        File::create(root.join("a/x/2.dcm")).unwrap();
        File::create(root.join("b/3.dcm")).unwrap();
        temp_dir
    }

    #[test]
    fn test_walk_depth_first_order() {
        let temp_dir = make_tree();
        let root = temp_dir.path();

        let visited: Vec<PathBuf> = TreeWalker::new(root).map(|l| l.path).collect();
        assert_eq!(
            visited,
            vec![
                root.to_path_buf(),
                root.join("a"),
                root.join("a/x"),
                root.join("b"),
            ]
        );
    }

    #[test]
    fn test_walk_listing_contents() {
        let temp_dir = make_tree();
        let root = temp_dir.path();

        let first = TreeWalker::new(root).next().unwrap();
        assert_eq!(first.subdirs, vec![OsString::from("a"), OsString::from("b")]);
        assert_eq!(first.files, vec![OsString::from("top.txt")]);
        assert_eq!(first.file_paths().collect::<Vec<_>>(), vec![root.join("top.txt")]);
    }

    #[test]
    fn test_walk_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let walker = TreeWalker::new(temp_dir.path().join("does-not-exist"));
        assert_eq!(walker.count(), 0);
    }

    #[test]
    fn test_walk_tolerates_vanished_directory() {
        let temp_dir = make_tree();
        let root = temp_dir.path();

        let mut walker = TreeWalker::new(root);
        let first = walker.next().unwrap();
        assert_eq!(first.path, root);

        // Remove a pending subtree mid-walk
        fs::remove_dir_all(root.join("a")).unwrap();

        let rest: Vec<PathBuf> = walker.map(|l| l.path).collect();
        assert_eq!(rest, vec![root.join("b")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_does_not_follow_symlinked_dirs() {
        let temp_dir = make_tree();
        let root = temp_dir.path();
        std::os::unix::fs::symlink(root.join("a"), root.join("link")).unwrap();

        let listings: Vec<DirListing> = TreeWalker::new(root).collect();
        assert!(listings[0].subdirs.contains(&OsString::from("link")));
        assert!(listings.iter().all(|l| l.path != root.join("link")));
    }

    #[test]
    fn test_find_leaves() {
        let temp_dir = make_tree();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("empty")).unwrap();

        let leaves = find_leaves(root);
        assert_eq!(
            leaves,
            vec![root.join("a/x"), root.join("b"), root.join("empty")]
        );
    }

    #[test]
    fn test_mixed_directory_is_flagged_but_not_a_leaf() {
        let temp_dir = make_tree();
        let root = temp_dir.path();
        File::create(root.join("a/stray.dcm")).unwrap();

        let mixed: Vec<PathBuf> = TreeWalker::new(root)
            .filter(DirListing::is_mixed)
            .map(|l| l.path)
            .collect();
        assert_eq!(mixed, vec![root.to_path_buf(), root.join("a")]);

        let leaves = find_leaves(root);
        assert!(!leaves.contains(&root.join("a")));
        assert_eq!(leaves, vec![root.join("a/x"), root.join("b")]);
    }

    #[test]
    fn test_find_leaves_root_only() {
        let temp_dir = TempDir::new().unwrap();
        File::create(temp_dir.path().join("1.dcm")).unwrap();

        assert_eq!(find_leaves(temp_dir.path()), vec![temp_dir.path().to_path_buf()]);
    }
}
