use crate::error::{DicomSortError, Result};
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::Path;

/// Moves a file without ever overwriting the target
///
/// The file is first hard-linked to the target, which fails atomically if
/// the target exists, and the source is unlinked afterwards. When linking is
/// not possible (different filesystems, no hard link support) the content is
/// copied into a newly created file, synced and size-checked before the
/// source is removed.
///
/// On error the source is left in place and a partially written target is
/// removed.
///
/// # Errors
///
/// - [`DicomSortError::TargetExists`] if the target path is occupied
/// - [`DicomSortError::CopyMismatch`] if the copied size differs
/// - [`DicomSortError::IoError`] for any other failure
pub fn move_file(source: &Path, target: &Path) -> Result<()> {
    if fs::symlink_metadata(target).is_ok() {
        return Err(DicomSortError::TargetExists(target.to_path_buf()));
    }

    match fs::hard_link(source, target) {
        Ok(()) => remove_source(source, target),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Err(DicomSortError::TargetExists(target.to_path_buf()))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(e.into()),
        Err(e) => {
            debug!(
                "Cannot link {} to {} ({}), copying instead",
                source.display(),
                target.display(),
                e
            );
            copy_then_remove(source, target)
        }
    }
}

fn copy_then_remove(source: &Path, target: &Path) -> Result<()> {
    let expected = fs::metadata(source)?.len();
    let mut reader = File::open(source)?;

    let mut writer = match OpenOptions::new().write(true).create_new(true).open(target) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(DicomSortError::TargetExists(target.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let copied = io::copy(&mut reader, &mut writer).and_then(|_| writer.sync_all());
    drop(writer);
    if let Err(e) = copied {
        discard(target);
        return Err(e.into());
    }

    let found = fs::metadata(target)?.len();
    if found != expected {
        discard(target);
        return Err(DicomSortError::CopyMismatch {
            path: target.to_path_buf(),
            expected,
            found,
        });
    }

    remove_source(source, target)
}

/// Unlinks the source once the target holds the data; undoes the target on failure
fn remove_source(source: &Path, target: &Path) -> Result<()> {
    if let Err(e) = fs::remove_file(source) {
        discard(target);
        return Err(e.into());
    }
    Ok(())
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        debug!("Could not remove {}: {}", path.display(), e);
    }
}
