use crate::types::{FileClassification, GroupKey};
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Directory under the target root holding all DICOM files
pub const DICOM_DIR: &str = "dicoms";

/// Directory under [`DICOM_DIR`] for DICOM files lacking identifiers
pub const UNCATEGORIZED_DIR: &str = "UNCATEGORIZED";

/// Directory under the target root for unrecognized files
pub const OTHER_DIR: &str = "other";

/// Where a group of files ends up in the canonical hierarchy
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Destination {
    /// `dicoms/<patient>/<study>/<series>`
    Series(GroupKey),
    /// `dicoms/UNCATEGORIZED`
    Uncategorized,
    /// `other`
    Other,
}

impl Destination {
    /// Target directory of this destination under `root`
    pub fn target_dir(&self, root: &Path) -> PathBuf {
        match self {
            Destination::Series(key) => root.join(DICOM_DIR).join(key.relative_dir()),
            Destination::Uncategorized => root.join(DICOM_DIR).join(UNCATEGORIZED_DIR),
            Destination::Other => root.join(OTHER_DIR),
        }
    }

    /// Whether files sent here are DICOM files
    pub fn holds_dicom(&self) -> bool {
        !matches!(self, Destination::Other)
    }
}

impl From<FileClassification> for Destination {
    fn from(classification: FileClassification) -> Self {
        match classification {
            FileClassification::Structured(key) => Destination::Series(key),
            FileClassification::Uncategorized => Destination::Uncategorized,
            FileClassification::Other => Destination::Other,
        }
    }
}

/// Checks whether a file name already ends with `.<extension>` (case-insensitive)
pub fn has_extension(name: &OsStr, extension: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Appends `.<extension>` unless the name already carries it
///
/// # Example
///
/// ```
/// use dicomsort_core::organize::with_extension;
/// use std::ffi::OsStr;
///
/// assert_eq!(with_extension(OsStr::new("IM0001"), "dcm"), "IM0001.dcm");
/// assert_eq!(with_extension(OsStr::new("IM0001.dcm"), "dcm"), "IM0001.dcm");
/// assert_eq!(with_extension(OsStr::new("IM.0001"), "dcm"), "IM.0001.dcm");
/// ```
pub fn with_extension(name: &OsStr, extension: &str) -> OsString {
    let mut name = name.to_os_string();
    if !has_extension(&name, extension) {
        name.push(".");
        name.push(extension);
    }
    name
}

/// A single file scheduled to move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub source: PathBuf,
    /// File name at the destination
    pub file_name: OsString,
}

/// Moves to perform, grouped by destination
///
/// Destinations iterate in a stable order (series by key, then the
/// UNCATEGORIZED bucket, then other); files keep the order they were added.
#[derive(Debug, Clone)]
pub struct MovePlan {
    target_root: PathBuf,
    extension: String,
    groups: BTreeMap<Destination, Vec<PlannedMove>>,
}

impl MovePlan {
    /// Creates an empty plan targeting `target_root`
    pub fn new(target_root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            target_root: target_root.into(),
            extension: extension.to_string(),
            groups: BTreeMap::new(),
        }
    }

    /// Schedules a classified file
    ///
    /// DICOM files get the canonical extension; other files keep their name.
    /// Paths without a file name are ignored.
    pub fn add(&mut self, source: PathBuf, classification: FileClassification) {
        let Some(name) = source.file_name() else {
            return;
        };

        let destination = Destination::from(classification);
        let file_name = if destination.holds_dicom() {
            with_extension(name, &self.extension)
        } else {
            name.to_os_string()
        };

        self.groups
            .entry(destination)
            .or_default()
            .push(PlannedMove { source, file_name });
    }

    /// Root of the canonical hierarchy
    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    /// Target directory for a destination
    pub fn target_dir(&self, destination: &Destination) -> PathBuf {
        destination.target_dir(&self.target_root)
    }

    /// Groups in destination order
    pub fn groups(&self) -> impl Iterator<Item = (&Destination, &[PlannedMove])> {
        self.groups.iter().map(|(d, moves)| (d, moves.as_slice()))
    }

    /// Files scheduled for a destination
    pub fn moves_for(&self, destination: &Destination) -> &[PlannedMove] {
        self.groups
            .get(destination)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct series
    pub fn series_count(&self) -> usize {
        self.groups
            .keys()
            .filter(|d| matches!(d, Destination::Series(_)))
            .count()
    }

    /// Total number of scheduled files
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
