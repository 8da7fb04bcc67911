use std::path::PathBuf;
use thiserror::Error;

/// Result type for dicomsort operations
pub type Result<T> = std::result::Result<T, DicomSortError>;

/// Error types for dicomsort operations
#[derive(Error, Debug)]
pub enum DicomSortError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Path given as a tree root is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Source and destination trees overlap
    #[error(
        "Source {} and destination {} overlap",
        source_root.display(),
        destination.display()
    )]
    OverlappingTrees {
        source_root: PathBuf,
        destination: PathBuf,
    },

    /// Move target is already occupied
    #[error("Target already exists: {}", .0.display())]
    TargetExists(PathBuf),

    /// Copied file does not match its source
    #[error(
        "Copy of {} is incomplete: expected {expected} bytes, found {found}",
        path.display()
    )]
    CopyMismatch {
        path: PathBuf,
        expected: u64,
        found: u64,
    },

    /// CSV output error
    #[error("CSV error: {0}")]
    CsvError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DicomSortError {
    /// Whether this error is a refusal to overwrite an existing file
    pub fn is_collision(&self) -> bool {
        matches!(self, DicomSortError::TargetExists(_))
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for DicomSortError {
    fn from(e: dicom_object::ReadError) -> Self {
        DicomSortError::DicomError(format!("{}", e))
    }
}

impl From<csv::Error> for DicomSortError {
    fn from(e: csv::Error) -> Self {
        DicomSortError::CsvError(format!("{}", e))
    }
}
