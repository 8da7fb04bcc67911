use crate::extraction::MetadataReader;
use crate::types::FileClassification;
use log::warn;
use std::path::Path;

/// Classifies a file by its DICOM identifiers
///
/// - Not recognized by the reader: [`FileClassification::Other`]
/// - Recognized, but PatientID, StudyInstanceUID or SeriesInstanceUID
///   absent: [`FileClassification::Uncategorized`]
/// - Otherwise: [`FileClassification::Structured`]
pub fn classify<R: MetadataReader + ?Sized>(reader: &R, path: &Path) -> FileClassification {
    let Some(header) = reader.read(path) else {
        return FileClassification::Other;
    };

    match header.group_key() {
        Some(key) => FileClassification::Structured(key),
        None => {
            warn!(
                "At least one of PatientID, StudyInstanceUID or SeriesInstanceUID is missing in file {}",
                path.display()
            );
            FileClassification::Uncategorized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{stub_reader, write_other, write_stub};
    use crate::types::GroupKey;
    use tempfile::TempDir;

    #[test]
    fn test_classify_structured() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("f1");
        write_stub(&path, "P1", "S1", "E1");

        assert_eq!(
            classify(&stub_reader, &path),
            FileClassification::Structured(GroupKey::new(Some("P1"), Some("S1"), Some("E1")).unwrap())
        );
    }

    #[test]
    fn test_classify_uncategorized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("f1");
        write_stub(&path, "", "S1", "E1");

        assert_eq!(classify(&stub_reader, &path), FileClassification::Uncategorized);
    }

    #[test]
    fn test_classify_other() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        write_other(&path, "hello");

        assert_eq!(classify(&stub_reader, &path), FileClassification::Other);
    }

    #[test]
    fn test_classify_unreadable_is_other() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing");

        assert_eq!(classify(&stub_reader, &path), FileClassification::Other);
    }
}
