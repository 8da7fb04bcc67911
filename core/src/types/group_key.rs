use std::fmt;
use std::path::PathBuf;

/// Identity of a DICOM series on disk: (PatientID, StudyInstanceUID, SeriesInstanceUID)
///
/// Two files with equal keys belong in the same target directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct GroupKey {
    pub patient_id: String,
    pub study_id: String,
    pub series_id: String,
}

impl GroupKey {
    /// Creates a key from the three identifiers
    ///
    /// Returns `None` if any identifier is absent or blank.
    ///
    /// # Example
    ///
    /// ```
    /// use dicomsort_core::GroupKey;
    ///
    /// let key = GroupKey::new(Some("P1"), Some("S1"), Some("E1")).unwrap();
    /// assert_eq!(key.relative_dir(), std::path::PathBuf::from("P1/S1/E1"));
    ///
    /// assert!(GroupKey::new(None, Some("S1"), Some("E1")).is_none());
    /// assert!(GroupKey::new(Some("  "), Some("S1"), Some("E1")).is_none());
    /// ```
    pub fn new(patient_id: Option<&str>, study_id: Option<&str>, series_id: Option<&str>) -> Option<Self> {
        let present = |s: Option<&str>| {
            s.map(|s| s.trim_matches(|c: char| c.is_whitespace() || c == '\0'))
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Some(Self {
            patient_id: present(patient_id)?,
            study_id: present(study_id)?,
            series_id: present(series_id)?,
        })
    }

    /// Relative directory `<patient>/<study>/<series>` with each component sanitized
    pub fn relative_dir(&self) -> PathBuf {
        [&self.patient_id, &self.study_id, &self.series_id]
            .iter()
            .map(|c| sanitize_component(c))
            .collect()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.patient_id, self.study_id, self.series_id)
    }
}

/// Makes an identifier safe to use as a single path component
///
/// Separators and NUL become `_`; `.` and `..` become `_`.
pub fn sanitize_component(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();

    match cleaned.as_str() {
        "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

/// Outcome of classifying a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileClassification {
    /// DICOM file with all three identifiers
    Structured(GroupKey),
    /// DICOM file missing at least one identifier
    Uncategorized,
    /// Not a recognized DICOM file
    Other,
}

impl FileClassification {
    /// Whether the file was recognized as DICOM
    pub fn is_dicom(&self) -> bool {
        !matches!(self, FileClassification::Other)
    }
}
