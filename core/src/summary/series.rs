use crate::extraction::{DicomHeader, MetadataReader, Modality};
use crate::organize::{find_leaves, TreeWalker};
use crate::types::FieldValue;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Descriptive values of one series, taken from a representative file
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SeriesSummary {
    pub modality: Modality,
    /// Catalog values in catalog order
    pub fields: Vec<(&'static str, FieldValue)>,
    /// Leaf directory holding the series
    pub location: PathBuf,
}

impl SeriesSummary {
    fn from_header(modality: Modality, header: &DicomHeader, location: &Path) -> Self {
        let fields = modality
            .fields()
            .iter()
            .map(|spec| (spec.keyword, header.field(spec.keyword).clone()))
            .collect();

        Self {
            modality,
            fields,
            location: location.to_path_buf(),
        }
    }

    /// Value of a catalog field; `Missing` if outside this row's catalog
    pub fn get(&self, keyword: &str) -> &FieldValue {
        static MISSING: FieldValue = FieldValue::Missing;
        self.fields
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, v)| v)
            .unwrap_or(&MISSING)
    }
}

/// Summarizes every leaf directory under `root`
pub fn summarize<R: MetadataReader + ?Sized>(root: &Path, reader: &R) -> Vec<SeriesSummary> {
    let leaves = find_leaves(root);
    info!("Found {} leaf directories under {}", leaves.len(), root.display());

    summarize_leaves(reader, &leaves, |_| {})
}

/// Summarizes the given leaf directories in order
///
/// `on_leaf` is called after each leaf, whether or not it yielded a row.
pub fn summarize_leaves<R, F>(reader: &R, leaves: &[PathBuf], mut on_leaf: F) -> Vec<SeriesSummary>
where
    R: MetadataReader + ?Sized,
    F: FnMut(&Path),
{
    let mut summaries = Vec::new();
    for leaf in leaves {
        if let Some(summary) = summarize_leaf(reader, leaf) {
            summaries.push(summary);
        }
        on_leaf(leaf);
    }
    summaries
}

/// Picks a representative file of a leaf directory
///
/// Files are scanned in name order. The first CT image wins; failing that,
/// the first MR image. A leaf with neither yields `None`.
pub fn summarize_leaf<R: MetadataReader + ?Sized>(reader: &R, dir: &Path) -> Option<SeriesSummary> {
    let files: Vec<PathBuf> = TreeWalker::new(dir)
        .next()
        .map(|listing| listing.file_paths().collect())
        .unwrap_or_default();

    let mut first_mr = None;
    for path in &files {
        let Some(header) = reader.read(path) else {
            continue;
        };
        let Some(uid) = header.sop_class_uid.as_deref() else {
            continue;
        };

        if Modality::Ct.matches_sop_class(uid) {
            return Some(summary_of(Modality::Ct, &header, dir));
        }
        if first_mr.is_none() && Modality::Mr.matches_sop_class(uid) {
            first_mr = Some(header);
        }
    }

    match first_mr {
        Some(header) => Some(summary_of(Modality::Mr, &header, dir)),
        None => {
            debug!("No CT or MR image in {}", dir.display());
            None
        }
    }
}

fn summary_of(modality: Modality, header: &DicomHeader, dir: &Path) -> SeriesSummary {
    check_modality_tag(modality, header, dir);
    SeriesSummary::from_header(modality, header, dir)
}

fn check_modality_tag(expected: Modality, header: &DicomHeader, dir: &Path) {
    match header.modality.as_deref() {
        Some(value) if expected.matches_modality_tag(value) => {}
        Some(value) => warn!(
            "Modality {} does not match {} storage class in {}",
            value,
            expected,
            dir.display()
        ),
        None => warn!("Modality is missing in {}", dir.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::DicomFileReader;
    use crate::test_support::{write_dicom, write_other, DicomFixture};
    use tempfile::TempDir;

    #[test]
    fn test_summarize_ct_leaf() {
        let temp_dir = TempDir::new().unwrap();
        let leaf = temp_dir.path().join("P1/S1/E1");
        write_dicom(&leaf.join("IM1.dcm"), &DicomFixture::ct("P1", "1.2.3", "1.2.3.4"));

        let summary = summarize_leaf(&DicomFileReader, &leaf).unwrap();

        assert_eq!(summary.modality, Modality::Ct);
        assert_eq!(summary.location, leaf);
        assert_eq!(summary.fields.len(), Modality::Ct.fields().len());
        assert_eq!(summary.get("PatientID"), &FieldValue::Text("P1".to_string()));
        assert_eq!(summary.get("SliceThickness"), &FieldValue::Float(1.25));
        assert_eq!(summary.get("Manufacturer"), &FieldValue::Text("ACME".to_string()));
        assert!(summary.get("KVP").is_missing());
        // MR-only fields are outside the CT catalog
        assert!(summary.get("EchoTime").is_missing());
    }

    #[test]
    fn test_ct_preferred_over_mr() {
        let temp_dir = TempDir::new().unwrap();
        let leaf = temp_dir.path().join("mixed");
        write_dicom(&leaf.join("a.dcm"), &DicomFixture::mr("P1", "1.2", "1.2.1"));
        write_dicom(&leaf.join("b.dcm"), &DicomFixture::ct("P1", "1.2", "1.2.2"));

        let summary = summarize_leaf(&DicomFileReader, &leaf).unwrap();

        assert_eq!(summary.modality, Modality::Ct);
        assert_eq!(summary.get("SeriesInstanceUID"), &FieldValue::Text("1.2.2".to_string()));
    }

    #[test]
    fn test_first_file_by_name_wins() {
        let temp_dir = TempDir::new().unwrap();
        let leaf = temp_dir.path().join("series");
        write_dicom(&leaf.join("b.dcm"), &DicomFixture::ct("P2", "1.2", "1.2.1"));
        write_dicom(&leaf.join("a.dcm"), &DicomFixture::ct("P1", "1.2", "1.2.1"));

        let summary = summarize_leaf(&DicomFileReader, &leaf).unwrap();

        assert_eq!(summary.get("PatientID"), &FieldValue::Text("P1".to_string()));
    }

    #[test]
    fn test_mr_leaf() {
        let temp_dir = TempDir::new().unwrap();
        let leaf = temp_dir.path().join("mr");
        write_other(&leaf.join("notes.txt"), "not dicom");
        write_dicom(&leaf.join("IM1"), &DicomFixture::mr("P1", "1.2", "1.2.1"));

        let summary = summarize_leaf(&DicomFileReader, &leaf).unwrap();

        assert_eq!(summary.modality, Modality::Mr);
        assert_eq!(summary.fields.len(), Modality::Mr.fields().len());
    }

    #[test]
    fn test_leaf_without_images() {
        let temp_dir = TempDir::new().unwrap();
        let leaf = temp_dir.path().join("other");
        write_other(&leaf.join("notes.txt"), "not dicom");

        let mut fixture = DicomFixture::ct("P1", "1.2", "1.2.1");
        fixture.sop_class_uid = "1.2.840.10008.5.1.4.1.1.20".to_string();
        write_dicom(&leaf.join("pet.dcm"), &fixture);

        assert!(summarize_leaf(&DicomFileReader, &leaf).is_none());
    }

    #[test]
    fn test_mismatched_modality_still_summarized() {
        let temp_dir = TempDir::new().unwrap();
        let leaf = temp_dir.path().join("odd");
        let mut fixture = DicomFixture::ct("P1", "1.2", "1.2.1");
        fixture.modality = None;
        write_dicom(&leaf.join("IM1"), &fixture);

        let summary = summarize_leaf(&DicomFileReader, &leaf).unwrap();

        assert_eq!(summary.modality, Modality::Ct);
        assert!(summary.get("Modality").is_missing());
    }

    #[test]
    fn test_summarize_leaves_reports_every_leaf() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_dicom(&root.join("ct/IM1"), &DicomFixture::ct("P1", "1.2", "1.2.1"));
        write_other(&root.join("notes/readme"), "text");
        let leaves = find_leaves(root);

        let mut visited = Vec::new();
        let summaries = summarize_leaves(&DicomFileReader, &leaves, |leaf| {
            visited.push(leaf.to_path_buf())
        });

        assert_eq!(summaries.len(), 1);
        assert_eq!(visited, vec![root.join("ct"), root.join("notes")]);
    }

    #[test]
    fn test_summarize_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_dicom(
            &root.join("dicoms/P1/S1/E1/IM1.dcm"),
            &DicomFixture::ct("P1", "1.2", "1.2.1"),
        );
        write_dicom(
            &root.join("dicoms/P1/S1/E2/IM1.dcm"),
            &DicomFixture::mr("P1", "1.2", "1.2.2"),
        );
        write_other(&root.join("other/readme"), "text");

        let summaries = summarize(root, &DicomFileReader);

        let locations: Vec<PathBuf> = summaries.iter().map(|s| s.location.clone()).collect();
        assert_eq!(
            locations,
            vec![root.join("dicoms/P1/S1/E1"), root.join("dicoms/P1/S1/E2")]
        );
        assert_eq!(summaries[0].modality, Modality::Ct);
        assert_eq!(summaries[1].modality, Modality::Mr);
    }
}
