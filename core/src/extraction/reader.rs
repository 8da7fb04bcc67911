use super::catalog::{all_fields, extract_field};
use super::tags::{
    get_string_value, MODALITY, PATIENT_ID, SERIES_INSTANCE_UID, SOP_CLASS_UID,
    STUDY_INSTANCE_UID,
};
use crate::error::Result;
use crate::types::{FieldValue, GroupKey};
use dicom_dictionary_std::tags::PIXEL_DATA;
use dicom_object::{InMemDicomObject, OpenFileOptions};
use log::debug;
use std::collections::BTreeMap;
use std::path::Path;

static MISSING: FieldValue = FieldValue::Missing;

/// Header attributes of a recognized DICOM file
///
/// Identifiers are `None` when absent or blank. Descriptive fields are keyed
/// by DICOM keyword; see [`crate::extraction::catalog`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DicomHeader {
    pub patient_id: Option<String>,
    pub study_instance_uid: Option<String>,
    pub series_instance_uid: Option<String>,
    pub modality: Option<String>,
    pub sop_class_uid: Option<String>,
    pub fields: BTreeMap<&'static str, FieldValue>,
}

impl DicomHeader {
    /// Builds a header from an already-opened DICOM object
    pub fn from_dicom(dcm: &InMemDicomObject) -> Self {
        let non_blank = |value: Option<String>| value.filter(|s| !s.is_empty());

        Self {
            patient_id: non_blank(get_string_value(dcm, PATIENT_ID)),
            study_instance_uid: non_blank(get_string_value(dcm, STUDY_INSTANCE_UID)),
            series_instance_uid: non_blank(get_string_value(dcm, SERIES_INSTANCE_UID)),
            modality: non_blank(get_string_value(dcm, MODALITY)),
            sop_class_uid: non_blank(get_string_value(dcm, SOP_CLASS_UID)),
            fields: all_fields()
                .into_iter()
                .map(|spec| (spec.keyword, extract_field(dcm, spec)))
                .collect(),
        }
    }

    /// Returns the series identity, if all three identifiers are present
    pub fn group_key(&self) -> Option<GroupKey> {
        GroupKey::new(
            self.patient_id.as_deref(),
            self.study_instance_uid.as_deref(),
            self.series_instance_uid.as_deref(),
        )
    }

    /// Returns a descriptive field by keyword, `Missing` if unknown
    pub fn field(&self, keyword: &str) -> &FieldValue {
        self.fields.get(keyword).unwrap_or(&MISSING)
    }
}

/// Source of DICOM header information
///
/// Returns `None` when the file is not a recognized DICOM file; read errors
/// are never propagated.
pub trait MetadataReader {
    fn read(&self, path: &Path) -> Option<DicomHeader>;
}

impl<F> MetadataReader for F
where
    F: Fn(&Path) -> Option<DicomHeader>,
{
    fn read(&self, path: &Path) -> Option<DicomHeader> {
        self(path)
    }
}

/// Reads headers from DICOM Part 10 files on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct DicomFileReader;

impl DicomFileReader {
    /// Parses the header of a DICOM file, stopping before Pixel Data
    ///
    /// If the data set lacks SOPClassUID, the file meta group's Media
    /// Storage SOP Class UID is used instead.
    pub fn read_header(path: &Path) -> Result<DicomHeader> {
        let dcm = OpenFileOptions::new().read_until(PIXEL_DATA).open_file(path)?;
        let mut header = DicomHeader::from_dicom(&dcm);

        if header.sop_class_uid.is_none() {
            let media_class = dcm
                .meta()
                .media_storage_sop_class_uid
                .trim_matches(|c: char| c.is_whitespace() || c == '\0');
            if !media_class.is_empty() {
                header.sop_class_uid = Some(media_class.to_string());
            }
        }

        Ok(header)
    }
}

impl MetadataReader for DicomFileReader {
    fn read(&self, path: &Path) -> Option<DicomHeader> {
        match Self::read_header(path) {
            Ok(header) => Some(header),
            Err(e) => {
                debug!("Not a readable DICOM file {}: {}", path.display(), e);
                None
            }
        }
    }
}
