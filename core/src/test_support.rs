//! Fixtures shared by unit tests

use crate::extraction::tags::*;
use crate::extraction::DicomHeader;
use dicom_core::{DataElement, PrimitiveValue, VR};
use dicom_object::{FileMetaTableBuilder, InMemDicomObject};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

const EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1";
const CT_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.2";
const MR_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.4";

static NEXT_INSTANCE: AtomicUsize = AtomicUsize::new(1);

/// Attributes of a synthetic DICOM file
#[derive(Debug, Clone)]
pub struct DicomFixture {
    pub patient_id: Option<String>,
    pub study_instance_uid: Option<String>,
    pub series_instance_uid: Option<String>,
    pub modality: Option<String>,
    pub sop_class_uid: String,
}

impl DicomFixture {
    pub fn ct(patient: &str, study: &str, series: &str) -> Self {
        Self {
            patient_id: Some(patient.to_string()),
            study_instance_uid: Some(study.to_string()),
            series_instance_uid: Some(series.to_string()),
            modality: Some("CT".to_string()),
            sop_class_uid: CT_IMAGE_STORAGE.to_string(),
        }
    }

    pub fn mr(patient: &str, study: &str, series: &str) -> Self {
        Self {
            modality: Some("MR".to_string()),
            sop_class_uid: MR_IMAGE_STORAGE.to_string(),
            ..Self::ct(patient, study, series)
        }
    }
}

fn put_str(dcm: &mut InMemDicomObject, tag: dicom_core::Tag, vr: VR, value: &str) {
    dcm.put(DataElement::new(tag, vr, PrimitiveValue::from(value)));
}

/// Writes a minimal DICOM Part 10 file, creating parent directories
pub fn write_dicom(path: &Path, fixture: &DicomFixture) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let sop_instance_uid = format!(
        "1.2.826.0.1.3680043.2.1125.{}",
        NEXT_INSTANCE.fetch_add(1, Ordering::SeqCst)
    );

    let mut dcm = InMemDicomObject::new_empty();
    put_str(&mut dcm, SOP_CLASS_UID, VR::UI, &fixture.sop_class_uid);
    put_str(&mut dcm, SOP_INSTANCE_UID, VR::UI, &sop_instance_uid);
    if let Some(ref patient) = fixture.patient_id {
        put_str(&mut dcm, PATIENT_ID, VR::LO, patient);
    }
    if let Some(ref study) = fixture.study_instance_uid {
        put_str(&mut dcm, STUDY_INSTANCE_UID, VR::UI, study);
    }
    if let Some(ref series) = fixture.series_instance_uid {
        put_str(&mut dcm, SERIES_INSTANCE_UID, VR::UI, series);
    }
    if let Some(ref modality) = fixture.modality {
        put_str(&mut dcm, MODALITY, VR::CS, modality);
    }
    put_str(&mut dcm, MANUFACTURER, VR::LO, "ACME");
    put_str(&mut dcm, SLICE_THICKNESS, VR::DS, "1.25");
    dcm.put(DataElement::new(ROWS, VR::US, PrimitiveValue::from(512_u16)));
    dcm.put(DataElement::new(COLUMNS, VR::US, PrimitiveValue::from(512_u16)));
    dcm.put(DataElement::new(
        PIXEL_SPACING,
        VR::DS,
        PrimitiveValue::Strs(vec!["0.5".to_string(), "0.5".to_string()].into()),
    ));

    let file_obj = dcm
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(fixture.sop_class_uid.as_str())
                .media_storage_sop_instance_uid(sop_instance_uid.as_str()),
        )
        .unwrap();
    file_obj.write_to_file(path).unwrap();
}

/// Reader recognizing text files of the form `DICM:<patient>|<study>|<series>`
///
/// Empty components are treated as absent; any other content is not DICOM.
pub fn stub_reader(path: &Path) -> Option<DicomHeader> {
    let content = fs::read_to_string(path).ok()?;
    let ids = content.lines().next()?.strip_prefix("DICM:")?;
    let mut parts = ids
        .split('|')
        .map(|s| Some(s.to_string()).filter(|s| !s.is_empty()));

    Some(DicomHeader {
        patient_id: parts.next().flatten(),
        study_instance_uid: parts.next().flatten(),
        series_instance_uid: parts.next().flatten(),
        ..Default::default()
    })
}

/// Writes a file recognized by [`stub_reader`]
///
/// A second line makes every file's content unique.
pub fn write_stub(path: &Path, patient: &str, study: &str, series: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let content = format!(
        "DICM:{}|{}|{}\n{}",
        patient,
        study,
        series,
        NEXT_INSTANCE.fetch_add(1, Ordering::SeqCst)
    );
    fs::write(path, content).unwrap();
}

/// Writes a file that no reader recognizes
pub fn write_other(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
