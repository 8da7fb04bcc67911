//! Descriptive field catalogs for CT and MR series
//!
//! Each modality has a fixed list of attributes reported in the series
//! summary. Values are coerced independently: a type mismatch in one field
//! degrades that field to [`FieldValue::Missing`] without affecting the rest.

use super::tags::*;
use crate::types::{parse_float_list, FieldKind, FieldValue};
use dicom_core::Tag;
use dicom_object::InMemDicomObject;
use log::debug;
use std::fmt;

/// A descriptive attribute reported in the series summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// DICOM keyword, also used as the summary column name
    pub keyword: &'static str,
    pub tag: Tag,
    pub kind: FieldKind,
}

const fn field(keyword: &'static str, tag: Tag, kind: FieldKind) -> FieldSpec {
    FieldSpec { keyword, tag, kind }
}

/// Attributes reported for CT series
pub const CT_FIELDS: &[FieldSpec] = &[
    field("SeriesInstanceUID", SERIES_INSTANCE_UID, FieldKind::Text),
    field("StudyInstanceUID", STUDY_INSTANCE_UID, FieldKind::Text),
    field("PatientName", PATIENT_NAME, FieldKind::Text),
    field("PatientID", PATIENT_ID, FieldKind::Text),
    field("Modality", MODALITY, FieldKind::Text),
    field("PatientSex", PATIENT_SEX, FieldKind::Text),
    field("SliceThickness", SLICE_THICKNESS, FieldKind::Float),
    field("PixelSpacing", PIXEL_SPACING, FieldKind::FloatArray),
    field("ConvolutionKernel", CONVOLUTION_KERNEL, FieldKind::Text),
    field("Rows", ROWS, FieldKind::Int),
    field("Columns", COLUMNS, FieldKind::Int),
    field("Manufacturer", MANUFACTURER, FieldKind::Text),
    field("InstitutionName", INSTITUTION_NAME, FieldKind::Text),
    field("StudyDescription", STUDY_DESCRIPTION, FieldKind::Text),
    field("SeriesDescription", SERIES_DESCRIPTION, FieldKind::Text),
    field("KVP", KVP, FieldKind::Float),
    field("Exposure", EXPOSURE, FieldKind::Int),
    field("AccessionNumber", ACCESSION_NUMBER, FieldKind::Text),
    field("ImageType", IMAGE_TYPE, FieldKind::Text),
];

/// Attributes reported for MR series
pub const MR_FIELDS: &[FieldSpec] = &[
    field("SeriesInstanceUID", SERIES_INSTANCE_UID, FieldKind::Text),
    field("StudyInstanceUID", STUDY_INSTANCE_UID, FieldKind::Text),
    field("PatientName", PATIENT_NAME, FieldKind::Text),
    field("PatientID", PATIENT_ID, FieldKind::Text),
    field("Modality", MODALITY, FieldKind::Text),
    field("PatientSex", PATIENT_SEX, FieldKind::Text),
    field("SliceThickness", SLICE_THICKNESS, FieldKind::Float),
    field("PixelSpacing", PIXEL_SPACING, FieldKind::FloatArray),
    field("Rows", ROWS, FieldKind::Int),
    field("Columns", COLUMNS, FieldKind::Int),
    field("Manufacturer", MANUFACTURER, FieldKind::Text),
    field("InstitutionName", INSTITUTION_NAME, FieldKind::Text),
    field("StudyDescription", STUDY_DESCRIPTION, FieldKind::Text),
    field("SeriesDescription", SERIES_DESCRIPTION, FieldKind::Text),
    field("MagneticFieldStrength", MAGNETIC_FIELD_STRENGTH, FieldKind::Float),
    field("EchoTime", ECHO_TIME, FieldKind::Float),
    field("InversionTime", INVERSION_TIME, FieldKind::Float),
    field("ImagedNucleus", IMAGED_NUCLEUS, FieldKind::Text),
    field("ImagingFrequency", IMAGING_FREQUENCY, FieldKind::Float),
    field("NumberOfAverages", NUMBER_OF_AVERAGES, FieldKind::Int),
    field("SpacingBetweenSlices", SPACING_BETWEEN_SLICES, FieldKind::Float),
    field("EchoTrainLength", ECHO_TRAIN_LENGTH, FieldKind::Int),
    field("AccessionNumber", ACCESSION_NUMBER, FieldKind::Text),
    field("ImageType", IMAGE_TYPE, FieldKind::Text),
    field("PercentSampling", PERCENT_SAMPLING, FieldKind::Float),
    field("PercentPhaseFieldOfView", PERCENT_PHASE_FIELD_OF_VIEW, FieldKind::Float),
    field("PixelBandwidth", PIXEL_BANDWIDTH, FieldKind::Float),
    field("ContrastBolusAgent", CONTRAST_BOLUS_AGENT, FieldKind::Text),
    field("ReconstructionDiameter", RECONSTRUCTION_DIAMETER, FieldKind::Float),
];

/// Imaging modality covered by the series summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum Modality {
    Ct,
    Mr,
}

impl Modality {
    /// Modalities in the order a leaf directory is probed
    pub const ALL: [Modality; 2] = [Modality::Ct, Modality::Mr];

    /// Image Storage SOP Class UID (root of the class arc)
    pub fn storage_sop_class(&self) -> &'static str {
        match self {
            Modality::Ct => "1.2.840.10008.5.1.4.1.1.2",
            Modality::Mr => "1.2.840.10008.5.1.4.1.1.4",
        }
    }

    /// Short name as found in the Modality attribute
    pub fn simple_name(&self) -> &'static str {
        match self {
            Modality::Ct => "CT",
            Modality::Mr => "MR",
        }
    }

    /// Catalog of attributes reported for this modality
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Modality::Ct => CT_FIELDS,
            Modality::Mr => MR_FIELDS,
        }
    }

    /// Checks whether a SOP Class UID belongs to this modality's storage arc
    ///
    /// Matches the storage class itself and its sub-arcs (e.g. Enhanced CT
    /// `1.2.840.10008.5.1.4.1.1.2.1`), but not unrelated classes sharing a
    /// textual prefix such as `1.2.840.10008.5.1.4.1.1.20`.
    ///
    /// # Example
    ///
    /// ```
    /// use dicomsort_core::Modality;
    ///
    /// assert!(Modality::Ct.matches_sop_class("1.2.840.10008.5.1.4.1.1.2"));
    /// assert!(Modality::Ct.matches_sop_class("1.2.840.10008.5.1.4.1.1.2.1"));
    /// assert!(!Modality::Ct.matches_sop_class("1.2.840.10008.5.1.4.1.1.20"));
    /// ```
    pub fn matches_sop_class(&self, uid: &str) -> bool {
        let root = self.storage_sop_class();
        uid.strip_prefix(root)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
    }

    /// Checks whether a Modality attribute value agrees with this modality
    pub fn matches_modality_tag(&self, value: &str) -> bool {
        value.to_uppercase().contains(self.simple_name())
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Union of all catalogs: CT fields in order, then MR-only fields
pub fn all_fields() -> Vec<&'static FieldSpec> {
    let mut fields: Vec<&'static FieldSpec> = CT_FIELDS.iter().collect();
    for spec in MR_FIELDS {
        if !fields.iter().any(|f| f.keyword == spec.keyword) {
            fields.push(spec);
        }
    }
    fields
}

/// Reads and coerces a single catalog field
///
/// Absent attributes and coercion failures both yield [`FieldValue::Missing`].
pub fn extract_field(dcm: &InMemDicomObject, spec: &FieldSpec) -> FieldValue {
    if !has_tag(dcm, spec.tag) {
        return FieldValue::Missing;
    }

    let value = match spec.kind {
        FieldKind::Text => get_string_value(dcm, spec.tag).map(FieldValue::Text),
        FieldKind::Float => get_float_value(dcm, spec.tag).map(FieldValue::Float),
        FieldKind::Int => get_int_value(dcm, spec.tag).map(FieldValue::Int),
        FieldKind::FloatArray => get_float_list_value(dcm, spec.tag)
            .or_else(|| get_string_value(dcm, spec.tag).and_then(|s| parse_float_list(&s)))
            .map(FieldValue::FloatArray),
    };

    value.unwrap_or_else(|| {
        debug!(
            "Could not coerce {} to {:?}, marking as missing",
            spec.keyword, spec.kind
        );
        FieldValue::Missing
    })
}
