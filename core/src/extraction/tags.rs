use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Identification Tags
pub const SOP_CLASS_UID: Tag = Tag(0x0008, 0x0016);
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
pub const ACCESSION_NUMBER: Tag = Tag(0x0008, 0x0050);

// Core Image Tags
pub const IMAGE_TYPE: Tag = Tag(0x0008, 0x0008);
pub const MODALITY: Tag = Tag(0x0008, 0x0060);

// Patient Tags
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
pub const PATIENT_SEX: Tag = Tag(0x0010, 0x0040);

// Image Geometry Tags
pub const ROWS: Tag = Tag(0x0028, 0x0010);
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);
pub const PIXEL_SPACING: Tag = Tag(0x0028, 0x0030);
pub const SLICE_THICKNESS: Tag = Tag(0x0018, 0x0050);
pub const SPACING_BETWEEN_SLICES: Tag = Tag(0x0018, 0x0088);
pub const RECONSTRUCTION_DIAMETER: Tag = Tag(0x0018, 0x1100);

// Device/Site Tags
pub const MANUFACTURER: Tag = Tag(0x0008, 0x0070);
pub const INSTITUTION_NAME: Tag = Tag(0x0008, 0x0080);

// Description Tags
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);

// CT Acquisition Tags
pub const KVP: Tag = Tag(0x0018, 0x0060);
pub const CONVOLUTION_KERNEL: Tag = Tag(0x0018, 0x1210);
pub const EXPOSURE: Tag = Tag(0x0018, 0x1152);

// MR Acquisition Tags
pub const CONTRAST_BOLUS_AGENT: Tag = Tag(0x0018, 0x0010);
pub const ECHO_TIME: Tag = Tag(0x0018, 0x0081);
pub const INVERSION_TIME: Tag = Tag(0x0018, 0x0082);
pub const NUMBER_OF_AVERAGES: Tag = Tag(0x0018, 0x0083);
pub const IMAGING_FREQUENCY: Tag = Tag(0x0018, 0x0084);
pub const IMAGED_NUCLEUS: Tag = Tag(0x0018, 0x0085);
pub const MAGNETIC_FIELD_STRENGTH: Tag = Tag(0x0018, 0x0087);
pub const ECHO_TRAIN_LENGTH: Tag = Tag(0x0018, 0x0091);
pub const PERCENT_SAMPLING: Tag = Tag(0x0018, 0x0093);
pub const PERCENT_PHASE_FIELD_OF_VIEW: Tag = Tag(0x0018, 0x0094);
pub const PIXEL_BANDWIDTH: Tag = Tag(0x0018, 0x0095);

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string.
/// Surrounding whitespace and NUL padding are removed.
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| {
            s.trim_matches(|c: char| c.is_whitespace() || c == '\0')
                .to_string()
        })
}

/// Helper to get integer value from DICOM tag
///
/// Decimal strings holding a whole number (e.g. `"2.0"`) are accepted.
/// Returns `None` if the tag is not present or cannot be converted to i64
pub fn get_int_value(dcm: &InMemDicomObject, tag: Tag) -> Option<i64> {
    let elem = dcm.element(tag).ok()?;
    elem.to_int::<i64>().ok().or_else(|| {
        elem.to_float64()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}

/// Helper to get floating point value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to f64
pub fn get_float_value(dcm: &InMemDicomObject, tag: Tag) -> Option<f64> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_float64().ok())
}

/// Helper to get a list of floats from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to Vec<f32>
pub fn get_float_list_value(dcm: &InMemDicomObject, tag: Tag) -> Option<Vec<f32>> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_multi_float32().ok())
}

/// Returns whether the tag is present in the object
pub fn has_tag(dcm: &InMemDicomObject, tag: Tag) -> bool {
    dcm.element(tag).is_ok()
}
