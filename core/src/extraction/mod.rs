pub mod catalog;
pub mod reader;
pub mod tags;

pub use catalog::{all_fields, extract_field, FieldSpec, Modality, CT_FIELDS, MR_FIELDS};
pub use reader::{DicomFileReader, DicomHeader, MetadataReader};
pub use tags::*;
