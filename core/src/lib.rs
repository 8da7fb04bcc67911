//! Reorganize DICOM files into a `dicoms/<patient>/<study>/<series>/` hierarchy
//! and summarize the resulting series.

pub mod cli;
pub mod error;
pub mod extraction;
pub mod organize;
pub mod summary;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::report::TextReport;
pub use error::{DicomSortError, Result};
pub use extraction::{DicomFileReader, DicomHeader, MetadataReader, Modality};
pub use organize::{
    classify, find_leaves, remove_empty_subdirs, ReorganizeReport, Reorganizer, TreeWalker,
};
pub use summary::{summarize, summarize_leaves, write_csv, write_csv_file, SeriesSummary};
pub use types::*;
