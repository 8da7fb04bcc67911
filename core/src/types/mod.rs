//! Core type definitions for DICOM inventory and reorganization
//!
//! This module provides the value types shared across the library:
//! - [`GroupKey`]: Patient/study/series identity of a series
//! - [`FileClassification`]: Result of classifying a single file
//! - [`FieldKind`] and [`FieldValue`]: Typed descriptive attributes
//! - [`ReorganizeConfig`]: Settings for a reorganization run

mod config;
mod field;
mod group_key;

pub use config::{ReorganizeConfig, DEFAULT_EXTENSION, DEFAULT_PROGRESS_INTERVAL};
pub use field::{parse_float_list, FieldKind, FieldValue};
pub use group_key::{sanitize_component, FileClassification, GroupKey};
