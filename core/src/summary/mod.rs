//! Per-series summaries of an organized tree

pub mod series;
pub mod table;

pub use series::{summarize, summarize_leaf, summarize_leaves, SeriesSummary};
pub use table::{write_csv, write_csv_file, LOCATION_COLUMN};
