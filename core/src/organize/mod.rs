//! Moving DICOM files into the canonical `dicoms/<patient>/<study>/<series>/` hierarchy

pub mod classify;
pub mod mover;
pub mod plan;
pub mod progress;
pub mod prune;
pub mod reorganizer;
pub mod walker;

pub use classify::classify;
pub use mover::move_file;
pub use plan::{
    has_extension, with_extension, Destination, MovePlan, PlannedMove, DICOM_DIR, OTHER_DIR,
    UNCATEGORIZED_DIR,
};
pub use progress::MoveCounter;
pub use prune::remove_empty_subdirs;
pub use reorganizer::{MoveFailure, ReorganizeReport, Reorganizer};
pub use walker::{find_leaves, DirListing, TreeWalker};
