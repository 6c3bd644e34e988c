//! # Kerf CAM
//!
//! Planar pocketing toolpath generation over the `kerf-core` geometry:
//! curve orienting and splitting, zig-zag scan-line pocketing, recursive
//! spiral pocketing, and boolean-based containment classification.
//!
//! The two entry points are [`make_pocket`] for a single region and
//! [`split_and_make_pocket`] for multi-loop input. Every operation takes a
//! [`JobContext`] carrying the unit scale, tolerances, and the shared
//! progress/abort state.

pub mod context;
pub mod orderer;
pub mod overlap;
pub mod pocket;
pub mod spiral;
pub mod split;
mod zigzag;

pub use context::{JobContext, ProgressHandle};
pub use orderer::reorder;
pub use overlap::{is_inside, is_inside_curve, overlap, overlap_curves, Overlap};
pub use pocket::{make_pocket, split_and_make_pocket, PocketMode, PocketParams};
pub use spiral::{make_one_pocket_curve, recursive_pocket};
pub use split::split;

/// Error types for the pocketing core
#[derive(Debug, thiserror::Error)]
pub enum CamError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, CamError>;
