#![warn(missing_docs)]

//! Geometry kernel for the subdiv pattern engine.
//!
//! This crate provides the small set of planar geometry operations the
//! pattern engine is built on:
//!
//! - **Regions**: bounded planar areas with a centroid and unit normal
//! - **Local frames**: orthonormal UV coordinate systems embedded in a
//!   region's plane, with world↔local projection
//! - **Extents**: UV bounding ranges of a region's boundary
//! - **Clipping**: segment-vs-polygon intersection in UV space
//! - **Offsets**: signed inward/outward offsets of a closed boundary
//!
//! All operations are pure and tolerance-aware; fallible ones return
//! `Result` rather than panicking on degenerate input.

pub mod frame;
pub mod offset;
pub mod polygon;
pub mod region;

pub use frame::{Extent, LocalFrame};
pub use offset::offset_polygon;
pub use polygon::{clip_segment_to_polygon, point_in_polygon};
pub use region::{PlanarRegion, RegionError};

use thiserror::Error;

/// Errors from polygon-level geometry operations.
#[derive(Debug, Clone, Error)]
pub enum GeomError {
    /// The boundary polygon has fewer than 3 vertices.
    #[error("boundary polygon has only {0} vertices")]
    DegenerateBoundary(usize),

    /// An offset operation collapsed the boundary to nothing.
    #[error("offset by {0:.3} collapsed the boundary")]
    OffsetCollapsed(f64),
}
