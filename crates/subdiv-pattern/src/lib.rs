//! Subdivision pattern generation for planar regions.
//!
//! This crate provides:
//! - Pattern configuration types with serde support
//! - Spacing resolution (absolute/quantity, edge/center alignment)
//! - Pattern sequence expansion for irregular repeating spacings
//! - Five pattern generators: horizontal, vertical, crosshatch,
//!   diagonal/herringbone, and staggered grid
//! - Boundary clipping with optional offset, rotation and flip transforms
//! - Fusing of clipped segments into chained polylines
//!
//! Generation is deterministic and total: the same region and config
//! always produce the same outcome, and problems surface as structured
//! diagnostics rather than panics.
//!
//! ```
//! use subdiv_math::Point3;
//! use subdiv_pattern::{generate, PatternConfig, PlanarRegion};
//!
//! let region = PlanarRegion::new(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(100.0, 0.0, 0.0),
//!     Point3::new(100.0, 100.0, 0.0),
//!     Point3::new(0.0, 100.0, 0.0),
//! ])
//! .unwrap();
//!
//! let config = PatternConfig {
//!     primary_spacing: 25.0,
//!     ..Default::default()
//! };
//! let outcome = generate(&region, &config);
//! assert_eq!(outcome.shape.len(), 5);
//! assert!(outcome.diagnostics.is_empty());
//! ```

#![warn(missing_docs)]

pub mod compose;
pub mod config;
pub mod generate;
pub mod outcome;
pub mod spacing;

pub use compose::fuse_segments;
pub use config::{
    AlignmentMode, PatternConfig, SpacingMode, StaggerDirection, SubdivisionMode,
};
pub use generate::{generate, rotation_from_edge};
pub use outcome::{
    Diagnostic, PatternOutcome, PatternShape, Point3D, Polyline3, Segment3, Severity,
};
pub use spacing::{expand_sequence, resolve_axis};

pub use subdiv_geom::PlanarRegion;
