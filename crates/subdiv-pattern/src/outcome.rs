//! Result and diagnostic types for pattern generation.

use serde::{Deserialize, Serialize};
use subdiv_math::Point3;

/// A 3D point for serializable pattern output.
///
/// We use a custom type instead of nalgebra::Point3 to enable serde
/// serialization without requiring nalgebra's serde feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point3D {
    /// Create a new 3D point.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }
}

impl From<Point3> for Point3D {
    fn from(p: Point3) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

impl From<Point3D> for Point3 {
    fn from(p: Point3D) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}

/// One clipped construction line in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment3 {
    /// Start point.
    pub start: Point3D,
    /// End point.
    pub end: Point3D,
}

impl Segment3 {
    /// Create a segment from nalgebra points.
    pub fn new(start: Point3, end: Point3) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

/// A chained wire: ordered points, optionally closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline3 {
    /// Ordered vertices of the polyline.
    pub points: Vec<Point3D>,
    /// Whether it forms a closed loop.
    pub closed: bool,
}

impl Polyline3 {
    /// Total length of the polyline (including the closing edge).
    pub fn length(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for w in self.points.windows(2) {
            total += w[0].distance(&w[1]);
        }
        if self.closed {
            total += self.points[self.points.len() - 1].distance(&self.points[0]);
        }
        total
    }
}

/// The generated pattern: disjoint segments, or fused wires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PatternShape {
    /// A flat ordered collection of clipped segments.
    Segments(Vec<Segment3>),
    /// Segments fused into chained polylines.
    Fused(Vec<Polyline3>),
}

impl PatternShape {
    /// An empty (segment) shape.
    pub fn empty() -> Self {
        Self::Segments(Vec::new())
    }

    /// Whether the shape carries no geometry at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Segments(s) => s.is_empty(),
            Self::Fused(w) => w.is_empty(),
        }
    }

    /// Number of primitive elements (segments or wires).
    pub fn len(&self) -> usize {
        match self {
            Self::Segments(s) => s.len(),
            Self::Fused(w) => w.len(),
        }
    }
}

/// Severity of a generation diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Recoverable: a family was skipped or a fallback was taken.
    Warning,
    /// The call produced no usable geometry.
    Error,
}

/// A structured message describing a non-fatal problem during generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity classification.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// A warning-level diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// An error-level diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// The complete result of one generation call.
///
/// Generation always completes: failures surface as diagnostics next to a
/// well-defined (possibly empty) shape, never as a panic or a hard error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternOutcome {
    /// The generated geometry.
    pub shape: PatternShape,
    /// Everything that went wrong (or was skipped) along the way.
    pub diagnostics: Vec<Diagnostic>,
}

impl PatternOutcome {
    /// An empty outcome carrying one diagnostic.
    pub fn empty_with(diagnostic: Diagnostic) -> Self {
        Self {
            shape: PatternShape::empty(),
            diagnostics: vec![diagnostic],
        }
    }

    /// Whether any error-level diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}
