#![warn(missing_docs)]

//! Math types for the subdiv pattern engine.
//!
//! Thin wrappers around nalgebra providing domain-specific types for
//! planar pattern generation: 3D points and vectors for region input,
//! 2D points for frame-local work, tolerance constants, and the small
//! set of in-plane transforms (pivot rotation, axis reflection) the
//! engine applies to construction geometry.

use nalgebra::{Unit, Vector2, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in frame-local 2D (UV) space.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// Rotate a 2D point about a pivot by `angle` radians (counter-clockwise).
pub fn rotate_about(p: Point2, pivot: Point2, angle: f64) -> Point2 {
    let (s, c) = angle.sin_cos();
    let d = p - pivot;
    Point2::new(pivot.x + c * d.x - s * d.y, pivot.y + s * d.x + c * d.y)
}

/// Mirror a 2D point about a pivot along the U and/or V axis.
///
/// Reflecting twice along the same axis returns the original point.
pub fn reflect_about(p: Point2, pivot: Point2, flip_u: bool, flip_v: bool) -> Point2 {
    Point2::new(
        if flip_u { 2.0 * pivot.x - p.x } else { p.x },
        if flip_v { 2.0 * pivot.y - p.y } else { p.y },
    )
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default CAD tolerances (1e-6 mm linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Check if two 2D points are coincident within tolerance.
    pub fn points2_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if two 3D points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_rotate_about_origin_90() {
        let r = rotate_about(Point2::new(1.0, 0.0), Point2::origin(), PI / 2.0);
        assert!(r.x.abs() < 1e-12);
        assert!((r.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_about_pivot() {
        // Rotating the pivot itself is a no-op
        let pivot = Point2::new(3.0, 4.0);
        let r = rotate_about(pivot, pivot, 1.234);
        assert!((r - pivot).norm() < 1e-12);

        // 180° about (1,0) sends (2,0) to (0,0)
        let r = rotate_about(Point2::new(2.0, 0.0), Point2::new(1.0, 0.0), PI);
        assert!(r.x.abs() < 1e-12);
        assert!(r.y.abs() < 1e-12);
    }

    #[test]
    fn test_reflect_self_inverse() {
        let pivot = Point2::new(50.0, 50.0);
        let p = Point2::new(12.5, 87.0);
        let once = reflect_about(p, pivot, true, false);
        assert!((once.x - 87.5).abs() < 1e-12);
        assert!((once.y - 87.0).abs() < 1e-12);
        let twice = reflect_about(once, pivot, true, false);
        assert!((twice - p).norm() < 1e-12);
    }

    #[test]
    fn test_reflect_both_axes() {
        let p = reflect_about(Point2::new(1.0, 2.0), Point2::origin(), true, true);
        assert!((p.x + 1.0).abs() < 1e-12);
        assert!((p.y + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(1.0 + 1e-7, 2.0);
        assert!(tol.points2_equal(&a, &b));
        let c = Point2::new(1.001, 2.0);
        assert!(!tol.points2_equal(&a, &c));
    }
}
