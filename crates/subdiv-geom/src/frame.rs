//! Local UV frames and extents for planar regions.

use subdiv_math::{Dir3, Point2, Point3, Vec3};

use crate::region::PlanarRegion;

/// An orthonormal 2D coordinate system embedded in a region's plane.
///
/// `axis_u`, `axis_v`, and `normal` form a right-handed triad; the origin
/// is the region centroid, so the centroid projects to (0, 0) in UV.
#[derive(Debug, Clone)]
pub struct LocalFrame {
    /// Frame origin (the region centroid).
    pub origin: Point3,
    /// Unit vector along the local U axis.
    pub axis_u: Dir3,
    /// Unit vector along the local V axis.
    pub axis_v: Dir3,
    /// Unit normal to the plane.
    pub normal: Dir3,
}

impl LocalFrame {
    /// Derive the frame for a region from its centroid and normal.
    ///
    /// The U axis is `helper × normal` with helper (0,0,1), substituting
    /// (1,0,0) when the normal is near-parallel to world up; V completes
    /// the right-handed triad as `normal × axis_u`.
    pub fn for_region(region: &PlanarRegion) -> Self {
        let normal = region.normal();
        let mut helper = Vec3::z();
        if normal.dot(&helper).abs() > 0.99 {
            helper = Vec3::x();
        }
        let axis_u = Dir3::new_normalize(helper.cross(&normal));
        let axis_v = Dir3::new_normalize(normal.cross(&axis_u));
        Self {
            origin: region.centroid(),
            axis_u,
            axis_v,
            normal,
        }
    }

    /// Project a world point into UV coordinates.
    pub fn to_local(&self, p: &Point3) -> Point2 {
        let d = p - self.origin;
        Point2::new(d.dot(&self.axis_u), d.dot(&self.axis_v))
    }

    /// Lift a UV point back into world coordinates.
    pub fn to_world(&self, p: &Point2) -> Point3 {
        self.origin + self.axis_u.into_inner() * p.x + self.axis_v.into_inner() * p.y
    }
}

/// The UV bounding range of a region's boundary.
#[derive(Debug, Clone, Copy)]
pub struct Extent {
    /// Minimum U coordinate.
    pub min_u: f64,
    /// Maximum U coordinate.
    pub max_u: f64,
    /// Minimum V coordinate.
    pub min_v: f64,
    /// Maximum V coordinate.
    pub max_v: f64,
}

impl Extent {
    /// An empty extent (inverted bounds).
    pub fn empty() -> Self {
        Self {
            min_u: f64::INFINITY,
            max_u: f64::NEG_INFINITY,
            min_v: f64::INFINITY,
            max_v: f64::NEG_INFINITY,
        }
    }

    /// Bound a set of UV points.
    pub fn of(points: &[Point2]) -> Self {
        let mut e = Self::empty();
        for p in points {
            e.include(*p);
        }
        e
    }

    /// Expand the extent to include a point.
    pub fn include(&mut self, p: Point2) {
        self.min_u = self.min_u.min(p.x);
        self.max_u = self.max_u.max(p.x);
        self.min_v = self.min_v.min(p.y);
        self.max_v = self.max_v.max(p.y);
    }

    /// Width along U. Zero-width extents are valid.
    pub fn width(&self) -> f64 {
        self.max_u - self.min_u
    }

    /// Height along V.
    pub fn height(&self) -> f64 {
        self.max_v - self.min_v
    }

    /// Center of the extent.
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min_u + self.max_u) / 2.0,
            (self.min_v + self.max_v) / 2.0,
        )
    }

    /// Diagonal length of the extent.
    pub fn diagonal(&self) -> f64 {
        (self.width().powi(2) + self.height().powi(2)).sqrt()
    }

    /// Check that the extent bounds at least one point.
    pub fn is_valid(&self) -> bool {
        self.min_u <= self.max_u && self.min_v <= self.max_v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::PlanarRegion;

    fn square_z0(size: f64) -> PlanarRegion {
        PlanarRegion::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(size, 0.0, 0.0),
            Point3::new(size, size, 0.0),
            Point3::new(0.0, size, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_frame_is_orthonormal() {
        let frame = LocalFrame::for_region(&square_z0(100.0));
        assert!(frame.axis_u.dot(&frame.axis_v).abs() < 1e-12);
        assert!(frame.axis_u.dot(&frame.normal).abs() < 1e-12);
        assert!(frame.axis_v.dot(&frame.normal).abs() < 1e-12);
        // Right-handed: u × v = normal
        let cross = frame.axis_u.cross(&frame.axis_v);
        assert!((cross - frame.normal.into_inner()).norm() < 1e-12);
    }

    #[test]
    fn test_roundtrip_projection() {
        let frame = LocalFrame::for_region(&square_z0(100.0));
        let p = Point3::new(30.0, 70.0, 0.0);
        let back = frame.to_world(&frame.to_local(&p));
        assert!((back - p).norm() < 1e-9);
    }

    #[test]
    fn test_centroid_projects_to_origin() {
        let frame = LocalFrame::for_region(&square_z0(100.0));
        let local = frame.to_local(&frame.origin);
        assert!(local.coords.norm() < 1e-12);
    }

    #[test]
    fn test_helper_substitution_for_vertical_plane() {
        // Region in the YZ plane has normal ±X; world up stays usable
        let region = PlanarRegion::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ])
        .unwrap();
        let frame = LocalFrame::for_region(&region);
        assert!(frame.normal.x.abs() > 0.99);
        assert!(frame.axis_u.x.abs() < 1e-12);
    }

    #[test]
    fn test_extent_of_square() {
        let region = square_z0(100.0);
        let frame = LocalFrame::for_region(&region);
        let locals: Vec<Point2> = region.vertices().iter().map(|v| frame.to_local(v)).collect();
        let extent = Extent::of(&locals);
        assert!(extent.is_valid());
        assert!((extent.width() - 100.0).abs() < 1e-9);
        assert!((extent.height() - 100.0).abs() < 1e-9);
        assert!((extent.diagonal() - 100.0 * 2.0_f64.sqrt()).abs() < 1e-9);
        assert!(extent.center().coords.norm() < 1e-9);
    }

    #[test]
    fn test_empty_extent_invalid() {
        assert!(!Extent::empty().is_valid());
    }
}
