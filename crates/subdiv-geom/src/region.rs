//! Bounded planar regions.

use subdiv_math::{Dir3, Point3, Tolerance, Vec3};
use thiserror::Error;

/// Errors from region construction.
#[derive(Debug, Clone, Error)]
pub enum RegionError {
    /// Fewer than 3 boundary vertices were supplied.
    #[error("region needs at least 3 boundary vertices, got {0}")]
    TooFewVertices(usize),

    /// The boundary vertices are collinear or coincident.
    #[error("boundary vertices are collinear or coincident")]
    DegenerateBoundary,

    /// The supplied normal has zero length.
    #[error("region normal is zero")]
    ZeroNormal,
}

/// A bounded planar area: boundary vertices, centroid, and unit normal.
///
/// Immutable once constructed; the pattern engine treats it as read-only
/// input for the duration of a generation call.
#[derive(Debug, Clone)]
pub struct PlanarRegion {
    vertices: Vec<Point3>,
    centroid: Point3,
    normal: Dir3,
}

impl PlanarRegion {
    /// Build a region from an ordered boundary vertex loop.
    ///
    /// The normal is computed with Newell's method and the centroid is the
    /// area centroid of the boundary polygon (falling back to the vertex
    /// mean for near-zero-area loops).
    pub fn new(vertices: Vec<Point3>) -> Result<Self, RegionError> {
        if vertices.len() < 3 {
            return Err(RegionError::TooFewVertices(vertices.len()));
        }

        let normal = newell_normal(&vertices).ok_or(RegionError::DegenerateBoundary)?;
        let centroid = area_centroid(&vertices, &normal);

        Ok(Self {
            vertices,
            centroid,
            normal,
        })
    }

    /// Build a region from host-supplied parts, validating them.
    pub fn from_parts(
        vertices: Vec<Point3>,
        centroid: Point3,
        normal: Vec3,
    ) -> Result<Self, RegionError> {
        if vertices.len() < 3 {
            return Err(RegionError::TooFewVertices(vertices.len()));
        }
        if normal.norm() < Tolerance::DEFAULT.linear {
            return Err(RegionError::ZeroNormal);
        }
        Ok(Self {
            vertices,
            centroid,
            normal: Dir3::new_normalize(normal),
        })
    }

    /// The ordered boundary vertices.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// The region centroid.
    pub fn centroid(&self) -> Point3 {
        self.centroid
    }

    /// The unit surface normal.
    pub fn normal(&self) -> Dir3 {
        self.normal
    }
}

/// Newell's method: robust polygon normal from the vertex loop.
///
/// Returns `None` when the loop is degenerate (collinear or coincident).
fn newell_normal(vertices: &[Point3]) -> Option<Dir3> {
    let mut n = Vec3::zeros();
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    if n.norm() < Tolerance::DEFAULT.linear {
        return None;
    }
    Some(Dir3::new_normalize(n))
}

/// Area centroid of the boundary polygon in its own plane.
fn area_centroid(vertices: &[Point3], normal: &Dir3) -> Point3 {
    // Vertex mean doubles as the in-plane origin and the degenerate fallback.
    let mut mean = Vec3::zeros();
    for v in vertices {
        mean += v.coords;
    }
    mean /= vertices.len() as f64;
    let mean = Point3::from(mean);

    // In-plane basis for the shoelace accumulation
    let helper = if normal.z.abs() > 0.99 {
        Vec3::x()
    } else {
        Vec3::z()
    };
    let u = helper.cross(normal).normalize();
    let v = normal.cross(&u);

    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..vertices.len() {
        let pa = vertices[i] - mean;
        let pb = vertices[(i + 1) % vertices.len()] - mean;
        let (ax, ay) = (pa.dot(&u), pa.dot(&v));
        let (bx, by) = (pb.dot(&u), pb.dot(&v));
        let cross = ax * by - bx * ay;
        area2 += cross;
        cx += (ax + bx) * cross;
        cy += (ay + by) * cross;
    }

    if area2.abs() < Tolerance::DEFAULT.linear {
        return mean;
    }
    let cx = cx / (3.0 * area2);
    let cy = cy / (3.0 * area2);
    mean + u * cx + v * cy
}
