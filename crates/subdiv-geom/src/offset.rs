//! Signed offsets of closed polygon boundaries.

use subdiv_math::{Point2, Vec2};

use crate::GeomError;

const TOLERANCE: f64 = 1e-9;

/// Twice the signed area of a closed polygon (positive when CCW).
fn signed_area2(polygon: &[Point2]) -> f64 {
    let mut area2 = 0.0;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        area2 += a.x * b.y - b.x * a.y;
    }
    area2
}

/// Offset a closed polygon by a signed distance with miter joins.
///
/// Positive distance moves the boundary outward, negative inward,
/// regardless of the polygon's winding. Each edge is shifted along its
/// outward normal and consecutive shifted edge lines are intersected to
/// form the new vertices; near-parallel joins fall back to translating
/// the shared vertex directly.
///
/// # Errors
///
/// - `GeomError::DegenerateBoundary` for fewer than 3 vertices
/// - `GeomError::OffsetCollapsed` when an inward offset eats the whole
///   boundary (the result flips orientation or loses its area)
pub fn offset_polygon(polygon: &[Point2], distance: f64) -> Result<Vec<Point2>, GeomError> {
    let n = polygon.len();
    if n < 3 {
        return Err(GeomError::DegenerateBoundary(n));
    }
    if distance.abs() < TOLERANCE {
        return Ok(polygon.to_vec());
    }

    let area2 = signed_area2(polygon);
    if area2.abs() < TOLERANCE {
        return Err(GeomError::OffsetCollapsed(distance));
    }
    // For CCW polygons the outward normal of edge (dx, dy) is (dy, -dx)
    let orientation = if area2 > 0.0 { 1.0 } else { -1.0 };

    // Per-edge outward normals, skipping zero-length edges
    let mut edges: Vec<(Point2, Vec2, Vec2)> = Vec::with_capacity(n); // (start, dir, normal)
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let d = b - a;
        let len = d.norm();
        if len < TOLERANCE {
            continue;
        }
        let dir = d / len;
        let normal = Vec2::new(dir.y, -dir.x) * orientation;
        edges.push((a, dir, normal));
    }
    if edges.len() < 3 {
        return Err(GeomError::DegenerateBoundary(edges.len()));
    }

    let m = edges.len();
    let mut result = Vec::with_capacity(m);
    for i in 0..m {
        let (a_prev, d_prev, n_prev) = edges[(i + m - 1) % m];
        let (a_next, d_next, n_next) = edges[i];

        // Shifted edge lines through the shared vertex
        let q_prev = a_prev + n_prev * distance;
        let q_next = a_next + n_next * distance;

        let denom = d_prev.x * d_next.y - d_prev.y * d_next.x;
        if denom.abs() < TOLERANCE {
            // Collinear join: translate the shared vertex directly
            result.push(a_next + n_next * distance);
        } else {
            let diff = q_next - q_prev;
            let t = (diff.x * d_next.y - diff.y * d_next.x) / denom;
            result.push(q_prev + d_prev * t);
        }
    }

    // An inward offset that flips orientation or kills the area has
    // collapsed the boundary
    let new_area2 = signed_area2(&result);
    if new_area2.abs() < TOLERANCE || new_area2.signum() != area2.signum() {
        return Err(GeomError::OffsetCollapsed(distance));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ]
    }

    #[test]
    fn test_inward_offset_shrinks_square() {
        let inset = offset_polygon(&square(10.0), -2.0).unwrap();
        assert_eq!(inset.len(), 4);
        let area2 = signed_area2(&inset);
        assert!((area2.abs() / 2.0 - 36.0).abs() < 1e-9);
        // Every inset vertex lies in [2, 8]^2
        for p in &inset {
            assert!(p.x > 2.0 - 1e-9 && p.x < 8.0 + 1e-9);
            assert!(p.y > 2.0 - 1e-9 && p.y < 8.0 + 1e-9);
        }
    }

    #[test]
    fn test_outward_offset_grows_square() {
        let outset = offset_polygon(&square(10.0), 3.0).unwrap();
        let area2 = signed_area2(&outset);
        assert!((area2.abs() / 2.0 - 256.0).abs() < 1e-9);
    }

    #[test]
    fn test_winding_independence() {
        let mut cw = square(10.0);
        cw.reverse();
        let inset = offset_polygon(&cw, -2.0).unwrap();
        assert!((signed_area2(&inset).abs() / 2.0 - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_collapse_is_error() {
        let result = offset_polygon(&square(10.0), -6.0);
        assert!(matches!(result, Err(GeomError::OffsetCollapsed(_))));
    }

    #[test]
    fn test_zero_distance_is_identity() {
        let sq = square(10.0);
        let same = offset_polygon(&sq, 0.0).unwrap();
        assert_eq!(same.len(), 4);
        for (a, b) in sq.iter().zip(&same) {
            assert!((a - b).norm() < 1e-12);
        }
    }
}
