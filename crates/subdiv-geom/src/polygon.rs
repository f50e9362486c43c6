//! Segment-vs-polygon clipping in UV space.

use subdiv_math::Point2;

use crate::GeomError;

/// Tolerance for geometric comparisons (in mm).
const TOLERANCE: f64 = 1e-6;

/// Point-in-polygon test using even-odd ray casting.
pub fn point_in_polygon(p: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = &polygon[i];
        let vj = &polygon[j];
        if ((vi.y > p.y) != (vj.y > p.y))
            && (p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Whether a point lies within `TOLERANCE` of the polygon outline.
///
/// Ray casting alone treats points on the outline inconsistently (inside
/// on some edges, outside on others depending on edge direction), so the
/// clipper checks boundary proximity separately.
fn point_on_boundary(p: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        let ab = b - a;
        let len2 = ab.norm_squared();
        let t = if len2 < TOLERANCE * TOLERANCE {
            0.0
        } else {
            ((p - a).dot(&ab) / len2).clamp(0.0, 1.0)
        };
        let closest = a + ab * t;
        if (p - closest).norm() < TOLERANCE {
            return true;
        }
    }
    false
}

/// Intersection of the segment `p0..p1` with the edge `e0..e1`.
///
/// Returns the parameter `t` along `p0..p1` when the crossing lies within
/// the edge span, unbounded along the segment.
fn segment_edge_intersection(p0: &Point2, p1: &Point2, e0: &Point2, e1: &Point2) -> Option<f64> {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    let ex = e1.x - e0.x;
    let ey = e1.y - e0.y;

    let denom = dx * ey - dy * ex;
    if denom.abs() < TOLERANCE {
        return None; // Parallel
    }

    let t = ((e0.x - p0.x) * ey - (e0.y - p0.y) * ex) / denom;
    let s = ((e0.x - p0.x) * dy - (e0.y - p0.y) * dx) / denom;

    if (0.0..=1.0).contains(&s) {
        Some(t)
    } else {
        None
    }
}

/// Clip a segment against a polygon boundary, keeping the inside portions.
///
/// Crossing parameters are collected along the segment, merged with the
/// segment's own endpoints, and consecutive parameter intervals whose
/// midpoint lies inside the polygon are kept. A degenerate (near-zero
/// length) segment clips to nothing; a degenerate boundary is an error so
/// the caller can decide on a fallback.
pub fn clip_segment_to_polygon(
    p0: &Point2,
    p1: &Point2,
    polygon: &[Point2],
) -> Result<Vec<(Point2, Point2)>, GeomError> {
    if polygon.len() < 3 {
        return Err(GeomError::DegenerateBoundary(polygon.len()));
    }

    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    if (dx * dx + dy * dy).sqrt() < TOLERANCE {
        return Ok(Vec::new());
    }

    let mut ts: Vec<f64> = vec![0.0, 1.0];
    let n = polygon.len();
    for i in 0..n {
        let j = (i + 1) % n;
        if let Some(t) = segment_edge_intersection(p0, p1, &polygon[i], &polygon[j]) {
            if (0.0..=1.0).contains(&t) {
                ts.push(t);
            }
        }
    }

    ts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    ts.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE);

    let at = |t: f64| Point2::new(p0.x + t * dx, p0.y + t * dy);

    let mut segments = Vec::new();
    for w in ts.windows(2) {
        let (t0, t1) = (w[0], w[1]);
        if t1 - t0 < TOLERANCE {
            continue;
        }
        let mid = at((t0 + t1) / 2.0);
        if point_in_polygon(&mid, polygon) || point_on_boundary(&mid, polygon) {
            segments.push((at(t0), at(t1)));
        }
    }

    Ok(segments)
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
    fn test_point_in_polygon() {
        let sq = square(10.0);
        assert!(point_in_polygon(&Point2::new(5.0, 5.0), &sq));
        assert!(!point_in_polygon(&Point2::new(15.0, 5.0), &sq));
        assert!(!point_in_polygon(&Point2::new(-5.0, 5.0), &sq));
    }

    #[test]
    fn test_clip_crossing_segment() {
        let sq = square(10.0);
        let clipped =
            clip_segment_to_polygon(&Point2::new(-5.0, 5.0), &Point2::new(15.0, 5.0), &sq).unwrap();
        assert_eq!(clipped.len(), 1);
        let (a, b) = clipped[0];
        assert!(a.x.abs() < 1e-9);
        assert!((b.x - 10.0).abs() < 1e-9);
        assert!((a.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_clip_inside_segment_kept_whole() {
        let sq = square(10.0);
        let clipped =
            clip_segment_to_polygon(&Point2::new(2.0, 5.0), &Point2::new(8.0, 5.0), &sq).unwrap();
        assert_eq!(clipped.len(), 1);
        let (a, b) = clipped[0];
        assert!((a.x - 2.0).abs() < 1e-9);
        assert!((b.x - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_clip_missing_segment() {
        let sq = square(10.0);
        let clipped =
            clip_segment_to_polygon(&Point2::new(-5.0, 20.0), &Point2::new(15.0, 20.0), &sq)
                .unwrap();
        assert!(clipped.is_empty());
    }

    #[test]
    fn test_clip_concave_produces_two_pieces() {
        // U-shaped polygon: a horizontal line across the notch splits in two
        let poly = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(7.0, 10.0),
            Point2::new(7.0, 4.0),
            Point2::new(3.0, 4.0),
            Point2::new(3.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let clipped =
            clip_segment_to_polygon(&Point2::new(-5.0, 7.0), &Point2::new(15.0, 7.0), &poly)
                .unwrap();
        assert_eq!(clipped.len(), 2);
    }

    #[test]
    fn test_clip_keeps_edge_coincident_segment() {
        // A line running exactly along the top edge clips to that edge
        let sq = square(10.0);
        let clipped =
            clip_segment_to_polygon(&Point2::new(-5.0, 10.0), &Point2::new(15.0, 10.0), &sq)
                .unwrap();
        assert_eq!(clipped.len(), 1);
        let (a, b) = clipped[0];
        assert!(a.x.abs() < 1e-9);
        assert!((b.x - 10.0).abs() < 1e-9);
        assert!((a.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_boundary_is_error() {
        let line = vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)];
        let result = clip_segment_to_polygon(&Point2::new(0.0, 0.0), &Point2::new(1.0, 1.0), &line);
        assert!(matches!(result, Err(GeomError::DegenerateBoundary(2))));
    }

    #[test]
    fn test_degenerate_segment_clips_to_nothing() {
        let sq = square(10.0);
        let p = Point2::new(5.0, 5.0);
        let clipped = clip_segment_to_polygon(&p, &p, &sq).unwrap();
        assert!(clipped.is_empty());
    }
}
