//! Fusing clipped segments into chained polylines.

use std::collections::HashMap;

use subdiv_math::Point3;

use crate::outcome::Polyline3;

/// Key for endpoint lookup with tolerance-based hashing.
fn point_key(p: &Point3, tolerance: f64) -> (i64, i64, i64) {
    let scale = 1.0 / tolerance;
    (
        (p.x * scale).round() as i64,
        (p.y * scale).round() as i64,
        (p.z * scale).round() as i64,
    )
}

/// Drop segments whose endpoint pair duplicates an earlier segment, in
/// either orientation. Crosshatch and staggered patterns produce exact
/// overlaps along shared cell edges; fusing them twice would fork chains.
fn dedup_segments(segments: &[(Point3, Point3)], tolerance: f64) -> Vec<(Point3, Point3)> {
    let mut seen: HashMap<((i64, i64, i64), (i64, i64, i64)), ()> = HashMap::new();
    let mut unique = Vec::with_capacity(segments.len());
    for (p0, p1) in segments {
        let k0 = point_key(p0, tolerance);
        let k1 = point_key(p1, tolerance);
        let key = if k0 <= k1 { (k0, k1) } else { (k1, k0) };
        if seen.insert(key, ()).is_none() {
            unique.push((*p0, *p1));
        }
    }
    unique
}

/// Remove interior points that continue the previous edge in a straight
/// line; collinear splitters add no shape information.
fn remove_collinear(points: &mut Vec<Point3>, tolerance: f64) {
    let mut i = 1;
    while i + 1 < points.len() {
        let a = points[i] - points[i - 1];
        let b = points[i + 1] - points[i];
        if a.cross(&b).norm() < tolerance && a.dot(&b) > 0.0 {
            points.remove(i);
        } else {
            i += 1;
        }
    }
}

/// Fuse individual segments into continuous polylines.
///
/// Segments sharing an endpoint within `tolerance` are chained into one
/// wire; chains whose ends meet are marked closed and the duplicate
/// endpoint dropped. Redundant collinear interior points are removed.
pub fn fuse_segments(segments: &[(Point3, Point3)], tolerance: f64) -> Vec<Polyline3> {
    if segments.is_empty() {
        return Vec::new();
    }

    let segments = dedup_segments(segments, tolerance);

    // Adjacency map: point_key -> list of (segment_index, is_end_point)
    let mut adjacency: HashMap<(i64, i64, i64), Vec<(usize, bool)>> = HashMap::new();
    for (i, (p0, p1)) in segments.iter().enumerate() {
        adjacency
            .entry(point_key(p0, tolerance))
            .or_default()
            .push((i, false));
        adjacency
            .entry(point_key(p1, tolerance))
            .or_default()
            .push((i, true));
    }

    let mut used = vec![false; segments.len()];
    let mut polylines = Vec::new();

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }

        let (p0, p1) = segments[start_idx];
        let mut chain = vec![p0, p1];
        used[start_idx] = true;

        // Extend forward from p1
        let mut current = p1;
        loop {
            let key = point_key(&current, tolerance);
            let mut found = false;

            if let Some(neighbors) = adjacency.get(&key) {
                for &(seg_idx, is_end) in neighbors {
                    if used[seg_idx] {
                        continue;
                    }
                    let (s0, s1) = segments[seg_idx];
                    let next_pt = if is_end { s0 } else { s1 };
                    chain.push(next_pt);
                    current = next_pt;
                    used[seg_idx] = true;
                    found = true;
                    break;
                }
            }

            if !found {
                break;
            }
        }

        // Extend backward from p0
        let mut current = p0;
        loop {
            let key = point_key(&current, tolerance);
            let mut found = false;

            if let Some(neighbors) = adjacency.get(&key) {
                for &(seg_idx, is_end) in neighbors {
                    if used[seg_idx] {
                        continue;
                    }
                    let (s0, s1) = segments[seg_idx];
                    let next_pt = if is_end { s0 } else { s1 };
                    chain.insert(0, next_pt);
                    current = next_pt;
                    used[seg_idx] = true;
                    found = true;
                    break;
                }
            }

            if !found {
                break;
            }
        }

        let closed = chain.len() >= 3 && (chain[0] - *chain.last().unwrap()).norm() < tolerance;
        if closed {
            chain.pop();
        }

        remove_collinear(&mut chain, tolerance);

        polylines.push(Polyline3 {
            points: chain.iter().map(|p| (*p).into()).collect(),
            closed,
        });
    }

    polylines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn test_two_touching_segments_make_one_wire() {
        let segments = vec![(p(0.0, 0.0), p(10.0, 0.0)), (p(10.0, 0.0), p(10.0, 10.0))];
        let wires = fuse_segments(&segments, 1e-4);
        assert_eq!(wires.len(), 1);
        assert_eq!(wires[0].points.len(), 3);
        assert!(!wires[0].closed);
    }

    #[test]
    fn test_disjoint_segments_stay_separate() {
        let segments = vec![(p(0.0, 0.0), p(10.0, 0.0)), (p(0.0, 5.0), p(10.0, 5.0))];
        let wires = fuse_segments(&segments, 1e-4);
        assert_eq!(wires.len(), 2);
    }

    #[test]
    fn test_square_loop_closes() {
        let segments = vec![
            (p(0.0, 0.0), p(10.0, 0.0)),
            (p(10.0, 0.0), p(10.0, 10.0)),
            (p(10.0, 10.0), p(0.0, 10.0)),
            (p(0.0, 10.0), p(0.0, 0.0)),
        ];
        let wires = fuse_segments(&segments, 1e-4);
        assert_eq!(wires.len(), 1);
        assert!(wires[0].closed);
        assert_eq!(wires[0].points.len(), 4);
        assert!((wires[0].length() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_collinear_splitter_removed() {
        // Three collinear pieces chain into a single two-point wire
        let segments = vec![
            (p(0.0, 0.0), p(5.0, 0.0)),
            (p(5.0, 0.0), p(8.0, 0.0)),
            (p(8.0, 0.0), p(10.0, 0.0)),
        ];
        let wires = fuse_segments(&segments, 1e-4);
        assert_eq!(wires.len(), 1);
        assert_eq!(wires[0].points.len(), 2);
        assert!((wires[0].length() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_segments_collapse() {
        let segments = vec![
            (p(0.0, 0.0), p(10.0, 0.0)),
            (p(10.0, 0.0), p(0.0, 0.0)),
            (p(0.0, 0.0), p(10.0, 0.0)),
        ];
        let wires = fuse_segments(&segments, 1e-4);
        assert_eq!(wires.len(), 1);
        assert_eq!(wires[0].points.len(), 2);
    }

    #[test]
    fn test_tolerance_joins_near_endpoints() {
        let segments = vec![
            (p(0.0, 0.0), p(10.0, 0.0)),
            (p(10.0 + 5e-5, 0.0), p(10.0, 10.0)),
        ];
        let wires = fuse_segments(&segments, 1e-4);
        assert_eq!(wires.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(fuse_segments(&[], 1e-4).is_empty());
    }
}
