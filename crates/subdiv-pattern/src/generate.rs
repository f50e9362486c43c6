//! Pattern generation: placement, clipping, transforms, composition.

use subdiv_geom::{
    clip_segment_to_polygon, offset_polygon, Extent, LocalFrame, PlanarRegion,
};
use subdiv_math::{reflect_about, rotate_about, Point2, Point3, Tolerance, Vec2};

use crate::compose::fuse_segments;
use crate::config::{PatternConfig, SpacingMode, StaggerDirection, SubdivisionMode};
use crate::outcome::{Diagnostic, PatternOutcome, PatternShape, Segment3};
use crate::spacing::{expand_sequence, resolve_axis, MIN_SPACING};

/// Rotations below this many degrees are skipped.
const ANGLE_EPS: f64 = 1e-9;

/// Endpoint matching tolerance for fusing, in mm.
const FUSE_TOLERANCE: f64 = 1e-4;

/// An unclipped construction segment in frame-local UV coordinates.
type LocalSeg = (Point2, Point2);

/// Generate the subdivision pattern for a region.
///
/// A pure function of its inputs: identical region and config always
/// produce an identical outcome, and no state is retained across calls.
/// Failures never escape as panics; they surface as diagnostics alongside
/// a well-defined (possibly empty) shape.
pub fn generate(region: &PlanarRegion, config: &PatternConfig) -> PatternOutcome {
    let frame = LocalFrame::for_region(region);
    let boundary: Vec<Point2> = region.vertices().iter().map(|v| frame.to_local(v)).collect();
    let extent = Extent::of(&boundary);

    let mut diagnostics = Vec::new();

    let sequence = config.effective_sequence();
    if config.use_pattern_sequence && sequence.is_empty() {
        diagnostics.push(Diagnostic::warning(
            "pattern sequence is enabled but empty; sequence-driven families emit no lines",
        ));
    }

    // Place oversized construction geometry in UV space
    let mut construction = match config.subdivision_mode {
        SubdivisionMode::Horizontal => {
            horizontal_lines(config, &extent, &sequence, &mut diagnostics)
        }
        SubdivisionMode::Vertical => vertical_lines(config, &extent, &sequence, &mut diagnostics),
        SubdivisionMode::Crosshatch => {
            let (h_spacing, v_spacing) = config.crosshatch_spacings();
            let mut segs =
                vertical_lines_spaced(config, &extent, h_spacing, &sequence, &mut diagnostics);
            segs.extend(horizontal_lines_spaced(
                config,
                &extent,
                v_spacing,
                &sequence,
                &mut diagnostics,
            ));
            segs
        }
        SubdivisionMode::DiagonalHerringbone => {
            let mut segs = diagonal_family(
                config,
                &extent,
                &boundary,
                config.diagonal_angle_deg,
                &sequence,
                &mut diagnostics,
            );
            if config.use_alternate_angle {
                segs.extend(diagonal_family(
                    config,
                    &extent,
                    &boundary,
                    config.alternate_angle_deg,
                    &sequence,
                    &mut diagnostics,
                ));
            }
            segs
        }
        SubdivisionMode::StaggeredGrid => staggered_cells(config, &extent, &mut diagnostics),
    };

    // Rotation is baked into the construction geometry before clipping so
    // that a rotated line spanning the region is never truncated
    if config.rotation_deg.abs() > ANGLE_EPS {
        let pivot = extent.center();
        let angle = config.rotation_deg.to_radians();
        for (a, b) in construction.iter_mut() {
            *a = rotate_about(*a, pivot, angle);
            *b = rotate_about(*b, pivot, angle);
        }
    }

    let mut clipped = clip_all(&construction, &boundary, &mut diagnostics);

    // Flip is a pure reflection about the centroid, which projects to the
    // frame origin; no re-clip
    if config.flip_horizontal || config.flip_vertical {
        let pivot = Point2::origin();
        for (a, b) in clipped.iter_mut() {
            *a = reflect_about(*a, pivot, config.flip_horizontal, config.flip_vertical);
            *b = reflect_about(*b, pivot, config.flip_horizontal, config.flip_vertical);
        }
    }

    // Positive clip offset insets the boundary; negative offsets outward
    if config.use_clip_offset && config.clip_offset.abs() > MIN_SPACING {
        match offset_polygon(&boundary, -config.clip_offset) {
            Ok(offset_boundary) => {
                let reclipped = clip_all(&clipped, &offset_boundary, &mut diagnostics);
                // An offset that swallows every segment keeps the unoffset
                // result instead of emptying the pattern
                if reclipped.is_empty() && !clipped.is_empty() {
                    diagnostics.push(Diagnostic::warning(
                        "clip offset removed every segment; keeping the unoffset result",
                    ));
                } else {
                    clipped = reclipped;
                }
            }
            Err(e) => diagnostics.push(Diagnostic::warning(format!(
                "clip offset failed: {e}; clipping against the unoffset boundary"
            ))),
        }
    }

    let world: Vec<(Point3, Point3)> = clipped
        .iter()
        .map(|(a, b)| (frame.to_world(a), frame.to_world(b)))
        .collect();

    let shape = if config.fuse {
        let wires = fuse_segments(&world, FUSE_TOLERANCE);
        if wires.is_empty() && !world.is_empty() {
            diagnostics.push(Diagnostic::warning(
                "fuse produced no wires; returning the unfused collection",
            ));
            PatternShape::Segments(world.iter().map(|(a, b)| Segment3::new(*a, *b)).collect())
        } else {
            PatternShape::Fused(wires)
        }
    } else {
        PatternShape::Segments(world.iter().map(|(a, b)| Segment3::new(*a, *b)).collect())
    };

    PatternOutcome { shape, diagnostics }
}

/// Derive a rotation angle (degrees) from a reference edge direction.
///
/// Returns the unsigned angle between the region frame's U axis and the
/// edge, or `None` for a zero-length edge.
pub fn rotation_from_edge(region: &PlanarRegion, edge_start: Point3, edge_end: Point3) -> Option<f64> {
    let dir = edge_end - edge_start;
    if dir.norm() < Tolerance::DEFAULT.linear {
        return None;
    }
    let dir = dir.normalize();
    let frame = LocalFrame::for_region(region);
    let cos = frame.axis_u.dot(&dir).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Clip every segment against the boundary, falling back to the unclipped
/// segment (with a warning) when the clip operation itself fails.
fn clip_all(
    segments: &[LocalSeg],
    boundary: &[Point2],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<LocalSeg> {
    let mut clipped = Vec::new();
    let mut warned = false;
    for (a, b) in segments {
        match clip_segment_to_polygon(a, b, boundary) {
            Ok(parts) => clipped.extend(parts),
            Err(e) => {
                if !warned {
                    diagnostics.push(Diagnostic::warning(format!(
                        "clipping failed: {e}; keeping unclipped geometry"
                    )));
                    warned = true;
                }
                clipped.push((*a, *b));
            }
        }
    }
    clipped
}

/// Coordinate values for one family: resolver, or expander in sequence mode.
fn family_values(
    config: &PatternConfig,
    lo: f64,
    hi: f64,
    spacing: f64,
    sequence: &[f64],
    diagnostics: &mut Vec<Diagnostic>,
    family: &str,
) -> Vec<f64> {
    if config.use_pattern_sequence {
        return expand_sequence(lo, hi, config.start_offset, sequence, config.pattern_repeat);
    }
    if config.spacing_mode == SpacingMode::Absolute && spacing <= MIN_SPACING {
        diagnostics.push(Diagnostic::warning(format!(
            "{family} spacing is zero; no lines emitted"
        )));
        return Vec::new();
    }
    resolve_axis(
        lo,
        hi,
        config.spacing_mode,
        config.alignment_mode,
        spacing,
        config.divisions,
        config.start_offset,
    )
}

fn horizontal_lines(
    config: &PatternConfig,
    extent: &Extent,
    sequence: &[f64],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<LocalSeg> {
    horizontal_lines_spaced(config, extent, config.primary_spacing, sequence, diagnostics)
}

fn vertical_lines(
    config: &PatternConfig,
    extent: &Extent,
    sequence: &[f64],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<LocalSeg> {
    vertical_lines_spaced(config, extent, config.primary_spacing, sequence, diagnostics)
}

/// Lines of constant V spanning the full U range, oversized on both ends.
fn horizontal_lines_spaced(
    config: &PatternConfig,
    extent: &Extent,
    spacing: f64,
    sequence: &[f64],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<LocalSeg> {
    let over = 2.0 * extent.diagonal();
    family_values(
        config,
        extent.min_v,
        extent.max_v,
        spacing,
        sequence,
        diagnostics,
        "horizontal",
    )
    .into_iter()
    .map(|v| {
        (
            Point2::new(extent.min_u - over, v),
            Point2::new(extent.max_u + over, v),
        )
    })
    .collect()
}

/// Lines of constant U spanning the full V range.
fn vertical_lines_spaced(
    config: &PatternConfig,
    extent: &Extent,
    spacing: f64,
    sequence: &[f64],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<LocalSeg> {
    let over = 2.0 * extent.diagonal();
    family_values(
        config,
        extent.min_u,
        extent.max_u,
        spacing,
        sequence,
        diagnostics,
        "vertical",
    )
    .into_iter()
    .map(|u| {
        (
            Point2::new(u, extent.min_v - over),
            Point2::new(u, extent.max_v + over),
        )
    })
    .collect()
}

/// One diagonal family: parallel lines along (cos θ, sin θ), spaced along
/// the left normal, placed against the boundary's projected extent.
///
/// Diagonal placement is always edge-aligned; the alignment mode only
/// applies to the axis-parallel generators.
fn diagonal_family(
    config: &PatternConfig,
    extent: &Extent,
    boundary: &[Point2],
    angle_deg: f64,
    sequence: &[f64],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<LocalSeg> {
    let rad = angle_deg.to_radians();
    let dir = Vec2::new(rad.cos(), rad.sin());
    let normal = Vec2::new(-rad.sin(), rad.cos());

    let mut min_proj = f64::INFINITY;
    let mut max_proj = f64::NEG_INFINITY;
    for p in boundary {
        let d = p.coords.dot(&normal);
        min_proj = min_proj.min(d);
        max_proj = max_proj.max(d);
    }

    let values = if config.use_pattern_sequence {
        expand_sequence(
            min_proj,
            max_proj,
            config.start_offset,
            sequence,
            config.pattern_repeat,
        )
    } else {
        if config.spacing_mode == SpacingMode::Absolute && config.primary_spacing <= MIN_SPACING {
            diagnostics.push(Diagnostic::warning(
                "diagonal spacing is zero; no lines emitted",
            ));
            return Vec::new();
        }
        resolve_axis(
            min_proj,
            max_proj,
            config.spacing_mode,
            crate::config::AlignmentMode::EdgeToEdge,
            config.primary_spacing,
            config.divisions,
            config.start_offset,
        )
    };

    let over = 2.0 * extent.diagonal();
    let center = extent.center();
    let center_proj = center.coords.dot(&normal);

    values
        .into_iter()
        .map(|d| {
            let anchor = center + normal * (d - center_proj);
            (anchor - dir * over, anchor + dir * over)
        })
        .collect()
}

/// Square cells tiling the extent, with alternating rows or columns
/// shifted by the stagger offset; each cell emits its four edges.
fn staggered_cells(
    config: &PatternConfig,
    extent: &Extent,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<LocalSeg> {
    let cell = match config.spacing_mode {
        SpacingMode::Absolute => config.primary_spacing,
        SpacingMode::Quantity => {
            let shorter = extent.width().min(extent.height());
            shorter / config.divisions.max(1) as f64
        }
    };
    if cell <= MIN_SPACING {
        diagnostics.push(Diagnostic::warning(
            "cell size is zero in staggered grid; no cells emitted",
        ));
        return Vec::new();
    }

    let cols = (extent.width() / cell).floor() as usize + 1;
    let rows = (extent.height() / cell).floor() as usize + 1;

    let mut segments = Vec::with_capacity(rows * cols * 4);
    for row in 0..rows {
        for col in 0..cols {
            let mut u0 = extent.min_u + col as f64 * cell;
            let mut v0 = extent.min_v + row as f64 * cell;
            match config.stagger_direction {
                StaggerDirection::Horizontal if row % 2 == 1 => u0 += config.stagger_offset,
                StaggerDirection::Vertical if col % 2 == 1 => v0 += config.stagger_offset,
                _ => {}
            }
            let corners = [
                Point2::new(u0, v0),
                Point2::new(u0 + cell, v0),
                Point2::new(u0 + cell, v0 + cell),
                Point2::new(u0, v0 + cell),
            ];
            for i in 0..4 {
                segments.push((corners[i], corners[(i + 1) % 4]));
            }
        }
    }
    segments
}
