//! Spacing resolution: where lines land along one axis.

use crate::config::{AlignmentMode, SpacingMode};

/// Divisors below this are treated as zero (no lines, no division fault).
pub(crate) const MIN_SPACING: f64 = 1e-6;

/// Inclusion slack at the extent boundary.
const BOUNDARY_EPS: f64 = 1e-9;

/// Compute the ordered coordinate values for one axis of the pattern.
///
/// `lo..hi` is the extent range along the axis; `spacing` and `divisions`
/// apply in Absolute and Quantity mode respectively; `start_offset` only
/// shifts edge-aligned placement. Near-zero divisors yield an empty list.
pub fn resolve_axis(
    lo: f64,
    hi: f64,
    spacing_mode: SpacingMode,
    alignment: AlignmentMode,
    spacing: f64,
    divisions: u32,
    start_offset: f64,
) -> Vec<f64> {
    let (first, step, count) = match alignment {
        AlignmentMode::EdgeToEdge => {
            let first = lo + start_offset;
            match spacing_mode {
                SpacingMode::Absolute => {
                    if spacing <= MIN_SPACING {
                        return Vec::new();
                    }
                    let count = (((hi - first) / spacing).floor() as i64 + 1).max(0);
                    (first, spacing, count)
                }
                SpacingMode::Quantity => {
                    let count = divisions.max(1) as i64;
                    let step = if count > 1 {
                        (hi - first) / (count - 1) as f64
                    } else {
                        hi - lo
                    };
                    (first, step, count)
                }
            }
        }
        AlignmentMode::CenterOutward => {
            let center = (lo + hi) / 2.0;
            let range = hi - lo;
            match spacing_mode {
                SpacingMode::Absolute => {
                    if spacing <= MIN_SPACING {
                        return Vec::new();
                    }
                    let n = ((range / 2.0) / spacing).floor() as i64;
                    (center - n as f64 * spacing, spacing, 2 * n + 1)
                }
                SpacingMode::Quantity => {
                    let count = divisions.max(1) as i64;
                    let step = if count > 1 {
                        range / (count - 1) as f64
                    } else {
                        range
                    };
                    // Integer division biases the extra line to the low
                    // side for even counts; preserved from the source.
                    (center - step * (count / 2) as f64, step, count)
                }
            }
        }
    };

    (0..count).map(|i| first + i as f64 * step).collect()
}

/// Expand a pattern sequence into coordinate values.
///
/// Starts at `lo + start_offset` and walks the sequence cyclically; every
/// completed cycle spends one unit of the repeat budget, and expansion
/// stops when the budget is exhausted or the cursor passes `hi`.
pub fn expand_sequence(lo: f64, hi: f64, start_offset: f64, seq: &[f64], repeat: u32) -> Vec<f64> {
    if seq.is_empty() || repeat == 0 {
        return Vec::new();
    }

    let mut values = Vec::new();
    let mut current = lo + start_offset;
    let mut index = 0usize;
    let mut budget = repeat;

    while current <= hi + BOUNDARY_EPS {
        values.push(current);
        let step = seq[index % seq.len()];
        index += 1;
        if index % seq.len() == 0 {
            budget -= 1;
            if budget == 0 {
                break;
            }
        }
        current += step;
    }

    values
}
