// Per-channel display-range computation.
//
// The range comes from the window's own samples, not the whole record, so
// scaling tracks the signal as the window scrolls.

/// Range served when a window holds no usable samples.
pub const DEFAULT_RANGE: (f64, f64) = (-1.0, 1.0);

/// Half-height applied to a degenerate (flat) window so the trace still
/// has a drawable vertical extent.
pub const DEGENERATE_HALF_RANGE: f64 = 1.0;

/// Compute the `(min, max)` display range for one channel's window.
/// Non-finite samples are skipped; an empty or all-non-finite window gets
/// `DEFAULT_RANGE`, and a flat window is widened to `v ± 1.0`.
pub fn display_range(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }

    if min > max {
        return DEFAULT_RANGE;
    }
    if min == max {
        (min - DEGENERATE_HALF_RANGE, max + DEGENERATE_HALF_RANGE)
    } else {
        (min, max)
    }
}
