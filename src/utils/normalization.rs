//! Normalization Utilities
//!
//! Quantile extraction for reference-profile construction and min-max rescaling of
//! ordinal ranks for the SuperNutri aggregate.

/// Sorted copy of `values` with NaN entries removed
pub fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Quantile of an already sorted, NaN-free slice using linear interpolation
///
/// Algorithm:
/// 1. Position h = (n - 1) × q
/// 2. Interpolate between the values at floor(h) and ceil(h)
///
/// `q` is clamped to [0, 1]. Returns `None` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;

    let lower = sorted[lo];
    let upper = sorted[hi];
    if lo == hi || upper == lower {
        return Some(lower);
    }

    Some(lower + (h - lo as f64) * (upper - lower))
}

/// Quantile of unsorted values (NaN skipped)
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    quantile_sorted(&sorted_finite(values), q)
}

/// Rescale `value` from [min, max] to [0, 1]
///
/// A degenerate range (min == max) maps to 0.0.
pub fn min_max_normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    (value - min) / (max - min)
}
