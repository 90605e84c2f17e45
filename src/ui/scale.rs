//! Mapping continuous values onto discrete grid positions.

/// Map `value` in `[min, max]` onto a bucket index in `[0, buckets - 1]`.
///
/// A flat range (`max == min`) divides by 1 instead of 0, so every value
/// lands on the same bucket. Non-finite values land on bucket 0.
pub fn map_to_index(value: f64, min: f64, max: f64, buckets: usize) -> usize {
    if buckets == 0 {
        return 0;
    }
    let span = max - min;
    let range = if span == 0.0 { 1.0 } else { span };
    let scaled = ((value - min) / range * (buckets - 1) as f64).round();
    if !scaled.is_finite() || scaled <= 0.0 {
        return 0;
    }
    (scaled as usize).min(buckets - 1)
}

/// Like [`map_to_index`] but for top-down grids: row 0 holds `max`,
/// row `height - 1` holds `min`.
pub fn map_to_row(value: f64, min: f64, max: f64, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    height - 1 - map_to_index(value, min, max, height)
}

/// Smallest and largest finite value, or `None` if there are none.
pub fn finite_bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
