//! Single-line trend strips.

use super::scale::{finite_bounds, map_to_index};
use super::theme::{Intent, Theme};

/// Sparkline characters (8 levels of height).
pub const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Placeholder glyph for a value that is not a number.
const GAP: char = '·';

/// Render the last `width` values of `series` as a glyph strip.
///
/// The scale is relative to the visible slice, not the whole series. The
/// strip is green when the last visible value is at least the first one,
/// red otherwise. An empty series renders as a muted dashed line.
pub fn sparkline(series: &[f64], width: usize, theme: &Theme) -> String {
    if series.is_empty() {
        return theme.paint(Intent::Muted, "─".repeat(width));
    }

    let slice = &series[series.len().saturating_sub(width)..];
    let Some((min, max)) = finite_bounds(slice.iter().copied()) else {
        return theme.paint(Intent::Muted, GAP.to_string().repeat(slice.len()));
    };

    let mut finite = slice.iter().filter(|v| v.is_finite());
    let first = finite.next().copied().unwrap_or(min);
    let last = finite.last().copied().unwrap_or(first);
    let trend = if last >= first {
        Intent::Positive
    } else {
        Intent::Negative
    };

    let mut out = String::new();
    let mut run = String::new();
    for value in slice {
        if value.is_finite() {
            run.push(SPARKLINE_CHARS[map_to_index(*value, min, max, SPARKLINE_CHARS.len())]);
        } else {
            if !run.is_empty() {
                out.push_str(&theme.paint(trend, &run));
                run.clear();
            }
            out.push_str(&theme.paint(Intent::Muted, GAP));
        }
    }
    if !run.is_empty() {
        out.push_str(&theme.paint(trend, &run));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::text::{strip_ansi, visible_width};

    fn plain(series: &[f64], width: usize) -> String {
        sparkline(series, width, &Theme::plain())
    }

    #[test]
    fn test_ramp_spans_full_range() {
        let values: Vec<f64> = (0..8).map(f64::from).collect();
        assert_eq!(plain(&values, 8), "▁▂▃▄▅▆▇█");
    }

    #[test]
    fn test_takes_last_width_values() {
        let values = [100.0, 0.0, 1.0];
        // 100 is outside the visible slice, so it does not flatten the scale.
        assert_eq!(plain(&values, 2), "▁█");
    }

    #[test]
    fn test_shorter_series_than_width() {
        assert_eq!(visible_width(&plain(&[1.0, 2.0, 3.0], 20)), 3);
    }

    #[test]
    fn test_flat_series_identical_glyphs() {
        let out = plain(&[5.0; 12], 10);
        assert_eq!(out.chars().count(), 10);
        let first = out.chars().next().unwrap();
        assert!(out.chars().all(|c| c == first));
    }

    #[test]
    fn test_empty_series_placeholder() {
        assert_eq!(plain(&[], 6), "──────");
    }

    #[test]
    fn test_trend_color() {
        let theme = Theme::dark();
        let up = sparkline(&[1.0, 2.0, 2.0], 10, &theme);
        let down = sparkline(&[3.0, 2.0, 1.0], 10, &theme);
        assert_eq!(up, theme.paint(Intent::Positive, "▁██"));
        assert_eq!(down, theme.paint(Intent::Negative, "█▅▁"));
    }

    #[test]
    fn test_nan_renders_placeholder_slot() {
        let out = plain(&[1.0, f64::NAN, 3.0], 10);
        assert_eq!(strip_ansi(&out), "▁·█");
    }
}
