//! ASCII candlestick charts.
//!
//! Layout of a rendered chart (`H` grid rows plus two axis rows):
//!
//! ```text
//!    $105.0000 │ │   │
//!    $102.5000 │ █   █ │
//!    $100.0000 │ │ ─ │
//!              └──────────
//!                Jan 1 Jan 2
//! ```
//!
//! Each candle takes two columns: the candle itself and a gap. When there
//! are more candles than fit, the oldest are dropped, never squeezed.

use super::format::{date_text, fmt_price};
use super::scale::{finite_bounds, map_to_row};
use super::text::{pad, truncate, Align};
use super::theme::{Intent, Theme};
use crate::data::Candle;

/// Columns reserved for the price axis labels.
pub const LABEL_WIDTH: usize = 12;

/// Columns between the start of a line and the first grid cell.
pub const GRID_OFFSET: usize = LABEL_WIDTH + 3;

const WICK: char = '│';
const TICK: char = '─';
/// Body glyph when there is no background color to show the body with.
const PLAIN_BODY: char = '┃';

/// Target number of time labels under the chart.
const TIME_LABELS: usize = 5;

const NO_DATA: &str = "  No data available";

/// Candlestick chart dimensions.
#[derive(Debug, Clone, Copy)]
pub struct CandleChart {
    /// Columns available for the plot area.
    pub width: usize,
    /// Grid rows.
    pub height: usize,
}

impl CandleChart {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// How many of `available` candles fit.
    pub fn visible_count(&self, available: usize) -> usize {
        available.min(self.width / 2)
    }

    pub fn render(&self, candles: &[Candle], theme: &Theme) -> String {
        self.render_lines(candles, theme).join("\n")
    }

    /// Render to lines: `height` grid rows, the axis rule, the time labels.
    ///
    /// With nothing to plot this is a single muted placeholder line.
    pub fn render_lines(&self, candles: &[Candle], theme: &Theme) -> Vec<String> {
        let n = self.visible_count(candles.len());
        let visible = &candles[candles.len() - n..];
        let bounds = finite_bounds(
            visible
                .iter()
                .filter(|c| c.is_finite())
                .flat_map(|c| [c.low, c.high]),
        );
        let Some((min, max)) = bounds else {
            return vec![theme.paint(Intent::Muted, NO_DATA)];
        };

        let height = self.height.max(1);
        let grid = plot(visible, min, max, height, theme);

        let span = max - min;
        let mut lines: Vec<String> = grid
            .into_iter()
            .enumerate()
            .map(|(row, cells)| {
                let frac = if height > 1 {
                    1.0 - row as f64 / (height - 1) as f64
                } else {
                    1.0
                };
                let label = pad(&fmt_price(Some(min + frac * span), theme), LABEL_WIDTH, Align::Right);
                format!("{label} {} {}", theme.paint(Intent::Rule, WICK), cells.concat())
            })
            .collect();

        let rule = format!("└{}", "─".repeat(n * 2 + 1));
        lines.push(format!("{}{}", " ".repeat(LABEL_WIDTH + 1), theme.paint(Intent::Rule, rule)));
        lines.push(format!("{}{}", " ".repeat(GRID_OFFSET), time_labels(visible, theme)));
        lines
    }
}

/// Draw candles into a `height` x `2 * len` grid of painted cells.
fn plot(candles: &[Candle], min: f64, max: f64, height: usize, theme: &Theme) -> Vec<Vec<String>> {
    let mut grid = vec![vec![" ".to_string(); candles.len() * 2]; height];
    let body = if theme.has_color() { ' ' } else { PLAIN_BODY };
    let row = |price: f64| map_to_row(price, min, max, height);

    for (i, candle) in candles.iter().enumerate() {
        if !candle.is_finite() {
            continue;
        }
        let x = i * 2;
        let (line, fill, tick) = if candle.is_bullish() {
            (Intent::Positive, Intent::BullFill, Intent::StrongPositive)
        } else {
            (Intent::Negative, Intent::BearFill, Intent::StrongNegative)
        };

        let (high, low) = (row(candle.high), row(candle.low));
        for r in high.min(low)..=high.max(low) {
            grid[r][x] = theme.paint(line, WICK);
        }

        if candle.open == candle.close {
            grid[row(candle.open)][x] = theme.paint(tick, TICK);
        } else {
            let top = row(candle.open.max(candle.close));
            let bottom = row(candle.open.min(candle.close));
            for r in top..=bottom {
                grid[r][x] = theme.paint(fill, body);
            }
        }
    }
    grid
}

/// Date labels every `ceil(n / 5)` candles, each cut to fit its slot.
///
/// The row never extends past the grid.
fn time_labels(candles: &[Candle], theme: &Theme) -> String {
    let stride = candles.len().div_ceil(TIME_LABELS).max(1);
    let slot = stride * 2;
    let text: String = candles
        .iter()
        .step_by(stride)
        .map(|c| pad(&truncate(&date_text(c.open_time), slot - 1), slot, Align::Left))
        .collect();
    theme.paint(Intent::Muted, truncate(&text, candles.len() * 2))
}
