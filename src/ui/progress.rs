//! Horizontal fill bars for percentages.

use super::text::{pad, Align};
use super::theme::{Intent, Theme};

const FILLED: char = '█';
const EMPTY: char = '░';

/// Width reserved for the label, enough for `100.0%` plus a gap.
const LABEL_WIDTH: usize = 7;

/// A fixed-width percentage bar.
///
/// Only the fill proportion is clamped to `[0, 100]`. The optional label
/// prints the value as given, so a share of `140.0%` still reads `140.0%`.
#[derive(Debug, Clone, Copy)]
pub struct ProgressBar {
    pub width: usize,
    pub intent: Intent,
    pub label: bool,
}

impl ProgressBar {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            intent: Intent::Accent,
            label: true,
        }
    }

    pub fn intent(mut self, intent: Intent) -> Self {
        self.intent = intent;
        self
    }

    pub fn label(mut self, label: bool) -> Self {
        self.label = label;
        self
    }

    /// Number of solid cells for `percent`.
    pub fn filled_cells(&self, percent: f64) -> usize {
        if !percent.is_finite() {
            return 0;
        }
        let share = percent.clamp(0.0, 100.0) / 100.0;
        ((share * self.width as f64).round() as usize).min(self.width)
    }

    pub fn render(&self, percent: f64, theme: &Theme) -> String {
        let filled = self.filled_cells(percent);
        let empty = self.width - filled;

        let mut out = String::new();
        if filled > 0 {
            out.push_str(&theme.paint(self.intent, FILLED.to_string().repeat(filled)));
        }
        if empty > 0 {
            out.push_str(&theme.paint(Intent::Muted, EMPTY.to_string().repeat(empty)));
        }
        if self.label {
            let text = if percent.is_finite() {
                format!("{percent:.1}%")
            } else {
                "N/A".to_string()
            };
            out.push_str(&theme.paint(Intent::Muted, pad(&text, LABEL_WIDTH, Align::Right)));
        }
        out
    }
}
