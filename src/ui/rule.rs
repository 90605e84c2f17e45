//! Horizontal rules and spinner frames.

use super::theme::{Intent, Theme};

/// Braille spinner, one frame per tick.
pub const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// A muted rule `width` columns wide.
pub fn hr(width: usize, theme: &Theme) -> String {
    theme.paint(Intent::Muted, "─".repeat(width))
}

/// The spinner line for `tick`: `  ⠙ Loading...`.
///
/// Pure; the host decides how often to call it and where to draw it.
pub fn spinner_frame(tick: u64, label: &str, theme: &Theme) -> String {
    let frame = SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize];
    format!(
        "  {} {}",
        theme.paint(Intent::Accent, frame),
        theme.paint(Intent::Muted, format!("{label}..."))
    )
}
