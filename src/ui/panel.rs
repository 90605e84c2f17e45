//! Bordered panels sized to the terminal.

use super::text::{fit, truncate, visible_width, Align, Overflow};
use super::theme::{Intent, Theme};

/// Widest a panel gets on large terminals.
pub const DEFAULT_MAX_WIDTH: usize = 90;

/// Assumed width when the terminal cannot be queried (pipes, CI).
pub const FALLBACK_TERMINAL_WIDTH: usize = 80;

/// Smallest panel that can still frame anything.
const MIN_WIDTH: usize = 4;

/// Current terminal width in columns.
pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| usize::from(cols))
        .ok()
        .filter(|w| *w > 0)
        .unwrap_or(FALLBACK_TERMINAL_WIDTH)
}

/// A box drawn around multi-line content, with an optional title in the
/// top border.
#[derive(Debug, Clone)]
pub struct Panel {
    terminal_width: usize,
    max_width: usize,
    title: Option<String>,
    overflow: Overflow,
}

impl Panel {
    pub fn new(terminal_width: usize) -> Self {
        Self {
            terminal_width,
            max_width: DEFAULT_MAX_WIDTH,
            title: None,
            overflow: Overflow::default(),
        }
    }

    pub fn max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into()).filter(|t| !t.is_empty());
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Outer width: two columns narrower than the terminal, capped at `max_width`.
    pub fn width(&self) -> usize {
        self.terminal_width
            .saturating_sub(2)
            .min(self.max_width)
            .max(MIN_WIDTH)
    }

    /// Columns available to each content line.
    pub fn content_width(&self) -> usize {
        self.width() - 4
    }

    pub fn render(&self, content: &str, theme: &Theme) -> String {
        self.render_lines(content, theme).join("\n")
    }

    pub fn render_lines(&self, content: &str, theme: &Theme) -> Vec<String> {
        let inner = self.width() - 2;
        let frame = |s: String| theme.paint(Intent::Frame, s);

        let mut lines = Vec::new();
        lines.push(match &self.title {
            Some(title) => {
                let title = match self.overflow {
                    Overflow::Spill => title.clone(),
                    Overflow::Clip => truncate(title, inner.saturating_sub(4)),
                };
                let rule = "─".repeat(inner.saturating_sub(visible_width(&title) + 3));
                format!(
                    "{}{}{}",
                    frame("┌─ ".to_string()),
                    theme.paint(Intent::Emphasis, &title),
                    frame(format!(" {rule}┐"))
                )
            }
            None => frame(format!("┌{}┐", "─".repeat(inner))),
        });

        let bar = frame("│".to_string());
        for line in content.split('\n') {
            let body = fit(line, self.content_width(), Align::Left, self.overflow);
            lines.push(format!("{bar} {body} {bar}"));
        }

        lines.push(frame(format!("└{}┘", "─".repeat(inner))));
        lines
    }
}
