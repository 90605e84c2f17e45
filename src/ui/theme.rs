//! Semantic color theme.
//!
//! Renderers never name a color. They ask the [`Theme`] to paint text with an
//! [`Intent`], and the theme decides how (or whether) that intent is styled.
//! Styles are described with ratatui's style vocabulary and encoded to SGR
//! sequences through crossterm.

use std::fmt::Display;
use std::io::IsTerminal;

use crossterm::style::{Attribute, Color as TermColor, ContentStyle};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// What a piece of text means, independent of how it is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Gains, buys, bullish candles.
    Positive,
    /// Losses, sells, bearish candles.
    Negative,
    /// Large gains, whale buys, bullish doji ticks.
    StrongPositive,
    /// Large losses, whale sells, bearish doji ticks.
    StrongNegative,
    Neutral,
    Emphasis,
    /// Secondary text, placeholders, empty bar cells.
    Muted,
    Accent,
    /// Ticker symbols.
    Symbol,
    Price,
    MarketCap,
    Volume,
    Warning,
    /// Panel borders.
    Frame,
    /// Table borders and chart axes.
    Rule,
    /// Table column labels.
    Header,
    /// Body of a bullish candle.
    BullFill,
    /// Body of a bearish candle.
    BearFill,
    /// Leaderboard placing; 1 to 3 get medal colors.
    Rank(u8),
}

/// Terminal background the theme is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Auto,
    Dark,
    Light,
}

/// Whether to emit color at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a yes/no answer for the current process.
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }
}

/// Color and style theme for rendered output.
///
/// Use [`Theme::for_mode`] to pick a variant from user settings, or
/// [`Theme::dark()`]/[`Theme::light()`]/[`Theme::plain()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    pub positive: Color,
    pub negative: Color,
    pub strong_positive: Color,
    pub strong_negative: Color,
    pub accent: Color,
    pub price: Color,
    pub market_cap: Color,
    pub volume: Color,
    pub warning: Color,
    /// Color for panel borders.
    pub frame: Color,
    /// Style for column labels.
    pub header: Style,
    /// Style for secondary text and table rules.
    pub muted: Style,
    /// Medal styles for ranks 1, 2 and 3.
    pub medals: [Style; 3],
    /// When false, [`Theme::paint`] returns text unchanged.
    color: bool,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            positive: Color::Green,
            negative: Color::Red,
            strong_positive: Color::LightGreen,
            strong_negative: Color::LightRed,
            accent: Color::Cyan,
            price: Color::Yellow,
            market_cap: Color::Magenta,
            volume: Color::Blue,
            warning: Color::LightYellow,
            frame: Color::Cyan,
            header: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            muted: Style::new().add_modifier(Modifier::DIM),
            medals: [
                Style::new().fg(Color::LightYellow).add_modifier(Modifier::BOLD),
                Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
                Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ],
            color: true,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            positive: Color::Green,
            negative: Color::Red,
            strong_positive: Color::Green,
            strong_negative: Color::Red,
            accent: Color::Blue,
            price: Color::Rgb(150, 100, 0),
            market_cap: Color::Magenta,
            volume: Color::Blue,
            warning: Color::Rgb(180, 90, 0),
            frame: Color::Blue,
            header: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
            muted: Style::new().fg(Color::DarkGray),
            medals: [
                Style::new().fg(Color::Rgb(180, 140, 0)).add_modifier(Modifier::BOLD),
                Style::new().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
                Style::new().fg(Color::Rgb(150, 80, 20)).add_modifier(Modifier::BOLD),
            ],
            color: true,
        }
    }

    /// No styling at all, for pipes, files and `NO_COLOR`.
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::dark()
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Build the theme a user asked for.
    pub fn for_mode(choice: ThemeChoice, mode: ColorMode) -> Self {
        if !mode.enabled() {
            return Self::plain();
        }
        match choice {
            ThemeChoice::Auto => Self::auto_detect(),
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Whether this theme emits escape sequences.
    pub fn has_color(&self) -> bool {
        self.color
    }

    /// Get the style for an intent.
    pub fn style(&self, intent: Intent) -> Style {
        match intent {
            Intent::Positive => Style::new().fg(self.positive),
            Intent::Negative => Style::new().fg(self.negative),
            Intent::StrongPositive => Style::new().fg(self.strong_positive),
            Intent::StrongNegative => Style::new().fg(self.strong_negative),
            Intent::Neutral => Style::new(),
            Intent::Emphasis => Style::new().add_modifier(Modifier::BOLD),
            Intent::Muted | Intent::Rule => self.muted,
            Intent::Accent => Style::new().fg(self.accent),
            Intent::Symbol => Style::new().fg(self.accent).add_modifier(Modifier::BOLD),
            Intent::Price => Style::new().fg(self.price),
            Intent::MarketCap => Style::new().fg(self.market_cap),
            Intent::Volume => Style::new().fg(self.volume),
            Intent::Warning => Style::new().fg(self.warning),
            Intent::Frame => Style::new().fg(self.frame),
            Intent::Header => self.header,
            Intent::BullFill => Style::new().bg(self.positive),
            Intent::BearFill => Style::new().bg(self.negative),
            Intent::Rank(n @ 1..=3) => self.medals[usize::from(n - 1)],
            Intent::Rank(_) => self.muted,
        }
    }

    /// Paint `text` with the style for `intent`.
    pub fn paint(&self, intent: Intent, text: impl Display) -> String {
        if !self.color {
            return text.to_string();
        }
        to_content_style(self.style(intent)).apply(text).to_string()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

const MODIFIER_ATTRIBUTES: [(Modifier, Attribute); 9] = [
    (Modifier::BOLD, Attribute::Bold),
    (Modifier::DIM, Attribute::Dim),
    (Modifier::ITALIC, Attribute::Italic),
    (Modifier::UNDERLINED, Attribute::Underlined),
    (Modifier::SLOW_BLINK, Attribute::SlowBlink),
    (Modifier::RAPID_BLINK, Attribute::RapidBlink),
    (Modifier::REVERSED, Attribute::Reverse),
    (Modifier::HIDDEN, Attribute::Hidden),
    (Modifier::CROSSED_OUT, Attribute::CrossedOut),
];

fn to_content_style(style: Style) -> ContentStyle {
    let mut out = ContentStyle::new();
    out.foreground_color = style.fg.map(to_term_color);
    out.background_color = style.bg.map(to_term_color);
    for (modifier, attribute) in MODIFIER_ATTRIBUTES {
        if style.add_modifier.contains(modifier) {
            out.attributes.set(attribute);
        }
    }
    out
}

/// ratatui names the bright colors `Light*`; crossterm names the normal ones `Dark*`.
fn to_term_color(color: Color) -> TermColor {
    match color {
        Color::Reset => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightYellow => TermColor::Yellow,
        Color::LightBlue => TermColor::Blue,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Indexed(i) => TermColor::AnsiValue(i),
    }
}
