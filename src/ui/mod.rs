//! Text renderers for market data.
//!
//! Every renderer is a pure function (or a small configured struct) that
//! borrows its input and a [`Theme`] and returns styled text. Nothing here
//! writes to the terminal; the live loops in [`crate::live`] do that.
//!
//! ## Submodules
//!
//! - [`text`]: ANSI-aware width, padding, truncation and overflow policy
//! - [`theme`]: semantic intents and their styles, with light/dark/plain variants
//! - [`scale`]: value to grid index mapping
//! - [`sparkline`]: single-line trend strips
//! - [`progress`]: fixed-width percentage bars
//! - [`candlestick`]: OHLC charts with price and date axes
//! - [`table`]: bordered tables with per-column formatters
//! - [`panel`]: bordered boxes sized to the terminal
//! - [`format`]: price, change, market cap, volume and time formatters
//! - [`rule`]: horizontal rules and spinner frames
//! - [`tape`]: trade and quote lines for the live views
//!
//! ## Composition
//!
//! ```text
//! ┌─ BTC ─────────────────────────────────────┐
//! │ Panel                                     │
//! │   CandleChart / Table                     │
//! │   sparkline · ProgressBar                 │
//! └───────────────────────────────────────────┘
//! ```

pub mod candlestick;
pub mod format;
pub mod panel;
pub mod progress;
pub mod rule;
pub mod scale;
pub mod sparkline;
pub mod table;
pub mod tape;
pub mod text;
pub mod theme;

pub use candlestick::CandleChart;
pub use panel::{terminal_width, Panel};
pub use progress::ProgressBar;
pub use sparkline::sparkline;
pub use table::{Column, Table};
pub use text::{pad, strip_ansi, visible_width, Align, Overflow};
pub use theme::{ColorMode, Intent, Theme, ThemeChoice};
