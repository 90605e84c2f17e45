//! # candlewick
//!
//! Terminal rendering for market data: candlestick charts, sparklines,
//! progress bars, bordered tables and panels, plus loops that keep a view
//! live by redrawing in place or streaming lines as events arrive.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │ source  │───▶│   data   │───▶│   ui    │───▶│   live   │ │
//! │  │ (input) │    │ (types)  │    │(render) │    │ (output) │ │
//! │  └─────────┘    └──────────┘    └─────────┘    └──────────┘ │
//! │                       ▲                                     │
//! │                  ┌────┴────┐                                │
//! │                  │ config  │                                │
//! │                  └─────────┘                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`data`]**: candles, quotes, trades and table rows, plus the bounded
//!   history that feeds sparklines
//! - **[`ui`]**: pure renderers from borrowed data to styled strings, all
//!   colored through a [`Theme`]
//! - **[`live`]**: tokio loops that redraw a frame on a timer or print one
//!   line per event, stopped by a [`Shutdown`] signal
//! - **[`source`]**: a polled JSON quote file and an NDJSON trade reader
//! - **[`config`]**: layered settings (defaults, TOML file, environment)
//!
//! Rendering never fails. Missing or non-numeric values become muted
//! placeholders, flat ranges get a fixed scale, and content wider than its
//! slot spills or is clipped per [`Overflow`].
//!
//! ## Usage
//!
//! ### A boxed chart
//!
//! ```
//! use candlewick::{Candle, CandleChart, Panel, Theme};
//!
//! let candles = vec![
//!     Candle::new(1_704_067_200, 100.0, 110.0, 95.0, 105.0),
//!     Candle::new(1_704_153_600, 105.0, 108.0, 98.0, 99.0),
//! ];
//! let theme = Theme::plain();
//! let chart = CandleChart::new(40, 8).render(&candles, &theme);
//! println!("{}", Panel::new(80).title("BTC").render(&chart, &theme));
//! ```
//!
//! ### A table
//!
//! ```
//! use candlewick::{Column, Row, Table, Theme};
//! use candlewick::ui::format::fmt_price;
//!
//! let table = Table::new(vec![
//!     Column::new("symbol", "Symbol", 8),
//!     Column::new("price", "Price", 12)
//!         .right()
//!         .format(|v, _, theme| Ok(fmt_price(v.as_f64(), theme))),
//! ]);
//! let rows = vec![Row::new().with("symbol", "BTC").with("price", 50_000.0)];
//! assert_eq!(table.render_lines(&rows, &Theme::plain()).len(), 5);
//! ```
//!
//! ### A live price watch
//!
//! ```no_run
//! use std::time::Duration;
//! use candlewick::{AnsiTerminal, RedrawLoop, Shutdown, Theme};
//!
//! # tokio_test::block_on(async {
//! let (shutdown, signal) = Shutdown::new();
//! shutdown.trigger_on_ctrl_c();
//! let mut redraw = RedrawLoop::new(AnsiTerminal::stdout(), Duration::from_secs(5), Theme::dark());
//! redraw
//!     .run(|tick| Ok(vec![format!("tick {tick}")]), signal)
//!     .await
//!     .unwrap();
//! # });
//! ```

pub mod config;
pub mod data;
pub mod live;
pub mod source;
pub mod ui;

pub use config::Settings;
pub use data::{Candle, Quote, QuoteSnapshot, Row, SeriesHistory, Side, TradeEvent};
pub use live::{AnsiTerminal, RedrawLoop, Shutdown, ShutdownSignal, StreamPrinter, Tally, Terminal};
pub use source::{FileSource, QuoteSource, TradeStream};
pub use ui::{
    sparkline, terminal_width, Align, CandleChart, Column, Intent, Overflow, Panel, ProgressBar,
    Table, Theme,
};
