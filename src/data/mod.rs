//! Input data for the renderers.
//!
//! Everything here is plain value data: callers fetch and normalize it, and
//! the renderers only ever borrow it.
//!
//! ## Submodules
//!
//! - [`market`]: candles, quotes and trade events, with lenient numeric decoding
//! - [`row`]: key/value records for the table renderer
//! - [`history`]: bounded per-symbol history feeding sparklines
//! - [`duration`]: refresh interval parsing and formatting

pub mod duration;
pub mod history;
pub mod market;
pub mod row;

pub use history::SeriesHistory;
pub use market::{Candle, Quote, QuoteSnapshot, Side, TradeEvent};
pub use row::Row;
