//! Local data sources for the CLI views.
//!
//! The renderers never fetch anything. These sources are the thin layer
//! that turns files and byte streams into the normalized types in
//! [`crate::data`]:
//!
//! - [`FileSource`]: a JSON quote file, re-read when it changes
//! - [`TradeStream`]: newline-delimited JSON trades from any async reader
//! - [`read_json`]: one-shot load of candles or table rows

mod file;
mod stream;

pub use file::{read_json, FileSource};
pub use stream::{parse_trades, TradeStream};

use std::fmt::Debug;
use std::sync::{Mutex, PoisonError};

use crate::data::QuoteSnapshot;

/// A polled source of quote snapshots.
///
/// # Example
///
/// ```
/// use candlewick::source::{FileSource, QuoteSource};
///
/// let mut source = FileSource::new("quotes.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} symbols", snapshot.len());
/// }
/// ```
pub trait QuoteSource: Send + Debug {
    /// Latest snapshot if there is new data, `None` otherwise. Non-blocking.
    fn poll(&mut self) -> Option<QuoteSnapshot>;

    /// Human-readable description for status lines.
    fn description(&self) -> &str;

    /// Error from the last poll, if it failed.
    fn error(&self) -> Option<&str>;
}

/// Replace a shared error slot, even if a panicking writer poisoned it.
fn set_error(slot: &Mutex<Option<String>>, error: Option<String>) {
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = error;
}
