//! Live output loops.
//!
//! Two ways to keep a terminal view current:
//!
//! - [`RedrawLoop`]: rebuild the whole frame on a timer and draw it over the
//!   previous one.
//! - [`StreamPrinter`]: append one line per incoming event, with a running
//!   summary block every so often.
//!
//! Both run on tokio, own all of their state, and stop when the
//! [`ShutdownSignal`] fires. Output goes through a [`Terminal`], so tests can
//! record frames instead of writing escape sequences.

mod redraw;
mod shutdown;
mod stream;
mod terminal;

pub use redraw::RedrawLoop;
pub use shutdown::{Shutdown, ShutdownSignal};
pub use stream::{StreamEvent, StreamPrinter, Tally, DEFAULT_SUMMARY_EVERY};
pub use terminal::{AnsiTerminal, Terminal};
