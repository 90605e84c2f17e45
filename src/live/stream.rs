//! Event-driven printing: one line per event, as it arrives.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::debug;

use super::shutdown::ShutdownSignal;
use super::terminal::Terminal;
use crate::data::TradeEvent;

/// Default number of events between summary blocks.
pub const DEFAULT_SUMMARY_EVERY: u64 = 20;

/// Running count and volume of printed events.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    pub count: u64,
    pub volume: f64,
}

impl Tally {
    pub fn record(&mut self, amount: f64) {
        self.count += 1;
        self.volume += amount;
    }
}

/// Anything the printer can tally.
pub trait StreamEvent {
    /// Size of the event; non-finite amounts count as zero.
    fn amount(&self) -> f64;
}

impl StreamEvent for TradeEvent {
    fn amount(&self) -> f64 {
        self.value
    }
}

/// Prints events in arrival order with a summary block every
/// `summary_every` printed events.
#[derive(Debug)]
pub struct StreamPrinter<T> {
    terminal: T,
    summary_every: u64,
    min_amount: f64,
    tally: Tally,
}

impl<T: Terminal> StreamPrinter<T> {
    pub fn new(terminal: T) -> Self {
        Self {
            terminal,
            summary_every: DEFAULT_SUMMARY_EVERY,
            min_amount: 0.0,
            tally: Tally::default(),
        }
    }

    /// `0` disables the summary blocks.
    pub fn summary_every(mut self, every: u64) -> Self {
        self.summary_every = every;
        self
    }

    /// Skip events smaller than `min`. Skipped events are not tallied.
    pub fn min_amount(mut self, min: f64) -> Self {
        self.min_amount = min;
        self
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Print events until the channel closes or `signal` fires.
    ///
    /// Returns the final tally.
    pub async fn run<E, L, S>(
        &mut self,
        mut events: mpsc::Receiver<E>,
        mut line: L,
        mut summary: S,
        mut signal: ShutdownSignal,
    ) -> Result<Tally>
    where
        E: StreamEvent,
        L: FnMut(&E) -> String,
        S: FnMut(&Tally) -> String,
    {
        loop {
            tokio::select! {
                biased;
                _ = signal.cancelled() => {
                    debug!(count = self.tally.count, "stream printer cancelled");
                    break;
                }
                event = events.recv() => match event {
                    Some(event) => self.print(&event, &mut line, &mut summary)?,
                    None => {
                        debug!(count = self.tally.count, "event stream closed");
                        break;
                    }
                },
            }
        }
        Ok(self.tally)
    }

    fn print<E, L, S>(&mut self, event: &E, line: &mut L, summary: &mut S) -> Result<()>
    where
        E: StreamEvent,
        L: FnMut(&E) -> String,
        S: FnMut(&Tally) -> String,
    {
        let amount = Some(event.amount()).filter(|a| a.is_finite()).unwrap_or(0.0);
        if amount < self.min_amount {
            return Ok(());
        }

        self.tally.record(amount);
        self.terminal.write_line(&line(event))?;
        if self.summary_every > 0 && self.tally.count % self.summary_every == 0 {
            self.terminal.write_line("")?;
            self.terminal.write_line(&summary(&self.tally))?;
            self.terminal.write_line("")?;
        }
        self.terminal.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::shutdown::Shutdown;
    use crate::live::terminal::testing::RecordingTerminal;

    struct Fill(f64);

    impl StreamEvent for Fill {
        fn amount(&self) -> f64 {
            self.0
        }
    }

    fn line(fill: &Fill) -> String {
        format!("fill {}", fill.0)
    }

    fn summary(tally: &Tally) -> String {
        format!("{} / {}", tally.count, tally.volume)
    }

    #[tokio::test]
    async fn test_prints_in_arrival_order_until_closed() {
        let (tx, rx) = mpsc::channel(8);
        for v in [3.0, 1.0, 2.0] {
            tx.send(Fill(v)).await.unwrap();
        }
        drop(tx);

        let (_shutdown, signal) = Shutdown::new();
        let mut printer = StreamPrinter::new(RecordingTerminal::default());
        let tally = printer.run(rx, line, summary, signal).await.unwrap();

        assert_eq!(printer.terminal().lines(), vec!["fill 3", "fill 1", "fill 2"]);
        assert_eq!(tally, Tally { count: 3, volume: 6.0 });
    }

    #[tokio::test]
    async fn test_summary_block_on_every_nth_event() {
        let (tx, rx) = mpsc::channel(64);
        for _ in 0..41 {
            tx.send(Fill(1.0)).await.unwrap();
        }
        drop(tx);

        let (_shutdown, signal) = Shutdown::new();
        let mut printer = StreamPrinter::new(RecordingTerminal::default());
        printer.run(rx, line, summary, signal).await.unwrap();

        let lines = printer.terminal().lines();
        assert_eq!(lines.len(), 41 + 2 * 3);
        assert_eq!(&lines[20..23], &["", "20 / 20", ""]);
        assert_eq!(&lines[43..46], &["", "40 / 40", ""]);
        assert_eq!(lines[46], "fill 1");
    }

    #[tokio::test]
    async fn test_min_amount_filters_before_tally() {
        let (tx, rx) = mpsc::channel(8);
        for v in [5.0, 500.0, f64::NAN, 50.0] {
            tx.send(Fill(v)).await.unwrap();
        }
        drop(tx);

        let (_shutdown, signal) = Shutdown::new();
        let mut printer = StreamPrinter::new(RecordingTerminal::default()).min_amount(50.0);
        let tally = printer.run(rx, line, summary, signal).await.unwrap();

        assert_eq!(printer.terminal().lines(), vec!["fill 500", "fill 50"]);
        assert_eq!(tally.count, 2);
        assert_eq!(tally.volume, 550.0);
    }

    #[tokio::test]
    async fn test_shutdown_stops_open_stream() {
        let (tx, rx) = mpsc::channel::<Fill>(8);
        tx.send(Fill(1.0)).await.unwrap();

        let (shutdown, signal) = Shutdown::new();
        let mut printer = StreamPrinter::new(RecordingTerminal::default());
        let task = async {
            tokio::task::yield_now().await;
            shutdown.trigger();
        };
        let (result, ()) = tokio::join!(printer.run(rx, line, summary, signal), task);

        assert_eq!(result.unwrap().count, 1);
        assert_eq!(printer.terminal().lines(), vec!["fill 1"]);
        drop(tx);
    }
}
