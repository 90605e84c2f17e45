//! Timed redraw-in-place loop.

use std::time::Duration;

use anyhow::Result;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use super::shutdown::ShutdownSignal;
use super::terminal::Terminal;
use crate::ui::{Intent, Theme};

/// Shortest interval the loop accepts.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Redraws a whole frame every interval, replacing the previous frame.
///
/// The first frame is drawn immediately. Each later frame first moves the
/// cursor back over the previous frame's lines.
#[derive(Debug)]
pub struct RedrawLoop<T> {
    terminal: T,
    interval: Duration,
    theme: Theme,
    tick: u64,
    previous_lines: usize,
}

impl<T: Terminal> RedrawLoop<T> {
    pub fn new(terminal: T, interval: Duration, theme: Theme) -> Self {
        Self {
            terminal,
            interval: interval.max(MIN_INTERVAL),
            theme,
            tick: 0,
            previous_lines: 0,
        }
    }

    /// Frames drawn so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Draw frames until `signal` fires, returning the number drawn.
    ///
    /// `render` gets the 1-based tick number. If it fails, that frame is a
    /// single error line and the loop carries on. Terminal write errors end
    /// the loop.
    pub async fn run<F>(&mut self, mut render: F, mut signal: ShutdownSignal) -> Result<u64>
    where
        F: FnMut(u64) -> Result<Vec<String>>,
    {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!(interval = ?self.interval, "redraw loop started");

        loop {
            tokio::select! {
                biased;
                _ = signal.cancelled() => break,
                _ = ticker.tick() => {
                    self.tick += 1;
                    let frame = render(self.tick).unwrap_or_else(|e| {
                        warn!(tick = self.tick, error = %e, "frame render failed");
                        vec![self.theme.paint(Intent::Negative, format!("  ✗ {e:#}"))]
                    });
                    self.draw(&frame)?;
                }
            }
        }

        debug!(ticks = self.tick, "redraw loop stopped");
        Ok(self.tick)
    }

    fn draw(&mut self, frame: &[String]) -> Result<()> {
        if self.previous_lines > 0 {
            self.terminal.redraw_in_place(self.previous_lines)?;
        }
        for line in frame {
            self.terminal.write_line(line)?;
        }
        self.terminal.flush()?;
        self.previous_lines = frame.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::shutdown::Shutdown;
    use crate::live::terminal::testing::{Op, RecordingTerminal};
    use anyhow::bail;

    #[tokio::test(start_paused = true)]
    async fn test_stops_after_third_tick() {
        let (shutdown, signal) = Shutdown::new();
        let mut redraw = RedrawLoop::new(RecordingTerminal::default(), Duration::from_secs(5), Theme::plain());

        let start = time::Instant::now();
        let ticks = redraw
            .run(
                |tick| {
                    if tick == 3 {
                        shutdown.trigger();
                    }
                    Ok(vec![format!("frame {tick}"), "---".to_string()])
                },
                signal,
            )
            .await
            .unwrap();

        assert_eq!(ticks, 3);
        assert_eq!(redraw.tick(), 3);
        assert_eq!(
            redraw.terminal().lines(),
            vec!["frame 1", "---", "frame 2", "---", "frame 3", "---"]
        );
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(10) && elapsed < Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn test_moves_up_by_previous_frame_height() {
        let (shutdown, signal) = Shutdown::new();
        let mut redraw = RedrawLoop::new(RecordingTerminal::default(), Duration::from_secs(1), Theme::plain());

        redraw
            .run(
                |tick| {
                    if tick == 3 {
                        shutdown.trigger();
                    }
                    Ok(vec!["x".to_string(); tick as usize])
                },
                signal,
            )
            .await
            .unwrap();

        assert_eq!(redraw.terminal().redraws(), vec![1, 2]);
        assert_eq!(redraw.terminal().ops.first(), Some(&Op::Line("x".to_string())));
        assert_eq!(redraw.terminal().ops.last(), Some(&Op::Flush));
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_error_becomes_error_line() {
        let (shutdown, signal) = Shutdown::new();
        let mut redraw = RedrawLoop::new(RecordingTerminal::default(), Duration::from_secs(1), Theme::plain());

        redraw
            .run(
                |tick| {
                    if tick == 2 {
                        shutdown.trigger();
                        bail!("quote file unreadable");
                    }
                    Ok(vec!["ok".to_string()])
                },
                signal,
            )
            .await
            .unwrap();

        assert_eq!(
            redraw.terminal().lines(),
            vec!["ok", "  ✗ quote file unreadable"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_draws_nothing() {
        let (shutdown, signal) = Shutdown::new();
        shutdown.trigger();
        let mut redraw = RedrawLoop::new(RecordingTerminal::default(), Duration::from_secs(1), Theme::plain());
        let ticks = redraw.run(|_| Ok(vec!["never".to_string()]), signal).await.unwrap();
        assert_eq!(ticks, 0);
        assert!(redraw.terminal().ops.is_empty());
    }
}
