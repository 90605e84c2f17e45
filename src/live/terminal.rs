//! Output sink for the live loops.

use std::io::{self, Stdout, Write};

use anyhow::Result;
use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

/// Where live frames go.
///
/// Frames are written line by line. Before a frame replaces the previous
/// one, the loop calls [`Terminal::redraw_in_place`] with the previous
/// frame's line count.
pub trait Terminal {
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Move back over the last `previous_line_count` lines and clear them.
    fn redraw_in_place(&mut self, previous_line_count: usize) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}

/// [`Terminal`] over any writer, using crossterm cursor commands.
#[derive(Debug)]
pub struct AnsiTerminal<W: Write> {
    out: W,
}

impl AnsiTerminal<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> AnsiTerminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Terminal for AnsiTerminal<W> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn redraw_in_place(&mut self, previous_line_count: usize) -> Result<()> {
        if previous_line_count == 0 {
            return Ok(());
        }
        let up = u16::try_from(previous_line_count).unwrap_or(u16::MAX);
        queue!(
            self.out,
            MoveUp(up),
            MoveToColumn(0),
            Clear(ClearType::FromCursorDown)
        )?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Line(String),
        Redraw(usize),
        Flush,
    }

    /// Records every call instead of writing.
    #[derive(Debug, Default)]
    pub struct RecordingTerminal {
        pub ops: Vec<Op>,
    }

    impl RecordingTerminal {
        pub fn lines(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Line(l) => Some(l.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn redraws(&self) -> Vec<usize> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Redraw(n) => Some(*n),
                    _ => None,
                })
                .collect()
        }
    }

    impl Terminal for RecordingTerminal {
        fn write_line(&mut self, line: &str) -> Result<()> {
            self.ops.push(Op::Line(line.to_string()));
            Ok(())
        }

        fn redraw_in_place(&mut self, previous_line_count: usize) -> Result<()> {
            self.ops.push(Op::Redraw(previous_line_count));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.ops.push(Op::Flush);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_line_appends_newline() {
        let mut term = AnsiTerminal::new(Vec::new());
        term.write_line("one").unwrap();
        term.write_line("two").unwrap();
        term.flush().unwrap();
        assert_eq!(term.into_inner(), b"one\ntwo\n");
    }

    #[test]
    fn test_redraw_moves_up_and_clears() {
        let mut term = AnsiTerminal::new(Vec::new());
        term.redraw_in_place(3).unwrap();
        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(out.contains("\x1b[3A"), "{out:?}");
        assert!(out.contains("\x1b[0J") || out.contains("\x1b[J"), "{out:?}");
    }

    #[test]
    fn test_redraw_of_nothing_writes_nothing() {
        let mut term = AnsiTerminal::new(Vec::new());
        term.redraw_in_place(0).unwrap();
        assert!(term.into_inner().is_empty());
    }
}
