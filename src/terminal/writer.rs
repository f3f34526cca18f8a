//! `TerminalWriter`: prints paced pieces to a terminal.

use crate::error::{Result, TypewriterError};
use crate::pipeline::TypewriterStream;
use crossterm::{cursor, queue, style::Print};
use futures::StreamExt;
use std::io::{self, Stdout, Write};
use unicode_width::UnicodeWidthStr;

/// Writes each piece as soon as it is released by the scheduler.
///
/// Every piece is flushed individually so the reveal is visible; the
/// cursor is hidden while a stream plays.
pub struct TerminalWriter<W: Write> {
    out: W,
    /// Display column after the last piece.
    column: usize,
    /// Pieces written so far.
    pieces: usize,
    /// Whether to hide the cursor while playing.
    hide_cursor: bool,
}

impl TerminalWriter<Stdout> {
    /// Writer on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalWriter<W> {
    /// Create a writer on `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            column: 0,
            pieces: 0,
            hide_cursor: true,
        }
    }

    /// Keep the cursor visible while playing.
    #[must_use]
    pub const fn with_visible_cursor(mut self) -> Self {
        self.hide_cursor = false;
        self
    }

    /// Display column after the last written piece.
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Number of pieces written.
    pub const fn pieces(&self) -> usize {
        self.pieces
    }

    /// Consume the writer and return the underlying output.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one piece and flush it.
    pub fn write_piece(&mut self, piece: &str) -> io::Result<()> {
        queue!(self.out, Print(piece))?;
        self.out.flush()?;

        self.pieces += 1;
        match piece.rsplit_once('\n') {
            Some((_, tail)) => self.column = UnicodeWidthStr::width(tail),
            None => self.column += UnicodeWidthStr::width(piece),
        }
        Ok(())
    }

    /// Play `stream` to the end, writing every piece.
    ///
    /// Returns the number of pieces written. The cursor is restored even
    /// when the stream fails.
    pub async fn play(&mut self, mut stream: TypewriterStream) -> Result<usize> {
        if self.hide_cursor {
            queue!(self.out, cursor::Hide).map_err(io_error)?;
        }

        let start = self.pieces;
        let outcome = async {
            while let Some(piece) = stream.next().await {
                self.write_piece(&piece?).map_err(io_error)?;
            }
            Ok::<(), TypewriterError>(())
        }
        .await;

        if self.hide_cursor {
            queue!(self.out, cursor::Show).map_err(io_error)?;
        }
        self.out.flush().map_err(io_error)?;

        outcome.map(|()| self.pieces - start)
    }
}

fn io_error(err: io::Error) -> TypewriterError {
    TypewriterError::Io(err.to_string())
}
