//! Event stream over a line supply with one event of lookahead.

use std::io::{self, BufRead};

use crate::event::Event;
use crate::tokenizer::parse_line;

/// Buffer size for `BufReader` wrappers (64KB).
pub const BUFFER_SIZE: usize = 64 * 1024;

/// Supplies raw log lines, one at a time.
pub trait LineSource {
    /// Returns the next line, or `None` once input is exhausted.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// [`LineSource`] over any buffered reader.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// single garbled line never ends the stream.
#[derive(Debug)]
pub struct ReaderLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> ReaderLines<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

/// Tokenizes lines on demand, dropping the ones that do not parse.
#[derive(Debug)]
pub struct EventCursor<L> {
    lines: L,
    pending: Option<Event>,
    discarded: usize,
}

impl<L: LineSource> EventCursor<L> {
    pub const fn new(lines: L) -> Self {
        Self {
            lines,
            pending: None,
            discarded: 0,
        }
    }

    /// Returns the pushed-back event if any, otherwise the next parsable line.
    ///
    /// `Ok(None)` signals end of input.
    pub fn next_event(&mut self) -> io::Result<Option<Event>> {
        if let Some(event) = self.pending.take() {
            return Ok(Some(event));
        }

        while let Some(line) = self.lines.next_line()? {
            let line = line.trim();
            match parse_line(line) {
                Ok(event) => return Ok(Some(event)),
                Err(e) => {
                    self.discarded += 1;
                    tracing::debug!(error = %e, line, "discarding log line");
                }
            }
        }

        Ok(None)
    }

    /// Stores one event to be replayed by the following [`next_event`](Self::next_event).
    ///
    /// # Panics
    ///
    /// Panics if an event is already pending.
    pub fn pushback(&mut self, event: Event) {
        assert!(
            self.pending.is_none(),
            "pushback called twice without an intervening next"
        );
        self.pending = Some(event);
    }

    /// Number of lines dropped because they failed to tokenize.
    pub const fn discarded(&self) -> usize {
        self.discarded
    }
}
