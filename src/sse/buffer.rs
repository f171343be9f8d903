//! Line buffering across arbitrary chunk boundaries.

/// Accumulates decoded text and hands out complete lines.
///
/// A line ends at `\n`; a `\r` right before it is stripped. Text after the
/// last `\n` stays buffered until more input arrives.
///
/// Consumed lines are only cut from the front of the buffer once they make
/// up at least half of it, and the unterminated tail is never rescanned, so
/// both many short lines and one long line fed piecemeal stay linear.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: String,
    /// Start of the first line not yet handed out
    start: usize,
    /// Everything in `start..scanned` is known to contain no `\n`
    scanned: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded text.
    pub fn push_str(&mut self, text: &str) {
        if self.start > 0 && self.start * 2 >= self.buffer.len() {
            self.buffer.drain(..self.start);
            self.scanned -= self.start;
            self.start = 0;
        }
        self.buffer.push_str(text);
    }

    /// Remove and return the first complete line, if any.
    pub fn next_line(&mut self) -> Option<String> {
        let Some(offset) = self.buffer[self.scanned..].find('\n') else {
            self.scanned = self.buffer.len();
            return None;
        };
        let end = self.scanned + offset;
        let mut line = &self.buffer[self.start..end];
        if let Some(stripped) = line.strip_suffix('\r') {
            line = stripped;
        }
        let line = line.to_string();

        self.start = end + 1;
        self.scanned = self.start;
        if self.start == self.buffer.len() {
            self.clear();
        }
        Some(line)
    }

    /// Bytes of an unterminated line still waiting for its `\n`.
    pub fn remaining(&self) -> &str {
        &self.buffer[self.start..]
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.buffer.len()
    }

    /// Drop everything buffered.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.start = 0;
        self.scanned = 0;
    }
}
