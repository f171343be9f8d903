//! Terminal rendering of reply snapshots.

use std::io::{self, Write};

/// Prints each snapshot as the suffix it adds to the previous one.
///
/// Snapshots only ever grow by appending, so the already printed prefix
/// never needs to be redrawn.
pub struct SuffixPrinter<W: Write> {
    out: W,
    printed: usize,
}

impl<W: Write> SuffixPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out, printed: 0 }
    }

    /// Write whatever `snapshot` adds beyond what was printed so far.
    pub fn update(&mut self, snapshot: &str) -> io::Result<()> {
        match snapshot.get(self.printed..) {
            Some(suffix) if !suffix.is_empty() => {
                self.out.write_all(suffix.as_bytes())?;
                self.out.flush()?;
                self.printed = snapshot.len();
            }
            _ => {}
        }
        Ok(())
    }

    /// Bytes of reply text printed so far.
    pub fn printed(&self) -> usize {
        self.printed
    }

    /// Terminate the reply with a newline if anything was printed.
    pub fn finish(mut self) -> io::Result<W> {
        if self.printed > 0 {
            self.out.write_all(b"\n")?;
            self.out.flush()?;
        }
        Ok(self.out)
    }
}
