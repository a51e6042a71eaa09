//! Bounded buffered line reading with byte accounting.
//!
//! Cursors read one line at a time through a `BufReader` with an explicit
//! capacity so the in-flight buffer stays bounded regardless of file size.

use std::io::{self, BufRead, BufReader, Read};

/// Line reader over any byte stream that counts the raw bytes it consumed.
pub struct BoundedLineReader<R: Read> {
    inner: BufReader<R>,
    scratch: Vec<u8>,
    bytes_read: u64,
}

impl<R: Read> BoundedLineReader<R> {
    /// Create a new reader with a maximum internal buffer size.
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            inner: BufReader::with_capacity(capacity.max(1), reader),
            scratch: Vec::new(),
            bytes_read: 0,
        }
    }

    /// Read the next line into `line`, without its `\n` or `\r\n` terminator.
    ///
    /// Returns the number of raw bytes consumed (terminator included), or
    /// `None` at end of input. Invalid UTF-8 is replaced, never rejected.
    pub fn next_line(&mut self, line: &mut String) -> io::Result<Option<usize>> {
        self.scratch.clear();
        let n = self.inner.read_until(b'\n', &mut self.scratch)?;
        if n == 0 {
            return Ok(None);
        }
        self.bytes_read += n as u64;

        let mut end = self.scratch.len();
        if end > 0 && self.scratch[end - 1] == b'\n' {
            end -= 1;
            if end > 0 && self.scratch[end - 1] == b'\r' {
                end -= 1;
            }
        }
        line.clear();
        line.push_str(&String::from_utf8_lossy(&self.scratch[..end]));
        Ok(Some(n))
    }

    /// Total raw bytes consumed so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Access the underlying buffer length (bytes currently buffered).
    pub fn buffer_len(&self) -> usize {
        self.inner.buffer().len()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}
