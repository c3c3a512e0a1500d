//! Pull-based byte sources for stream decoding.

use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// A pull-based byte source.
///
/// Exposes the read/skip/eof operations a format-sniffing decoder issues
/// against a non-seekable input such as a pipe.
pub trait ByteSource {
    /// Read up to `buf.len()` bytes, returning how many were read.
    /// Zero means the stream is exhausted.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Discard the next `n` bytes.
    fn skip(&mut self, n: u64) -> io::Result<()>;

    /// Whether the stream has no more bytes to offer.
    fn eof(&mut self) -> bool;
}

/// Adapter exposing any `Read` as a [`ByteSource`].
pub struct ReaderSource<R: Read> {
    inner: BufReader<R>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
        }
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }

    fn skip(&mut self, n: u64) -> io::Result<()> {
        let skipped = io::copy(&mut self.inner.by_ref().take(n), &mut io::sink())?;
        if skipped < n {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "skip ran past the end of the stream",
            ));
        }
        Ok(())
    }

    fn eof(&mut self) -> bool {
        self.inner.fill_buf().map(|b| b.is_empty()).unwrap_or(true)
    }
}

/// Where a decoder pulls its bytes from.
pub enum DecodeSource<'a> {
    /// A named file, read as a whole.
    Path(&'a Path),
    /// An already-open pull-based stream, e.g. process stdin.
    Stream(&'a mut dyn ByteSource),
}
