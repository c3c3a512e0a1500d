//! Write-only byte sinks for encoded output.
//!
//! The encoder does not care whether its bytes land in a file or an
//! already-open process stream; both destinations satisfy [`Sink`] and are
//! composed into a conversion by the orchestrator.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// A write-only destination for encoded bytes.
pub trait Sink {
    /// Append all of `bytes` to the destination.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Push any buffered bytes through to the destination.
    fn flush(&mut self) -> io::Result<()>;
}

/// Sink writing to a freshly created file.
///
/// Creation truncates existing content. The handle closes when the sink is
/// dropped, on every exit path.
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Open `path` for binary write, truncating existing content.
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self {
            file: File::create(path)?,
        })
    }
}

impl Sink for FileSink {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.file.write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Sink wrapping an already-open stream such as locked stdout.
///
/// The stream is owned by the environment and never closed here.
pub struct StreamSink<W: Write> {
    inner: W,
}

impl<W: Write> StreamSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Access the wrapped stream. Tests use this to inspect in-memory sinks.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }
}

impl<W: Write> Sink for StreamSink<W> {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Switch the process streams to binary mode before stream-mode I/O.
///
/// Rust's standard streams carry bytes untranslated on every supported
/// platform, so no mode change is needed; the call is the explicit,
/// idempotent setup point required before the first stream read or write.
pub fn ensure_binary_mode() {}
