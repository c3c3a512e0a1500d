//! Format-sniffing image decoding backed by the `image` crate.

use std::fs;
use std::io::Cursor;

use image::ImageReader;

use super::{ByteSource, DecodeError, DecodeSource, Raster};

/// Capability for turning a byte source into a [`Raster`].
///
/// Modeled as a trait so the format-sniffing engine can be swapped or
/// stubbed in tests without touching the encoder.
pub trait ImageDecoder {
    /// Decode `source` into a raster, or fail with a diagnostic reason.
    fn decode(&self, source: DecodeSource<'_>) -> Result<Raster, DecodeError>;
}

/// Default decoder: detects the format from the byte content and decodes
/// with the `image` crate.
#[derive(Debug, Default)]
pub struct SniffingDecoder;

impl SniffingDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl ImageDecoder for SniffingDecoder {
    fn decode(&self, source: DecodeSource<'_>) -> Result<Raster, DecodeError> {
        let bytes = match source {
            DecodeSource::Path(path) => {
                fs::read(path).map_err(|e| DecodeError::Io(e.to_string()))?
            }
            DecodeSource::Stream(stream) => read_to_end(stream)?,
        };
        decode_bytes(&bytes)
    }
}

/// Sniff and decode an in-memory image file.
///
/// Content-based format detection needs rewindable input, which is why
/// stream sources are buffered whole before reaching this point.
fn decode_bytes(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Io(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::UnknownFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    Ok(Raster::from_dynamic_image(img))
}

/// Drain a pull-based source into memory.
fn read_to_end(source: &mut dyn ByteSource) -> Result<Vec<u8>, DecodeError> {
    let mut bytes = Vec::new();
    let mut chunk = [0u8; 8 * 1024];
    while !source.eof() {
        let n = source
            .read(&mut chunk)
            .map_err(|e| DecodeError::Io(e.to_string()))?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
    }
    Ok(bytes)
}
