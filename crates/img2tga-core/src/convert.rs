//! Transcode orchestration: decode a source image, encode TGA, write to a
//! sink.
//!
//! Both entry points run one conversion to completion on the calling thread.
//! There is no retry and no partial-success reporting; any failure aborts
//! the conversion and propagates a single terminal [`ConvertError`]. The RLE
//! flag is threaded through every call as an explicit parameter, so no
//! configuration state outlives a conversion.

use std::io;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::decode::{DecodeError, DecodeSource, ImageDecoder, Raster, ReaderSource};
use crate::encode::{encode_tga, EncodeError};
use crate::sink::{ensure_binary_mode, FileSink, Sink, StreamSink};

/// Errors that can occur during a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input path does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The decoder rejected the source; the reason is passed through.
    #[error("Failed to decode image: {0}")]
    Decode(#[from] DecodeError),

    /// The raster cannot be represented as TGA.
    #[error("Failed to encode TGA: {0}")]
    Encode(#[from] EncodeError),

    /// The output path could not be opened for writing.
    #[error("Cannot open {} for writing: {source}", .path.display())]
    OutputPathUnwritable { path: PathBuf, source: io::Error },

    /// Writing the encoded bytes failed; a truncated output may remain.
    #[error("Failed to write TGA output: {0}")]
    WriteFailure(io::Error),
}

/// Encode `raster` and write the complete TGA stream to `sink`.
pub fn write_tga(raster: &Raster, rle: bool, sink: &mut dyn Sink) -> Result<(), ConvertError> {
    let tga = encode_tga(raster, rle)?;
    sink.write_all(&tga).map_err(ConvertError::WriteFailure)?;
    sink.flush().map_err(ConvertError::WriteFailure)
}

/// Convert a named image file into a TGA file.
///
/// Verifies the input exists, decodes it, then creates (truncating) the
/// output and writes header plus body. A failure after the output file was
/// created can leave a truncated file behind; the write is not atomic.
pub fn convert_file_to_file(
    decoder: &dyn ImageDecoder,
    input: &Path,
    output: &Path,
    rle: bool,
) -> Result<(), ConvertError> {
    if !input.exists() {
        return Err(ConvertError::InputNotFound(input.to_path_buf()));
    }

    let raster = decoder.decode(DecodeSource::Path(input))?;
    info!(
        "loaded {} ({}x{}, {} channels)",
        input.display(),
        raster.width,
        raster.height,
        raster.channels
    );
    if rle {
        info!("using RLE compression");
    }

    // Encode before touching the output path, so a rejected raster never
    // truncates an existing file.
    let tga = encode_tga(&raster, rle)?;
    let mut sink =
        FileSink::create(output).map_err(|source| ConvertError::OutputPathUnwritable {
            path: output.to_path_buf(),
            source,
        })?;
    sink.write_all(&tga).map_err(ConvertError::WriteFailure)?;
    sink.flush().map_err(ConvertError::WriteFailure)?;

    info!("wrote {}", output.display());
    Ok(())
}

/// Convert an image read from stdin into TGA bytes on stdout.
///
/// Stdout carries only the encoded image; diagnostics go through the `log`
/// facade. The process streams belong to the environment and stay open.
pub fn convert_stream_to_stream(
    decoder: &dyn ImageDecoder,
    rle: bool,
) -> Result<(), ConvertError> {
    ensure_binary_mode();

    let stdin = io::stdin();
    let mut source = ReaderSource::new(stdin.lock());
    let raster = decoder.decode(DecodeSource::Stream(&mut source))?;
    info!(
        "loaded image from stdin ({}x{}, {} channels)",
        raster.width, raster.height, raster.channels
    );
    if rle {
        info!("using RLE compression");
    }

    let stdout = io::stdout();
    let mut sink = StreamSink::new(stdout.lock());
    write_tga(&raster, rle, &mut sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    use crate::decode::SniffingDecoder;

    /// Stub decoder returning a fixed raster regardless of the source.
    struct FixedDecoder {
        raster: Raster,
    }

    impl ImageDecoder for FixedDecoder {
        fn decode(&self, _source: DecodeSource<'_>) -> Result<Raster, DecodeError> {
            Ok(self.raster.clone())
        }
    }

    /// Stub decoder that always fails.
    struct FailingDecoder;

    impl ImageDecoder for FailingDecoder {
        fn decode(&self, _source: DecodeSource<'_>) -> Result<Raster, DecodeError> {
            Err(DecodeError::UnknownFormat)
        }
    }

    fn gray_raster() -> Raster {
        Raster::new(2, 1, 1, vec![10, 10])
    }

    #[test]
    fn test_write_tga_to_memory_sink() {
        let mut sink = StreamSink::new(Vec::new());
        write_tga(&gray_raster(), true, &mut sink).unwrap();

        let bytes = sink.get_ref();
        assert_eq!(bytes.len(), 20);
        assert_eq!(bytes[2], 10);
        assert_eq!(&bytes[18..], &[0x81, 10]);
    }

    #[test]
    fn test_stream_scenario_single_gray_pixel() {
        // A decoded 1x1 single-channel image in non-RLE mode produces
        // exactly the 18-byte header followed by one pixel byte.
        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(&[42], 1, 1, ExtendedColorType::L8)
            .unwrap();

        let mut source = ReaderSource::new(std::io::Cursor::new(png));
        let raster = SniffingDecoder::new()
            .decode(DecodeSource::Stream(&mut source))
            .unwrap();

        let mut sink = StreamSink::new(Vec::new());
        write_tga(&raster, false, &mut sink).unwrap();

        let bytes = sink.get_ref();
        assert_eq!(bytes.len(), 19);
        assert_eq!(bytes[2], 2);
        assert_eq!(bytes[16], 8);
        assert_eq!(bytes[18], 42);
    }

    #[test]
    fn test_file_mode_with_stub_decoder() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.tga");
        std::fs::write(&input, b"content is ignored by the stub").unwrap();

        let decoder = FixedDecoder {
            raster: gray_raster(),
        };
        convert_file_to_file(&decoder, &input, &output, true).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(bytes.len(), 20);
        assert_eq!(&bytes[18..], &[0x81, 10]);
    }

    #[test]
    fn test_file_mode_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.tga");

        let pixels = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(&pixels, 2, 2, ExtendedColorType::Rgb8)
            .unwrap();
        std::fs::write(&input, &png).unwrap();

        convert_file_to_file(&SniffingDecoder::new(), &input, &output, false).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(bytes.len(), 18 + 12);
        assert_eq!(bytes[2], 2);
        assert_eq!(bytes[16], 24);
        assert_eq!(&bytes[18..], &pixels[..]);
    }

    #[test]
    fn test_missing_input_reported_before_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let result = convert_file_to_file(
            &FailingDecoder,
            &dir.path().join("absent.png"),
            &dir.path().join("out.tga"),
            false,
        );
        assert!(matches!(result, Err(ConvertError::InputNotFound(_))));
    }

    #[test]
    fn test_decode_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        std::fs::write(&input, b"not an image").unwrap();

        let result =
            convert_file_to_file(&FailingDecoder, &input, &dir.path().join("out.tga"), false);
        assert!(matches!(result, Err(ConvertError::Decode(_))));
    }

    #[test]
    fn test_unwritable_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        std::fs::write(&input, b"stub input").unwrap();

        let decoder = FixedDecoder {
            raster: gray_raster(),
        };
        let output = dir.path().join("no_such_dir").join("out.tga");
        let result = convert_file_to_file(&decoder, &input, &output, false);
        assert!(matches!(
            result,
            Err(ConvertError::OutputPathUnwritable { .. })
        ));
    }

    #[test]
    fn test_encode_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        std::fs::write(&input, b"stub input").unwrap();

        // Layout lies about its dimensions.
        let decoder = FixedDecoder {
            raster: Raster {
                width: 4,
                height: 4,
                channels: 1,
                pixels: vec![0; 3],
            },
        };
        let result =
            convert_file_to_file(&decoder, &input, &dir.path().join("out.tga"), false);
        assert!(matches!(
            result,
            Err(ConvertError::Encode(EncodeError::InvalidRasterLayout { .. }))
        ));
    }

    #[test]
    fn test_encode_failure_does_not_touch_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.tga");
        std::fs::write(&input, b"stub input").unwrap();
        std::fs::write(&output, b"previous conversion result").unwrap();

        let decoder = FixedDecoder {
            raster: Raster {
                width: 4,
                height: 4,
                channels: 1,
                pixels: vec![0; 3],
            },
        };
        assert!(convert_file_to_file(&decoder, &input, &output, false).is_err());
        assert_eq!(
            std::fs::read(&output).unwrap(),
            b"previous conversion result"
        );
    }
}
