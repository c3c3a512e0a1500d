//! img2tga core - TGA encoding engine
//!
//! This crate converts decoded raster images into Truevision TGA byte
//! streams, optionally compressed with run-length encoding, and delivers
//! them to file or stream destinations.
//!
//! # Module Structure
//!
//! - `decode` - the raster model and the pluggable image-decoder capability
//! - `encode` - TGA header construction and the run-length packet encoder
//! - `sink` - write-only byte destinations (file, open process stream)
//! - `convert` - one-shot orchestration of decode, encode and write
//!
//! Decoding of source formats (PNG, JPEG, BMP and friends) is delegated to
//! the `image` crate behind the [`ImageDecoder`] trait; this crate owns
//! everything from the decoded pixel buffer onwards.

pub mod convert;
pub mod decode;
pub mod encode;
pub mod sink;

pub use convert::{convert_file_to_file, convert_stream_to_stream, write_tga, ConvertError};
pub use decode::{
    ByteSource, DecodeError, DecodeSource, ImageDecoder, Raster, ReaderSource, SniffingDecoder,
};
pub use encode::{encode_rle, encode_tga, EncodeError, TgaHeader};
pub use sink::{ensure_binary_mode, FileSink, Sink, StreamSink};
