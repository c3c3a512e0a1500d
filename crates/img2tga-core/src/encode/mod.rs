//! TGA encoding for img2tga.
//!
//! One output format, two body shapes: verbatim pixel bytes or a run-length
//! packet stream, selected per conversion by an explicit flag. See
//! [`encode_tga`] for the full-file entry point.

mod tga;

pub use tga::{encode_rle, encode_tga, EncodeError, TgaHeader};
