//! Image decoding for img2tga.
//!
//! This module provides:
//! - The [`Raster`] pixel buffer produced by any decoder
//! - A pull-based [`ByteSource`] for non-seekable inputs such as pipes
//! - The [`ImageDecoder`] capability and its default format-sniffing
//!   implementation backed by the `image` crate
//!
//! # Architecture
//!
//! The encoder never talks to a concrete decoder type. Conversions receive
//! an `&dyn ImageDecoder`, which lets tests substitute a stub raster source
//! and keeps the format-sniffing engine swappable.

mod sniff;
mod source;
mod types;

pub use sniff::{ImageDecoder, SniffingDecoder};
pub use source::{ByteSource, DecodeSource, ReaderSource};
pub use types::{DecodeError, Raster};
