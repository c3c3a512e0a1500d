//! TGA encoding: header construction and the run-length packet encoder.
//!
//! Output follows the Truevision TGA 1.0 layout: an 18-byte header followed
//! by the image body, which is either the pixel buffer verbatim (image type
//! 2) or a stream of run-length packets (image type 10). Multi-byte header
//! fields are little-endian.

use thiserror::Error;

use crate::decode::Raster;

/// Widest side a TGA header can carry (16-bit dimension fields).
const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Most pixels one RLE packet can cover; the count is stored as `count - 1`
/// in the low 7 bits of the packet header.
const MAX_PACKET_PIXELS: usize = 128;

/// Errors that can occur while encoding a raster to TGA.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel buffer length doesn't match the raster dimensions.
    #[error("Invalid raster layout: expected {expected} bytes (width * height * channels), got {actual}")]
    InvalidRasterLayout { expected: usize, actual: usize },

    /// Width or height is zero or doesn't fit the header's 16-bit fields.
    #[error("Unsupported dimensions: {width}x{height} (each side must be 1..=65535)")]
    UnsupportedDimensions { width: u32, height: u32 },

    /// Channel count outside 1..=4.
    #[error("Unsupported channel count: {0} (must be 1..=4)")]
    UnsupportedChannelCount(u8),
}

/// The fixed 18-byte TGA file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TgaHeader {
    id_length: u8,
    color_map_type: u8,
    image_type: u8,
    color_map_origin: u16,
    color_map_length: u16,
    color_map_depth: u8,
    x_origin: u16,
    y_origin: u16,
    width: u16,
    height: u16,
    pixel_depth: u8,
    image_descriptor: u8,
}

impl TgaHeader {
    /// Build the header for a raster.
    ///
    /// Image type is 2 (uncompressed true-color) or 10 (run-length encoded
    /// true-color) and pixel depth is `channels * 8`. The descriptor byte
    /// stays 0: rows are written in decode order with the origin bit unset,
    /// no flip applied.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedDimensions` if either side is 0 or larger than
    /// 65535, and `UnsupportedChannelCount` if channels is outside 1..=4.
    pub fn for_raster(raster: &Raster, rle: bool) -> Result<Self, EncodeError> {
        if raster.channels == 0 || raster.channels > 4 {
            return Err(EncodeError::UnsupportedChannelCount(raster.channels));
        }
        if raster.width == 0
            || raster.height == 0
            || raster.width > MAX_DIMENSION
            || raster.height > MAX_DIMENSION
        {
            return Err(EncodeError::UnsupportedDimensions {
                width: raster.width,
                height: raster.height,
            });
        }

        Ok(Self {
            id_length: 0,
            color_map_type: 0,
            image_type: if rle { 10 } else { 2 },
            color_map_origin: 0,
            color_map_length: 0,
            color_map_depth: 0,
            x_origin: 0,
            y_origin: 0,
            width: raster.width as u16,
            height: raster.height as u16,
            pixel_depth: raster.channels * 8,
            image_descriptor: 0,
        })
    }

    /// Serialize to the wire layout.
    pub fn to_bytes(&self) -> [u8; 18] {
        let mut bytes = [0u8; 18];
        bytes[0] = self.id_length;
        bytes[1] = self.color_map_type;
        bytes[2] = self.image_type;
        bytes[3..5].copy_from_slice(&self.color_map_origin.to_le_bytes());
        bytes[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        bytes[7] = self.color_map_depth;
        bytes[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        bytes[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.width.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.height.to_le_bytes());
        bytes[16] = self.pixel_depth;
        bytes[17] = self.image_descriptor;
        bytes
    }
}

/// Run-length encode a flat pixel buffer.
///
/// One pixel is `channels` consecutive bytes, compared byte-for-byte. A
/// repeat of two or more identical pixels becomes a run packet (header
/// `0x80 | (count - 1)` plus one pixel); everything else accumulates into
/// raw packets (header `count - 1` plus `count` pixels). Both packet kinds
/// cover at most 128 pixels. A raw packet ends just before any pixel that
/// begins a run, so repeats of length 2 or more are never raw-encoded.
/// Packets may span scanline boundaries.
///
/// The scan is a single deterministic left-to-right pass: identical input
/// always yields byte-identical output.
pub fn encode_rle(pixels: &[u8], channels: usize) -> Vec<u8> {
    debug_assert!(channels > 0);
    debug_assert_eq!(pixels.len() % channels, 0);

    let count = pixels.len() / channels;
    // Worst case adds one raw-packet header per 128 pixels.
    let mut out = Vec::with_capacity(pixels.len() + count / MAX_PACKET_PIXELS + 1);

    let pixel = |i: usize| &pixels[i * channels..(i + 1) * channels];

    let mut i = 0;
    while i < count {
        let mut run = 1;
        while run < MAX_PACKET_PIXELS && i + run < count && pixel(i + run) == pixel(i) {
            run += 1;
        }

        if run >= 2 {
            out.push(0x80 | (run as u8 - 1));
            out.extend_from_slice(pixel(i));
            i += run;
            continue;
        }

        let mut len = 1;
        while len < MAX_PACKET_PIXELS && i + len < count {
            let next = i + len;
            if next + 1 < count && pixel(next) == pixel(next + 1) {
                break;
            }
            len += 1;
        }

        out.push(len as u8 - 1);
        out.extend_from_slice(&pixels[i * channels..(i + len) * channels]);
        i += len;
    }

    out
}

/// Encode a raster into a complete TGA byte stream (header plus body).
///
/// With `rle` set the body is the packet stream from [`encode_rle`];
/// otherwise it is the pixel buffer verbatim.
///
/// # Errors
///
/// Returns `InvalidRasterLayout` before any encoding starts if the pixel
/// buffer length doesn't match the raster dimensions, plus the header
/// builder's dimension and channel errors.
///
/// # Example
///
/// ```
/// use img2tga_core::decode::Raster;
/// use img2tga_core::encode::encode_tga;
///
/// let raster = Raster::new(2, 1, 1, vec![10, 10]);
/// let tga = encode_tga(&raster, true).unwrap();
///
/// assert_eq!(tga.len(), 20); // 18-byte header + one run packet
/// assert_eq!(&tga[18..], &[0x81, 10]);
/// ```
pub fn encode_tga(raster: &Raster, rle: bool) -> Result<Vec<u8>, EncodeError> {
    let expected = raster.width as usize * raster.height as usize * raster.channels as usize;
    if raster.pixels.len() != expected {
        return Err(EncodeError::InvalidRasterLayout {
            expected,
            actual: raster.pixels.len(),
        });
    }

    let header = TgaHeader::for_raster(raster, rle)?;

    let mut out = Vec::with_capacity(18 + raster.pixels.len());
    out.extend_from_slice(&header.to_bytes());
    if rle {
        out.extend_from_slice(&encode_rle(&raster.pixels, raster.channels as usize));
    } else {
        out.extend_from_slice(&raster.pixels);
    }
    Ok(out)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
