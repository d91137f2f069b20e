#![forbid(unsafe_code)]

//! Module for Windows Bitmap files (BMP).
//!
//! ## Parsing The Format
//!
//! Note: All multi-byte values in BMP are always little-endian encoded.
//!
//! * A bitmap file always starts with a "file header". This is always 14 bytes.
//!   * The tag `BM`.
//!   * The total size of the file.
//!   * A reserved field.
//!   * The position of the pixel data within the file.
//! * Next is an "info header". The first 4 bytes are always the size of the
//!   full info header. This module reads the 40 byte `BITMAPINFOHEADER` fields,
//!   larger header versions are accepted but their extra fields are ignored.
//! * Next there **might** be a color table. It's only used when the bit depth
//!   is 8 (or less) bits per pixel. Each entry is `[b, g, r, 0]`.
//! * Finally there's the pixel array, starting at the offset given in the file
//!   header. Each row is padded to a multiple of 4 bytes, and rows go from the
//!   bottom of the image to the top (unless the height is negative, then they
//!   go top to bottom).
//!
//! When the bits per pixel is less than 8 the pixels will be packed within a
//! byte. In this case, the leftmost pixel is the highest bits of the byte.
//! * 1, 2, 4, and 8 bits per pixel are indexed color.
//! * 24 bits per pixel is direct color, and the channel order is always
//!   `[b,g,r]`.
//!
//! ## Support
//! * Reading: 1, 2, 4, 8, and 24 bits per pixel, no compression. Decoded
//!   images are always 8-bit RGB. RLE compression and 16 bpp headers parse fine
//!   but decoding them is an [`Unsupported`](crate::ErrorKind::Unsupported)
//!   error.
//! * Writing: 8-bit BGR images only, always as uncompressed 24 bpp.

use crate::{DecodeLimits, ImageBuffer, MediaResult, Stream, StreamFlags};
use std::path::Path;

mod file_header;
pub use file_header::*;

mod info_header;
pub use info_header::*;

mod color_table;
pub use color_table::*;

mod decode;
pub use decode::*;

mod read;
pub use read::*;

mod write;
pub use write::*;

/// Everything parsed out of a BMP file, before the pixels are decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BmpContext {
  pub header: BmpFileHeader,
  pub info_header: BmpInfoHeader,
  /// Empty when the file has no color table.
  pub color_table: Vec<BmpColorTableItem>,
  /// Still row padded, in file row order.
  pub image_data: Vec<u8>,
}

/// Checks for the `BM` tag without moving the cursor.
///
/// A stream too short to hold the tag isn't a BMP.
pub fn bmp_detect(stream: &mut Stream<'_>) -> MediaResult<bool> {
  let mut tag = [0_u8; 2];
  let count = stream.peek(&mut tag)?;
  Ok(count == 2 && tag == BMP_SIGNATURE.0)
}

/// Checks bytes for the `BM` tag.
#[inline]
#[must_use]
pub fn bmp_detect_from_memory(bytes: &[u8]) -> bool {
  bytes.starts_with(&BMP_SIGNATURE.0)
}

/// Checks a file for the `BM` tag.
pub fn bmp_detect_from_file(path: impl AsRef<Path>) -> MediaResult<bool> {
  let mut stream = Stream::from_file(path, StreamFlags::READ)?;
  bmp_detect(&mut stream)
}

/// Reads a BMP from a file into `image`, using the default limits.
pub fn bmp_read_from_file(path: impl AsRef<Path>, image: &mut ImageBuffer) -> MediaResult<()> {
  let mut stream = Stream::from_file(path, StreamFlags::READ)?;
  bmp_read(&mut stream, image)
}

/// Reads a BMP from bytes into `image`, using the default limits.
pub fn bmp_read_from_memory(bytes: &[u8], image: &mut ImageBuffer) -> MediaResult<()> {
  bmp_read_from_memory_with_limits(bytes, image, &DecodeLimits::default())
}

/// Reads a BMP from bytes into `image`.
pub fn bmp_read_from_memory_with_limits(
  bytes: &[u8], image: &mut ImageBuffer, limits: &DecodeLimits,
) -> MediaResult<()> {
  let mut stream = Stream::from_memory(bytes, StreamFlags::READ)?;
  bmp_read_with_limits(&mut stream, image, limits)
}
