#![forbid(unsafe_code)]

//! Holds the tools for reading the structure of PNG data.
//!
//! The general format of a PNG is an 8 byte signature followed by
//! information stored in "chunks". Each chunk is:
//! * A 4 byte big-endian length of the chunk's data.
//! * A 4 byte ascii type tag, see [`PngChunkType`].
//! * The data.
//! * A 4 byte big-endian CRC32 of the type tag and the data.
//!
//! There's four "critical" chunk types:
//! * **Header** - This has all the important information about the image's
//!   dimensions, pixel format, and if the image is interlaced or not.
//! * **Palette** - If an image uses indexed color it will have a palette of
//!   what index values map to what `RGB8` values.
//! * **Image Data** - One or more chunks of compressed data. All of the
//!   compressed data forms a single zlib data stream. All of the image data
//!   chunks should appear one after the other.
//! * **End** - The last chunk, lets you know you had the full PNG and your data
//!   wasn't truncated accidentally.
//!
//! After the header and before the image data there are also zero or more
//! "ancillary" chunks which might give you additional information about the
//! image.
//!
//! ## Support
//!
//! [`png_read`] checks the signature, every CRC, and the chunk ordering rules,
//! and collects everything into a [`PngContext`]. The image data is gathered
//! but never inflated or unfiltered, so there's no way to get pixels out of a
//! PNG with this crate.

use crate::{DecodeLimits, MediaResult, SrgbIntent, Stream, StreamFlags};
use std::path::Path;

mod chunk;
pub use chunk::*;

mod ihdr;
pub use ihdr::*;

mod plte;
pub use plte::*;

mod trns;
pub use trns::*;

mod chrm;
pub use chrm::*;

mod gama;
pub use gama::*;

mod srgb;
pub use srgb::*;

mod iccp;
pub use iccp::*;

mod text;
pub use text::*;

mod exif;
pub use exif::*;

mod time;
pub use time::*;

mod read;
pub use read::*;

#[cfg(test)]
mod tests;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Everything gathered while reading the chunks of a PNG.
#[derive(Debug, Clone, PartialEq)]
pub struct PngContext {
  pub header: Option<PngHeader>,
  pub palette: Option<PngPalette>,
  pub transparency: Option<PngTransparency>,
  pub chromaticity: Option<PngChromaticity>,
  /// 1.0 unless there was a `gAMA` chunk.
  pub gamma: f32,
  pub srgb_intent: Option<SrgbIntent>,
  pub icc_profile: Option<PngIccProfile>,
  /// Both `tEXt` and `iTXt`, in file order.
  pub text_chunks: Vec<PngTextChunk>,
  pub exif: Option<Vec<u8>>,
  pub time: Option<PngTime>,
  /// All `IDAT` payloads joined together, still compressed.
  pub image_data: Vec<u8>,
  /// How many chunks were read, including `IEND`.
  pub chunk_count: usize,
}
impl Default for PngContext {
  #[inline]
  fn default() -> Self {
    Self {
      header: None,
      palette: None,
      transparency: None,
      chromaticity: None,
      gamma: 1.0,
      srgb_intent: None,
      icc_profile: None,
      text_chunks: Vec::new(),
      exif: None,
      time: None,
      image_data: Vec::new(),
      chunk_count: 0,
    }
  }
}

/// Checks for the PNG signature without moving the cursor.
pub fn png_detect(stream: &mut Stream<'_>) -> MediaResult<bool> {
  let mut signature = [0_u8; 8];
  let count = stream.peek(&mut signature)?;
  Ok(count == 8 && signature == PNG_SIGNATURE)
}

/// Checks bytes for the PNG signature.
#[inline]
#[must_use]
pub fn png_detect_from_memory(bytes: &[u8]) -> bool {
  bytes.starts_with(&PNG_SIGNATURE)
}

/// Checks a file for the PNG signature.
pub fn png_detect_from_file(path: impl AsRef<Path>) -> MediaResult<bool> {
  let mut stream = Stream::from_file(path, StreamFlags::READ)?;
  png_detect(&mut stream)
}

/// Reads the chunks of a PNG file, using the default limits.
pub fn png_read_from_file(path: impl AsRef<Path>) -> MediaResult<PngContext> {
  png_read_from_file_with_limits(path, &DecodeLimits::default())
}

/// Reads the chunks of a PNG file.
pub fn png_read_from_file_with_limits(
  path: impl AsRef<Path>, limits: &DecodeLimits,
) -> MediaResult<PngContext> {
  let mut stream = Stream::from_file(path, StreamFlags::READ)?;
  png_read_with_limits(&mut stream, limits)
}

/// Reads the chunks of PNG bytes, using the default limits.
pub fn png_read_from_memory(bytes: &[u8]) -> MediaResult<PngContext> {
  png_read_from_memory_with_limits(bytes, &DecodeLimits::default())
}

/// Reads the chunks of PNG bytes.
pub fn png_read_from_memory_with_limits(bytes: &[u8], limits: &DecodeLimits) -> MediaResult<PngContext> {
  let mut stream = Stream::from_memory(bytes, StreamFlags::READ)?;
  png_read_with_limits(&mut stream, limits)
}
