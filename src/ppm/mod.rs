#![forbid(unsafe_code)]

//! This module gives support for the RGB members of the
//! [Netpbm](https://en.wikipedia.org/wiki/Netpbm) family: `P3` (ascii) and
//! `P6` (binary) `.ppm` files.
//!
//! Both kinds share one header:
//! * The tag, `P3` or `P6`.
//! * Width, height, and the max value, as ascii decimal numbers.
//! * Any amount of whitespace and `#` line comments can come before each of
//!   the numbers.
//!
//! After the header:
//! * `P3` has ascii decimal numbers separated by whitespace, three per pixel.
//! * `P6` has exactly one whitespace byte after the max value, then raw bytes.
//!   Each channel is one byte, or two big-endian bytes when the max value is
//!   above 255.
//!
//! Decoded images are always 3 channel RGB, `U8` when the max value is 255 or
//! less and `U16` otherwise.
//!
//! Important: `P6` samples are rescaled from `0..=max` to the full range of
//! the output type, but `P3` samples are kept exactly as written.
//!
//! The colorspace of a Netpbm file is never given in the header, it's
//! *often* something close to sRGB.

use crate::{DecodeLimits, ImageBuffer, MediaResult, Stream, StreamFlags};
use std::path::Path;

mod header;
pub use header::*;

mod read;
pub use read::*;

mod write;
pub use write::*;

/// The two RGB Netpbm formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PpmFormat {
  /// Ascii decimal samples.
  P3,
  /// Binary samples.
  P6,
}
impl PpmFormat {
  /// The two tag bytes that start a file of this format.
  #[inline]
  #[must_use]
  pub const fn magic(self) -> [u8; 2] {
    match self {
      Self::P3 => *b"P3",
      Self::P6 => *b"P6",
    }
  }

  /// Gets the format for some tag bytes, if they're a tag we know.
  #[inline]
  #[must_use]
  pub const fn from_magic(magic: [u8; 2]) -> Option<Self> {
    match magic {
      [b'P', b'3'] => Some(Self::P3),
      [b'P', b'6'] => Some(Self::P6),
      _ => None,
    }
  }
}
impl core::fmt::Display for PpmFormat {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(match self {
      Self::P3 => "P3",
      Self::P6 => "P6",
    })
  }
}

/// Checks for a `P3` or `P6` tag without moving the cursor.
pub fn ppm_detect(stream: &mut Stream<'_>) -> MediaResult<Option<PpmFormat>> {
  let mut magic = [0_u8; 2];
  let count = stream.peek(&mut magic)?;
  Ok(if count == 2 { PpmFormat::from_magic(magic) } else { None })
}

/// Checks bytes for a `P3` or `P6` tag.
#[inline]
#[must_use]
pub fn ppm_detect_from_memory(bytes: &[u8]) -> Option<PpmFormat> {
  match bytes {
    [a, b, ..] => PpmFormat::from_magic([*a, *b]),
    _ => None,
  }
}

/// Checks a file for a `P3` or `P6` tag.
pub fn ppm_detect_from_file(path: impl AsRef<Path>) -> MediaResult<Option<PpmFormat>> {
  let mut stream = Stream::from_file(path, StreamFlags::READ)?;
  ppm_detect(&mut stream)
}

/// Reads a PPM of either format from a file into `image`, using the default
/// limits.
pub fn ppm_read_from_file(path: impl AsRef<Path>, image: &mut ImageBuffer) -> MediaResult<()> {
  let mut stream = Stream::from_file(path, StreamFlags::READ)?;
  ppm_read(&mut stream, image)
}

/// Reads a PPM of either format from bytes into `image`, using the default
/// limits.
pub fn ppm_read_from_memory(bytes: &[u8], image: &mut ImageBuffer) -> MediaResult<()> {
  ppm_read_from_memory_with_limits(bytes, image, &DecodeLimits::default())
}

/// Reads a PPM of either format from bytes into `image`.
pub fn ppm_read_from_memory_with_limits(
  bytes: &[u8], image: &mut ImageBuffer, limits: &DecodeLimits,
) -> MediaResult<()> {
  let mut stream = Stream::from_memory(bytes, StreamFlags::READ)?;
  ppm_read_with_limits(&mut stream, image, limits)
}

#[test]
fn test_ppm_detect() {
  assert_eq!(ppm_detect_from_memory(b"P3\n"), Some(PpmFormat::P3));
  assert_eq!(ppm_detect_from_memory(b"P6"), Some(PpmFormat::P6));
  assert_eq!(ppm_detect_from_memory(b"P5\n"), None);
  assert_eq!(ppm_detect_from_memory(b"P"), None);
  let mut s = Stream::from_memory(b"P6 1 1 255\n", StreamFlags::READ).unwrap();
  assert_eq!(ppm_detect(&mut s).unwrap(), Some(PpmFormat::P6));
  assert_eq!(s.cursor_position(), 0);
  assert_eq!(PpmFormat::P3.to_string(), "P3");
}
