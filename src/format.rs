#![forbid(unsafe_code)]

//! Picking a codec by looking at the first bytes of the data.

use crate::{DecodeLimits, FileFormat, ImageBuffer, MediaError, MediaResult, Stream, StreamFlags};
use std::path::Path;

/// Looks at the start of a stream to guess the file format.
///
/// This peeks, so the cursor doesn't move. Only formats with an enabled codec
/// are detected, anything else gives [`FileFormat::Unknown`].
pub fn detect_format(stream: &mut Stream<'_>) -> MediaResult<FileFormat> {
  #[cfg(feature = "png")]
  if crate::png::png_detect(stream)? {
    return Ok(FileFormat::Png);
  }
  #[cfg(feature = "bmp")]
  if crate::bmp::bmp_detect(stream)? {
    return Ok(FileFormat::Bmp);
  }
  #[cfg(feature = "ppm")]
  if crate::ppm::ppm_detect(stream)?.is_some() {
    return Ok(FileFormat::Ppm);
  }
  Ok(FileFormat::Unknown)
}

/// Guesses the file format of some bytes.
pub fn detect_format_from_memory(bytes: &[u8]) -> FileFormat {
  #[cfg(feature = "png")]
  if crate::png::png_detect_from_memory(bytes) {
    return FileFormat::Png;
  }
  #[cfg(feature = "bmp")]
  if crate::bmp::bmp_detect_from_memory(bytes) {
    return FileFormat::Bmp;
  }
  #[cfg(feature = "ppm")]
  if crate::ppm::ppm_detect_from_memory(bytes).is_some() {
    return FileFormat::Ppm;
  }
  let _ = bytes;
  FileFormat::Unknown
}

/// Guesses the file format of a file.
pub fn detect_format_from_file(path: impl AsRef<Path>) -> MediaResult<FileFormat> {
  let mut stream = Stream::from_file(path, StreamFlags::READ)?;
  detect_format(&mut stream)
}

/// Reads an image of any detected format into `image`, using the default
/// limits.
pub fn read_image(stream: &mut Stream<'_>, image: &mut ImageBuffer) -> MediaResult<()> {
  read_image_with_limits(stream, image, &DecodeLimits::default())
}

/// Reads an image of any detected format into `image`.
///
/// ## Failure
/// * Data in no known format is unsupported.
/// * PNG data gets its chunks checked, and then it's unsupported because
///   PNG pixels can't be decoded.
pub fn read_image_with_limits(
  stream: &mut Stream<'_>, image: &mut ImageBuffer, limits: &DecodeLimits,
) -> MediaResult<()> {
  let format = detect_format(stream)?;
  log::debug!("reading a {format} image");
  match format {
    #[cfg(feature = "bmp")]
    FileFormat::Bmp => crate::bmp::bmp_read_with_limits(stream, image, limits),
    #[cfg(feature = "ppm")]
    FileFormat::Ppm => crate::ppm::ppm_read_with_limits(stream, image, limits),
    #[cfg(feature = "png")]
    FileFormat::Png => {
      let context = crate::png::png_read_with_limits(stream, limits)?;
      log::warn!("PNG pixel decoding is not supported ({:?})", context.header);
      Err(MediaError::unsupported("PNG pixel decoding"))
    }
    other => {
      let _ = (image, limits);
      log::warn!("can't read a {other} image");
      Err(MediaError::unsupported("unknown image format"))
    }
  }
}

/// Reads an image file of any detected format into `image`.
pub fn read_image_from_file(path: impl AsRef<Path>, image: &mut ImageBuffer) -> MediaResult<()> {
  let mut stream = Stream::from_file(path, StreamFlags::READ)?;
  read_image(&mut stream, image)
}

/// Reads image bytes of any detected format into `image`.
pub fn read_image_from_memory(bytes: &[u8], image: &mut ImageBuffer) -> MediaResult<()> {
  let mut stream = Stream::from_memory(bytes, StreamFlags::READ)?;
  read_image(&mut stream, image)
}
