#![forbid(unsafe_code)]

//! Caps on what a decoder is willing to allocate.

use crate::{MediaError, MediaResult};

/// Limits a decoder checks before it allocates anything.
///
/// Every limit is optional. The [`Default`] limits are generous enough for any
/// real image while still stopping a 12 byte file from asking for gigabytes.
///
/// ```
/// use imgstream::DecodeLimits;
/// let tight = DecodeLimits { max_width: Some(64), ..DecodeLimits::default() };
/// assert!(tight.check_dimensions(65, 1).is_err());
/// assert!(DecodeLimits::none().check_dimensions(u32::MAX, u32::MAX).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeLimits {
  /// Maximum image width in pixels.
  pub max_width: Option<u32>,
  /// Maximum image height in pixels.
  pub max_height: Option<u32>,
  /// Maximum total pixels (width × height).
  pub max_pixels: Option<u64>,
  /// Maximum payload length of any single PNG chunk.
  pub max_chunk_len: Option<u32>,
}

impl Default for DecodeLimits {
  #[inline]
  fn default() -> Self {
    Self {
      max_width: Some(65_535),
      max_height: Some(65_535),
      max_pixels: Some(1 << 28),
      // the PNG format's own cap on chunk length
      max_chunk_len: Some(i32::MAX as u32),
    }
  }
}

impl DecodeLimits {
  /// No limits at all.
  #[inline]
  #[must_use]
  pub const fn none() -> Self {
    Self { max_width: None, max_height: None, max_pixels: None, max_chunk_len: None }
  }

  /// Checks image dimensions against the width, height, and pixel limits.
  pub fn check_dimensions(&self, width: u32, height: u32) -> MediaResult<()> {
    if let Some(max_width) = self.max_width {
      if width > max_width {
        return Err(MediaError::LimitExceeded(format!("width {width} exceeds limit {max_width}")));
      }
    }
    if let Some(max_height) = self.max_height {
      if height > max_height {
        return Err(MediaError::LimitExceeded(format!(
          "height {height} exceeds limit {max_height}"
        )));
      }
    }
    if let Some(max_pixels) = self.max_pixels {
      let pixels = u64::from(width) * u64::from(height);
      if pixels > max_pixels {
        return Err(MediaError::LimitExceeded(format!(
          "pixel count {pixels} exceeds limit {max_pixels}"
        )));
      }
    }
    Ok(())
  }

  /// Checks a chunk payload length against the chunk limit.
  pub fn check_chunk_len(&self, len: u32) -> MediaResult<()> {
    match self.max_chunk_len {
      Some(max) if len > max => {
        Err(MediaError::LimitExceeded(format!("chunk length {len} exceeds limit {max}")))
      }
      _ => Ok(()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ErrorKind;

  #[test]
  fn test_default_limits() {
    let limits = DecodeLimits::default();
    assert!(limits.check_dimensions(65_535, 4096).is_ok());
    assert_eq!(limits.check_dimensions(65_536, 1).unwrap_err().kind(), ErrorKind::LimitExceeded);
    assert_eq!(limits.check_dimensions(65_535, 65_535).unwrap_err().kind(), ErrorKind::LimitExceeded);
    assert!(limits.check_chunk_len(1 << 31).is_err());
  }

  #[test]
  fn test_no_limits() {
    let limits = DecodeLimits::none();
    assert!(limits.check_dimensions(u32::MAX, u32::MAX).is_ok());
    assert!(limits.check_chunk_len(u32::MAX).is_ok());
  }
}
