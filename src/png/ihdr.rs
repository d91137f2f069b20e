use super::*;
use crate::{MediaError, U32BE};
use bytemuck::{Pod, Zeroable};

/// The pixel layouts a PNG can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PngColorType {
  Grayscale = 0,
  Truecolor = 2,
  Indexed = 3,
  GrayscaleAlpha = 4,
  TruecolorAlpha = 6,
}
impl PngColorType {
  #[inline]
  #[must_use]
  pub const fn from_u8(value: u8) -> Option<Self> {
    Some(match value {
      0 => Self::Grayscale,
      2 => Self::Truecolor,
      3 => Self::Indexed,
      4 => Self::GrayscaleAlpha,
      6 => Self::TruecolorAlpha,
      _ => return None,
    })
  }

  /// The bit depths allowed with this color type.
  #[inline]
  #[must_use]
  pub const fn allowed_bit_depths(self) -> &'static [u8] {
    match self {
      Self::Grayscale => &[1, 2, 4, 8, 16],
      Self::Indexed => &[1, 2, 4, 8],
      Self::Truecolor | Self::GrayscaleAlpha | Self::TruecolorAlpha => &[8, 16],
    }
  }

  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> u8 {
    match self {
      Self::Grayscale | Self::Indexed => 1,
      Self::GrayscaleAlpha => 2,
      Self::Truecolor => 3,
      Self::TruecolorAlpha => 4,
    }
  }
}

/// The 13 byte `IHDR` payload, exactly as stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
struct IhdrPayload {
  width: U32BE,
  height: U32BE,
  bit_depth: u8,
  color_type: u8,
  compression_method: u8,
  filter_method: u8,
  interlace_method: u8,
}

/// `IHDR`: Image header
///
/// The fields are kept as stored, use [`is_valid`](Self::is_valid) to check
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PngHeader {
  pub width: u32,
  pub height: u32,
  pub bit_depth: u8,
  pub color_type: u8,
  /// Must be 0 (zlib).
  pub compression_method: u8,
  /// Must be 0 (adaptive filtering).
  pub filter_method: u8,
  /// 0 for none, 1 for Adam7.
  pub interlace_method: u8,
}
impl PngHeader {
  /// Dimensions can't go past this.
  pub const MAX_DIMENSION: u32 = (1 << 31) - 1;

  #[inline]
  #[must_use]
  pub const fn color_type(&self) -> Option<PngColorType> {
    PngColorType::from_u8(self.color_type)
  }

  #[inline]
  #[must_use]
  pub const fn is_interlaced(&self) -> bool {
    self.interlace_method == 1
  }

  /// Checks the dimensions, the color type and bit depth pair, and the
  /// method fields.
  #[must_use]
  pub fn is_valid(&self) -> bool {
    let dims_ok = (1..=Self::MAX_DIMENSION).contains(&self.width)
      && (1..=Self::MAX_DIMENSION).contains(&self.height);
    let depth_ok = self
      .color_type()
      .is_some_and(|ct| ct.allowed_bit_depths().contains(&self.bit_depth));
    dims_ok
      && depth_ok
      && self.compression_method == 0
      && self.filter_method == 0
      && self.interlace_method <= 1
  }
}
impl TryFrom<&[u8]> for PngHeader {
  type Error = MediaError;
  /// Parses an `IHDR` payload. This only checks the length, not the values.
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    if data.len() != core::mem::size_of::<IhdrPayload>() {
      return Err(MediaError::format(format!("IHDR payload is {} bytes, expected 13", data.len())));
    }
    let p: IhdrPayload = bytemuck::pod_read_unaligned(data);
    Ok(Self {
      width: p.width.get(),
      height: p.height.get(),
      bit_depth: p.bit_depth,
      color_type: p.color_type,
      compression_method: p.compression_method,
      filter_method: p.filter_method,
      interlace_method: p.interlace_method,
    })
  }
}
