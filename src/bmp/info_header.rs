use super::*;
use crate::{ByteOrder, MediaError};

/// Size of the `BITMAPINFOHEADER` in bytes, the only version this module
/// writes.
pub const BMP_INFO_HEADER_SIZE: u32 = 40;

/// Pixels per meter for 72 DPI.
pub const BMP_72_DPI: i32 = 2835;

/// The `BITMAPINFOHEADER` fields of a BMP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BmpInfoHeader {
  /// Size of the info header in the file, 40 or more.
  pub header_size: u32,
  pub width: i32,
  /// Positive for bottom-up rows, negative for top-down rows.
  pub height: i32,
  /// Always 1.
  pub planes: u16,
  /// One of 1, 2, 4, 8, 16, or 24.
  pub bits_per_pixel: u16,
  /// 0 (none), 1 (RLE8), or 2 (RLE4).
  pub compression: u32,
  /// Byte size of the pixel data. Can be 0 for uncompressed images.
  pub image_size: u32,
  pub x_pixels_per_meter: i32,
  pub y_pixels_per_meter: i32,
  /// Number of color table entries, 0 means there's no color table.
  pub colors_used: u32,
  pub colors_important: u32,
}

impl BmpInfoHeader {
  /// Reads and validates the info header, which always starts at byte 14.
  ///
  /// This sets the stream's byte order to little-endian.
  ///
  /// ## Failure
  /// All of these are format errors:
  /// * A header size below 40.
  /// * A non-positive width, or a zero height.
  /// * `planes` other than 1.
  /// * `bits_per_pixel` other than 1, 2, 4, 8, 16, or 24.
  /// * `compression` other than 0, 1, or 2.
  /// * An `image_size` of 0 for a compressed image.
  pub fn read(stream: &mut Stream<'_>) -> MediaResult<Self> {
    stream.set_cursor_position(BMP_FILE_HEADER_SIZE as usize)?;
    stream.set_byte_order(ByteOrder::Little);
    let header_size = stream.read_u32()?;
    if header_size < BMP_INFO_HEADER_SIZE {
      return Err(bad_field(format!("unsupported info header size {header_size}")));
    }
    let width = stream.read_i32()?;
    let height = stream.read_i32()?;
    if width <= 0 || height == 0 {
      return Err(bad_field(format!("invalid dimensions {width}x{height}")));
    }
    let planes = stream.read_u16()?;
    if planes != 1 {
      return Err(bad_field(format!("invalid planes value {planes}")));
    }
    let bits_per_pixel = stream.read_u16()?;
    if !matches!(bits_per_pixel, 1 | 2 | 4 | 8 | 16 | 24) {
      return Err(bad_field(format!("invalid bits per pixel {bits_per_pixel}")));
    }
    let compression = stream.read_u32()?;
    if compression > 2 {
      return Err(bad_field(format!("invalid compression {compression}")));
    }
    let image_size = stream.read_u32()?;
    if image_size == 0 && compression != 0 {
      return Err(bad_field("image size is 0 for a compressed image".to_string()));
    }
    let info = Self {
      header_size,
      width,
      height,
      planes,
      bits_per_pixel,
      compression,
      image_size,
      x_pixels_per_meter: stream.read_i32()?,
      y_pixels_per_meter: stream.read_i32()?,
      colors_used: stream.read_u32()?,
      colors_important: stream.read_u32()?,
    };
    log::trace!("{info:?}");
    Ok(info)
  }

  /// Writes the 40 bytes of the info header at the stream's cursor.
  pub fn write(&self, stream: &mut Stream<'_>) -> MediaResult<()> {
    stream.set_byte_order(ByteOrder::Little);
    stream.write_u32(self.header_size)?;
    stream.write_i32(self.width)?;
    stream.write_i32(self.height)?;
    stream.write_u16(self.planes)?;
    stream.write_u16(self.bits_per_pixel)?;
    stream.write_u32(self.compression)?;
    stream.write_u32(self.image_size)?;
    stream.write_i32(self.x_pixels_per_meter)?;
    stream.write_i32(self.y_pixels_per_meter)?;
    stream.write_u32(self.colors_used)?;
    stream.write_u32(self.colors_important)
  }

  /// If the rows are stored top row first.
  #[inline]
  #[must_use]
  pub const fn is_top_down(&self) -> bool {
    self.height < 0
  }

  /// Width in pixels, 0 if the stored value is negative.
  #[inline]
  #[must_use]
  pub const fn pixel_width(&self) -> u32 {
    if self.width < 0 {
      0
    } else {
      self.width as u32
    }
  }

  /// Height in pixels, no matter the row order.
  #[inline]
  #[must_use]
  pub const fn pixel_height(&self) -> u32 {
    self.height.unsigned_abs()
  }
}

fn bad_field(msg: String) -> MediaError {
  log::warn!("BMP info header: {msg}");
  MediaError::format(msg)
}
