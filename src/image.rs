#![forbid(unsafe_code)]

//! The decoded image container that every codec reads into and writes from.

use crate::{MediaError, MediaResult};

/// How the channels of each pixel are arranged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChannelFormat {
  Rgb,
  Rgba,
  Bgr,
  Bgra,
  Gray,
  GrayA,
  #[default]
  Unknown,
}
impl ChannelFormat {
  /// How many channels a pixel in this format has, or 0 if unknown.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> u8 {
    match self {
      Self::Rgb | Self::Bgr => 3,
      Self::Rgba | Self::Bgra => 4,
      Self::Gray => 1,
      Self::GrayA => 2,
      Self::Unknown => 0,
    }
  }
}
impl core::fmt::Display for ChannelFormat {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(match self {
      Self::Rgb => "RGB",
      Self::Rgba => "RGBA",
      Self::Bgr => "BGR",
      Self::Bgra => "BGRA",
      Self::Gray => "GRAY",
      Self::GrayA => "GRAYA",
      Self::Unknown => "UNKNOWN",
    })
  }
}

/// The scalar type of each channel value.
///
/// Integer types are unsigned and normalized: `0` is 0.0 and the type's max is
/// 1.0. Float types hold their value directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataType {
  U8,
  U16,
  U32,
  U64,
  F32,
  F64,
  #[default]
  Unknown,
}
impl DataType {
  /// Size in bytes of one channel value, or 0 if unknown.
  #[inline]
  #[must_use]
  pub const fn size(self) -> usize {
    match self {
      Self::U8 => 1,
      Self::U16 => 2,
      Self::U32 | Self::F32 => 4,
      Self::U64 | Self::F64 => 8,
      Self::Unknown => 0,
    }
  }

  #[inline]
  #[must_use]
  pub const fn is_float(self) -> bool {
    matches!(self, Self::F32 | Self::F64)
  }

  /// The value that normalizes to 1.0.
  #[inline]
  #[must_use]
  pub fn max_value(self) -> f64 {
    match self {
      Self::U8 => u8::MAX as f64,
      Self::U16 => u16::MAX as f64,
      Self::U32 => u32::MAX as f64,
      Self::U64 => u64::MAX as f64,
      Self::F32 | Self::F64 | Self::Unknown => 1.0,
    }
  }
}
impl core::fmt::Display for DataType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(match self {
      Self::U8 => "UINT8",
      Self::U16 => "UINT16",
      Self::U32 => "UINT32",
      Self::U64 => "UINT64",
      Self::F32 => "FLOAT32",
      Self::F64 => "FLOAT64",
      Self::Unknown => "UNKNOWN",
    })
  }
}

/// Image file formats this crate can name.
///
/// Only [`Png`](Self::Png), [`Bmp`](Self::Bmp), and [`Ppm`](Self::Ppm) are
/// ever detected, the rest exist so callers can talk about them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum FileFormat {
  Png,
  Jpeg,
  Bmp,
  Tiff,
  Gif,
  Webp,
  Ppm,
  Pgm,
  Pbm,
  Pnm,
  Hdr,
  Exr,
  Ico,
  Tga,
  Jpeg2000,
  Raw,
  Psd,
  Heif,
  Cur,
  Dds,
  Pict,
  Svg,
  Avif,
  #[default]
  Unknown,
}
impl core::fmt::Display for FileFormat {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(match self {
      Self::Png => "PNG",
      Self::Jpeg => "JPEG",
      Self::Bmp => "BMP",
      Self::Tiff => "TIFF",
      Self::Gif => "GIF",
      Self::Webp => "WEBP",
      Self::Ppm => "PPM",
      Self::Pgm => "PGM",
      Self::Pbm => "PBM",
      Self::Pnm => "PNM",
      Self::Hdr => "HDR",
      Self::Exr => "EXR",
      Self::Ico => "ICO",
      Self::Tga => "TGA",
      Self::Jpeg2000 => "JPEG2000",
      Self::Raw => "RAW",
      Self::Psd => "PSD",
      Self::Heif => "HEIF",
      Self::Cur => "CUR",
      Self::Dds => "DDS",
      Self::Pict => "PICT",
      Self::Svg => "SVG",
      Self::Avif => "AVIF",
      Self::Unknown => "UNKNOWN",
    })
  }
}

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// pixel index.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  y as usize * width as usize + x as usize
}

/// Pixels in memory, plus the description needed to interpret them.
///
/// Pixels are stored row-major, top row first, with every channel of a pixel
/// next to each other. Multi-byte channel values are in host byte order.
///
/// The backing buffer is kept between [`allocate`](Self::allocate) calls and
/// only grows, so decoding many images of a similar size into one buffer
/// doesn't reallocate every time.
#[derive(Clone, Default)]
pub struct ImageBuffer {
  width: u32,
  height: u32,
  channel_format: ChannelFormat,
  data_type: DataType,
  num_channels: u8,
  bits_per_channel: u8,
  /// The full allocation. Only `..data_size` holds pixels.
  data: Vec<u8>,
  data_size: usize,
}

impl core::fmt::Debug for ImageBuffer {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("ImageBuffer")
      .field("width", &self.width)
      .field("height", &self.height)
      .field("channel_format", &self.channel_format)
      .field("data_type", &self.data_type)
      .field("num_channels", &self.num_channels)
      .field("bits_per_channel", &self.bits_per_channel)
      .field("data_size", &self.data_size)
      .field("capacity", &self.capacity())
      .finish()
  }
}

impl ImageBuffer {
  /// An empty, unallocated image.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self {
      width: 0,
      height: 0,
      channel_format: ChannelFormat::Unknown,
      data_type: DataType::Unknown,
      num_channels: 0,
      bits_per_channel: 0,
      data: Vec::new(),
      data_size: 0,
    }
  }

  /// Makes sure the backing buffer holds at least `required` bytes.
  ///
  /// A buffer that's already big enough is kept (contents and all). A smaller
  /// one is thrown away first, so the old contents don't get copied.
  pub fn ensure_capacity(&mut self, required: usize) -> MediaResult<()> {
    if self.data.len() < required {
      self.data = Vec::new();
      self.data.try_reserve_exact(required).map_err(|e| {
        log::warn!("couldn't allocate {required} bytes of image data");
        e
      })?;
      self.data.resize(required, 0);
    }
    Ok(())
  }

  /// Sets up the image description and makes room for the pixels.
  ///
  /// The pixel bytes are not cleared. When the existing buffer gets reused
  /// they still hold whatever was there before.
  ///
  /// ## Failure
  /// * Zero width, height, or channel count, or an unknown data type.
  /// * The byte size overflows `usize`.
  /// * The allocation fails.
  pub fn allocate(
    &mut self, width: u32, height: u32, channel_format: ChannelFormat, data_type: DataType,
    num_channels: u8,
  ) -> MediaResult<()> {
    if width == 0 || height == 0 {
      return Err(MediaError::invalid(format!(
        "image dimensions must be non-zero, got {width}x{height}"
      )));
    }
    if num_channels == 0 {
      return Err(MediaError::invalid("an image needs at least one channel"));
    }
    if data_type == DataType::Unknown {
      return Err(MediaError::invalid("an image needs a known data type"));
    }
    let required = (width as usize)
      .checked_mul(height as usize)
      .and_then(|px| px.checked_mul(usize::from(num_channels)))
      .and_then(|v| v.checked_mul(data_type.size()))
      .ok_or_else(|| MediaError::invalid(format!("a {width}x{height} image is too large to address")))?;
    self.ensure_capacity(required)?;
    self.width = width;
    self.height = height;
    self.channel_format = channel_format;
    self.data_type = data_type;
    self.num_channels = num_channels;
    self.bits_per_channel = (data_type.size() * 8) as u8;
    self.data_size = required;
    Ok(())
  }

  /// Overwrites this image with a deep copy of `src`, reusing this image's
  /// buffer if it's big enough.
  pub fn copy_from(&mut self, src: &ImageBuffer) -> MediaResult<()> {
    self.ensure_capacity(src.data_size)?;
    self.data[..src.data_size].copy_from_slice(src.data());
    self.width = src.width;
    self.height = src.height;
    self.channel_format = src.channel_format;
    self.data_type = src.data_type;
    self.num_channels = src.num_channels;
    self.bits_per_channel = src.bits_per_channel;
    self.data_size = src.data_size;
    Ok(())
  }

  /// Frees the buffer and goes back to the empty state.
  #[inline]
  pub fn destroy(&mut self) {
    *self = Self::new();
  }

  #[inline]
  #[must_use]
  pub fn is_allocated(&self) -> bool {
    self.data_size != 0
  }
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }
  #[inline]
  #[must_use]
  pub const fn channel_format(&self) -> ChannelFormat {
    self.channel_format
  }
  #[inline]
  #[must_use]
  pub const fn data_type(&self) -> DataType {
    self.data_type
  }
  #[inline]
  #[must_use]
  pub const fn num_channels(&self) -> u8 {
    self.num_channels
  }
  #[inline]
  #[must_use]
  pub const fn bits_per_channel(&self) -> u8 {
    self.bits_per_channel
  }
  /// Bytes of the backing buffer, which can exceed [`data_size`](Self::data_size).
  #[inline]
  #[must_use]
  pub fn capacity(&self) -> usize {
    self.data.len()
  }
  /// Bytes of actual pixel data.
  #[inline]
  #[must_use]
  pub const fn data_size(&self) -> usize {
    self.data_size
  }
  #[inline]
  #[must_use]
  pub const fn bytes_per_channel(&self) -> usize {
    self.bits_per_channel as usize / 8
  }
  #[inline]
  #[must_use]
  pub const fn bytes_per_pixel(&self) -> usize {
    self.bytes_per_channel() * self.num_channels as usize
  }
  #[inline]
  #[must_use]
  pub const fn row_stride(&self) -> usize {
    self.bytes_per_pixel() * self.width as usize
  }
  /// The pixel bytes.
  #[inline]
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.data[..self.data_size]
  }
  #[inline]
  #[must_use]
  pub fn data_mut(&mut self) -> &mut [u8] {
    &mut self.data[..self.data_size]
  }

  /// Byte offset of a channel value, after bounds checking it.
  pub fn channel_offset(&self, x: u32, y: u32, channel: u8) -> MediaResult<usize> {
    if x >= self.width || y >= self.height || channel >= self.num_channels {
      return Err(MediaError::invalid(format!(
        "pixel ({x},{y}) channel {channel} is outside a {}x{}x{} image",
        self.width, self.height, self.num_channels
      )));
    }
    Ok(
      xy_width_to_index(x, y, self.width) * self.bytes_per_pixel()
        + usize::from(channel) * self.bytes_per_channel(),
    )
  }

  /// Gets a channel value normalized to `0.0..=1.0` (integer types) or as-is
  /// (float types).
  #[inline]
  pub fn get_pixel_value(&self, x: u32, y: u32, channel: u8) -> MediaResult<f64> {
    self.get_pixel_value_raw(x, y, channel).map(|(v, _)| v)
  }

  /// Like [`get_pixel_value`](Self::get_pixel_value), and also gives the
  /// untransformed bytes of the value.
  pub fn get_pixel_value_raw(&self, x: u32, y: u32, channel: u8) -> MediaResult<(f64, &[u8])> {
    let offset = self.channel_offset(x, y, channel)?;
    let raw = &self.data[offset..offset + self.bytes_per_channel()];
    let max = self.data_type.max_value();
    let value = match self.data_type {
      DataType::U8 => f64::from(raw[0]) / max,
      DataType::U16 => f64::from(bytemuck::pod_read_unaligned::<u16>(raw)) / max,
      DataType::U32 => f64::from(bytemuck::pod_read_unaligned::<u32>(raw)) / max,
      DataType::U64 => bytemuck::pod_read_unaligned::<u64>(raw) as f64 / max,
      DataType::F32 => f64::from(bytemuck::pod_read_unaligned::<f32>(raw)),
      DataType::F64 => bytemuck::pod_read_unaligned::<f64>(raw),
      DataType::Unknown => return Err(MediaError::invalid("image has an unknown data type")),
    };
    Ok((value, raw))
  }

  /// Sets a channel value.
  ///
  /// For integer types `value` is clamped to `0.0..=1.0` and scaled to the
  /// nearest integer. For float types it's stored as-is.
  pub fn set_pixel_value(&mut self, x: u32, y: u32, channel: u8, value: f64) -> MediaResult<()> {
    let offset = self.channel_offset(x, y, channel)?;
    let end = offset + self.bytes_per_channel();
    let data_type = self.data_type;
    let scaled = (value.clamp(0.0, 1.0) * data_type.max_value()).round();
    let out = &mut self.data[offset..end];
    match data_type {
      DataType::U8 => out[0] = scaled as u8,
      DataType::U16 => out.copy_from_slice(&(scaled as u16).to_ne_bytes()),
      DataType::U32 => out.copy_from_slice(&(scaled as u32).to_ne_bytes()),
      DataType::U64 => out.copy_from_slice(&(scaled as u64).to_ne_bytes()),
      DataType::F32 => out.copy_from_slice(&(value as f32).to_ne_bytes()),
      DataType::F64 => out.copy_from_slice(&value.to_ne_bytes()),
      DataType::Unknown => return Err(MediaError::invalid("image has an unknown data type")),
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ErrorKind;

  #[test]
  fn test_allocate_sizes() {
    let mut img = ImageBuffer::new();
    assert!(!img.is_allocated());
    img.allocate(3, 2, ChannelFormat::Rgba, DataType::U16, 4).unwrap();
    assert_eq!(img.data_size(), 3 * 2 * 4 * 2);
    assert_eq!(img.bits_per_channel(), 16);
    assert_eq!(img.row_stride(), 24);
    // smaller allocations keep the bigger buffer
    img.allocate(1, 1, ChannelFormat::Gray, DataType::U8, 1).unwrap();
    assert_eq!(img.data_size(), 1);
    assert_eq!(img.capacity(), 48);
    img.destroy();
    assert_eq!(img.capacity(), 0);
    assert_eq!(img.channel_format(), ChannelFormat::Unknown);
  }

  #[test]
  fn test_allocate_rejects_bad_arguments() {
    let mut img = ImageBuffer::new();
    let e = img.allocate(0, 2, ChannelFormat::Rgb, DataType::U8, 3).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    let e = img.allocate(2, 2, ChannelFormat::Rgb, DataType::Unknown, 3).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    let e = img.allocate(2, 2, ChannelFormat::Rgb, DataType::U8, 0).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidArgument);
  }

  #[test]
  fn test_pixel_value_normalization() {
    let mut img = ImageBuffer::new();
    img.allocate(2, 2, ChannelFormat::Rgb, DataType::U8, 3).unwrap();
    img.set_pixel_value(1, 1, 2, 1.0).unwrap();
    let (v, raw) = img.get_pixel_value_raw(1, 1, 2).unwrap();
    assert_eq!(v, 1.0);
    assert_eq!(raw, &[255]);
    img.set_pixel_value(0, 0, 0, 128.0 / 255.0).unwrap();
    assert_eq!(img.data()[0], 128);
    img.set_pixel_value(0, 0, 1, 7.0).unwrap();
    assert_eq!(img.data()[1], 255);
    assert_eq!(img.get_pixel_value(2, 0, 0).unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(img.get_pixel_value(0, 0, 3).unwrap_err().kind(), ErrorKind::InvalidArgument);
  }

  #[test]
  fn test_pixel_value_wide_types() {
    let mut img = ImageBuffer::new();
    img.allocate(1, 1, ChannelFormat::GrayA, DataType::U16, 2).unwrap();
    img.set_pixel_value(0, 0, 1, 1.0).unwrap();
    assert_eq!(&img.data()[2..4], &u16::MAX.to_ne_bytes());
    img.allocate(1, 1, ChannelFormat::Gray, DataType::F32, 1).unwrap();
    img.set_pixel_value(0, 0, 0, 2.5).unwrap();
    assert_eq!(img.get_pixel_value(0, 0, 0).unwrap(), 2.5);
  }

  #[test]
  fn test_copy_from_reuses_dest() {
    let mut src = ImageBuffer::new();
    src.allocate(2, 1, ChannelFormat::Bgr, DataType::U8, 3).unwrap();
    src.data_mut().copy_from_slice(&[1, 2, 3, 4, 5, 6]);
    let mut dest = ImageBuffer::new();
    dest.allocate(10, 10, ChannelFormat::Gray, DataType::U8, 1).unwrap();
    dest.copy_from(&src).unwrap();
    assert_eq!(dest.capacity(), 100);
    assert_eq!(dest.data(), src.data());
    assert_eq!(dest.channel_format(), ChannelFormat::Bgr);
    assert_eq!((dest.width(), dest.height()), (2, 1));
  }

  #[test]
  fn test_display_names() {
    assert_eq!(ChannelFormat::GrayA.to_string(), "GRAYA");
    assert_eq!(DataType::F64.to_string(), "FLOAT64");
    assert_eq!(FileFormat::Jpeg2000.to_string(), "JPEG2000");
  }
}
