use super::*;
use crate::MediaError;

/// Parses the headers, color table, and raw pixel bytes of a BMP.
///
/// Everything is validated before the pixel data is allocated, including
/// that the source actually holds `stride * height` bytes past the data
/// offset.
pub fn bmp_read_context(stream: &mut Stream<'_>, limits: &DecodeLimits) -> MediaResult<BmpContext> {
  let header = BmpFileHeader::read(stream)?;
  let info_header = BmpInfoHeader::read(stream)?;
  limits.check_dimensions(info_header.pixel_width(), info_header.pixel_height())?;
  let color_table = bmp_read_color_table(stream, &info_header)?;
  bmp_check_decodable(&info_header, &color_table)?;

  let stride = padded_bytes_per_line(info_header.pixel_width(), info_header.bits_per_pixel)
    .ok_or_else(|| MediaError::format("BMP row size overflows"))?;
  let data_len = stride
    .checked_mul(info_header.pixel_height() as usize)
    .ok_or_else(|| MediaError::format("BMP pixel data size overflows"))?;
  let offset = header.data_offset as usize;
  if offset.checked_add(data_len).map_or(true, |end| end > stream.source_size()) {
    log::warn!(
      "BMP pixel data needs {data_len} bytes at offset {offset}, the source is {} bytes",
      stream.source_size()
    );
    return Err(MediaError::format("BMP pixel data is truncated"));
  }
  stream.set_cursor_position(offset)?;
  let mut image_data = Vec::new();
  image_data.try_reserve_exact(data_len)?;
  image_data.resize(data_len, 0);
  stream.read_exact(&mut image_data)?;

  Ok(BmpContext { header, info_header, color_table, image_data })
}

/// Reads a BMP from a stream into `image`, using the default limits.
///
/// The image ends up 8-bit RGB, top row first.
pub fn bmp_read(stream: &mut Stream<'_>, image: &mut ImageBuffer) -> MediaResult<()> {
  bmp_read_with_limits(stream, image, &DecodeLimits::default())
}

/// Reads a BMP from a stream into `image`.
///
/// ## Failure
/// * Header problems or truncated pixel data are format errors.
/// * RLE compression and 16 bits per pixel are unsupported.
/// * `image` is only modified when the read succeeds.
pub fn bmp_read_with_limits(
  stream: &mut Stream<'_>, image: &mut ImageBuffer, limits: &DecodeLimits,
) -> MediaResult<()> {
  let context = bmp_read_context(stream, limits).map_err(|e| {
    log::warn!("BMP read failed: {e}");
    e
  })?;
  bmp_decode(&context, image)
}
