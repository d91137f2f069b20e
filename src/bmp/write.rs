use super::*;
use crate::{ChannelFormat, DataType, MediaError};

/// Builds the headers and padded, bottom-up pixel rows for `image`.
///
/// Only 8-bit, 3 channel, BGR images can be encoded. The output is always
/// uncompressed 24 bits per pixel with no color table.
pub fn bmp_encode(image: &ImageBuffer) -> MediaResult<BmpContext> {
  if image.channel_format() != ChannelFormat::Bgr
    || image.data_type() != DataType::U8
    || image.num_channels() != 3
  {
    return Err(MediaError::invalid(format!(
      "BMP encoding needs an 8-bit BGR image with 3 channels, got {} {} with {} channels",
      image.channel_format(),
      image.data_type(),
      image.num_channels()
    )));
  }
  let width = i32::try_from(image.width())
    .map_err(|_| MediaError::invalid("image is too wide for a BMP"))?;
  let height = i32::try_from(image.height())
    .map_err(|_| MediaError::invalid("image is too tall for a BMP"))?;
  let stride = padded_bytes_per_line(image.width(), 24)
    .ok_or_else(|| MediaError::invalid("image is too wide for a BMP"))?;
  let data_len = stride
    .checked_mul(image.height() as usize)
    .ok_or_else(|| MediaError::invalid("image is too large for a BMP"))?;
  let image_size = u32::try_from(data_len)
    .map_err(|_| MediaError::invalid("image is too large for a BMP"))?;
  let data_offset = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE;
  let file_size = image_size
    .checked_add(data_offset)
    .ok_or_else(|| MediaError::invalid("image is too large for a BMP"))?;

  let mut image_data = Vec::new();
  image_data.try_reserve_exact(data_len)?;
  image_data.resize(data_len, 0);
  let row_len = image.row_stride();
  for (line, row) in image_data.chunks_exact_mut(stride).zip(image.data().chunks_exact(row_len).rev()) {
    line[..row_len].copy_from_slice(row);
  }

  Ok(BmpContext {
    header: BmpFileHeader { signature: BMP_SIGNATURE, file_size, reserved: 0, data_offset },
    info_header: BmpInfoHeader {
      header_size: BMP_INFO_HEADER_SIZE,
      width,
      height,
      planes: 1,
      bits_per_pixel: 24,
      compression: 0,
      image_size,
      x_pixels_per_meter: BMP_72_DPI,
      y_pixels_per_meter: BMP_72_DPI,
      colors_used: 0,
      colors_important: 0,
    },
    color_table: Vec::new(),
    image_data,
  })
}

/// Writes `image` as a BMP, starting at the beginning of the stream.
pub fn bmp_write(image: &ImageBuffer, stream: &mut Stream<'_>) -> MediaResult<()> {
  let context = bmp_encode(image)?;
  stream.set_cursor_position(0)?;
  context.header.write(stream)?;
  context.info_header.write(stream)?;
  bmp_write_color_table(stream, &context.color_table)?;
  stream.write(&context.image_data)?;
  Ok(())
}

/// Writes `image` as a BMP file, replacing anything already at `path`.
pub fn bmp_write_to_file(image: &ImageBuffer, path: impl AsRef<Path>) -> MediaResult<()> {
  let mut stream = Stream::from_file(path, StreamFlags::WRITE)?;
  bmp_write(image, &mut stream)?;
  stream.flush()
}

/// Writes `image` as a BMP into `buffer`, giving the number of bytes written.
///
/// ## Failure
/// * A buffer too small for the whole file is a bounds error.
pub fn bmp_write_to_memory(image: &ImageBuffer, buffer: &mut [u8]) -> MediaResult<usize> {
  let mut stream = Stream::from_memory_mut(buffer, StreamFlags::WRITE)?;
  bmp_write(image, &mut stream)?;
  Ok(stream.cursor_position())
}

/// Writes `image` as a BMP into a new `Vec`.
pub fn bmp_write_to_vec(image: &ImageBuffer) -> MediaResult<Vec<u8>> {
  let mut stream = Stream::from_vec(Vec::new(), StreamFlags::APPEND)?;
  bmp_write(image, &mut stream)?;
  Ok(stream.into_memory().unwrap_or_default())
}
