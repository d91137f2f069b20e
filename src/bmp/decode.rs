use super::*;
use crate::{ChannelFormat, DataType, MediaError};
use bitfrob::U8BitIterHigh;

/// Gets the number of bytes in each line of pixel data, including the padding
/// out to a multiple of 4.
///
/// Returns `None` if the math overflows.
#[inline]
#[must_use]
pub fn padded_bytes_per_line(width: u32, bits_per_pixel: u16) -> Option<usize> {
  let bits = (width as usize).checked_mul(usize::from(bits_per_pixel))?;
  Some(bits.checked_add(31)? / 32 * 4)
}

/// Checks that a parsed BMP is something [`bmp_decode`] can turn into pixels.
///
/// ## Failure
/// * Any compression, or 16 bits per pixel, is unsupported.
/// * An indexed image without a color table is a format error.
pub fn bmp_check_decodable(info: &BmpInfoHeader, color_table: &[BmpColorTableItem]) -> MediaResult<()> {
  if info.compression != 0 {
    log::warn!("BMP compression {} is not supported", info.compression);
    return Err(MediaError::unsupported(format!("BMP compression {}", info.compression)));
  }
  match info.bits_per_pixel {
    1 | 2 | 4 | 8 if color_table.is_empty() => {
      log::warn!("indexed BMP without a color table");
      Err(MediaError::format("indexed BMP has no color table"))
    }
    1 | 2 | 4 | 8 | 24 => Ok(()),
    other => {
      log::warn!("BMP with {other} bits per pixel is not supported");
      Err(MediaError::unsupported(format!("BMP with {other} bits per pixel")))
    }
  }
}

/// Decodes the pixel data of a parsed BMP into an 8-bit RGB image.
///
/// The image comes out top row first no matter how the file stores its rows.
/// On failure `image` is left as it was.
pub fn bmp_decode(context: &BmpContext, image: &mut ImageBuffer) -> MediaResult<()> {
  let info = &context.info_header;
  bmp_check_decodable(info, &context.color_table)?;
  let width = info.pixel_width();
  let height = info.pixel_height();
  let stride = padded_bytes_per_line(width, info.bits_per_pixel)
    .ok_or_else(|| MediaError::format("BMP row size overflows"))?;
  let needed = stride.checked_mul(height as usize);
  if needed.map_or(true, |needed| context.image_data.len() < needed) {
    log::warn!("BMP pixel data is {} bytes, expected {needed:?}", context.image_data.len());
    return Err(MediaError::format("BMP pixel data is truncated"));
  }
  let mut decoded = ImageBuffer::new();
  decoded.allocate(width, height, ChannelFormat::Rgb, DataType::U8, 3)?;
  fill_rows(context, stride, &mut decoded)?;
  *image = decoded;
  Ok(())
}

fn fill_rows(context: &BmpContext, stride: usize, image: &mut ImageBuffer) -> MediaResult<()> {
  let info = &context.info_header;
  let width = image.width() as usize;
  let height = image.height() as usize;
  let out_stride = image.row_stride();
  let table = context.color_table.as_slice();
  let lines = context.image_data.chunks_exact(stride).take(height);
  for (file_row, line) in lines.enumerate() {
    let y = if info.is_top_down() { file_row } else { height - 1 - file_row };
    let out = &mut image.data_mut()[y * out_stride..(y + 1) * out_stride];
    if info.bits_per_pixel == 24 {
      for (dst, bgr) in out.chunks_exact_mut(3).zip(line.chunks_exact(3)) {
        dst.copy_from_slice(&[bgr[2], bgr[1], bgr[0]]);
      }
    } else {
      let count = u32::from(info.bits_per_pixel);
      let indexes =
        line.iter().flat_map(move |&bits| U8BitIterHigh::from_count_and_bits(count, bits)).take(width);
      for (dst, index) in out.chunks_exact_mut(3).zip(indexes) {
        let color = table.get(usize::from(index)).ok_or_else(|| {
          log::warn!("BMP color index {index} is past the {} entry color table", table.len());
          MediaError::format(format!("color index {index} is outside the color table"))
        })?;
        dst.copy_from_slice(&color.rgb());
      }
    }
  }
  Ok(())
}
