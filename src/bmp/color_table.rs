use super::*;
use crate::MediaError;
use bytemuck::{Pod, Zeroable};

/// The most entries a BMP color table can have.
pub const BMP_MAX_COLOR_TABLE_LEN: u32 = 256;

/// One `[b, g, r, 0]` entry of a BMP color table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct BmpColorTableItem {
  pub blue: u8,
  pub green: u8,
  pub red: u8,
  pub reserved: u8,
}
impl BmpColorTableItem {
  /// The color as `[r, g, b]`.
  #[inline]
  #[must_use]
  pub const fn rgb(self) -> [u8; 3] {
    [self.red, self.green, self.blue]
  }
}

/// Reads the color table that follows the info header.
///
/// There's only a table when the image uses 8 or fewer bits per pixel and
/// `colors_used` is non-zero, otherwise this gives an empty `Vec`.
///
/// ## Failure
/// * More than 256 colors is a format error.
/// * A table that runs past the end of the stream is a format error.
pub fn bmp_read_color_table(
  stream: &mut Stream<'_>, info: &BmpInfoHeader,
) -> MediaResult<Vec<BmpColorTableItem>> {
  if info.colors_used == 0 || info.bits_per_pixel > 8 {
    return Ok(Vec::new());
  }
  if info.colors_used > BMP_MAX_COLOR_TABLE_LEN {
    log::warn!("BMP color table claims {} colors", info.colors_used);
    return Err(MediaError::format(format!("{} color table entries is too many", info.colors_used)));
  }
  stream.set_cursor_position(BMP_FILE_HEADER_SIZE as usize + info.header_size as usize)?;
  let mut table = vec![BmpColorTableItem::zeroed(); info.colors_used as usize];
  stream.read_exact(bytemuck::cast_slice_mut(&mut table))?;
  Ok(table)
}

/// Writes a color table, which can be empty.
pub fn bmp_write_color_table(
  stream: &mut Stream<'_>, table: &[BmpColorTableItem],
) -> MediaResult<()> {
  if !table.is_empty() {
    stream.write(bytemuck::cast_slice(table))?;
  }
  Ok(())
}
