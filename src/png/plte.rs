use super::*;
use crate::MediaError;

/// `PLTE`: Palette
///
/// Palette entries are always RGB. If an indexed image has transparency then
/// that info goes in a separate `tRNS` chunk.
///
/// The palette is stored but pixels are never looked up in it.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct PngPalette {
  pub entries: Vec<[u8; 3]>,
}
impl PngPalette {
  /// Parses a `PLTE` payload.
  ///
  /// ## Failure
  /// * A length that isn't a multiple of 3, or a palette outside of 1 to 256
  ///   entries, is a format error.
  /// * An indexed image can't have more entries than its bit depth can
  ///   address.
  pub fn parse(data: &[u8], header: &PngHeader) -> MediaResult<Self> {
    let entries: &[[u8; 3]] = bytemuck::try_cast_slice(data)
      .map_err(|_| MediaError::format(format!("PLTE length {} isn't a multiple of 3", data.len())))?;
    if entries.is_empty() || entries.len() > 256 {
      return Err(MediaError::format(format!("PLTE has {} entries", entries.len())));
    }
    let addressable = 1_usize.checked_shl(u32::from(header.bit_depth)).unwrap_or(usize::MAX);
    if header.color_type() == Some(PngColorType::Indexed) && entries.len() > addressable {
      return Err(MediaError::format(format!(
        "PLTE has {} entries, a {}-bit indexed image can only use {addressable}",
        entries.len(),
        header.bit_depth
      )));
    }
    Ok(Self { entries: entries.to_vec() })
  }
}
impl core::fmt::Debug for PngPalette {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // currently prints no more than 4 palette entries
    f.debug_tuple("PngPalette")
      .field(&&self.entries[..self.entries.len().min(4)])
      .field(&self.entries.len())
      .finish()
  }
}

#[test]
fn test_plte_parse() {
  let rgb = PngHeader { width: 1, height: 1, bit_depth: 8, color_type: 2, ..Default::default() };
  let p = PngPalette::parse(&[1, 2, 3, 4, 5, 6], &rgb).unwrap();
  assert_eq!(p.entries, [[1, 2, 3], [4, 5, 6]]);
  assert!(PngPalette::parse(&[1, 2, 3, 4], &rgb).is_err());
  assert!(PngPalette::parse(&[], &rgb).is_err());
  let indexed_1bit = PngHeader { bit_depth: 1, color_type: 3, ..rgb };
  assert!(PngPalette::parse(&[0; 6], &indexed_1bit).is_ok());
  assert!(PngPalette::parse(&[0; 9], &indexed_1bit).is_err());
}
