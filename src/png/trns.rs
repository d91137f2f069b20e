use super::*;
use crate::MediaError;

/// `tRNS`: Transparency
///
/// * `Gray` and `Rgb` each store a single color. All samples of that color in
///   the image are fully transparent, the rest are fully opaque. The value is
///   always stored as a `u16`, even when the bit depth is lower.
/// * `Alpha` holds an alpha value for each palette entry. It can be shorter
///   than the palette, missing entries are fully opaque (`0xFF`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PngTransparency {
  Gray(u16),
  Rgb([u16; 3]),
  Alpha(Vec<u8>),
}
impl PngTransparency {
  /// Parses a `tRNS` payload, which has a layout picked by the color type.
  ///
  /// ## Failure
  /// * Color types that already have alpha can't have this chunk.
  /// * The payload must be the right size for the color type, and an alpha
  ///   table can't be longer than the palette.
  pub fn parse(data: &[u8], header: &PngHeader, palette: Option<&PngPalette>) -> MediaResult<Self> {
    let bad_len = || MediaError::format(format!("tRNS payload of {} bytes is the wrong size", data.len()));
    match header.color_type() {
      Some(PngColorType::Grayscale) => match data {
        [a, b] => Ok(Self::Gray(u16::from_be_bytes([*a, *b]))),
        _ => Err(bad_len()),
      },
      Some(PngColorType::Truecolor) => match data {
        [r0, r1, g0, g1, b0, b1] => Ok(Self::Rgb([
          u16::from_be_bytes([*r0, *r1]),
          u16::from_be_bytes([*g0, *g1]),
          u16::from_be_bytes([*b0, *b1]),
        ])),
        _ => Err(bad_len()),
      },
      Some(PngColorType::Indexed) => {
        let max = palette.map_or(256, |p| p.entries.len());
        if data.len() > max {
          return Err(bad_len());
        }
        Ok(Self::Alpha(data.to_vec()))
      }
      _ => Err(MediaError::format(format!(
        "tRNS isn't allowed with color type {}",
        header.color_type
      ))),
    }
  }
}

#[test]
fn test_trns_by_color_type() {
  let h = |color_type| PngHeader { width: 1, height: 1, bit_depth: 8, color_type, ..Default::default() };
  assert_eq!(PngTransparency::parse(&[1, 2], &h(0), None).unwrap(), PngTransparency::Gray(0x0102));
  assert_eq!(
    PngTransparency::parse(&[0, 1, 0, 2, 0, 3], &h(2), None).unwrap(),
    PngTransparency::Rgb([1, 2, 3])
  );
  let palette = PngPalette { entries: vec![[0; 3]; 2] };
  assert_eq!(
    PngTransparency::parse(&[9], &h(3), Some(&palette)).unwrap(),
    PngTransparency::Alpha(vec![9])
  );
  assert!(PngTransparency::parse(&[9, 9, 9], &h(3), Some(&palette)).is_err());
  assert!(PngTransparency::parse(&[1], &h(0), None).is_err());
  assert!(PngTransparency::parse(&[0, 0], &h(6), None).is_err());
}
