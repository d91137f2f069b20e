use crate::{MediaError, MediaResult, SrgbIntent};

/// `sRGB`: Standard RGB colour space
///
/// If the `sRGB` chunk is present, the image samples conform to the
/// [sRGB](https://en.wikipedia.org/wiki/SRGB) colour space and should be shown
/// with the rendering intent given.
///
/// If `sRGB` is present it overrides any `gAMA` and/or `cHRM`.
pub fn png_parse_srgb(data: &[u8]) -> MediaResult<SrgbIntent> {
  Ok(match data {
    [0] => SrgbIntent::Perceptual,
    [1] => SrgbIntent::RelativeColorimetric,
    [2] => SrgbIntent::Saturation,
    [3] => SrgbIntent::AbsoluteColorimetric,
    _ => return Err(MediaError::format(format!("invalid sRGB payload {data:?}"))),
  })
}

#[test]
fn test_srgb() {
  assert_eq!(png_parse_srgb(&[0]).unwrap(), SrgbIntent::Perceptual);
  assert_eq!(png_parse_srgb(&[3]).unwrap(), SrgbIntent::AbsoluteColorimetric);
  assert!(png_parse_srgb(&[4]).is_err());
  assert!(png_parse_srgb(&[0, 0]).is_err());
}
