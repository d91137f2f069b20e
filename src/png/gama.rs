use crate::{MediaError, MediaResult};

/// `gAMA`: Image gamma
///
/// The chunk stores the gamma times 100,000, so 45455 is a gamma of 1/2.2.
///
/// An `sRGB` chunk or `iCCP` chunk, when present and recognized, overrides the
/// `gAMA` chunk.
///
/// ## Failure
/// * A payload that isn't 4 bytes, or a gamma of 0, is a format error.
pub fn png_parse_gamma(data: &[u8]) -> MediaResult<f32> {
  let stored = match data {
    [a, b, c, d] => u32::from_be_bytes([*a, *b, *c, *d]),
    _ => return Err(MediaError::format(format!("gAMA payload is {} bytes, expected 4", data.len()))),
  };
  if stored == 0 {
    return Err(MediaError::format("gAMA of 0"));
  }
  Ok((f64::from(stored) / 100_000.0) as f32)
}

#[test]
fn test_gama() {
  let g = png_parse_gamma(&45455_u32.to_be_bytes()).unwrap();
  assert!((g - 0.45455).abs() < 1e-6);
  assert!(png_parse_gamma(&[0, 0, 0, 0]).is_err());
  assert!(png_parse_gamma(&[0, 1]).is_err());
}
