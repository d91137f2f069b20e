use super::*;
use crate::{MediaError, U32BE};
use bytemuck::{Pod, Zeroable};

#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
#[repr(C)]
struct ChrmPayload {
  white_x: U32BE,
  white_y: U32BE,
  red_x: U32BE,
  red_y: U32BE,
  green_x: U32BE,
  green_y: U32BE,
  blue_x: U32BE,
  blue_y: U32BE,
}

/// `cHRM`: Primary chromaticities and white point
///
/// The chunk stores each value times 100,000, these are the converted values.
///
/// **Example:** A stored integer of 31270 is a value of 0.3127.
///
/// An `sRGB` chunk or `iCCP` chunk, when present and recognized, overrides the
/// `cHRM` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PngChromaticity {
  pub white_x: f32,
  pub white_y: f32,
  pub red_x: f32,
  pub red_y: f32,
  pub green_x: f32,
  pub green_y: f32,
  pub blue_x: f32,
  pub blue_y: f32,
}
impl TryFrom<&[u8]> for PngChromaticity {
  type Error = MediaError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    if data.len() != core::mem::size_of::<ChrmPayload>() {
      return Err(MediaError::format(format!("cHRM payload is {} bytes, expected 32", data.len())));
    }
    let p: ChrmPayload = bytemuck::pod_read_unaligned(data);
    let f = |v: U32BE| (f64::from(v.get()) / 100_000.0) as f32;
    Ok(Self {
      white_x: f(p.white_x),
      white_y: f(p.white_y),
      red_x: f(p.red_x),
      red_y: f(p.red_y),
      green_x: f(p.green_x),
      green_y: f(p.green_y),
      blue_x: f(p.blue_x),
      blue_y: f(p.blue_y),
    })
  }
}

#[test]
fn test_chrm_srgb_primaries() {
  let stored: [u32; 8] = [31270, 32900, 64000, 33000, 30000, 60000, 15000, 6000];
  let bytes: Vec<u8> = stored.iter().flat_map(|v| v.to_be_bytes()).collect();
  let c = PngChromaticity::try_from(bytes.as_slice()).unwrap();
  assert!((c.white_x - 0.3127).abs() < 1e-6);
  assert!((c.green_y - 0.6).abs() < 1e-6);
  assert!((c.blue_y - 0.06).abs() < 1e-6);
  assert!(PngChromaticity::try_from(&bytes[..31]).is_err());
}
