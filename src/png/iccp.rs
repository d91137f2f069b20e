use super::*;
use crate::MediaError;

/// `iCCP`: Embedded ICC profile
///
/// * The profile `name` may be any convenient name for referring to the
///   profile. It is case-sensitive.
/// * The `compressed_data` is a zlib data stream which inflates to the ICC
///   profile. It's kept as is.
///
/// If this chunk is present, then the `sRGB` chunk *should not* be present.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct PngIccProfile {
  pub name: String,
  /// Always 0 (zlib).
  pub compression_method: u8,
  pub compressed_data: Vec<u8>,
}
impl TryFrom<&[u8]> for PngIccProfile {
  type Error = MediaError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    let (name, rest) = split_keyword(data, "iCCP")?;
    match rest {
      [0, compressed @ ..] => Ok(Self {
        name,
        compression_method: 0,
        compressed_data: compressed.to_vec(),
      }),
      _ => Err(MediaError::format("iCCP has an unknown compression method")),
    }
  }
}
impl core::fmt::Debug for PngIccProfile {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngIccProfile")
      .field("name", &self.name)
      .field("compression_method", &self.compression_method)
      .field("compressed_data", &self.compressed_data.len())
      .finish()
  }
}

#[test]
fn test_iccp() {
  let p = PngIccProfile::try_from(b"ICC Profile\0\0\x78\x9C\x01".as_slice()).unwrap();
  assert_eq!(p.name, "ICC Profile");
  assert_eq!(p.compressed_data, [0x78, 0x9C, 0x01]);
  assert!(PngIccProfile::try_from(b"ICC Profile\0\x01\x78".as_slice()).is_err());
  assert!(PngIccProfile::try_from(b"ICC Profile".as_slice()).is_err());
}
