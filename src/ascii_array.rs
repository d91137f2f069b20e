use core::fmt::Write;

/// An array of bytes expected to contain ascii data.
///
/// Nothing enforces the encoding. The `Debug` and `Display` impls just `as`
/// cast each byte into a `char`, which is exactly right for printable ascii
/// and merely ugly for anything else.
///
/// File formats love magic tags that are "meant" to be read as text (`BM`,
/// `IHDR`, `P6`), so this newtype gives those tags a readable `Debug` output
/// inside the header structs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct AsciiArray<const N: usize>(pub [u8; N]);

impl<const N: usize> AsciiArray<N> {
  /// Checks if every byte is an ascii letter.
  #[inline]
  #[must_use]
  pub fn is_alphabetic(&self) -> bool {
    self.0.iter().all(u8::is_ascii_alphabetic)
  }
}

impl<const N: usize> Default for AsciiArray<N> {
  #[inline]
  #[must_use]
  fn default() -> Self {
    Self([0; N])
  }
}

impl<const N: usize> core::fmt::Debug for AsciiArray<N> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    core::fmt::Display::fmt(self, f)?;
    f.write_char('\"')
  }
}
impl<const N: usize> core::fmt::Display for AsciiArray<N> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}

impl<const N: usize> From<[u8; N]> for AsciiArray<N> {
  #[inline]
  #[must_use]
  fn from(array: [u8; N]) -> Self {
    Self(array)
  }
}

#[test]
fn test_ascii_array_debug() {
  assert_eq!(format!("{:?}", AsciiArray(*b"IHDR")), "\"IHDR\"");
  assert_eq!(format!("{}", AsciiArray(*b"BM")), "BM");
  assert!(AsciiArray(*b"tEXt").is_alphabetic());
  assert!(!AsciiArray([b'a', 0]).is_alphabetic());
}
