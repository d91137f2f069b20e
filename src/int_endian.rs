//! Fixed byte-order integers for overlaying onto raw chunk payloads.
//!
//! These only hold byte arrays, so they have an alignment of 1 and any byte
//! slice of the right length can be read as one with
//! [`bytemuck::pod_read_unaligned`].

use bytemuck::{Pod, Zeroable};

/// A `u16` stored as big-endian bytes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct U16BE([u8; 2]);
impl U16BE {
  /// Convert this value to a native `u16`
  #[inline]
  #[must_use]
  pub const fn get(self) -> u16 {
    u16::from_be_bytes(self.0)
  }
  /// Make a value from a native `u16`
  #[inline]
  #[must_use]
  pub const fn new(u: u16) -> Self {
    Self(u.to_be_bytes())
  }
}
impl core::fmt::Debug for U16BE {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Debug::fmt(&self.get(), f)
  }
}
impl From<U16BE> for u16 {
  #[inline]
  #[must_use]
  fn from(value: U16BE) -> Self {
    value.get()
  }
}

/// A `u32` stored as big-endian bytes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct U32BE([u8; 4]);
impl U32BE {
  /// Convert this value to a native `u32`
  #[inline]
  #[must_use]
  pub const fn get(self) -> u32 {
    u32::from_be_bytes(self.0)
  }
  /// Make a value from a native `u32`
  #[inline]
  #[must_use]
  pub const fn new(u: u32) -> Self {
    Self(u.to_be_bytes())
  }
}
impl core::fmt::Debug for U32BE {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Debug::fmt(&self.get(), f)
  }
}
impl From<U32BE> for u32 {
  #[inline]
  #[must_use]
  fn from(value: U32BE) -> Self {
    value.get()
  }
}

#[test]
fn test_be_layout() {
  let x: U32BE = bytemuck::pod_read_unaligned(&[0x12, 0x34, 0x56, 0x78]);
  assert_eq!(x.get(), 0x1234_5678);
  assert_eq!(bytemuck::bytes_of(&U16BE::new(0xABCD)), &[0xAB, 0xCD]);
  assert_eq!(core::mem::align_of::<U32BE>(), 1);
}
