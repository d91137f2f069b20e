use crate::{MediaError, U16BE};
use bytemuck::{Pod, Zeroable};

#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
#[repr(C)]
struct TimePayload {
  year: U16BE,
  month: u8,
  day: u8,
  hour: u8,
  minute: u8,
  second: u8,
}

/// `tIME`: Image last-modification time, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PngTime {
  /// 4-digit year.
  pub year: u16,
  /// 1-12
  pub month: u8,
  /// 1-31
  pub day: u8,
  /// 0-23
  pub hour: u8,
  /// 0-59
  pub minute: u8,
  /// 0-60 (60 is for leap seconds)
  pub second: u8,
}
impl TryFrom<&[u8]> for PngTime {
  type Error = MediaError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    if data.len() != core::mem::size_of::<TimePayload>() {
      return Err(MediaError::format(format!("tIME payload is {} bytes, expected 7", data.len())));
    }
    let p: TimePayload = bytemuck::pod_read_unaligned(data);
    let t = Self {
      year: p.year.get(),
      month: p.month,
      day: p.day,
      hour: p.hour,
      minute: p.minute,
      second: p.second,
    };
    if !(1..=12).contains(&t.month)
      || !(1..=31).contains(&t.day)
      || t.hour > 23
      || t.minute > 59
      || t.second > 60
    {
      return Err(MediaError::format(format!("invalid tIME {t:?}")));
    }
    Ok(t)
  }
}

#[test]
fn test_time() {
  let t = PngTime::try_from([0x07, 0xE8, 2, 29, 23, 59, 60].as_slice()).unwrap();
  assert_eq!((t.year, t.month, t.day, t.second), (2024, 2, 29, 60));
  assert!(PngTime::try_from([0x07, 0xE8, 13, 1, 0, 0, 0].as_slice()).is_err());
  assert!(PngTime::try_from([0x07, 0xE8, 1, 1, 0, 0].as_slice()).is_err());
}
