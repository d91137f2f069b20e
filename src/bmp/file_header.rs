use super::*;
use crate::{AsciiArray, ByteOrder, MediaError};

/// The tag at the start of every BMP file this module handles.
pub const BMP_SIGNATURE: AsciiArray<2> = AsciiArray(*b"BM");

/// Size of the file header in bytes.
pub const BMP_FILE_HEADER_SIZE: u32 = 14;

/// The header at the start of all BMP files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BmpFileHeader {
  /// Always `BM` in a file that parsed.
  pub signature: AsciiArray<2>,

  /// The total size of the file.
  ///
  /// If this doesn't match the actual size of the file, there might be some
  /// sort of data loss or corruption.
  pub file_size: u32,

  /// Should be zero.
  pub reserved: u32,

  /// The byte index within the file where the pixel data starts.
  pub data_offset: u32,
}

impl BmpFileHeader {
  /// Reads the file header from the start of the stream.
  ///
  /// This sets the stream's byte order to little-endian.
  pub fn read(stream: &mut Stream<'_>) -> MediaResult<Self> {
    stream.set_cursor_position(0)?;
    stream.set_byte_order(ByteOrder::Little);
    // the tag is two characters, not a number, so it's never byte swapped.
    let signature = AsciiArray(stream.read_array::<2>()?);
    if signature != BMP_SIGNATURE {
      log::warn!("invalid BMP signature {signature:?}");
      return Err(MediaError::format(format!("invalid BMP signature {signature:?}")));
    }
    let header = Self {
      signature,
      file_size: stream.read_u32()?,
      reserved: stream.read_u32()?,
      data_offset: stream.read_u32()?,
    };
    log::trace!("{header:?}");
    Ok(header)
  }

  /// Writes the file header at the stream's cursor.
  pub fn write(&self, stream: &mut Stream<'_>) -> MediaResult<()> {
    stream.write(&self.signature.0)?;
    stream.set_byte_order(ByteOrder::Little);
    stream.write_u32(self.file_size)?;
    stream.write_u32(self.reserved)?;
    stream.write_u32(self.data_offset)
  }
}

impl From<[u8; 14]> for BmpFileHeader {
  #[inline]
  #[must_use]
  fn from(value: [u8; 14]) -> Self {
    let u32_at = |i: usize| u32::from_le_bytes([value[i], value[i + 1], value[i + 2], value[i + 3]]);
    Self {
      signature: AsciiArray([value[0], value[1]]),
      file_size: u32_at(2),
      reserved: u32_at(6),
      data_offset: u32_at(10),
    }
  }
}
impl From<BmpFileHeader> for [u8; 14] {
  #[inline]
  fn from(h: BmpFileHeader) -> Self {
    let mut a = [0; 14];
    a[0..2].copy_from_slice(h.signature.0.as_slice());
    a[2..6].copy_from_slice(h.file_size.to_le_bytes().as_slice());
    a[6..10].copy_from_slice(h.reserved.to_le_bytes().as_slice());
    a[10..14].copy_from_slice(h.data_offset.to_le_bytes().as_slice());
    a
  }
}

#[test]
fn test_file_header_bytes() {
  let bytes: [u8; 14] = [b'B', b'M', 0x46, 0, 0, 0, 0, 0, 0, 0, 0x36, 0, 0, 0];
  let h = BmpFileHeader::from(bytes);
  assert_eq!(h.signature, BMP_SIGNATURE);
  assert_eq!(h.file_size, 70);
  assert_eq!(h.data_offset, 54);
  assert_eq!(<[u8; 14]>::from(h), bytes);

  let mut s = Stream::from_memory(&bytes, StreamFlags::READ).unwrap();
  assert_eq!(BmpFileHeader::read(&mut s).unwrap(), h);
  assert_eq!(s.cursor_position(), 14);
}
