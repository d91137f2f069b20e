use super::*;
use crate::{crc32, ByteOrder, MediaError};

/// The four letter type tag of a PNG chunk.
///
/// The case of each letter is a property bit:
/// * 1st: uppercase is critical, lowercase is ancillary.
/// * 2nd: uppercase is a public chunk, lowercase is private.
/// * 3rd: reserved, always uppercase.
/// * 4th: uppercase is unsafe to copy when editing, lowercase is safe.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkType {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
  pub const tRNS: Self = Self(*b"tRNS");
  pub const cHRM: Self = Self(*b"cHRM");
  pub const gAMA: Self = Self(*b"gAMA");
  pub const sRGB: Self = Self(*b"sRGB");
  pub const iCCP: Self = Self(*b"iCCP");
  pub const tEXt: Self = Self(*b"tEXt");
  pub const iTXt: Self = Self(*b"iTXt");
  pub const eXIf: Self = Self(*b"eXIf");
  pub const tIME: Self = Self(*b"tIME");

  /// If a decoder must understand this chunk to show the image.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    self.0[0].is_ascii_uppercase()
  }

  /// If the chunk is part of the public PNG standard.
  #[inline]
  #[must_use]
  pub const fn is_public(self) -> bool {
    self.0[1].is_ascii_uppercase()
  }

  /// If an editor that doesn't know this chunk can still copy it to a
  /// modified file.
  #[inline]
  #[must_use]
  pub const fn is_safe_to_copy(self) -> bool {
    self.0[3].is_ascii_lowercase()
  }
}
impl core::fmt::Debug for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Debug::fmt(&crate::AsciiArray(self.0), f)
  }
}
impl core::fmt::Display for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Display::fmt(&crate::AsciiArray(self.0), f)
  }
}

/// One chunk read out of a stream, with its CRC already checked.
#[derive(Clone, PartialEq, Eq)]
pub struct PngRawChunk {
  pub chunk_type: PngChunkType,
  pub data: Vec<u8>,
  pub crc: u32,
}
impl core::fmt::Debug for PngRawChunk {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngRawChunk")
      .field("chunk_type", &self.chunk_type)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("crc", &self.crc)
      .finish()
  }
}

/// The CRC a chunk should claim, computed over the type tag and then the data.
#[inline]
#[must_use]
pub fn png_chunk_crc(chunk_type: PngChunkType, data: &[u8]) -> u32 {
  crc32(data, crc32(&chunk_type.0, 0))
}

/// Reads the next chunk at the cursor.
///
/// Gives `Ok(None)` when the stream is already at its end.
///
/// ## Failure
/// * A chunk cut off by the end of the stream is a format error.
/// * A CRC mismatch is a format error.
/// * A length over `limits.max_chunk_len` is a limit error.
pub fn png_read_chunk(stream: &mut Stream<'_>, limits: &DecodeLimits) -> MediaResult<Option<PngRawChunk>> {
  if stream.remaining() == 0 {
    return Ok(None);
  }
  stream.set_byte_order(ByteOrder::Big);
  let len = stream.read_u32()?;
  limits.check_chunk_len(len)?;
  let chunk_type = PngChunkType(stream.read_array::<4>()?);
  let len = len as usize;
  // the data and the crc both have to be there before anything is allocated
  if stream.remaining() < len.saturating_add(4) {
    log::warn!("{chunk_type} chunk claims {len} bytes, only {} remain", stream.remaining());
    return Err(MediaError::eof("chunk data"));
  }
  let mut data = Vec::new();
  data.try_reserve_exact(len)?;
  data.resize(len, 0);
  stream.read_exact(&mut data)?;
  let crc = stream.read_u32()?;
  let actual = png_chunk_crc(chunk_type, &data);
  if crc != actual {
    log::warn!("CRC check failed for the {chunk_type} chunk: claimed {crc:08X}, actual {actual:08X}");
    return Err(MediaError::format(format!("CRC mismatch in the {chunk_type} chunk")));
  }
  Ok(Some(PngRawChunk { chunk_type, data, crc }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{ErrorKind, StreamFlags};

  #[test]
  fn test_chunk_type_bits() {
    assert!(PngChunkType::IHDR.is_critical());
    assert!(PngChunkType::IHDR.is_public());
    assert!(!PngChunkType::IHDR.is_safe_to_copy());
    assert!(!PngChunkType::tEXt.is_critical());
    assert!(PngChunkType::tEXt.is_safe_to_copy());
    assert!(!PngChunkType(*b"prVt").is_public());
    assert_eq!(format!("{:?}", PngChunkType::gAMA), "\"gAMA\"");
    assert_eq!(PngChunkType::iTXt.to_string(), "iTXt");
  }

  #[test]
  fn test_read_iend_chunk() {
    let bytes = [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82];
    let mut s = Stream::from_memory(&bytes, StreamFlags::READ).unwrap();
    let chunk = png_read_chunk(&mut s, &DecodeLimits::default()).unwrap().unwrap();
    assert_eq!(chunk.chunk_type, PngChunkType::IEND);
    assert!(chunk.data.is_empty());
    assert!(png_read_chunk(&mut s, &DecodeLimits::default()).unwrap().is_none());
  }

  #[test]
  fn test_read_chunk_failures() {
    let limits = DecodeLimits::default();
    let bad_crc = [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x83];
    let mut s = Stream::from_memory(&bad_crc, StreamFlags::READ).unwrap();
    assert_eq!(png_read_chunk(&mut s, &limits).unwrap_err().kind(), ErrorKind::Format);

    let short = [0, 0, 0, 9, b't', b'E', b'X', b't', 1, 2];
    let mut s = Stream::from_memory(&short, StreamFlags::READ).unwrap();
    assert_eq!(png_read_chunk(&mut s, &limits).unwrap_err().kind(), ErrorKind::Format);

    let huge = [0xFF, 0xFF, 0xFF, 0xFF, b'I', b'D', b'A', b'T'];
    let mut s = Stream::from_memory(&huge, StreamFlags::READ).unwrap();
    assert_eq!(png_read_chunk(&mut s, &limits).unwrap_err().kind(), ErrorKind::LimitExceeded);
    let mut s = Stream::from_memory(&huge, StreamFlags::READ).unwrap();
    assert_eq!(png_read_chunk(&mut s, &DecodeLimits::none()).unwrap_err().kind(), ErrorKind::Format);
  }
}
