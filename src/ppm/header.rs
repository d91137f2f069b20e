use super::*;
use crate::{read_ascii_integer, skip_whitespace_and_comments, DataType, MediaError};

/// The largest max value a PPM can declare.
pub const PPM_MAX_VALUE_LIMIT: u32 = 65_535;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PpmHeader {
  pub format: PpmFormat,
  pub width: u32,
  pub height: u32,
  /// Max value per channel entry, `1..=65535`.
  pub max_value: u32,
}

impl PpmHeader {
  /// Reads the header from the start of the stream.
  ///
  /// Afterwards the cursor is just past the single whitespace byte that ends
  /// the max value.
  ///
  /// ## Failure
  /// * An unknown tag, a missing number, a zero width or height, or a max
  ///   value outside of `1..=65535` is a format error.
  /// * Dimensions over the limits give a limit error.
  pub fn read(stream: &mut Stream<'_>, limits: &DecodeLimits) -> MediaResult<Self> {
    stream.set_cursor_position(0)?;
    let magic = stream.read_array::<2>()?;
    let format = PpmFormat::from_magic(magic).ok_or_else(|| {
      log::warn!("invalid PPM tag {:?}", crate::AsciiArray(magic));
      MediaError::format("invalid PPM tag")
    })?;
    let width = u32::try_from(header_number(stream, "width")?)?;
    let height = u32::try_from(header_number(stream, "height")?)?;
    let max_value = header_number(stream, "max value")?;
    if width == 0 || height == 0 {
      log::warn!("PPM dimensions {width}x{height}");
      return Err(MediaError::format(format!("invalid PPM dimensions {width}x{height}")));
    }
    let max_value = match u32::try_from(max_value) {
      Ok(m @ 1..=PPM_MAX_VALUE_LIMIT) => m,
      _ => {
        log::warn!("PPM max value {max_value}");
        return Err(MediaError::format(format!("PPM max value {max_value} is outside 1..=65535")));
      }
    };
    limits.check_dimensions(width, height)?;
    let header = Self { format, width, height, max_value };
    log::trace!("{header:?}");
    Ok(header)
  }

  /// `U8` for max values up to 255, `U16` above that.
  #[inline]
  #[must_use]
  pub const fn data_type(&self) -> DataType {
    if self.max_value > 255 {
      DataType::U16
    } else {
      DataType::U8
    }
  }

  /// Bytes per sample in `P6` data.
  #[inline]
  #[must_use]
  pub const fn bytes_per_sample(&self) -> usize {
    if self.max_value > 255 {
      2
    } else {
      1
    }
  }
}

fn header_number(stream: &mut Stream<'_>, what: &str) -> MediaResult<u64> {
  if !skip_whitespace_and_comments(stream)? {
    log::warn!("PPM header ended before the {what}");
    return Err(MediaError::eof(what));
  }
  read_ascii_integer(stream)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ErrorKind;

  fn parse(bytes: &[u8]) -> MediaResult<PpmHeader> {
    let mut s = Stream::from_memory(bytes, StreamFlags::READ).unwrap();
    PpmHeader::read(&mut s, &DecodeLimits::default())
  }

  #[test]
  fn test_header_with_comments() {
    let bytes = b"P6 # made by hand\n#another\n 3\t2 # eh\n65535\n\x0A\x0B";
    let mut s = Stream::from_memory(bytes, StreamFlags::READ).unwrap();
    let h = PpmHeader::read(&mut s, &DecodeLimits::default()).unwrap();
    assert_eq!(h, PpmHeader { format: PpmFormat::P6, width: 3, height: 2, max_value: 65535 });
    assert_eq!(h.data_type(), DataType::U16);
    // only one whitespace byte is eaten after the max value
    assert_eq!(s.remaining(), 2);
  }

  #[test]
  fn test_header_errors() {
    for bad in [
      &b"P5 1 1 255 "[..],
      b"P3 0 1 255 ",
      b"P3 1 1 0 ",
      b"P3 1 1 65536 ",
      b"P3 1 1",
      b"P3 1 x 255 ",
      b"P3 99999999999 1 255 ",
    ] {
      assert_eq!(parse(bad).unwrap_err().kind(), ErrorKind::Format, "{:?}", String::from_utf8_lossy(bad));
    }
    assert_eq!(parse(b"P3 70000 1 255 ").unwrap_err().kind(), ErrorKind::LimitExceeded);
  }
}
