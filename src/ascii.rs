#![forbid(unsafe_code)]

//! Helpers for formats with ascii text headers.

use crate::{MediaError, MediaResult, Stream};

/// Longest decimal token that [`read_ascii_integer`] accepts.
pub const MAX_ASCII_INTEGER_LEN: usize = 63;

/// If the byte separates ascii tokens.
///
/// That's space, `\t`, `\n`, `\r`, form feed, vertical tab, and also NUL.
#[inline]
#[must_use]
pub const fn is_ascii_whitespace_byte(b: u8) -> bool {
  matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C | 0x0B | 0)
}

/// Reads one decimal integer token.
///
/// Bytes are consumed up to and including the first whitespace byte (or the
/// end of the stream), so the cursor ends up just past the separator.
///
/// ## Failure
/// * An empty token, a token with a non-digit in it, or a token longer than
///   [`MAX_ASCII_INTEGER_LEN`] is a format error.
/// * A value that overflows `u64` is a format error.
pub fn read_ascii_integer(stream: &mut Stream<'_>) -> MediaResult<u64> {
  let mut token = [0_u8; MAX_ASCII_INTEGER_LEN + 1];
  let mut len = 0;
  loop {
    let mut b = [0_u8; 1];
    if stream.read(&mut b)? == 0 || is_ascii_whitespace_byte(b[0]) {
      break;
    }
    if len == MAX_ASCII_INTEGER_LEN {
      return Err(MediaError::format("ascii integer token is too long"));
    }
    token[len] = b[0];
    len += 1;
  }
  let token = &token[..len];
  if token.is_empty() {
    return Err(MediaError::eof("ascii integer"));
  }
  if !token.iter().all(u8::is_ascii_digit) {
    return Err(MediaError::format(format!(
      "expected a decimal integer, found {:?}",
      String::from_utf8_lossy(token)
    )));
  }
  Ok(core::str::from_utf8(token)?.parse::<u64>()?)
}

/// Skips whitespace and `#` line comments.
///
/// Afterwards the cursor is on the first byte that's neither. Returns `false`
/// if the stream ran out first.
pub fn skip_whitespace_and_comments(stream: &mut Stream<'_>) -> MediaResult<bool> {
  let mut in_comment = false;
  loop {
    let mut b = [0_u8; 1];
    if stream.peek(&mut b)? == 0 {
      return Ok(false);
    }
    match (in_comment, b[0]) {
      (false, b'#') => in_comment = true,
      (false, x) if is_ascii_whitespace_byte(x) => (),
      (false, _) => return Ok(true),
      (true, b'\n') | (true, b'\r') => in_comment = false,
      (true, _) => (),
    }
    stream.set_cursor_position(stream.cursor_position() + 1)?;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{ErrorKind, StreamFlags};

  #[test]
  fn test_read_ascii_integer() {
    let mut s = Stream::from_memory(b"123 45\n6", StreamFlags::READ).unwrap();
    assert_eq!(read_ascii_integer(&mut s).unwrap(), 123);
    assert_eq!(s.cursor_position(), 4);
    assert_eq!(read_ascii_integer(&mut s).unwrap(), 45);
    assert_eq!(read_ascii_integer(&mut s).unwrap(), 6);
    assert_eq!(read_ascii_integer(&mut s).unwrap_err().kind(), ErrorKind::Format);
  }

  #[test]
  fn test_read_ascii_integer_rejects_junk() {
    let mut s = Stream::from_memory(b"12a ", StreamFlags::READ).unwrap();
    assert_eq!(read_ascii_integer(&mut s).unwrap_err().kind(), ErrorKind::Format);
    let long = [b'1'; 70];
    let mut s = Stream::from_memory(&long, StreamFlags::READ).unwrap();
    assert_eq!(read_ascii_integer(&mut s).unwrap_err().kind(), ErrorKind::Format);
  }

  #[test]
  fn test_skip_whitespace_and_comments() {
    let mut s = Stream::from_memory(b" \t# hello 12\n\n# x\r 7", StreamFlags::READ).unwrap();
    assert!(skip_whitespace_and_comments(&mut s).unwrap());
    assert_eq!(read_ascii_integer(&mut s).unwrap(), 7);
    let mut s = Stream::from_memory(b"   # only a comment", StreamFlags::READ).unwrap();
    assert!(!skip_whitespace_and_comments(&mut s).unwrap());
  }

  #[test]
  fn test_whitespace_set() {
    for b in [b' ', b'\t', b'\n', b'\r', 0x0B, 0x0C, 0] {
      assert!(is_ascii_whitespace_byte(b));
    }
    assert!(!is_ascii_whitespace_byte(b'#'));
    assert!(!is_ascii_whitespace_byte(b'0'));
  }
}
