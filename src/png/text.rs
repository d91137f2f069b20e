use super::*;
use crate::MediaError;

/// How many `iTXt` chunks a [`PngContext`] keeps, and separately how many
/// `tEXt` chunks.
pub const PNG_TEXT_CHUNK_CAPACITY: usize = 256;

/// `tEXt` or `iTXt`: Textual data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PngTextChunk {
  /// 1 to 79 bytes of Latin-1.
  pub keyword: String,
  /// The text. `None` for a compressed `iTXt`, which is never inflated.
  pub text: Option<String>,
  /// Empty for `tEXt`.
  pub language: String,
  /// The keyword translated into `language`. Empty for `tEXt`.
  pub translated_keyword: String,
  /// If this came from an `iTXt` chunk.
  pub is_international: bool,
}
impl PngTextChunk {
  /// Parses a `tEXt` payload: keyword, a NUL, then Latin-1 text.
  pub fn parse_text(data: &[u8]) -> MediaResult<Self> {
    let (keyword, text) = split_keyword(data, "tEXt")?;
    Ok(Self { keyword, text: Some(latin1(text)), ..Self::default() })
  }

  /// Parses an `iTXt` payload.
  ///
  /// The layout is: keyword, NUL, compression flag, compression method,
  /// language tag, NUL, translated keyword, NUL, then UTF-8 text.
  ///
  /// ## Failure
  /// * Missing NUL separators, a bad keyword, or invalid UTF-8 are format
  ///   errors.
  /// * A compression flag other than 0 or 1, or a compressed text with a
  ///   method other than 0, are format errors.
  pub fn parse_international(data: &[u8]) -> MediaResult<Self> {
    let (keyword, rest) = split_keyword(data, "iTXt")?;
    let (compressed, rest) = match rest {
      [0, _, rest @ ..] => (false, rest),
      [1, 0, rest @ ..] => (true, rest),
      _ => return Err(MediaError::format("iTXt has an invalid compression flag or method")),
    };
    let (language, rest) = split_nul(rest, "iTXt language")?;
    let (translated_keyword, text) = split_nul(rest, "iTXt translated keyword")?;
    Ok(Self {
      keyword,
      text: if compressed { None } else { Some(core::str::from_utf8(text)?.to_string()) },
      language: core::str::from_utf8(language)?.to_string(),
      translated_keyword: core::str::from_utf8(translated_keyword)?.to_string(),
      is_international: true,
    })
  }
}

/// Splits off a NUL terminated keyword of 1 to 79 bytes.
pub(crate) fn split_keyword<'b>(data: &'b [u8], chunk: &str) -> MediaResult<(String, &'b [u8])> {
  let (keyword, rest) = split_nul(data, chunk)?;
  if !(1..=79).contains(&keyword.len()) {
    return Err(MediaError::format(format!("{chunk} keyword is {} bytes", keyword.len())));
  }
  Ok((latin1(keyword), rest))
}

fn split_nul<'b>(data: &'b [u8], what: &str) -> MediaResult<(&'b [u8], &'b [u8])> {
  let i = data
    .iter()
    .position(|&b| b == 0)
    .ok_or_else(|| MediaError::format(format!("{what} has no NUL separator")))?;
  Ok((&data[..i], &data[i + 1..]))
}

#[inline]
fn latin1(bytes: &[u8]) -> String {
  bytes.iter().copied().map(char::from).collect()
}
