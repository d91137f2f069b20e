use super::*;
use crate::{read_ascii_integer, skip_whitespace_and_comments, ChannelFormat, MediaError};

/// Reads a PPM of either format into `image`, using the default limits.
pub fn ppm_read(stream: &mut Stream<'_>, image: &mut ImageBuffer) -> MediaResult<()> {
  ppm_read_with_limits(stream, image, &DecodeLimits::default())
}

/// Reads a PPM of either format into `image`, picking the format from the tag.
pub fn ppm_read_with_limits(
  stream: &mut Stream<'_>, image: &mut ImageBuffer, limits: &DecodeLimits,
) -> MediaResult<()> {
  let header = PpmHeader::read(stream, limits)?;
  decode_body(stream, &header, image)
}

/// Reads an ascii `P3` PPM into `image`.
///
/// Samples are stored exactly as written, they are **not** rescaled to the
/// full range of the output type. A file with a max value of 100 gives `U8`
/// samples in `0..=100`.
///
/// ## Failure
/// * A file that isn't `P3` is a format error.
/// * A sample above the max value, or running out of samples, is a format
///   error.
pub fn ppm_read_p3(stream: &mut Stream<'_>, image: &mut ImageBuffer) -> MediaResult<()> {
  read_expecting(stream, image, PpmFormat::P3)
}

/// Reads a binary `P6` PPM into `image`.
///
/// Samples are linearly rescaled from `0..=max_value` to the full range of
/// the output type, rounding to nearest.
///
/// ## Failure
/// * A file that isn't `P6` is a format error.
/// * Running out of sample bytes is a format error.
pub fn ppm_read_p6(stream: &mut Stream<'_>, image: &mut ImageBuffer) -> MediaResult<()> {
  read_expecting(stream, image, PpmFormat::P6)
}

fn read_expecting(stream: &mut Stream<'_>, image: &mut ImageBuffer, format: PpmFormat) -> MediaResult<()> {
  let header = PpmHeader::read(stream, &DecodeLimits::default())?;
  if header.format != format {
    log::warn!("expected a {format} PPM, found {}", header.format);
    return Err(MediaError::format(format!("expected a {format} PPM, found {}", header.format)));
  }
  decode_body(stream, &header, image)
}

fn decode_body(stream: &mut Stream<'_>, header: &PpmHeader, image: &mut ImageBuffer) -> MediaResult<()> {
  check_body_size(stream, header)?;
  let mut decoded = ImageBuffer::new();
  decoded.allocate(header.width, header.height, ChannelFormat::Rgb, header.data_type(), 3)?;
  let result = match header.format {
    PpmFormat::P3 => decode_p3(stream, header, decoded.data_mut()),
    PpmFormat::P6 => decode_p6(stream, header, &mut decoded),
  };
  if let Err(e) = result {
    log::warn!("{} PPM body failed: {e}", header.format);
    return Err(e);
  }
  *image = decoded;
  Ok(())
}

/// The body must at least fit every sample: raw bytes for `P6`, one digit and
/// one separator per sample (minus the last separator) for `P3`.
fn check_body_size(stream: &Stream<'_>, header: &PpmHeader) -> MediaResult<()> {
  let samples = (header.width as usize)
    .checked_mul(header.height as usize)
    .and_then(|px| px.checked_mul(3));
  let needed = match header.format {
    PpmFormat::P3 => samples.and_then(|s| s.checked_mul(2)).map(|n| n - 1),
    PpmFormat::P6 => samples.and_then(|s| s.checked_mul(header.bytes_per_sample())),
  };
  match needed {
    Some(needed) if needed <= stream.remaining() => Ok(()),
    _ => {
      log::warn!(
        "{}x{} {} PPM needs {needed:?} body bytes, {} remain",
        header.width,
        header.height,
        header.format,
        stream.remaining()
      );
      Err(MediaError::format("PPM pixel data is truncated"))
    }
  }
}

fn decode_p3(stream: &mut Stream<'_>, header: &PpmHeader, out: &mut [u8]) -> MediaResult<()> {
  let sample_size = header.bytes_per_sample();
  for dst in out.chunks_exact_mut(sample_size) {
    if !skip_whitespace_and_comments(stream)? {
      return Err(MediaError::eof("P3 sample"));
    }
    let value = read_ascii_integer(stream)?;
    if value > u64::from(header.max_value) {
      return Err(MediaError::format(format!(
        "P3 sample {value} is above the max value {}",
        header.max_value
      )));
    }
    // max_value is at most 65535, so this can't truncate
    match sample_size {
      1 => dst[0] = value as u8,
      _ => dst.copy_from_slice(&(value as u16).to_ne_bytes()),
    }
  }
  Ok(())
}

fn decode_p6(stream: &mut Stream<'_>, header: &PpmHeader, image: &mut ImageBuffer) -> MediaResult<()> {
  let sample_size = header.bytes_per_sample();
  let max = u64::from(header.max_value);
  let out_max = if sample_size == 1 { 255_u64 } else { 65_535_u64 };
  let row_stride = image.row_stride();
  let mut line = Vec::new();
  line.try_reserve_exact(row_stride)?;
  line.resize(row_stride, 0);
  for row in image.data_mut().chunks_exact_mut(row_stride) {
    stream.read_exact(&mut line)?;
    for (dst, src) in row.chunks_exact_mut(sample_size).zip(line.chunks_exact(sample_size)) {
      let raw = match src {
        [v] => u64::from(*v),
        _ => u64::from(u16::from_be_bytes([src[0], src[1]])),
      };
      let value = (raw.min(max) * out_max + max / 2) / max;
      match sample_size {
        1 => dst[0] = value as u8,
        _ => dst.copy_from_slice(&(value as u16).to_ne_bytes()),
      }
    }
  }
  Ok(())
}
