use super::*;
use crate::{ChannelFormat, DataType, MediaError};

/// The comment line put after the tag of `P3` output.
pub const PPM_CREATOR_COMMENT: &str = "# Created by imgstream";

/// Writes `image` as a PPM of the given format, from the start of the stream.
pub fn ppm_write(image: &ImageBuffer, format: PpmFormat, stream: &mut Stream<'_>) -> MediaResult<()> {
  match format {
    PpmFormat::P3 => ppm_write_p3(image, stream),
    PpmFormat::P6 => ppm_write_p6(image, stream),
  }
}

/// Writes `image` as an ascii `P3` PPM.
///
/// The max value is 255 for `U8` images and 65535 for `U16` images. Each
/// pixel is written as `r g b ` with a newline after each row.
///
/// ## Failure
/// * The image must be 3 channel RGB with `U8` or `U16` samples.
pub fn ppm_write_p3(image: &ImageBuffer, stream: &mut Stream<'_>) -> MediaResult<()> {
  let max_value = check_writable(image)?;
  stream.set_cursor_position(0)?;
  let header = format!(
    "P3\n{PPM_CREATOR_COMMENT}\n{} {}\n{max_value}\n",
    image.width(),
    image.height()
  );
  stream.write(header.as_bytes())?;
  let mut line = String::new();
  for row in image.data().chunks_exact(image.row_stride()) {
    line.clear();
    for pixel in row.chunks_exact(image.bytes_per_pixel()) {
      for sample in pixel.chunks_exact(image.bytes_per_channel()) {
        line.push_str(&sample_value(sample).to_string());
        line.push(' ');
      }
    }
    line.push('\n');
    stream.write(line.as_bytes())?;
  }
  Ok(())
}

/// Writes `image` as a binary `P6` PPM.
///
/// `U16` samples go out big-endian with a max value of 65535.
///
/// ## Failure
/// * The image must be 3 channel RGB with `U8` or `U16` samples.
pub fn ppm_write_p6(image: &ImageBuffer, stream: &mut Stream<'_>) -> MediaResult<()> {
  let max_value = check_writable(image)?;
  stream.set_cursor_position(0)?;
  let header = format!("P6\n{} {}\n{max_value}\n", image.width(), image.height());
  stream.write(header.as_bytes())?;
  match image.data_type() {
    DataType::U16 => {
      let mut line = Vec::new();
      line.try_reserve_exact(image.row_stride())?;
      for row in image.data().chunks_exact(image.row_stride()) {
        line.clear();
        line.extend(row.chunks_exact(2).flat_map(|s| bytemuck::pod_read_unaligned::<u16>(s).to_be_bytes()));
        stream.write(&line)?;
      }
    }
    _ => {
      stream.write(image.data())?;
    }
  }
  Ok(())
}

/// Writes `image` as a PPM file, replacing anything already at `path`.
pub fn ppm_write_to_file(image: &ImageBuffer, format: PpmFormat, path: impl AsRef<Path>) -> MediaResult<()> {
  let mut stream = Stream::from_file(path, StreamFlags::WRITE)?;
  ppm_write(image, format, &mut stream)?;
  stream.flush()
}

/// Writes `image` as a PPM into `buffer`, giving the number of bytes written.
///
/// ## Failure
/// * A buffer too small for the whole file is a bounds error.
pub fn ppm_write_to_memory(image: &ImageBuffer, format: PpmFormat, buffer: &mut [u8]) -> MediaResult<usize> {
  let mut stream = Stream::from_memory_mut(buffer, StreamFlags::WRITE)?;
  ppm_write(image, format, &mut stream)?;
  Ok(stream.cursor_position())
}

/// Writes `image` as a PPM into a new `Vec`.
pub fn ppm_write_to_vec(image: &ImageBuffer, format: PpmFormat) -> MediaResult<Vec<u8>> {
  let mut stream = Stream::from_vec(Vec::new(), StreamFlags::APPEND)?;
  ppm_write(image, format, &mut stream)?;
  Ok(stream.into_memory().unwrap_or_default())
}

/// Gives the max value to write for the image.
fn check_writable(image: &ImageBuffer) -> MediaResult<u32> {
  let max_value = match image.data_type() {
    DataType::U8 => 255,
    DataType::U16 => 65_535,
    other => {
      return Err(MediaError::invalid(format!("PPM output needs U8 or U16 samples, got {other}")))
    }
  };
  if image.channel_format() != ChannelFormat::Rgb || image.num_channels() != 3 {
    return Err(MediaError::invalid(format!(
      "PPM output needs a 3 channel RGB image, got {} with {} channels",
      image.channel_format(),
      image.num_channels()
    )));
  }
  Ok(max_value)
}

#[inline]
fn sample_value(sample: &[u8]) -> u16 {
  match sample {
    [v] => u16::from(*v),
    _ => bytemuck::pod_read_unaligned(sample),
  }
}
