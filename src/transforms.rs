#![forbid(unsafe_code)]

//! In-place conversions of an [`ImageBuffer`].

use crate::{ChannelFormat, DataType, ImageBuffer, MediaError, MediaResult};

/// How each output pixel is built from an input pixel, by channel index.
#[derive(Debug, Clone, Copy)]
enum ChannelMap {
  /// Swap the first and third channels, keep any others.
  SwapRedBlue,
  /// Copy the first three channels and add an opaque alpha channel.
  AddAlpha,
  /// Copy the first three channels.
  DropAlpha,
}

fn channel_map(from: ChannelFormat, to: ChannelFormat) -> Option<ChannelMap> {
  use ChannelFormat::*;
  Some(match (from, to) {
    (Rgb, Bgr) | (Bgr, Rgb) | (Rgba, Bgra) | (Bgra, Rgba) => ChannelMap::SwapRedBlue,
    (Rgb, Rgba) | (Bgr, Bgra) => ChannelMap::AddAlpha,
    (Rgba, Rgb) | (Bgra, Bgr) => ChannelMap::DropAlpha,
    _ => return None,
  })
}

impl ImageBuffer {
  /// Rearranges the channels of every pixel.
  ///
  /// Supported conversions: RGB and BGR into each other, RGBA and BGRA into
  /// each other, adding alpha (RGB to RGBA, BGR to BGRA, alpha is fully
  /// opaque), and dropping alpha (the reverse). Converting to the current
  /// format does nothing.
  ///
  /// ## Failure
  /// * Any other pair of formats is [`Unsupported`](crate::ErrorKind::Unsupported)
  ///   and leaves the image as it was.
  pub fn change_channel_format(&mut self, new_format: ChannelFormat) -> MediaResult<()> {
    if self.channel_format() == new_format {
      return Ok(());
    }
    let map = channel_map(self.channel_format(), new_format).ok_or_else(|| {
      log::warn!("can't convert channel format {} to {new_format}", self.channel_format());
      MediaError::unsupported(format!(
        "channel format conversion {} to {new_format}",
        self.channel_format()
      ))
    })?;
    if usize::from(self.num_channels()) != usize::from(self.channel_format().channel_count()) {
      return Err(MediaError::invalid(format!(
        "image has {} channels but claims to be {}",
        self.num_channels(),
        self.channel_format()
      )));
    }
    let mut out = ImageBuffer::new();
    out.allocate(self.width(), self.height(), new_format, self.data_type(), new_format.channel_count())?;
    let cs = self.bytes_per_channel();
    let src_px = self.bytes_per_pixel();
    let dst_px = out.bytes_per_pixel();
    let alpha: Vec<u8> = opaque_alpha_bytes(self.data_type());
    for (src, dst) in self.data().chunks_exact(src_px).zip(out.data_mut().chunks_exact_mut(dst_px)) {
      match map {
        ChannelMap::SwapRedBlue => {
          dst.copy_from_slice(src);
          dst[..cs].copy_from_slice(&src[2 * cs..3 * cs]);
          dst[2 * cs..3 * cs].copy_from_slice(&src[..cs]);
        }
        ChannelMap::AddAlpha => {
          dst[..3 * cs].copy_from_slice(src);
          dst[3 * cs..].copy_from_slice(&alpha);
        }
        ChannelMap::DropAlpha => dst.copy_from_slice(&src[..3 * cs]),
      }
    }
    self.copy_from(&out)
  }

  /// Converts every channel value to another data type, going through the
  /// normalized value of [`get_pixel_value`](Self::get_pixel_value).
  pub fn change_data_type(&mut self, new_type: DataType) -> MediaResult<()> {
    if self.data_type() == new_type {
      return Ok(());
    }
    let mut out = ImageBuffer::new();
    out.allocate(self.width(), self.height(), self.channel_format(), new_type, self.num_channels())?;
    for y in 0..self.height() {
      for x in 0..self.width() {
        for c in 0..self.num_channels() {
          out.set_pixel_value(x, y, c, self.get_pixel_value(x, y, c)?)?;
        }
      }
    }
    self.copy_from(&out)
  }

  /// Mirrors the image left to right.
  pub fn flip_horizontal(&mut self) {
    let px = self.bytes_per_pixel();
    let stride = self.row_stride();
    if px == 0 || stride == 0 {
      return;
    }
    for row in self.data_mut().chunks_exact_mut(stride) {
      let width = row.len() / px;
      for x in 0..width / 2 {
        let (left, right) = row.split_at_mut((width - 1 - x) * px);
        left[x * px..(x + 1) * px].swap_with_slice(&mut right[..px]);
      }
    }
  }

  /// Mirrors the image top to bottom.
  pub fn flip_vertical(&mut self) {
    let stride = self.row_stride();
    if stride == 0 {
      return;
    }
    let mut data: &mut [u8] = self.data_mut();
    while data.len() >= 2 * stride {
      let (low, mid) = data.split_at_mut(stride);
      let (mid, high) = mid.split_at_mut(mid.len() - stride);
      low.swap_with_slice(high);
      data = mid;
    }
  }
}

/// One channel value of "fully opaque" in host byte order.
fn opaque_alpha_bytes(data_type: DataType) -> Vec<u8> {
  match data_type {
    DataType::F32 => 1.0_f32.to_ne_bytes().to_vec(),
    DataType::F64 => 1.0_f64.to_ne_bytes().to_vec(),
    other => vec![0xFF; other.size()],
  }
}
