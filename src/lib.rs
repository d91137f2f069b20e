#![cfg_attr(docs_rs, feature(doc_cfg))]
#![forbid(unsafe_code)]

//! A crate for moving image data between files, memory, and a common image
//! buffer.
//!
//! * [`Stream`] is a cursor over a file or a block of memory, with optional
//!   byte order reversal for typed values.
//! * [`ImageBuffer`] holds decoded pixels, along with conversions between
//!   channel layouts and data types.
//! * The codecs each read and write through a stream:
//!   * [`bmp`]: Windows Bitmap, read and write.
//!   * [`ppm`]: Netpbm `P3` and `P6` pixmaps, read and write.
//!   * [`png`]: PNG, structure only. Chunks are parsed and checked but pixels
//!     are never decoded.
//! * [`read_image`] and [`detect_format`] pick the codec for you.
//!
//! Each codec is behind a cargo feature of the same name, all on by default.
//!
//! Nothing here installs a logger, messages go through the [`log`] facade.

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod crc32;
pub use crc32::*;

mod int_endian;
pub use int_endian::*;

mod ascii_array;
pub use ascii_array::*;

pub mod ascii;
pub use ascii::*;

pub mod stream;
pub use stream::*;

pub mod image;
pub use image::*;

mod transforms;

mod limits;
pub use limits::*;

mod format;
pub use format::*;

#[cfg(feature = "bmp")]
#[cfg_attr(docs_rs, doc(cfg(feature = "bmp")))]
pub mod bmp;

#[cfg(feature = "ppm")]
#[cfg_attr(docs_rs, doc(cfg(feature = "ppm")))]
pub mod ppm;

#[cfg(feature = "png")]
#[cfg_attr(docs_rs, doc(cfg(feature = "png")))]
pub mod png;

/// Used by various image formats that support sRGB colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
// Note: This doesn't have direct impls to parse to and from bytes because
// each format uses different bytes to mean each of these options.
pub enum SrgbIntent {
  /// for images preferring good adaptation to the output device gamut at the
  /// expense of colorimetric accuracy, such as photographs.
  Perceptual,
  /// for images requiring colour appearance matching (relative to the output
  /// device white point), such as logos.
  RelativeColorimetric,
  /// for images preferring preservation of saturation at the expense of hue and
  /// lightness, such as charts and graphs.
  Saturation,
  /// for images requiring preservation of absolute colorimetry, such as
  /// previews of images destined for a different output device (proofs).
  AbsoluteColorimetric,
}
