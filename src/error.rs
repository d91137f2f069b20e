use core::{
  num::{ParseIntError, TryFromIntError},
  str::Utf8Error,
};
use std::collections::TryReserveError;

/// The broad category of a [`MediaError`].
///
/// Use this when you want to branch on *what kind* of thing went wrong without
/// caring about the exact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
  /// The caller broke an API contract (bad flags, out of bounds coordinates,
  /// wrong image layout for an encoder, and so on).
  InvalidArgument,
  /// The operating system reported an I/O failure.
  Io,
  /// The data isn't structurally valid for the format being parsed.
  Format,
  /// The data is valid but uses a feature this crate doesn't handle.
  Unsupported,
  /// A write to a memory stream would go past the provided capacity.
  Bounds,
  /// The allocator couldn't give us enough space.
  Alloc,
  /// A [`DecodeLimits`](crate::DecodeLimits) cap was hit.
  LimitExceeded,
}

/// An error from the `imgstream` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MediaError {
  /// See [`ErrorKind::InvalidArgument`].
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  /// See [`ErrorKind::Io`].
  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  /// See [`ErrorKind::Format`].
  #[error("format error: {0}")]
  Format(String),

  /// See [`ErrorKind::Unsupported`].
  #[error("unsupported: {0}")]
  Unsupported(String),

  /// See [`ErrorKind::Bounds`].
  #[error("write of {requested} bytes at offset {cursor} exceeds capacity {capacity}")]
  Bounds { cursor: usize, requested: usize, capacity: usize },

  /// See [`ErrorKind::Alloc`].
  #[error("allocation failed: {0}")]
  Alloc(#[from] TryReserveError),

  /// See [`ErrorKind::LimitExceeded`].
  #[error("limit exceeded: {0}")]
  LimitExceeded(String),
}

impl MediaError {
  /// The category of this error.
  #[inline]
  #[must_use]
  pub const fn kind(&self) -> ErrorKind {
    match self {
      Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
      Self::Io(_) => ErrorKind::Io,
      Self::Format(_) => ErrorKind::Format,
      Self::Unsupported(_) => ErrorKind::Unsupported,
      Self::Bounds { .. } => ErrorKind::Bounds,
      Self::Alloc(_) => ErrorKind::Alloc,
      Self::LimitExceeded(_) => ErrorKind::LimitExceeded,
    }
  }

  #[inline]
  pub(crate) fn invalid(msg: impl Into<String>) -> Self {
    Self::InvalidArgument(msg.into())
  }

  #[inline]
  pub(crate) fn format(msg: impl Into<String>) -> Self {
    Self::Format(msg.into())
  }

  #[inline]
  pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
    Self::Unsupported(msg.into())
  }

  #[inline]
  pub(crate) fn eof(what: &str) -> Self {
    Self::Format(format!("unexpected end of stream while reading {what}"))
  }
}

impl From<Utf8Error> for MediaError {
  #[inline]
  fn from(e: Utf8Error) -> Self {
    Self::Format(e.to_string())
  }
}
impl From<ParseIntError> for MediaError {
  #[inline]
  fn from(e: ParseIntError) -> Self {
    Self::Format(e.to_string())
  }
}
impl From<TryFromIntError> for MediaError {
  #[inline]
  fn from(e: TryFromIntError) -> Self {
    Self::Format(e.to_string())
  }
}

/// Shorthand for results using [`MediaError`].
pub type MediaResult<T> = Result<T, MediaError>;
