#![forbid(unsafe_code)]

//! A cursor over a file or a block of memory.
//!
//! Every codec in this crate reads from and writes to a [`Stream`]. A stream
//! has a source (a file or some bytes), a total size, a cursor, and a set of
//! [`StreamFlags`] that say what you're allowed to do with it.
//!
//! The byte-level operations ([`read`](Stream::read), [`peek`](Stream::peek),
//! [`write`](Stream::write)) report how many bytes actually moved, and a short
//! read at the end of the source isn't an error. The typed operations
//! ([`read_u32`](Stream::read_u32) and friends) need the whole value, so a
//! short read there is an error.
//!
//! A stream goes one way. Reading needs `READ` alone, writing needs `WRITE`
//! or `APPEND` without `READ`.
//!
//! ## Byte Order
//!
//! Typed values are moved in host byte order unless reversal is turned on with
//! [`set_require_reverse`](Stream::set_require_reverse) (or more conveniently
//! with [`set_byte_order`](Stream::set_byte_order)). Reversal only applies to
//! values no wider than [`reverse_max_width`](Stream::reverse_max_width) bytes.
//!
//! ```
//! use imgstream::{ByteOrder, Stream, StreamFlags};
//! let mut buf = [0_u8; 4];
//! let mut s = Stream::from_memory_mut(&mut buf, StreamFlags::WRITE).unwrap();
//! s.set_byte_order(ByteOrder::Big);
//! s.write_u32(0x0102_0304).unwrap();
//! drop(s);
//! assert_eq!(buf, [1, 2, 3, 4]);
//! ```

use crate::{MediaError, MediaResult};
use bytemuck::Pod;
use std::{
  fs::{File, OpenOptions},
  io::{Read, Seek, SeekFrom, Write},
  path::Path,
};

/// What a [`Stream`] is allowed to do.
///
/// Combine flags with `|`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct StreamFlags(u8);
impl StreamFlags {
  /// No access at all. Opening a stream with this is an error.
  pub const NONE: Self = Self(0);
  /// The stream can be read and peeked.
  pub const READ: Self = Self(1 << 0);
  /// The stream can be written at the cursor.
  pub const WRITE: Self = Self(1 << 1);
  /// The stream can be written at its end.
  pub const APPEND: Self = Self(1 << 2);

  /// If all bits of `other` are also set in `self`.
  #[inline]
  #[must_use]
  pub const fn contains(self, other: Self) -> bool {
    (self.0 & other.0) == other.0
  }
  /// If any bit of `other` is also set in `self`.
  #[inline]
  #[must_use]
  pub const fn intersects(self, other: Self) -> bool {
    (self.0 & other.0) != 0
  }
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }
  #[inline]
  #[must_use]
  const fn can_write(self) -> bool {
    self.intersects(Self(Self::WRITE.0 | Self::APPEND.0))
  }
  /// `READ` and nothing that writes.
  #[inline]
  #[must_use]
  const fn is_read_only(self) -> bool {
    self.contains(Self::READ) && !self.can_write()
  }
  /// `WRITE` or `APPEND`, without `READ`.
  #[inline]
  #[must_use]
  const fn is_write_only(self) -> bool {
    self.can_write() && !self.contains(Self::READ)
  }
}
impl core::ops::BitOr for StreamFlags {
  type Output = Self;
  #[inline]
  #[must_use]
  fn bitor(self, rhs: Self) -> Self {
    Self(self.0 | rhs.0)
  }
}
impl core::ops::BitOrAssign for StreamFlags {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    self.0 |= rhs.0;
  }
}
impl core::fmt::Debug for StreamFlags {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    let names = [(Self::READ, "READ"), (Self::WRITE, "WRITE"), (Self::APPEND, "APPEND")];
    let mut first = true;
    for (flag, name) in names {
      if self.contains(flag) {
        if !first {
          f.write_str(" | ")?;
        }
        f.write_str(name)?;
        first = false;
      }
    }
    if first {
      f.write_str("NONE")?;
    }
    Ok(())
  }
}

/// The byte order of some multi-byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ByteOrder {
  Little,
  Big,
}
impl ByteOrder {
  /// The byte order of the machine running this code.
  #[cfg(target_endian = "little")]
  pub const NATIVE: Self = Self::Little;
  /// The byte order of the machine running this code.
  #[cfg(target_endian = "big")]
  pub const NATIVE: Self = Self::Big;
}

/// Where a stream's bytes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
  /// Not initialized, or already destroyed.
  Empty,
  File,
  Memory,
}

enum FileSource<'a> {
  Owned(File),
  Borrowed(&'a mut File),
}
impl FileSource<'_> {
  #[inline]
  fn get(&mut self) -> &mut File {
    match self {
      Self::Owned(f) => f,
      Self::Borrowed(f) => f,
    }
  }
}

enum MemorySource<'a> {
  Borrowed(&'a [u8]),
  BorrowedMut(&'a mut [u8]),
  Owned(Vec<u8>),
}
impl MemorySource<'_> {
  #[inline]
  fn bytes(&self) -> &[u8] {
    match self {
      Self::Borrowed(b) => b,
      Self::BorrowedMut(b) => b,
      Self::Owned(v) => v,
    }
  }
}

#[derive(Default)]
enum Source<'a> {
  #[default]
  Empty,
  File(FileSource<'a>),
  Memory(MemorySource<'a>),
}

/// Values up to this many bytes wide are eligible for byte order reversal
/// unless configured otherwise.
pub const DEFAULT_REVERSE_MAX_WIDTH: usize = 8;

/// A readable or writable byte source with a cursor.
///
/// A stream either owns its source (it was opened from a path, given an owned
/// [`File`], or given a `Vec<u8>`) or borrows it. Dropping or
/// [`destroy`](Stream::destroy)ing an owning stream closes the file or frees
/// the memory. A borrowing stream just lets go of the borrow.
pub struct Stream<'a> {
  source: Source<'a>,
  size: usize,
  cursor: usize,
  flags: StreamFlags,
  require_reverse: bool,
  reverse_max_width: usize,
}

impl Default for Stream<'_> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl core::fmt::Debug for Stream<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Stream")
      .field("source_kind", &self.source_kind())
      .field("is_owner", &self.is_owner())
      .field("size", &self.size)
      .field("cursor", &self.cursor)
      .field("flags", &self.flags)
      .field("require_reverse", &self.require_reverse)
      .field("reverse_max_width", &self.reverse_max_width)
      .finish()
  }
}

impl Stream<'static> {
  /// Opens the file at `path`.
  ///
  /// The open mode comes from the flags:
  /// * `APPEND`: read and append, creating the file if needed.
  /// * `READ | WRITE`: opens an existing file without truncating it. The
  ///   stream itself still can't [`read`](Self::read) or
  ///   [`write`](Self::write), those each need exactly one direction.
  /// * `WRITE`: read and write, creating or truncating the file.
  /// * `READ`: read only.
  ///
  /// The size is measured by seeking to the end, then the cursor is put back
  /// at 0.
  pub fn from_file(path: impl AsRef<Path>, flags: StreamFlags) -> MediaResult<Self> {
    let path = path.as_ref();
    let mut options = OpenOptions::new();
    if flags.contains(StreamFlags::APPEND) {
      options.read(true).append(true).create(true);
    } else if flags.contains(StreamFlags::READ | StreamFlags::WRITE) {
      options.read(true).write(true);
    } else if flags.contains(StreamFlags::WRITE) {
      options.read(true).write(true).create(true).truncate(true);
    } else if flags.contains(StreamFlags::READ) {
      options.read(true);
    } else {
      return Err(MediaError::invalid("a stream needs at least one access flag"));
    }
    let file = options.open(path).map_err(|e| {
      log::warn!("couldn't open `{}`: {e}", path.display());
      e
    })?;
    log::debug!("opened `{}` with {flags:?}", path.display());
    Self::from_file_source(FileSource::Owned(file), flags)
  }

  /// Wraps an open file, taking ownership of it.
  #[inline]
  pub fn from_file_handle(file: File, flags: StreamFlags) -> MediaResult<Self> {
    Self::from_file_source(FileSource::Owned(file), flags)
  }

  /// Wraps an owned block of memory.
  ///
  /// With `APPEND`, writes go to the end of the buffer and grow it.
  #[inline]
  pub fn from_vec(bytes: Vec<u8>, flags: StreamFlags) -> MediaResult<Self> {
    Self::from_memory_source(MemorySource::Owned(bytes), flags)
  }

  /// Network sources aren't implemented, so this always fails.
  #[inline]
  pub fn from_network(address: &str, flags: StreamFlags) -> MediaResult<Self> {
    log::warn!("network streams are not supported (`{address}`, {flags:?})");
    Err(MediaError::unsupported("network streams are not supported"))
  }
}

impl<'a> Stream<'a> {
  /// An empty stream. Every operation on it fails until it's replaced by an
  /// initialized one.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self {
      source: Source::Empty,
      size: 0,
      cursor: 0,
      flags: StreamFlags::NONE,
      require_reverse: false,
      reverse_max_width: DEFAULT_REVERSE_MAX_WIDTH,
    }
  }

  /// Wraps a file you keep ownership of.
  #[inline]
  pub fn from_file_ref(file: &'a mut File, flags: StreamFlags) -> MediaResult<Self> {
    Self::from_file_source(FileSource::Borrowed(file), flags)
  }

  /// Wraps bytes that can only be read.
  #[inline]
  pub fn from_memory(bytes: &'a [u8], flags: StreamFlags) -> MediaResult<Self> {
    if flags.can_write() {
      return Err(MediaError::invalid("a shared byte slice can't be written to"));
    }
    Self::from_memory_source(MemorySource::Borrowed(bytes), flags)
  }

  /// Wraps bytes that can be read or overwritten.
  ///
  /// The slice is never grown, a write past its end is an error.
  #[inline]
  pub fn from_memory_mut(bytes: &'a mut [u8], flags: StreamFlags) -> MediaResult<Self> {
    Self::from_memory_source(MemorySource::BorrowedMut(bytes), flags)
  }

  fn from_file_source(mut source: FileSource<'a>, flags: StreamFlags) -> MediaResult<Self> {
    if flags.is_empty() {
      return Err(MediaError::invalid("a stream needs at least one access flag"));
    }
    let file = source.get();
    let size = usize::try_from(file.seek(SeekFrom::End(0))?)?;
    file.seek(SeekFrom::Start(0))?;
    Ok(Self { source: Source::File(source), size, flags, ..Self::new() })
  }

  fn from_memory_source(source: MemorySource<'a>, flags: StreamFlags) -> MediaResult<Self> {
    if flags.is_empty() {
      return Err(MediaError::invalid("a stream needs at least one access flag"));
    }
    let size = source.bytes().len();
    Ok(Self { source: Source::Memory(source), size, flags, ..Self::new() })
  }

  /// Releases the source and resets to the empty state.
  ///
  /// Owned files are closed and owned memory is freed. Destroying an empty
  /// stream does nothing.
  #[inline]
  pub fn destroy(&mut self) {
    if self.is_initialized() {
      log::trace!("destroying {self:?}");
    }
    *self = Self::new();
  }

  /// Takes the bytes out of an owned memory stream, leaving it empty.
  ///
  /// Returns `None` (and leaves the stream alone) for any other kind of source.
  #[inline]
  pub fn into_memory(&mut self) -> Option<Vec<u8>> {
    match core::mem::take(&mut self.source) {
      Source::Memory(MemorySource::Owned(v)) => {
        *self = Self::new();
        Some(v)
      }
      other => {
        self.source = other;
        None
      }
    }
  }

  /// The bytes of a memory stream.
  #[inline]
  #[must_use]
  pub fn memory(&self) -> Option<&[u8]> {
    match &self.source {
      Source::Memory(m) => Some(m.bytes()),
      _ => None,
    }
  }

  #[inline]
  #[must_use]
  pub fn source_kind(&self) -> SourceKind {
    match self.source {
      Source::Empty => SourceKind::Empty,
      Source::File(_) => SourceKind::File,
      Source::Memory(_) => SourceKind::Memory,
    }
  }

  /// If destroying this stream also releases its source.
  #[inline]
  #[must_use]
  pub fn is_owner(&self) -> bool {
    matches!(self.source, Source::File(FileSource::Owned(_)) | Source::Memory(MemorySource::Owned(_)))
  }

  #[inline]
  #[must_use]
  pub fn is_initialized(&self) -> bool {
    !matches!(self.source, Source::Empty)
  }

  #[inline]
  #[must_use]
  pub const fn flags(&self) -> StreamFlags {
    self.flags
  }

  #[inline]
  #[must_use]
  pub const fn cursor_position(&self) -> usize {
    self.cursor
  }

  #[inline]
  #[must_use]
  pub const fn source_size(&self) -> usize {
    self.size
  }

  /// Bytes between the cursor and the end of the source.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> usize {
    self.size.saturating_sub(self.cursor)
  }

  /// Moves the cursor, clamping `pos` to the source size.
  pub fn set_cursor_position(&mut self, pos: usize) -> MediaResult<()> {
    let pos = pos.min(self.size);
    match &mut self.source {
      Source::Empty => return Err(not_initialized()),
      Source::File(f) => {
        f.get().seek(SeekFrom::Start(pos as u64))?;
      }
      Source::Memory(_) => (),
    }
    self.cursor = pos;
    Ok(())
  }

  /// Reads up to `buf.len()` bytes, returning how many were read.
  ///
  /// Reaching the end of the source gives a short count, not an error.
  ///
  /// ## Failure
  /// * A stream without `READ`, or with `WRITE` or `APPEND` too, is an
  ///   invalid argument.
  pub fn read(&mut self, buf: &mut [u8]) -> MediaResult<usize> {
    if !self.flags.is_read_only() {
      return Err(MediaError::invalid(format!("can't read a stream opened with {:?}", self.flags)));
    }
    let count = match &mut self.source {
      Source::Empty => return Err(not_initialized()),
      Source::File(f) => read_until_full(f.get(), buf)?,
      Source::Memory(m) => {
        let bytes = m.bytes();
        let start = self.cursor.min(bytes.len());
        let count = buf.len().min(bytes.len() - start);
        buf[..count].copy_from_slice(&bytes[start..start + count]);
        count
      }
    };
    self.cursor += count;
    Ok(count)
  }

  /// Reads into `buf` and then puts the cursor back where it was.
  pub fn peek(&mut self, buf: &mut [u8]) -> MediaResult<usize> {
    let count = self.read(buf)?;
    self.set_cursor_position(self.cursor.saturating_sub(count))?;
    Ok(count)
  }

  /// Writes all of `buf`, returning the byte count.
  ///
  /// Memory streams never write past their size, unless the stream owns a
  /// `Vec` and was opened with `APPEND`, in which case it grows.
  ///
  /// ## Failure
  /// * A stream without `WRITE` or `APPEND`, or with `READ` too, is an
  ///   invalid argument.
  pub fn write(&mut self, buf: &[u8]) -> MediaResult<usize> {
    if !self.flags.is_write_only() {
      return Err(MediaError::invalid(format!("can't write a stream opened with {:?}", self.flags)));
    }
    let append = self.flags.contains(StreamFlags::APPEND);
    match &mut self.source {
      Source::Empty => return Err(not_initialized()),
      Source::File(f) => {
        let file = f.get();
        file.write_all(buf)?;
        self.cursor = usize::try_from(file.stream_position()?)?;
        self.size = self.size.max(self.cursor);
      }
      Source::Memory(MemorySource::Owned(v)) if append => {
        v.try_reserve(buf.len())?;
        v.extend_from_slice(buf);
        self.size = v.len();
        self.cursor = v.len();
      }
      Source::Memory(m) => {
        if append {
          self.cursor = self.size;
        }
        let bytes: &mut [u8] = match m {
          MemorySource::BorrowedMut(b) => &mut **b,
          MemorySource::Owned(v) => v.as_mut_slice(),
          MemorySource::Borrowed(_) => {
            return Err(MediaError::invalid("a shared byte slice can't be written to"))
          }
        };
        let end = self.cursor.checked_add(buf.len()).filter(|&end| end <= bytes.len());
        let Some(end) = end else {
          return Err(MediaError::Bounds {
            cursor: self.cursor,
            requested: buf.len(),
            capacity: bytes.len(),
          });
        };
        bytes[self.cursor..end].copy_from_slice(buf);
        self.cursor = end;
      }
    }
    Ok(buf.len())
  }

  /// Flushes a file source. Memory sources have nothing to flush.
  #[inline]
  pub fn flush(&mut self) -> MediaResult<()> {
    if let Source::File(f) = &mut self.source {
      f.get().flush()?;
    }
    Ok(())
  }

  /// Sets if typed values get their bytes reversed.
  #[inline]
  pub fn set_require_reverse(&mut self, require_reverse: bool) {
    self.require_reverse = require_reverse;
  }

  #[inline]
  #[must_use]
  pub const fn require_reverse(&self) -> bool {
    self.require_reverse
  }

  /// Typed values wider than this many bytes are never reversed.
  #[inline]
  pub fn set_reverse_max_width(&mut self, width: usize) {
    self.reverse_max_width = width;
  }

  #[inline]
  #[must_use]
  pub const fn reverse_max_width(&self) -> usize {
    self.reverse_max_width
  }

  /// Turns reversal on exactly when `order` isn't the host's byte order.
  #[inline]
  pub fn set_byte_order(&mut self, order: ByteOrder) {
    self.require_reverse = order != ByteOrder::NATIVE;
  }

  #[inline]
  fn fix_order(&self, bytes: &mut [u8]) {
    if self.require_reverse && bytes.len() <= self.reverse_max_width {
      bytes.reverse();
    }
  }

  /// Reads one plain-data value, reversing it if required.
  pub fn read_value<T: Pod>(&mut self) -> MediaResult<T> {
    let mut value = T::zeroed();
    let bytes = bytemuck::bytes_of_mut(&mut value);
    if self.read(bytes)? != bytes.len() {
      return Err(MediaError::eof(core::any::type_name::<T>()));
    }
    self.fix_order(bytes);
    Ok(value)
  }

  /// Like [`read_value`](Self::read_value), but the cursor doesn't move.
  pub fn peek_value<T: Pod>(&mut self) -> MediaResult<T> {
    let mut value = T::zeroed();
    let bytes = bytemuck::bytes_of_mut(&mut value);
    if self.peek(bytes)? != bytes.len() {
      return Err(MediaError::eof(core::any::type_name::<T>()));
    }
    self.fix_order(bytes);
    Ok(value)
  }

  /// Writes one plain-data value, reversing it if required.
  pub fn write_value<T: Pod>(&mut self, mut value: T) -> MediaResult<()> {
    let bytes = bytemuck::bytes_of_mut(&mut value);
    self.fix_order(bytes);
    let written = self.write(bytes)?;
    if written != bytes.len() {
      return Err(MediaError::Io(std::io::ErrorKind::WriteZero.into()));
    }
    Ok(())
  }

  /// Reads exactly `N` bytes. Never reversed.
  pub fn read_array<const N: usize>(&mut self) -> MediaResult<[u8; N]> {
    let mut a = [0; N];
    if self.read(&mut a)? != N {
      return Err(MediaError::eof("byte array"));
    }
    Ok(a)
  }

  /// Peeks exactly `N` bytes. Never reversed.
  pub fn peek_array<const N: usize>(&mut self) -> MediaResult<[u8; N]> {
    let mut a = [0; N];
    if self.peek(&mut a)? != N {
      return Err(MediaError::eof("byte array"));
    }
    Ok(a)
  }

  /// Reads exactly `buf.len()` bytes. Never reversed.
  pub fn read_exact(&mut self, buf: &mut [u8]) -> MediaResult<()> {
    if self.read(buf)? != buf.len() {
      return Err(MediaError::eof("byte block"));
    }
    Ok(())
  }
}

macro_rules! typed_stream_ops {
  ($($t:ty => $read:ident, $peek:ident, $write:ident;)*) => {
    impl Stream<'_> {
      $(
        #[doc = concat!("Reads a `", stringify!($t), "`.")]
        #[inline]
        pub fn $read(&mut self) -> MediaResult<$t> {
          self.read_value::<$t>()
        }
        #[doc = concat!("Peeks a `", stringify!($t), "`.")]
        #[inline]
        pub fn $peek(&mut self) -> MediaResult<$t> {
          self.peek_value::<$t>()
        }
        #[doc = concat!("Writes a `", stringify!($t), "`.")]
        #[inline]
        pub fn $write(&mut self, value: $t) -> MediaResult<()> {
          self.write_value::<$t>(value)
        }
      )*
    }
  };
}
typed_stream_ops! {
  u8 => read_u8, peek_u8, write_u8;
  i8 => read_i8, peek_i8, write_i8;
  u16 => read_u16, peek_u16, write_u16;
  i16 => read_i16, peek_i16, write_i16;
  u32 => read_u32, peek_u32, write_u32;
  i32 => read_i32, peek_i32, write_i32;
  u64 => read_u64, peek_u64, write_u64;
  i64 => read_i64, peek_i64, write_i64;
  f32 => read_f32, peek_f32, write_f32;
  f64 => read_f64, peek_f64, write_f64;
}

#[inline]
fn not_initialized() -> MediaError {
  MediaError::invalid("stream is not initialized")
}

fn read_until_full(file: &mut File, mut buf: &mut [u8]) -> MediaResult<usize> {
  let mut total = 0;
  while !buf.is_empty() {
    match file.read(buf) {
      Ok(0) => break,
      Ok(n) => {
        total += n;
        buf = &mut buf[n..];
      }
      Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
      Err(e) => return Err(e.into()),
    }
  }
  Ok(total)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ErrorKind;

  #[test]
  fn test_memory_read_clamps() {
    let data = [1_u8, 2, 3];
    let mut s = Stream::from_memory(&data, StreamFlags::READ).unwrap();
    let mut buf = [0; 5];
    assert_eq!(s.read(&mut buf).unwrap(), 3);
    assert_eq!(&buf[..3], &data);
    assert_eq!(s.read(&mut buf).unwrap(), 0);
    assert_eq!(s.cursor_position(), 3);
  }

  #[test]
  fn test_memory_write_bounds() {
    let mut data = [0_u8; 3];
    let mut s = Stream::from_memory_mut(&mut data, StreamFlags::WRITE).unwrap();
    assert_eq!(s.write(&[9, 9]).unwrap(), 2);
    let err = s.write(&[9, 9]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Bounds);
    assert_eq!(s.cursor_position(), 2);
  }

  #[test]
  fn test_flags_are_enforced() {
    let data = [0_u8; 4];
    let mut s = Stream::from_memory(&data, StreamFlags::READ).unwrap();
    assert_eq!(s.write(&[1]).unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(
      Stream::from_memory(&data, StreamFlags::WRITE).unwrap_err().kind(),
      ErrorKind::InvalidArgument
    );
    assert!(Stream::from_memory(&data, StreamFlags::NONE).is_err());
    let mut out = [0_u8; 4];
    let mut w = Stream::from_memory_mut(&mut out, StreamFlags::WRITE).unwrap();
    assert_eq!(w.read(&mut [0; 1]).unwrap_err().kind(), ErrorKind::InvalidArgument);
  }

  #[test]
  fn test_read_and_write_are_exclusive() {
    let mut out = [1_u8, 2, 3, 4];
    let mut s = Stream::from_memory_mut(&mut out, StreamFlags::READ | StreamFlags::WRITE).unwrap();
    assert_eq!(s.read(&mut [0; 2]).unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(s.peek(&mut [0; 2]).unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(s.write(&[9]).unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(s.cursor_position(), 0);
    let mut s = Stream::from_vec(vec![1, 2], StreamFlags::READ | StreamFlags::APPEND).unwrap();
    assert_eq!(s.read_u8().unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(s.write_u8(3).unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(s.into_memory().unwrap(), vec![1, 2]);
  }

  #[test]
  fn test_append_grows_owned_vec() {
    let mut s = Stream::from_vec(vec![1, 2], StreamFlags::APPEND).unwrap();
    assert!(s.is_owner());
    s.write(&[3, 4]).unwrap();
    assert_eq!(s.source_size(), 4);
    assert_eq!(s.into_memory().unwrap(), vec![1, 2, 3, 4]);
    assert_eq!(s.source_kind(), SourceKind::Empty);
  }

  #[test]
  fn test_set_cursor_clamps() {
    let data = [0_u8; 10];
    let mut s = Stream::from_memory(&data, StreamFlags::READ).unwrap();
    s.set_cursor_position(100).unwrap();
    assert_eq!(s.cursor_position(), 10);
    assert_eq!(s.remaining(), 0);
  }

  #[test]
  fn test_destroy_is_idempotent() {
    let data = [0_u8; 10];
    let mut s = Stream::from_memory(&data, StreamFlags::READ).unwrap();
    assert!(!s.is_owner());
    s.destroy();
    assert!(!s.is_initialized());
    s.destroy();
    assert_eq!(s.source_size(), 0);
    assert_eq!(s.read(&mut [0; 1]).unwrap_err().kind(), ErrorKind::InvalidArgument);
  }

  #[test]
  fn test_reverse_max_width() {
    let mut out = [0_u8; 10];
    let mut s = Stream::from_memory_mut(&mut out, StreamFlags::WRITE).unwrap();
    s.set_require_reverse(true);
    s.set_reverse_max_width(2);
    s.write_u16(0x0102).unwrap();
    s.write_u64(0x0102_0304_0506_0708).unwrap();
    drop(s);
    assert_eq!(&out[..2], &0x0201_u16.to_ne_bytes());
    assert_eq!(&out[2..], &0x0102_0304_0506_0708_u64.to_ne_bytes());
  }

  #[test]
  fn test_short_typed_read_is_format_error() {
    let data = [0_u8; 3];
    let mut s = Stream::from_memory(&data, StreamFlags::READ).unwrap();
    assert_eq!(s.read_u32().unwrap_err().kind(), ErrorKind::Format);
  }

  #[test]
  fn test_network_is_unsupported() {
    let err = Stream::from_network("example.com:80", StreamFlags::READ).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
  }
}
