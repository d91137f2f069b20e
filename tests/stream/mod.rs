use imgstream::*;
use std::io::Write;

#[test]
fn test_crc32_variants_agree() {
  for len in [0, 1, 3, 4, 5, 63, 64, 1000] {
    let data = super::rand_bytes(len);
    let expected = crc32_bitwise(&data, 0);
    assert_eq!(crc32_half_byte(&data, 0), expected);
    assert_eq!(crc32_one_byte(&data, 0), expected);
    assert_eq!(crc32_four_byte(&data, 0), expected);
    let (a, b) = data.split_at(len / 3);
    assert_eq!(crc32(b, crc32(a, 0)), expected);
  }
}

#[test]
fn test_scalar_round_trips() {
  for reverse in [false, true] {
    let mut w = Stream::from_vec(Vec::new(), StreamFlags::APPEND).unwrap();
    w.set_require_reverse(reverse);
    w.write_u8(0xAB).unwrap();
    w.write_i16(-2).unwrap();
    w.write_u32(0x0102_0304).unwrap();
    w.write_i64(-5_000_000_000).unwrap();
    w.write_f32(1.5).unwrap();
    w.write_f64(-0.25).unwrap();
    let raw = w.into_memory().unwrap();
    let mut s = Stream::from_memory(&raw, StreamFlags::READ).unwrap();
    s.set_require_reverse(reverse);
    assert_eq!(s.read_u8().unwrap(), 0xAB);
    assert_eq!(s.read_i16().unwrap(), -2);
    assert_eq!(s.read_u32().unwrap(), 0x0102_0304);
    assert_eq!(s.read_i64().unwrap(), -5_000_000_000);
    assert_eq!(s.read_f32().unwrap(), 1.5);
    assert_eq!(s.read_f64().unwrap(), -0.25);
    assert_eq!(s.remaining(), 0);
    let stored = &raw[3..7];
    let native = 0x0102_0304_u32.to_ne_bytes();
    if reverse {
      assert_eq!(stored, &[native[3], native[2], native[1], native[0]]);
    } else {
      assert_eq!(stored, &native);
    }
  }
}

#[test]
fn test_peek_idempotence() {
  let data = super::rand_bytes(32);
  let mut s = Stream::from_memory(&data, StreamFlags::READ).unwrap();
  s.set_cursor_position(5).unwrap();
  let mut a = [0; 8];
  let mut b = [0; 8];
  let mut c = [0; 8];
  assert_eq!(s.peek(&mut a).unwrap(), 8);
  assert_eq!(s.peek(&mut b).unwrap(), 8);
  assert_eq!(s.cursor_position(), 5);
  assert_eq!(s.read(&mut c).unwrap(), 8);
  assert_eq!(a, b);
  assert_eq!(a, c);
  assert_eq!(&a, &data[5..13]);
  assert_eq!(s.cursor_position(), 13);
}

#[test]
fn test_file_stream() {
  super::init_logger();
  let mut file = tempfile::tempfile().unwrap();
  file.write_all(&[1, 2, 3, 4, 5]).unwrap();
  {
    let mut s = Stream::from_file_ref(&mut file, StreamFlags::READ).unwrap();
    assert_eq!(s.source_kind(), SourceKind::File);
    assert!(!s.is_owner());
    assert_eq!(s.source_size(), 5);
    s.set_byte_order(ByteOrder::Big);
    assert_eq!(s.read_u16().unwrap(), 0x0102);
    assert_eq!(s.write_u8(9).unwrap_err().kind(), ErrorKind::InvalidArgument);
  }
  {
    let mut s = Stream::from_file_ref(&mut file, StreamFlags::WRITE).unwrap();
    s.set_cursor_position(2).unwrap();
    s.write_u8(9).unwrap();
    assert_eq!(s.read_u8().unwrap_err().kind(), ErrorKind::InvalidArgument);
    s.flush().unwrap();
  }
  // a file opened both ways can do neither
  let mut both = Stream::from_file_ref(&mut file, StreamFlags::READ | StreamFlags::WRITE).unwrap();
  assert_eq!(both.read_u8().unwrap_err().kind(), ErrorKind::InvalidArgument);
  assert_eq!(both.write_u8(0).unwrap_err().kind(), ErrorKind::InvalidArgument);
  drop(both);
  let mut s = Stream::from_file_ref(&mut file, StreamFlags::READ).unwrap();
  let mut all = [0; 8];
  assert_eq!(s.read(&mut all).unwrap(), 5);
  assert_eq!(&all[..5], &[1, 2, 9, 4, 5]);
  // reads past the end are short, not errors
  assert_eq!(s.read(&mut all).unwrap(), 0);
  assert_eq!(s.read_u8().unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn test_file_append_stream() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("log.bin");
  {
    let mut s = Stream::from_file(&path, StreamFlags::APPEND).unwrap();
    assert!(s.is_owner());
    s.write(b"abc").unwrap();
    s.flush().unwrap();
  }
  let mut s = Stream::from_file(&path, StreamFlags::APPEND).unwrap();
  assert_eq!(s.source_size(), 3);
  s.write(b"de").unwrap();
  s.flush().unwrap();
  assert_eq!(s.source_size(), 5);
  drop(s);
  assert_eq!(std::fs::read(&path).unwrap(), b"abcde");
  let missing = dir.path().join("missing.bin");
  assert_eq!(Stream::from_file(&missing, StreamFlags::READ).unwrap_err().kind(), ErrorKind::Io);
}

#[test]
fn test_image_copy_and_transforms() {
  let mut src = ImageBuffer::new();
  src.allocate(3, 2, ChannelFormat::Rgb, DataType::U8, 3).unwrap();
  src.data_mut().copy_from_slice(&super::rand_bytes(18));
  let mut dest = ImageBuffer::new();
  dest.copy_from(&src).unwrap();
  for y in 0..2 {
    for x in 0..3 {
      for c in 0..3 {
        assert_eq!(dest.get_pixel_value(x, y, c).unwrap(), src.get_pixel_value(x, y, c).unwrap());
      }
    }
  }
  dest.change_data_type(DataType::U16).unwrap();
  dest.change_channel_format(ChannelFormat::Rgba).unwrap();
  assert_eq!(dest.data_size(), 3 * 2 * 4 * 2);
  assert_eq!(dest.get_pixel_value(2, 1, 3).unwrap(), 1.0);
  dest.change_channel_format(ChannelFormat::Rgb).unwrap();
  dest.change_data_type(DataType::U8).unwrap();
  assert_eq!(dest.data(), src.data());
}
