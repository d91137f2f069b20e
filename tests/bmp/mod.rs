use imgstream::{bmp::*, ChannelFormat, DataType, ErrorKind, ImageBuffer};

#[test]
fn test_bmps_do_not_panic_decoder() {
  super::init_logger();
  // iter ALL files in the test folder, even non-bmp files shouldn't panic it.
  for (path, v) in super::test_folder_files() {
    println!("{}", path.display());
    let mut image = ImageBuffer::new();
    // Most of these files aren't bitmaps so they naturally fail to parse.
    // However, the library shouldn't panic even with a hostile file.
    let _ = bmp_read_from_memory(&v, &mut image);
  }
  for _ in 0..10 {
    let mut v = super::rand_bytes(1024);
    v[..2].copy_from_slice(b"BM");
    let mut image = ImageBuffer::new();
    let _ = bmp_read_from_memory(&v, &mut image);
  }
}

#[test]
fn test_hostile_headers_do_not_allocate() {
  // a valid header claiming a 10000x10000 image with no pixel data behind it
  let mut v = vec![0_u8; 54];
  v[..2].copy_from_slice(b"BM");
  v[10] = 54;
  v[14] = 40;
  v[18..22].copy_from_slice(&10_000_i32.to_le_bytes());
  v[22..26].copy_from_slice(&10_000_i32.to_le_bytes());
  v[26] = 1;
  v[28] = 24;
  let mut image = ImageBuffer::new();
  assert_eq!(bmp_read_from_memory(&v, &mut image).unwrap_err().kind(), ErrorKind::Format);
  assert!(!image.is_allocated());
}

#[test]
fn test_bmp_file_round_trip() {
  super::init_logger();
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("white.bmp");

  let mut white = ImageBuffer::new();
  white.allocate(2, 2, ChannelFormat::Bgr, DataType::U8, 3).unwrap();
  white.data_mut().fill(0xFF);
  bmp_write_to_file(&white, &path).unwrap();
  assert!(bmp_detect_from_file(&path).unwrap());
  assert_eq!(std::fs::metadata(&path).unwrap().len(), 70);

  let mut back = ImageBuffer::new();
  bmp_read_from_file(&path, &mut back).unwrap();
  assert_eq!((back.width(), back.height()), (2, 2));
  assert_eq!(back.data(), &[0xFF; 12]);
}

#[test]
fn test_random_bgr_round_trip() {
  let (width, height) = (7, 5);
  let mut image = ImageBuffer::new();
  image.allocate(width, height, ChannelFormat::Bgr, DataType::U8, 3).unwrap();
  let rand = super::rand_bytes(image.data_size());
  image.data_mut().copy_from_slice(&rand);

  let bytes = bmp_write_to_vec(&image).unwrap();
  let ctx_len = 54 + 24 * height as usize;
  assert_eq!(bytes.len(), ctx_len);

  let mut back = ImageBuffer::new();
  bmp_read_from_memory(&bytes, &mut back).unwrap();
  back.change_channel_format(ChannelFormat::Bgr).unwrap();
  assert_eq!(back.data(), image.data());
}
