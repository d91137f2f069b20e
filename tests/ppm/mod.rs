use imgstream::{ppm::*, ChannelFormat, DataType, ErrorKind, ImageBuffer};

#[test]
fn test_ppms_do_not_panic_decoder() {
  super::init_logger();
  for (path, v) in super::test_folder_files() {
    println!("{}", path.display());
    let mut image = ImageBuffer::new();
    let _ = ppm_read_from_memory(&v, &mut image);
  }
  for tag in [b"P3", b"P6"] {
    for _ in 0..10 {
      let mut v = super::rand_bytes(512);
      v[..2].copy_from_slice(tag);
      let mut image = ImageBuffer::new();
      let _ = ppm_read_from_memory(&v, &mut image);
    }
  }
}

#[test]
fn test_p3_scenario() {
  let mut image = ImageBuffer::new();
  ppm_read_from_memory(b"P3\n2 1\n255\n255 0 0 0 255 0\n", &mut image).unwrap();
  assert_eq!((image.width(), image.height()), (2, 1));
  assert_eq!(image.get_pixel_value(0, 0, 0).unwrap(), 1.0);
  assert_eq!(image.get_pixel_value(0, 0, 1).unwrap(), 0.0);
  assert_eq!(image.get_pixel_value(1, 0, 1).unwrap(), 1.0);
  assert_eq!(image.get_pixel_value(1, 0, 2).unwrap(), 0.0);
}

#[test]
fn test_ppm_file_round_trips() {
  super::init_logger();
  let dir = tempfile::tempdir().unwrap();
  let mut image = ImageBuffer::new();
  image.allocate(6, 4, ChannelFormat::Rgb, DataType::U8, 3).unwrap();
  let rand = super::rand_bytes(image.data_size());
  image.data_mut().copy_from_slice(&rand);

  for format in [PpmFormat::P3, PpmFormat::P6] {
    let path = dir.path().join(format!("out.{format}.ppm"));
    ppm_write_to_file(&image, format, &path).unwrap();
    assert_eq!(ppm_detect_from_file(&path).unwrap(), Some(format));
    let mut back = ImageBuffer::new();
    ppm_read_from_file(&path, &mut back).unwrap();
    assert_eq!(back.data(), image.data(), "{format}");
  }
}

#[test]
fn test_write_into_too_small_buffer() {
  let mut image = ImageBuffer::new();
  image.allocate(4, 4, ChannelFormat::Rgb, DataType::U8, 3).unwrap();
  let mut buffer = [0_u8; 16];
  let err = ppm_write_to_memory(&image, PpmFormat::P6, &mut buffer).unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Bounds);
}
