use imgstream::{png::*, ErrorKind, ImageBuffer};

fn chunk(ty: &[u8; 4], data: &[u8]) -> Vec<u8> {
  let mut out = (data.len() as u32).to_be_bytes().to_vec();
  out.extend_from_slice(ty);
  out.extend_from_slice(data);
  out.extend_from_slice(&png_chunk_crc(PngChunkType(*ty), data).to_be_bytes());
  out
}

#[test]
fn test_png_read_no_panics() {
  super::init_logger();
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for (path, v) in super::test_folder_files() {
    println!("{}", path.display());
    let _ = png_read_from_memory(&v);
  }
  // even totally random data should never panic the reader!
  for _ in 0..10 {
    let mut v = super::rand_bytes(1024);
    v[..8].copy_from_slice(&PNG_SIGNATURE);
    let _ = png_read_from_memory(&v);
  }
}

#[test]
fn test_signature_and_iend_only() {
  let mut v = PNG_SIGNATURE.to_vec();
  v.extend_from_slice(&[0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]);
  assert_eq!(png_read_from_memory(&v).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn test_png_file_is_parsed_but_not_decoded() {
  let mut v = PNG_SIGNATURE.to_vec();
  v.extend(chunk(b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, 8, 0, 0, 0, 0]));
  v.extend(chunk(b"IDAT", &[0x78, 0x9C, 0x63, 0x60, 0x00, 0x00, 0x00, 0x02, 0x00, 0x01]));
  v.extend(chunk(b"IEND", &[]));

  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("gray.png");
  std::fs::write(&path, &v).unwrap();
  assert!(png_detect_from_file(&path).unwrap());
  let ctx = png_read_from_file(&path).unwrap();
  assert_eq!(ctx.image_data.len(), 10);

  let mut image = ImageBuffer::new();
  let err = imgstream::read_image_from_file(&path, &mut image).unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Unsupported);
  assert!(!image.is_allocated());
}
