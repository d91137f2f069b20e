use super::*;
use crate::ErrorKind;

fn chunk(ty: &[u8; 4], data: &[u8]) -> Vec<u8> {
  let ty = PngChunkType(*ty);
  let mut out = (data.len() as u32).to_be_bytes().to_vec();
  out.extend_from_slice(&ty.0);
  out.extend_from_slice(data);
  out.extend_from_slice(&png_chunk_crc(ty, data).to_be_bytes());
  out
}

fn ihdr(width: u32, height: u32, bit_depth: u8, color_type: u8) -> Vec<u8> {
  let mut data = width.to_be_bytes().to_vec();
  data.extend_from_slice(&height.to_be_bytes());
  data.extend_from_slice(&[bit_depth, color_type, 0, 0, 0]);
  chunk(b"IHDR", &data)
}

fn png(chunks: &[Vec<u8>]) -> Vec<u8> {
  let mut out = PNG_SIGNATURE.to_vec();
  for c in chunks {
    out.extend_from_slice(c);
  }
  out
}

fn err_kind(bytes: &[u8]) -> ErrorKind {
  png_read_from_memory(bytes).unwrap_err().kind()
}

#[test]
fn test_minimal_png() {
  let bytes = png(&[ihdr(2, 3, 8, 2), chunk(b"IDAT", &[1, 2]), chunk(b"IDAT", &[3]), chunk(b"IEND", &[])]);
  assert!(png_detect_from_memory(&bytes));
  let ctx = png_read_from_memory(&bytes).unwrap();
  let header = ctx.header.unwrap();
  assert_eq!((header.width, header.height), (2, 3));
  assert_eq!(header.color_type(), Some(PngColorType::Truecolor));
  assert_eq!(ctx.image_data, [1, 2, 3]);
  assert_eq!(ctx.chunk_count, 4);
  assert_eq!(ctx.gamma, 1.0);
}

#[test]
fn test_ancillary_chunks() {
  let bytes = png(&[
    ihdr(1, 1, 8, 3),
    chunk(b"gAMA", &45455_u32.to_be_bytes()),
    chunk(b"sRGB", &[0]),
    chunk(b"PLTE", &[255, 0, 0, 0, 255, 0]),
    chunk(b"tRNS", &[0]),
    chunk(b"tEXt", b"Title\0hello"),
    chunk(b"prIv", b"skipped"),
    chunk(b"tIME", &[0x07, 0xE8, 1, 2, 3, 4, 5]),
    chunk(b"IDAT", &[0]),
    chunk(b"iTXt", b"Comment\0\0\0en\0\0hi"),
    chunk(b"IEND", &[]),
  ]);
  let ctx = png_read_from_memory(&bytes).unwrap();
  assert!((ctx.gamma - 0.45455).abs() < 1e-6);
  assert_eq!(ctx.srgb_intent, Some(SrgbIntent::Perceptual));
  assert_eq!(ctx.palette.unwrap().entries, [[255, 0, 0], [0, 255, 0]]);
  assert_eq!(ctx.transparency, Some(PngTransparency::Alpha(vec![0])));
  assert_eq!(ctx.time.unwrap().year, 2024);
  assert_eq!(ctx.text_chunks.len(), 2);
  assert_eq!(ctx.text_chunks[0].keyword, "Title");
  assert_eq!(ctx.text_chunks[1].language, "en");
  assert_eq!(ctx.chunk_count, 11);
}

#[test]
fn test_signature_then_iend_fails() {
  let bytes = png(&[chunk(b"IEND", &[])]);
  assert_eq!(bytes.len(), 20);
  assert_eq!(err_kind(&bytes), ErrorKind::Format);
}

#[test]
fn test_bad_signature_and_missing_iend() {
  let mut bytes = png(&[ihdr(1, 1, 8, 0), chunk(b"IDAT", &[0]), chunk(b"IEND", &[])]);
  assert_eq!(err_kind(&bytes[..bytes.len() - 12]), ErrorKind::Format);
  bytes[1] = b'p';
  assert!(!png_detect_from_memory(&bytes));
  assert_eq!(err_kind(&bytes), ErrorKind::Format);
}

#[test]
fn test_any_corrupted_payload_byte_fails() {
  let bytes = png(&[
    ihdr(4, 4, 8, 6),
    chunk(b"tEXt", b"Software\0imgstream"),
    chunk(b"IDAT", &[9; 10]),
    chunk(b"IEND", &[]),
  ]);
  png_read_from_memory(&bytes).unwrap();
  // every payload byte of IHDR, tEXt, and IDAT
  let payloads = [(16, 13), (8 + 25 + 8, 18), (8 + 25 + 30 + 8, 10)];
  for (start, len) in payloads {
    for i in start..start + len {
      let mut corrupt = bytes.clone();
      corrupt[i] ^= 0x01;
      assert_eq!(err_kind(&corrupt), ErrorKind::Format, "byte {i}");
    }
  }
}

#[test]
fn test_ordering_rules() {
  let end = || chunk(b"IEND", &[]);
  let idat = || chunk(b"IDAT", &[0]);
  let cases: Vec<Vec<Vec<u8>>> = vec![
    // IHDR not first
    vec![chunk(b"gAMA", &[0, 0, 0, 1]), ihdr(1, 1, 8, 2), idat(), end()],
    // two IHDR
    vec![ihdr(1, 1, 8, 2), ihdr(1, 1, 8, 2), idat(), end()],
    // no IDAT
    vec![ihdr(1, 1, 8, 2), end()],
    // split IDAT run
    vec![ihdr(1, 1, 8, 2), idat(), chunk(b"tEXt", b"a\0b"), idat(), end()],
    // PLTE after IDAT
    vec![ihdr(1, 1, 8, 2), idat(), chunk(b"PLTE", &[0; 3]), end()],
    // PLTE in grayscale
    vec![ihdr(1, 1, 8, 0), chunk(b"PLTE", &[0; 3]), idat(), end()],
    // two PLTE
    vec![ihdr(1, 1, 8, 2), chunk(b"PLTE", &[0; 3]), chunk(b"PLTE", &[0; 3]), idat(), end()],
    // two gAMA
    vec![ihdr(1, 1, 8, 2), chunk(b"gAMA", &[0, 0, 0, 1]), chunk(b"gAMA", &[0, 0, 0, 1]), idat(), end()],
    // invalid header
    vec![ihdr(1, 1, 3, 2), idat(), end()],
  ];
  for (i, chunks) in cases.iter().enumerate() {
    assert_eq!(err_kind(&png(chunks)), ErrorKind::Format, "case {i}");
  }
}

#[test]
fn test_text_capacity() {
  let mut chunks = vec![ihdr(1, 1, 8, 0)];
  chunks.extend((0..PNG_TEXT_CHUNK_CAPACITY).map(|_| chunk(b"tEXt", b"k\0v")));
  chunks.push(chunk(b"IDAT", &[0]));
  chunks.push(chunk(b"IEND", &[]));
  assert_eq!(png_read_from_memory(&png(&chunks)).unwrap().text_chunks.len(), 256);
  // iTXt chunks have a capacity of their own
  let itxt = || chunk(b"iTXt", b"k\0\0\0\0\0v");
  chunks.insert(1, itxt());
  assert_eq!(png_read_from_memory(&png(&chunks)).unwrap().text_chunks.len(), 257);
  chunks.insert(1, chunk(b"tEXt", b"k\0v"));
  assert_eq!(err_kind(&png(&chunks)), ErrorKind::Format);

  let mut chunks = vec![ihdr(1, 1, 8, 0)];
  chunks.extend((0..PNG_TEXT_CHUNK_CAPACITY).map(|_| itxt()));
  chunks.push(chunk(b"tEXt", b"k\0v"));
  chunks.push(chunk(b"IDAT", &[0]));
  chunks.push(chunk(b"IEND", &[]));
  assert_eq!(png_read_from_memory(&png(&chunks)).unwrap().text_chunks.len(), 257);
  chunks.insert(1, itxt());
  assert_eq!(err_kind(&png(&chunks)), ErrorKind::Format);
}

#[test]
fn test_limits() {
  let bytes = png(&[ihdr(100_000, 1, 8, 2), chunk(b"IDAT", &[0]), chunk(b"IEND", &[])]);
  assert_eq!(err_kind(&bytes), ErrorKind::LimitExceeded);
  assert!(png_read_from_memory_with_limits(&bytes, &DecodeLimits::none()).is_ok());
}
