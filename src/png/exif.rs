use crate::{MediaError, MediaResult};

/// `eXIf`: Exchangeable Image File (Exif) Profile
///
/// The format of this data is well outside of PNG, this only checks the byte
/// order mark at the start and gives back a copy.
pub fn png_parse_exif(data: &[u8]) -> MediaResult<Vec<u8>> {
  if !(data.starts_with(b"MM\0\x2A") || data.starts_with(b"II\x2A\0")) {
    return Err(MediaError::format("eXIf data doesn't start with a TIFF header"));
  }
  let mut exif = Vec::new();
  exif.try_reserve_exact(data.len())?;
  exif.extend_from_slice(data);
  Ok(exif)
}

#[test]
fn test_exif() {
  assert_eq!(png_parse_exif(b"II\x2A\0rest").unwrap(), b"II\x2A\0rest");
  assert!(png_parse_exif(b"MM\0\x2A").is_ok());
  assert!(png_parse_exif(b"XX\0\0").is_err());
}
