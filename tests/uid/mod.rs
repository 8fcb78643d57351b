use rastermeta::{
  bmp::Bmp,
  png::{ChunkType, Idat, Ihdr, Png, PngChunk},
  resolution::set_image_resolution,
  uid::{image_data_uid, image_uid},
  ContainerError,
};

fn png_with_idats(idats: &[&[u8]]) -> Vec<u8> {
  let mut png = Png::new();
  png.set_ihdr(Ihdr::new(2, 2, 8, 0, 0, 0, 0));
  for data in idats {
    png.push_chunk(PngChunk::from(Idat::new(data.to_vec())));
  }
  png.push_chunk(PngChunk::from_data(ChunkType::IEND, &[]));
  png.serialize().unwrap()
}

#[test]
fn test_png_data_uid_ignores_resolution() {
  let before = png_with_idats(&[&[0x78, 0x01, 9, 9]]);
  let after = set_image_resolution(&before, 300, 0).unwrap();
  assert_ne!(before, after);
  assert_ne!(image_uid(&before), image_uid(&after));
  assert_eq!(image_data_uid(&before), image_data_uid(&after));
  assert!(image_data_uid(&before).is_ok());
}

#[test]
fn test_png_data_uid_covers_all_idat_chunks() {
  let split = png_with_idats(&[&[0x78, 0x01], &[9, 9]]);
  let joined = png_with_idats(&[&[0x78, 0x01, 9, 9]]);
  let other = png_with_idats(&[&[0x78, 0x01, 9, 8]]);
  assert_eq!(image_data_uid(&split), image_data_uid(&joined));
  assert_ne!(image_data_uid(&split), image_data_uid(&other));
}

#[test]
fn test_bmp_data_uid_ignores_resolution() {
  let before = Bmp::new(1, 1, 32, vec![1, 2, 3, 4]).unwrap().serialize();
  let after = set_image_resolution(&before, 96, 72).unwrap();
  assert_eq!(before.len(), after.len());
  assert_ne!(image_uid(&before), image_uid(&after));
  assert_eq!(image_data_uid(&before), image_data_uid(&after));

  let repainted = Bmp::new(1, 1, 32, vec![1, 2, 3, 5]).unwrap().serialize();
  assert_ne!(image_data_uid(&before), image_data_uid(&repainted));
}

#[test]
fn test_bmp_data_uid_offset_past_end() {
  let mut bytes = Bmp::new(1, 1, 32, vec![1, 2, 3, 4]).unwrap().serialize();
  bytes[10..14].copy_from_slice(&1000_u32.to_le_bytes());
  assert_eq!(image_data_uid(&bytes), Err(ContainerError::InsufficientBytes));
}

#[test]
fn test_uid_display_is_uppercase_hex() {
  let text = image_uid(&[]).to_string();
  assert_eq!(text.len(), 64);
  assert!(text.starts_with("E3B0C442"));
  assert!(text.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
}
