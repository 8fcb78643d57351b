use rastermeta::{png::*, ContainerError, Resolution};

fn push_chunk_bytes(out: &mut Vec<u8>, ty: &[u8; 4], data: &[u8]) {
  out.extend_from_slice(&(data.len() as u32).to_be_bytes());
  out.extend_from_slice(ty);
  out.extend_from_slice(data);
  out.extend_from_slice(&chunk_crc(ChunkType(*ty), data).to_be_bytes());
}

/// 1x1, 8-bit greyscale, then `IEND`.
fn scenario_a() -> Vec<u8> {
  let mut v = PNG_SIGNATURE.to_vec();
  push_chunk_bytes(&mut v, b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, 8, 0, 0, 0, 0]);
  push_chunk_bytes(&mut v, b"IEND", &[]);
  v
}

/// A fuller PNG, with every chunk registered and in a legal order.
fn sample_png() -> Vec<u8> {
  let mut v = PNG_SIGNATURE.to_vec();
  push_chunk_bytes(&mut v, b"IHDR", &[0, 0, 0, 2, 0, 0, 0, 3, 8, 2, 0, 0, 0]);
  push_chunk_bytes(&mut v, b"gAMA", &45455_u32.to_be_bytes());
  push_chunk_bytes(&mut v, b"sRGB", &[0]);
  push_chunk_bytes(&mut v, b"pHYs", &[0, 0, 0x0B, 0x13, 0, 0, 0x0B, 0x13, 1]);
  push_chunk_bytes(&mut v, b"tEXt", b"Comment\0hello");
  push_chunk_bytes(&mut v, b"IDAT", &[0x78, 0x9C, 1, 2, 3]);
  push_chunk_bytes(&mut v, b"IDAT", &[4, 5, 6]);
  push_chunk_bytes(&mut v, b"tIME", &[0x07, 0xEA, 10, 18, 12, 0, 0]);
  push_chunk_bytes(&mut v, b"IEND", &[]);
  v
}

#[test]
fn test_scenario_a_parses() {
  let png = Png::parse(&scenario_a()).unwrap();
  assert_eq!(png.width(), Some(1));
  assert_eq!(png.height(), Some(1));
  let ihdr = png.ihdr().unwrap();
  assert_eq!(ihdr.bit_depth(), 8);
  assert_eq!(ihdr.color_type(), 0);
  assert_eq!(ihdr.interlace_method(), 0);
  assert_eq!(png.resolution(), None);
}

#[test]
fn test_scenario_b_checksum_mismatch() {
  let mut bytes = scenario_a();
  // first byte of the IHDR data
  bytes[8 + 8] ^= 0x01;
  assert_eq!(Png::parse(&bytes), Err(ContainerError::ChecksumMismatch));
}

#[test]
fn test_any_data_bit_flip_is_a_checksum_mismatch() {
  let clean = sample_png();
  let mut data_ranges = Vec::new();
  for raw in RawPngChunkIter::from_png_bytes(&clean).unwrap() {
    let raw = raw.unwrap();
    let start = raw.data.as_ptr() as usize - clean.as_ptr() as usize;
    data_ranges.push(start..start + raw.data.len());
  }
  for range in data_ranges {
    for i in range {
      for bit in 0..8 {
        let mut bytes = clean.clone();
        bytes[i] ^= 1 << bit;
        assert_eq!(
          Png::parse(&bytes),
          Err(ContainerError::ChecksumMismatch),
          "byte {i} bit {bit}"
        );
      }
    }
  }
}

#[test]
fn test_round_trip_without_changes() {
  let bytes = sample_png();
  let png = Png::parse(&bytes).unwrap();
  assert_eq!(png.serialize().unwrap(), bytes);
  assert_eq!(png.encoded_len(), bytes.len());
  assert_eq!(Png::parse(&scenario_a()).unwrap().serialize().unwrap(), scenario_a());
}

#[test]
fn test_sample_png_accessors() {
  let png = Png::parse(&sample_png()).unwrap();
  assert_eq!(png.resolution(), Some(Resolution::square(72)));
  assert_eq!(png.phys().unwrap().ppu_x(), 2835);
  assert_eq!(png.image_data(), [0x78, 0x9C, 1, 2, 3, 4, 5, 6]);
  assert_eq!(png.chunks_of(ChunkType::IDAT).count(), 2);
  assert_eq!(png.chunk(ChunkType::tEXt).unwrap().data(), b"Comment\0hello");
  assert_eq!(png.pixel_layout(), Some(rastermeta::PixelLayout::Rgb24));
}

#[test]
fn test_resolution_patch_idempotence() {
  for dpi in [72, 96, 150, 300, 600] {
    for bytes in [scenario_a(), sample_png()] {
      let out = png_set_resolution(&bytes, Resolution::square(dpi)).unwrap();
      let res = png_resolution(&out).unwrap().unwrap();
      assert!(res.dpi_x.abs_diff(dpi) <= 1, "{dpi} became {res:?}");
      assert!(res.dpi_y.abs_diff(dpi) <= 1, "{dpi} became {res:?}");
      // the pHYs chunk is written with a correct length and CRC
      let phys = RawPngChunkIter::from_png_bytes(&out)
        .unwrap()
        .map(Result::unwrap)
        .find(|c| c.ty == ChunkType::pHYs)
        .unwrap();
      assert_eq!(phys.data.len(), 9);
      assert!(phys.crc_matches());
      assert_eq!(phys.data[8], 1);
    }
  }
}

#[test]
fn test_bad_signature() {
  let mut bytes = scenario_a();
  bytes[1] = b'p';
  assert_eq!(Png::parse(&bytes), Err(ContainerError::InvalidSignature));
  assert_eq!(Png::parse(&[]), Err(ContainerError::InvalidSignature));
}

#[test]
fn test_RawPngChunkIter_no_panics() {
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in RawPngChunkIter::new(&v) {
      //
    }
  }
}

#[test]
fn test_Png_parse_no_panics() {
  for _ in 0..10 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend_from_slice(&super::rand_bytes(1024));
    let _ = Png::parse(&v);
    let _ = Png::parse_with(&v, PngReadOptions::lossless());
  }
  // truncating a good PNG anywhere is an error, not a panic
  let good = sample_png();
  for len in 0..good.len() {
    let _ = Png::parse(&good[..len]);
  }
}
