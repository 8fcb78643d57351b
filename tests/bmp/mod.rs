use rastermeta::{bmp::*, ContainerError, Resolution};

const WIDTH: i32 = 3;
const HEIGHT: i32 = 2;

/// A 24 bpp image with a 40 byte info header, built byte by byte.
fn scenario_c() -> Vec<u8> {
  let payload_len = (WIDTH * HEIGHT * 3) as u32;
  let mut v = Vec::new();
  v.extend_from_slice(b"BM");
  v.extend_from_slice(&(54 + payload_len).to_le_bytes());
  v.extend_from_slice(&[0; 4]);
  v.extend_from_slice(&54_u32.to_le_bytes());
  // info header
  v.extend_from_slice(&40_u32.to_le_bytes());
  v.extend_from_slice(&WIDTH.to_le_bytes());
  v.extend_from_slice(&HEIGHT.to_le_bytes());
  v.extend_from_slice(&1_u16.to_le_bytes());
  v.extend_from_slice(&24_u16.to_le_bytes());
  v.extend_from_slice(&0_u32.to_le_bytes()); // compression
  v.extend_from_slice(&0_u32.to_le_bytes()); // image size
  v.extend_from_slice(&0_i32.to_le_bytes()); // h ppm
  v.extend_from_slice(&0_i32.to_le_bytes()); // v ppm
  v.extend_from_slice(&0_u32.to_le_bytes()); // colors used
  v.extend_from_slice(&0_u32.to_le_bytes()); // colors important
  assert_eq!(v.len(), 54);
  v.extend((0..payload_len).map(|i| i as u8));
  v
}

#[test]
fn test_scenario_c_validates() {
  let bytes = scenario_c();
  assert!(is_bmp(&bytes));
  let bmp = Bmp::parse(&bytes).unwrap();
  assert_eq!(bmp.validate(), Ok(()));
  assert!(bmp.color_table().is_none());
  assert_eq!(bmp.width(), WIDTH);
  assert_eq!(bmp.height(), HEIGHT);
  assert_eq!(bmp.pixel_data().len(), 18);
  assert_eq!(bmp.resolution(), Resolution::default());
  assert_eq!(bmp.serialize(), bytes);
}

#[test]
fn test_scenario_d_rle8_with_image_size() {
  let mut bytes = scenario_c();
  bytes[14 + 16..14 + 20].copy_from_slice(&1_u32.to_le_bytes());
  bytes[14 + 20..14 + 24].copy_from_slice(&18_u32.to_le_bytes());
  let bmp = Bmp::parse(&bytes).unwrap();
  assert_eq!(bmp.info_header().compression(), Ok(1));
  assert_eq!(bmp.validate(), Err(ContainerError::CompressionFieldViolation));
}

#[test]
fn test_unknown_compression() {
  let mut bytes = scenario_c();
  bytes[14 + 16..14 + 20].copy_from_slice(&7_u32.to_le_bytes());
  assert_eq!(Bmp::parse(&bytes).unwrap().validate(), Err(ContainerError::InvalidCompressionMode));
}

#[test]
fn test_scenario_e_resolution_patch() {
  let before = scenario_c();
  let mut after = before.clone();
  bmp_set_resolution_in_place(&mut after, Resolution::square(300)).unwrap();
  let dpm = 11811_i32.to_le_bytes();
  assert_eq!(after[38..42], dpm);
  assert_eq!(after[42..46], dpm);
  // nothing else moved
  assert_eq!(after[..38], before[..38]);
  assert_eq!(after[46..], before[46..]);
  assert_eq!(bmp_resolution(&after), Ok(Resolution::square(300)));
  assert_eq!(Bmp::parse(&after).unwrap().validate(), Ok(()));
}

#[test]
fn test_resolution_patch_idempotence() {
  for dpi in [72, 96, 150, 300, 600] {
    let mut bytes = scenario_c();
    bmp_set_resolution_in_place(&mut bytes, Resolution::new(dpi, dpi)).unwrap();
    let res = bmp_resolution(&bytes).unwrap();
    assert!(res.dpi_x.abs_diff(dpi) <= 1, "{dpi} became {res:?}");
    assert!(res.dpi_y.abs_diff(dpi) <= 1, "{dpi} became {res:?}");

    let mut bmp = Bmp::parse(&scenario_c()).unwrap();
    bmp.set_resolution(Resolution::new(dpi, dpi)).unwrap();
    assert_eq!(bmp.serialize(), bytes);
  }
}

#[test]
fn test_header_dispatch() {
  for (size, expected_len) in [(12, 12), (40, 40), (108, 108), (124, 124)] {
    let mut bytes = vec![0; 14 + 124 + 16];
    bytes[..2].copy_from_slice(b"BM");
    bytes[14..18].copy_from_slice(&(size as u32).to_le_bytes());
    let bmp = Bmp::parse(&bytes).unwrap();
    assert_eq!(bmp.info_header().byte_len(), expected_len);
    let variant_ok = match bmp.info_header() {
      BmpInfoHeader::Core(_) => size == 12,
      BmpInfoHeader::V1(_) => size == 40,
      BmpInfoHeader::V4(_) => size == 108,
      BmpInfoHeader::V5(_) => size == 124,
    };
    assert!(variant_ok, "size {size}");
  }
  for size in [0_u32, 1, 39, 41, 56, 64, 100, 107, 109, 123, 125, u32::MAX] {
    let mut bytes = vec![0; 14 + 124 + 16];
    bytes[..2].copy_from_slice(b"BM");
    bytes[14..18].copy_from_slice(&size.to_le_bytes());
    assert_eq!(Bmp::parse(&bytes), Err(ContainerError::InvalidHeaderSize), "size {size}");
  }
}

#[test]
fn test_core_header_bmp() {
  let mut bytes = Vec::new();
  bytes.extend_from_slice(b"BM");
  bytes.extend_from_slice(&(14_u32 + 12 + 4).to_le_bytes());
  bytes.extend_from_slice(&[0; 4]);
  bytes.extend_from_slice(&26_u32.to_le_bytes());
  bytes.extend_from_slice(&12_u32.to_le_bytes());
  bytes.extend_from_slice(&1_i16.to_le_bytes());
  bytes.extend_from_slice(&1_i16.to_le_bytes());
  bytes.extend_from_slice(&1_u16.to_le_bytes());
  bytes.extend_from_slice(&32_u16.to_le_bytes());
  bytes.extend_from_slice(&[1, 2, 3, 4]);
  let bmp = Bmp::parse(&bytes).unwrap();
  assert_eq!(bmp.validate(), Ok(()));
  assert_eq!(bmp.resolution(), Resolution::default());
  assert_eq!(bmp_resolution(&bytes), Ok(Resolution::default()));
  assert_eq!(
    bmp_set_resolution_in_place(&mut bytes.clone(), Resolution::square(96)),
    Err(ContainerError::UnsupportedOperation)
  );
  assert_eq!(bmp.info_header().colors_used(), Err(ContainerError::UnsupportedOperation));
}

#[test]
fn test_indexed_color_table() {
  let bmp = Bmp::new(8, 1, 1, vec![0b1010_1010]).unwrap();
  let bytes = bmp.serialize();
  let parsed = Bmp::parse(&bytes).unwrap();
  assert_eq!(parsed.validate(), Ok(()));
  assert_eq!(parsed.color_table().map(<[_]>::len), Some(2));
  assert_eq!(parsed.color_table_bytes(), Some(&[0, 0, 0, 0, 255, 255, 255, 0][..]));
  assert_eq!(parsed.pixel_data(), &[0b1010_1010]);
}

#[test]
fn test_Bmp_parse_no_panics() {
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    if let Ok(bmp) = Bmp::parse(&v) {
      let _ = bmp.validate();
    }
    let mut w = b"BM".to_vec();
    w.extend_from_slice(&v);
    let _ = Bmp::parse(&w);
    let _ = bmp_resolution(&w);
  }
  let good = scenario_c();
  for len in 0..good.len() {
    let _ = Bmp::parse(&good[..len]);
  }
}
