use rastermeta::{
  bmp::Bmp,
  convert::*,
  png::{Idat, Ihdr, Png, PngChunk},
  resolution::{image_resolution, set_image_resolution},
  ContainerError, ImageKind, PixelLayout, Resolution,
};
use std::cell::Cell;

/// Stands in for a real codec: it reads the source dimensions and produces a
/// blank image of the requested format and layout.
#[derive(Default)]
struct FakeCodec {
  calls: Cell<u32>,
  fail: bool,
}
impl RasterCodec for FakeCodec {
  type Error = &'static str;
  fn transcode(
    &self, src: &[u8], from: ImageKind, to: ImageKind, layout: PixelLayout,
  ) -> Result<Vec<u8>, Self::Error> {
    self.calls.set(self.calls.get() + 1);
    if self.fail {
      return Err("decoder exploded");
    }
    let (w, h) = match from {
      ImageKind::Png => {
        let png = Png::parse(src).map_err(|_| "bad png")?;
        (png.width().ok_or("no ihdr")?, png.height().ok_or("no ihdr")?)
      }
      ImageKind::Bmp => {
        let bmp = Bmp::parse(src).map_err(|_| "bad bmp")?;
        (bmp.width() as u32, bmp.height() as u32)
      }
    };
    Ok(match to {
      ImageKind::Png => png_image(w, h, layout),
      ImageKind::Bmp => {
        let bits = layout.bits_per_pixel();
        let len = (w * h * u32::from(bits) / 8) as usize;
        Bmp::new(w as i32, h as i32, bits, vec![0; len]).map_err(|_| "bad size")?.serialize()
      }
    })
  }
}

fn png_image(w: u32, h: u32, layout: PixelLayout) -> Vec<u8> {
  let color_type = match layout {
    PixelLayout::Gray8 => 0,
    PixelLayout::Rgb24 => 2,
    PixelLayout::Indexed8 => 3,
    PixelLayout::GrayAlpha16 => 4,
    _ => 6,
  };
  let mut png = Png::new();
  png.set_ihdr(Ihdr::new(w, h, 8, color_type, 0, 0, 0));
  png.push_chunk(PngChunk::from(Idat::new(vec![0x78, 0x01])));
  png.push_chunk(PngChunk::from_data(rastermeta::png::ChunkType::IEND, &[]));
  png.serialize().unwrap()
}

fn bmp_image(bits: u16, res: Option<Resolution>) -> Vec<u8> {
  let len = 4 * 2 * usize::from(bits) / 8;
  let mut bmp = Bmp::new(4, 2, bits, vec![0; len]).unwrap();
  if let Some(res) = res {
    bmp.set_resolution(res).unwrap();
  }
  bmp.serialize()
}

#[test]
fn test_detect() {
  assert_eq!(ImageKind::detect(&png_image(1, 1, PixelLayout::Gray8)), Some(ImageKind::Png));
  assert_eq!(ImageKind::detect(&bmp_image(24, None)), Some(ImageKind::Bmp));
  assert_eq!(ImageKind::detect(b"BM"), None);
  assert_eq!(ImageKind::detect(b"GIF89a"), None);
}

#[test]
fn test_bmp_to_png_keeps_resolution() {
  let codec = FakeCodec::default();
  let png = bmp_to_png(&codec, &bmp_image(24, Some(Resolution::square(300)))).unwrap();
  let parsed = Png::parse(&png).unwrap();
  assert_eq!(parsed.width(), Some(4));
  assert_eq!(parsed.pixel_layout(), Some(PixelLayout::Rgb24));
  assert_eq!(parsed.resolution(), Some(Resolution::square(300)));
  assert_eq!(codec.calls.get(), 1);

  // indexed 8 bit is asked for as greyscale
  let png = bmp_to_png(&codec, &bmp_image(8, None)).unwrap();
  let parsed = Png::parse(&png).unwrap();
  assert_eq!(parsed.pixel_layout(), Some(PixelLayout::Gray8));
  assert_eq!(parsed.resolution(), None);

  assert_eq!(bmp_to_png(&codec, &bmp_image(4, None)), Err(ContainerError::UnsupportedPixelLayout));
}

#[test]
fn test_png_to_bmp_keeps_resolution() {
  let codec = FakeCodec::default();
  let mut png = Png::parse(&png_image(5, 3, PixelLayout::Rgba32)).unwrap();
  png.set_resolution(Resolution::new(96, 72));
  let bmp = png_to_bmp(&codec, &png.serialize().unwrap()).unwrap();
  let parsed = Bmp::parse(&bmp).unwrap();
  assert_eq!(parsed.validate(), Ok(()));
  assert_eq!(parsed.bit_count(), 32);
  assert_eq!(parsed.resolution(), Resolution::new(96, 72));

  let grey_alpha = png_image(1, 1, PixelLayout::GrayAlpha16);
  assert_eq!(png_to_bmp(&codec, &grey_alpha), Err(ContainerError::UnsupportedPixelLayout));
}

#[test]
fn test_ensure_passes_matching_format_through() {
  let codec = FakeCodec::default();
  let png = png_image(2, 2, PixelLayout::Rgb24);
  let bmp = bmp_image(24, None);
  assert_eq!(ensure_png(&codec, &png).unwrap(), png);
  assert_eq!(ensure_bmp(&codec, &bmp).unwrap(), bmp);
  assert_eq!(codec.calls.get(), 0);
  assert!(Png::parse(&ensure_png(&codec, &bmp).unwrap()).is_ok());
  assert!(Bmp::parse(&ensure_bmp(&codec, &png).unwrap()).is_ok());
  assert_eq!(codec.calls.get(), 2);
  assert_eq!(ensure_png(&codec, b"not an image"), Err(ContainerError::UnknownFormat));
  assert_eq!(ensure_bmp(&codec, b"not an image"), Err(ContainerError::UnknownFormat));
}

#[test]
fn test_set_pixel_layout() {
  let codec = FakeCodec::default();
  let mut png = Png::parse(&png_image(2, 2, PixelLayout::Rgb24)).unwrap();
  png.set_resolution(Resolution::square(150));
  let png = png.serialize().unwrap();

  assert_eq!(png_set_pixel_layout(&codec, &png, PixelLayout::Rgb24).unwrap(), png);
  assert_eq!(codec.calls.get(), 0);

  let grey = Png::parse(&png_set_pixel_layout(&codec, &png, PixelLayout::Gray8).unwrap()).unwrap();
  assert_eq!(grey.pixel_layout(), Some(PixelLayout::Gray8));
  assert_eq!(grey.resolution(), Some(Resolution::square(150)));

  assert_eq!(
    png_set_pixel_layout(&codec, &png, PixelLayout::Indexed8),
    Err(ContainerError::UnsupportedPixelLayout)
  );
  assert_eq!(
    png_set_pixel_layout(&codec, &bmp_image(24, None), PixelLayout::Gray8),
    Err(ContainerError::UnknownFormat)
  );

  let bmp = bmp_image(24, Some(Resolution::square(600)));
  let out = Bmp::parse(&bmp_set_pixel_layout(&codec, &bmp, PixelLayout::Rgba32).unwrap()).unwrap();
  assert_eq!(out.bit_count(), 32);
  assert_eq!(out.resolution(), Resolution::square(600));
  assert_eq!(out.validate(), Ok(()));
}

#[test]
fn test_codec_failure() {
  let codec = FakeCodec { fail: true, ..FakeCodec::default() };
  assert_eq!(bmp_to_png(&codec, &bmp_image(24, None)), Err(ContainerError::Codec));
}

#[test]
fn test_image_resolution_either_format() {
  let png = png_image(1, 1, PixelLayout::Gray8);
  let bmp = bmp_image(24, None);
  assert_eq!(image_resolution(&png), Ok(None));
  assert_eq!(image_resolution(&bmp), Ok(Some(Resolution::default())));
  assert_eq!(image_resolution(b"nope"), Err(ContainerError::UnknownFormat));

  let png2 = set_image_resolution(&png, 300, 0).unwrap();
  assert_eq!(image_resolution(&png2), Ok(Some(Resolution::square(300))));
  let bmp2 = set_image_resolution(&bmp, 96, 72).unwrap();
  assert_eq!(image_resolution(&bmp2), Ok(Some(Resolution::new(96, 72))));
  assert_eq!(bmp2.len(), bmp.len());

  // already at that resolution
  assert_eq!(set_image_resolution(&png2, 300, 300).unwrap(), png2);
  assert_eq!(set_image_resolution(&bmp2, 96, 72).unwrap(), bmp2);

  assert_eq!(set_image_resolution(&png, 0, 300), Err(ContainerError::InvalidResolution));
  assert_eq!(set_image_resolution(b"nope", 72, 72), Err(ContainerError::UnknownFormat));
}
