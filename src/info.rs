//! Questions about an image that don't care which container it's in.

use crate::{
  bmp::{BmpFileHeader, BmpInfoHeader},
  png::{Ihdr, Png},
  ContainerError, ImageKind, PixelLayout, Result,
};

fn bmp_info_header(bytes: &[u8]) -> Result<BmpInfoHeader> {
  let (_, rest) = BmpFileHeader::try_from_bytes(bytes)?;
  BmpInfoHeader::try_from_bytes(rest).map(|(h, _)| h)
}

fn png_header_field<T>(bytes: &[u8], f: impl FnOnce(&Png) -> Option<T>) -> Result<T> {
  let png = Png::parse(bytes)?;
  f(&png).ok_or_else(|| {
    log::warn!("PNG data has no IHDR chunk");
    ContainerError::StructuralInconsistency
  })
}

/// Width and height in pixels of PNG or BMP data.
///
/// A BMP stored top down has a negative height in its header. The height
/// given here is always the row count.
///
/// ## Failure
/// * [`ContainerError::UnknownFormat`] if the data is neither format.
/// * [`ContainerError::StructuralInconsistency`] for a PNG without `IHDR`.
/// * Any parse error from the detected format.
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
  match ImageKind::detect(bytes) {
    Some(ImageKind::Png) => png_header_field(bytes, |png| Some((png.width()?, png.height()?))),
    Some(ImageKind::Bmp) => {
      let h = bmp_info_header(bytes)?;
      Ok((h.width().unsigned_abs(), h.height().unsigned_abs()))
    }
    None => Err(ContainerError::UnknownFormat),
  }
}

/// The pixel layout hint of PNG or BMP data.
///
/// `Ok(None)` when the header is readable but its color type (PNG) or bit
/// count (BMP) has no layout hint.
///
/// ## Failure
/// Same as [`image_dimensions`].
pub fn image_pixel_layout(bytes: &[u8]) -> Result<Option<PixelLayout>> {
  match ImageKind::detect(bytes) {
    Some(ImageKind::Png) => png_header_field(bytes, |png| png.ihdr().map(Ihdr::pixel_layout)),
    Some(ImageKind::Bmp) => Ok(bmp_info_header(bytes)?.pixel_layout()),
    None => Err(ContainerError::UnknownFormat),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{bmp::Bmp, png::PngChunk};

  #[test]
  fn test_png_dimensions_and_layout() {
    let mut png = Png::new();
    png.set_ihdr(Ihdr::new(640, 480, 8, 2, 0, 0, 0));
    let bytes = png.serialize().unwrap();
    assert_eq!(image_dimensions(&bytes), Ok((640, 480)));
    assert_eq!(image_pixel_layout(&bytes), Ok(Some(PixelLayout::Rgb24)));

    let mut odd = Png::new();
    odd.set_ihdr(Ihdr::new(1, 1, 8, 5, 0, 0, 0));
    assert_eq!(image_pixel_layout(&odd.serialize().unwrap()), Ok(None));

    let mut headless = Png::new();
    headless.push_chunk(PngChunk::from_data(crate::png::ChunkType::IEND, &[]));
    let headless = headless.serialize().unwrap();
    assert_eq!(image_dimensions(&headless), Err(ContainerError::StructuralInconsistency));
    assert_eq!(image_pixel_layout(&headless), Err(ContainerError::StructuralInconsistency));
  }

  #[test]
  fn test_bmp_dimensions_and_layout() {
    let mut bmp = Bmp::new(3, 2, 24, alloc::vec![0; 24]).unwrap();
    let bytes = bmp.serialize();
    assert_eq!(image_dimensions(&bytes), Ok((3, 2)));
    assert_eq!(image_pixel_layout(&bytes), Ok(Some(PixelLayout::Rgb24)));

    bmp.info_header_mut().set_height(-2).unwrap();
    assert_eq!(image_dimensions(&bmp.serialize()), Ok((3, 2)));
  }

  #[test]
  fn test_unknown_format() {
    assert_eq!(image_dimensions(b"GIF89a"), Err(ContainerError::UnknownFormat));
    assert_eq!(image_pixel_layout(&[]), Err(ContainerError::UnknownFormat));
  }
}
