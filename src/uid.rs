//! SHA-256 fingerprints of image data.
//!
//! [`image_uid`] covers every byte, so any edit changes it. [`image_data_uid`]
//! only covers the pixel payload (the compressed `IDAT` stream of a PNG, or
//! the pixel array of a BMP), so metadata edits such as a new resolution leave
//! it alone.

use crate::{
  bmp::BmpFileHeader,
  png::{ChunkType, Png},
  ContainerError, ImageKind, Result,
};
use sha2::{Digest, Sha256};

/// A SHA-256 digest.
///
/// `Display` gives the 64 uppercase hex digits with no separators.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ImageUid(pub [u8; 32]);
impl core::fmt::Display for ImageUid {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for byte in self.0 {
      write!(f, "{byte:02X}")?;
    }
    Ok(())
  }
}
impl core::fmt::Debug for ImageUid {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "ImageUid({self})")
  }
}
impl From<Sha256> for ImageUid {
  #[inline]
  fn from(hasher: Sha256) -> Self {
    Self(hasher.finalize().into())
  }
}

/// The SHA-256 of all of the bytes, whatever they are.
#[inline]
#[must_use]
pub fn image_uid(bytes: &[u8]) -> ImageUid {
  ImageUid(Sha256::digest(bytes).into())
}

/// The SHA-256 of only the pixel payload of PNG or BMP data.
///
/// * PNG: every `IDAT` chunk's data, in file order. Split and merged `IDAT`
///   chunks give the same value.
/// * BMP: everything from the pixel data offset to the end.
///
/// ## Failure
/// * [`ContainerError::UnknownFormat`] if the data is neither format.
/// * [`ContainerError::InsufficientBytes`] if a BMP's pixel data offset is
///   past the end of the data.
/// * Any PNG parse error.
pub fn image_data_uid(bytes: &[u8]) -> Result<ImageUid> {
  let mut hasher = Sha256::new();
  match ImageKind::detect(bytes) {
    Some(ImageKind::Png) => {
      let png = Png::parse(bytes)?;
      for idat in png.chunks_of(ChunkType::IDAT) {
        hasher.update(idat.data());
      }
    }
    Some(ImageKind::Bmp) => {
      let (file_header, _) = BmpFileHeader::try_from_bytes(bytes)?;
      let offset = usize::try_from(file_header.pixel_data_offset())?;
      hasher.update(bytes.get(offset..).ok_or(ContainerError::InsufficientBytes)?);
    }
    None => return Err(ContainerError::UnknownFormat),
  }
  Ok(hasher.into())
}

#[test]
fn test_image_uid_known_digest() {
  use alloc::string::ToString;
  assert_eq!(
    image_uid(b"abc").to_string(),
    "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD"
  );
  assert_eq!(image_data_uid(b"abc"), Err(ContainerError::UnknownFormat));
}
