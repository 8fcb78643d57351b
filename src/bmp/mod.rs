#![forbid(unsafe_code)]

//! Module for Windows Bitmap files (BMP).
//!
//! Note: All multi-byte values in BMP are always little-endian encoded.
//!
//! * A bitmap file always starts with a "file header". This is always 14 bytes.
//!   * A tag for the kind of bitmap you're expected to find
//!   * A total size of the file, to check if a file was unexpectedly truncated
//!   * The position of the bitmap data within the file.
//! * Next is an "info header". There's many versions of this header. The first
//!   4 bytes are always the size of the full info header, and each version is a
//!   different size, so this lets you figure out what version is being used for
//!   this file. This crate handles the 12, 40, 108, and 124 byte versions.
//! * Next there **might** be a color table. This is present when the bit depth
//!   is 8 (or less) bits per pixel, with `2**bits_per_pixel` entries of
//!   `[b, g, r, 0]`.
//! * Finally there is the pixel array, which this crate treats as opaque
//!   bytes.
//!
//! [`Bmp`] holds all of the parts, and [`Bmp::validate`] checks that they all
//! agree with each other. The header types are fixed layout byte records, so
//! writing a header back out gives exactly the bytes that were read.

use crate::{try_pull_pod, AsciiArray, ContainerError, PixelLayout, Resolution, Result};

mod file_header;
pub use file_header::*;

mod info_header;
pub use info_header::*;

mod color_table;
pub use color_table::*;

#[cfg(feature = "alloc")]
mod container;
#[cfg(feature = "alloc")]
pub use container::*;

/// The tag at the start of every Windows bitmap.
pub const BMP_TAG: AsciiArray<2> = AsciiArray(*b"BM");

/// The smallest byte count [`is_bmp`] accepts: a file header plus a 40 byte
/// info header.
pub const BMP_MIN_DETECT_LEN: usize = BmpFileHeader::LEN + BmpInfoHeaderV1::LEN;

/// Checks if the bytes look like a Windows bitmap.
///
/// This needs the `BM` tag and at least [`BMP_MIN_DETECT_LEN`] bytes. Nothing
/// else is checked.
#[inline]
#[must_use]
pub fn is_bmp(bytes: &[u8]) -> bool {
  bytes.len() >= BMP_MIN_DETECT_LEN && bytes.starts_with(&BMP_TAG.0)
}

/// The compression modes a bitmap can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum BmpCompression {
  /// RGB, No compression.
  RgbNoCompression = 0,

  /// RGB, Run-length encoded, 8bpp
  RgbRLE8 = 1,

  /// RGB, Run-length encoded, 4bpp
  RgbRLE4 = 2,

  /// The image is not compressed, and following the header there's **three**
  /// `u32` bitmasks that let you locate the R, G, and B bits.
  Bitfields = 3,

  /// A jpeg image
  Jpeg = 4,

  /// A png image
  Png = 5,

  /// The image is not compressed, and following the header there's **four**
  /// `u32` bitmasks that let you locate the R, G, B, and A bits.
  AlphaBitfields = 6,

  /// CMYK, No compression.
  CmykNoCompression = 11,

  /// CMYK, Run-length encoded, 8bpp
  CmykRLE8 = 12,

  /// CMYK, Run-length encoded, 4bpp
  CmykRLE4 = 13,
}
impl TryFrom<u32> for BmpCompression {
  type Error = ContainerError;
  #[inline]
  fn try_from(value: u32) -> Result<Self> {
    Ok(match value {
      0 => Self::RgbNoCompression,
      1 => Self::RgbRLE8,
      2 => Self::RgbRLE4,
      3 => Self::Bitfields,
      4 => Self::Jpeg,
      5 => Self::Png,
      6 => Self::AlphaBitfields,
      11 => Self::CmykNoCompression,
      12 => Self::CmykRLE8,
      13 => Self::CmykRLE4,
      _ => return Err(ContainerError::InvalidCompressionMode),
    })
  }
}
impl From<BmpCompression> for u32 {
  #[inline]
  #[must_use]
  fn from(c: BmpCompression) -> Self {
    c as u32
  }
}

/// Reads the resolution of BMP bytes.
///
/// Only the headers are looked at. The 12 byte info header has no resolution
/// fields, so it gives 0 on both axes, same as a header with the fields left
/// at 0.
#[inline]
pub fn bmp_resolution(bytes: &[u8]) -> Result<Resolution> {
  let (_file_header, rest) = BmpFileHeader::try_from_bytes(bytes)?;
  let (info_header, _rest) = BmpInfoHeader::try_from_bytes(rest)?;
  Ok(info_header.resolution().unwrap_or_default())
}

/// Overwrites the two pixels-per-meter fields of BMP bytes.
///
/// No other bytes are changed, so the pixel data and every other header field
/// stay exactly as they were.
///
/// ## Failure
/// * [`ContainerError::InvalidSignature`] if the data doesn't start with `BM`.
/// * [`ContainerError::InvalidHeaderSize`] for an unknown info header size.
/// * [`ContainerError::UnsupportedOperation`] for the 12 byte info header,
///   which doesn't have the fields.
pub fn bmp_set_resolution_in_place(bytes: &mut [u8], res: Resolution) -> Result<()> {
  let (file_header, rest) = BmpFileHeader::try_from_bytes(bytes)?;
  if !file_header.is_valid() {
    log::warn!("BMP tag is {:?}", file_header.tag());
    return Err(ContainerError::InvalidSignature);
  }
  let (info_header, _rest) = BmpInfoHeader::try_from_bytes(rest)?;
  if matches!(info_header, BmpInfoHeader::Core(_)) {
    log::warn!("the 12 byte BMP info header has no resolution fields");
    return Err(ContainerError::UnsupportedOperation);
  }
  let (x, y) = res.to_dpm();
  let x = i32::try_from(x)?;
  let y = i32::try_from(y)?;
  log::debug!("patching BMP resolution to {res:?} ({x} x {y} per meter)");
  let header_bytes = bytes
    .get_mut(BmpFileHeader::LEN..BmpFileHeader::LEN + BmpInfoHeaderV1::LEN)
    .ok_or(ContainerError::InsufficientBytes)?;
  let header: &mut BmpInfoHeaderV1 = bytemuck::try_from_bytes_mut(header_bytes)
    .map_err(|_| ContainerError::StructuralInconsistency)?;
  header.set_h_ppm(x);
  header.set_v_ppm(y);
  Ok(())
}

/// File offset of the horizontal pixels-per-meter field.
pub const BMP_H_PPM_OFFSET: usize = BmpFileHeader::LEN + BmpInfoHeaderV1::H_PPM_OFFSET;
/// File offset of the vertical pixels-per-meter field.
pub const BMP_V_PPM_OFFSET: usize = BmpFileHeader::LEN + BmpInfoHeaderV1::V_PPM_OFFSET;
