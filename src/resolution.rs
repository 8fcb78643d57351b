//! Image resolution, as dots per inch.
//!
//! Both container formats store resolution as dots per *meter*. This module
//! has the [`Resolution`] view type, the unit conversions, and two functions
//! that read or patch the resolution of either format after detecting which
//! one the bytes are.
//!
//! The format specific patchers live with their containers:
//! * PNG: [`Png::set_resolution`](crate::png::Png::set_resolution) swaps in a
//!   new `pHYs` chunk, and the chunk's CRC and length are recomputed when the
//!   container is written back out.
//! * BMP: [`bmp_set_resolution_in_place`](crate::bmp::bmp_set_resolution_in_place)
//!   overwrites the two 4 byte pixels-per-meter fields and touches nothing
//!   else.

#[cfg(all(feature = "alloc", feature = "png", feature = "bmp"))]
use crate::{ContainerError, ImageKind, Result};
#[cfg(all(feature = "alloc", feature = "png", feature = "bmp"))]
use alloc::vec::Vec;

/// The conversion factor from meters to inches.
pub const INCHES_PER_METER: f64 = 39.3701;

/// Rounds half up, for non-negative values. Negative and NaN inputs give 0,
/// values too large for `u32` saturate.
#[inline]
#[must_use]
fn round_non_negative(x: f64) -> u32 {
  (x + 0.5) as u32
}

/// Converts dots per inch into dots per meter, rounding to the nearest dot.
#[inline]
#[must_use]
pub fn dpi_to_dpm(dpi: u32) -> u32 {
  round_non_negative(f64::from(dpi) * INCHES_PER_METER)
}

/// Converts dots per meter into dots per inch, rounding to the nearest dot.
#[inline]
#[must_use]
pub fn dpm_to_dpi(dpm: u32) -> u32 {
  round_non_negative(f64::from(dpm) / INCHES_PER_METER)
}

/// Horizontal and vertical resolution in dots per inch.
///
/// This is a view, not something stored in either format directly. A value of
/// 0 on an axis means "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Resolution {
  /// Horizontal dots per inch.
  pub dpi_x: u32,
  /// Vertical dots per inch.
  pub dpi_y: u32,
}
impl Resolution {
  /// Makes a resolution from both axis values.
  #[inline]
  #[must_use]
  pub const fn new(dpi_x: u32, dpi_y: u32) -> Self {
    Self { dpi_x, dpi_y }
  }

  /// Makes a resolution with the same value on both axes.
  #[inline]
  #[must_use]
  pub const fn square(dpi: u32) -> Self {
    Self { dpi_x: dpi, dpi_y: dpi }
  }

  /// Makes a resolution from dots per meter values.
  #[inline]
  #[must_use]
  pub fn from_dpm(dpm_x: u32, dpm_y: u32) -> Self {
    Self { dpi_x: dpm_to_dpi(dpm_x), dpi_y: dpm_to_dpi(dpm_y) }
  }

  /// The resolution as `(x, y)` dots per meter.
  #[inline]
  #[must_use]
  pub fn to_dpm(self) -> (u32, u32) {
    (dpi_to_dpm(self.dpi_x), dpi_to_dpm(self.dpi_y))
  }

  /// If both axes are 0.
  #[inline]
  #[must_use]
  pub const fn is_zero(self) -> bool {
    self.dpi_x == 0 && self.dpi_y == 0
  }
}

/// Reads the resolution of PNG or BMP data.
///
/// * PNG data without a `pHYs` chunk gives `Ok(None)`.
/// * BMP data always gives a value, with 0 on any axis that isn't set.
///
/// ## Failure
/// * [`ContainerError::UnknownFormat`] if the data is neither format.
/// * Any parse error from the detected format.
#[cfg(all(feature = "alloc", feature = "png", feature = "bmp"))]
#[cfg_attr(docs_rs, doc(cfg(all(feature = "alloc", feature = "png", feature = "bmp"))))]
pub fn image_resolution(bytes: &[u8]) -> Result<Option<Resolution>> {
  match ImageKind::detect(bytes) {
    Some(ImageKind::Png) => crate::png::png_resolution(bytes),
    Some(ImageKind::Bmp) => crate::bmp::bmp_resolution(bytes).map(Some),
    None => Err(ContainerError::UnknownFormat),
  }
}

/// Sets the resolution of PNG or BMP data, giving the updated bytes.
///
/// * A `dpi_y` of 0 means "the same as `dpi_x`".
/// * If the data already has exactly this resolution it's returned unchanged.
///
/// ## Failure
/// * [`ContainerError::InvalidResolution`] if `dpi_x` is 0.
/// * [`ContainerError::UnknownFormat`] if the data is neither format.
/// * Any parse or patch error from the detected format.
#[cfg(all(feature = "alloc", feature = "png", feature = "bmp"))]
#[cfg_attr(docs_rs, doc(cfg(all(feature = "alloc", feature = "png", feature = "bmp"))))]
pub fn set_image_resolution(bytes: &[u8], dpi_x: u32, dpi_y: u32) -> Result<Vec<u8>> {
  if dpi_x == 0 {
    return Err(ContainerError::InvalidResolution);
  }
  let wanted = Resolution::new(dpi_x, if dpi_y == 0 { dpi_x } else { dpi_y });
  let current = image_resolution(bytes)?;
  if current == Some(wanted) {
    log::debug!("resolution already {wanted:?}, leaving the data alone");
    return Ok(bytes.to_vec());
  }
  match ImageKind::detect(bytes) {
    Some(ImageKind::Png) => crate::png::png_set_resolution(bytes, wanted),
    Some(ImageKind::Bmp) => {
      let mut out = bytes.to_vec();
      crate::bmp::bmp_set_resolution_in_place(&mut out, wanted)?;
      Ok(out)
    }
    None => Err(ContainerError::UnknownFormat),
  }
}
