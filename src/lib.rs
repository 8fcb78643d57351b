#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]

//! A crate for working with image *containers*.
//!
//! PNG and BMP files are both a bit of metadata wrapped around a pixel
//! payload. This crate handles the wrapping: it parses the container into
//! typed records, checks the structural rules, lets you edit metadata such as
//! the image resolution, and writes the container back out. It never decodes
//! pixels. When pixel data really has to be re-encoded (eg: converting a BMP
//! into a PNG) the work is handed to a [`RasterCodec`](convert::RasterCodec)
//! that you provide, and this crate only re-wraps the result.
//!
//! * [`png`]: the chunk-based format. Checksums, chunk types, the chunk
//!   registry, and the [`Png`](png::Png) container.
//! * [`bmp`]: the header-based format. The file header, the info header
//!   variants, and the [`Bmp`](bmp::Bmp) container with its validator.
//! * [`resolution`]: DPI reading and patching for either format.
//! * [`image_dimensions`] and [`image_pixel_layout`] read the header of
//!   either format.
//! * `uid` (with the `uid` feature): SHA-256 fingerprints of a whole image or
//!   of just its pixel payload.
//!
//! Everything works on byte slices that are already in memory. Reading and
//! writing files is up to you.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod ascii_array;
pub use ascii_array::*;

mod error;
pub use error::*;

mod util;
pub(crate) use util::*;

pub mod pixel_layout;
pub use pixel_layout::PixelLayout;

pub mod resolution;
pub use resolution::Resolution;

#[cfg(feature = "png")]
#[cfg_attr(docs_rs, doc(cfg(feature = "png")))]
pub mod png;

#[cfg(feature = "bmp")]
#[cfg_attr(docs_rs, doc(cfg(feature = "bmp")))]
pub mod bmp;

#[cfg(all(feature = "alloc", feature = "png", feature = "bmp"))]
#[cfg_attr(docs_rs, doc(cfg(all(feature = "alloc", feature = "png", feature = "bmp"))))]
pub mod convert;

#[cfg(all(feature = "alloc", feature = "png", feature = "bmp"))]
mod info;
#[cfg(all(feature = "alloc", feature = "png", feature = "bmp"))]
#[cfg_attr(docs_rs, doc(cfg(all(feature = "alloc", feature = "png", feature = "bmp"))))]
pub use info::*;

#[cfg(feature = "uid")]
#[cfg_attr(docs_rs, doc(cfg(feature = "uid")))]
pub mod uid;

/// The container formats this crate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImageKind {
  /// Portable Network Graphics, the chunk-based format.
  Png,
  /// Windows Bitmap, the header-based format.
  Bmp,
}
impl ImageKind {
  /// Guesses the container format from the leading bytes.
  ///
  /// * PNG needs the full 8 byte signature.
  /// * BMP needs the `BM` tag and at least enough bytes for a file header plus
  ///   a 40 byte info header (54 bytes).
  #[inline]
  #[must_use]
  pub fn detect(bytes: &[u8]) -> Option<Self> {
    #[cfg(feature = "png")]
    if png::is_png(bytes) {
      return Some(Self::Png);
    }
    #[cfg(feature = "bmp")]
    if bmp::is_bmp(bytes) {
      return Some(Self::Bmp);
    }
    let _ = bytes;
    None
  }
}
