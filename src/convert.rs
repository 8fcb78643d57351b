//! Converting between the container formats, with an outside codec.
//!
//! This crate never decodes or encodes pixels. Anything that needs new pixel
//! data goes through a [`RasterCodec`] supplied by the caller. The functions
//! here pick the pixel layout to ask the codec for, call it, and then put the
//! source image's resolution back onto the codec's output, since codecs
//! generally don't carry it over.
//!
//! Only [`Gray8`](PixelLayout::Gray8), [`Rgb24`](PixelLayout::Rgb24), and
//! [`Rgba32`](PixelLayout::Rgba32) are ever requested from the codec. Indexed
//! 8-bit sources are requested as `Gray8`.

use crate::{
  bmp::{bmp_resolution, bmp_set_resolution_in_place, BmpFileHeader, BmpInfoHeader},
  png::{png_resolution, png_set_resolution, Png},
  ContainerError, ImageKind, PixelLayout, Resolution, Result,
};
use alloc::vec::Vec;

/// The external codec that does the actual pixel work.
pub trait RasterCodec {
  /// The codec's own error type.
  type Error: core::fmt::Debug;

  /// Decodes `src` (which is in the `from` format) and encodes it in the `to`
  /// format with the given pixel layout.
  fn transcode(
    &self, src: &[u8], from: ImageKind, to: ImageKind, layout: PixelLayout,
  ) -> Result<Vec<u8>, Self::Error>;
}

/// The layout to ask the codec for when converting an image with `layout`.
///
/// ## Failure
/// * [`ContainerError::UnsupportedPixelLayout`]
#[inline]
pub fn encode_target_for(layout: PixelLayout) -> Result<PixelLayout> {
  match layout {
    PixelLayout::Indexed8 | PixelLayout::Gray8 => Ok(PixelLayout::Gray8),
    PixelLayout::Rgb24 => Ok(PixelLayout::Rgb24),
    PixelLayout::Rgba32 => Ok(PixelLayout::Rgba32),
    other => {
      log::warn!("no conversion target for {other:?}");
      Err(ContainerError::UnsupportedPixelLayout)
    }
  }
}

fn run_codec<C: RasterCodec>(
  codec: &C, src: &[u8], from: ImageKind, to: ImageKind, layout: PixelLayout,
) -> Result<Vec<u8>> {
  log::debug!("transcoding {from:?} to {to:?} as {layout:?}");
  codec.transcode(src, from, to, layout).map_err(|e| {
    log::warn!("raster codec failed: {e:?}");
    ContainerError::Codec
  })
}

fn bmp_layout(bytes: &[u8]) -> Result<Option<PixelLayout>> {
  let (_, rest) = BmpFileHeader::try_from_bytes(bytes)?;
  let (info_header, _) = BmpInfoHeader::try_from_bytes(rest)?;
  Ok(info_header.pixel_layout())
}

fn png_layout(bytes: &[u8]) -> Result<Option<PixelLayout>> {
  Ok(Png::parse(bytes)?.pixel_layout())
}

fn require(bytes: &[u8], kind: ImageKind) -> Result<()> {
  if ImageKind::detect(bytes) == Some(kind) {
    Ok(())
  } else {
    log::warn!("expected {kind:?} data");
    Err(ContainerError::UnknownFormat)
  }
}

fn with_png_resolution(png: Vec<u8>, res: Option<Resolution>) -> Result<Vec<u8>> {
  match res {
    Some(res) if !res.is_zero() => png_set_resolution(&png, res),
    _ => Ok(png),
  }
}

fn with_bmp_resolution(mut bmp: Vec<u8>, res: Option<Resolution>) -> Result<Vec<u8>> {
  if let Some(res) = res.filter(|r| !r.is_zero()) {
    bmp_set_resolution_in_place(&mut bmp, res)?;
  }
  Ok(bmp)
}

/// Converts BMP bytes into PNG bytes, keeping the resolution.
///
/// A BMP with no resolution set gives a PNG with no `pHYs` chunk.
///
/// ## Failure
/// * [`ContainerError::UnknownFormat`] if the input isn't a BMP.
/// * [`ContainerError::UnsupportedPixelLayout`] for bit counts other than 8,
///   24, or 32.
/// * [`ContainerError::Codec`]
/// * Parse errors from either format.
pub fn bmp_to_png<C: RasterCodec>(codec: &C, bmp: &[u8]) -> Result<Vec<u8>> {
  require(bmp, ImageKind::Bmp)?;
  let res = bmp_resolution(bmp)?;
  let layout = bmp_layout(bmp)?.ok_or(ContainerError::UnsupportedPixelLayout)?;
  let png = run_codec(codec, bmp, ImageKind::Bmp, ImageKind::Png, encode_target_for(layout)?)?;
  with_png_resolution(png, Some(res))
}

/// Converts PNG bytes into BMP bytes, keeping the resolution.
///
/// ## Failure
/// Same as [`bmp_to_png`] the other way around. Grayscale with alpha PNGs
/// aren't supported.
pub fn png_to_bmp<C: RasterCodec>(codec: &C, png: &[u8]) -> Result<Vec<u8>> {
  require(png, ImageKind::Png)?;
  let res = png_resolution(png)?;
  let layout = png_layout(png)?.ok_or(ContainerError::UnsupportedPixelLayout)?;
  let bmp = run_codec(codec, png, ImageKind::Png, ImageKind::Bmp, encode_target_for(layout)?)?;
  with_bmp_resolution(bmp, res)
}

/// Gives PNG bytes: the input itself if it's already a PNG, or the converted
/// BMP.
pub fn ensure_png<C: RasterCodec>(codec: &C, bytes: &[u8]) -> Result<Vec<u8>> {
  match ImageKind::detect(bytes) {
    Some(ImageKind::Png) => Ok(bytes.to_vec()),
    Some(ImageKind::Bmp) => bmp_to_png(codec, bytes),
    None => Err(ContainerError::UnknownFormat),
  }
}

/// Gives BMP bytes: the input itself if it's already a BMP, or the converted
/// PNG.
pub fn ensure_bmp<C: RasterCodec>(codec: &C, bytes: &[u8]) -> Result<Vec<u8>> {
  match ImageKind::detect(bytes) {
    Some(ImageKind::Bmp) => Ok(bytes.to_vec()),
    Some(ImageKind::Png) => png_to_bmp(codec, bytes),
    None => Err(ContainerError::UnknownFormat),
  }
}

/// Re-encodes a PNG with a different pixel layout, keeping the resolution.
///
/// If the PNG already has that layout it's returned unchanged.
///
/// ## Failure
/// * [`ContainerError::UnsupportedPixelLayout`] if `layout` isn't `Gray8`,
///   `Rgb24`, or `Rgba32`.
/// * [`ContainerError::UnknownFormat`] if the input isn't a PNG.
/// * [`ContainerError::Codec`]
pub fn png_set_pixel_layout<C: RasterCodec>(
  codec: &C, png: &[u8], layout: PixelLayout,
) -> Result<Vec<u8>> {
  if !layout.is_encode_target() {
    return Err(ContainerError::UnsupportedPixelLayout);
  }
  require(png, ImageKind::Png)?;
  if png_layout(png)? == Some(layout) {
    return Ok(png.to_vec());
  }
  let res = png_resolution(png)?;
  let out = run_codec(codec, png, ImageKind::Png, ImageKind::Png, layout)?;
  with_png_resolution(out, res)
}

/// Re-encodes a BMP with a different pixel layout, keeping the resolution.
///
/// Same rules as [`png_set_pixel_layout`].
pub fn bmp_set_pixel_layout<C: RasterCodec>(
  codec: &C, bmp: &[u8], layout: PixelLayout,
) -> Result<Vec<u8>> {
  if !layout.is_encode_target() {
    return Err(ContainerError::UnsupportedPixelLayout);
  }
  require(bmp, ImageKind::Bmp)?;
  if bmp_layout(bmp)? == Some(layout) {
    return Ok(bmp.to_vec());
  }
  let res = bmp_resolution(bmp)?;
  let out = run_codec(codec, bmp, ImageKind::Bmp, ImageKind::Bmp, layout)?;
  with_bmp_resolution(out, Some(res))
}
