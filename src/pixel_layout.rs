//! A coarse description of how pixels are stored.
//!
//! This is only ever used as a *hint*: it's read from container headers and
//! handed to a raster codec, this crate never looks at the pixels themselves.

/// The pixel layouts that the two container formats commonly use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PixelLayout {
  /// 1 bit palette indexes.
  Indexed1,
  /// 4 bit palette indexes.
  Indexed4,
  /// 8 bit palette indexes.
  Indexed8,
  /// 8 bit greyscale.
  Gray8,
  /// 8 bit greyscale plus 8 bit alpha.
  GrayAlpha16,
  /// 16 bit packed RGB (5-5-5 or 5-6-5).
  Rgb16,
  /// 8 bits per channel RGB (BMP stores this as BGR).
  Rgb24,
  /// 8 bits per channel RGBA (BMP stores this as BGRA).
  Rgba32,
}
impl PixelLayout {
  /// Picks the layout from a PNG `IHDR` color type.
  ///
  /// Greyscale maps to [`Gray8`](Self::Gray8) regardless of the bit depth.
  #[inline]
  #[must_use]
  pub const fn from_png_color_type(color_type: u8) -> Option<Self> {
    Some(match color_type {
      0 => Self::Gray8,
      2 => Self::Rgb24,
      3 => Self::Indexed8,
      4 => Self::GrayAlpha16,
      6 => Self::Rgba32,
      _ => return None,
    })
  }

  /// Picks the layout from a BMP info header bit count.
  #[inline]
  #[must_use]
  pub const fn from_bmp_bit_count(bit_count: u16) -> Option<Self> {
    Some(match bit_count {
      1 => Self::Indexed1,
      4 => Self::Indexed4,
      8 => Self::Indexed8,
      16 => Self::Rgb16,
      24 => Self::Rgb24,
      32 => Self::Rgba32,
      _ => return None,
    })
  }

  /// Bits used per pixel.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(self) -> u16 {
    match self {
      Self::Indexed1 => 1,
      Self::Indexed4 => 4,
      Self::Indexed8 | Self::Gray8 => 8,
      Self::GrayAlpha16 | Self::Rgb16 => 16,
      Self::Rgb24 => 24,
      Self::Rgba32 => 32,
    }
  }

  /// If a raster codec can be asked to re-encode into this layout.
  #[inline]
  #[must_use]
  pub const fn is_encode_target(self) -> bool {
    matches!(self, Self::Gray8 | Self::Rgb24 | Self::Rgba32)
  }
}
