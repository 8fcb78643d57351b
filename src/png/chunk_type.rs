use super::*;

/// The four letter type code of a PNG chunk.
///
/// The properties of a chunk type are encoded in the case of each letter: bit
/// 5 (`0x20`) of each byte is a flag. Because of this the property methods
/// here work for *any* type code, registered or not.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
#[allow(missing_docs)]
impl ChunkType {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
  pub const cHRM: Self = Self(*b"cHRM");
  pub const gAMA: Self = Self(*b"gAMA");
  pub const iCCP: Self = Self(*b"iCCP");
  pub const sBIT: Self = Self(*b"sBIT");
  pub const sRGB: Self = Self(*b"sRGB");
  pub const tRNS: Self = Self(*b"tRNS");
  pub const bKGD: Self = Self(*b"bKGD");
  pub const hIST: Self = Self(*b"hIST");
  pub const pHYs: Self = Self(*b"pHYs");
  pub const sPLT: Self = Self(*b"sPLT");
  pub const pCAL: Self = Self(*b"pCAL");
  pub const tIME: Self = Self(*b"tIME");
  pub const tEXt: Self = Self(*b"tEXt");
  pub const zTXt: Self = Self(*b"zTXt");
  pub const iTXt: Self = Self(*b"iTXt");
}
impl ChunkType {
  const PROPERTY_BIT: u8 = 0x20;

  /// The type code as a big-endian `u32` (eg: `IHDR` is `0x4948_4452`).
  #[inline]
  #[must_use]
  pub const fn code(self) -> u32 {
    u32::from_be_bytes(self.0)
  }

  /// Makes a type from its big-endian `u32` code.
  #[inline]
  #[must_use]
  pub const fn from_code(code: u32) -> Self {
    Self(code.to_be_bytes())
  }

  /// Critical chunks (uppercase first letter) are needed to show the image.
  ///
  /// A decoder that finds an unknown critical chunk can't safely continue,
  /// while an unknown ancillary chunk can be ignored.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & Self::PROPERTY_BIT) == 0
  }

  /// Public chunks (uppercase second letter) are part of the PNG spec or a
  /// registered extension, rather than private to some application.
  #[inline]
  #[must_use]
  pub const fn is_public(self) -> bool {
    (self.0[1] & Self::PROPERTY_BIT) == 0
  }

  /// The third letter must currently be uppercase.
  #[inline]
  #[must_use]
  pub const fn is_reserved_bit_valid(self) -> bool {
    (self.0[2] & Self::PROPERTY_BIT) == 0
  }

  /// Safe-to-copy chunks (lowercase fourth letter) can be carried over by an
  /// editor that modifies the image without understanding the chunk.
  #[inline]
  #[must_use]
  pub const fn is_safe_to_copy(self) -> bool {
    (self.0[3] & Self::PROPERTY_BIT) != 0
  }

  /// If all four bytes are ascii letters, which the PNG format requires.
  #[inline]
  #[must_use]
  pub const fn is_well_formed(self) -> bool {
    self.0[0].is_ascii_alphabetic()
      && self.0[1].is_ascii_alphabetic()
      && self.0[2].is_ascii_alphabetic()
      && self.0[3].is_ascii_alphabetic()
  }
}
impl core::fmt::Debug for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Display::fmt(&AsciiArray(self.0), f)
  }
}
impl core::fmt::Display for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Display::fmt(&AsciiArray(self.0), f)
  }
}
impl From<[u8; 4]> for ChunkType {
  #[inline]
  #[must_use]
  fn from(a: [u8; 4]) -> Self {
    Self(a)
  }
}
