use super::*;
use pixel_formats::r8g8b8a8_Srgb;

/// One entry of a bitmap's color table.
///
/// The byte order in the file is blue, green, red, then a reserved byte that
/// should be 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub struct BmpColorEntry {
  /// Blue
  pub blue: u8,
  /// Green
  pub green: u8,
  /// Red
  pub red: u8,
  /// Reserved
  pub reserved: u8,
}
impl BmpColorEntry {
  /// Makes an entry from RGB values, with the reserved byte 0.
  #[inline]
  #[must_use]
  pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
    Self { blue, green, red, reserved: 0 }
  }
}
impl From<BmpColorEntry> for r8g8b8a8_Srgb {
  /// The reserved byte isn't alpha, so the color is always opaque.
  #[inline]
  fn from(e: BmpColorEntry) -> Self {
    r8g8b8a8_Srgb { r: e.red, g: e.green, b: e.blue, a: 0xFF }
  }
}

/// Views color table bytes as entries.
///
/// ## Failure
/// * [`ContainerError::StructuralInconsistency`] if the byte count isn't a
///   multiple of 4.
#[inline]
pub fn color_entries(bytes: &[u8]) -> Result<&[BmpColorEntry]> {
  bytemuck::try_cast_slice(bytes).map_err(|_| ContainerError::StructuralInconsistency)
}

#[test]
fn test_color_entries() {
  let bytes = [1, 2, 3, 0, 4, 5, 6, 0];
  let entries = color_entries(&bytes).unwrap();
  assert_eq!(entries, &[BmpColorEntry::rgb(3, 2, 1), BmpColorEntry::rgb(6, 5, 4)]);
  let c = r8g8b8a8_Srgb::from(entries[1]);
  assert_eq!([c.r, c.g, c.b, c.a], [6, 5, 4, 0xFF]);
  assert_eq!(color_entries(&bytes[..7]), Err(ContainerError::StructuralInconsistency));
}
