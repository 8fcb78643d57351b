use super::*;
use pack1::{U16LE, U32LE};

/// The header at the start of all BMP files.
///
/// This is the 14 bytes exactly as they appear in the file, with accessor
/// methods for each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub struct BmpFileHeader {
  tag: [u8; 2],
  total_file_size: U32LE,
  reserved1: U16LE,
  reserved2: U16LE,
  pixel_data_offset: U32LE,
}
impl Default for BmpFileHeader {
  /// A `BM` header with every other field 0.
  #[inline]
  fn default() -> Self {
    let mut h: Self = bytemuck::Zeroable::zeroed();
    h.tag = BMP_TAG.0;
    h
  }
}
impl BmpFileHeader {
  /// Byte length of the file header.
  pub const LEN: usize = 14;

  /// Tries to get the file header and remaining bytes from the bytes of a BMP
  /// file.
  ///
  /// The bytes from here should be used to get the [`BmpInfoHeader`].
  ///
  /// ## Failure
  /// * [`ContainerError::InsufficientBytes`]
  #[inline]
  pub fn try_from_bytes(bytes: &[u8]) -> Result<(Self, &[u8])> {
    try_pull_pod::<Self>(bytes)
  }

  /// The header's bytes.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    bytemuck::bytes_of(self)
  }

  /// This is expected to be `BM`. Other tags exist (OS/2 arrays, icons and
  /// pointers) but aren't Windows bitmaps.
  #[inline]
  #[must_use]
  pub const fn tag(&self) -> AsciiArray<2> {
    AsciiArray(self.tag)
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_tag(&mut self, tag: AsciiArray<2>) {
    self.tag = tag.0;
  }

  /// If the tag is `BM`.
  #[inline]
  #[must_use]
  pub fn is_valid(&self) -> bool {
    self.tag == BMP_TAG.0
  }

  /// The total size of the file.
  ///
  /// If this doesn't match the actual size of the file, there might be some
  /// sort of data loss or corruption.
  #[inline]
  #[must_use]
  pub fn total_file_size(&self) -> u32 {
    self.total_file_size.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_total_file_size(&mut self, size: u32) {
    self.total_file_size = size.into();
  }

  #[inline]
  #[must_use]
  #[allow(missing_docs)]
  pub fn reserved1(&self) -> u16 {
    self.reserved1.get()
  }
  #[inline]
  #[must_use]
  #[allow(missing_docs)]
  pub fn reserved2(&self) -> u16 {
    self.reserved2.get()
  }

  /// The byte index within the file where the bitmap data starts.
  #[inline]
  #[must_use]
  pub fn pixel_data_offset(&self) -> u32 {
    self.pixel_data_offset.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_pixel_data_offset(&mut self, offset: u32) {
    self.pixel_data_offset = offset.into();
  }
}

#[test]
fn test_file_header_layout() {
  assert_eq!(core::mem::size_of::<BmpFileHeader>(), BmpFileHeader::LEN);
  let bytes = [b'B', b'M', 0x46, 0, 0, 0, 1, 0, 2, 0, 0x36, 0, 0, 0, 0xFF];
  let (h, rest) = BmpFileHeader::try_from_bytes(&bytes).unwrap();
  assert!(h.is_valid());
  assert_eq!(h.total_file_size(), 0x46);
  assert_eq!(h.reserved1(), 1);
  assert_eq!(h.reserved2(), 2);
  assert_eq!(h.pixel_data_offset(), 54);
  assert_eq!(rest, &[0xFF]);
  assert_eq!(h.as_bytes(), &bytes[..14]);
  assert_eq!(BmpFileHeader::try_from_bytes(&bytes[..13]), Err(ContainerError::InsufficientBytes));
}
