use super::*;
use crate::{resolution::dpm_to_dpi, PixelLayout, Resolution};
use alloc::vec::Vec;

/// A chunk with no structure given to its data.
///
/// Every chunk type that doesn't have its own record type uses this, as do
/// unregistered chunks when they're kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericChunk {
  ty: ChunkType,
  data: Vec<u8>,
}
impl GenericChunk {
  /// Makes a chunk of any type.
  #[inline]
  #[must_use]
  pub fn new(ty: ChunkType, data: Vec<u8>) -> Self {
    Self { ty, data }
  }
  /// The chunk's type.
  #[inline]
  #[must_use]
  pub const fn ty(&self) -> ChunkType {
    self.ty
  }
  /// The chunk's data.
  #[inline]
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.data
  }
  /// Mutable access to the data. The CRC is always computed from the current
  /// data when the chunk is written, so there's nothing to keep in sync.
  #[inline]
  #[must_use]
  pub fn data_mut(&mut self) -> &mut Vec<u8> {
    &mut self.data
  }
}

/// Reads a fixed layout chunk record that must use all of `data`.
#[inline]
fn pull_exact_record<T: bytemuck::Pod>(data: &[u8]) -> Result<T> {
  match try_pull_pod::<T>(data) {
    Ok((record, [])) => Ok(record),
    _ => Err(ContainerError::IncorrectChunkLength),
  }
}

/// `IHDR`: Image header
///
/// The 13 data bytes, exactly as they appear in the chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub struct Ihdr {
  width: U32BE,
  height: U32BE,
  bit_depth: u8,
  color_type: u8,
  compression_method: u8,
  filter_method: u8,
  interlace_method: u8,
}
impl Ihdr {
  /// Byte length of the chunk data.
  pub const LEN: usize = 13;

  /// Makes a header from all the fields.
  #[inline]
  #[must_use]
  pub const fn new(
    width: u32, height: u32, bit_depth: u8, color_type: u8, compression_method: u8,
    filter_method: u8, interlace_method: u8,
  ) -> Self {
    Self {
      width: U32BE::new(width),
      height: U32BE::new(height),
      bit_depth,
      color_type,
      compression_method,
      filter_method,
      interlace_method,
    }
  }
  /// The raw data bytes.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    bytemuck::bytes_of(self)
  }
  #[inline]
  #[must_use]
  #[allow(missing_docs)]
  pub const fn width(&self) -> u32 {
    self.width.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_width(&mut self, width: u32) {
    self.width = width.into();
  }
  #[inline]
  #[must_use]
  #[allow(missing_docs)]
  pub const fn height(&self) -> u32 {
    self.height.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_height(&mut self, height: u32) {
    self.height = height.into();
  }
  /// Bits per channel (or per palette index).
  #[inline]
  #[must_use]
  pub const fn bit_depth(&self) -> u8 {
    self.bit_depth
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_bit_depth(&mut self, bit_depth: u8) {
    self.bit_depth = bit_depth;
  }
  /// 0 = greyscale, 2 = RGB, 3 = indexed, 4 = greyscale alpha, 6 = RGBA.
  #[inline]
  #[must_use]
  pub const fn color_type(&self) -> u8 {
    self.color_type
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_color_type(&mut self, color_type: u8) {
    self.color_type = color_type;
  }
  /// Always 0 (zlib) in valid files.
  #[inline]
  #[must_use]
  pub const fn compression_method(&self) -> u8 {
    self.compression_method
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_compression_method(&mut self, method: u8) {
    self.compression_method = method;
  }
  /// Always 0 (adaptive filtering) in valid files.
  #[inline]
  #[must_use]
  pub const fn filter_method(&self) -> u8 {
    self.filter_method
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_filter_method(&mut self, method: u8) {
    self.filter_method = method;
  }
  /// 0 = not interlaced, 1 = Adam7.
  #[inline]
  #[must_use]
  pub const fn interlace_method(&self) -> u8 {
    self.interlace_method
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_interlace_method(&mut self, method: u8) {
    self.interlace_method = method;
  }
  /// The pixel layout hint for this header's color type.
  #[inline]
  #[must_use]
  pub const fn pixel_layout(&self) -> Option<PixelLayout> {
    PixelLayout::from_png_color_type(self.color_type)
  }
}
impl TryFrom<&[u8]> for Ihdr {
  type Error = ContainerError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self> {
    pull_exact_record(data)
  }
}

/// `pHYs`: Physical pixel dimensions
///
/// Pixels per unit on X and Y, then a unit specifier byte. Unit 1 means the
/// unit is the meter, unit 0 means the values only give an aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub struct Phys {
  ppu_x: U32BE,
  ppu_y: U32BE,
  unit: u8,
}
impl Phys {
  /// Byte length of the chunk data.
  pub const LEN: usize = 9;
  /// The unit specifier for "no unit, aspect ratio only".
  pub const UNIT_UNKNOWN: u8 = 0;
  /// The unit specifier for meters.
  pub const UNIT_METER: u8 = 1;

  /// Makes a `pHYs` from all the fields.
  #[inline]
  #[must_use]
  pub const fn new(ppu_x: u32, ppu_y: u32, unit: u8) -> Self {
    Self { ppu_x: U32BE::new(ppu_x), ppu_y: U32BE::new(ppu_y), unit }
  }
  /// Makes a meter based `pHYs` for the resolution.
  #[inline]
  #[must_use]
  pub fn from_resolution(res: Resolution) -> Self {
    let (x, y) = res.to_dpm();
    Self::new(x, y, Self::UNIT_METER)
  }
  /// Makes a meter based `pHYs` for the given dots per inch.
  #[inline]
  #[must_use]
  pub fn from_dpi(dpi_x: u32, dpi_y: u32) -> Self {
    Self::from_resolution(Resolution::new(dpi_x, dpi_y))
  }
  /// The raw data bytes.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    bytemuck::bytes_of(self)
  }
  /// Pixels per unit, X axis.
  #[inline]
  #[must_use]
  pub const fn ppu_x(&self) -> u32 {
    self.ppu_x.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_ppu_x(&mut self, ppu_x: u32) {
    self.ppu_x = ppu_x.into();
  }
  /// Pixels per unit, Y axis.
  #[inline]
  #[must_use]
  pub const fn ppu_y(&self) -> u32 {
    self.ppu_y.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_ppu_y(&mut self, ppu_y: u32) {
    self.ppu_y = ppu_y.into();
  }
  /// The unit specifier byte.
  #[inline]
  #[must_use]
  pub const fn unit(&self) -> u8 {
    self.unit
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_unit(&mut self, unit: u8) {
    self.unit = unit;
  }
  /// If the unit is the meter.
  #[inline]
  #[must_use]
  pub const fn is_meters(&self) -> bool {
    self.unit == Self::UNIT_METER
  }
  /// Horizontal DPI, or 0 if the unit isn't meters.
  #[inline]
  #[must_use]
  pub fn dpi_x(&self) -> u32 {
    if self.is_meters() {
      dpm_to_dpi(self.ppu_x())
    } else {
      0
    }
  }
  /// Vertical DPI, or 0 if the unit isn't meters.
  #[inline]
  #[must_use]
  pub fn dpi_y(&self) -> u32 {
    if self.is_meters() {
      dpm_to_dpi(self.ppu_y())
    } else {
      0
    }
  }
  /// Both DPI values.
  #[inline]
  #[must_use]
  pub fn resolution(&self) -> Resolution {
    Resolution::new(self.dpi_x(), self.dpi_y())
  }
}
impl TryFrom<&[u8]> for Phys {
  type Error = ContainerError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self> {
    pull_exact_record(data)
  }
}

/// `IDAT`: Image data
///
/// A piece of the zlib compressed image stream. The stream is opaque to this
/// crate.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Idat(Vec<u8>);
impl Idat {
  /// Wraps compressed bytes.
  #[inline]
  #[must_use]
  pub fn new(compressed: Vec<u8>) -> Self {
    Self(compressed)
  }
  /// The compressed bytes.
  #[inline]
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.0
  }
  /// Adds more compressed bytes on the end.
  #[inline]
  pub fn extend_from_slice(&mut self, more: &[u8]) {
    self.0.extend_from_slice(more)
  }
}
impl core::fmt::Debug for Idat {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("Idat").field(&(&self.0[..self.0.len().min(12)], self.0.len())).finish()
  }
}

/// The longest data a chunk can have. The length prefix is a `u32`, but PNG
/// only allows values up to `2**31 - 1`.
pub const PNG_MAX_CHUNK_LEN: usize = i32::MAX as usize;

#[inline]
fn checked_chunk_len(len: usize) -> Result<u32> {
  match u32::try_from(len) {
    Ok(len) if len as usize <= PNG_MAX_CHUNK_LEN => Ok(len),
    _ => Err(ContainerError::IncorrectChunkLength),
  }
}

/// A PNG chunk that owns its data.
///
/// Chunk types with interesting fixed layouts get their own record type, and
/// everything else is [`Generic`](PngChunk::Generic).
///
/// The CRC is never stored. It's checked once when a chunk is read, and after
/// that it's computed from the current type and data whenever it's needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PngChunk {
  /// Image header
  Ihdr(Ihdr),
  /// Physical pixel dimensions
  Phys(Phys),
  /// Image data
  Idat(Idat),
  /// Any other chunk
  Generic(GenericChunk),
}
impl PngChunk {
  /// Makes a chunk from a type and data.
  ///
  /// `IHDR`, `pHYs`, and `IDAT` become their own record types as long as the
  /// data is the right length for that type. Otherwise the chunk is kept as
  /// [`Generic`](PngChunk::Generic).
  #[inline]
  #[must_use]
  pub fn from_data(ty: ChunkType, data: &[u8]) -> Self {
    match ty {
      ChunkType::IHDR => match Ihdr::try_from(data) {
        Ok(ihdr) => return Self::Ihdr(ihdr),
        Err(_) => log::debug!("IHDR with {} data bytes kept as a generic chunk", data.len()),
      },
      ChunkType::pHYs => match Phys::try_from(data) {
        Ok(phys) => return Self::Phys(phys),
        Err(_) => log::debug!("pHYs with {} data bytes kept as a generic chunk", data.len()),
      },
      ChunkType::IDAT => return Self::Idat(Idat::new(data.to_vec())),
      _ => (),
    }
    Self::Generic(GenericChunk::new(ty, data.to_vec()))
  }

  /// Makes a chunk from a raw chunk, checking the CRC.
  ///
  /// ## Failure
  /// * [`ContainerError::ChecksumMismatch`]
  #[inline]
  pub fn try_from_raw(raw: RawPngChunk<'_>) -> Result<Self> {
    if raw.crc_matches() {
      Ok(Self::from_data(raw.ty, raw.data))
    } else {
      log::warn!(
        "{} chunk CRC mismatch: declared {:08X}, actual {:08X}",
        raw.ty,
        raw.declared_crc,
        raw.actual_crc()
      );
      Err(ContainerError::ChecksumMismatch)
    }
  }

  /// Makes a chunk from a record of type, data, then CRC (everything in a
  /// chunk except the length prefix).
  ///
  /// The last 4 bytes are the stored CRC, and everything before them is what
  /// the CRC covers.
  ///
  /// ## Failure
  /// * [`ContainerError::InsufficientBytes`] if there's less than 8 bytes.
  /// * [`ContainerError::ChecksumMismatch`]
  #[inline]
  pub fn from_crc_record(record: &[u8]) -> Result<Self> {
    let crc_start = record.len().checked_sub(4).ok_or(ContainerError::InsufficientBytes)?;
    let (crc_input, crc_bytes) = record.split_at(crc_start);
    let (ty, data) = try_pull_byte_array::<4>(crc_input)?;
    let (declared_crc, _) = try_pull_pod::<U32BE>(crc_bytes)?;
    Self::try_from_raw(RawPngChunk { ty: ChunkType(ty), data, declared_crc: declared_crc.get() })
  }

  /// The chunk's type.
  #[inline]
  #[must_use]
  pub const fn ty(&self) -> ChunkType {
    match self {
      Self::Ihdr(_) => ChunkType::IHDR,
      Self::Phys(_) => ChunkType::pHYs,
      Self::Idat(_) => ChunkType::IDAT,
      Self::Generic(g) => g.ty(),
    }
  }

  /// The chunk's data bytes.
  #[inline]
  #[must_use]
  pub fn data(&self) -> &[u8] {
    match self {
      Self::Ihdr(ihdr) => ihdr.as_bytes(),
      Self::Phys(phys) => phys.as_bytes(),
      Self::Idat(idat) => idat.data(),
      Self::Generic(g) => g.data(),
    }
  }

  /// The CRC of the chunk's type and current data.
  #[inline]
  #[must_use]
  pub fn crc(&self) -> u32 {
    chunk_crc(self.ty(), self.data())
  }

  /// Appends data to the chunk.
  ///
  /// ## Failure
  /// * [`ContainerError::IncorrectChunkLength`] for `IHDR` and `pHYs`, which
  ///   have a fixed length, or if the result would be longer than
  ///   [`PNG_MAX_CHUNK_LEN`].
  #[inline]
  pub fn append_data(&mut self, more: &[u8]) -> Result<()> {
    checked_chunk_len(self.data().len().saturating_add(more.len()))?;
    match self {
      Self::Ihdr(_) | Self::Phys(_) => Err(ContainerError::IncorrectChunkLength),
      Self::Idat(idat) => {
        idat.extend_from_slice(more);
        Ok(())
      }
      Self::Generic(g) => {
        g.data_mut().extend_from_slice(more);
        Ok(())
      }
    }
  }

  /// The number of bytes [`write_to`](Self::write_to) will produce.
  #[inline]
  #[must_use]
  pub fn encoded_len(&self) -> usize {
    CHUNK_OVERHEAD + self.data().len()
  }

  /// Writes out the chunk: length, type, data, CRC.
  ///
  /// The length and CRC are both computed from the current data.
  ///
  /// ## Failure
  /// * [`ContainerError::IncorrectChunkLength`] if the data is longer than
  ///   [`PNG_MAX_CHUNK_LEN`]. Nothing is written in that case.
  #[inline]
  pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
    let data = self.data();
    let len = checked_chunk_len(data.len())?;
    out.reserve(self.encoded_len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&self.ty().0);
    out.extend_from_slice(data);
    out.extend_from_slice(&self.crc().to_be_bytes());
    Ok(())
  }

  /// The chunk as bytes. Fails the same way as [`write_to`](Self::write_to).
  #[inline]
  pub fn to_bytes(&self) -> Result<Vec<u8>> {
    let mut v = Vec::new();
    self.write_to(&mut v)?;
    Ok(v)
  }
}
impl From<Ihdr> for PngChunk {
  #[inline]
  fn from(ihdr: Ihdr) -> Self {
    Self::Ihdr(ihdr)
  }
}
impl From<Phys> for PngChunk {
  #[inline]
  fn from(phys: Phys) -> Self {
    Self::Phys(phys)
  }
}
impl From<Idat> for PngChunk {
  #[inline]
  fn from(idat: Idat) -> Self {
    Self::Idat(idat)
  }
}
impl From<GenericChunk> for PngChunk {
  #[inline]
  fn from(g: GenericChunk) -> Self {
    Self::Generic(g)
  }
}

#[test]
fn test_chunk_len_limit() {
  assert_eq!(checked_chunk_len(0), Ok(0));
  assert_eq!(checked_chunk_len(PNG_MAX_CHUNK_LEN), Ok(0x7FFF_FFFF));
  assert_eq!(checked_chunk_len(PNG_MAX_CHUNK_LEN + 1), Err(ContainerError::IncorrectChunkLength));
  assert_eq!(checked_chunk_len(usize::MAX), Err(ContainerError::IncorrectChunkLength));
}
