use super::*;
use pack1::{I32LE, U16LE, U32LE};

/// A CIE XYZ color, each value a 2.30 fixed point number.
pub type BmpCieXyz = [U32LE; 3];

/// Header for Windows 2.0 and OS/2 1.x images.
///
/// Unlikely to be seen in modern times.
///
/// Corresponds to the the 12 byte `BITMAPCOREHEADER` struct (aka
/// `OS21XBITMAPHEADER`). Width and height are only 16 bits here, and there's
/// no compression or resolution fields at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub struct BmpInfoHeaderCore {
  size: U32LE,
  width: U16LE,
  height: U16LE,
  planes: U16LE,
  bit_count: U16LE,
}

/// Header for Windows 3.1 and later images.
///
/// Corresponds to the 40 byte `BITMAPINFOHEADER` struct. The larger header
/// versions start with these same 40 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub struct BmpInfoHeaderV1 {
  size: U32LE,
  width: I32LE,
  height: I32LE,
  planes: U16LE,
  bit_count: U16LE,
  compression: U32LE,
  image_size: U32LE,
  h_ppm: I32LE,
  v_ppm: I32LE,
  colors_used: U32LE,
  colors_important: U32LE,
}

/// Corresponds to the 108 byte `BITMAPV4HEADER` struct.
///
/// After the first 40 bytes come the channel masks, the color space, the
/// color space endpoints, and the gamma values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub struct BmpInfoHeaderV4 {
  base: BmpInfoHeaderV1,
  red_mask: U32LE,
  green_mask: U32LE,
  blue_mask: U32LE,
  alpha_mask: U32LE,
  color_space_type: U32LE,
  endpoints: [BmpCieXyz; 3],
  gamma_red: U32LE,
  gamma_green: U32LE,
  gamma_blue: U32LE,
}

/// Corresponds to the 124 byte `BITMAPV5HEADER` struct.
///
/// This is the v4 header plus a rendering intent and the location of an ICC
/// profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub struct BmpInfoHeaderV5 {
  v4: BmpInfoHeaderV4,
  intent: U32LE,
  profile_data_offset: U32LE,
  profile_size: U32LE,
  reserved: U32LE,
}

impl BmpInfoHeaderCore {
  /// Byte length of this header version.
  pub const LEN: usize = 12;

  /// Makes a header with the given fields and 1 plane.
  #[inline]
  #[must_use]
  pub fn new(width: i16, height: i16, bit_count: u16) -> Self {
    Self {
      size: (Self::LEN as u32).into(),
      width: (width as u16).into(),
      height: (height as u16).into(),
      planes: 1_u16.into(),
      bit_count: bit_count.into(),
    }
  }
  #[inline]
  #[must_use]
  #[allow(missing_docs)]
  pub fn width(&self) -> i16 {
    self.width.get() as i16
  }
  #[inline]
  #[must_use]
  #[allow(missing_docs)]
  pub fn height(&self) -> i16 {
    self.height.get() as i16
  }
}

impl BmpInfoHeaderV1 {
  /// Byte length of this header version.
  pub const LEN: usize = 40;
  /// Offset of the horizontal pixels-per-meter field within the header.
  pub const H_PPM_OFFSET: usize = 24;
  /// Offset of the vertical pixels-per-meter field within the header.
  pub const V_PPM_OFFSET: usize = 28;

  /// Makes an uncompressed header with the given fields and 1 plane.
  ///
  /// Every other field is 0.
  #[inline]
  #[must_use]
  pub fn new(width: i32, height: i32, bit_count: u16) -> Self {
    let mut h: Self = bytemuck::Zeroable::zeroed();
    h.size = (Self::LEN as u32).into();
    h.width = width.into();
    h.height = height.into();
    h.planes = 1_u16.into();
    h.bit_count = bit_count.into();
    h
  }
  #[inline]
  #[must_use]
  #[allow(missing_docs)]
  pub fn width(&self) -> i32 {
    self.width.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_width(&mut self, width: i32) {
    self.width = width.into();
  }
  /// Height in pixels.
  ///
  /// A negative height means that the image origin is the top left and rows
  /// go down. Otherwise the origin is the bottom left, and rows go up.
  #[inline]
  #[must_use]
  pub fn height(&self) -> i32 {
    self.height.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_height(&mut self, height: i32) {
    self.height = height.into();
  }
  /// The raw compression value. See [`BmpCompression`].
  #[inline]
  #[must_use]
  pub fn compression(&self) -> u32 {
    self.compression.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_compression(&mut self, compression: u32) {
    self.compression = compression.into();
  }
  /// Size of the (compressed) pixel data. Can be 0 for uncompressed images.
  #[inline]
  #[must_use]
  pub fn image_size(&self) -> u32 {
    self.image_size.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_image_size(&mut self, size: u32) {
    self.image_size = size.into();
  }
  /// Horizontal pixels per meter.
  #[inline]
  #[must_use]
  pub fn h_ppm(&self) -> i32 {
    self.h_ppm.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_h_ppm(&mut self, ppm: i32) {
    self.h_ppm = ppm.into();
  }
  /// Vertical pixels per meter.
  #[inline]
  #[must_use]
  pub fn v_ppm(&self) -> i32 {
    self.v_ppm.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_v_ppm(&mut self, ppm: i32) {
    self.v_ppm = ppm.into();
  }
  /// Number of color table entries actually used, 0 means "all of them".
  #[inline]
  #[must_use]
  pub fn colors_used(&self) -> u32 {
    self.colors_used.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_colors_used(&mut self, count: u32) {
    self.colors_used = count.into();
  }
  /// Number of color table entries needed to show the image, 0 means "all of
  /// them".
  #[inline]
  #[must_use]
  pub fn colors_important(&self) -> u32 {
    self.colors_important.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_colors_important(&mut self, count: u32) {
    self.colors_important = count.into();
  }
}

impl BmpInfoHeaderV4 {
  /// Byte length of this header version.
  pub const LEN: usize = 108;

  /// The first 40 bytes.
  #[inline]
  #[must_use]
  pub const fn base(&self) -> &BmpInfoHeaderV1 {
    &self.base
  }
  /// The red, green, blue, and alpha masks, in that order.
  ///
  /// These are only meaningful with bitfield compression.
  #[inline]
  #[must_use]
  pub const fn channel_masks(&self) -> [u32; 4] {
    [self.red_mask.get(), self.green_mask.get(), self.blue_mask.get(), self.alpha_mask.get()]
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_channel_masks(&mut self, [r, g, b, a]: [u32; 4]) {
    self.red_mask = r.into();
    self.green_mask = g.into();
    self.blue_mask = b.into();
    self.alpha_mask = a.into();
  }
  /// The color space tag, such as `sRGB` (stored little-endian, so it reads
  /// backwards in a hex dump).
  #[inline]
  #[must_use]
  pub const fn color_space_type(&self) -> u32 {
    self.color_space_type.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_color_space_type(&mut self, cs_type: u32) {
    self.color_space_type = cs_type.into();
  }
  /// The red, green, and blue endpoints of a calibrated color space.
  #[inline]
  #[must_use]
  pub fn endpoints(&self) -> [[u32; 3]; 3] {
    self.endpoints.map(|xyz| xyz.map(U32LE::get))
  }
  /// Red, green, and blue gamma, 16.16 fixed point.
  #[inline]
  #[must_use]
  pub const fn gamma(&self) -> [u32; 3] {
    [self.gamma_red.get(), self.gamma_green.get(), self.gamma_blue.get()]
  }
}

impl BmpInfoHeaderV5 {
  /// Byte length of this header version.
  pub const LEN: usize = 124;

  /// The first 40 bytes.
  #[inline]
  #[must_use]
  pub const fn base(&self) -> &BmpInfoHeaderV1 {
    &self.v4.base
  }
  /// The v4 part of the header.
  #[inline]
  #[must_use]
  pub const fn v4(&self) -> &BmpInfoHeaderV4 {
    &self.v4
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn v4_mut(&mut self) -> &mut BmpInfoHeaderV4 {
    &mut self.v4
  }
  /// Rendering intent.
  #[inline]
  #[must_use]
  pub const fn intent(&self) -> u32 {
    self.intent.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_intent(&mut self, intent: u32) {
    self.intent = intent.into();
  }
  /// Offset of the ICC profile from the *start of the info header*.
  #[inline]
  #[must_use]
  pub const fn profile_data_offset(&self) -> u32 {
    self.profile_data_offset.get()
  }
  /// Byte size of the ICC profile.
  #[inline]
  #[must_use]
  pub const fn profile_size(&self) -> u32 {
    self.profile_size.get()
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_profile(&mut self, offset: u32, size: u32) {
    self.profile_data_offset = offset.into();
    self.profile_size = size.into();
  }
}

/// One of the supported info header versions.
///
/// The version is picked once, from the size field at the start of the header,
/// and never changes after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BmpInfoHeader {
  /// 12 bytes
  Core(BmpInfoHeaderCore),
  /// 40 bytes
  V1(BmpInfoHeaderV1),
  /// 108 bytes
  V4(BmpInfoHeaderV4),
  /// 124 bytes
  V5(BmpInfoHeaderV5),
}
impl From<BmpInfoHeaderCore> for BmpInfoHeader {
  #[inline]
  fn from(h: BmpInfoHeaderCore) -> Self {
    Self::Core(h)
  }
}
impl From<BmpInfoHeaderV1> for BmpInfoHeader {
  #[inline]
  fn from(h: BmpInfoHeaderV1) -> Self {
    Self::V1(h)
  }
}
impl BmpInfoHeader {
  /// Parses the info header from the bytes after the file header.
  ///
  /// ## Failure
  /// * [`ContainerError::InsufficientBytes`]
  /// * [`ContainerError::InvalidHeaderSize`] if the size field isn't 12, 40,
  ///   108, or 124.
  pub fn try_from_bytes(bytes: &[u8]) -> Result<(Self, &[u8])> {
    let (size, _) = try_pull_pod::<U32LE>(bytes)?;
    match size.get() as usize {
      BmpInfoHeaderCore::LEN => try_pull_pod(bytes).map(|(h, rest)| (Self::Core(h), rest)),
      BmpInfoHeaderV1::LEN => try_pull_pod(bytes).map(|(h, rest)| (Self::V1(h), rest)),
      BmpInfoHeaderV4::LEN => try_pull_pod(bytes).map(|(h, rest)| (Self::V4(h), rest)),
      BmpInfoHeaderV5::LEN => try_pull_pod(bytes).map(|(h, rest)| (Self::V5(h), rest)),
      other => {
        log::warn!("unknown BMP info header size: {other}");
        Err(ContainerError::InvalidHeaderSize)
      }
    }
  }

  /// Byte length of this header's version.
  #[inline]
  #[must_use]
  pub const fn byte_len(&self) -> usize {
    match self {
      Self::Core(_) => BmpInfoHeaderCore::LEN,
      Self::V1(_) => BmpInfoHeaderV1::LEN,
      Self::V4(_) => BmpInfoHeaderV4::LEN,
      Self::V5(_) => BmpInfoHeaderV5::LEN,
    }
  }

  /// The header's bytes.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    match self {
      Self::Core(h) => bytemuck::bytes_of(h),
      Self::V1(h) => bytemuck::bytes_of(h),
      Self::V4(h) => bytemuck::bytes_of(h),
      Self::V5(h) => bytemuck::bytes_of(h),
    }
  }

  #[inline]
  fn size_field(&self) -> U32LE {
    match self {
      Self::Core(h) => h.size,
      Self::V1(h) => h.size,
      Self::V4(h) => h.base.size,
      Self::V5(h) => h.v4.base.size,
    }
  }

  /// The size field stored in the header.
  #[inline]
  #[must_use]
  pub fn declared_size(&self) -> u32 {
    self.size_field().get()
  }

  /// Overwrites the size field. This doesn't change the header's version.
  #[inline]
  pub fn set_declared_size(&mut self, size: u32) {
    let size = size.into();
    match self {
      Self::Core(h) => h.size = size,
      Self::V1(h) => h.size = size,
      Self::V4(h) => h.base.size = size,
      Self::V5(h) => h.v4.base.size = size,
    }
  }

  /// If the stored size field still matches the header's version.
  #[inline]
  #[must_use]
  pub fn is_internally_valid(&self) -> bool {
    self.declared_size() as usize == self.byte_len()
  }

  /// The 40 byte part of the header, if this isn't the core version.
  #[inline]
  #[must_use]
  pub fn extended(&self) -> Option<&BmpInfoHeaderV1> {
    match self {
      Self::Core(_) => None,
      Self::V1(h) => Some(h),
      Self::V4(h) => Some(&h.base),
      Self::V5(h) => Some(h.base()),
    }
  }

  #[inline]
  fn try_extended(&self) -> Result<&BmpInfoHeaderV1> {
    self.extended().ok_or(ContainerError::UnsupportedOperation)
  }

  #[inline]
  fn try_extended_mut(&mut self) -> Result<&mut BmpInfoHeaderV1> {
    match self {
      Self::Core(_) => Err(ContainerError::UnsupportedOperation),
      Self::V1(h) => Ok(h),
      Self::V4(h) => Ok(&mut h.base),
      Self::V5(h) => Ok(&mut h.v4.base),
    }
  }

  /// Width in pixels.
  #[inline]
  #[must_use]
  pub fn width(&self) -> i32 {
    match self {
      Self::Core(h) => i32::from(h.width()),
      _ => self.extended().map_or(0, BmpInfoHeaderV1::width),
    }
  }

  /// Height in pixels. Negative means the rows are stored top down.
  #[inline]
  #[must_use]
  pub fn height(&self) -> i32 {
    match self {
      Self::Core(h) => i32::from(h.height()),
      _ => self.extended().map_or(0, BmpInfoHeaderV1::height),
    }
  }

  /// Sets the width.
  ///
  /// ## Failure
  /// * [`ContainerError::InvalidDimensions`] if the value doesn't fit in a
  ///   core header's 16 bits.
  #[inline]
  pub fn set_width(&mut self, width: i32) -> Result<()> {
    match self {
      Self::Core(h) => {
        h.width = (i16::try_from(width).map_err(|_| ContainerError::InvalidDimensions)? as u16).into()
      }
      _ => self.try_extended_mut()?.set_width(width),
    }
    Ok(())
  }

  /// Sets the height. Same failure as [`set_width`](Self::set_width).
  #[inline]
  pub fn set_height(&mut self, height: i32) -> Result<()> {
    match self {
      Self::Core(h) => {
        h.height =
          (i16::try_from(height).map_err(|_| ContainerError::InvalidDimensions)? as u16).into()
      }
      _ => self.try_extended_mut()?.set_height(height),
    }
    Ok(())
  }

  /// Number of color planes, which should always be 1.
  #[inline]
  #[must_use]
  pub fn planes(&self) -> u16 {
    match self {
      Self::Core(h) => h.planes.get(),
      _ => self.extended().map_or(0, |h| h.planes.get()),
    }
  }

  /// Bits per pixel.
  #[inline]
  #[must_use]
  pub fn bit_count(&self) -> u16 {
    match self {
      Self::Core(h) => h.bit_count.get(),
      _ => self.extended().map_or(0, |h| h.bit_count.get()),
    }
  }

  /// Sets the bits per pixel.
  #[inline]
  pub fn set_bit_count(&mut self, bit_count: u16) {
    let bit_count = bit_count.into();
    match self {
      Self::Core(h) => h.bit_count = bit_count,
      Self::V1(h) => h.bit_count = bit_count,
      Self::V4(h) => h.base.bit_count = bit_count,
      Self::V5(h) => h.v4.base.bit_count = bit_count,
    }
  }

  /// The raw compression value.
  ///
  /// ## Failure
  /// All of the extended field accessors give
  /// [`ContainerError::UnsupportedOperation`] on a core header.
  #[inline]
  pub fn compression(&self) -> Result<u32> {
    self.try_extended().map(BmpInfoHeaderV1::compression)
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_compression(&mut self, compression: BmpCompression) -> Result<()> {
    self.try_extended_mut().map(|h| h.set_compression(compression.into()))
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn image_size(&self) -> Result<u32> {
    self.try_extended().map(BmpInfoHeaderV1::image_size)
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_image_size(&mut self, size: u32) -> Result<()> {
    self.try_extended_mut().map(|h| h.set_image_size(size))
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn h_ppm(&self) -> Result<i32> {
    self.try_extended().map(BmpInfoHeaderV1::h_ppm)
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_h_ppm(&mut self, ppm: i32) -> Result<()> {
    self.try_extended_mut().map(|h| h.set_h_ppm(ppm))
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn v_ppm(&self) -> Result<i32> {
    self.try_extended().map(BmpInfoHeaderV1::v_ppm)
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_v_ppm(&mut self, ppm: i32) -> Result<()> {
    self.try_extended_mut().map(|h| h.set_v_ppm(ppm))
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn colors_used(&self) -> Result<u32> {
    self.try_extended().map(BmpInfoHeaderV1::colors_used)
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_colors_used(&mut self, count: u32) -> Result<()> {
    self.try_extended_mut().map(|h| h.set_colors_used(count))
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn colors_important(&self) -> Result<u32> {
    self.try_extended().map(BmpInfoHeaderV1::colors_important)
  }
  #[inline]
  #[allow(missing_docs)]
  pub fn set_colors_important(&mut self, count: u32) -> Result<()> {
    self.try_extended_mut().map(|h| h.set_colors_important(count))
  }

  /// The resolution in dots per inch. Negative pixels-per-meter values are
  /// treated as 0.
  #[inline]
  pub fn resolution(&self) -> Result<Resolution> {
    let h = self.try_extended()?;
    let x = u32::try_from(h.h_ppm()).unwrap_or(0);
    let y = u32::try_from(h.v_ppm()).unwrap_or(0);
    Ok(Resolution::from_dpm(x, y))
  }

  /// Sets both pixels-per-meter fields from dots per inch.
  #[inline]
  pub fn set_resolution(&mut self, res: Resolution) -> Result<()> {
    let (x, y) = res.to_dpm();
    let h = self.try_extended_mut()?;
    h.set_h_ppm(i32::try_from(x)?);
    h.set_v_ppm(i32::try_from(y)?);
    Ok(())
  }

  /// Number of color table entries: `2**bit_count` when the bit count is 8
  /// or less, otherwise 0.
  #[inline]
  #[must_use]
  pub fn color_table_len(&self) -> usize {
    let bit_count = self.bit_count();
    if bit_count <= 8 {
      1 << bit_count
    } else {
      0
    }
  }

  /// Byte length of the color table, 4 bytes per entry.
  #[inline]
  #[must_use]
  pub fn color_table_byte_len(&self) -> usize {
    self.color_table_len() * core::mem::size_of::<BmpColorEntry>()
  }

  /// The pixel layout hint for this header's bit count.
  #[inline]
  #[must_use]
  pub fn pixel_layout(&self) -> Option<PixelLayout> {
    PixelLayout::from_bmp_bit_count(self.bit_count())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn header_bytes(size: u32) -> [u8; 124] {
    let mut a = [0_u8; 124];
    a[0..4].copy_from_slice(&size.to_le_bytes());
    a
  }

  #[test]
  fn test_struct_sizes() {
    use core::mem::size_of;
    assert_eq!(size_of::<BmpInfoHeaderCore>(), BmpInfoHeaderCore::LEN);
    assert_eq!(size_of::<BmpInfoHeaderV1>(), BmpInfoHeaderV1::LEN);
    assert_eq!(size_of::<BmpInfoHeaderV4>(), BmpInfoHeaderV4::LEN);
    assert_eq!(size_of::<BmpInfoHeaderV5>(), BmpInfoHeaderV5::LEN);
  }

  #[test]
  fn test_dispatch_by_declared_size() {
    for (size, rest_len) in [(12, 112), (40, 84), (108, 16), (124, 0)] {
      let a = header_bytes(size);
      let (h, rest) = BmpInfoHeader::try_from_bytes(&a).unwrap();
      assert_eq!(h.byte_len(), size as usize);
      assert_eq!(rest.len(), rest_len);
      assert!(h.is_internally_valid());
    }
    for size in [0, 16, 52, 56, 64, 123, 125] {
      let a = header_bytes(size);
      assert_eq!(BmpInfoHeader::try_from_bytes(&a), Err(ContainerError::InvalidHeaderSize));
    }
    assert_eq!(BmpInfoHeader::try_from_bytes(&[40, 0]), Err(ContainerError::InsufficientBytes));
  }

  #[test]
  fn test_core_header_fields() {
    let a = [12, 0, 0, 0, 0xFE, 0xFF, 3, 0, 1, 0, 8, 0];
    let (mut h, _) = BmpInfoHeader::try_from_bytes(&a).unwrap();
    assert_eq!(h.width(), -2);
    assert_eq!(h.height(), 3);
    assert_eq!(h.planes(), 1);
    assert_eq!(h.bit_count(), 8);
    assert_eq!(h.color_table_len(), 256);
    assert_eq!(h.compression(), Err(ContainerError::UnsupportedOperation));
    assert_eq!(h.h_ppm(), Err(ContainerError::UnsupportedOperation));
    assert_eq!(h.set_image_size(0), Err(ContainerError::UnsupportedOperation));
    assert_eq!(h.resolution(), Err(ContainerError::UnsupportedOperation));
    assert_eq!(h.set_width(40_000), Err(ContainerError::InvalidDimensions));
    h.set_width(7).unwrap();
    assert_eq!(h.as_bytes()[4..6], [7, 0]);
  }

  #[test]
  fn test_v4_v5_named_fields() {
    let mut a = header_bytes(124);
    let masks_and_cs = [0x00FF_0000_u32, 0xFF00, 0xFF, 0xFF00_0000, 0x7352_4742];
    for (i, v) in masks_and_cs.into_iter().enumerate() {
      a[40 + 4 * i..44 + 4 * i].copy_from_slice(&v.to_le_bytes());
    }
    a[60..64].copy_from_slice(&1_u32.to_le_bytes());
    a[92..96].copy_from_slice(&9_u32.to_le_bytes());
    a[104..108].copy_from_slice(&2_u32.to_le_bytes());
    a[108..112].copy_from_slice(&4_u32.to_le_bytes());
    a[112..116].copy_from_slice(&124_u32.to_le_bytes());
    a[116..120].copy_from_slice(&16_u32.to_le_bytes());
    let (h, _) = BmpInfoHeader::try_from_bytes(&a).unwrap();
    let BmpInfoHeader::V5(mut v5) = h else { panic!("expected a v5 header, got {h:?}") };
    assert_eq!(v5.v4().channel_masks(), [0x00FF_0000, 0xFF00, 0xFF, 0xFF00_0000]);
    assert_eq!(v5.v4().color_space_type(), 0x7352_4742);
    assert_eq!(v5.v4().endpoints(), [[1, 0, 0], [0, 0, 0], [0, 0, 9]]);
    assert_eq!(v5.v4().gamma(), [0, 0, 2]);
    assert_eq!(v5.intent(), 4);
    assert_eq!(v5.profile_data_offset(), 124);
    assert_eq!(v5.profile_size(), 16);

    v5.v4_mut().set_channel_masks([1, 2, 3, 4]);
    v5.set_profile(0, 0);
    let b = bytemuck::bytes_of(&v5);
    assert_eq!(b[52..56], 4_u32.to_le_bytes());
    assert_eq!(b[112..120], [0; 8]);
    assert_eq!(b[..40], a[..40]);
  }

  #[test]
  fn test_v5_keeps_its_extra_bytes() {
    let mut a = header_bytes(124);
    a[40] = 0xAA;
    a[123] = 0xBB;
    let (mut h, _) = BmpInfoHeader::try_from_bytes(&a).unwrap();
    h.set_resolution(Resolution::square(96)).unwrap();
    assert_eq!(h.h_ppm(), Ok(3780));
    assert_eq!(h.as_bytes()[40], 0xAA);
    assert_eq!(h.as_bytes()[123], 0xBB);
    h.set_declared_size(40);
    assert!(!h.is_internally_valid());
    assert_eq!(h.byte_len(), 124);
  }
}
