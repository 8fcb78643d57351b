use super::*;
use crate::try_split_at;
use alloc::vec::Vec;

/// A parsed Windows bitmap.
///
/// Parsing only splits the bytes into their parts. Call
/// [`validate`](Self::validate) to check that the parts agree with each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bmp {
  file_header: BmpFileHeader,
  info_header: BmpInfoHeader,
  color_table: Option<Vec<BmpColorEntry>>,
  pixels: Vec<u8>,
}
impl Bmp {
  /// Splits BMP bytes into headers, color table, and pixel data.
  ///
  /// * The color table is read right after the info header when the bit count
  ///   is 8 or less.
  /// * The pixel data is everything from the file header's data offset to the
  ///   end of the bytes.
  ///
  /// ## Failure
  /// * [`ContainerError::InsufficientBytes`] if any part is cut off.
  /// * [`ContainerError::InvalidHeaderSize`] for an unknown info header size.
  pub fn parse(bytes: &[u8]) -> Result<Self> {
    let (file_header, rest) = BmpFileHeader::try_from_bytes(bytes)?;
    let (info_header, rest) = BmpInfoHeader::try_from_bytes(rest)?;
    log::trace!(
      "BMP {}x{} at {} bpp with a {} byte info header",
      info_header.width(),
      info_header.height(),
      info_header.bit_count(),
      info_header.byte_len()
    );
    let color_table = if info_header.bit_count() <= 8 {
      let (table, _) = try_split_at(rest, info_header.color_table_byte_len())?;
      Some(color_entries(table)?.to_vec())
    } else {
      None
    };
    let offset = usize::try_from(file_header.pixel_data_offset())?;
    let pixels = match bytes.get(offset..) {
      Some(pixels) => pixels.to_vec(),
      None => {
        log::warn!("BMP data offset {offset} is past the end of {} bytes", bytes.len());
        return Err(ContainerError::InsufficientBytes);
      }
    };
    Ok(Self { file_header, info_header, color_table, pixels })
  }

  /// Builds a bitmap with a 40 byte info header and no compression.
  ///
  /// Bit counts of 8 or less get a grayscale color table. The data offset and
  /// file size are filled in to match.
  ///
  /// ## Failure
  /// * [`ContainerError::InvalidDimensions`] if the width, height, or bit count
  ///   isn't positive.
  /// * [`ContainerError::StructuralInconsistency`] if the file would be more
  ///   than 4GB.
  pub fn new(width: i32, height: i32, bit_count: u16, pixels: Vec<u8>) -> Result<Self> {
    if width <= 0 || height <= 0 || bit_count == 0 {
      return Err(ContainerError::InvalidDimensions);
    }
    let info_header = BmpInfoHeader::V1(BmpInfoHeaderV1::new(width, height, bit_count));
    let color_table = if bit_count <= 8 {
      let last = info_header.color_table_len() - 1;
      Some(
        (0..=last)
          .map(|i| {
            let v = (i * 255 / last.max(1)) as u8;
            BmpColorEntry::rgb(v, v, v)
          })
          .collect(),
      )
    } else {
      None
    };
    let mut bmp = Self { file_header: BmpFileHeader::default(), info_header, color_table, pixels };
    bmp.update_layout_fields()?;
    Ok(bmp)
  }

  /// Sets the data offset and file size from the current parts.
  pub fn update_layout_fields(&mut self) -> Result<()> {
    let offset = u32::try_from(self.expected_data_offset())?;
    let total = offset
      .checked_add(u32::try_from(self.pixels.len())?)
      .ok_or(ContainerError::StructuralInconsistency)?;
    self.file_header.set_pixel_data_offset(offset);
    self.file_header.set_total_file_size(total);
    Ok(())
  }

  #[inline]
  fn color_table_byte_len(&self) -> usize {
    self.color_table.as_ref().map_or(0, |t| t.len() * core::mem::size_of::<BmpColorEntry>())
  }

  #[inline]
  fn expected_data_offset(&self) -> usize {
    BmpFileHeader::LEN + self.info_header.byte_len() + self.color_table_byte_len()
  }

  #[inline]
  #[must_use]
  #[allow(missing_docs)]
  pub const fn file_header(&self) -> &BmpFileHeader {
    &self.file_header
  }
  /// Mutable access to the file header. Nothing is kept in sync for you.
  #[inline]
  #[must_use]
  pub fn file_header_mut(&mut self) -> &mut BmpFileHeader {
    &mut self.file_header
  }
  #[inline]
  #[must_use]
  #[allow(missing_docs)]
  pub const fn info_header(&self) -> &BmpInfoHeader {
    &self.info_header
  }
  /// Mutable access to the info header. Nothing is kept in sync for you.
  #[inline]
  #[must_use]
  pub fn info_header_mut(&mut self) -> &mut BmpInfoHeader {
    &mut self.info_header
  }

  /// The color table entries, if there's a color table.
  #[inline]
  #[must_use]
  pub fn color_table(&self) -> Option<&[BmpColorEntry]> {
    self.color_table.as_deref()
  }

  /// The color table as it appears in the file.
  #[inline]
  #[must_use]
  pub fn color_table_bytes(&self) -> Option<&[u8]> {
    self.color_table.as_deref().map(bytemuck::cast_slice)
  }

  /// The pixel data bytes. These are never decoded.
  #[inline]
  #[must_use]
  pub fn pixel_data(&self) -> &[u8] {
    &self.pixels
  }

  /// Replaces the pixel data, updating the data offset and file size.
  #[inline]
  pub fn set_pixel_data(&mut self, pixels: Vec<u8>) -> Result<()> {
    self.pixels = pixels;
    self.update_layout_fields()
  }

  #[inline]
  #[must_use]
  #[allow(missing_docs)]
  pub fn width(&self) -> i32 {
    self.info_header.width()
  }
  #[inline]
  #[must_use]
  #[allow(missing_docs)]
  pub fn height(&self) -> i32 {
    self.info_header.height()
  }
  #[inline]
  #[must_use]
  #[allow(missing_docs)]
  pub fn bit_count(&self) -> u16 {
    self.info_header.bit_count()
  }
  /// The pixel layout hint for the bit count.
  #[inline]
  #[must_use]
  pub fn pixel_layout(&self) -> Option<PixelLayout> {
    self.info_header.pixel_layout()
  }

  /// The resolution, 0 on any axis that isn't set.
  #[inline]
  #[must_use]
  pub fn resolution(&self) -> Resolution {
    self.info_header.resolution().unwrap_or_default()
  }

  /// Sets the resolution.
  ///
  /// ## Failure
  /// * [`ContainerError::UnsupportedOperation`] with a 12 byte info header.
  #[inline]
  pub fn set_resolution(&mut self, res: Resolution) -> Result<()> {
    log::debug!("setting BMP resolution to {res:?}");
    self.info_header.set_resolution(res)
  }

  /// Checks that all the parts agree with each other.
  ///
  /// The checks happen in this order, and the first one that fails gives the
  /// error:
  /// 1. The tag is `BM` ([`InvalidSignature`](ContainerError::InvalidSignature)).
  /// 2. The data offset is right after the headers and color table
  ///    ([`StructuralInconsistency`](ContainerError::StructuralInconsistency)).
  /// 3. The file size is the data offset plus the pixel data length
  ///    ([`StructuralInconsistency`](ContainerError::StructuralInconsistency)).
  /// 4. The info header's size field matches its version
  ///    ([`InvalidHeaderFields`](ContainerError::InvalidHeaderFields)).
  /// 5. Width and height are positive
  ///    ([`InvalidDimensions`](ContainerError::InvalidDimensions)).
  /// 6. The bit count is positive
  ///    ([`InvalidDimensions`](ContainerError::InvalidDimensions)).
  /// 7. The compression is a known value
  ///    ([`InvalidCompressionMode`](ContainerError::InvalidCompressionMode)).
  /// 8. RLE8 needs 8 bits per pixel and a 0 image size, colors used, and
  ///    colors important. RLE4 needs 4 bits per pixel
  ///    ([`CompressionFieldViolation`](ContainerError::CompressionFieldViolation)).
  /// 9. The pixel data is exactly `width * height * bit_count / 8` bytes
  ///    ([`PayloadLengthMismatch`](ContainerError::PayloadLengthMismatch)).
  ///
  /// A 12 byte info header has no compression field, so steps 7 and 8 are
  /// skipped for it. Step 9 doesn't account for row padding.
  pub fn validate(&self) -> Result<()> {
    let fh = &self.file_header;
    let ih = &self.info_header;
    if !fh.is_valid() {
      log::warn!("BMP tag is {:?}", fh.tag());
      return Err(ContainerError::InvalidSignature);
    }
    let data_offset = u64::from(fh.pixel_data_offset());
    let expected_offset = self.expected_data_offset() as u64;
    if data_offset != expected_offset {
      log::warn!("BMP data offset is {data_offset}, expected {expected_offset}");
      return Err(ContainerError::StructuralInconsistency);
    }
    let expected_total = data_offset + self.pixels.len() as u64;
    if u64::from(fh.total_file_size()) != expected_total {
      log::warn!("BMP file size is {}, expected {expected_total}", fh.total_file_size());
      return Err(ContainerError::StructuralInconsistency);
    }
    if !ih.is_internally_valid() {
      log::warn!("BMP info header size field is {} in a {} byte header", ih.declared_size(), ih.byte_len());
      return Err(ContainerError::InvalidHeaderFields);
    }
    let (width, height, bit_count) = (ih.width(), ih.height(), ih.bit_count());
    if width <= 0 || height <= 0 {
      log::warn!("BMP dimensions are {width}x{height}");
      return Err(ContainerError::InvalidDimensions);
    }
    if bit_count == 0 {
      log::warn!("BMP bit count is 0");
      return Err(ContainerError::InvalidDimensions);
    }
    if let Some(ext) = ih.extended() {
      let compression = BmpCompression::try_from(ext.compression()).map_err(|e| {
        log::warn!("unknown BMP compression {}", ext.compression());
        e
      })?;
      let violation = match compression {
        BmpCompression::RgbRLE8 => {
          bit_count != 8
            || ext.image_size() != 0
            || ext.colors_used() != 0
            || ext.colors_important() != 0
        }
        BmpCompression::RgbRLE4 => bit_count != 4,
        _ => false,
      };
      if violation {
        log::warn!("BMP fields don't fit {compression:?} compression");
        return Err(ContainerError::CompressionFieldViolation);
      }
    }
    let expected_len =
      u128::from(width.unsigned_abs()) * u128::from(height.unsigned_abs()) * u128::from(bit_count) / 8;
    if self.pixels.len() as u128 != expected_len {
      log::warn!("BMP has {} pixel data bytes, expected {expected_len}", self.pixels.len());
      return Err(ContainerError::PayloadLengthMismatch);
    }
    Ok(())
  }

  /// The number of bytes [`serialize`](Self::serialize) will produce.
  #[inline]
  #[must_use]
  pub fn encoded_len(&self) -> usize {
    self.expected_data_offset() + self.pixels.len()
  }

  /// Writes out the bitmap: file header, info header, color table, pixels.
  ///
  /// The parts are written back to back, so a gap between the color table and
  /// the pixel data in the source isn't kept.
  #[must_use]
  pub fn serialize(&self) -> Vec<u8> {
    let mut out = Vec::with_capacity(self.encoded_len());
    out.extend_from_slice(self.file_header.as_bytes());
    out.extend_from_slice(self.info_header.as_bytes());
    if let Some(table) = self.color_table_bytes() {
      out.extend_from_slice(table);
    }
    out.extend_from_slice(&self.pixels);
    out
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::vec;

  #[test]
  fn test_new_is_valid() {
    let bmp = Bmp::new(3, 2, 24, vec![0; 18]).unwrap();
    assert_eq!(bmp.file_header().pixel_data_offset(), 54);
    assert_eq!(bmp.file_header().total_file_size(), 72);
    assert_eq!(bmp.validate(), Ok(()));
    assert_eq!(Bmp::parse(&bmp.serialize()), Ok(bmp));

    let indexed = Bmp::new(4, 4, 4, vec![0; 8]).unwrap();
    let table = indexed.color_table().unwrap();
    assert_eq!(table.len(), 16);
    assert_eq!(table[0], BmpColorEntry::rgb(0, 0, 0));
    assert_eq!(table[15], BmpColorEntry::rgb(255, 255, 255));
    assert_eq!(indexed.file_header().pixel_data_offset(), 54 + 64);
    assert_eq!(indexed.validate(), Ok(()));
    assert_eq!(indexed.pixel_layout(), Some(PixelLayout::Indexed4));

    assert_eq!(Bmp::new(0, 1, 8, vec![]), Err(ContainerError::InvalidDimensions));
  }

  #[test]
  fn test_validate_order() {
    let good = Bmp::new(2, 2, 8, vec![0; 4]).unwrap();

    let mut b = good.clone();
    b.file_header_mut().set_tag(AsciiArray(*b"BA"));
    b.file_header_mut().set_pixel_data_offset(0);
    assert_eq!(b.validate(), Err(ContainerError::InvalidSignature));

    let mut b = good.clone();
    b.file_header_mut().set_pixel_data_offset(54);
    assert_eq!(b.validate(), Err(ContainerError::StructuralInconsistency));

    let mut b = good.clone();
    b.file_header_mut().set_total_file_size(1);
    assert_eq!(b.validate(), Err(ContainerError::StructuralInconsistency));

    let mut b = good.clone();
    b.info_header_mut().set_declared_size(41);
    assert_eq!(b.validate(), Err(ContainerError::InvalidHeaderFields));

    let mut b = good.clone();
    b.info_header_mut().set_height(-2).unwrap();
    assert_eq!(b.validate(), Err(ContainerError::InvalidDimensions));

    let mut b = good.clone();
    b.info_header_mut().set_compression(BmpCompression::RgbRLE4).unwrap();
    assert_eq!(b.validate(), Err(ContainerError::CompressionFieldViolation));

    let mut b = good.clone();
    b.info_header_mut().set_compression(BmpCompression::RgbRLE8).unwrap();
    assert_eq!(b.validate(), Ok(()));
    b.info_header_mut().set_colors_important(1).unwrap();
    assert_eq!(b.validate(), Err(ContainerError::CompressionFieldViolation));

    let mut b = good.clone();
    b.set_pixel_data(vec![0; 5]).unwrap();
    assert_eq!(b.validate(), Err(ContainerError::PayloadLengthMismatch));
  }

  #[test]
  fn test_parse_offset_past_end() {
    let mut bytes = Bmp::new(1, 1, 32, vec![1, 2, 3, 4]).unwrap().serialize();
    bytes[10] = 200;
    assert_eq!(Bmp::parse(&bytes), Err(ContainerError::InsufficientBytes));
  }
}
