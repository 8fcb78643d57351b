use super::*;

/// An unparsed chunk from a PNG.
///
/// The data is borrowed from the PNG bytes, and the CRC is whatever the file
/// said it was. Nothing has been checked yet.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawPngChunk<'b> {
  /// The chunk's type.
  pub ty: ChunkType,
  /// The chunk's data bytes (the length prefix isn't included).
  pub data: &'b [u8],
  /// The CRC value stored after the data.
  pub declared_crc: u32,
}
impl RawPngChunk<'_> {
  /// Computes the CRC that the chunk *should* have.
  #[inline]
  #[must_use]
  pub fn actual_crc(&self) -> u32 {
    chunk_crc(self.ty, self.data)
  }

  /// If the declared CRC is correct.
  #[inline]
  #[must_use]
  pub fn crc_matches(&self) -> bool {
    self.declared_crc == self.actual_crc()
  }

  /// The number of bytes this chunk takes up in the PNG, including the length,
  /// type, and CRC.
  #[inline]
  #[must_use]
  pub const fn encoded_len(&self) -> usize {
    CHUNK_OVERHEAD + self.data.len()
  }
}
impl core::fmt::Debug for RawPngChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawPngChunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

fn pull_chunk(bytes: &[u8]) -> Result<(RawPngChunk<'_>, &[u8])> {
  let (len, rest) = try_pull_pod::<U32BE>(bytes)?;
  let (ty_bytes, rest) = try_pull_byte_array::<4>(rest)?;
  let (data, rest) = try_split_at(rest, usize::try_from(len.get())?)?;
  let (crc, rest) = try_pull_pod::<U32BE>(rest)?;
  let chunk = RawPngChunk { ty: ChunkType(ty_bytes), data, declared_crc: crc.get() };
  Ok((chunk, rest))
}

/// The bytes a chunk uses on top of its data: length, type, and CRC.
pub const CHUNK_OVERHEAD: usize = 12;

/// An iterator that walks the chunks of PNG bytes.
///
/// Each chunk is read as a 4 byte big-endian length, a 4 byte type, then
/// `length` bytes of data and a 4 byte CRC.
///
/// If the bytes end partway through a chunk the iterator gives one
/// [`ContainerError::InsufficientBytes`] and then stops. Trailing garbage is
/// never a panic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawPngChunkIter<'b> {
  spare: &'b [u8],
}
impl<'b> RawPngChunkIter<'b> {
  /// Iterates chunks from bytes that *don't* include the signature.
  #[inline]
  #[must_use]
  pub const fn new(after_signature: &'b [u8]) -> Self {
    Self { spare: after_signature }
  }

  /// Iterates chunks of full PNG bytes, checking and skipping the signature.
  ///
  /// ## Failure
  /// * [`ContainerError::InvalidSignature`]
  #[inline]
  pub fn from_png_bytes(png: &'b [u8]) -> Result<Self> {
    let (_sig, rest) = PngSignature::try_from_bytes(png)?;
    Ok(Self::new(rest))
  }

  /// The bytes that haven't been walked yet.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> &'b [u8] {
    self.spare
  }
}
impl<'b> Iterator for RawPngChunkIter<'b> {
  type Item = Result<RawPngChunk<'b>>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.spare.is_empty() {
      return None;
    }
    let out = pull_chunk(self.spare);
    Some(match out {
      Ok((chunk, rest)) => {
        self.spare = rest;
        Ok(chunk)
      }
      Err(e) => {
        log::warn!("PNG data ends partway through a chunk ({} bytes left)", self.spare.len());
        self.spare = &[];
        Err(e)
      }
    })
  }
}
