use super::*;
use crate::{PixelLayout, Resolution};
use alloc::vec::Vec;

/// What the parser does when a "multiple allowed" chunk type shows up again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RepeatedChunks {
  /// Each chunk stays its own record, in the order they appeared.
  #[default]
  Sequence,
  /// Later chunks have their data appended to the first chunk of that type.
  Concatenate,
}

/// What the parser does with chunk types that aren't in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnknownChunks {
  /// The chunk is stepped over and isn't part of the parsed container.
  #[default]
  Skip,
  /// The chunk is kept as a [`GenericChunk`].
  Keep,
}

/// Settings for [`Png::parse_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PngReadOptions {
  /// Handling of repeated chunk types.
  pub repeated: RepeatedChunks,
  /// Handling of unregistered chunk types.
  pub unknown: UnknownChunks,
  /// If registered chunks must have their registry's fixed data length.
  pub check_fixed_lengths: bool,
}
impl Default for PngReadOptions {
  #[inline]
  fn default() -> Self {
    Self {
      repeated: RepeatedChunks::default(),
      unknown: UnknownChunks::default(),
      check_fixed_lengths: true,
    }
  }
}
impl PngReadOptions {
  /// Options that keep every chunk as it was, so that writing the container
  /// back out gives the same bytes (for any PNG already in chunk order).
  #[inline]
  #[must_use]
  pub fn lossless() -> Self {
    Self { unknown: UnknownChunks::Keep, ..Self::default() }
  }
}

/// A parsed PNG: the signature and an ordered list of chunks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Png {
  signature: PngSignature,
  chunks: Vec<PngChunk>,
}
impl Default for Png {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
impl Png {
  /// A PNG with the correct signature and no chunks.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { signature: PngSignature(PNG_SIGNATURE), chunks: Vec::new() }
  }

  /// Parses PNG bytes using the default [`PngReadOptions`].
  #[inline]
  pub fn parse(bytes: &[u8]) -> Result<Self> {
    Self::parse_with(bytes, PngReadOptions::default())
  }

  /// Parses PNG bytes.
  ///
  /// The chunks are walked in order, and the walk stops at the first `IEND`
  /// even if there are bytes after it. A PNG without an `IEND` isn't an
  /// error, the walk just stops at the end of the data.
  ///
  /// ## Failure
  /// * [`ContainerError::InvalidSignature`]
  /// * [`ContainerError::InsufficientBytes`] if a chunk is cut off.
  /// * [`ContainerError::ChecksumMismatch`] if any kept chunk has a bad CRC.
  /// * [`ContainerError::IncorrectChunkLength`] (see
  ///   [`check_fixed_lengths`](PngReadOptions::check_fixed_lengths)).
  pub fn parse_with(bytes: &[u8], opts: PngReadOptions) -> Result<Self> {
    let (signature, rest) = PngSignature::try_from_bytes(bytes)?;
    let mut png = Self { signature, chunks: Vec::new() };
    let mut it = RawPngChunkIter::new(rest);
    for raw in it.by_ref() {
      let raw = raw?;
      log::trace!("{} chunk with {} data bytes", raw.ty, raw.data.len());
      let meta = match metadata_for(raw.ty) {
        Ok(meta) => Some(meta),
        Err(_) if opts.unknown == UnknownChunks::Keep => None,
        Err(_) => {
          log::debug!("skipping unregistered {} chunk ({} bytes)", raw.ty, raw.encoded_len());
          continue;
        }
      };
      if let Some(meta) = meta {
        if opts.check_fixed_lengths && !meta.accepts_len(raw.data.len()) {
          log::warn!(
            "{} chunk has {} data bytes, expected {}",
            raw.ty,
            raw.data.len(),
            meta.fixed_len
          );
          return Err(ContainerError::IncorrectChunkLength);
        }
        if meta.multiple_allowed && opts.repeated == RepeatedChunks::Concatenate {
          if let Some(first) = png.chunks.iter_mut().find(|c| c.ty() == raw.ty) {
            if !raw.crc_matches() {
              log::warn!("repeated {} chunk has a bad CRC", raw.ty);
              return Err(ContainerError::ChecksumMismatch);
            }
            log::debug!("appending {} bytes to the first {} chunk", raw.data.len(), raw.ty);
            first.append_data(raw.data)?;
            continue;
          }
        }
      }
      let chunk = PngChunk::try_from_raw(raw)?;
      let is_end = chunk.ty() == ChunkType::IEND;
      png.chunks.push(chunk);
      if is_end {
        break;
      }
    }
    if !it.remaining().is_empty() {
      log::debug!("ignoring {} bytes after IEND", it.remaining().len());
    }
    Ok(png)
  }

  /// The signature this PNG was parsed with.
  #[inline]
  #[must_use]
  pub const fn signature(&self) -> PngSignature {
    self.signature
  }

  /// All chunks, in the order they were parsed or added.
  #[inline]
  #[must_use]
  pub fn chunks(&self) -> &[PngChunk] {
    &self.chunks
  }

  /// The first chunk of the given type.
  #[inline]
  #[must_use]
  pub fn chunk(&self, ty: ChunkType) -> Option<&PngChunk> {
    self.chunks.iter().find(|c| c.ty() == ty)
  }

  /// Every chunk of the given type, in order.
  #[inline]
  pub fn chunks_of(&self, ty: ChunkType) -> impl Iterator<Item = &PngChunk> + '_ {
    self.chunks.iter().filter(move |c| c.ty() == ty)
  }

  /// Adds a chunk.
  ///
  /// * A registered type that can't repeat replaces the existing chunk of that
  ///   type, if any, in the same position.
  /// * Otherwise the chunk goes in front of a trailing `IEND`, or on the end
  ///   if there isn't one.
  pub fn push_chunk(&mut self, chunk: PngChunk) {
    let ty = chunk.ty();
    let single = metadata_for(ty).map(|m| !m.multiple_allowed).unwrap_or(false);
    if single {
      if let Some(slot) = self.chunks.iter_mut().find(|c| c.ty() == ty) {
        *slot = chunk;
        return;
      }
    }
    let ends_with_iend = self.chunks.last().map(PngChunk::ty) == Some(ChunkType::IEND);
    if ends_with_iend && ty != ChunkType::IEND {
      let at = self.chunks.len() - 1;
      self.chunks.insert(at, chunk);
    } else {
      self.chunks.push(chunk);
    }
  }

  /// Removes all chunks of the given type, giving how many were removed.
  #[inline]
  pub fn remove_chunks(&mut self, ty: ChunkType) -> usize {
    let before = self.chunks.len();
    self.chunks.retain(|c| c.ty() != ty);
    before - self.chunks.len()
  }

  /// The image header, if present.
  #[inline]
  #[must_use]
  pub fn ihdr(&self) -> Option<&Ihdr> {
    self.chunks.iter().find_map(|c| match c {
      PngChunk::Ihdr(ihdr) => Some(ihdr),
      _ => None,
    })
  }

  /// Sets the image header, replacing any existing one. A new header goes
  /// first.
  #[inline]
  pub fn set_ihdr(&mut self, ihdr: Ihdr) {
    match self.chunks.iter_mut().find(|c| c.ty() == ChunkType::IHDR) {
      Some(slot) => *slot = PngChunk::Ihdr(ihdr),
      None => self.chunks.insert(0, PngChunk::Ihdr(ihdr)),
    }
  }

  /// The physical dimensions chunk, if present.
  #[inline]
  #[must_use]
  pub fn phys(&self) -> Option<&Phys> {
    self.chunks.iter().find_map(|c| match c {
      PngChunk::Phys(phys) => Some(phys),
      _ => None,
    })
  }

  /// Sets the physical dimensions chunk, or removes it with `None`.
  #[inline]
  pub fn set_phys(&mut self, phys: Option<Phys>) {
    match phys {
      Some(phys) => self.push_chunk(PngChunk::Phys(phys)),
      None => {
        let n = self.remove_chunks(ChunkType::pHYs);
        log::debug!("removed {n} pHYs chunk(s)");
      }
    }
  }

  /// The resolution from the `pHYs` chunk, if there is one.
  ///
  /// A `pHYs` that isn't in meters gives 0 on both axes.
  #[inline]
  #[must_use]
  pub fn resolution(&self) -> Option<Resolution> {
    self.phys().map(Phys::resolution)
  }

  /// Sets a meter based `pHYs` for the resolution.
  #[inline]
  pub fn set_resolution(&mut self, res: Resolution) {
    let phys = Phys::from_resolution(res);
    log::debug!("setting PNG resolution to {res:?} ({} x {} per meter)", phys.ppu_x(), phys.ppu_y());
    self.set_phys(Some(phys));
  }

  /// Image width, from the header.
  #[inline]
  #[must_use]
  pub fn width(&self) -> Option<u32> {
    self.ihdr().map(Ihdr::width)
  }

  /// Image height, from the header.
  #[inline]
  #[must_use]
  pub fn height(&self) -> Option<u32> {
    self.ihdr().map(Ihdr::height)
  }

  /// The pixel layout the header describes.
  #[inline]
  #[must_use]
  pub fn pixel_layout(&self) -> Option<PixelLayout> {
    self.ihdr().and_then(Ihdr::pixel_layout)
  }

  /// All `IDAT` data joined together: the complete compressed image stream.
  #[inline]
  #[must_use]
  pub fn image_data(&self) -> Vec<u8> {
    let mut v = Vec::new();
    for chunk in self.chunks_of(ChunkType::IDAT) {
      v.extend_from_slice(chunk.data());
    }
    v
  }

  /// The number of bytes [`serialize`](Self::serialize) will produce.
  #[inline]
  #[must_use]
  pub fn encoded_len(&self) -> usize {
    self.signature.0.len() + self.chunks.iter().map(PngChunk::encoded_len).sum::<usize>()
  }

  /// Writes out the PNG.
  ///
  /// Chunks are written in ascending registry ordering key. Sorting is
  /// stable, so chunks with equal keys keep their relative order. Chunk types
  /// without a key (text, time, unknown) take the key of the chunk in front
  /// of them, so they stay where they were.
  ///
  /// ## Failure
  /// * [`ContainerError::IncorrectChunkLength`] if a chunk's data is longer
  ///   than [`PNG_MAX_CHUNK_LEN`].
  pub fn serialize(&self) -> Result<Vec<u8>> {
    let mut keyed: Vec<(f32, &PngChunk)> = Vec::with_capacity(self.chunks.len());
    let mut last_key = ORDER_HEADER;
    for chunk in &self.chunks {
      if let Some(key) = metadata_for(chunk.ty()).ok().and_then(|m| m.ordering) {
        last_key = key;
      }
      keyed.push((last_key, chunk));
    }
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut out = Vec::with_capacity(self.encoded_len());
    out.extend_from_slice(&self.signature.0);
    for (_, chunk) in keyed {
      chunk.write_to(&mut out)?;
    }
    Ok(out)
  }
}

/// Reads the resolution out of PNG bytes.
///
/// `Ok(None)` if there's no `pHYs` chunk.
#[inline]
pub fn png_resolution(bytes: &[u8]) -> Result<Option<Resolution>> {
  Ok(Png::parse(bytes)?.resolution())
}

/// Gives new PNG bytes with a `pHYs` chunk for the resolution.
///
/// Unknown chunks are kept and repeated chunks stay separate, so nothing else
/// about the PNG changes.
#[inline]
pub fn png_set_resolution(bytes: &[u8], res: Resolution) -> Result<Vec<u8>> {
  let mut png = Png::parse_with(bytes, PngReadOptions::lossless())?;
  png.set_resolution(res);
  png.serialize()
}
