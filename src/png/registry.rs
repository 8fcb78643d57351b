use super::*;

/// Everything the registry knows about a chunk type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkTypeMetadata {
  /// The type this is about.
  pub ty: ChunkType,

  /// If the chunk is critical. This is always the same as
  /// [`ChunkType::is_critical`], it's copied here for convenience.
  pub critical: bool,

  /// If the chunk can appear more than once in a PNG.
  pub multiple_allowed: bool,

  /// The exact data length every chunk of this type has, or 0 if the length
  /// varies.
  pub fixed_len: u32,

  /// Sorting key for writing chunks out.
  ///
  /// `None` means the chunk can go anywhere between `IHDR` and `IEND`, and it
  /// stays next to whatever chunk was before it.
  pub ordering: Option<f32>,
}
impl ChunkTypeMetadata {
  /// If a chunk of this type may have `len` bytes of data.
  #[inline]
  #[must_use]
  pub const fn accepts_len(&self, len: usize) -> bool {
    self.fixed_len == 0 || self.fixed_len as usize == len
  }
}

struct Entry {
  ty: ChunkType,
  multiple_allowed: bool,
  fixed_len: u32,
  ordering: Option<f32>,
}
const fn entry(
  ty: ChunkType, multiple_allowed: bool, fixed_len: u32, ordering: Option<f32>,
) -> Entry {
  Entry { ty, multiple_allowed, fixed_len, ordering }
}

/// Ordering key of the `IHDR` chunk.
pub const ORDER_HEADER: f32 = 0.0;
/// Ordering key of chunks that must come before `PLTE`.
pub const ORDER_BEFORE_PALETTE: f32 = 1.0;
/// Ordering key of the `PLTE` chunk.
pub const ORDER_PALETTE: f32 = 2.0;
/// Ordering key of chunks that must come before `IDAT`.
pub const ORDER_BEFORE_DATA: f32 = 3.0;
/// Ordering key of `IDAT` chunks.
pub const ORDER_DATA: f32 = 4.0;
/// Ordering key of the `IEND` chunk.
pub const ORDER_END: f32 = 5.0;

#[rustfmt::skip]
const REGISTRY: &[Entry] = &[
  entry(ChunkType::IHDR, false, 13, Some(ORDER_HEADER)),
  entry(ChunkType::cHRM, false, 32, Some(ORDER_BEFORE_PALETTE)),
  entry(ChunkType::gAMA, false, 4,  Some(ORDER_BEFORE_PALETTE)),
  entry(ChunkType::iCCP, false, 0,  Some(ORDER_BEFORE_PALETTE)),
  entry(ChunkType::sBIT, false, 0,  Some(ORDER_BEFORE_PALETTE)),
  entry(ChunkType::sRGB, false, 1,  Some(ORDER_BEFORE_PALETTE)),
  entry(ChunkType::PLTE, false, 0,  Some(ORDER_PALETTE)),
  entry(ChunkType::tRNS, false, 0,  Some(ORDER_BEFORE_DATA)),
  entry(ChunkType::bKGD, false, 0,  Some(ORDER_BEFORE_DATA)),
  entry(ChunkType::hIST, false, 0,  Some(ORDER_BEFORE_DATA)),
  entry(ChunkType::pHYs, false, 9,  Some(ORDER_BEFORE_DATA)),
  entry(ChunkType::sPLT, true,  0,  Some(ORDER_BEFORE_DATA)),
  entry(ChunkType::pCAL, false, 0,  Some(ORDER_BEFORE_DATA)),
  entry(ChunkType::IDAT, true,  0,  Some(ORDER_DATA)),
  entry(ChunkType::tIME, false, 7,  None),
  entry(ChunkType::tEXt, true,  0,  None),
  entry(ChunkType::zTXt, true,  0,  None),
  entry(ChunkType::iTXt, true,  0,  None),
  entry(ChunkType::IEND, false, 0,  Some(ORDER_END)),
];

/// Looks up the registry info for a chunk type.
///
/// ## Failure
/// * [`ContainerError::UnsupportedType`] if the type isn't registered.
#[inline]
pub fn metadata_for(ty: ChunkType) -> Result<ChunkTypeMetadata> {
  REGISTRY
    .iter()
    .find(|e| e.ty == ty)
    .map(|e| ChunkTypeMetadata {
      ty: e.ty,
      critical: e.ty.is_critical(),
      multiple_allowed: e.multiple_allowed,
      fixed_len: e.fixed_len,
      ordering: e.ordering,
    })
    .ok_or(ContainerError::UnsupportedType)
}

/// If the chunk type is in the registry.
#[inline]
#[must_use]
pub fn is_registered(ty: ChunkType) -> bool {
  REGISTRY.iter().any(|e| e.ty == ty)
}

/// All registered chunk types, in their relative stream order.
#[inline]
pub fn registered_types() -> impl Iterator<Item = ChunkType> {
  REGISTRY.iter().map(|e| e.ty)
}

#[test]
fn test_registry_properties_come_from_type_bits() {
  for ty in registered_types() {
    let meta = metadata_for(ty).unwrap();
    assert_eq!(meta.critical, ty.is_critical(), "{ty}");
    assert!(ty.is_well_formed(), "{ty}");
  }
  assert!(metadata_for(ChunkType::IHDR).unwrap().critical);
  assert!(metadata_for(ChunkType::PLTE).unwrap().critical);
  assert!(!metadata_for(ChunkType::pHYs).unwrap().critical);
  assert!(metadata_for(ChunkType::IDAT).unwrap().multiple_allowed);
  assert!(!metadata_for(ChunkType::IHDR).unwrap().multiple_allowed);
  assert_eq!(metadata_for(ChunkType::pHYs).unwrap().fixed_len, 9);
  assert_eq!(metadata_for(ChunkType(*b"vpAg")), Err(ContainerError::UnsupportedType));
}

#[test]
fn test_registry_ordering_keys_are_ascending_in_stream_order() {
  let mut last = f32::MIN;
  for ty in registered_types() {
    if let Some(key) = metadata_for(ty).unwrap().ordering {
      assert!(key >= last, "{ty} sorts before an earlier type");
      last = key;
    }
  }
}
