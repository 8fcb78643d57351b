use core::num::TryFromIntError;

/// An error from the `rastermeta` crate.
///
/// All of these are data integrity problems. Parsing stops at the first one
/// found, nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum ContainerError {
  /// The PNG signature (or BMP tag) at the start of the data is wrong.
  InvalidSignature,

  /// The chunk type isn't in the chunk registry.
  UnsupportedType,

  /// A chunk's stored CRC doesn't match the CRC of its type and data.
  ChecksumMismatch,

  /// The declared size of a BMP info header isn't 12, 40, 108, or 124.
  InvalidHeaderSize,

  /// A BMP info header's declared size doesn't match its own variant.
  InvalidHeaderFields,

  /// The offsets and sizes of a container don't add up.
  StructuralInconsistency,

  /// Width, height, or bit count is zero or negative.
  InvalidDimensions,

  /// The BMP compression value isn't one of the known values.
  InvalidCompressionMode,

  /// A run-length compressed BMP breaks one of the RLE field rules.
  CompressionFieldViolation,

  /// The BMP pixel payload isn't the length the header implies.
  PayloadLengthMismatch,

  /// The data ended before a complete record could be read.
  InsufficientBytes,

  /// A registered chunk has a fixed data length, and this chunk doesn't.
  IncorrectChunkLength,

  /// The field doesn't exist in this header version.
  ///
  /// The 12 byte BMP core header has no compression, image size, resolution,
  /// or color count fields.
  UnsupportedOperation,

  /// The data is neither a PNG nor a BMP.
  UnknownFormat,

  /// The pixel layout can't be used as a re-encoding target.
  UnsupportedPixelLayout,

  /// A DPI value of zero was requested.
  InvalidResolution,

  /// The external raster codec failed.
  Codec,
}
impl core::fmt::Display for ContainerError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(match self {
      Self::InvalidSignature => "invalid signature",
      Self::UnsupportedType => "unsupported chunk type",
      Self::ChecksumMismatch => "chunk checksum mismatch",
      Self::InvalidHeaderSize => "invalid info header size",
      Self::InvalidHeaderFields => "info header fields don't match the header version",
      Self::StructuralInconsistency => "container offsets and sizes are inconsistent",
      Self::InvalidDimensions => "width, height, or bit count is not positive",
      Self::InvalidCompressionMode => "unknown compression mode",
      Self::CompressionFieldViolation => "run-length compression field rules violated",
      Self::PayloadLengthMismatch => "pixel payload length doesn't match the header",
      Self::InsufficientBytes => "insufficient bytes",
      Self::IncorrectChunkLength => "chunk data has the wrong length for its type",
      Self::UnsupportedOperation => "field not present in this header version",
      Self::UnknownFormat => "data is not a recognized container format",
      Self::UnsupportedPixelLayout => "pixel layout not supported for re-encoding",
      Self::InvalidResolution => "resolution must be greater than zero",
      Self::Codec => "the raster codec failed",
    })
  }
}
impl core::error::Error for ContainerError {}
impl From<TryFromIntError> for ContainerError {
  #[inline]
  fn from(_: TryFromIntError) -> Self {
    Self::StructuralInconsistency
  }
}

/// Shorthand for results with a [`ContainerError`].
pub type Result<T, E = ContainerError> = core::result::Result<T, E>;
