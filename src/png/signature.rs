use super::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Checks if the bytes start with the PNG signature.
#[inline]
#[must_use]
pub fn is_png(bytes: &[u8]) -> bool {
  bytes.starts_with(&PNG_SIGNATURE)
}

/// The 8 byte signature at the start of a PNG.
///
/// Each part of the signature is there to catch a particular kind of damage
/// from a bad file transfer, and there's a check method for each part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngSignature(pub [u8; 8]);
impl Default for PngSignature {
  /// The correct signature.
  #[inline]
  fn default() -> Self {
    Self(PNG_SIGNATURE)
  }
}
impl PngSignature {
  /// Splits the signature off the front of PNG bytes.
  ///
  /// ## Failure
  /// * [`ContainerError::InvalidSignature`] if there's less than 8 bytes, or the
  ///   8 bytes aren't the PNG signature.
  #[inline]
  pub fn try_from_bytes(bytes: &[u8]) -> Result<(Self, &[u8])> {
    let (a, rest) =
      try_pull_byte_array::<8>(bytes).map_err(|_| ContainerError::InvalidSignature)?;
    let sig = Self(a);
    if sig.is_valid() {
      Ok((sig, rest))
    } else {
      log::warn!("bad PNG signature: {:02X?}", a);
      Err(ContainerError::InvalidSignature)
    }
  }

  /// If all 8 bytes are exactly correct.
  #[inline]
  #[must_use]
  pub fn is_valid(self) -> bool {
    self.0 == PNG_SIGNATURE
  }

  /// The first byte is non-ascii, which catches transfers that clear bit 7.
  #[inline]
  #[must_use]
  pub const fn has_high_bit_marker(self) -> bool {
    self.0[0] == 0x89
  }

  /// The three letters naming the format (should be `PNG`).
  #[inline]
  #[must_use]
  pub const fn format_name(self) -> AsciiArray<3> {
    AsciiArray([self.0[1], self.0[2], self.0[3]])
  }

  /// The CR-LF pair catches transfers that alter newline sequences.
  #[inline]
  #[must_use]
  pub const fn has_valid_crlf(self) -> bool {
    self.0[4] == b'\r' && self.0[5] == b'\n'
  }

  /// The control-Z stops the file from being displayed by MS-DOS `type`.
  #[inline]
  #[must_use]
  pub const fn has_control_z(self) -> bool {
    self.0[6] == 0x1A
  }

  /// The final LF catches the reverse of a CR-LF translation.
  #[inline]
  #[must_use]
  pub const fn has_final_lf(self) -> bool {
    self.0[7] == b'\n'
  }
}
