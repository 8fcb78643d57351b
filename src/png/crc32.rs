//! The CRC-32 used by PNG chunks.
//!
//! This is the common reflected CRC-32 (polynomial `0xEDB8_8320`, initial value
//! and final XOR both `0xFFFF_FFFF`). The lookup table is built at compile
//! time, so there's no runtime initialization at all.

use super::ChunkType;

/// The 256 entry lookup table, one entry per possible byte value.
pub const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c >>= 1;
      }
      k += 1;
    }
    out[n] = c;
    n += 1;
  }
  out
}

/// Feeds more bytes into a running (not yet finalized) CRC.
#[inline]
#[must_use]
pub fn update_crc(mut crc: u32, bytes: &[u8]) -> u32 {
  for &byte in bytes {
    crc = CRC_TABLE[((crc ^ u32::from(byte)) & 0xFF) as usize] ^ (crc >> 8);
  }
  crc
}

/// Computes the CRC of a byte slice.
#[inline]
#[must_use]
pub fn compute_crc(bytes: &[u8]) -> u32 {
  update_crc(u32::MAX, bytes) ^ u32::MAX
}

/// Computes the CRC of a chunk: the type bytes followed by the data bytes.
///
/// This gives the same result as calling [`compute_crc`] on the type and data
/// placed one after the other, without needing them to be contiguous.
#[inline]
#[must_use]
pub fn chunk_crc(ty: ChunkType, data: &[u8]) -> u32 {
  update_crc(update_crc(u32::MAX, &ty.0), data) ^ u32::MAX
}

#[test]
fn test_crc_known_values() {
  assert_eq!(compute_crc(b""), 0);
  assert_eq!(compute_crc(b"123456789"), 0xCBF4_3926);
  assert_eq!(chunk_crc(ChunkType::IEND, &[]), 0xAE42_6082);
  assert_eq!(chunk_crc(ChunkType::IEND, &[]), compute_crc(b"IEND"));
}
