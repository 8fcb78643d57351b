//! Shorthands for pulling values off the front of a byte slice.

use crate::ContainerError;
use bytemuck::{pod_read_unaligned, Pod};
use core::mem::size_of;

#[inline]
pub(crate) fn try_split_at(bytes: &[u8], mid: usize) -> Result<(&[u8], &[u8]), ContainerError> {
  if bytes.len() >= mid {
    Ok(bytes.split_at(mid))
  } else {
    Err(ContainerError::InsufficientBytes)
  }
}

#[inline]
pub(crate) fn try_pull_byte_array<const N: usize>(
  bytes: &[u8],
) -> Result<([u8; N], &[u8]), ContainerError> {
  try_pull_pod(bytes)
}

#[inline]
pub(crate) fn try_pull_pod<T: Pod>(bytes: &[u8]) -> Result<(T, &[u8]), ContainerError> {
  let (head, tail) = try_split_at(bytes, size_of::<T>())?;
  Ok((pod_read_unaligned(head), tail))
}

#[test]
fn test_try_pull_pod() {
  let bytes = [0, 0, 1, 2, 9];
  let (v, rest) = try_pull_pod::<[u8; 4]>(&bytes).unwrap();
  assert_eq!(u32::from_be_bytes(v), 0x0102);
  assert_eq!(rest, &[9]);
  assert_eq!(try_pull_byte_array::<8>(&bytes), Err(ContainerError::InsufficientBytes));
}
