//! Holds the tools for taking apart and putting back together PNG data.
//!
//! Nothing here decompresses or unfilters pixels. The image data is kept as
//! the opaque compressed stream it is in the file.
//!
//! ## The Format
//!
//! A PNG is an 8 byte signature followed by "chunks". Each chunk is:
//! * A 4 byte big-endian length of the chunk's data.
//! * A 4 byte chunk type, which is four ASCII letters.
//! * The data.
//! * A 4 byte big-endian CRC32 of the type and data.
//!
//! There's four "critical" chunk types:
//! * **Header** (`IHDR`) - Image dimensions and pixel format. This should be
//!   the very first chunk.
//! * **Palette** (`PLTE`) - Colors for indexed images.
//! * **Image Data** (`IDAT`) - One or more chunks of compressed data. All of
//!   the compressed data forms a single zlib data stream.
//! * **End** (`IEND`) - The last chunk.
//!
//! Everything else is "ancillary". Whether a chunk type is critical (and a few
//! other properties) is encoded in the case of the type's letters, see
//! [`ChunkType`].
//!
//! ## Working With Chunks
//!
//! With no allocation you can walk the chunks directly:
//!
//! ```
//! use rastermeta::png::*;
//! # let png: &[u8] = &[];
//! if let Ok(it) = RawPngChunkIter::from_png_bytes(png) {
//!   for raw in it.flatten() {
//!     let _ok = raw.crc_matches();
//!   }
//! }
//! ```
//!
//! With the `alloc` feature, [`Png`] is an owned container that can be
//! inspected, edited, and written back out.

use crate::{try_pull_byte_array, try_pull_pod, try_split_at, AsciiArray, ContainerError, Result};
use pack1::U32BE;

mod crc32;
pub use crc32::*;

mod signature;
pub use signature::*;

mod chunk_type;
pub use chunk_type::*;

mod registry;
pub use registry::*;

mod raw_chunk;
pub use raw_chunk::*;

#[cfg(feature = "alloc")]
mod chunk;
#[cfg(feature = "alloc")]
pub use chunk::*;

#[cfg(feature = "alloc")]
mod container;
#[cfg(feature = "alloc")]
pub use container::*;
