//! Resource limits for decoding.
//!
//! These bound the allocations a hostile or truncated document can force.
//! [`DecodeOptions`](crate::codec::DecodeOptions) starts from these values.

/// Maximum number of tiles in a single layer (4096 x 4096).
pub const MAX_TILES: usize = 1 << 24;

/// Maximum size of a decompressed layer payload in bytes.
pub const MAX_DECOMPRESSED_LEN: usize = MAX_TILES * 4;

/// Maximum element nesting depth in a document.
pub const MAX_ELEMENT_DEPTH: usize = 64;

/// Bytes per tile identifier in the binary layer format.
pub const BYTES_PER_TILE: usize = 4;
