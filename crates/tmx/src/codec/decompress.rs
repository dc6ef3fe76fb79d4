//! Decompression capability for base64 layer payloads.
//!
//! The layer decoder never inflates bytes itself. It hands the decoded base64
//! bytes to a [`Decompressor`], which lets callers swap implementations and
//! lets tests run without real compressed fixtures.

use std::io::Read;

use flate2::read::{MultiGzDecoder, ZlibDecoder};

use crate::codec::format::Compression;
use crate::error::DecodeError;

/// Turns compressed bytes into plain bytes.
///
/// Implementations must not produce more than `max_len` bytes; exceeding it
/// is reported as [`DecodeError::DecompressedTooLarge`].
pub trait Decompressor {
    fn decompress(
        &self,
        compression: Compression,
        input: &[u8],
        max_len: usize,
    ) -> Result<Vec<u8>, DecodeError>;
}

impl<F> Decompressor for F
where
    F: Fn(Compression, &[u8], usize) -> Result<Vec<u8>, DecodeError>,
{
    fn decompress(
        &self,
        compression: Compression,
        input: &[u8],
        max_len: usize,
    ) -> Result<Vec<u8>, DecodeError> {
        self(compression, input, max_len)
    }
}

/// gzip and zlib decompression backed by `flate2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlateDecompressor;

impl Decompressor for FlateDecompressor {
    fn decompress(
        &self,
        compression: Compression,
        input: &[u8],
        max_len: usize,
    ) -> Result<Vec<u8>, DecodeError> {
        match compression {
            // Concatenated gzip members decode as one stream
            Compression::Gzip => read_bounded(MultiGzDecoder::new(input), compression, max_len),
            Compression::Zlib => read_bounded(ZlibDecoder::new(input), compression, max_len),
        }
    }
}

/// Reads a decoder to the end, stopping one byte past `max_len`.
fn read_bounded<R: Read>(
    decoder: R,
    compression: Compression,
    max_len: usize,
) -> Result<Vec<u8>, DecodeError> {
    let limit = u64::try_from(max_len).unwrap_or(u64::MAX).saturating_add(1);
    let mut decompressed = Vec::new();
    decoder
        .take(limit)
        .read_to_end(&mut decompressed)
        .map_err(|e| DecodeError::DecompressionFailed {
            compression,
            reason: e.to_string(),
        })?;

    if decompressed.len() > max_len {
        return Err(DecodeError::DecompressedTooLarge { max: max_len });
    }
    Ok(decompressed)
}
