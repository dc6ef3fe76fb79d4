//! Layer data decoding.
//!
//! Turns the inner text of a `<data>` element into tile ids. The two
//! encodings behave differently on purpose:
//!
//! - csv is self-delimiting, so the output length is whatever the payload
//!   holds and may differ from the expected tile count.
//! - base64 is fixed width: exactly `expected` little-endian `u32` values are
//!   read, and a short buffer is an error.

use std::borrow::Cow;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::codec::csv::decode_csv;
use crate::codec::decompress::{Decompressor, FlateDecompressor};
use crate::codec::format::LayerFormat;
use crate::codec::primitives::Reader;
use crate::error::DecodeError;
use crate::limits::{MAX_DECOMPRESSED_LEN, MAX_TILES};

/// Limits applied while decoding layer data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Largest tile count a single layer may declare.
    pub max_tiles: usize,
    /// Largest buffer a decompressor may produce, in bytes.
    pub max_decompressed_len: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_tiles: MAX_TILES,
            max_decompressed_len: MAX_DECOMPRESSED_LEN,
        }
    }
}

impl DecodeOptions {
    /// Creates options with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum tile count per layer.
    pub fn max_tiles(mut self, max_tiles: usize) -> Self {
        self.max_tiles = max_tiles;
        self
    }

    /// Sets the maximum decompressed payload size.
    pub fn max_decompressed_len(mut self, max_decompressed_len: usize) -> Self {
        self.max_decompressed_len = max_decompressed_len;
        self
    }
}

/// Decodes layer payloads with a pluggable decompressor.
#[derive(Debug, Clone, Default)]
pub struct LayerDecoder<D = FlateDecompressor> {
    options: DecodeOptions,
    decompressor: D,
}

impl LayerDecoder<FlateDecompressor> {
    /// Creates a decoder backed by `flate2` with default limits.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: Decompressor> LayerDecoder<D> {
    /// Creates a decoder with a custom decompressor and default limits.
    pub fn with_decompressor(decompressor: D) -> Self {
        Self {
            options: DecodeOptions::default(),
            decompressor,
        }
    }

    /// Replaces the limits.
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the limits in effect.
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes a payload given the raw `encoding` and `compression` tags.
    pub fn decode(
        &self,
        encoding: &str,
        compression: Option<&str>,
        payload: &str,
        expected: usize,
    ) -> Result<Vec<u32>, DecodeError> {
        let format = LayerFormat::from_tags(encoding, compression)?;
        self.decode_format(format, payload, expected)
    }

    /// Decodes a payload in an already resolved format.
    ///
    /// Surrounding whitespace is trimmed first. On success a base64 layer
    /// always yields exactly `expected` ids; a csv layer yields one id per
    /// comma-terminated field.
    pub fn decode_format(
        &self,
        format: LayerFormat,
        payload: &str,
        expected: usize,
    ) -> Result<Vec<u32>, DecodeError> {
        if expected > self.options.max_tiles {
            return Err(DecodeError::LengthExceedsLimit {
                field: "tile count",
                len: expected,
                max: self.options.max_tiles,
            });
        }

        let payload = payload.trim();
        match format {
            LayerFormat::Csv => Ok(decode_csv(payload, expected)),
            LayerFormat::Base64(compression) => {
                let mut bytes = decode_base64(payload)?;
                if let Some(compression) = compression {
                    let max = self.options.max_decompressed_len;
                    bytes = self.decompressor.decompress(compression, &bytes, max)?;
                    if bytes.len() > max {
                        return Err(DecodeError::DecompressedTooLarge { max });
                    }
                }
                Reader::new(&bytes).read_u32_vec(expected)
            }
        }
    }
}

/// Decodes a layer payload with the default decoder.
///
/// See [`LayerDecoder::decode`].
pub fn decode_layer_data(
    encoding: &str,
    compression: Option<&str>,
    payload: &str,
    expected: usize,
) -> Result<Vec<u32>, DecodeError> {
    LayerDecoder::new().decode(encoding, compression, payload, expected)
}

/// Decodes standard padded base64, skipping embedded line breaks.
fn decode_base64(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let text = if payload.contains(['\r', '\n']) {
        Cow::Owned(payload.replace(['\r', '\n'], ""))
    } else {
        Cow::Borrowed(payload)
    };
    STANDARD
        .decode(text.as_bytes())
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::format::Compression;
    use flate2::write::{GzEncoder, ZlibEncoder};
    use proptest::prelude::*;
    use std::io::Write;

    fn le_bytes(gids: &[u32]) -> Vec<u8> {
        gids.iter().flat_map(|g| g.to_le_bytes()).collect()
    }

    fn encode(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    #[test]
    fn test_csv_dropped_tail() {
        assert_eq!(decode_layer_data("csv", None, "1,2,3", 3).unwrap(), vec![1, 2]);
        assert_eq!(decode_layer_data("csv", None, "1,2,3,", 3).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_csv_pretty_printed() {
        let payload = "\n   1,2,\n3,4,\n  ";
        assert_eq!(decode_layer_data("csv", None, payload, 4).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(decode_layer_data("csv", None, "1,2,\n3,", 3).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_csv_length_not_enforced() {
        assert_eq!(decode_layer_data("csv", None, "1,2,", 9).unwrap(), vec![1, 2]);
        assert_eq!(decode_layer_data("csv", None, "1,2,3,", 1).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_base64_plain() {
        let payload = encode(&le_bytes(&[1, 2, 0x8000_0003, 0]));
        assert_eq!(
            decode_layer_data("base64", None, &payload, 4).unwrap(),
            vec![1, 2, 0x8000_0003, 0]
        );
    }

    #[test]
    fn test_base64_surrounding_whitespace() {
        let payload = format!("\n   {}\n  ", encode(&le_bytes(&[7, 8])));
        assert_eq!(decode_layer_data("base64", None, &payload, 2).unwrap(), vec![7, 8]);
    }

    #[test]
    fn test_base64_wrapped_lines() {
        let encoded = encode(&le_bytes(&[1, 2, 3, 4, 5, 6]));
        let (head, tail) = encoded.split_at(12);
        let payload = format!("{head}\r\n{tail}");
        assert_eq!(
            decode_layer_data("base64", None, &payload, 6).unwrap(),
            vec![1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn test_base64_gzip() {
        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::best());
        encoder.write_all(&le_bytes(&[10, 20, 30, 40])).unwrap();
        let payload = encode(&encoder.finish().unwrap());
        assert_eq!(
            decode_layer_data("base64", Some("gzip"), &payload, 4).unwrap(),
            vec![10, 20, 30, 40]
        );
    }

    #[test]
    fn test_base64_zlib() {
        let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
        encoder.write_all(&le_bytes(&[5, 6, 7])).unwrap();
        let payload = encode(&encoder.finish().unwrap());
        assert_eq!(
            decode_layer_data("base64", Some("zlib"), &payload, 3).unwrap(),
            vec![5, 6, 7]
        );
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            decode_layer_data("base64", None, "not*base64!", 1),
            Err(DecodeError::InvalidBase64(_))
        ));
        // Missing padding
        assert!(matches!(
            decode_layer_data("base64", None, "AQAAAA", 1),
            Err(DecodeError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_unsupported_encoding() {
        assert_eq!(
            decode_layer_data("zstd-custom", None, "AAAA", 1),
            Err(DecodeError::UnsupportedEncoding {
                encoding: "zstd-custom".to_string()
            })
        );
        assert!(matches!(
            decode_layer_data("", None, "1,", 1),
            Err(DecodeError::UnsupportedEncoding { .. })
        ));
    }

    #[test]
    fn test_unsupported_compression() {
        assert_eq!(
            decode_layer_data("base64", Some("zstd"), "AAAAAA==", 1),
            Err(DecodeError::UnsupportedCompression {
                compression: "zstd".to_string()
            })
        );
    }

    #[test]
    fn test_short_buffer() {
        let payload = encode(&le_bytes(&[1, 2, 3]));
        assert_eq!(
            decode_layer_data("base64", None, &payload, 4),
            Err(DecodeError::DataTooShort { needed: 16, actual: 12 })
        );
    }

    #[test]
    fn test_short_after_decompression() {
        let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&le_bytes(&[1])).unwrap();
        let payload = encode(&encoder.finish().unwrap());
        assert_eq!(
            decode_layer_data("base64", Some("zlib"), &payload, 2),
            Err(DecodeError::DataTooShort { needed: 8, actual: 4 })
        );
    }

    #[test]
    fn test_corrupt_compressed_data() {
        let payload = encode(b"definitely not gzip");
        assert!(matches!(
            decode_layer_data("base64", Some("gzip"), &payload, 1),
            Err(DecodeError::DecompressionFailed {
                compression: Compression::Gzip,
                ..
            })
        ));
    }

    #[test]
    fn test_tile_limit() {
        let decoder = LayerDecoder::new().with_options(DecodeOptions::new().max_tiles(4));
        assert_eq!(
            decoder.decode("csv", None, "1,", 5),
            Err(DecodeError::LengthExceedsLimit {
                field: "tile count",
                len: 5,
                max: 4
            })
        );
        assert!(decoder.decode("csv", None, "1,", 4).is_ok());
    }

    #[test]
    fn test_injected_decompressor() {
        let decoder = LayerDecoder::with_decompressor(
            |compression: Compression, input: &[u8], _max: usize| -> Result<Vec<u8>, DecodeError> {
                assert_eq!(compression, Compression::Zlib);
                // Pretend every input byte inflates to one tile id
                Ok(input.iter().flat_map(|&b| u32::from(b).to_le_bytes()).collect())
            },
        );
        let payload = encode(&[3, 1, 4]);
        assert_eq!(decoder.decode("base64", Some("zlib"), &payload, 3).unwrap(), vec![3, 1, 4]);
    }

    #[test]
    fn test_decompressor_output_rechecked() {
        let decoder = LayerDecoder::with_decompressor(
            |_: Compression, _: &[u8], _: usize| -> Result<Vec<u8>, DecodeError> { Ok(vec![0u8; 64]) },
        )
        .with_options(DecodeOptions::new().max_decompressed_len(32));
        assert_eq!(
            decoder.decode("base64", Some("gzip"), "AA==", 1),
            Err(DecodeError::DecompressedTooLarge { max: 32 })
        );
    }

    #[test]
    fn test_decompression_limit() {
        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&vec![0u8; 1 << 16]).unwrap();
        let payload = encode(&encoder.finish().unwrap());
        let decoder = LayerDecoder::new().with_options(DecodeOptions::new().max_decompressed_len(1024));
        assert_eq!(
            decoder.decode("base64", Some("gzip"), &payload, 4),
            Err(DecodeError::DecompressedTooLarge { max: 1024 })
        );
    }

    proptest! {
        #[test]
        fn prop_base64_roundtrip(gids in proptest::collection::vec(any::<u32>(), 0..256)) {
            let payload = encode(&le_bytes(&gids));
            prop_assert_eq!(decode_layer_data("base64", None, &payload, gids.len()).unwrap(), gids);
        }

        #[test]
        fn prop_little_endian_layout(bytes in proptest::collection::vec(any::<u8>(), 0..64).prop_map(|mut b| { b.truncate(b.len() / 4 * 4); b })) {
            let n = bytes.len() / 4;
            let gids = decode_layer_data("base64", None, &encode(&bytes), n).unwrap();
            prop_assert_eq!(gids.len(), n);
            for (i, gid) in gids.iter().enumerate() {
                let o = i * 4;
                let expected = u32::from(bytes[o])
                    | u32::from(bytes[o + 1]) << 8
                    | u32::from(bytes[o + 2]) << 16
                    | u32::from(bytes[o + 3]) << 24;
                prop_assert_eq!(*gid, expected);
            }
        }

        #[test]
        fn prop_zlib_roundtrip(gids in proptest::collection::vec(any::<u32>(), 1..128)) {
            let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(&le_bytes(&gids)).unwrap();
            let payload = encode(&encoder.finish().unwrap());
            prop_assert_eq!(decode_layer_data("base64", Some("zlib"), &payload, gids.len()).unwrap(), gids);
        }
    }
}
