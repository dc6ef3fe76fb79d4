//! Error types for layer decoding and document reading.

use thiserror::Error;

use crate::codec::Compression;

/// Error codes shared by every failure this crate reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Unrecognized encoding or compression tag
    UnsupportedFormat,
    /// E002: Decoded buffer shorter than the declared tile count requires
    OutOfBounds,
    /// E003: Malformed payload or document
    Malformed,
    /// E004: Input exceeds a configured resource limit
    ResourceLimit,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedFormat => "E001",
            ErrorCode::OutOfBounds => "E002",
            ErrorCode::Malformed => "E003",
            ErrorCode::ResourceLimit => "E004",
        }
    }
}

/// Error while decoding a layer payload into tile identifiers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === E001: Unsupported format ===
    #[error("[E001] unsupported encoding: {encoding:?}")]
    UnsupportedEncoding { encoding: String },

    #[error("[E001] unsupported compression: {compression:?}")]
    UnsupportedCompression { compression: String },

    // === E002: Out of bounds ===
    #[error("[E002] layer data holds {actual} bytes but {needed} are required")]
    DataTooShort { needed: usize, actual: usize },

    // === E003: Malformed payload ===
    #[error("[E003] invalid base64 payload: {0}")]
    InvalidBase64(String),

    #[error("[E003] {compression} decompression failed: {reason}")]
    DecompressionFailed {
        compression: Compression,
        reason: String,
    },

    // === E004: Resource limits ===
    #[error("[E004] {field} {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("[E004] decompressed data exceeds maximum of {max} bytes")]
    DecompressedTooLarge { max: usize },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::UnsupportedEncoding { .. } | DecodeError::UnsupportedCompression { .. } => {
                ErrorCode::UnsupportedFormat
            }
            DecodeError::DataTooShort { .. } => ErrorCode::OutOfBounds,
            DecodeError::InvalidBase64(_) | DecodeError::DecompressionFailed { .. } => {
                ErrorCode::Malformed
            }
            DecodeError::LengthExceedsLimit { .. } | DecodeError::DecompressedTooLarge { .. } => {
                ErrorCode::ResourceLimit
            }
        }
    }
}

/// Error while reading a map or tileset document.
///
/// Any failure aborts the whole read; no partial document is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadError {
    #[error("[E003] i/o error: {0}")]
    Io(String),

    #[error("[E003] malformed document: {0}")]
    Xml(String),

    #[error("[E003] expected <{expected}> root element, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("[E003] <{element}> is missing required attribute {attribute:?}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("[E003] <{element}> has invalid {attribute:?} value {value:?}")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("[E004] element nesting exceeds maximum depth {max}")]
    TooDeep { max: usize },

    #[error("[E004] grid of {width}x{height} tiles is too large")]
    GridTooLarge { width: u32, height: u32 },

    #[error("layer {index} ({name:?}): {source}")]
    Layer {
        index: usize,
        name: String,
        #[source]
        source: DecodeError,
    },
}

impl ReadError {
    /// Returns the error code for this error.
    ///
    /// Layer failures report the code of the underlying decode error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ReadError::Layer { source, .. } => source.code(),
            ReadError::TooDeep { .. } | ReadError::GridTooLarge { .. } => ErrorCode::ResourceLimit,
            _ => ErrorCode::Malformed,
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        ReadError::Io(e.to_string())
    }
}
