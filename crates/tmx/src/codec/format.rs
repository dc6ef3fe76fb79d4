//! Layer payload formats.
//!
//! A `<data>` element names its encoding and, for base64, an optional
//! compression. The combinations are closed, so they are modelled as
//! [`LayerFormat`] and resolved from the document tags in one place.

use std::fmt;

use crate::error::DecodeError;

/// Textual representation of a layer payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Comma-terminated decimal integers.
    Csv,
    /// Standard padded base64 of little-endian `u32` tile ids.
    Base64,
}

impl Encoding {
    /// Returns the document tag for this encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Csv => "csv",
            Encoding::Base64 => "base64",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte-stream compression applied before base64 encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
    Gzip,
    Zlib,
}

impl Compression {
    /// Parses a compression tag. An empty tag means no compression.
    pub fn from_tag(tag: &str) -> Result<Option<Compression>, DecodeError> {
        match tag {
            "" => Ok(None),
            "gzip" => Ok(Some(Compression::Gzip)),
            "zlib" => Ok(Some(Compression::Zlib)),
            other => Err(DecodeError::UnsupportedCompression {
                compression: other.to_string(),
            }),
        }
    }

    /// Returns the document tag for this compression.
    pub fn as_str(self) -> &'static str {
        match self {
            Compression::Gzip => "gzip",
            Compression::Zlib => "zlib",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every supported encoding/compression combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerFormat {
    Csv,
    Base64(Option<Compression>),
}

impl LayerFormat {
    /// Resolves the `encoding` and `compression` attributes of a `<data>` element.
    ///
    /// Compression only applies to base64; under csv the tag is ignored.
    pub fn from_tags(encoding: &str, compression: Option<&str>) -> Result<LayerFormat, DecodeError> {
        match encoding {
            "csv" => Ok(LayerFormat::Csv),
            "base64" => {
                let compression = match compression {
                    Some(tag) => Compression::from_tag(tag)?,
                    None => None,
                };
                Ok(LayerFormat::Base64(compression))
            }
            other => Err(DecodeError::UnsupportedEncoding {
                encoding: other.to_string(),
            }),
        }
    }

    /// Returns the encoding half of the format.
    pub fn encoding(self) -> Encoding {
        match self {
            LayerFormat::Csv => Encoding::Csv,
            LayerFormat::Base64(_) => Encoding::Base64,
        }
    }

    /// Returns the compression, if any.
    pub fn compression(self) -> Option<Compression> {
        match self {
            LayerFormat::Csv => None,
            LayerFormat::Base64(compression) => compression,
        }
    }
}

impl fmt::Display for LayerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerFormat::Csv => f.write_str("csv"),
            LayerFormat::Base64(None) => f.write_str("base64"),
            LayerFormat::Base64(Some(c)) => write!(f, "base64+{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tags() {
        assert_eq!(LayerFormat::from_tags("csv", None).unwrap(), LayerFormat::Csv);
        assert_eq!(
            LayerFormat::from_tags("base64", None).unwrap(),
            LayerFormat::Base64(None)
        );
        assert_eq!(
            LayerFormat::from_tags("base64", Some("")).unwrap(),
            LayerFormat::Base64(None)
        );
        assert_eq!(
            LayerFormat::from_tags("base64", Some("gzip")).unwrap(),
            LayerFormat::Base64(Some(Compression::Gzip))
        );
        assert_eq!(
            LayerFormat::from_tags("base64", Some("zlib")).unwrap(),
            LayerFormat::Base64(Some(Compression::Zlib))
        );
    }

    #[test]
    fn test_csv_ignores_compression() {
        assert_eq!(
            LayerFormat::from_tags("csv", Some("zstd")).unwrap(),
            LayerFormat::Csv
        );
    }

    #[test]
    fn test_unsupported_tags() {
        assert_eq!(
            LayerFormat::from_tags("zstd-custom", None),
            Err(DecodeError::UnsupportedEncoding {
                encoding: "zstd-custom".to_string()
            })
        );
        assert_eq!(
            LayerFormat::from_tags("base64", Some("zstd")),
            Err(DecodeError::UnsupportedCompression {
                compression: "zstd".to_string()
            })
        );
        // Tags are case sensitive
        assert!(LayerFormat::from_tags("CSV", None).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(LayerFormat::Csv.to_string(), "csv");
        assert_eq!(LayerFormat::Base64(None).to_string(), "base64");
        assert_eq!(
            LayerFormat::Base64(Some(Compression::Zlib)).to_string(),
            "base64+zlib"
        );
        assert_eq!(LayerFormat::Base64(Some(Compression::Gzip)).encoding(), Encoding::Base64);
    }
}
