//! Layer data decoding.
//!
//! This module turns the payload of a layer `<data>` element into tile ids.

pub mod csv;
pub mod decompress;
pub mod format;
pub mod layer;
pub mod primitives;

pub use csv::decode_csv;
pub use decompress::{Decompressor, FlateDecompressor};
pub use format::{Compression, Encoding, LayerFormat};
pub use layer::{DecodeOptions, LayerDecoder, decode_layer_data};
pub use primitives::Reader;
