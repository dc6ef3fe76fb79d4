//! TMX: decoding tile maps and tilesets produced by map editors.
//!
//! This crate reads `.tmx` map documents into grids of tile ids and `.tsx`
//! tileset documents into per-tile metadata.
//!
//! # Quick Start
//!
//! ```rust
//! use tmx::{read_map, read_tileset};
//!
//! let map = read_map(r#"<map width="2" height="2">
//!   <tileset firstgid="1" source="terrain.tsx"/>
//!   <layer name="ground"><data encoding="csv">
//! 1,2,3,4,
//! </data></layer>
//! </map>"#.as_bytes()).unwrap();
//! assert_eq!(map.layers[0].gids(), &[1, 2, 3, 4]);
//!
//! let tileset = read_tileset(r#"<tileset>
//!   <tile id="5" type="wall"><properties>
//!     <property name="blocking" type="bool" value="true"/>
//!   </properties></tile>
//! </tileset>"#.as_bytes()).unwrap();
//! assert_eq!(tileset.tiles[0].property("blocking").unwrap().value, "true");
//! ```
//!
//! # Modules
//!
//! - [`codec`]: Layer payload decoding (csv, base64, gzip, zlib)
//! - [`dom`]: Document tree built from XML
//! - [`model`]: Map and tileset data types
//! - [`reader`]: Document readers
//! - [`error`]: Error types
//! - [`limits`]: Resource limits for decoding
//!
//! # Layer payloads
//!
//! - csv: comma-terminated decimal ids. Parsing is permissive; unknown bytes
//!   are skipped and a final value without a comma is dropped.
//! - base64: little-endian `u32` ids, optionally gzip or zlib compressed.
//!   Exactly width × height ids are read; a short buffer is an error.

pub mod codec;
pub mod dom;
pub mod error;
pub mod limits;
pub mod model;
pub mod reader;

// Re-export commonly used types at crate root
pub use codec::{
    Compression, DecodeOptions, Decompressor, Encoding, FlateDecompressor, LayerDecoder,
    LayerFormat, decode_layer_data,
};
pub use dom::{Element, parse_document};
pub use error::{DecodeError, ErrorCode, ReadError};
pub use model::{Layer, LayerData, MapDocument, Property, Tile, TilesetDocument, TilesetRef};
pub use reader::{
    map_from_element, read_map, read_map_file, read_map_with, read_tileset, read_tileset_file,
    tileset_from_element,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
