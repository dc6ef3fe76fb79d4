//! Data model for decoded maps and tilesets.
//!
//! Every value is built once by a reader and owned as a plain tree.

pub mod map;
pub mod tileset;

pub use map::{Layer, LayerData, MapDocument, TilesetRef};
pub use tileset::{Property, Tile, TilesetDocument};
