//! Map documents: grid size, tileset references and tile layers.

use crate::codec::{Compression, Encoding, LayerFormat};

/// A decoded map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDocument {
    /// Tiles per row.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    pub tilesets: Vec<TilesetRef>,
    pub layers: Vec<Layer>,
}

impl MapDocument {
    /// Returns width × height, the tile count of a base64 layer.
    pub fn tile_count(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Returns the layer with the given name.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// Returns the tileset a global tile id belongs to.
    ///
    /// That is the reference with the greatest `first_gid` not above `gid`.
    /// Gid 0 is the empty tile and belongs to no tileset.
    pub fn tileset_for_gid(&self, gid: u32) -> Option<&TilesetRef> {
        if gid == 0 {
            return None;
        }
        self.tilesets
            .iter()
            .filter(|tileset| tileset.first_gid <= gid)
            .max_by_key(|tileset| tileset.first_gid)
    }
}

/// A tileset referenced by a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetRef {
    /// Global id of the tileset's first tile (at least 1).
    pub first_gid: u32,
    /// Path of the external tileset file, empty for embedded tilesets. Not resolved.
    pub source: String,
}

/// A named tile layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub name: String,
    /// Payload and decoded ids; `None` when the layer has no `<data>`.
    pub data: Option<LayerData>,
}

impl Layer {
    /// Returns the decoded tile ids, empty when the layer has no data.
    pub fn gids(&self) -> &[u32] {
        self.data
            .as_ref()
            .map(|data| data.gids.as_slice())
            .unwrap_or_default()
    }

    /// Returns the tile id at column `x`, row `y` of a grid `width` tiles wide.
    pub fn tile_at(&self, x: u32, y: u32, width: u32) -> Option<u32> {
        if x >= width {
            return None;
        }
        let index = (y as usize)
            .checked_mul(width as usize)?
            .checked_add(x as usize)?;
        self.gids().get(index).copied()
    }
}

/// A layer payload together with its decoded tile ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerData {
    pub format: LayerFormat,
    /// Payload text with surrounding whitespace trimmed.
    pub raw: String,
    /// Tile ids in row-major order; 0 means no tile.
    ///
    /// Base64 layers hold exactly width × height ids. Csv layers hold one id
    /// per comma-terminated field, which may be fewer.
    pub gids: Vec<u32>,
}

impl LayerData {
    /// Returns the payload encoding.
    pub fn encoding(&self) -> Encoding {
        self.format.encoding()
    }

    /// Returns the payload compression, if any.
    pub fn compression(&self) -> Option<Compression> {
        self.format.compression()
    }
}
