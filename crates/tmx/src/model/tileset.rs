//! Tileset documents: per-tile type tags and properties.

/// A decoded tileset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TilesetDocument {
    pub tiles: Vec<Tile>,
}

impl TilesetDocument {
    /// Returns the tile with the given local id.
    pub fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }
}

/// Metadata for one tile of a tileset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Id local to the tileset, not a global id.
    pub id: u32,
    /// Type tag, possibly empty.
    pub tile_type: String,
    pub properties: Vec<Property>,
}

impl Tile {
    /// Returns the first property with the given name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }
}

/// A name/type/value property. The type is kept as text and not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub property_type: String,
    pub value: String,
}
