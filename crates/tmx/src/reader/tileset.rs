//! Tileset document reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use crate::dom::{Element, parse_document};
use crate::error::ReadError;
use crate::model::{Property, Tile, TilesetDocument};
use crate::reader::{expect_root, u32_attribute};

/// Reads a tileset document.
pub fn read_tileset<R: Read>(reader: R) -> Result<TilesetDocument, ReadError> {
    let root = parse_document(reader)?;
    tileset_from_element(&root)
}

/// Opens and reads a tileset file.
pub fn read_tileset_file(path: impl AsRef<Path>) -> Result<TilesetDocument, ReadError> {
    let file = File::open(path)?;
    read_tileset(BufReader::new(file))
}

/// Builds a tileset from a parsed `<tileset>` element.
pub fn tileset_from_element(root: &Element) -> Result<TilesetDocument, ReadError> {
    expect_root(root, "tileset")?;
    let tiles = root
        .children_named("tile")
        .map(read_tile)
        .collect::<Result<Vec<_>, _>>()?;
    debug!("read tileset with {} tiles", tiles.len());
    Ok(TilesetDocument { tiles })
}

fn read_tile(element: &Element) -> Result<Tile, ReadError> {
    let id = u32_attribute(element, "tile", "id")?;
    // Newer editor versions write "class" instead of "type"
    let tile_type = element
        .attribute("type")
        .or_else(|| element.attribute("class"))
        .unwrap_or_default()
        .to_string();
    let properties = element
        .children_named("properties")
        .flat_map(|properties| properties.children_named("property"))
        .map(read_property)
        .collect();

    Ok(Tile {
        id,
        tile_type,
        properties,
    })
}

fn read_property(element: &Element) -> Property {
    // Multi-line values are stored as element text
    let value = element.attribute("value").unwrap_or(element.text());
    Property {
        name: element.attribute("name").unwrap_or_default().to_string(),
        property_type: element.attribute("type").unwrap_or_default().to_string(),
        value: value.to_string(),
    }
}
