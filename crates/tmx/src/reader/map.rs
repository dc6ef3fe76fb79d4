//! Map document reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};

use crate::codec::{Decompressor, LayerDecoder, LayerFormat};
use crate::dom::{Element, parse_document};
use crate::error::ReadError;
use crate::model::{Layer, LayerData, MapDocument, TilesetRef};
use crate::reader::{expect_root, positive_attribute};

/// Reads a map document with the default layer decoder.
pub fn read_map<R: Read>(reader: R) -> Result<MapDocument, ReadError> {
    read_map_with(reader, &LayerDecoder::new())
}

/// Reads a map document, decoding layers with `decoder`.
pub fn read_map_with<R: Read, D: Decompressor>(
    reader: R,
    decoder: &LayerDecoder<D>,
) -> Result<MapDocument, ReadError> {
    let root = parse_document(reader)?;
    map_from_element(&root, decoder)
}

/// Opens and reads a map file.
pub fn read_map_file(path: impl AsRef<Path>) -> Result<MapDocument, ReadError> {
    let file = File::open(path)?;
    read_map(BufReader::new(file))
}

/// Builds a map from a parsed `<map>` element.
///
/// Every layer is decoded against width × height. The first layer that
/// fails to decode fails the whole map.
pub fn map_from_element<D: Decompressor>(
    root: &Element,
    decoder: &LayerDecoder<D>,
) -> Result<MapDocument, ReadError> {
    expect_root(root, "map")?;
    let width = positive_attribute(root, "map", "width")?;
    let height = positive_attribute(root, "map", "height")?;
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or(ReadError::GridTooLarge { width, height })?;

    let tilesets = root
        .children_named("tileset")
        .map(read_tileset_ref)
        .collect::<Result<Vec<_>, _>>()?;

    let layers = root
        .children_named("layer")
        .enumerate()
        .map(|(index, element)| read_layer(index, element, expected, decoder))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "read {width}x{height} map with {} tilesets and {} layers",
        tilesets.len(),
        layers.len()
    );

    Ok(MapDocument {
        width,
        height,
        tilesets,
        layers,
    })
}

fn read_tileset_ref(element: &Element) -> Result<TilesetRef, ReadError> {
    Ok(TilesetRef {
        first_gid: positive_attribute(element, "tileset", "firstgid")?,
        source: element.attribute("source").unwrap_or_default().to_string(),
    })
}

fn read_layer<D: Decompressor>(
    index: usize,
    element: &Element,
    expected: usize,
    decoder: &LayerDecoder<D>,
) -> Result<Layer, ReadError> {
    let name = element.attribute("name").unwrap_or_default().to_string();
    let Some(data) = element.child("data") else {
        debug!("layer {index} ({name:?}) has no data");
        return Ok(Layer { name, data: None });
    };

    let encoding = data.attribute("encoding").unwrap_or_default();
    let compression = data.attribute("compression");
    let decoded = LayerFormat::from_tags(encoding, compression).and_then(|format| {
        decoder
            .decode_format(format, data.text(), expected)
            .map(|gids| (format, gids))
    });
    let (format, gids) = match decoded {
        Ok(decoded) => decoded,
        Err(source) => return Err(ReadError::Layer { index, name, source }),
    };

    if gids.len() != expected {
        warn!(
            "layer {index} ({name:?}) decoded {} of {expected} tiles",
            gids.len()
        );
    }
    debug!("decoded layer {index} ({name:?}, {format}): {} tiles", gids.len());

    Ok(Layer {
        name,
        data: Some(LayerData {
            format,
            raw: data.text().trim().to_string(),
            gids,
        }),
    })
}
