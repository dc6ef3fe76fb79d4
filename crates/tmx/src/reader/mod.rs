//! Readers that map document trees onto the data model.
//!
//! Each reader either returns a complete document or the first error it
//! meets; nothing is skipped or partially returned.

pub mod map;
pub mod tileset;

pub use map::{map_from_element, read_map, read_map_file, read_map_with};
pub use tileset::{read_tileset, read_tileset_file, tileset_from_element};

use crate::dom::Element;
use crate::error::ReadError;

/// Checks the name of a document's root element.
fn expect_root(root: &Element, expected: &'static str) -> Result<(), ReadError> {
    if root.name() != expected {
        return Err(ReadError::UnexpectedRoot {
            expected,
            found: root.name().to_string(),
        });
    }
    Ok(())
}

/// Reads a required unsigned integer attribute.
fn u32_attribute(
    element: &Element,
    element_name: &'static str,
    attribute: &'static str,
) -> Result<u32, ReadError> {
    let value = element
        .attribute(attribute)
        .ok_or(ReadError::MissingAttribute {
            element: element_name,
            attribute,
        })?;
    value.trim().parse().map_err(|_| ReadError::InvalidAttribute {
        element: element_name,
        attribute,
        value: value.to_string(),
    })
}

/// Reads a required attribute that must be a positive integer.
fn positive_attribute(
    element: &Element,
    element_name: &'static str,
    attribute: &'static str,
) -> Result<u32, ReadError> {
    match u32_attribute(element, element_name, attribute)? {
        0 => Err(ReadError::InvalidAttribute {
            element: element_name,
            attribute,
            value: "0".to_string(),
        }),
        value => Ok(value),
    }
}
