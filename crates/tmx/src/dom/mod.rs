//! Document tree for map and tileset files.
//!
//! The readers only need named attributes, nested elements and inner text,
//! so a document is parsed once into an [`Element`] tree and then only
//! borrowed.

use std::io::Read;

use log::trace;
use xml::reader::{EventReader, XmlEvent};

use crate::error::ReadError;
use crate::limits::MAX_ELEMENT_DEPTH;

/// An element with its attributes, child elements and own text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Appends a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Appends text content.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text.push_str(text);
        self
    }

    /// Returns the local element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns an attribute value by local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns all child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Returns child elements with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Returns the first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Returns the element's own text, whitespace included, exactly as read.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Parses a document into its root element.
pub fn parse_document<R: Read>(reader: R) -> Result<Element, ReadError> {
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;
    let mut count = 0usize;

    for event in EventReader::new(reader) {
        match event.map_err(|e| ReadError::Xml(e.to_string()))? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                if stack.len() >= MAX_ELEMENT_DEPTH {
                    return Err(ReadError::TooDeep {
                        max: MAX_ELEMENT_DEPTH,
                    });
                }
                count += 1;
                stack.push(Element {
                    name: name.local_name,
                    attributes: attributes
                        .into_iter()
                        .map(|attr| (attr.name.local_name, attr.value))
                        .collect(),
                    children: Vec::new(),
                    text: String::new(),
                });
            }
            XmlEvent::EndElement { .. } => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ReadError::Xml("unbalanced end element".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            XmlEvent::Characters(text) | XmlEvent::CData(text) | XmlEvent::Whitespace(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            _ => {}
        }
    }

    trace!("parsed document with {count} elements");
    root.ok_or_else(|| ReadError::Xml("document has no root element".to_string()))
}
