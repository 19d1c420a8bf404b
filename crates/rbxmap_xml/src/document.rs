//! Owned element tree of a place file
//!
//! Place files are plain XML. The interesting part of a document looks like this:
//! ```xml
//! <roblox version="4">
//!     <Item class="Workspace" referent="RBX0">
//!         <Item class="Part" referent="RBX1">
//!             <Properties>
//!                 <bool name="Anchored">true</bool>
//!                 <int name="BrickColor">194</int>
//!                 <Vector3 name="size">
//!                     <X>4</X>
//!                     <Y>1.2</Y>
//!                     <Z>2</Z>
//!                 </Vector3>
//!             </Properties>
//!         </Item>
//!     </Item>
//! </roblox>
//! ```
//!
//! Every instance is an `Item` element, with its class in the `class` attribute. Instances nest
//! arbitrarily deep (parts inside models inside the workspace), so the loader keeps the whole
//! hierarchy around and queries walk it in document order.

use quick_xml::{
    events::{attributes::AttrError, BytesStart, Event},
    Reader,
};
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    str::Utf8Error,
};
use thiserror::Error;

/// Name of the element used for every instance in the document.
pub const ITEM_ELEMENT: &str = "Item";

/// Errors that make a document unusable as a whole.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("couldn't read `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("couldn't read the document")]
    Read(#[from] io::Error),
    #[error("malformed XML")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed attribute")]
    Attribute(#[from] AttrError),
    #[error("element name isn't valid UTF-8")]
    Encoding(#[from] Utf8Error),
    #[error("element `{0}` is never closed")]
    Unclosed(String),
    #[error("the document has no root element")]
    NoRoot,
    #[error("the document has more than one root element")]
    MultipleRoots,
}

/// A single XML element with everything under it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value of an attribute. If an attribute is repeated, the first one is used.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Concatenated text content placed directly within this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Returns the first direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Walks every element below this one (excluding itself) in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Checks if this is an `Item` element of the given class.
    pub fn is_item_of_class(&self, class: &str) -> bool {
        self.name == ITEM_ELEMENT && self.attribute("class") == Some(class)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    fn from_start(start: &BytesStart) -> Result<Self, LoadError> {
        let mut element = Self::new(std::str::from_utf8(start.name().as_ref())?);
        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
            let value = attribute.unescape_value()?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }
}

/// Depth-first, pre-order iterator over elements. See [`XmlElement::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// A fully loaded place file.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDocument {
    root: XmlElement,
}

impl SceneDocument {
    /// Wraps an already built element tree.
    pub fn from_root(root: XmlElement) -> Self {
        Self { root }
    }

    /// Parses a document from its text.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => stack.push(XmlElement::from_start(&start)?),
                Event::Empty(start) => {
                    let element = XmlElement::from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    // Mismatched end tags are already rejected by the reader
                    if let Some(element) = stack.pop() {
                        attach(&mut stack, &mut root, element)?;
                    }
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(std::str::from_utf8(&data)?);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = stack.pop() {
            return Err(LoadError::Unclosed(unclosed.name));
        }

        root.map(Self::from_root).ok_or(LoadError::NoRoot)
    }

    /// Reads and parses a document.
    pub fn from_reader(mut r: impl Read) -> Result<Self, LoadError> {
        let mut text = String::new();
        r.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Loads a document from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Selects every `Item` of the given class, anywhere in the document, in document order.
    ///
    /// The root element itself is considered too.
    pub fn items_of_class(&self, class: &str) -> Vec<&XmlElement> {
        std::iter::once(&self.root)
            .chain(self.root.descendants())
            .filter(|element| element.is_item_of_class(class))
            .collect()
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), LoadError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(LoadError::MultipleRoots),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NESTED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<roblox version="4">
    <Item class="Workspace" referent="RBX0">
        <Item class="Part" referent="RBX1">
            <Properties>
                <string name="Name">First &amp; foremost</string>
            </Properties>
        </Item>
        <Item class="Model" referent="RBX2">
            <Item class="Part" referent="RBX3"/>
            <Item class="Script" referent="RBX4">
                <Properties>
                    <ProtectedString name="Source"><![CDATA[print("hi")]]></ProtectedString>
                </Properties>
            </Item>
        </Item>
    </Item>
    <Item class="Part" referent="RBX5"></Item>
</roblox>"#;

    #[test]
    fn parses_nested_items() {
        let doc = SceneDocument::parse(NESTED).unwrap();
        assert_eq!(doc.root().name(), "roblox");
        assert_eq!(doc.root().attribute("version"), Some("4"));

        let referents = doc
            .items_of_class("Part")
            .into_iter()
            .map(|item| item.attribute("referent").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(referents, ["RBX1", "RBX3", "RBX5"]);
    }

    #[test]
    fn text_is_unescaped() {
        let doc = SceneDocument::parse(NESTED).unwrap();
        let first = doc.items_of_class("Part")[0];
        let name = first.child("Properties").unwrap().children()[0].text();
        assert_eq!(name, "First & foremost");

        let script = doc.items_of_class("Script")[0];
        let source = script.child("Properties").unwrap().children()[0].text();
        assert_eq!(source, r#"print("hi")"#);
    }

    #[test]
    fn class_match_is_exact() {
        let doc = SceneDocument::parse(
            r#"<roblox><Item class="part"/><Item class="PartOperation"/><Part class="Part"/></roblox>"#,
        )
        .unwrap();
        assert!(doc.items_of_class("Part").is_empty());
    }

    #[test]
    fn malformed_documents_are_rejected() {
        assert!(matches!(
            SceneDocument::parse("<roblox><Item></roblox>"),
            Err(LoadError::Xml(_))
        ));
        assert!(matches!(
            SceneDocument::parse("<roblox><Item>"),
            Err(LoadError::Unclosed(_) | LoadError::Xml(_))
        ));
        assert!(matches!(SceneDocument::parse(""), Err(LoadError::NoRoot)));
        assert!(matches!(
            SceneDocument::parse("<a/><b/>"),
            Err(LoadError::MultipleRoots)
        ));
    }

    #[test]
    fn missing_files_report_their_path() {
        let err = SceneDocument::open("definitely/not/here.rbxlx").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("here.rbxlx"));
    }
}
