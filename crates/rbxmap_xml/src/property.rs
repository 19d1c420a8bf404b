//! Typed readers for instance properties
//!
//! An instance's properties live in its `Properties` child. Each property is an element whose tag
//! names the value type, and whose `name` attribute names the property:
//! ```xml
//! <Properties>
//!     <bool name="CanCollide">false</bool>
//!     <float name="Transparency">0.25</float>
//!     <Vector3 name="size"><X>1</X><Y>2</Y><Z>3</Z></Vector3>
//! </Properties>
//! ```
//!
//! The readers below only look at the property's content. The tag is ignored, as the property
//! name alone decides how the value gets interpreted.

use crate::document::XmlElement;
use glam::Vec3;
use std::str::FromStr;
use thiserror::Error;

/// Name of the element holding an instance's properties.
pub const PROPERTIES_ELEMENT: &str = "Properties";

/// A single malformed property value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("expected a boolean, found `{0}`")]
    InvalidBool(String),
    #[error("expected an integer, found `{0}`")]
    InvalidInt(String),
    #[error("expected a number, found `{0}`")]
    InvalidFloat(String),
    #[error("missing `{0}` component")]
    MissingComponent(&'static str),
}

/// The ordered property list of a single instance.
#[derive(Debug, Clone, Copy)]
pub struct PropertyBlock<'a> {
    element: &'a XmlElement,
}

impl<'a> PropertyBlock<'a> {
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// Finds the property block of an `Item`. If there's more than one, the first one is used.
    pub fn of_item(item: &'a XmlElement) -> Option<Self> {
        item.child(PROPERTIES_ELEMENT).map(Self::new)
    }

    /// Iterates over the named properties in document order.
    ///
    /// Entries without a `name` attribute aren't properties in any meaningful sense, and are
    /// skipped.
    pub fn entries(&self) -> impl Iterator<Item = Property<'a>> {
        let block = self.element;
        block.children().iter().filter_map(|element| {
            element
                .attribute("name")
                .map(|name| Property { name, element })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

/// A named property entry.
#[derive(Debug, Clone, Copy)]
pub struct Property<'a> {
    pub name: &'a str,
    pub element: &'a XmlElement,
}

impl<'a> Property<'a> {
    /// Reads a `true`/`false` value. Case and surrounding whitespace don't matter.
    pub fn read_bool(&self) -> Result<bool, PropertyError> {
        let text = self.element.text().trim();
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(PropertyError::InvalidBool(text.to_string()))
        }
    }

    pub fn read_int(&self) -> Result<i32, PropertyError> {
        parse_trimmed(self.element.text(), PropertyError::InvalidInt)
    }

    pub fn read_float(&self) -> Result<f32, PropertyError> {
        read_float_text(self.element.text())
    }

    /// Reads a vector stored as `X`, `Y` and `Z` child elements.
    pub fn read_vector3(&self) -> Result<Vec3, PropertyError> {
        let component = |name: &'static str| -> Result<f32, PropertyError> {
            let element = self
                .element
                .child(name)
                .ok_or(PropertyError::MissingComponent(name))?;
            read_float_text(element.text())
        };

        Ok(Vec3::new(component("X")?, component("Y")?, component("Z")?))
    }

    pub fn read_string(&self) -> &'a str {
        self.element.text()
    }
}

/// Parses a float, ignoring surrounding whitespace.
pub fn read_float_text(text: &str) -> Result<f32, PropertyError> {
    parse_trimmed(text, PropertyError::InvalidFloat)
}

fn parse_trimmed<T: FromStr>(
    text: &str,
    error: impl FnOnce(String) -> PropertyError,
) -> Result<T, PropertyError> {
    let trimmed = text.trim();
    trimmed.parse().map_err(|_| error(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SceneDocument;

    fn with_property(xml: &str, f: impl FnOnce(Property)) {
        let doc = SceneDocument::parse(&format!("<Properties>{xml}</Properties>")).unwrap();
        let block = PropertyBlock::new(doc.root());
        let property = block.entries().next().expect("no property");
        f(property);
    }

    #[test]
    fn booleans() {
        with_property(r#"<bool name="a">true</bool>"#, |p| {
            assert_eq!(p.read_bool(), Ok(true))
        });
        with_property(r#"<bool name="a">False</bool>"#, |p| {
            assert_eq!(p.read_bool(), Ok(false))
        });
        with_property(r#"<bool name="a">yes</bool>"#, |p| {
            assert_eq!(p.read_bool(), Err(PropertyError::InvalidBool("yes".into())))
        });
        with_property(r#"<bool name="a"></bool>"#, |p| assert!(p.read_bool().is_err()));
    }

    #[test]
    fn numbers() {
        with_property(r#"<int name="a"> -12 </int>"#, |p| {
            assert_eq!(p.read_int(), Ok(-12))
        });
        with_property(r#"<int name="a">1.5</int>"#, |p| {
            assert_eq!(p.read_int(), Err(PropertyError::InvalidInt("1.5".into())))
        });
        with_property(r#"<float name="a">0.25</float>"#, |p| {
            assert_eq!(p.read_float(), Ok(0.25))
        });
        with_property(r#"<float name="a">1e-3</float>"#, |p| {
            assert_eq!(p.read_float(), Ok(0.001))
        });
        with_property(r#"<float name="a">half</float>"#, |p| {
            assert!(matches!(p.read_float(), Err(PropertyError::InvalidFloat(_))))
        });
    }

    #[test]
    fn vectors() {
        with_property(
            r#"<Vector3 name="size"><X>4</X><Y>1.2</Y><Z>-2</Z></Vector3>"#,
            |p| assert_eq!(p.read_vector3(), Ok(Vec3::new(4.0, 1.2, -2.0))),
        );
        with_property(r#"<Vector3 name="size"><X>4</X><Z>2</Z></Vector3>"#, |p| {
            assert_eq!(p.read_vector3(), Err(PropertyError::MissingComponent("Y")))
        });
        with_property(
            r#"<Vector3 name="size"><X>4</X><Y>?</Y><Z>2</Z></Vector3>"#,
            |p| assert!(matches!(p.read_vector3(), Err(PropertyError::InvalidFloat(_)))),
        );
    }

    #[test]
    fn unnamed_entries_are_skipped() {
        let doc = SceneDocument::parse(
            r#"<Properties><bool>true</bool><int name="BrickColor">21</int></Properties>"#,
        )
        .unwrap();
        let block = PropertyBlock::new(doc.root());
        let names = block.entries().map(|p| p.name).collect::<Vec<_>>();
        assert_eq!(names, ["BrickColor"]);
        assert!(!block.is_empty());
    }
}
