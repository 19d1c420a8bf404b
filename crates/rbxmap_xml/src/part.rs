//! Reading `Part` instances
//!
//! [`PartProperties::parse`] walks a part's property block in document order and picks up the
//! properties that matter for rebuilding the part's geometry, physics and look. Everything not
//! listed in [`PartProperties`] is ignored, so newer format additions don't get in the way.
//!
//! Property failures are isolated. A malformed value only drops that single property (the field
//! keeps its previous value), and gets reported back to the caller. The one exception is the
//! `CFrame`, since a partially decoded frame is meaningless: a bad frame fails the whole part.

use crate::{
    cframe::{CFrame, CFrameError},
    palette::DEFAULT_PALETTE_INDEX,
    property::{Property, PropertyBlock, PropertyError},
};
use glam::{Quat, Vec3};
use serde::Serialize;

/// Class of the instances read by this module.
pub const PART_CLASS: &str = "Part";

/// Rendering primitive used for a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PrimitiveKind {
    #[default]
    Cube,
}

impl PrimitiveKind {
    /// Maps a legacy `shape` id (0 ball, 1 block, 2 cylinder) onto a primitive. Every id, known
    /// or not, currently becomes a cube.
    // TODO: give ball (0) and cylinder (2) their own primitives, once scene builders can make them
    pub fn from_legacy_shape(_id: i32) -> Self {
        Self::Cube
    }
}

/// Everything read from a part's property block.
#[derive(Debug, Clone, PartialEq)]
pub struct PartProperties {
    pub name: Option<String>,
    pub position: Vec3,
    pub rotation: Quat,
    pub size: Vec3,
    pub can_collide: bool,
    pub anchored: bool,
    pub palette_index: i32,
    pub reflectance: f32,
    pub transparency: f32,
    pub shape: PrimitiveKind,
}

impl Default for PartProperties {
    fn default() -> Self {
        Self {
            name: None,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            size: Vec3::ONE,
            can_collide: true,
            anchored: false,
            palette_index: DEFAULT_PALETTE_INDEX,
            reflectance: 0.5,
            transparency: 0.0,
            shape: PrimitiveKind::Cube,
        }
    }
}

/// A property that was skipped, because its value couldn't be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedProperty {
    pub name: String,
    pub error: PropertyError,
}

/// Result of [`PartProperties::parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPart {
    pub properties: PartProperties,
    /// Properties dropped because of malformed values, in document order.
    pub skipped: Vec<SkippedProperty>,
}

impl PartProperties {
    /// Reads a part out of its property block, starting from the defaults.
    pub fn parse(block: &PropertyBlock) -> Result<ParsedPart, CFrameError> {
        let mut properties = Self::default();
        let mut skipped = vec![];

        for property in block.entries() {
            if let Err(error) = properties.apply(&property)? {
                skipped.push(SkippedProperty {
                    name: property.name.to_string(),
                    error,
                });
            }
        }

        Ok(ParsedPart {
            properties,
            skipped,
        })
    }

    /// Applies a single property. The outer error aborts the part, the inner one only the
    /// property.
    fn apply(&mut self, property: &Property) -> Result<Result<(), PropertyError>, CFrameError> {
        let result = match property.name {
            "CFrame" => {
                let frame = CFrame::read(property.element)?;
                self.position = frame.position;
                self.rotation = frame.rotation;
                Ok(())
            }
            "size" => property.read_vector3().map(|v| self.size = v),
            "CanCollide" => property.read_bool().map(|v| self.can_collide = v),
            "Anchored" => property.read_bool().map(|v| self.anchored = v),
            "BrickColor" => property.read_int().map(|v| self.palette_index = v),
            "shape" => property
                .read_int()
                .map(|v| self.shape = PrimitiveKind::from_legacy_shape(v)),
            "Reflectance" => property.read_float().map(|v| self.reflectance = v),
            "Transparency" => property.read_float().map(|v| self.transparency = v),
            "Name" => {
                self.name = Some(property.read_string().to_string());
                Ok(())
            }
            _ => Ok(()),
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SceneDocument;
    use std::f32::consts::FRAC_PI_2;

    fn parse(properties: &str) -> Result<ParsedPart, CFrameError> {
        let doc = SceneDocument::parse(&format!(
            r#"<Item class="Part"><Properties>{properties}</Properties></Item>"#
        ))
        .unwrap();
        let block = PropertyBlock::of_item(doc.root()).unwrap();
        PartProperties::parse(&block)
    }

    #[test]
    fn empty_block_gives_defaults() {
        let parsed = parse("").unwrap();
        assert_eq!(parsed.properties, PartProperties::default());
        assert!(parsed.skipped.is_empty());

        let defaults = parsed.properties;
        assert_eq!(defaults.position, Vec3::ZERO);
        assert_eq!(defaults.rotation, Quat::IDENTITY);
        assert_eq!(defaults.size, Vec3::ONE);
        assert!(defaults.can_collide);
        assert!(!defaults.anchored);
        assert_eq!(defaults.palette_index, 26);
        assert_eq!(defaults.reflectance, 0.5);
        assert_eq!(defaults.transparency, 0.0);
        assert_eq!(defaults.shape, PrimitiveKind::Cube);
    }

    #[test]
    fn recognized_properties_are_read() {
        let parsed = parse(
            r#"
            <string name="Name">Baseplate</string>
            <CoordinateFrame name="CFrame">
                <X>1</X><Y>2</Y><Z>3</Z>
                <R00>0</R00><R01>-1</R01><R02>0</R02>
                <R10>1</R10><R11>0</R11><R12>0</R12>
                <R20>0</R20><R21>0</R21><R22>1</R22>
            </CoordinateFrame>
            <Vector3 name="size"><X>512</X><Y>20</Y><Z>512</Z></Vector3>
            <bool name="CanCollide">false</bool>
            <bool name="Anchored">true</bool>
            <int name="BrickColor">37</int>
            <token name="shape">2</token>
            <float name="Reflectance">0.1</float>
            <float name="Transparency">0.75</float>
            <bool name="Locked">true</bool>
            "#,
        )
        .unwrap();

        let p = parsed.properties;
        assert_eq!(p.name.as_deref(), Some("Baseplate"));
        assert_eq!(p.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(p.rotation.abs_diff_eq(Quat::from_rotation_z(FRAC_PI_2), 1e-6));
        assert_eq!(p.size, Vec3::new(512.0, 20.0, 512.0));
        assert!(!p.can_collide);
        assert!(p.anchored);
        assert_eq!(p.palette_index, 37);
        assert_eq!(p.shape, PrimitiveKind::Cube);
        assert_eq!(p.reflectance, 0.1);
        assert_eq!(p.transparency, 0.75);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn last_value_wins() {
        let parsed = parse(
            r#"<int name="BrickColor">21</int><int name="BrickColor">23</int>"#,
        )
        .unwrap();
        assert_eq!(parsed.properties.palette_index, 23);
    }

    #[test]
    fn malformed_property_keeps_default_and_continues() {
        let parsed = parse(
            r#"
            <bool name="CanCollide">maybe</bool>
            <int name="BrickColor">21</int>
            <Vector3 name="size"><X>1</X><Y>2</Y></Vector3>
            <float name="Transparency">0.5</float>
            "#,
        )
        .unwrap();

        assert!(parsed.properties.can_collide);
        assert_eq!(parsed.properties.palette_index, 21);
        assert_eq!(parsed.properties.size, Vec3::ONE);
        assert_eq!(parsed.properties.transparency, 0.5);
        assert_eq!(
            parsed.skipped,
            [
                SkippedProperty {
                    name: "CanCollide".into(),
                    error: PropertyError::InvalidBool("maybe".into()),
                },
                SkippedProperty {
                    name: "size".into(),
                    error: PropertyError::MissingComponent("Z"),
                },
            ]
        );
    }

    #[test]
    fn incomplete_cframe_fails_the_part() {
        let result = parse(
            r#"<CoordinateFrame name="CFrame"><X>1</X><Y>2</Y><Z>3</Z></CoordinateFrame>"#,
        );
        assert_eq!(result, Err(CFrameError::MissingField("R00")));
    }

    #[test]
    fn every_shape_is_a_cube() {
        for id in [0, 1, 2, 3, -7, 1000] {
            assert_eq!(PrimitiveKind::from_legacy_shape(id), PrimitiveKind::Cube);
        }
    }
}
