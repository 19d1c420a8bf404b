use glam::{Affine3A, Quat, Vec3};
use rbxmap_utils::color::RGB32F;
use rbxmap_xml::{PartProperties, PrimitiveKind};

/// A fully resolved part, ready to be handed to a [`crate::SceneBuilder`].
///
/// Every field is always populated. Properties missing from the source document are filled in
/// with their defaults (see [`PartProperties::default`]).
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDescriptor {
    /// 1-based position in the emitted sequence. Only meant for naming and progress display.
    pub ordinal: usize,
    /// The part's `Name` property, if it had one.
    pub name: Option<String>,
    pub position: Vec3,
    pub rotation: Quat,
    pub size: Vec3,
    pub can_collide: bool,
    pub anchored: bool,
    pub palette_index: i32,
    /// Palette color of `palette_index`, or the fallback gray if the index is unknown.
    pub color: RGB32F,
    pub reflectance: f32,
    pub transparency: f32,
    pub shape: PrimitiveKind,
}

impl ObjectDescriptor {
    pub fn new(ordinal: usize, properties: PartProperties, color: RGB32F) -> Self {
        let PartProperties {
            name,
            position,
            rotation,
            size,
            can_collide,
            anchored,
            palette_index,
            reflectance,
            transparency,
            shape,
        } = properties;

        Self {
            ordinal,
            name,
            position,
            rotation,
            size,
            can_collide,
            anchored,
            palette_index,
            color,
            reflectance,
            transparency,
            shape,
        }
    }

    /// Full object transform, with the size applied as scale.
    #[inline]
    pub fn transform(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.size, self.rotation, self.position)
    }
}
