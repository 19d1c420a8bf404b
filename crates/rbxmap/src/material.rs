use crate::descriptor::ObjectDescriptor;
use rbxmap_utils::color::RGBA32F;
use serde::Serialize;

/// How a surface gets composited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SurfaceKind {
    Opaque,
    AlphaBlend,
}

/// Material parameters of a single part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartMaterial {
    /// Taken straight from the part's reflectance.
    pub smoothness: f32,
    pub surface: SurfaceKind,
    pub base_color: RGBA32F,
}

impl PartMaterial {
    /// Derives the material of a part.
    ///
    /// Parts are opaque, unless their transparency is above zero. Transparent parts get alpha
    /// blending, with an alpha of `1 - transparency`.
    pub fn resolve(part: &ObjectDescriptor) -> Self {
        if part.transparency > 0.0 {
            Self {
                base_color: part.color.with_alpha(1.0 - part.transparency),
                smoothness: part.reflectance,
                surface: SurfaceKind::AlphaBlend,
            }
        } else {
            Self {
                base_color: part.color.with_alpha(1.0),
                smoothness: part.reflectance,
                surface: SurfaceKind::Opaque,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbxmap_utils::color::RGB32F;
    use rbxmap_xml::PartProperties;

    fn part(reflectance: f32, transparency: f32) -> ObjectDescriptor {
        ObjectDescriptor::new(
            1,
            PartProperties {
                reflectance,
                transparency,
                ..Default::default()
            },
            RGB32F::new(0.2, 0.4, 0.6),
        )
    }

    #[test]
    fn opaque_parts() {
        let material = PartMaterial::resolve(&part(0.3, 0.0));
        assert_eq!(material.surface, SurfaceKind::Opaque);
        assert_eq!(material.base_color, RGB32F::new(0.2, 0.4, 0.6).with_alpha(1.0));
        assert_eq!(material.smoothness, 0.3);
    }

    #[test]
    fn transparent_parts_blend() {
        let material = PartMaterial::resolve(&part(0.5, 0.25));
        assert_eq!(material.surface, SurfaceKind::AlphaBlend);
        assert_eq!(material.base_color.a, 0.75);
        assert_eq!(material.base_color.r, 0.2);
    }
}
