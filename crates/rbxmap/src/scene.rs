//! Scene building
//!
//! The ingestion driver doesn't create anything renderable by itself. Every descriptor it
//! produces is handed to a [`SceneBuilder`], which owns whatever it makes out of it.
//!
//! [`BuiltScene`] is the builder used by the command line tool. It keeps a plain, serializable
//! description of the scene: all parts grouped under one parent, each with its transform,
//! collider, physics body and material.

use crate::{
    descriptor::ObjectDescriptor,
    material::PartMaterial,
};
use log::*;
use rbxmap_utils::{ok, AnyResult};
use rbxmap_xml::PrimitiveKind;
use serde::Serialize;
use std::path::Path;

/// Consumer of resolved parts.
pub trait SceneBuilder {
    fn add_part(&mut self, part: &ObjectDescriptor) -> AnyResult;
}

/// Collects descriptors as they are.
impl SceneBuilder for Vec<ObjectDescriptor> {
    fn add_part(&mut self, part: &ObjectDescriptor) -> AnyResult {
        self.push(part.clone());
        ok()
    }
}

/// Naming rules for [`BuiltScene`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneNaming {
    /// Appended to the map's file stem to name the parent group.
    pub parent_suffix: String,
    /// Prepended to a part's ordinal to name it.
    pub part_prefix: String,
}

impl Default for SceneNaming {
    fn default() -> Self {
        Self {
            parent_suffix: " PARENT".into(),
            part_prefix: "Part_".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneTransform {
    pub position: [f32; 3],
    /// Quaternion, `[x, y, z, w]`
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

/// Physics body attached to parts that aren't anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RigidBody {
    pub kinematic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenePart {
    pub name: String,
    /// The `Name` the part had in the source document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    pub primitive: PrimitiveKind,
    pub collider_enabled: bool,
    pub transform: SceneTransform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rigid_body: Option<RigidBody>,
    pub material: PartMaterial,
}

/// In-memory scene made out of imported parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltScene {
    /// Name of the group every part is placed under.
    pub parent: String,
    #[serde(skip)]
    part_prefix: String,
    pub parts: Vec<ScenePart>,
}

impl BuiltScene {
    pub fn new(parent: impl Into<String>, naming: &SceneNaming) -> Self {
        Self {
            parent: parent.into(),
            part_prefix: naming.part_prefix.clone(),
            parts: vec![],
        }
    }

    /// Creates an empty scene for the map file at the given path.
    pub fn for_map(path: &Path, naming: &SceneNaming) -> Self {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        Self::new(format!("{stem}{}", naming.parent_suffix), naming)
    }
}

impl SceneBuilder for BuiltScene {
    fn add_part(&mut self, part: &ObjectDescriptor) -> AnyResult {
        let name = format!("{}{}", self.part_prefix, part.ordinal);
        trace!("Adding `{name}` to `{}`", self.parent);

        self.parts.push(ScenePart {
            name,
            source_name: part.name.clone(),
            primitive: part.shape,
            collider_enabled: part.can_collide,
            transform: SceneTransform {
                position: part.position.to_array(),
                rotation: part.rotation.to_array(),
                scale: part.size.to_array(),
            },
            rigid_body: (!part.anchored).then_some(RigidBody { kinematic: true }),
            material: PartMaterial::resolve(part),
        });
        ok()
    }
}
