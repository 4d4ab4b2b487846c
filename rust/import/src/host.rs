// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host surface - the seams towards the scene-authoring environment
//!
//! The pipeline never talks to a concrete host API. It produces material
//! descriptions and scene nodes and hands them through these traits; a
//! native host adapter (or [`crate::memory::MemoryHost`] for headless runs)
//! decides what they become.

use ifc_scene_core::{Colour, Matrix4, Style};

use crate::mesh::SceneMesh;

/// Opaque handle to a host-owned material.
///
/// Identity matters: handle equality is material identity, and two faces
/// share one material exactly when they carry equal handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(u64);

impl MaterialHandle {
    /// Wrap a host-side material id
    #[inline]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-side material id
    #[inline]
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Description of a single-surface material for the host to create.
///
/// Absent attributes are left to the host's defaults, never substituted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardMaterial {
    /// Display name the material is registered under
    pub name: String,
    pub diffuse: Option<Colour>,
    pub specular: Option<Colour>,
    /// Shininess factor in `[0, 1]`
    pub shininess: Option<f32>,
    /// Opacity in `[0, 1]`; derived as `1 - transparency`
    pub opacity: Option<f32>,
}

impl StandardMaterial {
    /// Map a resolved style onto a material description
    pub fn from_style(style: &Style) -> Self {
        Self {
            name: style.name.clone(),
            diffuse: style.diffuse,
            specular: style.specular,
            shininess: style.specularity,
            opacity: style.transparency.map(|t| 1.0 - t),
        }
    }

    /// Attribute-less material carrying only a display name, used for the
    /// default material named after an element's object type
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// One named sub-slot of a multi-sub-material
#[derive(Debug, Clone, PartialEq)]
pub struct SubMaterial {
    pub name: String,
    pub material: MaterialHandle,
}

/// The host's material library
pub trait MaterialLibrary {
    /// Look up a material by display name. Names are human-facing and not
    /// unique; this returns the first match, for display purposes only.
    fn find_by_name(&self, name: &str) -> Option<MaterialHandle>;

    /// Create a single-surface material and register it in the library
    fn add_standard(&mut self, material: StandardMaterial) -> MaterialHandle;

    /// Create a multi-sub-material with the given named sub-slots, selected
    /// per face by material index
    fn add_multi(&mut self, sub_materials: Vec<SubMaterial>) -> MaterialHandle;

    /// Number of materials currently in the library
    fn count(&self) -> usize;

    /// Diffuse colour of a material, used to derive wireframe display
    /// colours. Multi-sub-materials report their first sub-slot's diffuse.
    fn diffuse(&self, material: MaterialHandle) -> Option<Colour>;
}

/// The host's bounded material-publishing channel (e.g. an editor with a
/// fixed number of preview slots). Only ever called with a slot index below
/// [`crate::material::SLOT_CAPACITY`]; overflow is skipped by the caller.
pub trait MaterialEditor {
    fn put_to_slot(&mut self, material: MaterialHandle, slot: usize);
}

/// A node ready to be attached to the host scene
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Display name, `type/name/#id`
    pub name: String,
    pub mesh: SceneMesh,
    /// Placement, local to world
    pub transform: Matrix4<f64>,
    /// Structurally non-visible elements (openings, spaces) arrive hidden
    pub hidden: bool,
    pub material: Option<MaterialHandle>,
    /// Wireframe display colour, derived from the material's diffuse
    pub wire_colour: Option<Colour>,
}

/// The host scene graph
pub trait SceneGraph {
    fn add_node(&mut self, node: SceneNode);
}

/// Import progress reporting towards the host UI.
///
/// All methods default to no-ops; hosts without a progress surface simply
/// skip the impl.
pub trait ProgressSink {
    fn started(&mut self, _label: &str) {}
    fn update(&mut self, _fraction: f32) {}
    fn finished(&mut self) {}
}

/// Everything the import driver needs from a host, in one object
pub trait ImportHost: MaterialLibrary + MaterialEditor + SceneGraph + ProgressSink {}

impl<T: MaterialLibrary + MaterialEditor + SceneGraph + ProgressSink> ImportHost for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_from_style_maps_opacity() {
        let style = Style::named("Glass")
            .with_diffuse(0.6, 0.7, 0.8)
            .with_transparency(0.9);
        let material = StandardMaterial::from_style(&style);
        assert_eq!(material.name, "Glass");
        assert_eq!(material.diffuse, Some(Colour::new(0.6, 0.7, 0.8)));
        assert!(material.specular.is_none());
        assert!(material.shininess.is_none());
        assert!((material.opacity.unwrap() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_absent_transparency_leaves_opacity_unset() {
        let material = StandardMaterial::from_style(&Style::named("Brick"));
        assert!(material.opacity.is_none());
    }

    #[test]
    fn test_named_material_is_bare() {
        let material = StandardMaterial::named("IfcWall");
        assert_eq!(material.name, "IfcWall");
        assert_eq!(material, StandardMaterial::named("IfcWall"));
        assert!(material.diffuse.is_none());
    }
}
