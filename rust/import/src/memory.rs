// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host
//!
//! A complete [`crate::host::ImportHost`] that keeps everything in process:
//! materials, editor slots, scene nodes, progress events. Backs headless
//! runs and the test suite; a native host adapter replaces it in a real
//! deployment.

use ifc_scene_core::Colour;

use crate::host::{
    MaterialEditor, MaterialHandle, MaterialLibrary, ProgressSink, SceneGraph, SceneNode,
    StandardMaterial, SubMaterial,
};

/// A material as the in-memory library stores it
#[derive(Debug, Clone)]
pub enum StoredMaterial {
    Standard(StandardMaterial),
    Multi(Vec<SubMaterial>),
}

/// In-process implementation of the whole host surface
#[derive(Debug, Default)]
pub struct MemoryHost {
    materials: Vec<StoredMaterial>,
    slots: Vec<(usize, MaterialHandle)>,
    nodes: Vec<SceneNode>,
    progress: Vec<f32>,
    started_label: Option<String>,
    finished: bool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored material by handle
    pub fn material(&self, handle: MaterialHandle) -> Option<&StoredMaterial> {
        self.materials.get(handle.raw() as usize)
    }

    /// Editor slots in publish order, as `(slot, material)` pairs
    pub fn slots(&self) -> &[(usize, MaterialHandle)] {
        &self.slots
    }

    /// Scene nodes in attachment order
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Progress fractions in report order
    pub fn progress_updates(&self) -> &[f32] {
        &self.progress
    }

    /// The label the run started with, if any
    pub fn started_label(&self) -> Option<&str> {
        self.started_label.as_deref()
    }

    /// Whether the run signalled completion
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl MaterialLibrary for MemoryHost {
    fn find_by_name(&self, name: &str) -> Option<MaterialHandle> {
        self.materials.iter().position(|m| match m {
            StoredMaterial::Standard(standard) => standard.name == name,
            StoredMaterial::Multi(_) => false,
        })
        .map(|index| MaterialHandle::new(index as u64))
    }

    fn add_standard(&mut self, material: StandardMaterial) -> MaterialHandle {
        let handle = MaterialHandle::new(self.materials.len() as u64);
        self.materials.push(StoredMaterial::Standard(material));
        handle
    }

    fn add_multi(&mut self, sub_materials: Vec<SubMaterial>) -> MaterialHandle {
        let handle = MaterialHandle::new(self.materials.len() as u64);
        self.materials.push(StoredMaterial::Multi(sub_materials));
        handle
    }

    fn count(&self) -> usize {
        self.materials.len()
    }

    fn diffuse(&self, material: MaterialHandle) -> Option<Colour> {
        match self.material(material)? {
            StoredMaterial::Standard(standard) => standard.diffuse,
            StoredMaterial::Multi(subs) => {
                let first = subs.first()?;
                self.diffuse(first.material)
            }
        }
    }
}

impl MaterialEditor for MemoryHost {
    fn put_to_slot(&mut self, material: MaterialHandle, slot: usize) {
        self.slots.push((slot, material));
    }
}

impl SceneGraph for MemoryHost {
    fn add_node(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }
}

impl ProgressSink for MemoryHost {
    fn started(&mut self, label: &str) {
        self.started_label = Some(label.to_string());
    }

    fn update(&mut self, fraction: f32) {
        self.progress.push(fraction);
    }

    fn finished(&mut self) {
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_index_in_creation_order() {
        let mut host = MemoryHost::new();
        let a = host.add_standard(StandardMaterial::named("A"));
        let b = host.add_standard(StandardMaterial::named("B"));
        assert_eq!(a.raw(), 0);
        assert_eq!(b.raw(), 1);
        assert_eq!(host.count(), 2);
    }

    #[test]
    fn test_find_by_name_matches_standard_materials_only() {
        let mut host = MemoryHost::new();
        let a = host.add_standard(StandardMaterial::named("Brick"));
        host.add_multi(vec![SubMaterial {
            name: "Brick".to_string(),
            material: a,
        }]);
        assert_eq!(host.find_by_name("Brick"), Some(a));
        assert_eq!(host.find_by_name("Missing"), None);
    }

    #[test]
    fn test_multi_material_reports_first_sub_diffuse() {
        let mut host = MemoryHost::new();
        let mut red = StandardMaterial::named("Red");
        red.diffuse = Some(Colour::new(1.0, 0.0, 0.0));
        let red = host.add_standard(red);
        let plain = host.add_standard(StandardMaterial::named("Plain"));

        let multi = host.add_multi(vec![
            SubMaterial { name: "Red".to_string(), material: red },
            SubMaterial { name: "Plain".to_string(), material: plain },
        ]);
        assert_eq!(host.diffuse(multi), Some(Colour::new(1.0, 0.0, 0.0)));
        assert_eq!(host.diffuse(plain), None);
    }
}
