// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Import driver
//!
//! Pulls elements from a provider one at a time and fully converts each -
//! material composition, mesh assembly, scene attachment, progress report -
//! before asking for the next. All shared state lives in a session object
//! constructed at run start and dropped at run end; two runs can never leak
//! materials or composites into each other.

use ifc_scene_core::{Element, ElementProvider};

use crate::composite::{compose, CompositeCache};
use crate::error::Result;
use crate::host::{ImportHost, SceneNode};
use crate::material::{MaterialRegistry, SlotAllocator};
use crate::mesh::build_mesh;

/// Import behaviour knobs
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Element types attached hidden; by convention the structurally
    /// non-visible ones (openings cut out of walls, spatial volumes)
    pub hidden_types: Vec<String>,
    /// Label handed to the host's progress surface at run start
    pub progress_label: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            hidden_types: vec!["IfcOpeningElement".to_string(), "IfcSpace".to_string()],
            progress_label: "Importing building model".to_string(),
        }
    }
}

/// Counters reported after a successful run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Elements converted and attached
    pub elements: usize,
    /// Distinct single-surface materials created
    pub materials_created: usize,
    /// Distinct multi-sub-materials built
    pub composites_created: usize,
    /// Materials published to editor slots
    pub slots_published: usize,
}

/// Run-scoped shared state: the material registry, the composite cache and
/// the slot allocator. Constructed per run, discarded with it.
struct ImportSession {
    registry: MaterialRegistry,
    composites: CompositeCache,
    slots: SlotAllocator,
}

impl ImportSession {
    fn new(existing_materials: usize) -> Self {
        Self {
            registry: MaterialRegistry::new(),
            composites: CompositeCache::new(),
            slots: SlotAllocator::new(existing_materials),
        }
    }
}

/// The conversion pipeline entry point
#[derive(Debug, Clone, Default)]
pub struct Importer {
    options: ImportOptions,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Convert every element the provider yields and attach it to the host
    /// scene.
    ///
    /// Provider initialization failure aborts before anything is created.
    /// A malformed element aborts the rest of the run; materials and nodes
    /// attached up to that point stay in the scene (no rollback).
    pub fn run(
        &self,
        provider: &mut dyn ElementProvider,
        host: &mut dyn ImportHost,
    ) -> Result<ImportStats> {
        provider.initialize()?;

        // slot counter starts past whatever the scene already holds, so
        // published materials append instead of overwriting
        let mut session = ImportSession::new(host.count());

        host.started(&self.options.progress_label);

        let mut elements = 0usize;
        while let Some(element) = provider.next_element() {
            self.convert(&element, &mut session, host)?;
            host.update(provider.progress());
            elements += 1;
        }

        host.finished();

        let stats = ImportStats {
            elements,
            materials_created: session.registry.len(),
            composites_created: session.composites.len(),
            slots_published: session.slots.published(),
        };
        tracing::info!(
            elements = stats.elements,
            materials = stats.materials_created,
            composites = stats.composites_created,
            slots = stats.slots_published,
            "import finished"
        );
        Ok(stats)
    }

    fn convert(
        &self,
        element: &Element,
        session: &mut ImportSession,
        host: &mut dyn ImportHost,
    ) -> Result<()> {
        let material = compose(
            &element.geometry,
            &mut session.registry,
            &mut session.composites,
            &mut session.slots,
            host,
        )?;
        let mesh = build_mesh(&element.geometry)?;

        let hidden = self
            .options
            .hidden_types
            .iter()
            .any(|t| t == &element.element_type);
        let wire_colour = material.and_then(|m| host.diffuse(m));

        tracing::debug!(
            id = element.id,
            guid = %element.guid,
            element_type = %element.element_type,
            faces = mesh.face_count(),
            "converted element"
        );

        host.add_node(SceneNode {
            name: format!("{}/{}/#{}", element.element_type, element.name, element.id),
            mesh,
            transform: element.transform,
            hidden,
            material,
            wire_colour,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_hide_openings_and_spaces() {
        let options = ImportOptions::default();
        assert!(options.hidden_types.iter().any(|t| t == "IfcOpeningElement"));
        assert!(options.hidden_types.iter().any(|t| t == "IfcSpace"));
    }
}
