// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Composite material composition
//!
//! An element referencing several styles (or mixing styled and unstyled
//! faces) gets one multi-sub-material whose sub-slots are selected per face
//! by material index. Equivalent compositions are deduplicated through a
//! run-scoped cache keyed by the ordered sequence of constituent
//! fingerprints.
//!
//! Order-sensitivity is deliberate: the key order mirrors the per-face
//! index remapping, so permuted style lists are distinct compositions even
//! when the constituent sets match.

use ifc_scene_core::TriangulatedGeometry;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::Result;
use crate::host::{ImportHost, MaterialHandle, SubMaterial};
use crate::material::{MaterialKey, MaterialRegistry, SlotAllocator};
use crate::mesh::validate_material_ids;

/// Ordered sequence of constituent fingerprints: the default material's key
/// first when unstyled faces are present, then each style's key in
/// style-list order. Only sequences with at least two entries are ever
/// cached; shorter ones resolve to a plain material.
pub type CompositeKey = SmallVec<[MaterialKey; 8]>;

/// Run-scoped cache of built multi-sub-materials
#[derive(Debug, Default)]
pub struct CompositeCache {
    composites: FxHashMap<CompositeKey, MaterialHandle>,
}

impl CompositeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct composites built this run
    #[inline]
    pub fn len(&self) -> usize {
        self.composites.len()
    }

    /// Check if no composites were built yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.composites.is_empty()
    }
}

/// Decide an element's material: none, a single material, or a composite.
///
/// Faces marked with the no-style sentinel pull in a default material named
/// after the element's object type; it occupies sub-slot 0, which is what
/// the `+1` face-index shift in mesh assembly aligns with. The default is
/// resolved (and slot-published) independent of the composite cache.
pub fn compose(
    geometry: &TriangulatedGeometry,
    registry: &mut MaterialRegistry,
    cache: &mut CompositeCache,
    slots: &mut SlotAllocator,
    host: &mut dyn ImportHost,
) -> Result<Option<MaterialHandle>> {
    validate_material_ids(geometry)?;

    let needs_default = geometry.needs_default_style();

    let mut key = CompositeKey::new();
    if needs_default {
        key.push(MaterialKey::of_default(&geometry.object_type));
    }
    for style in &geometry.styles {
        key.push(MaterialKey::of_style(style));
    }

    let default_material = if needs_default {
        Some(registry.resolve_default(&geometry.object_type, slots, host))
    } else {
        None
    };

    match key.len() {
        // no styles and no unstyled faces: the element has no material
        0 => Ok(None),

        // a sole constituent is returned directly, never wrapped or cached
        1 => match default_material {
            Some(handle) => Ok(Some(handle)),
            None => Ok(Some(registry.resolve_or_create(
                &geometry.styles[0],
                slots,
                host,
            ))),
        },

        _ => {
            if let Some(&handle) = cache.composites.get(&key) {
                return Ok(Some(handle));
            }

            let mut sub_materials = Vec::with_capacity(key.len());
            if let Some(handle) = default_material {
                sub_materials.push(SubMaterial {
                    name: geometry.object_type.clone(),
                    material: handle,
                });
            }
            for style in &geometry.styles {
                let handle = registry.resolve_or_create(style, slots, host);
                sub_materials.push(SubMaterial {
                    name: style.name.clone(),
                    material: handle,
                });
            }

            let handle = host.add_multi(sub_materials);
            if let Some(slot) = slots.try_acquire() {
                host.put_to_slot(handle, slot);
            }
            tracing::debug!(
                object_type = %geometry.object_type,
                sub_slots = key.len(),
                "built composite material"
            );
            cache.composites.insert(key, handle);
            Ok(Some(handle))
        }
    }
}
