// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material identity, the bounded publish channel, and the run-scoped
//! material registry.
//!
//! Materials are deduplicated by a content fingerprint of the resolved
//! style, not by display name. Two styles that share a name but differ in
//! any attribute get distinct materials; the name stays human-facing (it is
//! what the library registers and what sub-slots are labelled with).

use std::hash::{Hash, Hasher};

use ifc_scene_core::{Colour, Style};
use rustc_hash::{FxHashMap, FxHasher};

use crate::host::{ImportHost, MaterialHandle, StandardMaterial};

/// Capacity of the host's material-publishing channel. Materials created
/// once every slot is taken remain fully usable, just unpublished.
pub const SLOT_CAPACITY: usize = 24;

/// Content fingerprint of a resolved style.
///
/// Uses FxHasher for speed - we don't need cryptographic hashing, and the
/// 64-bit output makes collisions extremely rare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialKey(u64);

impl MaterialKey {
    /// Fingerprint a style: name plus the presence and exact bit pattern of
    /// each optional attribute
    pub fn of_style(style: &Style) -> Self {
        let mut hasher = FxHasher::default();
        style.name.hash(&mut hasher);
        hash_opt_colour(&mut hasher, style.diffuse);
        hash_opt_colour(&mut hasher, style.specular);
        hash_opt_scalar(&mut hasher, style.specularity);
        hash_opt_scalar(&mut hasher, style.transparency);
        Self(hasher.finish())
    }

    /// Fingerprint of the default material for an object type. Equal to the
    /// fingerprint of an attribute-less style carrying the same name, so a
    /// bare style named like the type resolves to the same material.
    pub fn of_default(object_type: &str) -> Self {
        let mut hasher = FxHasher::default();
        object_type.hash(&mut hasher);
        hash_opt_colour(&mut hasher, None);
        hash_opt_colour(&mut hasher, None);
        hash_opt_scalar(&mut hasher, None);
        hash_opt_scalar(&mut hasher, None);
        Self(hasher.finish())
    }
}

fn hash_opt_colour(hasher: &mut FxHasher, colour: Option<Colour>) {
    match colour {
        Some(c) => {
            1u8.hash(hasher);
            // Convert f32 to bits for reliable hashing
            c.r.to_bits().hash(hasher);
            c.g.to_bits().hash(hasher);
            c.b.to_bits().hash(hasher);
        }
        None => 0u8.hash(hasher),
    }
}

fn hash_opt_scalar(hasher: &mut FxHasher, value: Option<f32>) {
    match value {
        Some(v) => {
            1u8.hash(hasher);
            v.to_bits().hash(hasher);
        }
        None => 0u8.hash(hasher),
    }
}

/// The bounded slot channel, modelled as an explicit value type so the cap
/// and its degrade behaviour are testable on their own.
///
/// The counter starts at the host library's current size (new materials
/// publish after pre-existing ones), only ever grows, and never exceeds
/// the capacity.
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    next: usize,
    capacity: usize,
    published: usize,
    overflow_logged: bool,
}

impl SlotAllocator {
    /// Allocator over the standard [`SLOT_CAPACITY`] slots, starting at
    /// `start` (the host library's current material count)
    pub fn new(start: usize) -> Self {
        Self::with_capacity(start, SLOT_CAPACITY)
    }

    /// Allocator with an explicit capacity
    pub fn with_capacity(start: usize, capacity: usize) -> Self {
        Self {
            next: start,
            capacity,
            published: 0,
            overflow_logged: false,
        }
    }

    /// Claim the next slot, or `None` once the channel is full. Overflow is
    /// non-fatal; the caller simply skips publishing.
    pub fn try_acquire(&mut self) -> Option<usize> {
        if self.next < self.capacity {
            let slot = self.next;
            self.next += 1;
            self.published += 1;
            Some(slot)
        } else {
            if !self.overflow_logged {
                tracing::warn!(
                    capacity = self.capacity,
                    "material slots exhausted, further materials stay unpublished"
                );
                self.overflow_logged = true;
            }
            None
        }
    }

    /// Number of slots claimed through this allocator
    #[inline]
    pub fn published(&self) -> usize {
        self.published
    }

    /// Check if the channel has no slots left
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.next >= self.capacity
    }
}

/// Run-scoped material lookup and creation.
///
/// Keyed by [`MaterialKey`]; a key hit needs no attribute re-verification
/// because the key is the attributes. Discarded with the import session.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: FxHashMap<MaterialKey, MaterialHandle>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a style to its material, creating and publishing it on first
    /// sight
    pub fn resolve_or_create(
        &mut self,
        style: &Style,
        slots: &mut SlotAllocator,
        host: &mut dyn ImportHost,
    ) -> MaterialHandle {
        let key = MaterialKey::of_style(style);
        if let Some(&handle) = self.materials.get(&key) {
            return handle;
        }
        self.create(key, StandardMaterial::from_style(style), slots, host)
    }

    /// Resolve the attribute-less default material named after an object
    /// type, for faces carrying no specific style
    pub fn resolve_default(
        &mut self,
        object_type: &str,
        slots: &mut SlotAllocator,
        host: &mut dyn ImportHost,
    ) -> MaterialHandle {
        let key = MaterialKey::of_default(object_type);
        if let Some(&handle) = self.materials.get(&key) {
            return handle;
        }
        self.create(key, StandardMaterial::named(object_type), slots, host)
    }

    fn create(
        &mut self,
        key: MaterialKey,
        material: StandardMaterial,
        slots: &mut SlotAllocator,
        host: &mut dyn ImportHost,
    ) -> MaterialHandle {
        let name = material.name.clone();
        let handle = host.add_standard(material);
        if let Some(slot) = slots.try_acquire() {
            host.put_to_slot(handle, slot);
        }
        tracing::debug!(material = %name, handle = handle.raw(), "created material");
        self.materials.insert(key, handle);
        handle
    }

    /// Number of distinct materials resolved this run
    #[inline]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Check if no materials were resolved yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MaterialLibrary;
    use crate::memory::MemoryHost;

    #[test]
    fn test_key_is_stable_and_attribute_sensitive() {
        let brick = Style::named("Brick").with_diffuse(0.7, 0.3, 0.2);
        assert_eq!(MaterialKey::of_style(&brick), MaterialKey::of_style(&brick.clone()));

        // same display name, different attributes: distinct identity
        let other = Style::named("Brick").with_diffuse(0.2, 0.3, 0.7);
        assert_ne!(MaterialKey::of_style(&brick), MaterialKey::of_style(&other));

        // attribute presence matters even when bits would match defaults
        let bare = Style::named("Brick");
        assert_ne!(MaterialKey::of_style(&brick), MaterialKey::of_style(&bare));
    }

    #[test]
    fn test_default_key_matches_bare_style_of_same_name() {
        assert_eq!(
            MaterialKey::of_default("IfcWall"),
            MaterialKey::of_style(&Style::named("IfcWall"))
        );
        assert_ne!(MaterialKey::of_default("IfcWall"), MaterialKey::of_default("IfcSlab"));
    }

    #[test]
    fn test_allocator_counts_up_to_capacity() {
        let mut slots = SlotAllocator::new(0);
        for expected in 0..SLOT_CAPACITY {
            assert_eq!(slots.try_acquire(), Some(expected));
        }
        assert!(slots.is_exhausted());
        assert_eq!(slots.try_acquire(), None);
        assert_eq!(slots.try_acquire(), None);
        assert_eq!(slots.published(), SLOT_CAPACITY);
    }

    #[test]
    fn test_allocator_seeded_past_existing_materials() {
        let mut slots = SlotAllocator::new(22);
        assert_eq!(slots.try_acquire(), Some(22));
        assert_eq!(slots.try_acquire(), Some(23));
        assert_eq!(slots.try_acquire(), None);
        assert_eq!(slots.published(), 2);
    }

    #[test]
    fn test_allocator_seeded_beyond_capacity_never_publishes() {
        let mut slots = SlotAllocator::new(30);
        assert!(slots.is_exhausted());
        assert_eq!(slots.try_acquire(), None);
        assert_eq!(slots.published(), 0);
    }

    #[test]
    fn test_registry_deduplicates_equal_styles() {
        let mut host = MemoryHost::new();
        let mut registry = MaterialRegistry::new();
        let mut slots = SlotAllocator::new(0);

        let glass = Style::named("Glass").with_transparency(0.8);
        let first = registry.resolve_or_create(&glass, &mut slots, &mut host);
        let second = registry.resolve_or_create(&glass.clone(), &mut slots, &mut host);

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(host.count(), 1);
        // only the creation published
        assert_eq!(host.slots().len(), 1);
    }

    #[test]
    fn test_registry_splits_same_name_different_attributes() {
        let mut host = MemoryHost::new();
        let mut registry = MaterialRegistry::new();
        let mut slots = SlotAllocator::new(0);

        let red = Style::named("Brick").with_diffuse(0.7, 0.2, 0.2);
        let blue = Style::named("Brick").with_diffuse(0.2, 0.2, 0.7);

        let a = registry.resolve_or_create(&red, &mut slots, &mut host);
        let b = registry.resolve_or_create(&blue, &mut slots, &mut host);

        assert_ne!(a, b);
        assert_eq!(host.count(), 2);
    }

    #[test]
    fn test_creation_skips_publishing_when_exhausted() {
        let mut host = MemoryHost::new();
        let mut registry = MaterialRegistry::new();
        let mut slots = SlotAllocator::with_capacity(0, 1);

        registry.resolve_or_create(&Style::named("A"), &mut slots, &mut host);
        registry.resolve_or_create(&Style::named("B"), &mut slots, &mut host);

        // both materials exist, only the first got a slot
        assert_eq!(host.count(), 2);
        assert_eq!(host.slots(), &[(0, MaterialHandle::new(0))]);
    }

    #[test]
    fn test_default_and_matching_bare_style_share_a_material() {
        let mut host = MemoryHost::new();
        let mut registry = MaterialRegistry::new();
        let mut slots = SlotAllocator::new(0);

        let default = registry.resolve_default("IfcWall", &mut slots, &mut host);
        let bare = registry.resolve_or_create(&Style::named("IfcWall"), &mut slots, &mut host);
        assert_eq!(default, bare);
        assert_eq!(host.count(), 1);
    }
}
