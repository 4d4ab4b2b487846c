// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Scene Import
//!
//! Conversion of building elements into host-scene objects: meshes with
//! boundary-aware edge visibility, and deduplicated, composite-aware
//! materials published through a bounded editor channel.
//!
//! The pipeline is strictly single-threaded and pull-driven: the
//! [`Importer`] blocks on each provider step and fully converts one element
//! (material composition, mesh assembly, scene attachment) before pulling
//! the next. Everything shared between elements - the material registry,
//! the composite cache, the slot allocator - is scoped to one run.
//!
//! ## Quick Start
//!
//! ```rust
//! use ifc_scene_core::{BufferedProvider, Element, TriangulatedGeometry};
//! use ifc_scene_import::{Importer, MemoryHost};
//! use nalgebra::Matrix4;
//!
//! let mut provider = BufferedProvider::new(vec![Element {
//!     id: 1,
//!     guid: "2O2Fr$t4X7Zf8NOew3FLOH".to_string(),
//!     element_type: "IfcWall".to_string(),
//!     name: "South wall".to_string(),
//!     transform: Matrix4::identity(),
//!     geometry: TriangulatedGeometry::default(),
//! }]);
//!
//! let mut host = MemoryHost::new();
//! let stats = Importer::default().run(&mut provider, &mut host).unwrap();
//! assert_eq!(stats.elements, 1);
//! assert_eq!(host.nodes().len(), 1);
//! ```

pub mod composite;
pub mod driver;
pub mod error;
pub mod host;
pub mod material;
pub mod memory;
pub mod mesh;

pub use composite::{compose, CompositeCache, CompositeKey};
pub use driver::{ImportOptions, ImportStats, Importer};
pub use error::{Error, Result};
pub use host::{
    ImportHost, MaterialEditor, MaterialHandle, MaterialLibrary, ProgressSink, SceneGraph,
    SceneNode, StandardMaterial, SubMaterial,
};
pub use material::{MaterialKey, MaterialRegistry, SlotAllocator, SLOT_CAPACITY};
pub use memory::{MemoryHost, StoredMaterial};
pub use mesh::{build_mesh, SceneMesh, TriFace};
