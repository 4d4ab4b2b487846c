// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Scene Core
//!
//! Data model shared by the scene-import pipeline: resolved surface styles,
//! building elements with triangulated geometry buffers, and the pull-based
//! provider abstraction that yields elements one at a time.
//!
//! Geometry arrives here already triangulated, welded and style-resolved;
//! parsing the source file is entirely the provider's concern. The buffers
//! are kept flat exactly as providers emit them, so an element can go from
//! the provider to mesh assembly without reshaping.
//!
//! ## Quick Start
//!
//! ```rust
//! use ifc_scene_core::{BufferedProvider, Element, ElementProvider, TriangulatedGeometry};
//! use nalgebra::Matrix4;
//!
//! let element = Element {
//!     id: 1,
//!     guid: "2O2Fr$t4X7Zf8NOew3FLOH".to_string(),
//!     element_type: "IfcWall".to_string(),
//!     name: "South wall".to_string(),
//!     transform: Matrix4::identity(),
//!     geometry: TriangulatedGeometry::default(),
//! };
//!
//! let mut provider = BufferedProvider::new(vec![element]);
//! provider.initialize().unwrap();
//! while let Some(element) = provider.next_element() {
//!     println!("element #{}: {}", element.id, element.name);
//! }
//! assert_eq!(provider.progress(), 1.0);
//! ```
//!
//! ## Features
//!
//! - `serde`: Enable serialization support for styles and geometry buffers

pub mod element;
pub mod error;
pub mod provider;
pub mod style;

// Re-export nalgebra's transform type for convenience
pub use nalgebra::Matrix4;

pub use element::{Element, TriangulatedGeometry, NO_STYLE};
pub use error::{Error, Result};
pub use provider::{BufferedProvider, ElementProvider};
pub use style::{Colour, Style};
