// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building elements and their triangulated geometry buffers

use nalgebra::Matrix4;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::style::Style;

/// Sentinel material id meaning "no specific style" for a face.
/// Faces carrying it are rendered with a default material named after the
/// element's object type.
pub const NO_STYLE: i32 = -1;

/// Triangulated element geometry, kept in the flat buffers providers emit.
///
/// Indices in `faces` and `boundary_edges` address the vertex triples in
/// `vertices`; entries in `material_ids` address `styles` (or are
/// [`NO_STYLE`]). The buffers are validated by the import side, not here.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangulatedGeometry {
    /// Vertex positions, flat (x, y, z) triples
    pub vertices: Vec<f32>,
    /// Triangle vertex indices, flat triples
    pub faces: Vec<u32>,
    /// Unordered vertex-index pairs marking real surface boundaries,
    /// as opposed to edges introduced by triangulation
    pub boundary_edges: Vec<u32>,
    /// Per-face style index into `styles`, or [`NO_STYLE`]
    pub material_ids: Vec<i32>,
    /// Styles referenced by this element, in stable order
    pub styles: Vec<Style>,
    /// The owning element's type, echoed here so geometry alone is enough
    /// to name a default material
    pub object_type: String,
}

impl TriangulatedGeometry {
    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len() / 3
    }

    /// Get boundary-edge count
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.boundary_edges.len() / 2
    }

    /// Check if the geometry carries no vertices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True iff any face is marked [`NO_STYLE`] and therefore needs the
    /// default material named after the element's object type
    #[inline]
    pub fn needs_default_style(&self) -> bool {
        self.material_ids.contains(&NO_STYLE)
    }
}

/// One building element as yielded by a provider step.
///
/// Ownership is transient: the import pipeline consumes an element
/// immediately and never retains it.
#[derive(Debug, Clone)]
pub struct Element {
    /// Numeric id from the source model
    pub id: u64,
    /// Globally unique id from the source model
    pub guid: String,
    /// Element type, e.g. `IfcWall`
    pub element_type: String,
    /// Human-readable name
    pub name: String,
    /// Placement, local to world
    pub transform: Matrix4<f64>,
    /// Triangulated geometry with resolved styles
    pub geometry: TriangulatedGeometry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let geometry = TriangulatedGeometry {
            vertices: vec![0.0; 12],
            faces: vec![0, 1, 2, 0, 2, 3],
            boundary_edges: vec![0, 1, 1, 2],
            material_ids: vec![0, 0],
            styles: vec![Style::named("Brick")],
            object_type: "IfcWall".to_string(),
        };
        assert_eq!(geometry.vertex_count(), 4);
        assert_eq!(geometry.face_count(), 2);
        assert_eq!(geometry.edge_count(), 2);
        assert!(!geometry.is_empty());
    }

    #[test]
    fn test_needs_default_style() {
        let mut geometry = TriangulatedGeometry {
            material_ids: vec![0, 1, 0],
            ..Default::default()
        };
        assert!(!geometry.needs_default_style());

        geometry.material_ids[1] = NO_STYLE;
        assert!(geometry.needs_default_style());

        // an element with no faces never needs a default
        geometry.material_ids.clear();
        assert!(!geometry.needs_default_style());
    }
}
