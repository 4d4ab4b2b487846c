// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh assembly
//!
//! Turns an element's flat buffers into a renderable mesh: faces with
//! per-edge visibility flags and remapped material indices, plus derived
//! vertex normals. Only edges the provider marked as real surface
//! boundaries become visible; everything else is a triangulation seam the
//! host renderer should not draw.

use ifc_scene_core::{TriangulatedGeometry, NO_STYLE};
use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};

/// One triangle: vertex indices, per-edge visibility, material sub-slot.
///
/// Edge `k` connects `vertices[k]` to `vertices[(k + 1) % 3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriFace {
    pub vertices: [u32; 3],
    pub edge_visibility: [bool; 3],
    pub material_index: u32,
}

/// Assembled mesh ready for scene attachment
#[derive(Debug, Clone, Default)]
pub struct SceneMesh {
    /// Vertex positions, flat (x, y, z) triples
    pub positions: Vec<f32>,
    /// Vertex normals, flat (nx, ny, nz) triples, derived after assembly
    pub normals: Vec<f32>,
    pub faces: Vec<TriFace>,
}

impl SceneMesh {
    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Calculate bounds (min, max)
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            let (x, y, z) = (chunk[0], chunk[1], chunk[2]);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        (min, max)
    }

    /// Derive smooth per-vertex normals by accumulating area-weighted face
    /// normals. Must run after every face is in place.
    pub fn build_normals(&mut self) {
        let vertex_count = self.vertex_count();
        self.normals.clear();
        if vertex_count == 0 {
            return;
        }

        let mut normals = vec![Vector3::zeros(); vertex_count];

        for face in &self.faces {
            let i0 = face.vertices[0] as usize;
            let i1 = face.vertices[1] as usize;
            let i2 = face.vertices[2] as usize;

            let v0 = self.position_f64(i0);
            let v1 = self.position_f64(i1);
            let v2 = self.position_f64(i2);

            // cross product length carries the area weighting
            let normal = (v1 - v0).cross(&(v2 - v0));

            normals[i0] += normal;
            normals[i1] += normal;
            normals[i2] += normal;
        }

        self.normals.reserve(vertex_count * 3);
        for normal in normals {
            // vertices referenced by no face (or only degenerate faces)
            // keep an up normal instead of going NaN
            let normalized = if normal.norm_squared() > 0.0 {
                normal.normalize()
            } else {
                Vector3::z()
            };
            self.normals.push(normalized.x as f32);
            self.normals.push(normalized.y as f32);
            self.normals.push(normalized.z as f32);
        }
    }

    #[inline]
    fn position_f64(&self, index: usize) -> Point3<f64> {
        Point3::new(
            self.positions[index * 3] as f64,
            self.positions[index * 3 + 1] as f64,
            self.positions[index * 3 + 2] as f64,
        )
    }
}

#[inline]
fn ordered_edge(a: u32, b: u32) -> (u32, u32) {
    (a.min(b), a.max(b))
}

/// Validate per-face material ids: each must be [`NO_STYLE`] or a valid
/// index into the element's style list, and there must be exactly one per
/// face.
pub fn validate_material_ids(geometry: &TriangulatedGeometry) -> Result<()> {
    if geometry.material_ids.len() != geometry.face_count() {
        return Err(Error::MaterialIdCount {
            material_ids: geometry.material_ids.len(),
            faces: geometry.face_count(),
        });
    }
    let style_count = geometry.styles.len();
    for (face, &id) in geometry.material_ids.iter().enumerate() {
        if id != NO_STYLE && (id < 0 || id as usize >= style_count) {
            return Err(Error::MaterialIndex {
                face,
                index: id,
                style_count,
            });
        }
    }
    Ok(())
}

fn validate_buffers(geometry: &TriangulatedGeometry) -> Result<()> {
    if geometry.vertices.len() % 3 != 0 {
        return Err(Error::MalformedBuffer(format!(
            "vertex buffer length {} is not a multiple of 3",
            geometry.vertices.len()
        )));
    }
    if geometry.faces.len() % 3 != 0 {
        return Err(Error::MalformedBuffer(format!(
            "face buffer length {} is not a multiple of 3",
            geometry.faces.len()
        )));
    }
    if geometry.boundary_edges.len() % 2 != 0 {
        return Err(Error::MalformedBuffer(format!(
            "boundary edge buffer length {} is not a multiple of 2",
            geometry.boundary_edges.len()
        )));
    }

    let vertex_count = geometry.vertex_count();
    for (face, tri) in geometry.faces.chunks_exact(3).enumerate() {
        for &vertex in tri {
            if vertex as usize >= vertex_count {
                return Err(Error::FaceVertex {
                    face,
                    vertex,
                    vertex_count,
                });
            }
        }
    }
    for (edge, pair) in geometry.boundary_edges.chunks_exact(2).enumerate() {
        for &vertex in pair {
            if vertex as usize >= vertex_count {
                return Err(Error::EdgeVertex {
                    edge,
                    vertex,
                    vertex_count,
                });
            }
        }
    }
    Ok(())
}

/// Assemble a mesh from an element's flat buffers.
///
/// Per-face material indices are shifted by one when the element mixes in
/// unstyled faces, aligning faces marked [`NO_STYLE`] with the default
/// material in composite sub-slot 0.
pub fn build_mesh(geometry: &TriangulatedGeometry) -> Result<SceneMesh> {
    validate_buffers(geometry)?;
    validate_material_ids(geometry)?;

    let mut boundary = FxHashSet::default();
    for pair in geometry.boundary_edges.chunks_exact(2) {
        boundary.insert(ordered_edge(pair[0], pair[1]));
    }

    let offset: i32 = if geometry.needs_default_style() { 1 } else { 0 };

    let mut faces = Vec::with_capacity(geometry.face_count());
    for (i, tri) in geometry.faces.chunks_exact(3).enumerate() {
        let (v1, v2, v3) = (tri[0], tri[1], tri[2]);

        let edge_visibility = [
            boundary.contains(&ordered_edge(v1, v2)),
            boundary.contains(&ordered_edge(v2, v3)),
            boundary.contains(&ordered_edge(v3, v1)),
        ];

        faces.push(TriFace {
            vertices: [v1, v2, v3],
            edge_visibility,
            // NO_STYLE shifts to 0, everything else follows behind
            material_index: (geometry.material_ids[i] + offset) as u32,
        });
    }

    let mut mesh = SceneMesh {
        positions: geometry.vertices.clone(),
        normals: Vec::new(),
        faces,
    };
    mesh.build_normals();
    Ok(mesh)
}
