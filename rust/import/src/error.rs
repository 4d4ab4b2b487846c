use thiserror::Error;

/// Result type for import operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting elements into scene objects
#[derive(Error, Debug)]
pub enum Error {
    #[error("Face {face} has material index {index} but the element carries {style_count} styles")]
    MaterialIndex {
        face: usize,
        index: i32,
        style_count: usize,
    },

    #[error("Expected one material index per face, got {material_ids} for {faces} faces")]
    MaterialIdCount { material_ids: usize, faces: usize },

    #[error("Face {face} references vertex {vertex} but the mesh has {vertex_count} vertices")]
    FaceVertex {
        face: usize,
        vertex: u32,
        vertex_count: usize,
    },

    #[error("Boundary edge {edge} references vertex {vertex} but the mesh has {vertex_count} vertices")]
    EdgeVertex {
        edge: usize,
        vertex: u32,
        vertex_count: usize,
    },

    #[error("Malformed geometry buffer: {0}")]
    MalformedBuffer(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ifc_scene_core::Error),
}
