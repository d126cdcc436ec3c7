//! Mesh data structures for voxel rendering.
//!
//! A `ChunkMesh` is the vertex/index stream of one chunk. Chunks hold it behind
//! an `Arc` (`MeshHandle`) and replace the whole handle on rebuild, so anyone
//! still holding the old handle keeps a complete, consistent buffer.

use std::sync::Arc;

use super::face::Face;
use crate::engine_state::rendering::{meshing::MeshError, Vertex};

/// Shared, immutable handle to a built chunk mesh.
pub type MeshHandle = Arc<ChunkMesh>;

/// Vertices per emitted quad.
pub const VERTICES_PER_FACE: usize = 4;
/// Indices per emitted quad (two triangles).
pub const INDICES_PER_FACE: usize = 6;

/// The vertex and index buffers of one chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// Four vertices per face, in face emission order
    pub vertices: Vec<Vertex>,
    /// Six indices per face, referencing `vertices`
    pub indices: Vec<u32>,
    /// Rebuild counter of the owning chunk. 0 means never built.
    pub generation: u64,
}

impl ChunkMesh {
    /// Creates an empty mesh with generation 0.
    pub fn empty() -> Self {
        ChunkMesh::default()
    }

    /// Creates an empty mesh with room for exactly `faces` faces.
    ///
    /// # Errors
    /// Returns `MeshError::Allocation` if either scratch buffer cannot be reserved.
    pub fn with_face_capacity(faces: usize, generation: u64) -> Result<Self, MeshError> {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        vertices
            .try_reserve_exact(faces.saturating_mul(VERTICES_PER_FACE))
            .map_err(|source| MeshError::Allocation { faces, source })?;
        indices
            .try_reserve_exact(faces.saturating_mul(INDICES_PER_FACE))
            .map_err(|source| MeshError::Allocation { faces, source })?;
        Ok(ChunkMesh {
            vertices,
            indices,
            generation,
        })
    }

    /// Appends one quad.
    pub fn push_face(&mut self, face: &Face) {
        let base_index = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&face.generate_face_vertices());
        self.indices.extend_from_slice(&Self::generate_face_indices(base_index));
    }

    /// Generates the two triangles of a quad whose first vertex is `base_index`.
    ///
    /// Both triangles keep the quad's counter-clockwise winding.
    pub fn generate_face_indices(base_index: u32) -> [u32; INDICES_PER_FACE] {
        [
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]
    }

    /// Number of indices the renderer should draw.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.indices.len() / INDICES_PER_FACE
    }

    /// Returns `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
