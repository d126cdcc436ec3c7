//! Rendering data for the voxel engine.
//!
//! This module produces everything a GPU backend needs to draw the world: the
//! packed `Vertex` format and the per-chunk meshes built by `meshing`. Uploading
//! and drawing are left to the host; `ChunkMesh::vertex_bytes` and
//! `ChunkMesh::index_bytes` give the raw buffers.

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use vertex::Vertex;
