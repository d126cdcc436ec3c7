//! Mesh data for voxel rendering.
//!
//! # Architecture
//! - [`ChunkMesh`]: The vertex and index buffers of one chunk
//! - [`Face`]: A single quad on one side of one voxel
//!
//! Faces are emitted one per exposed voxel side; there is no merging of
//! coplanar faces.

mod face;
mod mesh;

pub use face::Face;
pub use mesh::*;
