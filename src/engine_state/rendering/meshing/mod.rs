//! Mesh generation for voxel rendering.
//!
//! This module turns a chunk's blocks into the vertex/index stream the renderer
//! draws. Only faces that border air (or the edge of the chunk, which counts as
//! air) are emitted; a face shared by two solid blocks can never be seen and is
//! skipped.
//!
//! # Rebuild Protocol
//! 1. The renderer asks for a chunk's mesh right before drawing it
//! 2. If the chunk is clean, nothing happens
//! 3. Otherwise exposed faces are counted, scratch buffers are reserved for
//!    exactly that many faces, and the faces are emitted
//! 4. The finished mesh replaces the chunk's handle and the dirty flag is cleared
//!
//! A failed rebuild leaves the previous handle in place and the chunk dirty, so
//! the next draw retries.
//!
//! # Face Directions
//! Each of the six sides of a solid block is tested on its own and emitted when
//! its neighbour is air, so a lone block produces a closed cube.

use std::collections::TryReserveError;

use thiserror::Error;
use web_time::Instant;

use crate::engine_state::voxels::{
    block::block_side::BlockSide,
    chunk::{Chunk, CHUNK_SIZE},
};

mod mesh;

pub use mesh::*;

/// Upper bound on the faces of one chunk: every block exposing all six sides.
pub const MAX_FACES_PER_CHUNK: usize = CHUNK_SIZE * 6;

/// Reasons a mesh rebuild can be abandoned.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The scratch vertex or index buffer could not be reserved.
    #[error("failed to reserve mesh buffers for {faces} faces")]
    Allocation {
        /// Number of faces the buffers were sized for
        faces: usize,
        /// The allocator's error
        #[source]
        source: TryReserveError,
    },
    /// The chunk exposes more faces than the mesher's capacity.
    #[error("chunk exposes {required} faces, exceeding the mesh capacity of {capacity}")]
    CapacityExceeded {
        /// Faces the chunk needs
        required: usize,
        /// Faces the mesher allows
        capacity: usize,
    },
}

/// Builds chunk meshes with naive per-voxel face culling.
#[derive(Debug, Clone)]
pub struct Mesher {
    /// Maximum faces a single chunk mesh may hold
    max_faces: usize,
}

impl Default for Mesher {
    fn default() -> Self {
        Mesher::new()
    }
}

impl Mesher {
    /// Creates a mesher bounded by the worst case, `MAX_FACES_PER_CHUNK`.
    pub fn new() -> Self {
        Mesher {
            max_faces: MAX_FACES_PER_CHUNK,
        }
    }

    /// Creates a mesher with a custom face capacity.
    pub fn with_face_capacity(max_faces: usize) -> Self {
        Mesher { max_faces }
    }

    /// The face capacity of this mesher.
    pub fn face_capacity(&self) -> usize {
        self.max_faces
    }

    /// Sides of the block at the given local position that border air or the
    /// chunk edge.
    pub fn exposed_sides(chunk: &Chunk, x: i32, y: i32, z: i32) -> impl Iterator<Item = BlockSide> {
        let adjacency = chunk.generate_adjacent_blocks(x, y, z);
        BlockSide::all()
            .into_iter()
            .filter(move |side| !adjacency[*side as usize])
    }

    /// Counts the faces a mesh of `chunk` would contain.
    pub fn count_faces(chunk: &Chunk) -> usize {
        chunk
            .iter_blocks()
            .map(|(position, _)| Self::exposed_sides(chunk, position.x, position.y, position.z).count())
            .sum()
    }

    /// Builds a mesh for `chunk` without touching the chunk.
    ///
    /// # Errors
    /// `MeshError::CapacityExceeded` if the chunk exposes more faces than this
    /// mesher allows; `MeshError::Allocation` if the buffers cannot be reserved.
    pub fn build(&self, chunk: &Chunk, generation: u64) -> Result<ChunkMesh, MeshError> {
        let required = Self::count_faces(chunk);
        if required > self.max_faces {
            return Err(MeshError::CapacityExceeded {
                required,
                capacity: self.max_faces,
            });
        }

        let mut mesh = ChunkMesh::with_face_capacity(required, generation)?;
        for (position, block) in chunk.iter_blocks() {
            for side in Self::exposed_sides(chunk, position.x, position.y, position.z) {
                let face = Face::new(position.x, position.y, position.z, block.get_type(), side);
                mesh.push_face(&face);
            }
        }

        debug_assert_eq!(mesh.face_count(), required);
        Ok(mesh)
    }

    /// Rebuilds the mesh of `chunk` if it is dirty.
    ///
    /// # Returns
    /// `Ok(true)` if a new mesh was installed, `Ok(false)` if the chunk was
    /// already clean and nothing changed.
    ///
    /// # Errors
    /// Any error from [`Mesher::build`]. The chunk then keeps its previous mesh
    /// and stays dirty.
    pub fn rebuild(&self, chunk: &mut Chunk) -> Result<bool, MeshError> {
        if !chunk.is_dirty() {
            return Ok(false);
        }

        let start = Instant::now();
        let generation = chunk.mesh().generation + 1;
        let mesh = self.build(chunk, generation)?;
        log::debug!(
            "Meshed chunk ({}, {}): {} faces, generation {}, {:?}",
            chunk.position.x,
            chunk.position.y,
            mesh.face_count(),
            generation,
            start.elapsed()
        );
        chunk.install_mesh(mesh);
        Ok(true)
    }
}
