//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for managing
//! 32x64x32 columns of voxel data. It includes chunk generation strategies and the
//! dirty-flag bookkeeping that decides when a chunk's mesh must be rebuilt.
//!
//! ## Storage
//!
//! Blocks live in one owned contiguous buffer of `CHUNK_SIZE` cells, indexed by
//! `flatten_index` (X fastest, then Y, then Z). Every lookup is O(1).
//!
//! ## Mesh Validity
//!
//! A chunk carries a shared handle to its last built mesh. The handle is only
//! meaningful while `is_dirty()` is `false`; every block write sets the flag and
//! a successful rebuild swaps in a new handle and clears it.

use std::sync::Arc;

use cgmath::{Point2, Point3};
use chunk_creation::ChunkCreationIterator;
use chunk_iteration::ChunkBlockIterator;
use serde::{Deserialize, Serialize};

use super::block::block_side::BlockSide;
use super::block::block_type::BlockType;
use super::block::Block;
use crate::engine_state::rendering::meshing::{ChunkMesh, MeshHandle};

mod chunk_creation;
pub mod chunk_iteration;

/// Size of a chunk along X, in blocks.
pub const CHUNK_WIDTH: i32 = 32;
/// Size of a chunk along Y (the full world height), in blocks.
pub const CHUNK_HEIGHT: i32 = 64;
/// Size of a chunk along Z, in blocks.
pub const CHUNK_DEPTH: i32 = 32;
/// The number of blocks in one XY plane of a chunk.
pub const CHUNK_PLANE_SIZE: usize = (CHUNK_WIDTH * CHUNK_HEIGHT) as usize;
/// The total number of blocks in a chunk.
pub const CHUNK_SIZE: usize = CHUNK_PLANE_SIZE * CHUNK_DEPTH as usize;

/// Layered terrain: every `y` below this is stone.
pub const STONE_LAYER_TOP: i32 = 20;
/// Layered terrain: every `y` from `STONE_LAYER_TOP` below this is dirt.
pub const DIRT_LAYER_TOP: i32 = 25;
/// Layered terrain: the single grass layer. Everything above is air.
pub const GRASS_LAYER: i32 = 25;

/// The method used to fill newly created chunks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkGeneration {
    /// Stone, then dirt, then a single grass layer, then air.
    #[default]
    Layered,
    /// All blocks air.
    Empty,
    /// All blocks stone.
    Solid,
    /// Alternating stone and air in all three directions.
    Checkerboard,
    /// Solid blocks of random types scattered at random; `sparseness` is the
    /// probability of air.
    Random {
        /// Probability that a cell is air.
        sparseness: f64,
    },
}

/// Represents a 32x64x32 column of voxel blocks in the world.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates `(cx, cz)`.
    pub position: Point2<i32>,
    blocks: Box<[Block]>,
    dirty: bool,
    mesh: MeshHandle,
}

impl Chunk {
    pub(super) fn from_blocks(position: Point2<i32>, blocks: Box<[Block]>) -> Self {
        Chunk {
            position,
            blocks,
            dirty: true,
            mesh: Arc::new(ChunkMesh::empty()),
        }
    }

    /// Builds a chunk by asking `f` for the block type at every local position.
    pub fn from_fn<F>(position: Point2<i32>, mut f: F) -> Self
    where
        F: FnMut(Point3<i32>) -> BlockType,
    {
        let mut cci = ChunkCreationIterator::new(position);
        while !cci.is_full() {
            let block_type = f(cci.current_position());
            cci.push_block_type(block_type);
        }
        cci.return_chunk()
    }

    /// Creates a chunk using the given generation method.
    pub fn generate(position: Point2<i32>, method: ChunkGeneration) -> Self {
        match method {
            ChunkGeneration::Layered => Chunk::layered(position),
            ChunkGeneration::Empty => Chunk::empty(position),
            ChunkGeneration::Solid => Chunk::solid(position),
            ChunkGeneration::Checkerboard => Chunk::checkerboard(position),
            ChunkGeneration::Random { sparseness } => Chunk::random(position, sparseness),
        }
    }

    /// Creates a new, completely empty chunk (all blocks are air).
    pub fn empty(position: Point2<i32>) -> Self {
        Chunk::from_fn(position, |_| BlockType::AIR)
    }

    /// Creates a new chunk filled with stone.
    pub fn solid(position: Point2<i32>) -> Self {
        Chunk::from_fn(position, |_| BlockType::STONE)
    }

    /// Creates the default terrain: stone below y=20, dirt up to y=24, grass at
    /// y=25 and air above.
    pub fn layered(position: Point2<i32>) -> Self {
        Chunk::from_fn(position, |p| Self::layered_type_at(p.y))
    }

    /// The block type the layered generator places at height `y`.
    pub fn layered_type_at(y: i32) -> BlockType {
        if y < STONE_LAYER_TOP {
            BlockType::STONE
        } else if y < DIRT_LAYER_TOP {
            BlockType::DIRT
        } else if y == GRASS_LAYER {
            BlockType::GRASS
        } else {
            BlockType::AIR
        }
    }

    /// Creates a new chunk with a 3D checkerboard pattern.
    pub fn checkerboard(position: Point2<i32>) -> Self {
        Chunk::from_fn(position, |p| {
            if (p.x + p.y + p.z) % 2 == 0 {
                BlockType::STONE
            } else {
                BlockType::AIR
            }
        })
    }

    /// Creates a new chunk with randomly placed solid blocks of random types.
    ///
    /// The generator is seeded from the chunk position, so the same position
    /// always produces the same chunk.
    pub fn random(position: Point2<i32>, sparseness: f64) -> Self {
        let seed = ((position.x as u32 as u64) << 32) | position.y as u32 as u64;
        let mut rng = fastrand::Rng::with_seed(seed);
        Chunk::from_fn(position, |_| {
            if rng.f64() < sparseness {
                BlockType::AIR
            } else {
                BlockType::get_random_solid(&mut rng)
            }
        })
    }

    /// Maps a local position to its offset in the block buffer.
    ///
    /// # Returns
    /// `None` if any coordinate lies outside the chunk.
    #[inline]
    pub fn flatten_index(cx: i32, cy: i32, cz: i32) -> Option<usize> {
        if (0..CHUNK_WIDTH).contains(&cx)
            && (0..CHUNK_HEIGHT).contains(&cy)
            && (0..CHUNK_DEPTH).contains(&cz)
        {
            Some(cx as usize + CHUNK_WIDTH as usize * cy as usize + CHUNK_PLANE_SIZE * cz as usize)
        } else {
            None
        }
    }

    /// Gets the block at the specified chunk-relative coordinates.
    ///
    /// # Returns
    /// `None` if the coordinates are out of bounds.
    pub fn get_block_at(&self, cx: i32, cy: i32, cz: i32) -> Option<&Block> {
        Self::flatten_index(cx, cy, cz).map(|index| &self.blocks[index])
    }

    /// Overwrites the block at the specified chunk-relative coordinates and marks
    /// the chunk dirty.
    ///
    /// # Returns
    /// `false` if the coordinates are out of bounds, in which case nothing changes.
    pub fn set_block_at(&mut self, cx: i32, cy: i32, cz: i32, block_type: BlockType) -> bool {
        match Self::flatten_index(cx, cy, cz) {
            Some(index) => {
                self.blocks[index].set_type(block_type);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Checks if the block at the specified chunk-relative coordinates is solid.
    ///
    /// Positions outside the chunk count as air.
    pub fn is_block_solid(&self, cx: i32, cy: i32, cz: i32) -> bool {
        self.get_block_at(cx, cy, cz).is_some_and(Block::is_solid)
    }

    /// Determines which neighbours of the block at (x,y,z) are solid.
    ///
    /// # Returns
    /// An array of 6 booleans in `BlockSide` order; `true` means the face on
    /// that side is hidden by a solid neighbour inside this chunk.
    pub fn generate_adjacent_blocks(&self, x: i32, y: i32, z: i32) -> [bool; 6] {
        let mut adjacency_data = [false; 6];
        for side in BlockSide::all() {
            let n = side.normal();
            adjacency_data[side as usize] = self.is_block_solid(x + n.x, y + n.y, z + n.z);
        }
        adjacency_data
    }

    /// Iterates over the non-air blocks of this chunk with their local positions.
    pub fn iter_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// The raw block buffer in storage order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns `true` while the mesh handle does not reflect the current blocks.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The last successfully built mesh.
    pub fn mesh(&self) -> &MeshHandle {
        &self.mesh
    }

    /// Number of indices to draw for the current mesh.
    pub fn index_count(&self) -> u32 {
        self.mesh.index_count()
    }

    /// Swaps in a freshly built mesh and clears the dirty flag.
    pub(crate) fn install_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = Arc::new(mesh);
        self.dirty = false;
    }
}
