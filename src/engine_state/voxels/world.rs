//! # World Module
//!
//! This module provides the `World` struct which owns every chunk of the voxel
//! world and resolves global block coordinates to the chunk that stores them.
//!
//! ## Architecture
//!
//! The world is a fixed, square grid of `size × size` chunks addressed by
//! non-negative chunk coordinates. Chunks are generated once when the world is
//! created and dropped with it; there is no streaming and no growth.
//!
//! ## Coordinate Resolution
//!
//! Global coordinates are split with floor division and a Euclidean remainder
//! (see `coords`), so the arithmetic is correct below zero. Because the grid only
//! stores non-negative chunk coordinates, any position in a negative chunk still
//! resolves to "not found".
//!
//! ## Mutation
//!
//! `set_block` is the only way to change a block through the world, and the only
//! place a chunk's mesh gets invalidated.

use cgmath::Point2;

use super::block::block_type::BlockType;
use super::block::Block;
use super::chunk::{Chunk, ChunkGeneration, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};
use super::coords::BlockAddress;

/// Number of chunks per side of the default world.
pub const DEFAULT_WORLD_SIZE: i32 = 3;

/// Represents a voxel world composed of a fixed grid of chunks.
///
/// # Examples
///
/// ```
/// use voxel_core::{BlockType, ChunkGeneration, World};
///
/// let mut world = World::new(3, ChunkGeneration::Layered);
/// world.set_block(10, 30, 10, BlockType::STONE);
/// assert_eq!(world.get_block(10, 30, 10).map(|b| b.get_type()), Some(BlockType::STONE));
/// assert!(world.get_chunk(0, 0).unwrap().is_dirty());
/// ```
pub struct World {
    /// Chunks per side.
    size: i32,
    /// Chunks in `cx * size + cz` order.
    chunks: Vec<Chunk>,
}

impl World {
    /// Creates a world of `size × size` chunks, each filled by `generation`.
    ///
    /// A non-positive size yields a world with no chunks, in which every lookup
    /// is "not found".
    pub fn new(size: i32, generation: ChunkGeneration) -> Self {
        let size = size.max(0);
        let mut chunks = Vec::with_capacity((size * size) as usize);
        for cx in 0..size {
            for cz in 0..size {
                chunks.push(Chunk::generate(Point2::new(cx, cz), generation));
            }
        }
        log::info!(
            "Created {}x{} chunk world ({:?} generation)",
            size,
            size,
            generation
        );
        World { size, chunks }
    }

    /// Chunks per side.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Global extent of the world along X and Z, in blocks.
    pub fn block_extent(&self) -> (i32, i32) {
        (self.size * CHUNK_WIDTH, self.size * CHUNK_DEPTH)
    }

    fn chunk_index(&self, cx: i32, cz: i32) -> Option<usize> {
        if (0..self.size).contains(&cx) && (0..self.size).contains(&cz) {
            Some((cx * self.size + cz) as usize)
        } else {
            None
        }
    }

    /// Retrieves the chunk at the specified chunk coordinates.
    ///
    /// # Returns
    /// `None` outside `[0, size)` on either axis.
    pub fn get_chunk(&self, cx: i32, cz: i32) -> Option<&Chunk> {
        self.chunk_index(cx, cz).map(|index| &self.chunks[index])
    }

    /// Mutable access to a chunk, for rebuilding its mesh.
    ///
    /// Block edits should go through `set_block`.
    pub fn get_chunk_mut(&mut self, cx: i32, cz: i32) -> Option<&mut Chunk> {
        self.chunk_index(cx, cz).map(move |index| &mut self.chunks[index])
    }

    /// All chunks, in `cx`-major order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// All chunks, mutably, in `cx`-major order.
    pub fn chunks_mut(&mut self) -> impl Iterator<Item = &mut Chunk> {
        self.chunks.iter_mut()
    }

    fn resolve(&self, x: i32, y: i32, z: i32) -> Option<(usize, BlockAddress)> {
        let address = BlockAddress::from_global(x, y, z);
        let index = self.chunk_index(address.chunk.x, address.chunk.y)?;
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return None;
        }
        Some((index, address))
    }

    /// Looks up the block at the given global coordinates.
    ///
    /// # Returns
    /// `None` if the position is outside the world grid or outside `[0, CHUNK_HEIGHT)`.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Option<&Block> {
        let (index, address) = self.resolve(x, y, z)?;
        self.chunks[index].get_block_at(address.local.x, address.local.y, address.local.z)
    }

    /// Returns `true` if the block at the given position exists and is solid.
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_block(x, y, z).is_some_and(Block::is_solid)
    }

    /// Overwrites the block at the given global coordinates and marks the owning
    /// chunk dirty.
    ///
    /// Positions outside the world are silently ignored.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) {
        let Some((index, address)) = self.resolve(x, y, z) else {
            log::trace!("Ignoring edit outside the world at ({}, {}, {})", x, y, z);
            return;
        };
        self.chunks[index].set_block_at(address.local.x, address.local.y, address.local.z, block_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::meshing::ChunkMesh;

    fn clean_world(size: i32) -> World {
        let mut world = World::new(size, ChunkGeneration::Empty);
        for chunk in world.chunks_mut() {
            chunk.install_mesh(ChunkMesh::empty());
        }
        world
    }

    #[test]
    fn get_chunk_is_bounds_checked() {
        let world = World::new(3, ChunkGeneration::Empty);
        assert!(world.get_chunk(0, 0).is_some());
        assert!(world.get_chunk(2, 2).is_some());
        assert_eq!(world.get_chunk(2, 1).unwrap().position, Point2::new(2, 1));
        assert!(world.get_chunk(3, 0).is_none());
        assert!(world.get_chunk(0, 3).is_none());
        assert!(world.get_chunk(-1, 0).is_none());
    }

    #[test]
    fn block_extent_covers_every_chunk() {
        let world = World::new(3, ChunkGeneration::Solid);
        assert_eq!(world.size(), 3);
        let (width, depth) = world.block_extent();
        assert_eq!((width, depth), (96, 96));
        assert!(world.is_solid(width - 1, 0, depth - 1));
        assert!(world.get_block(width, 0, 0).is_none());
        assert!(world.get_block(0, 0, depth).is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut world = World::new(3, ChunkGeneration::Layered);
        let mut rng = fastrand::Rng::with_seed(42);
        let types = [BlockType::AIR, BlockType::GRASS, BlockType::DIRT, BlockType::STONE];
        for _ in 0..2_000 {
            let x = rng.i32(0..96);
            let y = rng.i32(0..CHUNK_HEIGHT);
            let z = rng.i32(0..96);
            let block_type = types[rng.usize(0..types.len())];
            world.set_block(x, y, z, block_type);
            assert_eq!(world.get_block(x, y, z).map(Block::get_type), Some(block_type));
        }
    }

    #[test]
    fn set_block_dirties_only_owning_chunk() {
        let mut world = clean_world(3);
        world.set_block(40, 10, 70, BlockType::STONE);
        for chunk in world.chunks() {
            assert_eq!(chunk.is_dirty(), chunk.position == Point2::new(1, 2));
        }
    }

    #[test]
    fn out_of_world_edits_are_ignored() {
        let mut world = clean_world(3);
        for &(x, y, z) in &[
            (-1, 10, 10),
            (10, 10, -1),
            (96, 10, 10),
            (10, 10, 96),
            (10, -1, 10),
            (10, CHUNK_HEIGHT, 10),
        ] {
            world.set_block(x, y, z, BlockType::STONE);
            assert!(world.get_block(x, y, z).is_none());
        }
        assert!(world.chunks().all(|chunk| !chunk.is_dirty()));
    }

    #[test]
    fn negative_coordinates_resolve_to_not_found() {
        let world = World::new(3, ChunkGeneration::Solid);
        assert!(world.get_block(-1, 0, 0).is_none());
        assert!(world.get_block(0, 0, -32).is_none());
        assert!(world.is_solid(0, 0, 0));
    }

    #[test]
    fn lookups_cross_chunk_boundaries() {
        let mut world = World::new(2, ChunkGeneration::Empty);
        world.set_block(31, 5, 0, BlockType::DIRT);
        world.set_block(32, 5, 0, BlockType::STONE);
        let first = world.get_chunk(0, 0).unwrap();
        let second = world.get_chunk(1, 0).unwrap();
        assert_eq!(first.get_block_at(31, 5, 0).map(Block::get_type), Some(BlockType::DIRT));
        assert_eq!(second.get_block_at(0, 5, 0).map(Block::get_type), Some(BlockType::STONE));
    }

    #[test]
    fn empty_world_has_no_blocks() {
        let world = World::new(0, ChunkGeneration::Layered);
        assert_eq!(world.chunks().count(), 0);
        assert!(world.get_block(0, 0, 0).is_none());
    }
}
