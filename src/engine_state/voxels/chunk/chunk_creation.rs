//! # Chunk Creation Module
//!
//! This module provides a builder for populating chunks block by block in
//! storage order. Generators only decide *which* block goes at the builder's
//! current position; the builder keeps the dense buffer and the local cursor in
//! step so the flattening used by `Chunk` lookups always matches.
//!
//! ## Storage Order
//!
//! Blocks are pushed with X varying fastest, then Y, then Z, matching
//! `Chunk::flatten_index`.

use cgmath::{Point2, Point3};

use crate::engine_state::voxels::block::{block_type::BlockType, Block};

use super::{Chunk, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_SIZE, CHUNK_WIDTH};

/// A builder for creating and populating chunks in storage order.
pub struct ChunkCreationIterator {
    /// The chunk coordinates of the chunk being created
    position: Point2<i32>,
    /// Dense block storage, filled in flattening order
    blocks: Vec<Block>,
    /// Current X position within the chunk (0..CHUNK_WIDTH)
    local_x: i32,
    /// Current Y position within the chunk (0..CHUNK_HEIGHT)
    local_y: i32,
    /// Current Z position within the chunk (0..CHUNK_DEPTH)
    local_z: i32,
}

impl ChunkCreationIterator {
    /// Creates a new `ChunkCreationIterator` for building a chunk at the given position.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates `(cx, cz)` of the chunk to create
    pub fn new(position: Point2<i32>) -> Self {
        ChunkCreationIterator {
            position,
            blocks: Vec::with_capacity(CHUNK_SIZE),
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }

    /// The local position the next pushed block will occupy.
    pub fn current_position(&self) -> Point3<i32> {
        Point3::new(self.local_x, self.local_y, self.local_z)
    }

    /// Returns `true` once every cell of the chunk has been written.
    pub fn is_full(&self) -> bool {
        self.blocks.len() == CHUNK_SIZE
    }

    /// Adds a block at the current position and advances the cursor.
    ///
    /// Pushing into a full builder is ignored.
    pub fn push_block_type(&mut self, block_type: BlockType) {
        if self.is_full() {
            return;
        }
        self.blocks.push(Block::new(block_type));

        self.local_x += 1;
        if self.local_x == CHUNK_WIDTH {
            self.local_x = 0;
            self.local_y += 1;
            if self.local_y == CHUNK_HEIGHT {
                self.local_y = 0;
                self.local_z += 1;
            }
        }
    }

    /// Finalizes the chunk creation and returns the constructed `Chunk`.
    ///
    /// Cells that were never pushed are filled with air. The chunk starts dirty
    /// so its first draw builds a mesh.
    pub fn return_chunk(mut self) -> Chunk {
        self.blocks.resize(CHUNK_SIZE, Block::AIR);
        debug_assert!(self.local_z <= CHUNK_DEPTH);
        Chunk::from_blocks(self.position, self.blocks.into_boxed_slice())
    }
}
