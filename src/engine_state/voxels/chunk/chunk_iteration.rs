//! # Chunk Iteration Module
//!
//! This module provides an iterator over the non-air blocks of a chunk together
//! with their local positions. The mesher and the face counters are built on it.

use cgmath::Point3;

use crate::engine_state::voxels::block::Block;

use super::{Chunk, CHUNK_HEIGHT, CHUNK_WIDTH};

/// An iterator over all non-air blocks in a chunk.
///
/// Walks the dense buffer in storage order, keeping a local cursor in step with
/// the buffer offset so positions never need to be recomputed by division.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Current position in the block buffer
    current_block_offset: usize,
    /// Current X position within the chunk
    local_x: i32,
    /// Current Y position within the chunk
    local_y: i32,
    /// Current Z position within the chunk
    local_z: i32,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first block.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            current_block_offset: 0,
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }

    fn advance(&mut self) {
        self.current_block_offset += 1;
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
}

impl<'a> Iterator for ChunkBlockIterator<'a> {
    type Item = (Point3<i32>, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let blocks = self.chunk_ref.blocks();
        while let Some(block) = blocks.get(self.current_block_offset) {
            let position = Point3::new(self.local_x, self.local_y, self.local_z);
            self.advance();
            if block.is_solid() {
                return Some((position, block));
            }
        }
        None
    }
}
