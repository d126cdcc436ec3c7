//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, and the block cell
//! stored inside chunks.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Represents a single voxel block in the world.
///
/// This is a lightweight structure that stores only the type tag. Whether the
/// block is solid is derived from the tag.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute keeps the layout fixed so a chunk's voxel buffer
/// can be viewed as plain bytes.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// An air block. Zeroed memory decodes to this value.
    pub const AIR: Block = Block { block_type: 0 };

    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// Decodes the stored tag.
    pub fn get_type(&self) -> BlockType {
        BlockType::get_block_type_from_int(self.block_type)
    }

    /// Overwrites the stored tag.
    pub fn set_type(&mut self, block_type: BlockType) {
        self.block_type = block_type as BlockTypeSize;
    }

    /// Returns `true` unless this is an air block.
    pub fn is_solid(&self) -> bool {
        self.get_type().is_solid()
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::AIR
    }
}
