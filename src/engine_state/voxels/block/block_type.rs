//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification and conversion
//! from the compact storage representation.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The set is closed: every voxel holds exactly one of these tags. The
/// `FromPrimitive` derive allows conversion from the compact integer form
/// stored inside a chunk.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize,
)]
pub enum BlockType {
    /// Absence of solid matter. Never produces a face and never collides.
    AIR,

    /// A grass block, found on the top layer of generated terrain.
    GRASS,

    /// A plain dirt block, found under the grass layer.
    DIRT,

    /// A stone block. Fills the bottom of generated terrain and is the block
    /// the player places.
    STONE,
}

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// Unknown tags decode as `AIR`, so a corrupted cell behaves like empty space
    /// rather than aborting a lookup.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    ///
    /// # Returns
    /// The corresponding `BlockType`
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Self {
        num::FromPrimitive::from_u8(btype).unwrap_or(BlockType::AIR)
    }

    /// Returns `true` for every block type that occupies space.
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }

    /// Picks a random solid block type (excluding AIR).
    pub fn get_random_solid(rng: &mut fastrand::Rng) -> Self {
        Self::get_block_type_from_int(rng.u8(1..4))
    }
}
