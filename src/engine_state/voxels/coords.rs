//! # Coordinate Module
//!
//! Conversions between the three coordinate spaces of the voxel world:
//!
//! * **Global** block coordinates `(x, y, z)`, any integer.
//! * **Chunk** coordinates `(cx, cz)`, found by flooring `x / CHUNK_WIDTH` and
//!   `z / CHUNK_DEPTH` toward negative infinity.
//! * **Local** coordinates inside a chunk, the Euclidean remainder of the global
//!   coordinate, always in `[0, CHUNK_WIDTH)` / `[0, CHUNK_DEPTH)`.
//!
//! Chunks span the full world height, so `y` passes through unchanged.

use cgmath::{Point2, Point3};

use super::chunk::{CHUNK_DEPTH, CHUNK_WIDTH};

/// Chunk coordinate of a global coordinate along an axis of length `extent`.
///
/// Floors toward negative infinity, so `-1` lands in chunk `-1`, not `0`.
#[inline]
pub fn chunk_coord(global: i32, extent: i32) -> i32 {
    global.div_euclid(extent)
}

/// Local coordinate of a global coordinate along an axis of length `extent`.
///
/// Always in `[0, extent)`.
#[inline]
pub fn local_coord(global: i32, extent: i32) -> i32 {
    global.rem_euclid(extent)
}

/// A global block position split into the owning chunk and the position inside it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockAddress {
    /// Chunk coordinates `(cx, cz)`.
    pub chunk: Point2<i32>,
    /// Position inside the chunk. `y` is not range checked.
    pub local: Point3<i32>,
}

impl BlockAddress {
    /// Splits a global block position.
    pub fn from_global(x: i32, y: i32, z: i32) -> Self {
        BlockAddress {
            chunk: Point2::new(chunk_coord(x, CHUNK_WIDTH), chunk_coord(z, CHUNK_DEPTH)),
            local: Point3::new(local_coord(x, CHUNK_WIDTH), y, local_coord(z, CHUNK_DEPTH)),
        }
    }

    /// Reassembles the global block position.
    pub fn to_global(&self) -> Point3<i32> {
        Point3::new(
            self.chunk.x * CHUNK_WIDTH + self.local.x,
            self.local.y,
            self.chunk.y * CHUNK_DEPTH + self.local.z,
        )
    }
}
