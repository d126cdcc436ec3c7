//! # Voxel Engine Core
//!
//! This module contains the voxel data model: the blocks themselves, the chunks
//! that store them, and the world that owns the chunks.
//!
//! ## Architecture
//!
//! * **Block**: Defines individual voxel types and the faces of a block
//! * **Chunk**: A fixed-size dense array of blocks with a dirty flag and a mesh handle
//! * **World**: A fixed grid of chunks with global coordinate resolution
//! * **Coords**: Floor/Euclidean conversions between global, chunk and local space
//!
//! ## Data Flow
//!
//! 1. World receives requests for block access or modification
//! 2. World resolves the owning chunk and local position
//! 3. Writes mark the chunk dirty
//! 4. The mesh is rebuilt lazily the next time the chunk is drawn

pub mod block;
pub mod chunk;
pub mod coords;
pub mod world;
