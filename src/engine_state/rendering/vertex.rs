//! Vertex data structures for voxel rendering.
//!
//! This module defines the vertex format produced by the mesher. The renderer
//! uploads it as-is, so the layout is fixed with `#[repr(C)]` and the type is
//! `bytemuck::Pod`.

use cgmath::Point3;

/// A vertex of a chunk mesh.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes), chunk-local
/// - Texture Coordinates: [f32; 2] (8 bytes), unit square per face
/// - Block Type: u32 (4 bytes), used by the renderer to pick a texture layer
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local block units
    pub position: [f32; 3],
    /// UV texture coordinates (0.0 or 1.0 on each axis)
    pub tex_coords: [f32; 2],
    /// The block type tag of the voxel this face belongs to
    pub block_type: u32,
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `pos` - The corner position in chunk-local block coordinates
    /// * `u` - U texture coordinate
    /// * `v` - V texture coordinate
    /// * `block_type` - The block type tag
    pub fn new(pos: Point3<i32>, u: f32, v: f32, block_type: u32) -> Self {
        Vertex {
            position: [pos.x as f32, pos.y as f32, pos.z as f32],
            tex_coords: [u, v],
            block_type,
        }
    }
}
