use cgmath::{Point3, Vector3};

use crate::engine_state::{
    rendering::Vertex,
    voxels::block::{block_side::BlockSide, block_type::BlockType, BlockTypeSize},
};

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is defined by four corner points (lower-left, lower-right, upper-right,
/// upper-left). Walking ll → lr → ur → ul is counter-clockwise when the face is
/// viewed from outside the block, so back-face culling keeps exactly the faces
/// that point at the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner of the face in chunk coordinates
    pub ll: Point3<i32>,
    /// Lower-right corner of the face in chunk coordinates
    pub lr: Point3<i32>,
    /// Upper-right corner of the face in chunk coordinates
    pub ur: Point3<i32>,
    /// Upper-left corner of the face in chunk coordinates
    pub ul: Point3<i32>,
    /// The type of the block this face belongs to
    pub block_type: BlockType,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates a new face for a voxel at the given coordinates.
    ///
    /// # Arguments
    /// * `i`, `j`, `k` - The coordinates of the voxel in chunk space
    /// * `block_type` - The type of the block
    /// * `block_side` - Which side of the block this face represents
    pub fn new(i: i32, j: i32, k: i32, block_type: BlockType, block_side: BlockSide) -> Self {
        let (ll, lr, ur, ul) = match block_side {
            BlockSide::FRONT => (
                Point3::new(i, j, k + 1),
                Point3::new(i + 1, j, k + 1),
                Point3::new(i + 1, j + 1, k + 1),
                Point3::new(i, j + 1, k + 1),
            ),
            BlockSide::BACK => (
                Point3::new(i + 1, j, k),
                Point3::new(i, j, k),
                Point3::new(i, j + 1, k),
                Point3::new(i + 1, j + 1, k),
            ),
            BlockSide::BOTTOM => (
                Point3::new(i, j, k),
                Point3::new(i + 1, j, k),
                Point3::new(i + 1, j, k + 1),
                Point3::new(i, j, k + 1),
            ),
            BlockSide::TOP => (
                Point3::new(i, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k),
                Point3::new(i, j + 1, k),
            ),
            BlockSide::LEFT => (
                Point3::new(i, j, k),
                Point3::new(i, j, k + 1),
                Point3::new(i, j + 1, k + 1),
                Point3::new(i, j + 1, k),
            ),
            BlockSide::RIGHT => (
                Point3::new(i + 1, j, k + 1),
                Point3::new(i + 1, j, k),
                Point3::new(i + 1, j + 1, k),
                Point3::new(i + 1, j + 1, k + 1),
            ),
        };

        Face {
            ll,
            lr,
            ur,
            ul,
            block_type,
            block_side,
        }
    }

    /// The winding normal of the quad, `(lr - ll) × (ur - lr)`.
    ///
    /// Equals the outward normal of `block_side` for every face built by `new`.
    pub fn winding_normal(&self) -> Vector3<i32> {
        let a: Vector3<i32> = self.lr - self.ll;
        let b: Vector3<i32> = self.ur - self.lr;
        Vector3::new(
            a.y * b.z - a.z * b.y,
            a.z * b.x - a.x * b.z,
            a.x * b.y - a.y * b.x,
        )
    }

    /// Generates the four vertices of this face in ll, lr, ur, ul order.
    ///
    /// Texture coordinates span the unit square; every vertex carries the block
    /// type tag.
    pub fn generate_face_vertices(&self) -> [Vertex; 4] {
        let block_type = self.block_type as BlockTypeSize as u32;
        [
            Vertex::new(self.ll, 0.0, 0.0, block_type),
            Vertex::new(self.lr, 1.0, 0.0, block_type),
            Vertex::new(self.ur, 1.0, 1.0, block_type),
            Vertex::new(self.ul, 0.0, 1.0, block_type),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_side_winds_counter_clockwise_from_outside() {
        for side in BlockSide::all() {
            let face = Face::new(3, 4, 5, BlockType::STONE, side);
            assert_eq!(face.winding_normal(), side.normal(), "{side:?}");
        }
    }

    #[test]
    fn faces_lie_on_the_block_surface() {
        for side in BlockSide::all() {
            let face = Face::new(0, 0, 0, BlockType::DIRT, side);
            let n = side.normal();
            // Offset along the normal axis is 1 for positive faces and 0 for negative.
            let plane = if n.x + n.y + n.z > 0 { 1 } else { 0 };
            for corner in [face.ll, face.lr, face.ur, face.ul] {
                let along = corner.x * n.x.abs() + corner.y * n.y.abs() + corner.z * n.z.abs();
                assert_eq!(along, plane, "{side:?}");
                assert!([corner.x, corner.y, corner.z].iter().all(|c| (0..=1).contains(c)));
            }
        }
    }

    #[test]
    fn vertices_carry_block_type_and_unit_uvs() {
        let face = Face::new(0, 0, 0, BlockType::GRASS, BlockSide::TOP);
        let vertices = face.generate_face_vertices();
        assert!(vertices.iter().all(|v| v.block_type == BlockType::GRASS as u32));
        let uvs: Vec<[f32; 2]> = vertices.iter().map(|v| v.tex_coords).collect();
        assert_eq!(uvs, vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    }
}
