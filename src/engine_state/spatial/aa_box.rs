//! Axis-aligned box.

use cgmath::{Point3, Vector3};

/// Axis-aligned box given by its minimum and maximum corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AaBox {
    /// Minimum corner. Assumed component-wise `<= max`.
    pub min: Point3<f32>,
    /// Maximum corner.
    pub max: Point3<f32>,
}

impl AaBox {
    /// Box from `min` to `max`.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        AaBox { min, max }
    }

    /// The unit cube occupied by the block at `(x, y, z)`.
    pub fn unit_block(x: i32, y: i32, z: i32) -> Self {
        let min = Point3::new(x as f32, y as f32, z as f32);
        AaBox {
            min,
            max: min + Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Box of a standing body: `feet` is the centre of the bottom face, `width`
    /// the extent on X and Z, `height` the extent on Y.
    pub fn from_feet(feet: Point3<f32>, width: f32, height: f32) -> Self {
        let half_width = width / 2.0;
        AaBox {
            min: Point3::new(feet.x - half_width, feet.y, feet.z - half_width),
            max: Point3::new(feet.x + half_width, feet.y + height, feet.z + half_width),
        }
    }

    /// Translate self by `v`.
    pub fn translate(mut self, v: Vector3<f32>) -> Self {
        self.min += v;
        self.max += v;
        self
    }

    /// Does self overlap `rhs` with positive volume?
    ///
    /// Uses open intervals on every axis, so boxes that only share a face, edge
    /// or corner do not intersect.
    pub fn intersects(&self, rhs: &AaBox) -> bool {
        for i in 0..3 {
            if self.min[i] >= rhs.max[i] || self.max[i] <= rhs.min[i] {
                return false;
            }
        }
        true
    }

    /// Inclusive range of block cells whose unit cubes could overlap self:
    /// the floor of each face bound.
    pub fn covered_cells(&self) -> (Point3<i32>, Point3<i32>) {
        (
            Point3::new(
                self.min.x.floor() as i32,
                self.min.y.floor() as i32,
                self.min.z.floor() as i32,
            ),
            Point3::new(
                self.max.x.floor() as i32,
                self.max.y.floor() as i32,
                self.max.z.floor() as i32,
            ),
        )
    }
}
