//! Per-axis movement resolution for box-shaped bodies.
//!
//! A move is split into its X, Z and Y parts. Each part is tried on its own and
//! dropped if the body would overlap a solid block, which lets a body slide along
//! walls. The order is always X, then Z, then Y.

use cgmath::{Point3, Vector3};

use super::{AaBox, SpatialQueryEngine};

/// Height gained per iteration when pushing a stuck body out of the ground.
pub const PUSH_OUT_STEP: f32 = 0.1;

/// A standing, box-shaped body. `position` is the centre of its bottom face.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Body {
    /// Feet position in world space
    pub position: Point3<f32>,
    /// Extent on X and Z
    pub width: f32,
    /// Extent on Y
    pub height: f32,
    /// Current vertical velocity, blocks per second
    pub vertical_speed: f32,
    /// Set by a floor contact, cleared by any unobstructed vertical move
    pub grounded: bool,
}

impl Body {
    /// Creates a body at rest.
    pub fn new(position: Point3<f32>, width: f32, height: f32) -> Self {
        Body {
            position,
            width,
            height,
            vertical_speed: 0.0,
            grounded: false,
        }
    }

    /// The body's box if its feet were at `position`.
    pub fn aabb_at(&self, position: Point3<f32>) -> AaBox {
        AaBox::from_feet(position, self.width, self.height)
    }

    /// The body's current box.
    pub fn aabb(&self) -> AaBox {
        self.aabb_at(self.position)
    }
}

impl<'w> SpatialQueryEngine<'w> {
    /// Applies the X and Z parts of `delta`, each only if it does not collide.
    ///
    /// The Y part of `delta` is ignored.
    ///
    /// # Returns
    /// Which of the two axes actually moved, as `(x, z)`.
    pub fn resolve_horizontal(&self, body: &mut Body, delta: Vector3<f32>) -> (bool, bool) {
        let along_x = body.position + Vector3::new(delta.x, 0.0, 0.0);
        let moved_x = !self.collides(&body.aabb_at(along_x));
        if moved_x {
            body.position = along_x;
        }

        let along_z = body.position + Vector3::new(0.0, 0.0, delta.z);
        let moved_z = !self.collides(&body.aabb_at(along_z));
        if moved_z {
            body.position = along_z;
        }

        (moved_x, moved_z)
    }

    /// Moves the body vertically by `dy`.
    ///
    /// On a collision the move is dropped and the vertical speed is zeroed. A
    /// collision while moving down also marks the body as grounded. An
    /// unobstructed move leaves the body airborne.
    ///
    /// # Returns
    /// `true` if the body moved.
    pub fn resolve_vertical(&self, body: &mut Body, dy: f32) -> bool {
        let target = body.position + Vector3::new(0.0, dy, 0.0);
        if !self.collides(&body.aabb_at(target)) {
            body.position = target;
            body.grounded = false;
            return true;
        }

        if dy < 0.0 || body.vertical_speed < 0.0 {
            body.grounded = true;
        }
        body.vertical_speed = 0.0;
        false
    }

    /// Raises the body in `PUSH_OUT_STEP` increments until it no longer
    /// overlaps anything.
    ///
    /// Terminates because blocks above the world's height are never solid.
    ///
    /// # Returns
    /// The number of increments applied.
    pub fn push_out_upward(&self, body: &mut Body) -> u32 {
        let mut steps = 0;
        let mut adjusted = body.position;
        while self.collides(&body.aabb_at(adjusted)) {
            steps += 1;
            adjusted.y = body.position.y + steps as f32 * PUSH_OUT_STEP;
        }
        if steps > 0 {
            log::debug!(
                "Pushed body out of terrain by {:.1} blocks",
                steps as f32 * PUSH_OUT_STEP
            );
            body.position = adjusted;
        }
        steps
    }
}
