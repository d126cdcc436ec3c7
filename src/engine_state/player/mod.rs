//! # Player Controller
//!
//! First-person player that walks on the voxel terrain.
//!
//! ## Key Components
//! - `PlayerController`: position, orientation and physics state of the player
//! - `PlayerSettings`: tunable dimensions, speeds and sensitivity
//!
//! ## Frame Update
//! Each call to `PlayerController::update`:
//! 1. Applies a pending position reset
//! 2. Updates the sprint state from the sprint key edge
//! 3. Moves horizontally along the look direction flattened onto XZ
//! 4. Starts a jump if one is requested and the player stands on something
//! 5. Integrates gravity and moves vertically
//! 6. Pushes the player out of any block it still overlaps
//!
//! Steps 3 to 6 go through the `SpatialQueryEngine` movement helpers.

use cgmath::{Angle, Deg, InnerSpace, Point3, Vector3};
use web_time::Duration;

use crate::engine_state::{
    spatial::{movement::Body, RaycastSettings, SpatialQueryEngine},
    voxels::{block::block_type::BlockType, world::World},
    PlayerAction,
};

mod settings;

pub use settings::{PlayerSettings, MAX_BODY_EXTENT};

/// Pitch limit in degrees, keeping the look direction away from straight up or down.
const PITCH_LIMIT: f32 = 89.0;
/// Initial yaw; faces towards -Z.
const INITIAL_YAW: f32 = -90.0;

/// The block a right click places.
pub const PLACED_BLOCK: BlockType = BlockType::STONE;

/// Computes the unit look direction for the given yaw and pitch.
fn look_direction(yaw: Deg<f32>, pitch: Deg<f32>) -> Vector3<f32> {
    let (yaw_sin, yaw_cos) = yaw.sin_cos();
    let (pitch_sin, pitch_cos) = pitch.sin_cos();
    Vector3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize()
}

/// First-person player with box collision against the world.
#[derive(Debug, Clone)]
pub struct PlayerController {
    /// Feet position, box size and vertical motion
    body: Body,
    /// Horizontal rotation around Y
    yaw: Deg<f32>,
    /// Vertical rotation, within `±PITCH_LIMIT`
    pitch: Deg<f32>,
    /// Unit look direction derived from yaw and pitch
    front: Vector3<f32>,
    /// Whether the sprint multiplier applies
    sprinting: bool,
    /// Sprint key state seen on the previous update
    sprint_held: bool,
    settings: PlayerSettings,
}

impl PlayerController {
    /// Creates a player standing at `settings.spawn`, looking towards -Z.
    ///
    /// # Arguments
    /// * `settings` - Dimensions, speeds and sensitivity of the player
    pub fn new(settings: PlayerSettings) -> Self {
        let yaw = Deg(INITIAL_YAW);
        let pitch = Deg(0.0);
        Self {
            body: Body::new(settings.spawn_point(), settings.width, settings.height),
            yaw,
            pitch,
            front: look_direction(yaw, pitch),
            sprinting: false,
            sprint_held: false,
            settings,
        }
    }

    /// Feet position.
    pub fn position(&self) -> Point3<f32> {
        self.body.position
    }

    /// Moves the feet to `position` without any collision check.
    pub fn set_position(&mut self, position: Point3<f32>) {
        self.body.position = position;
    }

    /// Position the player looks from: half the body height above the feet.
    pub fn eye_position(&self) -> Point3<f32> {
        self.body.position + Vector3::new(0.0, self.settings.height / 2.0, 0.0)
    }

    /// Unit look direction.
    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    /// Unit vector to the player's right, perpendicular to the look direction
    /// and the world's up axis.
    pub fn right(&self) -> Vector3<f32> {
        self.front.cross(Vector3::unit_y()).normalize()
    }

    /// Horizontal rotation.
    pub fn yaw(&self) -> Deg<f32> {
        self.yaw
    }

    /// Vertical rotation.
    pub fn pitch(&self) -> Deg<f32> {
        self.pitch
    }

    /// The player's collision body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Whether the player last touched the floor and has not left it since.
    pub fn is_grounded(&self) -> bool {
        self.body.grounded
    }

    /// Whether sprinting is active.
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    /// Current vertical speed.
    pub fn vertical_speed(&self) -> f32 {
        self.body.vertical_speed
    }

    /// The settings this player was created with.
    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    /// Rotates the view.
    ///
    /// # Arguments
    /// * `delta_x` - Rightward mouse movement
    /// * `delta_y` - Upward mouse movement
    ///
    /// Both are scaled by `mouse_sensitivity` into degrees. Pitch is clamped to
    /// `±89°`.
    pub fn look(&mut self, delta_x: f32, delta_y: f32) {
        let sensitivity = self.settings.mouse_sensitivity;
        self.yaw += Deg(delta_x * sensitivity);
        self.pitch = Deg((self.pitch.0 + delta_y * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT));
        self.front = look_direction(self.yaw, self.pitch);
    }

    /// Teleports the player to `reset_position` and stops any vertical motion.
    pub fn reset_position(&mut self) {
        self.body.position = self.settings.reset_point();
        self.body.vertical_speed = 0.0;
        self.body.grounded = false;
        log::info!("Player position reset to {:?}", self.body.position);
    }

    /// Advances the player by one frame.
    ///
    /// # Arguments
    /// * `world` - The world to collide against
    /// * `actions` - Input for this frame
    /// * `dt` - Time elapsed since the last update
    pub fn update(&mut self, world: &World, actions: &PlayerAction, dt: Duration) {
        let dt = dt.as_secs_f32();
        let engine = SpatialQueryEngine::new(world);

        if actions.reset {
            self.reset_position();
        }

        let moving = actions.move_forward
            || actions.move_backward
            || actions.move_left
            || actions.move_right;

        if actions.sprint {
            if !self.sprint_held && moving && actions.move_forward {
                self.sprinting = true;
            }
            self.sprint_held = true;
        } else {
            self.sprint_held = false;
        }
        if !actions.move_forward {
            self.sprinting = false;
        }

        if moving {
            let right = self.right();
            let mut direction = Vector3::new(0.0, 0.0, 0.0);
            if actions.move_forward {
                direction += self.front;
            }
            if actions.move_backward {
                direction -= self.front;
            }
            if actions.move_left {
                direction -= right;
            }
            if actions.move_right {
                direction += right;
            }
            direction.y = 0.0;

            // Opposing keys can cancel out.
            if direction.magnitude2() > 0.0 {
                let mut speed = self.settings.max_speed;
                if self.sprinting {
                    speed *= self.settings.sprint_multiplier;
                }
                engine.resolve_horizontal(&mut self.body, direction.normalize() * speed * dt);
            }
        }

        if actions.jump && self.body.grounded {
            self.body.vertical_speed = self.settings.jump_speed;
            self.body.grounded = false;
        }

        self.body.vertical_speed += self.settings.gravity * dt;
        let dy = self.body.vertical_speed * dt;
        engine.resolve_vertical(&mut self.body, dy);

        engine.push_out_upward(&mut self.body);
    }

    /// Removes the block the player is looking at.
    ///
    /// # Returns
    /// The position of the removed block, or `None` if nothing solid is within reach.
    pub fn break_block(&self, world: &mut World, raycast: RaycastSettings) -> Option<Point3<i32>> {
        let hit = SpatialQueryEngine::with_settings(world, raycast)
            .raycast(self.eye_position(), self.front)?;
        world.set_block(hit.block.x, hit.block.y, hit.block.z, BlockType::AIR);
        log::info!("Broke block at {:?}", hit.block);
        Some(hit.block)
    }

    /// Places `PLACED_BLOCK` in the cell in front of the block the player is
    /// looking at.
    ///
    /// The placed block may overlap the player; the next update pushes the
    /// player out of it.
    ///
    /// # Returns
    /// The position of the new block, or `None` if nothing solid is within reach
    /// or the cell is outside the world.
    pub fn place_block(&self, world: &mut World, raycast: RaycastSettings) -> Option<Point3<i32>> {
        let hit = SpatialQueryEngine::with_settings(world, raycast)
            .raycast(self.eye_position(), self.front)?;
        let target = hit.adjacent;
        world.get_block(target.x, target.y, target.z)?;
        world.set_block(target.x, target.y, target.z, PLACED_BLOCK);
        log::info!("Placed {:?} at {:?}", PLACED_BLOCK, target);
        Some(target)
    }
}
