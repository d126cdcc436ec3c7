//! Tunable player parameters.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

/// Largest accepted `width` or `height`, in blocks.
pub const MAX_BODY_EXTENT: f32 = 8.0;

/// Physical and input parameters of the player.
///
/// Positions are stored as plain arrays so they read naturally in JSON:
///
/// ```json
/// { "player": { "spawn": [15.0, 70.0, 15.0], "max_speed": 6.0 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Extent of the player's box on X and Z
    pub width: f32,
    /// Extent of the player's box on Y
    pub height: f32,
    /// Walking speed in blocks per second
    pub max_speed: f32,
    /// Factor applied to `max_speed` while sprinting
    pub sprint_multiplier: f32,
    /// Vertical acceleration in blocks per second squared
    pub gravity: f32,
    /// Vertical speed given by a jump
    pub jump_speed: f32,
    /// Where the player's feet start
    pub spawn: [f32; 3],
    /// Where a reset puts the player's feet
    pub reset_position: [f32; 3],
    /// Degrees of rotation per unit of mouse movement
    pub mouse_sensitivity: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        PlayerSettings {
            width: 0.6,
            height: 2.0,
            max_speed: 5.0,
            sprint_multiplier: 1.5,
            gravity: -9.81,
            jump_speed: 5.0,
            spawn: [15.0, 70.0, 15.0],
            reset_position: [15.0, 60.0, 15.0],
            mouse_sensitivity: 0.1,
        }
    }
}

impl PlayerSettings {
    /// `spawn` as a point.
    pub fn spawn_point(&self) -> Point3<f32> {
        Point3::from(self.spawn)
    }

    /// `reset_position` as a point.
    pub fn reset_point(&self) -> Point3<f32> {
        Point3::from(self.reset_position)
    }
}
