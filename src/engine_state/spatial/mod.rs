//! # Spatial Query Engine
//!
//! Collision and line-of-sight queries against the voxel world. Every query reads
//! blocks through `World::get_block`, so positions outside the world simply
//! contribute nothing: no collision and no hit.
//!
//! ## Key Components
//! - `AaBox`: axis-aligned box used for bodies and block cubes
//! - `SpatialQueryEngine::collides`: discrete box-versus-blocks overlap test
//! - `SpatialQueryEngine::raycast`: fixed-step ray march returning the first solid
//!   block and the cell just before it
//! - `movement`: per-axis movement resolution built on `collides`
//!
//! ## Precision
//! The ray march samples points `step` apart, so a ray that only clips the corner
//! of a block for less than one step can pass through it. Callers that need exact
//! traversal should shorten the step.

use cgmath::{InnerSpace, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::voxels::world::World;

mod aa_box;
pub mod movement;

pub use aa_box::AaBox;

/// Default reach of a ray cast, in blocks.
pub const RAYCAST_MAX_DISTANCE: f32 = 6.0;
/// Default distance between ray samples, in blocks.
pub const RAYCAST_STEP: f32 = 0.1;

/// Tuning for ray casts.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastSettings {
    /// Samples at or beyond this distance are not taken
    pub max_distance: f32,
    /// Distance between consecutive samples
    pub step: f32,
}

impl RaycastSettings {
    /// Upper bound on the number of samples a ray takes.
    ///
    /// # Returns
    /// `None` when `step` or `max_distance` is not positive, or when the count
    /// does not fit in a `u32`.
    pub fn sample_count(&self) -> Option<u32> {
        if !(self.step > 0.0 && self.max_distance > 0.0) {
            return None;
        }
        let samples = (self.max_distance / self.step).ceil();
        if samples >= u32::MAX as f32 {
            None
        } else {
            Some(samples as u32)
        }
    }
}

impl Default for RaycastSettings {
    fn default() -> Self {
        RaycastSettings {
            max_distance: RAYCAST_MAX_DISTANCE,
            step: RAYCAST_STEP,
        }
    }
}

/// Result of a ray cast that found solid matter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RaycastHit {
    /// The first solid block sampled along the ray
    pub block: Point3<i32>,
    /// The cell sampled one step earlier; where a new block would be placed
    pub adjacent: Point3<i32>,
    /// Index of the sample that hit
    pub steps: u32,
}

/// Read-only queries over a borrowed world.
pub struct SpatialQueryEngine<'w> {
    world: &'w World,
    raycast: RaycastSettings,
}

fn floor_point(p: Point3<f32>) -> Point3<i32> {
    Point3::new(p.x.floor() as i32, p.y.floor() as i32, p.z.floor() as i32)
}

impl<'w> SpatialQueryEngine<'w> {
    /// Creates an engine with default ray cast settings.
    pub fn new(world: &'w World) -> Self {
        Self::with_settings(world, RaycastSettings::default())
    }

    /// Creates an engine with the given ray cast settings.
    pub fn with_settings(world: &'w World, raycast: RaycastSettings) -> Self {
        SpatialQueryEngine { world, raycast }
    }

    /// The world being queried.
    pub fn world(&self) -> &'w World {
        self.world
    }

    /// Finds the first solid block whose cube strictly overlaps `aabb`.
    ///
    /// Cells are visited in x, then y, then z order over the range returned by
    /// `AaBox::covered_cells`.
    pub fn first_collision(&self, aabb: &AaBox) -> Option<Point3<i32>> {
        let (min, max) = aabb.covered_cells();
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    if self.world.is_solid(x, y, z) && AaBox::unit_block(x, y, z).intersects(aabb) {
                        return Some(Point3::new(x, y, z));
                    }
                }
            }
        }
        None
    }

    /// Returns `true` if `aabb` overlaps any solid block.
    pub fn collides(&self, aabb: &AaBox) -> bool {
        self.first_collision(aabb).is_some()
    }

    /// Casts a ray using this engine's settings.
    ///
    /// See [`SpatialQueryEngine::raycast_with`].
    pub fn raycast(&self, origin: Point3<f32>, direction: Vector3<f32>) -> Option<RaycastHit> {
        self.raycast_with(origin, direction, self.raycast)
    }

    /// Marches from `origin` along `direction` in fixed steps.
    ///
    /// Sample `i` sits at `origin + direction̂ * i * step` for every `i * step`
    /// below `max_distance`. Each sample is floored to a block position; the first
    /// solid one is the hit and the floored sample one step back is the adjacent
    /// cell. For a hit on the very first sample the adjacent cell lies one step
    /// behind the origin.
    ///
    /// # Returns
    /// `None` when nothing solid is sampled, when `direction` has zero length, or
    /// when `settings` has no valid `sample_count`.
    pub fn raycast_with(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        settings: RaycastSettings,
    ) -> Option<RaycastHit> {
        let samples = settings.sample_count()?;
        let length = direction.magnitude();
        if !length.is_normal() {
            return None;
        }
        let direction = direction / length;

        for steps in 0..=samples {
            let t = steps as f32 * settings.step;
            if t >= settings.max_distance {
                return None;
            }

            let block = floor_point(origin + direction * t);
            if self.world.is_solid(block.x, block.y, block.z) {
                let adjacent = floor_point(origin + direction * (t - settings.step));
                return Some(RaycastHit {
                    block,
                    adjacent,
                    steps,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{block::block_type::BlockType, chunk::ChunkGeneration};

    fn air_world() -> World {
        World::new(3, ChunkGeneration::Empty)
    }

    #[test]
    fn box_inside_stone_column_collides() {
        let mut world = air_world();
        for y in 0..10 {
            world.set_block(5, y, 5, BlockType::STONE);
        }
        let engine = SpatialQueryEngine::new(&world);
        let body = AaBox::from_feet(Point3::new(5.5, 2.0, 5.5), 0.6, 2.0);
        assert!(engine.collides(&body));
    }

    #[test]
    fn box_in_air_never_collides() {
        let world = air_world();
        let engine = SpatialQueryEngine::new(&world);
        for &(x, y, z) in &[(1.5, 1.0, 1.5), (50.0, 30.0, 50.0), (95.7, 62.0, 0.3)] {
            let body = AaBox::from_feet(Point3::new(x, y, z), 0.6, 2.0);
            assert!(!engine.collides(&body));
        }
    }

    #[test]
    fn box_resting_on_block_top_does_not_collide() {
        let mut world = air_world();
        world.set_block(5, 3, 5, BlockType::STONE);
        let engine = SpatialQueryEngine::new(&world);
        let standing = AaBox::from_feet(Point3::new(5.5, 4.0, 5.5), 0.6, 2.0);
        assert!(!engine.collides(&standing));
        let sunk = AaBox::from_feet(Point3::new(5.5, 3.99, 5.5), 0.6, 2.0);
        assert_eq!(engine.first_collision(&sunk), Some(Point3::new(5, 3, 5)));
    }

    #[test]
    fn box_top_at_block_bottom_does_not_collide() {
        let mut world = air_world();
        world.set_block(5, 10, 5, BlockType::STONE);
        let engine = SpatialQueryEngine::new(&world);
        let below = AaBox::from_feet(Point3::new(5.5, 8.0, 5.5), 0.6, 2.0);
        assert!(!engine.collides(&below));
    }

    #[test]
    fn side_contact_does_not_collide() {
        let mut world = air_world();
        world.set_block(5, 1, 5, BlockType::STONE);
        let engine = SpatialQueryEngine::new(&world);
        // Box spans x in [4.5, 5.0], touching the block's x = 5 face.
        let beside = AaBox::new(Point3::new(4.5, 1.0, 5.2), Point3::new(5.0, 2.0, 5.8));
        assert!(!engine.collides(&beside));
    }

    #[test]
    fn outside_world_contributes_nothing() {
        let world = World::new(3, ChunkGeneration::Solid);
        let engine = SpatialQueryEngine::new(&world);
        let below_ground = AaBox::new(Point3::new(1.0, -5.0, 1.0), Point3::new(2.0, -3.0, 2.0));
        assert!(!engine.collides(&below_ground));
        let past_edge = AaBox::new(Point3::new(-4.0, 1.0, 1.0), Point3::new(-2.0, 2.0, 2.0));
        assert!(!engine.collides(&past_edge));
    }

    #[test]
    fn raycast_reports_hit_and_preceding_cell() {
        let mut world = air_world();
        world.set_block(3, 0, 0, BlockType::STONE);
        let engine = SpatialQueryEngine::new(&world);
        let hit = engine
            .raycast(Point3::new(0.5, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(hit.block, Point3::new(3, 0, 0));
        assert_eq!(hit.adjacent, Point3::new(2, 0, 0));
        assert!(!world.is_solid(hit.adjacent.x, hit.adjacent.y, hit.adjacent.z));
    }

    #[test]
    fn raycast_from_origin_corner() {
        let mut world = air_world();
        world.set_block(0, 0, 4, BlockType::DIRT);
        let engine = SpatialQueryEngine::new(&world);
        let hit = engine
            .raycast(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0))
            .unwrap();
        assert_eq!(hit.block, Point3::new(0, 0, 4));
        assert_eq!(hit.adjacent, Point3::new(0, 0, 3));
    }

    #[test]
    fn raycast_direction_length_does_not_matter() {
        let mut world = air_world();
        world.set_block(10, 30, 10, BlockType::STONE);
        let engine = SpatialQueryEngine::new(&world);
        let origin = Point3::new(10.5, 33.5, 10.5);
        let short = engine.raycast(origin, Vector3::new(0.0, -1.0, 0.0));
        let long = engine.raycast(origin, Vector3::new(0.0, -40.0, 0.0));
        assert_eq!(short, long);
        assert_eq!(short.map(|hit| hit.adjacent), Some(Point3::new(10, 31, 10)));
    }

    #[test]
    fn raycast_into_air_misses() {
        let world = air_world();
        let engine = SpatialQueryEngine::new(&world);
        let hit = engine.raycast(Point3::new(1.0, 1.0, 1.0), Vector3::new(1.0, 1.0, 1.0));
        assert!(hit.is_none());
    }

    #[test]
    fn raycast_respects_max_distance() {
        let mut world = air_world();
        world.set_block(20, 0, 0, BlockType::STONE);
        let engine = SpatialQueryEngine::new(&world);
        let origin = Point3::new(0.5, 0.5, 0.5);
        let direction = Vector3::new(1.0, 0.0, 0.0);
        assert!(engine.raycast(origin, direction).is_none());
        let far = RaycastSettings {
            max_distance: 25.0,
            ..RaycastSettings::default()
        };
        assert_eq!(
            engine.raycast_with(origin, direction, far).map(|hit| hit.block),
            Some(Point3::new(20, 0, 0))
        );
    }

    #[test]
    fn zero_direction_misses() {
        let world = World::new(3, ChunkGeneration::Solid);
        let engine = SpatialQueryEngine::new(&world);
        assert!(engine
            .raycast(Point3::new(1.0, 1.0, 1.0), Vector3::new(0.0, 0.0, 0.0))
            .is_none());
    }

    #[test]
    fn sample_count_is_bounded() {
        let samples = RaycastSettings::default().sample_count().unwrap();
        assert!((60..=61).contains(&samples));

        let tiny_step = RaycastSettings {
            max_distance: 6.0,
            step: 1e-12,
        };
        assert_eq!(tiny_step.sample_count(), None);
        let endless = RaycastSettings {
            max_distance: f32::INFINITY,
            step: 0.1,
        };
        assert_eq!(endless.sample_count(), None);
        let backwards = RaycastSettings {
            max_distance: 6.0,
            step: -0.1,
        };
        assert_eq!(backwards.sample_count(), None);
    }

    #[test]
    fn unbounded_settings_never_march() {
        let world = World::new(1, ChunkGeneration::Solid);
        let engine = SpatialQueryEngine::new(&world);
        assert!(std::ptr::eq(engine.world(), &world));
        let tiny_step = RaycastSettings {
            max_distance: 6.0,
            step: 1e-12,
        };
        let origin = Point3::new(1.5, 1.5, 1.5);
        assert!(engine
            .raycast_with(origin, Vector3::new(0.0, -1.0, 0.0), tiny_step)
            .is_none());
        assert!(engine.raycast(origin, Vector3::new(0.0, -1.0, 0.0)).is_some());
    }

    #[test]
    fn raycast_down_onto_layered_terrain() {
        let world = World::new(3, ChunkGeneration::Layered);
        let engine = SpatialQueryEngine::new(&world);
        let hit = engine
            .raycast(Point3::new(15.5, 28.0, 15.5), Vector3::new(0.0, -1.0, 0.0))
            .unwrap();
        assert_eq!(hit.block, Point3::new(15, 25, 15));
        assert_eq!(hit.adjacent, Point3::new(15, 26, 15));
    }
}
