//! # Engine State Module
//!
//! The core engine module that owns the voxel world and drives it frame by frame.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `player` - First-person player controller and its settings
//! * `rendering` - Vertex format and chunk meshing
//! * `spatial` - Collision and ray cast queries over the world
//! * `voxels` - Blocks, chunks, coordinates and the world grid
//!
//! ## Frame Flow
//!
//! A host feeds input through `set_player_actions`, advances time with
//! `process_input`, then asks `prepare_draw_list` for what to draw. Meshes are
//! rebuilt lazily inside `prepare_draw_list`, only for chunks edited since their
//! last build.

use cgmath::{Point2, Point3};
use web_time::Duration;

use player::PlayerController;
use rendering::meshing::{MeshHandle, Mesher};
use spatial::RaycastSettings;
use voxels::world::World;

use crate::config::EngineConfig;

pub mod player;
pub mod rendering;
pub mod spatial;
pub mod voxels;

/// One chunk ready to draw.
#[derive(Debug, Clone)]
pub struct DrawCall {
    /// Chunk coordinates of the mesh
    pub chunk_position: Point2<i32>,
    /// The chunk's current mesh
    pub mesh: MeshHandle,
    /// Number of indices to draw from `mesh`
    pub index_count: u32,
}

/// Blocks changed by one call to `EngineState::process_input`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameEdits {
    /// Position of the block that was broken
    pub broken: Option<Point3<i32>>,
    /// Position of the block that was placed
    pub placed: Option<Point3<i32>>,
}

/// The main state container for the voxel engine
///
/// Owns the world, the mesher and the player. Nothing in here is global; hosts
/// may run several engines side by side.
///
/// # Examples
///
/// ```
/// use voxel_core::{EngineConfig, EngineState, PlayerAction};
/// use web_time::Duration;
///
/// let mut engine = EngineState::new(&EngineConfig::default());
/// engine.set_player_actions(PlayerAction {
///     move_forward: true,
///     ..PlayerAction::default()
/// });
/// engine.process_input(Duration::from_millis(16));
/// let draw_list = engine.prepare_draw_list();
/// assert_eq!(draw_list.len(), 9);
/// ```
pub struct EngineState {
    /// The voxel world containing all chunk data
    pub world: World,
    /// Builds chunk meshes on demand
    pub mesher: Mesher,
    /// The first-person player
    pub player: PlayerController,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// Reach of break and place
    raycast: RaycastSettings,
}

impl EngineState {
    /// Creates a new engine state from a configuration
    ///
    /// # Arguments
    ///
    /// * `config` - World, player and ray cast settings
    ///
    /// # Returns
    ///
    /// An engine with a freshly generated world and the player at its spawn point
    pub fn new(config: &EngineConfig) -> Self {
        let world = World::new(config.world.size, config.world.generation);
        let player = PlayerController::new(config.player.clone());
        log::info!("Player spawned at {:?}", player.position());
        Self {
            world,
            mesher: Mesher::new(),
            player,
            player_actions: PlayerAction::default(),
            raycast: config.raycast,
        }
    }

    /// Sets the input for the next call to `process_input`.
    ///
    /// # Arguments
    /// * `actions` - The player's input for this frame
    pub fn set_player_actions(&mut self, actions: PlayerAction) {
        self.player_actions = actions;
    }

    /// Applies the pending actions and advances the player by `wait_duration`.
    ///
    /// View rotation comes first, then movement, then breaking and placing
    /// blocks from the new viewpoint. The actions are consumed.
    ///
    /// # Arguments
    ///
    /// * `wait_duration` - The time elapsed since the last frame
    ///
    /// # Returns
    ///
    /// The blocks broken or placed during this frame
    pub fn process_input(&mut self, wait_duration: Duration) -> FrameEdits {
        let actions = std::mem::take(&mut self.player_actions);

        if let Some((delta_x, delta_y)) = actions.rotate_view {
            // Screen Y grows downwards.
            self.player.look(delta_x as f32, -delta_y as f32);
        }

        self.player.update(&self.world, &actions, wait_duration);

        let mut edits = FrameEdits::default();
        if actions.break_block {
            edits.broken = self.player.break_block(&mut self.world, self.raycast);
        }
        if actions.place_block {
            edits.placed = self.player.place_block(&mut self.world, self.raycast);
        }
        edits
    }

    /// Rebuilds dirty chunk meshes and lists every chunk with something to draw.
    ///
    /// A chunk whose rebuild fails keeps its previous mesh and stays dirty, so it
    /// is retried on the next call.
    ///
    /// # Returns
    ///
    /// One `DrawCall` per chunk with a non-empty mesh, in world storage order
    pub fn prepare_draw_list(&mut self) -> Vec<DrawCall> {
        let mut draw_list = Vec::new();
        for chunk in self.world.chunks_mut() {
            if let Err(error) = self.mesher.rebuild(chunk) {
                log::error!(
                    "Failed to rebuild mesh of chunk ({}, {}): {}",
                    chunk.position.x,
                    chunk.position.y,
                    error
                );
            }

            let mesh = chunk.mesh();
            if mesh.is_empty() {
                continue;
            }
            draw_list.push(DrawCall {
                chunk_position: chunk.position,
                mesh: mesh.clone(),
                index_count: mesh.index_count(),
            });
        }
        draw_list
    }

    /// Ray cast reach used for breaking and placing blocks.
    pub fn raycast_settings(&self) -> RaycastSettings {
        self.raycast
    }
}

/// Represents player actions derived from input
///
/// Movement and sprint flags describe keys held during the frame. Break, place
/// and reset are one-shot requests.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerAction {
    /// Walk along the look direction
    pub move_forward: bool,
    /// Walk against the look direction
    pub move_backward: bool,
    /// Strafe left
    pub move_left: bool,
    /// Strafe right
    pub move_right: bool,
    /// Jump if standing on something
    pub jump: bool,
    /// Sprint key; sprinting starts when it goes down while walking forward
    pub sprint: bool,
    /// Teleport to the reset position
    pub reset: bool,
    /// Remove the targeted block
    pub break_block: bool,
    /// Place a block in front of the targeted one
    pub place_block: bool,

    /// View rotation as a screen-space mouse delta
    pub rotate_view: Option<(f64, f64)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        rendering::meshing::MeshError,
        voxels::{block::block_type::BlockType, chunk::ChunkGeneration},
    };

    fn engine(size: i32, generation: ChunkGeneration) -> EngineState {
        let mut config = EngineConfig::default();
        config.world.size = size;
        config.world.generation = generation;
        EngineState::new(&config)
    }

    #[test]
    fn first_draw_builds_every_non_empty_chunk() {
        let mut engine = engine(2, ChunkGeneration::Layered);
        let draw_list = engine.prepare_draw_list();
        assert_eq!(draw_list.len(), 4);
        for call in &draw_list {
            assert_eq!(call.index_count, call.mesh.index_count());
            assert_eq!(call.mesh.generation, 1);
        }
        assert!(engine.world.chunks().all(|chunk| !chunk.is_dirty()));
    }

    #[test]
    fn empty_chunks_are_not_drawn() {
        let mut engine = engine(2, ChunkGeneration::Empty);
        assert!(engine.prepare_draw_list().is_empty());
        engine.world.set_block(40, 10, 3, BlockType::GRASS);
        let draw_list = engine.prepare_draw_list();
        assert_eq!(draw_list.len(), 1);
        assert_eq!(draw_list[0].chunk_position, Point2::new(1, 0));
        assert_eq!(draw_list[0].index_count, 36);
    }

    #[test]
    fn only_edited_chunks_are_rebuilt() {
        let mut engine = engine(2, ChunkGeneration::Layered);
        engine.prepare_draw_list();
        engine.world.set_block(5, 30, 40, BlockType::STONE);
        let draw_list = engine.prepare_draw_list();
        for call in draw_list {
            let expected = if call.chunk_position == Point2::new(0, 1) { 2 } else { 1 };
            assert_eq!(call.mesh.generation, expected, "chunk {:?}", call.chunk_position);
        }
    }

    #[test]
    fn failed_rebuild_keeps_drawing_previous_mesh() {
        let mut engine = engine(1, ChunkGeneration::Empty);
        engine.world.set_block(1, 1, 1, BlockType::STONE);
        engine.prepare_draw_list();

        engine.world.set_block(8, 8, 8, BlockType::STONE);
        engine.mesher = Mesher::with_face_capacity(6);
        let draw_list = engine.prepare_draw_list();
        assert_eq!(draw_list.len(), 1);
        assert_eq!(draw_list[0].index_count, 36);
        assert!(engine.world.get_chunk(0, 0).unwrap().is_dirty());
        assert!(matches!(
            engine.mesher.rebuild(engine.world.get_chunk_mut(0, 0).unwrap()),
            Err(MeshError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn actions_are_consumed() {
        let mut engine = engine(1, ChunkGeneration::Layered);
        engine.set_player_actions(PlayerAction {
            rotate_view: Some((100.0, 0.0)),
            ..PlayerAction::default()
        });
        engine.process_input(Duration::from_millis(16));
        assert_eq!(engine.player_actions, PlayerAction::default());
        assert_eq!(engine.player.yaw(), cgmath::Deg(-80.0));
    }

    #[test]
    fn mouse_down_looks_down() {
        let mut engine = engine(1, ChunkGeneration::Layered);
        engine.set_player_actions(PlayerAction {
            rotate_view: Some((0.0, 200.0)),
            ..PlayerAction::default()
        });
        engine.process_input(Duration::from_millis(16));
        assert!(engine.player.pitch().0 < 0.0);
    }

    #[test]
    fn reach_comes_from_the_config() {
        let mut config = EngineConfig::default();
        config.world.size = 1;
        config.raycast.max_distance = 0.9;
        let mut engine = EngineState::new(&config);
        assert_eq!(engine.raycast_settings().max_distance, 0.9);

        // The grass top is a full block below the eye, out of reach.
        engine.player.set_position(Point3::new(15.5, 26.0, 15.5));
        engine.set_player_actions(PlayerAction {
            rotate_view: Some((0.0, 10000.0)),
            break_block: true,
            ..PlayerAction::default()
        });
        assert_eq!(engine.process_input(Duration::from_millis(16)).broken, None);
        assert!(engine.world.is_solid(15, 25, 15));
    }

    #[test]
    fn break_action_edits_the_world() {
        let mut engine = engine(1, ChunkGeneration::Layered);
        engine.player.set_position(Point3::new(15.5, 26.0, 15.5));
        engine.prepare_draw_list();

        engine.set_player_actions(PlayerAction {
            rotate_view: Some((0.0, 10000.0)),
            break_block: true,
            ..PlayerAction::default()
        });
        let edits = engine.process_input(Duration::from_millis(16));
        assert_eq!(edits.broken, Some(Point3::new(15, 25, 15)));
        assert_eq!(edits.placed, None);
        assert!(!engine.world.is_solid(15, 25, 15));
        assert!(engine.world.get_chunk(0, 0).unwrap().is_dirty());
        assert_eq!(engine.prepare_draw_list()[0].mesh.generation, 2);
    }
}
