#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Core
//!
//! The world core of a block-based voxel engine: chunked block storage, face-culled
//! chunk meshing, and the spatial queries a first-person player needs to walk on
//! and edit the terrain.
//!
//! ## Key Modules
//!
//! * `config` - JSON engine configuration
//! * `engine_state` - The world, meshing, spatial queries and the player
//!
//! ## Architecture
//!
//! The crate is headless and single-threaded. A host owns an `EngineState`, feeds it
//! input once per frame, and uploads the meshes listed by `prepare_draw_list`:
//! * Voxel data lives in a fixed grid of dense chunks owned by a `World`
//! * Edits mark chunks dirty; meshes are rebuilt lazily right before drawing
//! * Mesh buffers sit behind an `Arc` and are replaced wholesale on rebuild
//!
//! ## Usage
//!
//! ```rust
//! use voxel_core::{BlockType, EngineConfig, EngineState};
//!
//! let mut engine = EngineState::new(&EngineConfig::default());
//! engine.world.set_block(10, 40, 10, BlockType::STONE);
//! for call in engine.prepare_draw_list() {
//!     let _bytes = call.mesh.vertex_bytes();
//! }
//! ```

use std::path::Path;

use cgmath::Point3;
use log::info;
use web_time::{Duration, Instant};

pub mod config;
pub mod engine_state;

pub use config::{ConfigError, EngineConfig, WorldConfig};
pub use engine_state::{
    player::{PlayerController, PlayerSettings},
    rendering::{
        meshing::{ChunkMesh, MeshError, MeshHandle, Mesher},
        Vertex,
    },
    spatial::{movement::Body, AaBox, RaycastHit, RaycastSettings, SpatialQueryEngine},
    voxels::{
        block::{block_side::BlockSide, block_type::BlockType, Block},
        chunk::{Chunk, ChunkGeneration},
        world::World,
    },
    DrawCall, EngineState, FrameEdits, PlayerAction,
};

/// Simulated frame length of the scripted session.
pub const SESSION_FRAME: Duration = Duration::from_millis(16);

/// What a scripted session did.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    /// Frames simulated
    pub frames: usize,
    /// Chunks in the last draw list
    pub chunks_drawn: usize,
    /// Indices across the last draw list
    pub indices_drawn: u64,
    /// Block removed by the session, if any was in reach
    pub broken: Option<Point3<i32>>,
    /// Block added by the session, if any was in reach
    pub placed: Option<Point3<i32>>,
    /// Player feet position at the end
    pub player_position: Point3<f32>,
}

/// Initializes logging to stdout, filtered by `RUST_LOG`.
///
/// Calling it again is harmless.
pub fn init_logger() {
    let mut log_builder = env_logger::Builder::new();
    let _ = log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init();
}

/// Runs a short scripted session: the player drops onto the terrain, walks and
/// sprints forward, looks down, breaks the block below and puts one back.
pub fn run_session(config: &EngineConfig) -> SessionReport {
    let start = Instant::now();
    let mut engine = EngineState::new(config);
    let mut frames = 0;

    let initial = engine.prepare_draw_list();
    info!("Initial draw list: {} chunks", initial.len());

    let mut step = |engine: &mut EngineState, actions: PlayerAction| {
        engine.set_player_actions(actions);
        frames += 1;
        engine.process_input(SESSION_FRAME)
    };

    // Land.
    for _ in 0..180 {
        step(&mut engine, PlayerAction::default());
    }

    // Walk, then sprint.
    let walk = PlayerAction {
        move_forward: true,
        ..PlayerAction::default()
    };
    let sprint = PlayerAction {
        sprint: true,
        ..walk
    };
    for _ in 0..30 {
        step(&mut engine, walk);
    }
    for _ in 0..30 {
        step(&mut engine, sprint);
    }

    // Settle, look straight down, then dig and refill.
    for _ in 0..30 {
        step(&mut engine, PlayerAction::default());
    }
    step(
        &mut engine,
        PlayerAction {
            rotate_view: Some((0.0, 1000.0)),
            ..PlayerAction::default()
        },
    );
    let broken = step(
        &mut engine,
        PlayerAction {
            break_block: true,
            ..PlayerAction::default()
        },
    )
    .broken;
    let placed = step(
        &mut engine,
        PlayerAction {
            place_block: true,
            ..PlayerAction::default()
        },
    )
    .placed;

    let draw_list = engine.prepare_draw_list();
    let report = SessionReport {
        frames,
        chunks_drawn: draw_list.len(),
        indices_drawn: draw_list.iter().map(|call| call.index_count as u64).sum(),
        broken,
        placed,
        player_position: engine.player.position(),
    };
    info!("Session finished in {:?}: {:?}", start.elapsed(), report);
    report
}

/// Loads the configuration at `config_path` (or the defaults) and runs
/// [`run_session`].
///
/// # Errors
/// Any `ConfigError` from loading the configuration.
pub fn run(config_path: Option<&Path>) -> Result<SessionReport, ConfigError> {
    let config = EngineConfig::load_or_default(config_path)?;
    Ok(run_session(&config))
}
