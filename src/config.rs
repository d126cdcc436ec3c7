//! # Engine Configuration
//!
//! JSON configuration for the headless engine. Every field has a default, so a
//! file only needs the values it changes:
//!
//! ```json
//! {
//!     "world": { "size": 2, "generation": { "random": { "sparseness": 0.8 } } },
//!     "player": { "max_speed": 6.0 },
//!     "raycast": { "max_distance": 8.0 }
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine_state::{
    player::{PlayerSettings, MAX_BODY_EXTENT},
    spatial::RaycastSettings,
    voxels::{chunk::ChunkGeneration, world::DEFAULT_WORLD_SIZE},
};

/// Reasons a configuration could not be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be opened or read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON for `EngineConfig`.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// A value parsed but is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// World shape and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunks per side
    pub size: i32,
    /// How each chunk is filled
    pub generation: ChunkGeneration,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            size: DEFAULT_WORLD_SIZE,
            generation: ChunkGeneration::default(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World shape and content
    pub world: WorldConfig,
    /// Player dimensions and movement
    pub player: PlayerSettings,
    /// Block interaction reach
    pub raycast: RaycastSettings,
}

impl EngineConfig {
    /// Reads and validates a configuration file.
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, `ConfigError::Json` if it
    /// does not parse and `ConfigError::Invalid` if a value is out of range.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let config: EngineConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if one is given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("No configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parses and validates a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "world.size must be positive, got {}",
                self.world.size
            )));
        }
        if let ChunkGeneration::Random { sparseness } = self.world.generation {
            if !(0.0..=1.0).contains(&sparseness) {
                return Err(ConfigError::Invalid(format!(
                    "world.generation.random.sparseness must be within [0, 1], got {}",
                    sparseness
                )));
            }
        }

        let player = &self.player;
        let in_range = |extent: f32| extent > 0.0 && extent <= MAX_BODY_EXTENT;
        if !(in_range(player.width) && in_range(player.height)) {
            return Err(ConfigError::Invalid(format!(
                "player dimensions must be positive and at most {}, got {} x {}",
                MAX_BODY_EXTENT, player.width, player.height
            )));
        }
        if player.max_speed < 0.0 || player.sprint_multiplier < 0.0 {
            return Err(ConfigError::Invalid(
                "player speeds must not be negative".to_string(),
            ));
        }

        if self.raycast.sample_count().is_none() {
            return Err(ConfigError::Invalid(format!(
                "raycast step and max_distance must be positive with a bounded ratio, got {} and {}",
                self.raycast.step, self.raycast.max_distance
            )));
        }
        if self.raycast.step > self.raycast.max_distance {
            log::warn!(
                "raycast.step {} exceeds raycast.max_distance {}; only the origin is sampled",
                self.raycast.step,
                self.raycast.max_distance
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.world.size, 3);
        assert_eq!(config.world.generation, ChunkGeneration::Layered);
        assert_eq!(config.player.spawn, [15.0, 70.0, 15.0]);
        assert_eq!(config.raycast.max_distance, 6.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = EngineConfig::from_json(
            r#"{ "world": { "generation": "checkerboard" }, "player": { "max_speed": 7.5 } }"#,
        )
        .unwrap();
        assert_eq!(config.world.size, 3);
        assert_eq!(config.world.generation, ChunkGeneration::Checkerboard);
        assert_eq!(config.player.max_speed, 7.5);
        assert_eq!(config.player.height, 2.0);
    }

    #[test]
    fn random_generation_carries_sparseness() {
        let config = EngineConfig::from_json(
            r#"{ "world": { "generation": { "random": { "sparseness": 0.25 } } } }"#,
        )
        .unwrap();
        assert_eq!(config.world.generation, ChunkGeneration::Random { sparseness: 0.25 });
    }

    #[test]
    fn invalid_values_are_rejected() {
        for json in [
            r#"{ "world": { "size": 0 } }"#,
            r#"{ "world": { "generation": { "random": { "sparseness": 1.5 } } } }"#,
            r#"{ "player": { "width": 0.0 } }"#,
            r#"{ "player": { "max_speed": -1.0 } }"#,
            r#"{ "raycast": { "step": 0.0 } }"#,
            r#"{ "raycast": { "max_distance": -6.0 } }"#,
            r#"{ "raycast": { "step": 1e-12 } }"#,
            r#"{ "player": { "width": 1e6 } }"#,
            r#"{ "player": { "height": 8.5 } }"#,
        ] {
            assert!(
                matches!(EngineConfig::from_json(json), Err(ConfigError::Invalid(_))),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn largest_body_is_accepted() {
        let json = format!(
            r#"{{ "player": {{ "width": {0}, "height": {0} }} }}"#,
            MAX_BODY_EXTENT
        );
        let config = EngineConfig::from_json(&json).unwrap();
        assert_eq!(config.player.width, MAX_BODY_EXTENT);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            EngineConfig::from_json("{ \"world\": "),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "world": { "generation": "spiral" } }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn load_reads_file_and_reports_missing_ones() {
        let path = std::env::temp_dir().join(format!(
            "voxel-core-config-{}-{}.json",
            std::process::id(),
            fastrand::u64(..)
        ));
        let mut file = File::create(&path).unwrap();
        write!(file, r#"{{ "world": {{ "size": 2, "generation": "solid" }} }}"#).unwrap();
        drop(file);

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.world.size, 2);
        assert_eq!(config.world.generation, ChunkGeneration::Solid);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(EngineConfig::load(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(
            EngineConfig::load_or_default(None).unwrap(),
            EngineConfig::default()
        );
    }
}
