//! Configuration for the fly game engine.
//!
//! Configuration is read once at startup from `fly.json` and never changes
//! while the process runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::CueTable;
use crate::error::{FlyError, Result};
use crate::grid::{Grid, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
use crate::route::RouteGenerator;

/// The default config file name.
const CONFIG_FILE_NAME: &str = "fly.json";

/// Largest step count accepted for `defaultSteps`.
pub const MAX_DEFAULT_STEPS: usize = 10_000;

/// Default grid side length.
const fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}

/// Default number of moves requested when none is given.
const fn default_steps() -> usize {
    10
}

/// Main configuration for the fly game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Side length of the square grid.
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,

    /// Moves requested when a caller does not specify a step count.
    #[serde(default = "default_steps")]
    pub default_steps: usize,

    /// Audio cue for each direction.
    #[serde(default)]
    pub audio_cues: CueTable,

    /// Seed for the session random source. A random seed is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            default_steps: default_steps(),
            audio_cues: CueTable::default(),
            seed: None,
        }
    }
}

impl Config {
    /// Loads configuration from the current working directory.
    ///
    /// Looks for `fly.json` in the current directory and falls back to the
    /// defaults if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but contains invalid JSON.
    pub fn load() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            FlyError::config_parse(
                "<current directory>",
                format!("cannot determine current directory: {e}"),
            )
        })?;
        Self::load_from_dir(&current_dir)
    }

    /// Loads configuration from `fly.json` inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but contains invalid JSON.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load_from_file(&dir.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from a specific file path.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `FlyError::ConfigParseError` if the file cannot be read or is
    /// not valid JSON, and `FlyError::ConfigValidationError` if a value is out
    /// of range.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(e) => {
                return Err(FlyError::config_parse(
                    path,
                    format!("failed to read file: {e}"),
                ));
            }
        };

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| FlyError::config_parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// - `gridSize` must be between 1 and `MAX_GRID_SIZE`
    /// - `defaultSteps` must not exceed `MAX_DEFAULT_STEPS`
    /// - no audio cue may be empty
    ///
    /// # Errors
    ///
    /// Returns `FlyError::ConfigValidationError` if any check fails.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(FlyError::config_validation(
                format!("gridSize must be between 1 and {MAX_GRID_SIZE}, got {}", self.grid_size),
                "Set gridSize to a positive value in your fly.json (the game uses 5)",
            ));
        }

        if self.default_steps > MAX_DEFAULT_STEPS {
            return Err(FlyError::config_validation(
                format!(
                    "defaultSteps must not exceed {MAX_DEFAULT_STEPS}, got {}",
                    self.default_steps
                ),
                "Lower defaultSteps in your fly.json",
            ));
        }

        if let Some(direction) = self.audio_cues.first_empty() {
            return Err(FlyError::config_validation(
                format!("audioCues.{direction} must not be empty"),
                "Provide a sound file path for every direction in your fly.json",
            ));
        }

        Ok(())
    }

    /// Builds the grid described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns `FlyError::InvalidGridSize` if `grid_size` is out of range.
    pub fn grid(&self) -> Result<Grid> {
        Grid::new(self.grid_size)
    }

    /// Builds a route generator from the grid and cue table.
    ///
    /// # Errors
    ///
    /// Returns `FlyError::InvalidGridSize` if `grid_size` is out of range.
    pub fn route_generator(&self) -> Result<RouteGenerator> {
        Ok(RouteGenerator::new(self.grid()?, self.audio_cues.clone()))
    }
}
