//! Level configuration.
//!
//! A level is configured once at start and stays immutable while it runs:
//! - grid size
//! - win threshold
//! - travel (animation) time handed to presenters
//! - the value → `TileType` descriptor list
//! - which lose rule applies
//!
//! Configurations can be built in code or read from TOML:
//!
//! ```
//! use rust_2048::core::{LevelConfig, LoseRule};
//!
//! let config = LevelConfig::from_toml_str(
//!     r#"
//!     width = 5
//!     height = 5
//!     win_condition = 1024
//!     lose_rule = "board-locked"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.width, 5);
//! assert_eq!(config.lose_rule, LoseRule::BoardLocked);
//! assert!(config.validate().is_ok());
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::tiles::{is_tile_value, TileType, TileTypeRegistry};

/// Default board width.
pub const DEFAULT_WIDTH: u32 = 4;
/// Default board height.
pub const DEFAULT_HEIGHT: u32 = 4;
/// Default win threshold.
pub const DEFAULT_WIN_CONDITION: u32 = 2048;
/// Default travel time for a move animation, in milliseconds.
pub const DEFAULT_TRAVEL_TIME_MS: u64 = 200;

/// When a spawn round ends the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoseRule {
    /// Lose when at most one cell was free before placement.
    ///
    /// Exactly one free cell is the classic trigger; zero free cells
    /// (an exhausted grid) is treated the same way.
    #[default]
    LastFreeCell,

    /// Lose when, after placement, no move could change the board:
    /// no free cell and no adjacent pair of equal values.
    BoardLocked,
}

impl std::str::FromStr for LoseRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-free-cell" => Ok(LoseRule::LastFreeCell),
            "board-locked" => Ok(LoseRule::BoardLocked),
            other => Err(format!("unknown lose rule '{}'", other)),
        }
    }
}

/// Complete level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Number of columns.
    pub width: u32,

    /// Number of rows.
    pub height: u32,

    /// Tile value that wins the level.
    pub win_condition: u32,

    /// Duration presenters should use for the slide animation.
    pub travel_time_ms: u64,

    /// Display descriptors, one per value.
    pub tile_types: Vec<TileType>,

    /// Lose evaluation used after each spawn.
    pub lose_rule: LoseRule,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            win_condition: DEFAULT_WIN_CONDITION,
            travel_time_ms: DEFAULT_TRAVEL_TIME_MS,
            tile_types: TileType::classic_palette(DEFAULT_WIN_CONDITION),
            lose_rule: LoseRule::default(),
        }
    }
}

impl LevelConfig {
    /// Create the default 4x4 configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid size.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the win threshold.
    ///
    /// Extends the tile types with palette entries so every value up to the
    /// new threshold has a descriptor.
    #[must_use]
    pub fn with_win_condition(mut self, win_condition: u32) -> Self {
        self.win_condition = win_condition;
        for tile_type in TileType::classic_palette(win_condition) {
            if !self.tile_types.iter().any(|t| t.value == tile_type.value) {
                self.tile_types.push(tile_type);
            }
        }
        self
    }

    /// Set the travel time handed to presenters.
    #[must_use]
    pub fn with_travel_time(mut self, travel_time: Duration) -> Self {
        self.travel_time_ms = u64::try_from(travel_time.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Replace the tile type list.
    #[must_use]
    pub fn with_tile_types(mut self, tile_types: Vec<TileType>) -> Self {
        self.tile_types = tile_types;
        self
    }

    /// Set the lose rule.
    #[must_use]
    pub fn with_lose_rule(mut self, lose_rule: LoseRule) -> Self {
        self.lose_rule = lose_rule;
        self
    }

    /// Travel time as a `Duration`.
    #[must_use]
    pub fn travel_time(&self) -> Duration {
        Duration::from_millis(self.travel_time_ms)
    }

    /// Build the descriptor registry.
    ///
    /// Fails if a descriptor is invalid or duplicated, or if any value a
    /// level can produce before it is won (2 through `win_condition`) has
    /// no descriptor.
    pub fn registry(&self) -> Result<TileTypeRegistry, ConfigError> {
        if !is_tile_value(self.win_condition) || self.win_condition < 4 {
            return Err(ConfigError::InvalidWinCondition(self.win_condition));
        }

        let mut registry = TileTypeRegistry::new();
        for tile_type in &self.tile_types {
            registry.register(tile_type.clone())?;
        }
        registry.require_up_to(self.win_condition)?;
        Ok(registry)
    }

    /// Check the whole configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        self.registry().map(|_| ())
    }

    /// Parse a configuration from TOML. Missing fields take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: LevelConfig = toml::from_str(source)?;
        Ok(config)
    }

    /// Read a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("loaded level config from {}", path.display());
        Ok(config)
    }
}
