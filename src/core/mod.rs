//! Core engine types: positions, tile ids, RNG, configuration, errors.
//!
//! These are the building blocks shared by the grid, the move resolver,
//! the spawner and the state machine.

pub mod entity;
pub mod position;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::TileId;
pub use position::{Direction, Position};
pub use rng::{FixedRandom, GameRng, RandomSource};
pub use config::{LevelConfig, LoseRule};
pub use error::{ConfigError, GameError, TransitionError};
