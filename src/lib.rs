//! # rust-2048
//!
//! Core engine for a 2048-style sliding-merge puzzle.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine never draws. A `Presenter`
//!    receives tile lifecycle, move plans and state changes.
//!
//! 2. **Plan, Then Commit**: A move is resolved into a `MovePlan` without
//!    touching the board, animated by the caller, then committed.
//!
//! 3. **Injected Randomness**: All randomness flows through a
//!    `RandomSource` owned by the spawner, so games replay from a seed.
//!
//! ## Architecture
//!
//! - **Arena Board**: Tiles live in an `im::OrdMap` keyed by `TileId`; the
//!   grid stores ids, tiles store positions. `Board` keeps both in step.
//!
//! - **Explicit State Machine**: `GenerateLevel -> SpawningBlocks ->
//!   WaitingInput -> Moving -> SpawningBlocks ...` until `Win` or `Lose`,
//!   with one handler per state.
//!
//! ## Modules
//!
//! - `core`: Positions, directions, tile ids, RNG, configuration, errors
//! - `tiles`: Tile descriptors, registry and runtime tiles
//! - `grid`: Cell grid and board
//! - `moves`: Move resolver and merge application
//! - `spawn`: Random tile placement and round evaluation
//! - `machine`: Game state machine and `Presenter` trait

pub mod core;
pub mod tiles;
pub mod grid;
pub mod moves;
pub mod spawn;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{
    TileId, Position, Direction,
    RandomSource, GameRng, FixedRandom,
    LevelConfig, LoseRule,
    ConfigError, GameError, TransitionError,
};

pub use crate::tiles::{Color, Tile, TileType, TileTypeRegistry};

pub use crate::grid::{Board, Grid};

pub use crate::moves::{commit_move, plan_move, MergeOutcome, MergePair, MovePlan, TileMove};

pub use crate::spawn::{draw_value, SpawnOutcome, Spawner};

pub use crate::machine::{Game, GameState, InputOutcome, NullPresenter, Presenter};
