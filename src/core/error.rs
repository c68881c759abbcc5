//! Error types.
//!
//! - `ConfigError`: bad level configuration; fatal when building a level
//! - `TransitionError`: state machine contract violations; the game state
//!   is left unchanged
//! - `GameError`: either of the above, returned by the `Game` API

use std::path::PathBuf;

use thiserror::Error;

use crate::core::Position;
use crate::machine::GameState;

/// Level configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Width or height is zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Win threshold is not a power of two of at least 4.
    #[error("win condition must be a power of two >= 4, got {0}")]
    InvalidWinCondition(u32),

    /// A tile value that is not a power of two of at least 2.
    #[error("tile value must be a power of two >= 2, got {0}")]
    InvalidTileValue(u32),

    /// Two descriptors share a value.
    #[error("tile type for value {0} registered twice")]
    DuplicateTileType(u32),

    /// A value that can occur has no descriptor.
    #[error("no tile type registered for value {0}")]
    MissingTileType(u32),

    /// Configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for `LevelConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Requests the state machine refuses.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The transition table has no edge `from -> to`.
    #[error("invalid transition {from:?} -> {to:?}")]
    Invalid {
        /// Current state.
        from: GameState,
        /// Requested state.
        to: GameState,
    },

    /// `start` was called on a level that already left `GenerateLevel`.
    #[error("level already started (state {0:?})")]
    AlreadyStarted(GameState),

    /// A move was requested outside `WaitingInput`.
    #[error("cannot start a move in state {0:?}")]
    NotAwaitingInput(GameState),

    /// Move completion was signalled with no move in flight.
    #[error("no move in flight (state {0:?})")]
    NoMoveInFlight(GameState),

    /// A plan computed against an older board was committed.
    #[error("move plan for board revision {plan} does not match revision {board}")]
    StalePlan {
        /// Revision the plan was computed against.
        plan: u64,
        /// Current board revision.
        board: u64,
    },

    /// A plan sends a tile or a merge result onto a cell that is taken,
    /// or names a tile that is not on the board.
    #[error("move plan conflicts with the board at {0}")]
    PlanConflict(Position),
}

/// Any error surfaced by the game API.
#[derive(Debug, Error)]
pub enum GameError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// State machine contract violation.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::InvalidDimensions { width: 0, height: 4 };
        assert_eq!(err.to_string(), "grid dimensions must be positive, got 0x4");

        let err = ConfigError::MissingTileType(4096);
        assert_eq!(err.to_string(), "no tile type registered for value 4096");
    }

    #[test]
    fn test_transition_error_messages() {
        let err = TransitionError::Invalid {
            from: GameState::Win,
            to: GameState::SpawningBlocks,
        };
        assert_eq!(err.to_string(), "invalid transition Win -> SpawningBlocks");
    }

    #[test]
    fn test_game_error_from() {
        let err: GameError = TransitionError::NoMoveInFlight(GameState::WaitingInput).into();
        assert!(matches!(err, GameError::Transition(_)));
        assert_eq!(err.to_string(), "no move in flight (state WaitingInput)");

        let err: GameError = ConfigError::InvalidWinCondition(3).into();
        assert!(matches!(err, GameError::Config(_)));
    }
}
