//! Game states and the transition table.

use serde::{Deserialize, Serialize};

/// State of one level.
///
/// ```text
/// GenerateLevel -> SpawningBlocks -> WaitingInput -> Moving
///                       ^    |                        |
///                       |    +-> Win / Lose           |
///                       +-----------------------------+
/// ```
///
/// `Win` and `Lose` have no outgoing edges. Restarting a level is a
/// reset outside this table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Building an empty grid.
    #[default]
    GenerateLevel,
    /// Placing new tiles, then evaluating win and lose.
    SpawningBlocks,
    /// Idle until a direction arrives.
    WaitingInput,
    /// A move plan is being animated.
    Moving,
    /// A tile reached the win condition.
    Win,
    /// The lose rule fired.
    Lose,
}

impl GameState {
    /// Check if the transition table has an edge to `next`.
    #[must_use]
    pub fn can_transition_to(self, next: GameState) -> bool {
        use GameState::*;
        matches!(
            (self, next),
            (GenerateLevel, SpawningBlocks)
                | (SpawningBlocks, WaitingInput | Win | Lose)
                | (WaitingInput, Moving)
                | (Moving, SpawningBlocks)
        )
    }

    /// Check if the level is over.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Win | GameState::Lose)
    }

    /// Check if directional input is accepted.
    #[must_use]
    pub fn accepts_input(self) -> bool {
        self == GameState::WaitingInput
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
