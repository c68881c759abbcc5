//! Tile spawning and end-of-round evaluation.
//!
//! Each spawn round:
//! 1. collects the free cells and shuffles them with the spawner's RNG
//! 2. places `amount` tiles on the first free cells (fewer if the board is
//!    nearly full)
//! 3. evaluates the lose rule, then the win condition

use super::values::draw_value;
use crate::core::{ConfigError, GameRng, LoseRule, RandomSource, TileId};
use crate::grid::Board;
use crate::machine::GameState;
use crate::tiles::TileTypeRegistry;

/// Tiles spawned on the first round of a level.
pub const FIRST_ROUND_AMOUNT: usize = 2;

/// Tiles spawned on every later round.
pub const ROUND_AMOUNT: usize = 1;

/// Result of one spawn round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnOutcome {
    /// Tiles created, in placement order.
    pub spawned: Vec<TileId>,

    /// Free cells counted before placement.
    pub free_before: usize,

    /// Whether the lose rule fired.
    pub lose_triggered: bool,
}

impl SpawnOutcome {
    /// State the game moves to after this round.
    ///
    /// Lose takes precedence over win; otherwise any tile at
    /// `win_condition` wins, and play continues if neither applies.
    #[must_use]
    pub fn next_state(&self, board: &Board, win_condition: u32) -> GameState {
        if self.lose_triggered {
            GameState::Lose
        } else if board.contains_value(win_condition) {
            GameState::Win
        } else {
            GameState::WaitingInput
        }
    }
}

/// Places new tiles using an owned random source.
#[derive(Clone, Debug)]
pub struct Spawner<R: RandomSource = GameRng> {
    rng: R,
    lose_rule: LoseRule,
}

impl<R: RandomSource> Spawner<R> {
    /// Create a spawner.
    #[must_use]
    pub fn new(rng: R, lose_rule: LoseRule) -> Self {
        Self { rng, lose_rule }
    }

    /// Lose rule applied after each round.
    #[must_use]
    pub fn lose_rule(&self) -> LoseRule {
        self.lose_rule
    }

    /// Random source, for callers that need to reseed or inspect it.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Spawn up to `amount` tiles on random free cells.
    ///
    /// Values are drawn per tile (see `draw_value`). Every drawn value
    /// must have a descriptor; the board is left untouched otherwise.
    pub fn spawn_blocks(
        &mut self,
        board: &mut Board,
        registry: &TileTypeRegistry,
        amount: usize,
    ) -> Result<SpawnOutcome, ConfigError> {
        let mut free = board.empty_positions();
        let free_before = free.len();
        self.rng.shuffle(&mut free);

        let placements: Vec<_> = free
            .into_iter()
            .take(amount)
            .map(|position| (position, draw_value(&mut self.rng)))
            .collect();
        for (_, value) in &placements {
            registry.require(*value)?;
        }

        let mut spawned = Vec::with_capacity(placements.len());
        for (position, value) in placements {
            if let Some(id) = board.place(value, position) {
                log::debug!("spawned {} ({}) at {}", id, value, position);
                spawned.push(id);
            }
        }

        let lose_triggered = match self.lose_rule {
            LoseRule::LastFreeCell => free_before <= 1,
            LoseRule::BoardLocked => !board.has_available_move(),
        };

        Ok(SpawnOutcome {
            spawned,
            free_before,
            lose_triggered,
        })
    }
}
