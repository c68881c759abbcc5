//! The level state machine.
//!
//! `Game` owns everything a level needs: configuration, descriptor
//! registry, board, spawner and the move in flight. Each state has one
//! handler returning the next state; `transition` checks the edge against
//! `GameState::can_transition_to` and notifies the presenter.
//!
//! ## Driving a level
//!
//! ```
//! use rust_2048::core::{Direction, GameRng, LevelConfig};
//! use rust_2048::machine::{Game, GameState, NullPresenter};
//!
//! let mut game = Game::new(LevelConfig::default(), GameRng::new(1)).unwrap();
//! let mut presenter = NullPresenter;
//!
//! game.start(&mut presenter).unwrap();
//! assert_eq!(game.state(), GameState::WaitingInput);
//! assert_eq!(game.board().len(), 2);
//!
//! game.handle_input(Direction::Left, &mut presenter).unwrap();
//! assert_eq!(game.state(), GameState::Moving);
//!
//! // ...animation runs for config.travel_time()...
//! game.complete_move(&mut presenter).unwrap();
//! assert_eq!(game.state(), GameState::WaitingInput);
//! ```

use super::presenter::Presenter;
use super::state::GameState;
use crate::core::{
    ConfigError, Direction, GameError, GameRng, LevelConfig, RandomSource, TileId, TransitionError,
};
use crate::grid::Board;
use crate::moves::{commit_move, plan_move, MovePlan};
use crate::spawn::{Spawner, FIRST_ROUND_AMOUNT, ROUND_AMOUNT};
use crate::tiles::TileTypeRegistry;

/// Result of `Game::handle_input`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// The game was not waiting for input; nothing happened.
    Ignored,
    /// A move started. The plan was handed to the presenter.
    Started(MovePlan),
}

impl InputOutcome {
    /// Check if the input was dropped.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, InputOutcome::Ignored)
    }
}

/// One level of the game.
#[derive(Clone, Debug)]
pub struct Game<R: RandomSource = GameRng> {
    config: LevelConfig,
    registry: TileTypeRegistry,
    board: Board,
    spawner: Spawner<R>,
    state: GameState,
    round: u32,
    pending: Option<MovePlan>,
}

impl Game<GameRng> {
    /// Create a level driven by a seeded `GameRng`.
    pub fn seeded(config: LevelConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, GameRng::new(seed))
    }
}

impl<R: RandomSource> Game<R> {
    /// Create a level in `GenerateLevel`.
    ///
    /// ## Errors
    ///
    /// Any `ConfigError` from validating `config`.
    pub fn new(config: LevelConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = config.registry()?;
        let board = Board::with_size(config.width, config.height)?;
        let spawner = Spawner::new(rng, config.lose_rule);

        Ok(Self {
            config,
            registry,
            board,
            spawner,
            state: GameState::GenerateLevel,
            round: 0,
            pending: None,
        })
    }

    /// Resume a level from an existing board, waiting for input.
    ///
    /// The board must match the configured size and hold only values with
    /// a descriptor. The next spawn round places a single tile.
    pub fn from_board(config: LevelConfig, rng: R, board: Board) -> Result<Self, ConfigError> {
        let mut game = Self::new(config, rng)?;
        if board.width() != game.config.width || board.height() != game.config.height {
            return Err(ConfigError::InvalidDimensions {
                width: board.width(),
                height: board.height(),
            });
        }
        for tile in board.tiles() {
            game.registry.require(tile.value)?;
        }

        game.board = board;
        game.board.clear_merge_targets();
        game.state = GameState::WaitingInput;
        game.round = 1;
        log::debug!("resumed level with {} tiles", game.board.len());
        Ok(game)
    }

    // === Accessors ===

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Level configuration.
    #[must_use]
    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Tile descriptors for this level.
    #[must_use]
    pub fn registry(&self) -> &TileTypeRegistry {
        &self.registry
    }

    /// Completed spawn rounds since the level was generated.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Move currently being animated.
    #[must_use]
    pub fn pending_plan(&self) -> Option<&MovePlan> {
        self.pending.as_ref()
    }

    /// Spawner, for access to its random source.
    pub fn spawner_mut(&mut self) -> &mut Spawner<R> {
        &mut self.spawner
    }

    // === Driving ===

    /// Generate the level and spawn the first tiles.
    ///
    /// Runs until the game waits for input or ends. Returns the state
    /// reached.
    pub fn start(&mut self, presenter: &mut dyn Presenter) -> Result<GameState, GameError> {
        if self.state != GameState::GenerateLevel {
            log::warn!("start called in state {}", self.state);
            return Err(TransitionError::AlreadyStarted(self.state).into());
        }
        self.run(presenter)
    }

    /// Feed a direction to the game.
    ///
    /// Input is dropped outside `WaitingInput`. Otherwise the move is
    /// planned, the game enters `Moving` and the presenter is asked to
    /// animate the plan.
    pub fn handle_input(
        &mut self,
        direction: Direction,
        presenter: &mut dyn Presenter,
    ) -> Result<InputOutcome, GameError> {
        if !self.state.accepts_input() {
            log::debug!("ignored {} input in state {}", direction, self.state);
            return Ok(InputOutcome::Ignored);
        }

        let plan = self.begin_move(direction)?.clone();
        presenter.state_changed(GameState::WaitingInput, GameState::Moving);
        presenter.animate_move(&plan, self.config.travel_time());
        Ok(InputOutcome::Started(plan))
    }

    /// Plan a move and enter `Moving` without notifying a presenter.
    ///
    /// ## Errors
    ///
    /// `TransitionError::NotAwaitingInput` outside `WaitingInput`.
    pub fn begin_move(&mut self, direction: Direction) -> Result<&MovePlan, GameError> {
        if !self.state.accepts_input() {
            log::warn!("move {} requested in state {}", direction, self.state);
            return Err(TransitionError::NotAwaitingInput(self.state).into());
        }

        let plan = self.on_waiting_input(direction);
        self.set_state(GameState::Moving)?;
        Ok(&*self.pending.insert(plan))
    }

    /// Signal that the move animation finished.
    ///
    /// Commits the pending plan, reports destroyed and created tiles, then
    /// spawns the next round. Returns the state reached.
    ///
    /// ## Errors
    ///
    /// - `TransitionError::NoMoveInFlight` unless the game is `Moving`
    /// - any commit error; the plan stays pending and the board unchanged
    pub fn complete_move(&mut self, presenter: &mut dyn Presenter) -> Result<GameState, GameError> {
        let plan = match (self.state, self.pending.take()) {
            (GameState::Moving, Some(plan)) => plan,
            (state, pending) => {
                self.pending = pending;
                log::warn!("complete_move called in state {}", state);
                return Err(TransitionError::NoMoveInFlight(state).into());
            }
        };

        if let Err(err) = self.on_moving(&plan, presenter) {
            self.pending = Some(plan);
            return Err(err);
        }
        self.transition(GameState::SpawningBlocks, presenter)?;
        self.run(presenter)
    }

    /// Throw the level away and generate it again.
    ///
    /// This is a reset, not a transition: the machine is put back in
    /// `GenerateLevel` directly, so it works from `Win` and `Lose` too.
    /// Keeps the configuration and continues the same random stream.
    pub fn restart(&mut self, presenter: &mut dyn Presenter) -> Result<GameState, GameError> {
        log::debug!("restarting level from {}", self.state);
        self.pending = None;
        self.state = GameState::GenerateLevel;
        self.run(presenter)
    }

    // === State handlers ===

    /// Run automatic states until input is needed or the level ends.
    fn run(&mut self, presenter: &mut dyn Presenter) -> Result<GameState, GameError> {
        loop {
            let next = match self.state {
                GameState::GenerateLevel => self.on_generate_level(presenter)?,
                GameState::SpawningBlocks => self.on_spawning_blocks(presenter)?,
                GameState::WaitingInput | GameState::Moving | GameState::Win | GameState::Lose => {
                    return Ok(self.state);
                }
            };
            self.transition(next, presenter)?;
        }
    }

    fn on_generate_level(&mut self, presenter: &mut dyn Presenter) -> Result<GameState, GameError> {
        for tile in self.board.tiles() {
            presenter.tile_destroyed(tile);
        }
        self.board = Board::with_size(self.config.width, self.config.height)?;
        self.round = 0;
        self.pending = None;
        log::debug!("generated {}x{} level", self.config.width, self.config.height);
        Ok(GameState::SpawningBlocks)
    }

    fn on_spawning_blocks(&mut self, presenter: &mut dyn Presenter) -> Result<GameState, GameError> {
        let amount = if self.round == 0 {
            FIRST_ROUND_AMOUNT
        } else {
            ROUND_AMOUNT
        };
        let outcome = self.spawner.spawn_blocks(&mut self.board, &self.registry, amount)?;
        for &id in &outcome.spawned {
            self.announce_created(id, presenter);
        }
        self.round += 1;

        let next = outcome.next_state(&self.board, self.config.win_condition);
        match next {
            GameState::Lose => log::info!(
                "level lost after round {} ({} free cells before spawn)",
                self.round,
                outcome.free_before
            ),
            GameState::Win => log::info!(
                "level won after round {}: reached {}",
                self.round,
                self.config.win_condition
            ),
            _ => {}
        }
        Ok(next)
    }

    /// Resolve the move and stamp merge targets onto the absorbed tiles.
    fn on_waiting_input(&mut self, direction: Direction) -> MovePlan {
        let plan = plan_move(&self.board, direction);
        self.board.clear_merge_targets();
        for merge in &plan.merges {
            self.board.set_merge_target(merge.absorbed, merge.survivor);
        }
        plan
    }

    fn on_moving(&mut self, plan: &MovePlan, presenter: &mut dyn Presenter) -> Result<(), GameError> {
        let outcomes = commit_move(&mut self.board, &self.registry, plan)?;
        for outcome in &outcomes {
            presenter.tile_destroyed(&outcome.survivor);
            presenter.tile_destroyed(&outcome.absorbed);
            self.announce_created(outcome.created, presenter);
        }
        self.board.clear_merge_targets();
        Ok(())
    }

    // === Helpers ===

    fn announce_created(&self, id: TileId, presenter: &mut dyn Presenter) {
        let Some(tile) = self.board.tile(id) else {
            return;
        };
        if let Some(tile_type) = self.registry.get(tile.value) {
            presenter.tile_created(tile, tile_type);
        }
    }

    fn transition(&mut self, to: GameState, presenter: &mut dyn Presenter) -> Result<(), GameError> {
        let from = self.state;
        self.set_state(to)?;
        presenter.state_changed(from, to);
        Ok(())
    }

    fn set_state(&mut self, to: GameState) -> Result<(), GameError> {
        if !self.state.can_transition_to(to) {
            log::warn!("rejected transition {} -> {}", self.state, to);
            return Err(TransitionError::Invalid { from: self.state, to }.into());
        }
        log::debug!("state {} -> {}", self.state, to);
        self.state = to;
        Ok(())
    }
}
