//! Game state machine and presentation hooks.
//!
//! ## Key Types
//!
//! - `GameState`: the six level states and their transition table
//! - `Game`: owns a level and runs one handler per state
//! - `Presenter`: receives tile, move and state events

mod game;
mod presenter;
mod state;

pub use game::{Game, InputOutcome};
pub use presenter::{NullPresenter, Presenter};
pub use state::GameState;
