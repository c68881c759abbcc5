//! Presentation collaborator.
//!
//! The game never draws anything itself. It reports tile lifecycle,
//! planned moves and state changes to a `Presenter`; every method has an
//! empty default so implementors override only what they show.

use std::time::Duration;

use super::state::GameState;
use crate::moves::MovePlan;
use crate::tiles::{Tile, TileType};

/// Receives game events for display.
pub trait Presenter {
    /// A tile was placed, by spawning or by a merge.
    fn tile_created(&mut self, _tile: &Tile, _tile_type: &TileType) {}

    /// A tile left the board: merged away or cleared by a restart.
    fn tile_destroyed(&mut self, _tile: &Tile) {}

    /// A move was planned.
    ///
    /// The presenter animates it over `travel_time` and the caller then
    /// signals `Game::complete_move`. Tiles are still at their `from` cells.
    fn animate_move(&mut self, _plan: &MovePlan, _travel_time: Duration) {}

    /// The game changed state.
    fn state_changed(&mut self, _from: GameState, _to: GameState) {}
}

/// Presenter that ignores every event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn tile_created(&mut self, tile: &Tile, tile_type: &TileType) {
        (**self).tile_created(tile, tile_type);
    }

    fn tile_destroyed(&mut self, tile: &Tile) {
        (**self).tile_destroyed(tile);
    }

    fn animate_move(&mut self, plan: &MovePlan, travel_time: Duration) {
        (**self).animate_move(plan, travel_time);
    }

    fn state_changed(&mut self, from: GameState, to: GameState) {
        (**self).state_changed(from, to);
    }
}
