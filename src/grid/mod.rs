//! Grid model: cells, occupancy and the live tile arena.
//!
//! - `Grid`: fixed cells with O(1) occupant lookup
//! - `Board`: grid plus tiles, keeping both sides of the cell ↔ tile link
//!   consistent

mod board;
mod cells;

pub use board::Board;
pub use cells::Grid;
