//! Move resolution: planning and committing directional moves.
//!
//! Moves are two-phase:
//! - `plan_move` resolves a direction into a `MovePlan` without touching
//!   the board
//! - `commit_move` applies the plan once the caller's animation is done
//!
//! ```
//! use rust_2048::core::Direction;
//! use rust_2048::grid::Board;
//! use rust_2048::moves::{commit_move, plan_move};
//! use rust_2048::tiles::TileTypeRegistry;
//!
//! let mut board = Board::from_rows(&[&[0, 2, 0, 2]]).unwrap();
//! let registry = TileTypeRegistry::classic(2048);
//!
//! let plan = plan_move(&board, Direction::Right);
//! commit_move(&mut board, &registry, &plan).unwrap();
//!
//! assert_eq!(board.to_rows(), vec![vec![0, 0, 0, 4]]);
//! ```

mod commit;
mod plan;
mod resolver;

pub use commit::{commit_move, MergeOutcome};
pub use plan::{MergePair, MovePlan, TileMove};
pub use resolver::plan_move;
