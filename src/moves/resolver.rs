//! Shift/merge resolution.
//!
//! ## Algorithm
//!
//! 1. Sort tiles by `(x, y)`; walk the order backwards for `Right` and `Up`
//!    so tiles nearest the leading edge resolve first.
//! 2. Slide each tile one cell at a time on a scratch copy of the grid:
//!    - free neighbour: step onto it and keep going
//!    - equal value, not yet claimed: claim it as merge target, vacate the
//!      tile's cell and stop
//!    - anything else, or the edge: stop
//! 3. Record where every tile ends up plus the merge pairs.
//!
//! A single pass suffices. Leading tiles are final before trailing tiles
//! look at them, and an absorbed tile frees its cell so the tiles behind it
//! can close the gap. The board itself is never touched.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::plan::{MergePair, MovePlan, TileMove};
use crate::core::{Direction, Position, TileId};
use crate::grid::Board;
use crate::tiles::Tile;

/// Resolve a move without changing the board.
///
/// ## Example
///
/// ```
/// use rust_2048::core::Direction;
/// use rust_2048::grid::Board;
/// use rust_2048::moves::plan_move;
///
/// let board = Board::from_rows(&[&[2, 2, 4, 0]]).unwrap();
/// let plan = plan_move(&board, Direction::Left);
///
/// assert_eq!(plan.merges.len(), 1);
/// assert_eq!(plan.merges[0].value, 4);
/// ```
#[must_use]
pub fn plan_move(board: &Board, direction: Direction) -> MovePlan {
    let mut order: Vec<&Tile> = board.tiles().collect();
    order.sort_by_key(|tile| tile.position());
    if direction.resolves_in_reverse() {
        order.reverse();
    }

    let mut scratch = board.grid().clone();
    let mut claimed: FxHashSet<TileId> = FxHashSet::default();
    let mut final_positions: FxHashMap<TileId, Position> = FxHashMap::default();
    let mut moves = Vec::with_capacity(order.len());
    let mut merges: SmallVec<[MergePair; 4]> = SmallVec::new();

    for tile in order {
        let from = tile.position();
        let mut current = from;
        let mut merges_into = None;

        while let Some(next) = scratch.neighbor(current, direction) {
            let Some(occupant) = scratch.occupant(next) else {
                scratch.set_occupant(current, None);
                scratch.set_occupant(next, Some(tile.id));
                current = next;
                continue;
            };

            let mergeable = board
                .tile(occupant)
                .is_some_and(|other| other.value == tile.value)
                && !claimed.contains(&occupant);
            if mergeable {
                let newly_claimed = claimed.insert(occupant);
                debug_assert!(newly_claimed, "{} claimed twice", occupant);
                scratch.set_occupant(current, None);
                merges_into = Some(occupant);
            }
            break;
        }

        let to = match merges_into {
            Some(survivor) => {
                let position = final_positions.get(&survivor).copied().unwrap_or(current);
                merges.push(MergePair {
                    survivor,
                    absorbed: tile.id,
                    position,
                    value: tile.merged_value(),
                });
                position
            }
            None => {
                final_positions.insert(tile.id, current);
                current
            }
        };

        log::trace!("{} {} -> {} ({:?})", tile.id, from, to, merges_into);
        moves.push(TileMove {
            tile: tile.id,
            from,
            to,
            merges_into,
        });
    }

    let plan = MovePlan {
        direction,
        revision: board.revision(),
        moves,
        merges,
    };
    log::debug!(
        "planned {} move: {} moving, {} merges",
        direction,
        plan.moving_count(),
        plan.merges.len()
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_at(board: &Board, x: u32, y: u32) -> Option<u32> {
        board.tile_at(Position::new(x, y)).map(|t| t.value)
    }

    fn id_at(board: &Board, x: u32, y: u32) -> TileId {
        board.tile_at(Position::new(x, y)).map(|t| t.id).unwrap()
    }

    #[test]
    fn test_slide_to_edge() {
        let board = Board::from_rows(&[&[0, 0, 0, 2]]).unwrap();
        let plan = plan_move(&board, Direction::Left);

        let id = id_at(&board, 3, 0);
        assert_eq!(plan.move_of(id).map(|m| m.to), Some(Position::new(0, 0)));
        assert!(plan.merges.is_empty());
    }

    #[test]
    fn test_stops_at_different_value() {
        let board = Board::from_rows(&[&[4, 0, 2, 0]]).unwrap();
        let plan = plan_move(&board, Direction::Left);

        let two = id_at(&board, 2, 0);
        assert_eq!(plan.move_of(two).map(|m| m.to), Some(Position::new(1, 0)));
        assert!(plan.merges.is_empty());
    }

    #[test]
    fn test_merge_pair_survivor_is_leading_tile() {
        let board = Board::from_rows(&[&[2, 2, 4, 0]]).unwrap();
        let plan = plan_move(&board, Direction::Left);

        let first = id_at(&board, 0, 0);
        let second = id_at(&board, 1, 0);
        let four = id_at(&board, 2, 0);

        assert_eq!(plan.merges.len(), 1);
        assert_eq!(plan.merges[0].survivor, first);
        assert_eq!(plan.merges[0].absorbed, second);
        assert_eq!(plan.merges[0].position, Position::new(0, 0));
        assert_eq!(plan.move_of(second).map(|m| m.to), Some(Position::new(0, 0)));
        assert_eq!(plan.move_of(four).map(|m| m.to), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_four_equal_tiles_merge_pairwise() {
        let board = Board::from_rows(&[&[2, 2, 2, 2]]).unwrap();
        let plan = plan_move(&board, Direction::Left);

        assert_eq!(plan.merges.len(), 2);
        let positions: Vec<_> = plan.merges.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![Position::new(0, 0), Position::new(1, 0)]);
        assert!(plan.merges_are_exclusive());
    }

    #[test]
    fn test_three_equal_tiles_right() {
        let board = Board::from_rows(&[&[2, 2, 2, 0]]).unwrap();
        let plan = plan_move(&board, Direction::Right);

        assert_eq!(plan.merges.len(), 1);
        let merge = plan.merges[0];
        assert_eq!(merge.survivor, id_at(&board, 2, 0));
        assert_eq!(merge.absorbed, id_at(&board, 1, 0));
        assert_eq!(merge.position, Position::new(3, 0));

        let leftover = id_at(&board, 0, 0);
        assert_eq!(plan.move_of(leftover).map(|m| m.to), Some(Position::new(2, 0)));
    }

    #[test]
    fn test_no_chained_merge_in_one_move() {
        // 2+2 makes 4, which must not merge again with the existing 4.
        let board = Board::from_rows(&[&[4, 2, 2, 0]]).unwrap();
        let plan = plan_move(&board, Direction::Left);

        assert_eq!(plan.merges.len(), 1);
        assert_eq!(plan.merges[0].value, 4);
        assert_eq!(plan.merges[0].position, Position::new(1, 0));
    }

    #[test]
    fn test_vertical_moves() {
        let board = Board::from_rows(&[
            &[0],
            &[2],
            &[2],
        ])
        .unwrap();

        let up = plan_move(&board, Direction::Up);
        assert_eq!(up.merges.len(), 1);
        assert_eq!(up.merges[0].position, Position::new(0, 2));

        let down = plan_move(&board, Direction::Down);
        assert_eq!(down.merges.len(), 1);
        assert_eq!(down.merges[0].position, Position::new(0, 0));
    }

    #[test]
    fn test_edge_tile_does_not_move() {
        let board = Board::from_rows(&[&[2, 0], &[0, 0]]).unwrap();
        let plan = plan_move(&board, Direction::Left);

        assert!(plan.is_noop());
        assert_eq!(value_at(&board, 0, 1), Some(2));
    }

    #[test]
    fn test_plan_leaves_board_untouched() {
        let board = Board::from_rows(&[&[0, 2, 2, 8]]).unwrap();
        let revision = board.revision();
        let rows = board.to_rows();

        let _ = plan_move(&board, Direction::Left);

        assert_eq!(board.to_rows(), rows);
        assert_eq!(board.revision(), revision);
        assert!(board.tiles().all(|t| t.merge_target().is_none()));
    }

    #[test]
    fn test_plan_records_revision_and_direction() {
        let board = Board::from_rows(&[&[2, 0]]).unwrap();
        let plan = plan_move(&board, Direction::Right);

        assert_eq!(plan.direction, Direction::Right);
        assert_eq!(plan.revision, board.revision());
        assert_eq!(plan.moves.len(), board.len());
    }

    #[test]
    fn test_empty_board() {
        let board = Board::with_size(4, 4).unwrap();
        let plan = plan_move(&board, Direction::Up);

        assert!(plan.moves.is_empty());
        assert!(plan.is_noop());
    }
}
