//! Move resolution integration tests.
//!
//! These tests drive `plan_move` and `commit_move` together on full
//! boards, checking both the plan and the committed result.

use rust_2048::core::{Direction, Position, TileId};
use rust_2048::grid::Board;
use rust_2048::moves::{commit_move, plan_move, MovePlan};
use rust_2048::tiles::TileTypeRegistry;

fn registry() -> TileTypeRegistry {
    TileTypeRegistry::classic(2048)
}

fn id_at(board: &Board, x: u32, y: u32) -> TileId {
    board
        .tile_at(Position::new(x, y))
        .map(|t| t.id)
        .expect("tile present")
}

fn apply(board: &mut Board, direction: Direction) -> MovePlan {
    let plan = plan_move(board, direction);
    commit_move(board, &registry(), &plan).expect("commit");
    plan
}

// =============================================================================
// Scenario Tests
// =============================================================================

/// `[2, 2, 4]` moved left merges the 2s at x=0 and slides the 4 to x=1.
#[test]
fn test_two_two_four_left() {
    let mut board = Board::from_rows(&[
        &[0, 0, 0, 0],
        &[0, 0, 0, 0],
        &[0, 0, 0, 0],
        &[2, 2, 4, 0],
    ])
    .unwrap();
    let first = id_at(&board, 0, 0);
    let second = id_at(&board, 1, 0);
    let four = id_at(&board, 2, 0);

    let plan = plan_move(&board, Direction::Left);

    assert_eq!(plan.merges.len(), 1);
    assert_eq!(plan.merges[0].survivor, first);
    assert_eq!(plan.merges[0].absorbed, second);
    assert_eq!(plan.merges[0].value, 4);
    assert_eq!(plan.move_of(four).map(|m| m.to), Some(Position::new(1, 0)));

    let outcomes = commit_move(&mut board, &registry(), &plan).unwrap();

    assert_eq!(outcomes.len(), 1);
    assert_eq!(board.tile_at(Position::new(0, 0)).map(|t| t.value), Some(4));
    assert_eq!(board.tile_at(Position::new(1, 0)).map(|t| t.id), Some(four));
    assert_eq!(board.len(), 2);
}

/// A merged tile is a new entity, not the survivor with a new value.
#[test]
fn test_merge_creates_new_identity() {
    let mut board = Board::from_rows(&[&[4, 4]]).unwrap();
    let left = id_at(&board, 0, 0);
    let right = id_at(&board, 1, 0);

    let plan = plan_move(&board, Direction::Left);
    let outcomes = commit_move(&mut board, &registry(), &plan).unwrap();

    let created = outcomes[0].created;
    assert_ne!(created, left);
    assert_ne!(created, right);
    assert_eq!(board.tile(created).map(|t| t.value), Some(8));
    assert!(board.tile(left).is_none());
    assert!(board.tile(right).is_none());
}

/// Each tile merges at most once per move.
#[test]
fn test_row_of_four_pairs_up() {
    let mut board = Board::from_rows(&[&[2, 2, 2, 2]]).unwrap();
    let plan = apply(&mut board, Direction::Right);

    assert_eq!(plan.merges.len(), 2);
    assert!(plan.merges_are_exclusive());
    assert_eq!(board.to_rows(), vec![vec![0, 0, 4, 4]]);
}

#[test]
fn test_merged_tile_does_not_merge_again() {
    let mut board = Board::from_rows(&[&[0, 4, 2, 2]]).unwrap();
    apply(&mut board, Direction::Right);

    assert_eq!(board.to_rows(), vec![vec![0, 0, 4, 4]]);
}

#[test]
fn test_columns_resolve_independently() {
    let mut board = Board::from_rows(&[
        &[2, 4, 0],
        &[2, 0, 8],
        &[0, 4, 8],
    ])
    .unwrap();

    apply(&mut board, Direction::Down);

    assert_eq!(
        board.to_rows(),
        vec![
            vec![0, 0, 0],
            vec![0, 0, 0],
            vec![4, 8, 16],
        ]
    );
}

#[test]
fn test_up_moves_toward_top_row() {
    let mut board = Board::from_rows(&[
        &[0, 0],
        &[0, 2],
        &[2, 2],
    ])
    .unwrap();

    apply(&mut board, Direction::Up);

    assert_eq!(
        board.to_rows(),
        vec![
            vec![2, 4],
            vec![0, 0],
            vec![0, 0],
        ]
    );
}

// =============================================================================
// Boundary and No-op Tests
// =============================================================================

/// Tiles on the leading edge stay put and keep their identity.
#[test]
fn test_edge_tiles_unchanged() {
    let mut board = Board::from_rows(&[
        &[2, 0, 0],
        &[4, 0, 0],
        &[8, 0, 0],
    ])
    .unwrap();
    let before: Vec<_> = board.tiles().cloned().collect();

    let plan = apply(&mut board, Direction::Left);

    assert!(plan.is_noop());
    let after: Vec<_> = board.tiles().cloned().collect();
    assert_eq!(before, after);
}

/// A full board with no equal neighbours produces an empty plan.
#[test]
fn test_full_board_noop() {
    let mut board = Board::from_rows(&[
        &[2, 4, 2, 4],
        &[4, 2, 4, 2],
        &[2, 4, 2, 4],
        &[4, 2, 4, 2],
    ])
    .unwrap();
    let rows = board.to_rows();

    for direction in Direction::ALL {
        let plan = apply(&mut board, direction);
        assert!(plan.is_noop(), "{direction} moved something");
    }
    assert_eq!(board.to_rows(), rows);
    assert!(!board.has_available_move());
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_planning_is_repeatable() {
    let board = Board::from_rows(&[
        &[2, 2, 4, 4],
        &[0, 8, 8, 0],
        &[16, 0, 16, 2],
        &[2, 0, 0, 2],
    ])
    .unwrap();

    for direction in Direction::ALL {
        assert_eq!(plan_move(&board, direction), plan_move(&board, direction));
    }
}

/// A plan is invalid once the board it was made for changes.
#[test]
fn test_second_commit_is_stale() {
    let mut board = Board::from_rows(&[&[2, 0, 2]]).unwrap();
    let plan = apply(&mut board, Direction::Left);

    assert!(commit_move(&mut board, &registry(), &plan).is_err());
    assert_eq!(board.to_rows(), vec![vec![4, 0, 0]]);
}
