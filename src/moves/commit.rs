//! Merge application - committing a resolved move to the board.
//!
//! Committing happens after the presenter has finished animating. Tiles
//! are moved to their planned cells, then each merge destroys both of its
//! tiles and creates a new one of double value on the survivor's cell.
//! Merges change identity rather than value, so presenters see a
//! destruction and a creation, never an in-place update.

use super::plan::MovePlan;
use crate::core::{GameError, TileId, TransitionError};
use crate::grid::Board;
use crate::tiles::{Tile, TileTypeRegistry};

/// One applied merge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Tile created by the merge.
    pub created: TileId,

    /// Destroyed stationary tile.
    pub survivor: Tile,

    /// Destroyed moving tile.
    pub absorbed: Tile,
}

/// Apply a plan produced by `plan_move` for this board.
///
/// ## Errors
///
/// - `TransitionError::StalePlan` if the board changed since the plan was
///   resolved
/// - `ConfigError::MissingTileType` if a merged value has no descriptor
/// - `TransitionError::PlanConflict` if a tile cannot land where the plan
///   puts it
///
/// The board is untouched when an error is returned.
pub fn commit_move(
    board: &mut Board,
    registry: &TileTypeRegistry,
    plan: &MovePlan,
) -> Result<Vec<MergeOutcome>, GameError> {
    if plan.revision != board.revision() {
        return Err(TransitionError::StalePlan {
            plan: plan.revision,
            board: board.revision(),
        }
        .into());
    }
    for merge in &plan.merges {
        registry.require(merge.value)?;
    }

    // Apply to a copy; the board only changes if every step succeeds.
    // Move as a batch: clear every departing cell before filling any
    // destination, since a destination may be another tile's origin.
    let mut next = board.clone();
    for tile_move in plan.moves.iter().filter(|m| m.is_moving()) {
        next.detach(tile_move.tile);
    }
    for tile_move in plan.moves.iter().filter(|m| m.is_moving() && m.merges_into.is_none()) {
        if !next.attach(tile_move.tile, tile_move.to) {
            log::warn!("{} could not land on {}", tile_move.tile, tile_move.to);
            return Err(TransitionError::PlanConflict(tile_move.to).into());
        }
    }

    let mut outcomes = Vec::with_capacity(plan.merges.len());
    for merge in &plan.merges {
        let conflict = || -> GameError { TransitionError::PlanConflict(merge.position).into() };
        let survivor = next.remove(merge.survivor).ok_or_else(conflict)?;
        let absorbed = next.remove(merge.absorbed).ok_or_else(conflict)?;
        let Some(created) = next.place(merge.value, merge.position) else {
            log::warn!("merge target cell {} is occupied", merge.position);
            return Err(conflict());
        };
        log::debug!(
            "merged {} + {} into {} ({}) at {}",
            survivor.id,
            absorbed.id,
            created,
            merge.value,
            merge.position
        );
        outcomes.push(MergeOutcome {
            created,
            survivor,
            absorbed,
        });
    }

    *board = next;
    debug_assert_eq!(board.check_invariants(), Ok(()));
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConfigError, Direction, Position};
    use crate::moves::plan_move;

    #[test]
    fn test_commit_slides_and_merges() {
        let mut board = Board::from_rows(&[&[2, 2, 4, 0]]).unwrap();
        let registry = TileTypeRegistry::classic(2048);
        let plan = plan_move(&board, Direction::Left);

        let outcomes = commit_move(&mut board, &registry, &plan).unwrap();

        assert_eq!(board.to_rows(), vec![vec![4, 4, 0, 0]]);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].survivor.value, 2);
        assert_eq!(outcomes[0].absorbed.value, 2);
        assert!(board.tile(outcomes[0].survivor.id).is_none());
        assert!(board.tile(outcomes[0].absorbed.id).is_none());
        assert_eq!(
            board.tile(outcomes[0].created).map(|t| t.position()),
            Some(Position::new(0, 0))
        );
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn test_commit_chain_of_slides() {
        let mut board = Board::from_rows(&[&[0, 2, 4, 8]]).unwrap();
        let registry = TileTypeRegistry::classic(2048);
        let plan = plan_move(&board, Direction::Left);

        let outcomes = commit_move(&mut board, &registry, &plan).unwrap();

        assert!(outcomes.is_empty());
        assert_eq!(board.to_rows(), vec![vec![2, 4, 8, 0]]);
    }

    #[test]
    fn test_commit_rejects_stale_plan() {
        let mut board = Board::from_rows(&[&[2, 2, 0, 0]]).unwrap();
        let registry = TileTypeRegistry::classic(2048);
        let plan = plan_move(&board, Direction::Left);

        board.place(4, Position::new(3, 0));
        let rows = board.to_rows();

        let err = commit_move(&mut board, &registry, &plan).unwrap_err();
        assert!(matches!(
            err,
            GameError::Transition(TransitionError::StalePlan { .. })
        ));
        assert_eq!(board.to_rows(), rows);
    }

    #[test]
    fn test_commit_missing_descriptor_leaves_board() {
        let mut board = Board::from_rows(&[&[16, 16]]).unwrap();
        let registry = TileTypeRegistry::classic(16);
        let plan = plan_move(&board, Direction::Right);

        let err = commit_move(&mut board, &registry, &plan).unwrap_err();
        assert!(matches!(
            err,
            GameError::Config(ConfigError::MissingTileType(32))
        ));
        assert_eq!(board.to_rows(), vec![vec![16, 16]]);
    }

    #[test]
    fn test_commit_rejects_merge_onto_occupied_cell() {
        let mut board = Board::from_rows(&[&[2, 2, 4, 0]]).unwrap();
        let registry = TileTypeRegistry::classic(2048);
        let mut plan = plan_move(&board, Direction::Left);
        // Point the merge at the cell the sliding 4 lands on.
        plan.merges[0].position = Position::new(1, 0);
        let revision = board.revision();

        let err = commit_move(&mut board, &registry, &plan).unwrap_err();

        assert!(matches!(
            err,
            GameError::Transition(TransitionError::PlanConflict(p)) if p == Position::new(1, 0)
        ));
        assert_eq!(board.to_rows(), vec![vec![2, 2, 4, 0]]);
        assert_eq!(board.len(), 3);
        assert_eq!(board.revision(), revision);
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn test_commit_rejects_merge_of_missing_tile() {
        let mut board = Board::from_rows(&[&[2, 2, 0]]).unwrap();
        let registry = TileTypeRegistry::classic(2048);
        let mut plan = plan_move(&board, Direction::Left);
        plan.merges[0].absorbed = TileId::new(99);

        let err = commit_move(&mut board, &registry, &plan).unwrap_err();

        assert!(matches!(
            err,
            GameError::Transition(TransitionError::PlanConflict(_))
        ));
        assert_eq!(board.to_rows(), vec![vec![2, 2, 0]]);
    }

    #[test]
    fn test_commit_noop_plan() {
        let mut board = Board::from_rows(&[&[2, 4]]).unwrap();
        let registry = TileTypeRegistry::classic(2048);
        let plan = plan_move(&board, Direction::Left);
        let revision = board.revision();

        let outcomes = commit_move(&mut board, &registry, &plan).unwrap();

        assert!(outcomes.is_empty());
        assert_eq!(board.to_rows(), vec![vec![2, 4]]);
        assert_eq!(board.revision(), revision);
    }
}
