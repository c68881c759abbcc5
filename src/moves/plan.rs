//! Move plans - the resolved outcome of one directional input.
//!
//! A `MovePlan` is computed before anything is animated or committed. It
//! lists where every tile ends up and which pairs merge, so a presenter can
//! animate it and the game can commit it afterwards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Direction, Position, TileId};

/// Movement of one tile during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileMove {
    /// Tile being moved.
    pub tile: TileId,

    /// Cell before the move.
    pub from: Position,

    /// Cell the tile travels to.
    ///
    /// For a tile that is absorbed this is the survivor's cell; the tile
    /// slides onto it visually and is then destroyed.
    pub to: Position,

    /// Survivor this tile merges into, if any.
    pub merges_into: Option<TileId>,
}

impl TileMove {
    /// Check if the tile changes cell or merges.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.from != self.to || self.merges_into.is_some()
    }
}

/// Two equal tiles that combine when the move is committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergePair {
    /// Stationary tile the merge lands on.
    pub survivor: TileId,

    /// Moving tile consumed by the merge.
    pub absorbed: TileId,

    /// Survivor's final cell, where the merged tile appears.
    pub position: Position,

    /// Value of the merged tile (twice the survivor's value).
    pub value: u32,
}

/// Resolved result of a directional move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan {
    /// Direction the plan was resolved for.
    pub direction: Direction,

    /// Board revision the plan was resolved against.
    pub revision: u64,

    /// Every tile on the board, in resolution order.
    pub moves: Vec<TileMove>,

    /// Merges in the order they were discovered.
    pub merges: SmallVec<[MergePair; 4]>,
}

impl MovePlan {
    /// Check if the move changes nothing.
    ///
    /// A no-op plan is still a legal move; the game proceeds to spawning.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.merges.is_empty() && self.moves.iter().all(|m| m.from == m.to)
    }

    /// Number of tiles that change cell or merge.
    #[must_use]
    pub fn moving_count(&self) -> usize {
        self.moves.iter().filter(|m| m.is_moving()).count()
    }

    /// Movement record for a tile.
    #[must_use]
    pub fn move_of(&self, tile: TileId) -> Option<&TileMove> {
        self.moves.iter().find(|m| m.tile == tile)
    }

    /// Check if a tile is absorbed by this move.
    #[must_use]
    pub fn is_absorbed(&self, tile: TileId) -> bool {
        self.merges.iter().any(|m| m.absorbed == tile)
    }

    /// Check that no tile is a merge survivor or absorbed more than once,
    /// and that no tile is both.
    #[must_use]
    pub fn merges_are_exclusive(&self) -> bool {
        let mut seen: Vec<TileId> = Vec::with_capacity(self.merges.len() * 2);
        for merge in &self.merges {
            for id in [merge.survivor, merge.absorbed] {
                if seen.contains(&id) {
                    return false;
                }
                seen.push(id);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn tile_move(id: u32, from: (u32, u32), to: (u32, u32)) -> TileMove {
        TileMove {
            tile: TileId::new(id),
            from: Position::new(from.0, from.1),
            to: Position::new(to.0, to.1),
            merges_into: None,
        }
    }

    fn pair(survivor: u32, absorbed: u32) -> MergePair {
        MergePair {
            survivor: TileId::new(survivor),
            absorbed: TileId::new(absorbed),
            position: Position::new(0, 0),
            value: 4,
        }
    }

    #[test]
    fn test_noop_plan() {
        let plan = MovePlan {
            direction: Direction::Left,
            revision: 0,
            moves: vec![tile_move(0, (0, 0), (0, 0))],
            merges: SmallVec::new(),
        };

        assert!(plan.is_noop());
        assert_eq!(plan.moving_count(), 0);
    }

    #[test]
    fn test_moving_plan() {
        let plan = MovePlan {
            direction: Direction::Left,
            revision: 0,
            moves: vec![tile_move(0, (0, 0), (0, 0)), tile_move(1, (3, 0), (1, 0))],
            merges: SmallVec::new(),
        };

        assert!(!plan.is_noop());
        assert_eq!(plan.moving_count(), 1);
        assert_eq!(plan.move_of(TileId::new(1)).map(|m| m.to), Some(Position::new(1, 0)));
        assert!(plan.move_of(TileId::new(9)).is_none());
    }

    #[test]
    fn test_merge_exclusivity_check() {
        let mut plan = MovePlan {
            direction: Direction::Left,
            revision: 0,
            moves: Vec::new(),
            merges: smallvec![pair(0, 1), pair(2, 3)],
        };
        assert!(plan.merges_are_exclusive());
        assert!(plan.is_absorbed(TileId::new(3)));
        assert!(!plan.is_absorbed(TileId::new(2)));

        plan.merges.push(pair(0, 4));
        assert!(!plan.merges_are_exclusive());
    }
}
