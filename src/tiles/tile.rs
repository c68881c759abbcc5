//! Tile instances - runtime tile state.
//!
//! A `Tile` is a movable value on the board. It records the cell it
//! occupies; the grid records the reverse link. Only `Board` mutates the
//! position so both sides stay consistent.

use serde::{Deserialize, Serialize};

use crate::core::{Position, TileId};

/// A live tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Identity, never reused within a level.
    pub id: TileId,

    /// Power of two, at least 2.
    pub value: u32,

    /// Cell currently occupied.
    pub(crate) position: Position,

    /// Tile this one is absorbed into during the current move.
    ///
    /// Cleared when a move starts; set at most once per move.
    pub(crate) merge_target: Option<TileId>,
}

impl Tile {
    /// Create a tile at `position`.
    #[must_use]
    pub fn new(id: TileId, value: u32, position: Position) -> Self {
        Self {
            id,
            value,
            position,
            merge_target: None,
        }
    }

    /// Cell currently occupied.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Merge target for the move in progress, if any.
    #[must_use]
    pub fn merge_target(&self) -> Option<TileId> {
        self.merge_target
    }

    /// Check if this tile is being absorbed in the current move.
    #[must_use]
    pub fn is_merging(&self) -> bool {
        self.merge_target.is_some()
    }

    /// Value of the tile a merge with this one produces.
    #[must_use]
    pub fn merged_value(&self) -> u32 {
        self.value.saturating_mul(2)
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]@{}", self.id, self.value, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile() {
        let tile = Tile::new(TileId::new(3), 4, Position::new(1, 2));

        assert_eq!(tile.position(), Position::new(1, 2));
        assert_eq!(tile.merge_target(), None);
        assert!(!tile.is_merging());
        assert_eq!(tile.merged_value(), 8);
    }

    #[test]
    fn test_display() {
        let tile = Tile::new(TileId::new(3), 16, Position::new(0, 1));
        assert_eq!(format!("{}", tile), "Tile(3)[16]@(0, 1)");
    }
}
