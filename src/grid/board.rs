//! Board: the grid plus the live tile arena.
//!
//! ## Ownership
//!
//! The board owns every tile in an `im::OrdMap` keyed by `TileId`. Tiles
//! store the position they occupy, the grid stores the occupant id per
//! cell. Every mutation goes through `Board` so the two directions stay in
//! step: moving a tile clears its old cell and fills the new one.
//!
//! Cloning is O(1) for the tile arena, which lets the resolver and tests
//! take cheap snapshots.
//!
//! ## Revision
//!
//! Each positional change bumps `revision`. Move plans record the revision
//! they were computed against so a plan cannot be committed to a board that
//! changed underneath it.

use im::OrdMap;

use super::cells::Grid;
use crate::core::{ConfigError, Direction, Position, TileId};
use crate::tiles::{is_tile_value, Tile};

/// Grid plus live tiles.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    tiles: OrdMap<TileId, Tile>,
    next_id: TileId,
    revision: u64,
}

impl Board {
    /// Create an empty board over `grid`.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            tiles: OrdMap::new(),
            next_id: TileId::new(0),
            revision: 0,
        }
    }

    /// Create an empty `width` x `height` board.
    pub fn with_size(width: u32, height: u32) -> Result<Self, ConfigError> {
        Ok(Self::new(Grid::build(width, height)?))
    }

    /// Build a board from rows of values, `0` meaning empty.
    ///
    /// The first row is the top of the board (highest `y`), so the literal
    /// reads the way the board is drawn. Tiles get ids in row-major order
    /// starting from the bottom row.
    ///
    /// ```
    /// use rust_2048::core::Position;
    /// use rust_2048::grid::Board;
    ///
    /// let board = Board::from_rows(&[
    ///     &[0, 4],
    ///     &[2, 0],
    /// ]).unwrap();
    ///
    /// assert_eq!(board.tile_at(Position::new(0, 0)).map(|t| t.value), Some(2));
    /// assert_eq!(board.tile_at(Position::new(1, 1)).map(|t| t.value), Some(4));
    /// ```
    pub fn from_rows(rows: &[&[u32]]) -> Result<Self, ConfigError> {
        let height = u32::try_from(rows.len()).unwrap_or(0);
        let width = rows.first().map_or(0, |row| u32::try_from(row.len()).unwrap_or(0));
        if rows.iter().any(|row| row.len() != width as usize) {
            return Err(ConfigError::InvalidDimensions { width, height });
        }

        let mut board = Self::with_size(width, height)?;
        for (row_index, row) in rows.iter().rev().enumerate() {
            for (column, &value) in row.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                if !is_tile_value(value) {
                    return Err(ConfigError::InvalidTileValue(value));
                }
                let position = Position::new(column as u32, row_index as u32);
                board.place(value, position);
            }
        }
        Ok(board)
    }

    /// Values as rows, top row first, `0` for empty cells.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        (0..self.height())
            .rev()
            .map(|y| {
                (0..self.width())
                    .map(|x| self.tile_at(Position::new(x, y)).map_or(0, |t| t.value))
                    .collect()
            })
            .collect()
    }

    /// Underlying grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Positional revision counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of live tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check if the board has no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Get a tile by id.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Tile occupying a position, if any.
    #[must_use]
    pub fn tile_at(&self, position: Position) -> Option<&Tile> {
        self.grid.occupant(position).and_then(|id| self.tiles.get(&id))
    }

    /// Live tiles in id order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Unoccupied positions, row by row from `y = 0`.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        self.grid.empty_positions()
    }

    /// Number of unoccupied cells.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.grid.free_count()
    }

    /// Check if any tile carries `value`.
    #[must_use]
    pub fn contains_value(&self, value: u32) -> bool {
        self.tiles.values().any(|t| t.value == value)
    }

    /// Largest tile value, or `None` on an empty board.
    #[must_use]
    pub fn max_value(&self) -> Option<u32> {
        self.tiles.values().map(|t| t.value).max()
    }

    /// Check if some move could change the board.
    ///
    /// True when a cell is free or two orthogonally adjacent tiles share a
    /// value.
    #[must_use]
    pub fn has_available_move(&self) -> bool {
        if self.free_count() > 0 {
            return true;
        }
        self.tiles.values().any(|tile| {
            [Direction::Right, Direction::Up].iter().any(|&direction| {
                self.grid
                    .neighbor(tile.position, direction)
                    .and_then(|next| self.tile_at(next))
                    .is_some_and(|other| other.value == tile.value)
            })
        })
    }

    /// Create a tile of `value` on a free cell.
    ///
    /// Returns `None` (and changes nothing) if the cell is off-grid or
    /// occupied.
    pub fn place(&mut self, value: u32, position: Position) -> Option<TileId> {
        if !self.grid.is_free(position) {
            return None;
        }
        let id = self.next_id;
        self.next_id = id.next();
        self.grid.set_occupant(position, Some(id));
        self.tiles.insert(id, Tile::new(id, value, position));
        self.revision += 1;
        Some(id)
    }

    /// Move a tile to a free cell, clearing the cell it leaves.
    ///
    /// Returns `false` (and changes nothing) if the tile is unknown or the
    /// destination is off-grid or held by another tile.
    pub fn relocate(&mut self, id: TileId, to: Position) -> bool {
        let Some(from) = self.tiles.get(&id).map(|t| t.position) else {
            return false;
        };
        if from == to {
            return true;
        }
        if !self.grid.is_free(to) {
            return false;
        }
        self.grid.set_occupant(from, None);
        self.grid.set_occupant(to, Some(id));
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.position = to;
        }
        self.revision += 1;
        true
    }

    /// Destroy a tile, freeing its cell.
    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        let tile = self.tiles.remove(&id)?;
        if self.grid.occupant(tile.position) == Some(id) {
            self.grid.set_occupant(tile.position, None);
        }
        self.revision += 1;
        Some(tile)
    }

    /// Clear a tile's cell without moving the tile.
    ///
    /// Leaves the board inconsistent until `attach` is called; only used
    /// while committing a move, where tiles swap cells as a batch.
    pub(crate) fn detach(&mut self, id: TileId) {
        if let Some(position) = self.tiles.get(&id).map(|t| t.position) {
            if self.grid.occupant(position) == Some(id) {
                self.grid.set_occupant(position, None);
            }
        }
    }

    /// Put a detached tile on a free cell.
    pub(crate) fn attach(&mut self, id: TileId, to: Position) -> bool {
        if !self.tiles.contains_key(&id) || !self.grid.is_free(to) {
            return false;
        }
        self.grid.set_occupant(to, Some(id));
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.position = to;
        }
        self.revision += 1;
        true
    }

    pub(crate) fn set_merge_target(&mut self, id: TileId, target: TileId) {
        if let Some(tile) = self.tiles.get_mut(&id) {
            debug_assert!(tile.merge_target.is_none(), "{} already merging", id);
            tile.merge_target = Some(target);
        }
    }

    pub(crate) fn clear_merge_targets(&mut self) {
        let merging: Vec<TileId> = self
            .tiles
            .values()
            .filter(|tile| tile.merge_target.is_some())
            .map(|tile| tile.id)
            .collect();
        for id in merging {
            if let Some(tile) = self.tiles.get_mut(&id) {
                tile.merge_target = None;
            }
        }
    }

    /// Verify the cell ↔ tile links and tile values.
    ///
    /// Holds at every quiescent point: each occupied cell names a live tile
    /// that records that cell, and each live tile is named by its cell.
    pub fn check_invariants(&self) -> Result<(), String> {
        for tile in self.tiles.values() {
            if !is_tile_value(tile.value) {
                return Err(format!("{} has illegal value", tile));
            }
            if self.grid.occupant(tile.position) != Some(tile.id) {
                return Err(format!("{} is not recorded in its cell", tile));
            }
        }

        let mut occupied = 0;
        for position in self.grid.positions() {
            let Some(id) = self.grid.occupant(position) else {
                continue;
            };
            occupied += 1;
            match self.tiles.get(&id) {
                Some(tile) if tile.position == position => {}
                Some(tile) => return Err(format!("cell {} names {} elsewhere", position, tile)),
                None => return Err(format!("cell {} names dead {}", position, id)),
            }
        }

        if occupied != self.tiles.len() {
            return Err(format!(
                "{} occupied cells for {} tiles",
                occupied,
                self.tiles.len()
            ));
        }
        Ok(())
    }
}
