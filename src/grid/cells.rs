//! Fixed cell grid with O(1) occupant lookup.
//!
//! The grid is the cell side of the cell ↔ tile link: a dense row-major
//! vector of `Option<TileId>`. Cells exist for the whole level; only their
//! occupants change.

use crate::core::{ConfigError, Direction, Position, TileId};

/// Rectangular grid of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Option<TileId>>,
}

impl Grid {
    /// Build an empty `width` x `height` grid.
    ///
    /// ```
    /// use rust_2048::grid::Grid;
    ///
    /// let grid = Grid::build(4, 3).unwrap();
    /// assert_eq!(grid.cell_count(), 12);
    /// assert!(Grid::build(0, 3).is_err());
    /// ```
    pub fn build(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        let count = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            cells: vec![None; count],
        })
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if a position lies on the grid.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.y as usize * self.width as usize + position.x as usize)
        } else {
            None
        }
    }

    /// Tile occupying a cell, if any. Off-grid positions have no occupant.
    #[must_use]
    pub fn occupant(&self, position: Position) -> Option<TileId> {
        self.index(position).and_then(|i| self.cells[i])
    }

    /// Check if a cell is on the grid and unoccupied.
    #[must_use]
    pub fn is_free(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| self.cells[i].is_none())
    }

    /// Adjacent cell in `direction`, or `None` at the edge.
    #[must_use]
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        position.offset(direction).filter(|next| self.contains(*next))
    }

    /// Every position, row by row from `y = 0`.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Unoccupied positions, row by row from `y = 0`.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        self.positions().filter(|p| self.is_free(*p)).collect()
    }

    /// Number of unoccupied cells.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Set a cell's occupant, returning the previous one.
    ///
    /// Off-grid positions are ignored and return `None`.
    pub(crate) fn set_occupant(&mut self, position: Position, occupant: Option<TileId>) -> Option<TileId> {
        match self.index(position) {
            Some(i) => std::mem::replace(&mut self.cells[i], occupant),
            None => None,
        }
    }
}
