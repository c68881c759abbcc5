//! Grid coordinates and move directions.
//!
//! ## Coordinate System
//!
//! - `x` grows to the right, `y` grows upward.
//! - `Direction::Up` therefore moves toward larger `y`.
//!
//! ```
//! use rust_2048::core::{Direction, Position};
//!
//! let pos = Position::new(1, 2);
//! assert_eq!(pos.offset(Direction::Left), Some(Position::new(0, 2)));
//! assert_eq!(pos.offset(Direction::Up), Some(Position::new(1, 3)));
//! assert_eq!(Position::new(0, 0).offset(Direction::Down), None);
//! ```

use serde::{Deserialize, Serialize};

/// Integer cell coordinate on the board.
///
/// Ordering is `x` first, then `y`, which matches the resolver's
/// processing order for leftward and downward moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column, 0 at the left edge.
    pub x: u32,
    /// Row, 0 at the bottom edge.
    pub y: u32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Step one cell in `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// Upper bounds are the grid's concern, see `Grid::neighbor`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.vector();
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four axis-aligned move directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward larger `y`.
    Up,
    /// Toward smaller `y`.
    Down,
    /// Toward smaller `x`.
    Left,
    /// Toward larger `x`.
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit vector `(dx, dy)` for this direction.
    #[must_use]
    pub const fn vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse a raw direction vector.
    ///
    /// Only the four unit vectors are accepted; anything else
    /// (diagonals, zero, longer vectors) returns `None`.
    ///
    /// ```
    /// use rust_2048::core::Direction;
    ///
    /// assert_eq!(Direction::from_vector(1, 0), Some(Direction::Right));
    /// assert_eq!(Direction::from_vector(1, 1), None);
    /// ```
    #[must_use]
    pub const fn from_vector(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, 1) => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Whether tiles must be resolved from the high end of the sort order.
    ///
    /// Tiles nearest the leading edge are resolved first, so moves toward
    /// larger coordinates walk the `(x, y)` ordering backwards.
    #[must_use]
    pub const fn resolves_in_reverse(self) -> bool {
        matches!(self, Direction::Right | Direction::Up)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            other => Err(format!("unknown direction '{}'", other)),
        }
    }
}
