//! Tile identification.
//!
//! Every tile created during a level gets a fresh `TileId`. Identities are
//! never reused: a merge destroys both inputs and creates a new tile, so
//! presenters can key their visual objects on the id.
//!
//! ```
//! use rust_2048::core::TileId;
//!
//! let first = TileId::new(0);
//! assert_eq!(first.next(), TileId::new(1));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a tile within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Create a tile ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for TileId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}
