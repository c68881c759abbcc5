//! Tile system: descriptors, instances, and registry.
//!
//! ## Key Types
//!
//! - `TileType`: static display data for one value
//! - `TileTypeRegistry`: value → descriptor lookup
//! - `Tile`: runtime tile (id, value, occupied cell, merge target)

pub mod registry;
pub mod tile;
pub mod tile_type;

pub use registry::TileTypeRegistry;
pub use tile::Tile;
pub use tile_type::{is_tile_value, Color, TileType, MIN_TILE_VALUE};
