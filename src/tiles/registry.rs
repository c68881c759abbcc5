//! Tile type registry for descriptor lookup.
//!
//! The `TileTypeRegistry` stores one descriptor per tile value and
//! provides constant-time lookup. Every value a tile is ever given must
//! resolve here; a miss is a configuration error.

use rustc_hash::FxHashMap;

use super::tile_type::{is_tile_value, TileType, MIN_TILE_VALUE};
use crate::core::ConfigError;

/// Registry of tile type descriptors keyed by value.
///
/// ## Example
///
/// ```
/// use rust_2048::tiles::{Color, TileType, TileTypeRegistry};
///
/// let mut registry = TileTypeRegistry::new();
/// registry.register(TileType::new(2, Color::hex(0xeee4da))).unwrap();
///
/// assert_eq!(registry.get(2).unwrap().name, "2");
/// assert!(registry.require(4).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TileTypeRegistry {
    types: FxHashMap<u32, TileType>,
}

impl TileTypeRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the classic palette up to `max_value`.
    #[must_use]
    pub fn classic(max_value: u32) -> Self {
        let mut registry = Self::new();
        for tile_type in TileType::classic_palette(max_value) {
            registry.types.insert(tile_type.value, tile_type);
        }
        registry
    }

    /// Register a descriptor.
    ///
    /// Rejects values that are not tile values and values already present.
    pub fn register(&mut self, tile_type: TileType) -> Result<(), ConfigError> {
        if !is_tile_value(tile_type.value) {
            return Err(ConfigError::InvalidTileValue(tile_type.value));
        }
        if self.types.contains_key(&tile_type.value) {
            return Err(ConfigError::DuplicateTileType(tile_type.value));
        }
        self.types.insert(tile_type.value, tile_type);
        Ok(())
    }

    /// Get the descriptor for a value.
    #[must_use]
    pub fn get(&self, value: u32) -> Option<&TileType> {
        self.types.get(&value)
    }

    /// Get the descriptor for a value, or a `MissingTileType` error.
    pub fn require(&self, value: u32) -> Result<&TileType, ConfigError> {
        self.types
            .get(&value)
            .ok_or(ConfigError::MissingTileType(value))
    }

    /// Check that every power of two from 2 through `max_value` is present.
    pub fn require_up_to(&self, max_value: u32) -> Result<(), ConfigError> {
        let mut value = MIN_TILE_VALUE;
        while value <= max_value {
            self.require(value)?;
            match value.checked_mul(2) {
                Some(next) => value = next,
                None => break,
            }
        }
        Ok(())
    }

    /// Check if a value has a descriptor.
    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        self.types.contains_key(&value)
    }

    /// Get the number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All descriptors in ascending value order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&TileType> {
        let mut types: Vec<_> = self.types.values().collect();
        types.sort_by_key(|t| t.value);
        types
    }
}
