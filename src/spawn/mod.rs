//! Spawning: random tile placement and round evaluation.
//!
//! The `Spawner` owns the game's random source. Both the free-cell shuffle
//! and the value draws come from it, so a seeded `GameRng` replays the
//! same game and a `FixedRandom` scripts it exactly.

mod spawner;
mod values;

pub use spawner::{SpawnOutcome, Spawner, FIRST_ROUND_AMOUNT, ROUND_AMOUNT};
pub use values::{draw_value, FOUR_THRESHOLD};
