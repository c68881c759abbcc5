//! Spawn value distribution.

use crate::core::RandomSource;

/// Draws above this threshold spawn a 4 instead of a 2.
pub const FOUR_THRESHOLD: f32 = 0.8;

/// Draw the value of a newly spawned tile: 4 with probability 0.2, else 2.
///
/// ```
/// use rust_2048::core::FixedRandom;
/// use rust_2048::spawn::draw_value;
///
/// assert_eq!(draw_value(&mut FixedRandom::new(0.81)), 4);
/// assert_eq!(draw_value(&mut FixedRandom::new(0.8)), 2);
/// ```
pub fn draw_value<R: RandomSource>(rng: &mut R) -> u32 {
    if rng.next_value() > FOUR_THRESHOLD {
        4
    } else {
        2
    }
}
