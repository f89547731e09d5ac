//! Weighted rarity roll for new creatures.
//!
//! The roll happens locally so that every generated creature lands on one
//! of the eight tiers no matter what the text model would have picked.

use hatchery_types::Rarity;
use rand::Rng;

/// Relative weight of each tier, lowest first. Sums to 100.
pub const RARITY_WEIGHTS: [(Rarity, u32); 8] = [
    (Rarity::F, 30),
    (Rarity::E, 22),
    (Rarity::D, 16),
    (Rarity::C, 12),
    (Rarity::B, 9),
    (Rarity::A, 6),
    (Rarity::S, 4),
    (Rarity::SPlus, 1),
];

/// Sum of [`RARITY_WEIGHTS`].
const TOTAL_WEIGHT: u32 = 100;

/// Map a roll in `0..100` onto a tier by walking the cumulative weights.
///
/// Rolls at or past the total clamp to the highest tier.
pub fn rarity_for_roll(roll: u32) -> Rarity {
    let mut upper = 0u32;
    for (rarity, weight) in RARITY_WEIGHTS {
        upper = upper.saturating_add(weight);
        if roll < upper {
            return rarity;
        }
    }
    Rarity::SPlus
}

/// Roll a rarity tier from the given random source.
pub fn roll_rarity<R: Rng + ?Sized>(rng: &mut R) -> Rarity {
    rarity_for_roll(rng.random_range(0..TOTAL_WEIGHT))
}
