//! Fixed lookup tables for the token economy.
//!
//! Resale values are a hand-tuned table, not a function of rank. Both tables
//! must stay exactly as listed.

use hatchery_types::Rarity;

/// Tokens spent per creature generation.
pub const GENERATION_COST: u64 = 10;

/// Tier given to stored records whose rarity label names no tier.
///
/// Its resale value is 1, the value of an unmapped rarity.
pub const UNMAPPED_RARITY: Rarity = Rarity::F;

/// Return the token credit for reselling a creature of the given rarity.
///
/// - S+: 25
/// - S: 15
/// - A: 10
/// - B: 5
/// - C: 4
/// - D: 3
/// - E: 2
/// - F: 1
pub const fn resale_value(rarity: Rarity) -> u64 {
    match rarity {
        Rarity::SPlus => 25,
        Rarity::S => 15,
        Rarity::A => 10,
        Rarity::B => 5,
        Rarity::C => 4,
        Rarity::D => 3,
        Rarity::E => 2,
        Rarity::F => 1,
    }
}

/// Sort key for a rarity tier, `F = 0` up to `S+ = 7`.
///
/// Only used as a comparator key; never persisted.
pub const fn rarity_rank(rarity: Rarity) -> u8 {
    match rarity {
        Rarity::F => 0,
        Rarity::E => 1,
        Rarity::D => 2,
        Rarity::C => 3,
        Rarity::B => 4,
        Rarity::A => 5,
        Rarity::S => 6,
        Rarity::SPlus => 7,
    }
}
