//! Display ordering of the collection.

use core::cmp::Reverse;

use hatchery_economy::rarity_rank;
use hatchery_types::{Creature, SortMode};

/// Order the collection for display.
///
/// Returns references into `creatures` in the requested order; the slice
/// itself is untouched. Ties keep their collection order.
pub fn sorted_view(creatures: &[Creature], mode: SortMode) -> Vec<&Creature> {
    let mut view: Vec<&Creature> = creatures.iter().collect();
    match mode {
        SortMode::DateDesc => view.sort_by_key(|c| Reverse(c.created_at)),
        SortMode::DateAsc => view.sort_by_key(|c| c.created_at),
        SortMode::RarityAsc => view.sort_by_key(|c| rarity_rank(c.rarity)),
        SortMode::RarityDesc => view.sort_by_key(|c| Reverse(rarity_rank(c.rarity))),
        SortMode::NameAsc => view.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str())),
        SortMode::NameDesc => view.sort_by(|a, b| b.name.as_str().cmp(a.name.as_str())),
    }
    view
}
