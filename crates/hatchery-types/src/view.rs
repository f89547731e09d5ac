//! Read-only projections handed to the presentation layer.
//!
//! The page renders these as-is; it never reads controller internals.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::SortMode;
use crate::ids::CreatureId;
use crate::structs::{Creature, Notice};

/// The resell (or other) confirmation dialog as the page should draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ConfirmationView {
    /// Dialog title.
    pub title: String,
    /// Dialog body text.
    pub body: String,
    /// True while the confirmed action is running; disables the confirm button.
    pub busy: bool,
}

/// Everything the page needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ViewState {
    /// Current token balance.
    pub balance: u64,
    /// Cost of one generation.
    pub generation_cost: u64,
    /// A generation workflow is in flight.
    pub generating: bool,
    /// The initial load from the store is in flight.
    pub loading: bool,
    /// Whether the generate button is enabled.
    pub can_generate: bool,
    /// Selected ordering.
    pub sort_mode: SortMode,
    /// Whether the sort selector is shown (more than one creature).
    pub show_sort_selector: bool,
    /// The collection in display order.
    pub creatures: Vec<Creature>,
    /// Creatures the evolve control is offered for: owned and not yet evolved.
    pub evolvable: Vec<CreatureId>,
    /// Creatures with an evolution in flight; their evolve control is disabled.
    pub evolving: Vec<CreatureId>,
    /// The current notification, if any.
    pub notice: Option<Notice>,
    /// The open confirmation dialog, if any.
    pub confirmation: Option<ConfirmationView>,
}
