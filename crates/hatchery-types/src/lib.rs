//! Shared type definitions for the Hatchery collection game.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace. Types flow downstream to `TypeScript` via `ts-rs` for the
//! browser page.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers
//! - [`enums`] -- Rarity tiers, statuses, sort modes, notice kinds
//! - [`structs`] -- Creature, evolution, image and notice records
//! - [`view`] -- Projections rendered by the presentation layer

pub mod enums;
pub mod ids;
pub mod structs;
pub mod view;

// Re-export all public types at crate root for convenience.
pub use enums::{CreatureStatus, NoticeKind, ParseLabelError, Rarity, SortMode};
pub use ids::CreatureId;
pub use structs::{Creature, Evolution, EvolutionText, ImagePayload, Notice};
pub use view::{ConfirmationView, ViewState};
