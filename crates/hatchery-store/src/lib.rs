//! Local store for the Hatchery collection game.
//!
//! Persists the creature collection and the single token balance. The
//! controller depends only on the [`CreatureStore`] contract; this crate
//! ships two implementations.
//!
//! # Architecture
//!
//! ```text
//! Controller
//!     |
//!     +-- CreatureStore (trait)
//!         |-- SqliteStore   (embedded SQLite file, sqlx)
//!         +-- MemoryStore   (tests, write log + failure injection)
//! ```
//!
//! # Modules
//!
//! - [`store`] -- The [`CreatureStore`] contract
//! - [`sqlite`] -- `SQLite` pool, migrations, and row mapping
//! - [`memory`] -- In-memory implementation
//! - [`error`] -- Shared error types

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod store;

// Re-export primary types for convenience.
pub use error::StoreError;
pub use memory::{MemoryStore, StoreWrite};
pub use sqlite::{SqliteConfig, SqliteStore};
pub use store::CreatureStore;
