//! Error types for the local store.
//!
//! All errors are propagated via [`StoreError`] which wraps the underlying
//! [`sqlx`] errors with context about which operation failed.

use hatchery_types::CreatureId;

/// Errors that can occur in the local store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A `SQLite` operation failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    /// A `SQLite` migration failed.
    #[error("SQLite migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An update referenced a creature that is not stored.
    #[error("Creature not found: {0}")]
    NotFound(CreatureId),

    /// A stored value could not be decoded.
    #[error("Corrupt stored data: {0}")]
    Corrupt(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A failure injected by [`MemoryStore`](crate::MemoryStore).
    #[error("Injected failure: {0}")]
    Injected(String),
}
