//! The local store contract.
//!
//! The controller only ever talks to the store through [`CreatureStore`].
//! Every method is a full read or a full-record write; there are no partial
//! updates and no transactions spanning calls.

use core::future::Future;

use hatchery_types::Creature;

use crate::error::StoreError;

/// Persistence for the creature collection and the token balance.
///
/// Futures are `Send` so controller workflows can run on a multi-threaded
/// runtime and inside Axum handlers.
pub trait CreatureStore: Send + Sync + 'static {
    /// Every stored creature, newest first.
    fn get_all_creatures(&self) -> impl Future<Output = Result<Vec<Creature>, StoreError>> + Send;

    /// Insert a new creature record.
    fn add_creature(&self, creature: &Creature)
    -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Replace a stored creature by identity.
    ///
    /// Returns [`StoreError::NotFound`] if no record has that identity.
    fn update_creature(
        &self,
        creature: &Creature,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// The persisted token balance.
    fn get_balance(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Overwrite the persisted token balance.
    fn set_balance(&self, balance: u64) -> impl Future<Output = Result<(), StoreError>> + Send;
}
