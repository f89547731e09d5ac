//! In-memory store for tests and throwaway sessions.
//!
//! Keeps an ordered log of successful writes so callers can assert exactly
//! which persistence calls a workflow made, and supports one-shot failure
//! injection for each write method.

use std::sync::atomic::{AtomicBool, Ordering};

use hatchery_types::{Creature, CreatureId};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::CreatureStore;

/// One successful write, as recorded in the [`MemoryStore`] log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    /// `add_creature` for this id.
    AddCreature(CreatureId),
    /// `update_creature` for this id.
    UpdateCreature(CreatureId),
    /// `set_balance` with this value.
    SetBalance(u64),
}

/// A [`CreatureStore`] held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    creatures: RwLock<Vec<Creature>>,
    balance: RwLock<u64>,
    writes: RwLock<Vec<StoreWrite>>,
    fail_add: AtomicBool,
    fail_update: AtomicBool,
    fail_set_balance: AtomicBool,
}

impl MemoryStore {
    /// An empty store with the given balance.
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance: RwLock::new(balance),
            ..Self::default()
        }
    }

    /// A store pre-populated with creatures and a balance. Seeding is not
    /// recorded in the write log.
    pub fn seeded(creatures: Vec<Creature>, balance: u64) -> Self {
        Self {
            creatures: RwLock::new(creatures),
            balance: RwLock::new(balance),
            ..Self::default()
        }
    }

    /// Make the next `add_creature` call fail.
    pub fn fail_next_add(&self) {
        self.fail_add.store(true, Ordering::SeqCst);
    }

    /// Make the next `update_creature` call fail.
    pub fn fail_next_update(&self) {
        self.fail_update.store(true, Ordering::SeqCst);
    }

    /// Make the next `set_balance` call fail.
    pub fn fail_next_set_balance(&self) {
        self.fail_set_balance.store(true, Ordering::SeqCst);
    }

    /// Every successful write so far, oldest first.
    pub async fn writes(&self) -> Vec<StoreWrite> {
        self.writes.read().await.clone()
    }

    /// Number of successful writes so far.
    pub async fn write_count(&self) -> usize {
        self.writes.read().await.len()
    }

    /// Look up a stored creature by id.
    pub async fn creature(&self, id: CreatureId) -> Option<Creature> {
        self.creatures
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    async fn record(&self, write: StoreWrite) {
        self.writes.write().await.push(write);
    }
}

/// Consume a one-shot failure flag.
fn take_failure(flag: &AtomicBool, operation: &str) -> Result<(), StoreError> {
    if flag.swap(false, Ordering::SeqCst) {
        return Err(StoreError::Injected(format!("{operation} failed")));
    }
    Ok(())
}

impl CreatureStore for MemoryStore {
    async fn get_all_creatures(&self) -> Result<Vec<Creature>, StoreError> {
        let mut all = self.creatures.read().await.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn add_creature(&self, creature: &Creature) -> Result<(), StoreError> {
        take_failure(&self.fail_add, "add_creature")?;
        self.creatures.write().await.push(creature.clone());
        self.record(StoreWrite::AddCreature(creature.id)).await;
        Ok(())
    }

    async fn update_creature(&self, creature: &Creature) -> Result<(), StoreError> {
        take_failure(&self.fail_update, "update_creature")?;
        {
            let mut creatures = self.creatures.write().await;
            let slot = creatures
                .iter_mut()
                .find(|c| c.id == creature.id)
                .ok_or(StoreError::NotFound(creature.id))?;
            *slot = creature.clone();
        }
        self.record(StoreWrite::UpdateCreature(creature.id)).await;
        Ok(())
    }

    async fn get_balance(&self) -> Result<u64, StoreError> {
        Ok(*self.balance.read().await)
    }

    async fn set_balance(&self, balance: u64) -> Result<(), StoreError> {
        take_failure(&self.fail_set_balance, "set_balance")?;
        *self.balance.write().await = balance;
        self.record(StoreWrite::SetBalance(balance)).await;
        Ok(())
    }
}
