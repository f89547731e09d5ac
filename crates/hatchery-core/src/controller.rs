//! The application state controller.
//!
//! Owns the in-memory mirrors of the collection and balance plus the UI
//! flags, and runs the four user workflows against a [`CreatureStore`] and
//! a [`CreatureGenerator`].
//!
//! # Concurrency
//!
//! Every workflow takes `&self`, so several can be in flight on one
//! controller. The mirror locks are only held for in-memory bookkeeping,
//! never across a store or generator call. Evolutions are tracked per
//! creature and run independently.
//!
//! Record commits (attaching an evolution, marking a creature resold) take
//! the commit lock for their lookup, store writes and mirror update, and
//! always work on a fresh copy of the record. Generator calls never run
//! under it, so a resale confirmed mid-evolution is never overwritten.
//!
//! Overlapping generations or resales read the balance before suspending
//! and write it back afterwards, so concurrent balance updates can be
//! lost. This is a known gap: fixing it needs a
//! single-writer queue or an atomic balance primitive in the store.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use hatchery_economy::{EconomyError, GENERATION_COST, TokenDebit, credit, resale_value};
use hatchery_genai::CreatureGenerator;
use hatchery_store::CreatureStore;
use hatchery_types::{
    ConfirmationView, Creature, CreatureId, CreatureStatus, Evolution, NoticeKind, SortMode,
    ViewState,
};
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{error, info, warn};

use crate::confirm::{ConfirmAction, Confirmation, Gate};
use crate::error::AppError;
use crate::notice::Notifier;
use crate::sort::sorted_view;

/// Result of a completed resale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resale {
    /// The creature, now resold.
    pub creature: Creature,
    /// Tokens credited.
    pub credit: u64,
    /// Balance after the credit.
    pub balance: u64,
}

/// What an accepted confirmation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// A creature was resold.
    Resold(Resale),
}

/// Orchestrates the collection game.
pub struct Controller<S, G> {
    store: S,
    generator: G,
    collection: RwLock<Vec<Creature>>,
    balance: RwLock<u64>,
    sort_mode: RwLock<SortMode>,
    gate: RwLock<Gate>,
    commits: AsyncMutex<()>,
    notifier: Notifier,
    loading: AtomicBool,
    generations: AtomicUsize,
    evolving: Mutex<BTreeSet<CreatureId>>,
}

impl<S: CreatureStore, G: CreatureGenerator> Controller<S, G> {
    /// Create a controller with an empty collection and zero balance.
    ///
    /// Call [`load`](Self::load) to read the persisted state.
    pub fn new(store: S, generator: G) -> Self {
        Self {
            store,
            generator,
            collection: RwLock::new(Vec::new()),
            balance: RwLock::new(0),
            sort_mode: RwLock::new(SortMode::default()),
            gate: RwLock::new(Gate::Closed),
            commits: AsyncMutex::new(()),
            notifier: Notifier::new(),
            loading: AtomicBool::new(false),
            generations: AtomicUsize::new(0),
            evolving: Mutex::new(BTreeSet::new()),
        }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The underlying generation client.
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    /// Read the collection and balance from the store into memory.
    ///
    /// On failure the in-memory state is left as it was and an error
    /// notice is shown.
    pub async fn load(&self) -> Result<(), AppError> {
        self.loading.store(true, Ordering::Release);
        let outcome = match self.read_persisted().await {
            Ok((creatures, balance)) => {
                info!(creatures = creatures.len(), balance, "collection loaded");
                *self.collection.write().await = creatures;
                *self.balance.write().await = balance;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to load collection");
                self.notify(NoticeKind::Error, format!("Could not load your collection: {err}"))
                    .await;
                Err(err)
            }
        };
        self.loading.store(false, Ordering::Release);
        outcome
    }

    async fn read_persisted(&self) -> Result<(Vec<Creature>, u64), AppError> {
        let creatures = self.store.get_all_creatures().await?;
        let balance = self.store.get_balance().await?;
        Ok((creatures, balance))
    }

    // -----------------------------------------------------------------------
    // Generate
    // -----------------------------------------------------------------------

    /// Spend [`GENERATION_COST`] tokens on a new creature.
    ///
    /// The debit is applied and persisted before the generation call. If
    /// generating or storing the creature fails, the balance is restored
    /// in memory and in the store and the notice says so.
    pub async fn generate(&self) -> Result<Creature, AppError> {
        let balance = *self.balance.read().await;
        let debit = match TokenDebit::reserve(balance, GENERATION_COST) {
            Ok(debit) => debit,
            Err(EconomyError::InsufficientFunds { balance, cost }) => {
                warn!(balance, cost, "generation refused: insufficient tokens");
                self.notify(
                    NoticeKind::Warning,
                    format!("Not enough tokens: a new creature costs {cost}, you have {balance}."),
                )
                .await;
                return Err(AppError::InsufficientFunds { balance, cost });
            }
            Err(other) => return Err(self.fail("Generation failed", other.into()).await),
        };

        let _in_flight = InFlight::enter(&self.generations);

        *self.balance.write().await = debit.balance_after();
        if let Err(err) = self.store.set_balance(debit.balance_after()).await {
            *self.balance.write().await = debit.undo_target();
            return Err(self.fail("Could not spend tokens", err.into()).await);
        }

        match self.hatch().await {
            Ok(creature) => {
                info!(
                    creature_id = %creature.id,
                    rarity = %creature.rarity,
                    balance = debit.balance_after(),
                    "creature hatched"
                );
                self.notify(
                    NoticeKind::Success,
                    format!("You hatched {} ({})!", creature.name, creature.rarity),
                )
                .await;
                Ok(creature)
            }
            Err(err) => {
                self.refund(debit).await;
                warn!(error = %err, cost = debit.cost(), "generation failed, tokens refunded");
                self.notify(
                    NoticeKind::Error,
                    format!(
                        "Generation failed: {err}. Your {} tokens were refunded.",
                        debit.cost()
                    ),
                )
                .await;
                Err(err)
            }
        }
    }

    async fn hatch(&self) -> Result<Creature, AppError> {
        let mut creature = self.generator.generate_creature().await?;
        creature.status = CreatureStatus::Owned;
        self.store.add_creature(&creature).await?;
        self.collection.write().await.insert(0, creature.clone());
        Ok(creature)
    }

    /// Put the pre-debit balance back, in memory and in the store.
    async fn refund(&self, debit: TokenDebit) {
        let restored = debit.undo_target();
        *self.balance.write().await = restored;
        if let Err(err) = self.store.set_balance(restored).await {
            error!(error = %err, balance = restored, "refund could not be persisted");
        }
    }

    /// Whether any generation is in flight.
    pub fn is_generating(&self) -> bool {
        self.generations.load(Ordering::Acquire) > 0
    }

    // -----------------------------------------------------------------------
    // Evolve
    // -----------------------------------------------------------------------

    /// Generate and attach an evolution to a creature. Costs nothing.
    ///
    /// The record is only changed once both the text and the image are in
    /// hand, and the evolution is attached to the record as it is then. If
    /// the creature was resold in the meantime the evolution is discarded
    /// with [`AppError::AlreadyResold`]. Evolutions of different creatures
    /// run independently; a second request for the same creature while one
    /// is in flight is rejected.
    pub async fn evolve(&self, id: CreatureId) -> Result<Creature, AppError> {
        let Some(source) = self.creature(id).await else {
            return Err(self.fail("Evolution failed", AppError::NotFound(id)).await);
        };
        let Some(_claim) = EvolvingClaim::claim(&self.evolving, id) else {
            warn!(creature_id = %id, "evolution already in flight");
            self.notify(
                NoticeKind::Warning,
                format!("{} is already evolving.", source.name),
            )
            .await;
            return Err(AppError::AlreadyEvolving(id));
        };

        let source_name = source.name.clone();
        match self.attach_evolution(source).await {
            Ok(evolved) => {
                let evolved_name = evolved
                    .evolution
                    .as_ref()
                    .map_or_else(String::new, |e| e.name.clone());
                info!(creature_id = %id, evolved = %evolved_name, "creature evolved");
                self.notify(
                    NoticeKind::Success,
                    format!("{source_name} evolved into {evolved_name}!"),
                )
                .await;
                Ok(evolved)
            }
            Err(err) => {
                Err(self.fail(&format!("Evolution of {source_name} failed"), err).await)
            }
        }
    }

    async fn attach_evolution(&self, source: Creature) -> Result<Creature, AppError> {
        let text = self
            .generator
            .generate_evolution_text(&source.name, source.rarity)
            .await?;
        let image = self
            .generator
            .generate_evolution_image(&source.name, &text.name, source.rarity)
            .await?;

        let _commit = self.commits.lock().await;
        let mut creature = self
            .creature(source.id)
            .await
            .ok_or(AppError::NotFound(source.id))?;
        if creature.status != source.status {
            return Err(AppError::AlreadyResold(source.id));
        }

        creature.evolution = Some(Evolution::assemble(text, image));
        self.store.update_creature(&creature).await?;
        replace_by_id(&mut *self.collection.write().await, creature.clone());
        Ok(creature)
    }

    /// Creatures with an evolution in flight, in id order.
    pub fn evolving(&self) -> Vec<CreatureId> {
        lock(&self.evolving).iter().copied().collect()
    }

    // -----------------------------------------------------------------------
    // Resell
    // -----------------------------------------------------------------------

    /// Open the resell confirmation for an owned creature.
    ///
    /// The dialog quotes the resale value for the creature's rarity.
    /// Nothing is mutated until [`confirm`](Self::confirm).
    pub async fn request_resell(&self, id: CreatureId) -> Result<ConfirmationView, AppError> {
        let Some(creature) = self.creature(id).await else {
            return Err(self.fail("Resell failed", AppError::NotFound(id)).await);
        };
        if !creature.is_owned() {
            return Err(self.fail("Resell failed", AppError::AlreadyResold(id)).await);
        }

        let value = resale_value(creature.rarity);
        let confirmation = Confirmation {
            title: format!("Resell {}?", creature.name),
            body: format!(
                "{} ({}) will leave your collection for {value} tokens. This cannot be undone.",
                creature.name, creature.rarity
            ),
            action: ConfirmAction::Resell(id),
        };

        let view = ConfirmationView {
            title: confirmation.title.clone(),
            body: confirmation.body.clone(),
            busy: false,
        };
        let opened = self.gate.write().await.open(confirmation);
        match opened {
            Ok(()) => Ok(view),
            Err(err) => Err(self.fail("Resell failed", err).await),
        }
    }

    /// Run the pending confirmation's action.
    ///
    /// The gate is busy while the action runs and is closed afterwards,
    /// whether or not the action succeeded.
    pub async fn confirm(&self) -> Result<ConfirmOutcome, AppError> {
        let begun = self.gate.write().await.begin();
        let action = match begun {
            Ok(action) => action,
            Err(err) => return Err(self.fail("Nothing to confirm", err).await),
        };

        let outcome = match action {
            ConfirmAction::Resell(id) => self.resell(id).await.map(ConfirmOutcome::Resold),
        };
        self.gate.write().await.settle();
        outcome
    }

    /// Close the pending confirmation without acting on it.
    pub async fn cancel(&self) -> Result<(), AppError> {
        self.gate.write().await.cancel()
    }

    /// The status write and the balance write are separate store calls.
    /// If the second fails the creature stays resold without the credit.
    async fn resell(&self, id: CreatureId) -> Result<Resale, AppError> {
        match self.commit_resale(id).await {
            Ok(resale) => {
                info!(
                    creature_id = %id,
                    credit = resale.credit,
                    balance = resale.balance,
                    "creature resold"
                );
                self.notify(
                    NoticeKind::Success,
                    format!(
                        "Sold {} for {} tokens.",
                        resale.creature.name, resale.credit
                    ),
                )
                .await;
                Ok(resale)
            }
            Err(err) => Err(self.fail("Resell failed", err).await),
        }
    }

    async fn commit_resale(&self, id: CreatureId) -> Result<Resale, AppError> {
        let _commit = self.commits.lock().await;
        let mut creature = self.creature(id).await.ok_or(AppError::NotFound(id))?;
        if !creature.is_owned() {
            return Err(AppError::AlreadyResold(id));
        }

        creature.status = CreatureStatus::Resold;
        self.store.update_creature(&creature).await?;

        let amount = resale_value(creature.rarity);
        let current = *self.balance.read().await;
        let balance = credit(current, amount)?;
        self.store.set_balance(balance).await?;

        {
            let mut collection = self.collection.write().await;
            let mut shown_balance = self.balance.write().await;
            replace_by_id(&mut collection, creature.clone());
            *shown_balance = balance;
        }

        Ok(Resale {
            creature,
            credit: amount,
            balance,
        })
    }

    // -----------------------------------------------------------------------
    // Display
    // -----------------------------------------------------------------------

    /// Change the display ordering.
    pub async fn set_sort_mode(&self, mode: SortMode) {
        *self.sort_mode.write().await = mode;
    }

    /// Current display ordering.
    pub async fn sort_mode(&self) -> SortMode {
        *self.sort_mode.read().await
    }

    /// Clear the current notice.
    pub async fn dismiss_notice(&self) {
        self.notifier.dismiss().await;
    }

    /// Look up a creature in the in-memory collection.
    pub async fn creature(&self, id: CreatureId) -> Option<Creature> {
        self.collection
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// The in-memory balance.
    pub async fn balance(&self) -> u64 {
        *self.balance.read().await
    }

    /// The collection in storage order (newest generated first).
    pub async fn creatures(&self) -> Vec<Creature> {
        self.collection.read().await.clone()
    }

    /// Everything the page renders.
    pub async fn view(&self) -> ViewState {
        let sort_mode = *self.sort_mode.read().await;
        let balance = *self.balance.read().await;
        let (creatures, total) = {
            let collection = self.collection.read().await;
            let sorted: Vec<Creature> = sorted_view(&collection, sort_mode)
                .into_iter()
                .cloned()
                .collect();
            (sorted, collection.len())
        };
        let evolvable = creatures
            .iter()
            .filter(|c| c.can_evolve())
            .map(|c| c.id)
            .collect();
        let generating = self.is_generating();
        let loading = self.loading.load(Ordering::Acquire);

        ViewState {
            balance,
            generation_cost: GENERATION_COST,
            generating,
            loading,
            can_generate: !generating && !loading && balance >= GENERATION_COST,
            sort_mode,
            show_sort_selector: total > 1,
            creatures,
            evolvable,
            evolving: self.evolving(),
            notice: self.notifier.current().await,
            confirmation: self.gate.read().await.view(),
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn notify(&self, kind: NoticeKind, message: String) {
        self.notifier.notify(kind, message).await;
    }

    /// Show `err` as an error notice prefixed by `what`, then hand it back.
    async fn fail(&self, what: &str, err: AppError) -> AppError {
        warn!(error = %err, "{what}");
        self.notify(NoticeKind::Error, format!("{what}: {err}")).await;
        err
    }
}

fn replace_by_id(collection: &mut [Creature], creature: Creature) {
    if let Some(slot) = collection.iter_mut().find(|c| c.id == creature.id) {
        *slot = creature;
    }
}

fn lock(set: &Mutex<BTreeSet<CreatureId>>) -> MutexGuard<'_, BTreeSet<CreatureId>> {
    set.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Counts a generation as in flight until dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Marks a creature as evolving until dropped.
struct EvolvingClaim<'a> {
    busy: &'a Mutex<BTreeSet<CreatureId>>,
    id: CreatureId,
}

impl<'a> EvolvingClaim<'a> {
    fn claim(busy: &'a Mutex<BTreeSet<CreatureId>>, id: CreatureId) -> Option<Self> {
        if lock(busy).insert(id) {
            Some(Self { busy, id })
        } else {
            None
        }
    }
}

impl Drop for EvolvingClaim<'_> {
    fn drop(&mut self) {
        lock(self.busy).remove(&self.id);
    }
}
