//! Workflow tests for the controller.
//!
//! Every test drives a [`Controller`] over a [`MemoryStore`] and a scripted
//! fake generator, then checks the in-memory state, the store's write log,
//! and the notice shown to the user.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::panic
)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use hatchery_core::{AppError, ConfirmOutcome, Controller, NOTICE_TTL};
use hatchery_genai::{CreatureGenerator, GenerationError};
use hatchery_store::{CreatureStore, MemoryStore, StoreWrite};
use hatchery_types::{
    Creature, CreatureId, CreatureStatus, EvolutionText, ImagePayload, NoticeKind, Rarity,
    SortMode,
};
use tokio::sync::{Mutex, oneshot};

// ---------------------------------------------------------------------------
// Fake generator
// ---------------------------------------------------------------------------

/// Generator that replays scripted results.
///
/// Creatures must be scripted. Evolution calls succeed with derived content
/// unless a result was scripted. `hold` parks the next creature or
/// evolution-text call until the sender fires.
#[derive(Default)]
struct FakeGenerator {
    creatures: Mutex<VecDeque<Result<Creature, GenerationError>>>,
    texts: Mutex<VecDeque<Result<EvolutionText, GenerationError>>>,
    images: Mutex<VecDeque<Result<ImagePayload, GenerationError>>>,
    hold: Mutex<Option<oneshot::Receiver<()>>>,
    calls: AtomicUsize,
}

impl FakeGenerator {
    async fn script_creature(&self, result: Result<Creature, GenerationError>) {
        self.creatures.lock().await.push_back(result);
    }

    async fn script_text(&self, result: Result<EvolutionText, GenerationError>) {
        self.texts.lock().await.push_back(result);
    }

    async fn script_image(&self, result: Result<ImagePayload, GenerationError>) {
        self.images.lock().await.push_back(result);
    }

    async fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.hold.lock().await = Some(rx);
        tx
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Take any armed hold, count the call, then park on the hold.
    async fn enter_held(&self) {
        let held = self.hold.lock().await.take();
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(rx) = held {
            let _ = rx.await;
        }
    }
}

impl CreatureGenerator for FakeGenerator {
    async fn generate_creature(&self) -> Result<Creature, GenerationError> {
        self.enter_held().await;
        self.creatures
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Backend("nothing scripted".to_owned())))
    }

    async fn generate_evolution_text(
        &self,
        creature_name: &str,
        _rarity: Rarity,
    ) -> Result<EvolutionText, GenerationError> {
        self.enter_held().await;
        let scripted = self.texts.lock().await.pop_front();
        scripted.unwrap_or_else(|| {
            Ok(EvolutionText {
                name: format!("Mega {creature_name}"),
                description: "Bigger.".to_owned(),
                stats: "ATK 99".to_owned(),
            })
        })
    }

    async fn generate_evolution_image(
        &self,
        _creature_name: &str,
        _evolved_name: &str,
        _rarity: Rarity,
    ) -> Result<ImagePayload, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.images.lock().await.pop_front();
        scripted.unwrap_or_else(|| Ok(ImagePayload::png("RVZPTFZFRA==")))
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn creature(name: &str, rarity: Rarity, minute: u32) -> Creature {
    Creature {
        id: CreatureId::new(),
        name: name.to_owned(),
        rarity,
        status: CreatureStatus::Owned,
        description: format!("{name} description"),
        image: ImagePayload::png("QkFTRQ=="),
        created_at: Utc
            .with_ymd_and_hms(2026, 10, 1, 12, minute, 0)
            .single()
            .unwrap(),
        evolution: None,
    }
}

type TestController = Controller<MemoryStore, FakeGenerator>;

async fn loaded(creatures: Vec<Creature>, balance: u64) -> TestController {
    let controller = Controller::new(
        MemoryStore::seeded(creatures, balance),
        FakeGenerator::default(),
    );
    controller.load().await.unwrap();
    controller
}

async fn notice(controller: &TestController) -> (NoticeKind, String) {
    let shown = controller.view().await.notice.expect("a notice is shown");
    (shown.kind, shown.message)
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_mirrors_store_newest_first() {
    let older = creature("Older", Rarity::F, 1);
    let newer = creature("Newer", Rarity::B, 2);
    let controller = loaded(vec![older.clone(), newer.clone()], 42).await;

    let view = controller.view().await;
    assert_eq!(view.balance, 42);
    assert!(!view.loading);
    assert_eq!(controller.creatures().await, vec![newer, older]);
    assert!(view.notice.is_none());
    assert_eq!(controller.store().write_count().await, 0);
}

// ---------------------------------------------------------------------------
// Generate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generation_below_cost_touches_nothing() {
    let controller = loaded(Vec::new(), 9).await;

    let result = controller.generate().await;
    assert!(matches!(
        result,
        Err(AppError::InsufficientFunds { balance: 9, cost: 10 })
    ));
    assert_eq!(controller.store().write_count().await, 0);
    assert_eq!(controller.generator().calls(), 0);
    assert_eq!(controller.balance().await, 9);
    assert_eq!(notice(&controller).await.0, NoticeKind::Warning);
}

#[tokio::test]
async fn successful_generation_debits_and_prepends() {
    let existing = creature("Existing", Rarity::D, 1);
    let controller = loaded(vec![existing.clone()], 100).await;

    let mut fresh = creature("Sparkfin", Rarity::A, 30);
    fresh.status = CreatureStatus::Resold;
    controller.generator().script_creature(Ok(fresh.clone())).await;

    let hatched = controller.generate().await.unwrap();
    assert_eq!(hatched.status, CreatureStatus::Owned);
    assert_eq!(controller.balance().await, 90);

    let collection = controller.creatures().await;
    assert_eq!(collection.len(), 2);
    assert_eq!(collection[0].id, fresh.id);
    assert_eq!(collection[0].status, CreatureStatus::Owned);
    assert_eq!(collection[1], existing);

    assert_eq!(
        controller.store().writes().await,
        vec![StoreWrite::SetBalance(90), StoreWrite::AddCreature(fresh.id)]
    );
    assert_eq!(controller.store().get_balance().await.unwrap(), 90);

    let (kind, message) = notice(&controller).await;
    assert_eq!(kind, NoticeKind::Success);
    assert!(message.contains("Sparkfin"));
    assert!(message.contains('A'));
    assert!(!controller.view().await.generating);
}

#[tokio::test]
async fn failed_generation_refunds_tokens() {
    let existing = creature("Existing", Rarity::D, 1);
    let controller = loaded(vec![existing.clone()], 100).await;
    controller
        .generator()
        .script_creature(Err(GenerationError::Backend("provider down".to_owned())))
        .await;

    let result = controller.generate().await;
    assert!(matches!(result, Err(AppError::Generation(_))));

    assert_eq!(controller.balance().await, 100);
    assert_eq!(controller.store().get_balance().await.unwrap(), 100);
    assert_eq!(controller.creatures().await, vec![existing]);
    assert_eq!(
        controller.store().writes().await,
        vec![StoreWrite::SetBalance(90), StoreWrite::SetBalance(100)]
    );

    let (kind, message) = notice(&controller).await;
    assert_eq!(kind, NoticeKind::Error);
    assert!(message.contains("refunded"));
    assert!(message.contains("provider down"));
}

#[tokio::test]
async fn failed_persist_of_new_creature_refunds_tokens() {
    let controller = loaded(Vec::new(), 25).await;
    controller
        .generator()
        .script_creature(Ok(creature("Lost", Rarity::S, 5)))
        .await;
    controller.store().fail_next_add();

    let result = controller.generate().await;
    assert!(matches!(result, Err(AppError::Store(_))));
    assert_eq!(controller.balance().await, 25);
    assert_eq!(controller.store().get_balance().await.unwrap(), 25);
    assert!(controller.creatures().await.is_empty());
    assert!(notice(&controller).await.1.contains("refunded"));
}

#[tokio::test]
async fn failed_debit_write_skips_generation() {
    let controller = loaded(Vec::new(), 50).await;
    controller.store().fail_next_set_balance();

    let result = controller.generate().await;
    assert!(matches!(result, Err(AppError::Store(_))));
    assert_eq!(controller.balance().await, 50);
    assert_eq!(controller.generator().calls(), 0);
    assert_eq!(controller.store().write_count().await, 0);
    assert_eq!(notice(&controller).await.0, NoticeKind::Error);
}

#[tokio::test]
async fn generating_flag_covers_the_whole_workflow() {
    let controller = Arc::new(loaded(Vec::new(), 10).await);
    let release = controller.generator().hold_next().await;
    controller
        .generator()
        .script_creature(Ok(creature("Slowpoke", Rarity::E, 9)))
        .await;

    let running = Arc::clone(&controller);
    let task = tokio::spawn(async move { running.generate().await });
    while controller.generator().calls() == 0 {
        tokio::task::yield_now().await;
    }

    let view = controller.view().await;
    assert!(view.generating);
    assert!(!view.can_generate);
    assert_eq!(view.balance, 0);

    release.send(()).unwrap();
    task.await.unwrap().unwrap();
    let view = controller.view().await;
    assert!(!view.generating);
    assert!(!view.can_generate);
}

// ---------------------------------------------------------------------------
// Evolve
// ---------------------------------------------------------------------------

#[tokio::test]
async fn evolution_attaches_generated_content() {
    let source = creature("Pebblet", Rarity::C, 1);
    let controller = loaded(vec![source.clone()], 30).await;
    controller
        .generator()
        .script_text(Ok(EvolutionText {
            name: "Bouldron".to_owned(),
            description: "A walking hill.".to_owned(),
            stats: "DEF 95".to_owned(),
        }))
        .await;
    controller
        .generator()
        .script_image(Ok(ImagePayload::png("Qk9VTERSTw==")))
        .await;

    let evolved = controller.evolve(source.id).await.unwrap();
    let evolution = evolved.evolution.clone().unwrap();
    assert_eq!(evolution.name, "Bouldron");
    assert_eq!(evolution.description, "A walking hill.");
    assert_eq!(evolution.stats, "DEF 95");
    assert_eq!(evolution.image, ImagePayload::png("Qk9VTERSTw=="));

    assert_eq!(evolved.name, source.name);
    assert_eq!(evolved.image, source.image);
    assert_eq!(controller.creature(source.id).await, Some(evolved.clone()));
    assert_eq!(controller.store().creature(source.id).await, Some(evolved));
    assert_eq!(
        controller.store().writes().await,
        vec![StoreWrite::UpdateCreature(source.id)]
    );
    assert_eq!(controller.balance().await, 30);

    let (kind, message) = notice(&controller).await;
    assert_eq!(kind, NoticeKind::Success);
    assert!(message.contains("Pebblet"));
    assert!(message.contains("Bouldron"));
}

#[tokio::test]
async fn unparseable_evolution_text_leaves_creature_untouched() {
    let source = creature("Pebblet", Rarity::C, 1);
    let controller = loaded(vec![source.clone()], 30).await;
    controller
        .generator()
        .script_text(Err(GenerationError::MalformedText {
            raw: "no json here".to_owned(),
            reason: "expected value".to_owned(),
        }))
        .await;

    let result = controller.evolve(source.id).await;
    assert!(matches!(
        result,
        Err(AppError::Generation(GenerationError::MalformedText { .. }))
    ));
    assert_eq!(controller.creature(source.id).await, Some(source));
    assert_eq!(controller.store().write_count().await, 0);

    let (kind, message) = notice(&controller).await;
    assert_eq!(kind, NoticeKind::Error);
    assert!(message.contains("no json here"));
    assert!(controller.evolving().is_empty());
}

#[tokio::test]
async fn failed_evolution_image_attaches_nothing() {
    let source = creature("Pebblet", Rarity::C, 1);
    let controller = loaded(vec![source.clone()], 30).await;
    controller
        .generator()
        .script_image(Err(GenerationError::Malformed("no images".to_owned())))
        .await;

    assert!(controller.evolve(source.id).await.is_err());
    assert_eq!(controller.creature(source.id).await, Some(source));
    assert_eq!(controller.store().write_count().await, 0);
}

#[tokio::test]
async fn evolving_unknown_creature_is_not_found() {
    let controller = loaded(Vec::new(), 30).await;
    let missing = CreatureId::new();

    let result = controller.evolve(missing).await;
    assert!(matches!(result, Err(AppError::NotFound(id)) if id == missing));
    assert_eq!(controller.generator().calls(), 0);
    assert_eq!(notice(&controller).await.0, NoticeKind::Error);
}

#[tokio::test]
async fn evolutions_are_tracked_per_creature() {
    let first = creature("First", Rarity::B, 1);
    let second = creature("Second", Rarity::E, 2);
    let controller = Arc::new(loaded(vec![first.clone(), second.clone()], 0).await);
    let release = controller.generator().hold_next().await;

    let running = Arc::clone(&controller);
    let first_id = first.id;
    let held = tokio::spawn(async move { running.evolve(first_id).await });
    while controller.generator().calls() == 0 {
        tokio::task::yield_now().await;
    }
    assert!(controller.evolving().contains(&first.id));

    // Same creature again: rejected while the first run is parked.
    let duplicate = controller.evolve(first.id).await;
    assert!(matches!(duplicate, Err(AppError::AlreadyEvolving(id)) if id == first.id));

    // A different creature proceeds independently.
    let other = controller.evolve(second.id).await.unwrap();
    assert_eq!(other.evolution.map(|e| e.name).as_deref(), Some("Mega Second"));
    assert_eq!(controller.view().await.evolving, vec![first.id]);

    release.send(()).unwrap();
    let done = held.await.unwrap().unwrap();
    assert_eq!(done.evolution.map(|e| e.name).as_deref(), Some("Mega First"));
    assert!(controller.evolving().is_empty());
}

#[tokio::test]
async fn failed_evolution_persist_leaves_creature_untouched() {
    let source = creature("Pebblet", Rarity::C, 1);
    let controller = loaded(vec![source.clone()], 30).await;
    controller.store().fail_next_update();

    let result = controller.evolve(source.id).await;
    assert!(matches!(result, Err(AppError::Store(_))));
    assert_eq!(controller.creature(source.id).await, Some(source.clone()));
    assert_eq!(controller.store().creature(source.id).await, Some(source.clone()));
    assert_eq!(controller.store().write_count().await, 0);
    assert!(controller.evolving().is_empty());
    assert_eq!(notice(&controller).await.0, NoticeKind::Error);

    // The claim was released, so a retry goes through.
    let retried = controller.evolve(source.id).await.unwrap();
    assert!(retried.evolution.is_some());
}

#[tokio::test]
async fn resale_confirmed_during_evolution_stays_final() {
    let target = creature("Glimmer", Rarity::A, 1);
    let controller = Arc::new(loaded(vec![target.clone()], 0).await);
    let release = controller.generator().hold_next().await;

    let running = Arc::clone(&controller);
    let id = target.id;
    let evolving = tokio::spawn(async move { running.evolve(id).await });
    while controller.generator().calls() == 0 {
        tokio::task::yield_now().await;
    }

    controller.request_resell(target.id).await.unwrap();
    controller.confirm().await.unwrap();
    assert_eq!(controller.balance().await, 10);

    release.send(()).unwrap();
    let result = evolving.await.unwrap();
    assert!(matches!(result, Err(AppError::AlreadyResold(rejected)) if rejected == target.id));

    let shown = controller.creature(target.id).await.unwrap();
    assert_eq!(shown.status, CreatureStatus::Resold);
    assert!(shown.evolution.is_none());
    let stored = controller.store().creature(target.id).await.unwrap();
    assert_eq!(stored.status, CreatureStatus::Resold);
    assert!(stored.evolution.is_none());
    assert_eq!(
        controller.store().writes().await,
        vec![
            StoreWrite::UpdateCreature(target.id),
            StoreWrite::SetBalance(10)
        ]
    );
    assert!(controller.evolving().is_empty());

    // No second sale.
    assert!(matches!(
        controller.request_resell(target.id).await,
        Err(AppError::AlreadyResold(_))
    ));
    assert_eq!(controller.balance().await, 10);
}

#[tokio::test]
async fn resale_after_evolution_keeps_the_evolution() {
    let target = creature("Glimmer", Rarity::A, 1);
    let controller = loaded(vec![target.clone()], 0).await;

    controller.evolve(target.id).await.unwrap();
    controller.request_resell(target.id).await.unwrap();
    controller.confirm().await.unwrap();

    let stored = controller.store().creature(target.id).await.unwrap();
    assert_eq!(stored.status, CreatureStatus::Resold);
    assert_eq!(
        stored.evolution.map(|e| e.name).as_deref(),
        Some("Mega Glimmer")
    );
    assert_eq!(controller.creature(target.id).await.unwrap().status, CreatureStatus::Resold);
    assert!(controller.view().await.evolvable.is_empty());
}

// ---------------------------------------------------------------------------
// Resell
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resell_of_rarity_a_credits_ten() {
    let target = creature("Glimmer", Rarity::A, 1);
    let controller = loaded(vec![target.clone()], 40).await;

    let dialog = controller.request_resell(target.id).await.unwrap();
    assert!(dialog.body.contains("10 tokens"));
    assert!(dialog.body.contains("Glimmer"));
    assert!(!dialog.busy);
    assert_eq!(controller.view().await.confirmation, Some(dialog));
    assert_eq!(controller.store().write_count().await, 0);

    let outcome = controller.confirm().await.unwrap();
    let ConfirmOutcome::Resold(resale) = outcome;
    assert_eq!(resale.credit, 10);
    assert_eq!(resale.balance, 50);
    assert_eq!(resale.creature.status, CreatureStatus::Resold);

    assert_eq!(controller.balance().await, 50);
    assert_eq!(
        controller.creature(target.id).await.map(|c| c.status),
        Some(CreatureStatus::Resold)
    );
    assert_eq!(
        controller.store().writes().await,
        vec![
            StoreWrite::UpdateCreature(target.id),
            StoreWrite::SetBalance(50)
        ]
    );

    let view = controller.view().await;
    assert_eq!(view.confirmation, None);
    assert_eq!(view.notice.map(|n| n.kind), Some(NoticeKind::Success));
}

#[tokio::test]
async fn resold_creature_cannot_be_resold_again() {
    let mut sold = creature("Gone", Rarity::S, 1);
    sold.status = CreatureStatus::Resold;
    let controller = loaded(vec![sold.clone()], 0).await;

    let result = controller.request_resell(sold.id).await;
    assert!(matches!(result, Err(AppError::AlreadyResold(id)) if id == sold.id));
    assert_eq!(controller.view().await.confirmation, None);
}

#[tokio::test]
async fn confirm_rechecks_the_current_record() {
    let target = creature("Twice", Rarity::B, 1);
    let controller = loaded(vec![target.clone()], 0).await;

    controller.request_resell(target.id).await.unwrap();
    controller.confirm().await.unwrap();
    assert_eq!(controller.balance().await, 5);

    // A second dialog cannot be opened for the now-resold creature.
    assert!(controller.request_resell(target.id).await.is_err());
    assert_eq!(controller.balance().await, 5);
}

#[tokio::test]
async fn only_one_confirmation_at_a_time() {
    let a = creature("A", Rarity::F, 1);
    let b = creature("B", Rarity::F, 2);
    let controller = loaded(vec![a.clone(), b.clone()], 0).await;

    controller.request_resell(a.id).await.unwrap();
    let second = controller.request_resell(b.id).await;
    assert!(matches!(second, Err(AppError::ConfirmationOpen)));

    let dialog = controller.view().await.confirmation.unwrap();
    assert_eq!(dialog.title, "Resell A?");
}

#[tokio::test]
async fn cancel_performs_no_mutation() {
    let target = creature("Keeper", Rarity::SPlus, 1);
    let controller = loaded(vec![target.clone()], 7).await;

    controller.request_resell(target.id).await.unwrap();
    controller.cancel().await.unwrap();

    assert_eq!(controller.view().await.confirmation, None);
    assert_eq!(controller.creature(target.id).await, Some(target));
    assert_eq!(controller.balance().await, 7);
    assert_eq!(controller.store().write_count().await, 0);
    assert!(matches!(
        controller.confirm().await,
        Err(AppError::NoPendingConfirmation)
    ));
}

#[tokio::test]
async fn failed_status_write_keeps_creature_owned() {
    let target = creature("Sturdy", Rarity::B, 1);
    let controller = loaded(vec![target.clone()], 12).await;
    controller.store().fail_next_update();

    controller.request_resell(target.id).await.unwrap();
    let result = controller.confirm().await;
    assert!(matches!(result, Err(AppError::Store(_))));

    assert_eq!(controller.creature(target.id).await, Some(target.clone()));
    assert_eq!(
        controller.store().creature(target.id).await.map(|c| c.status),
        Some(CreatureStatus::Owned)
    );
    assert_eq!(controller.balance().await, 12);
    assert_eq!(controller.store().get_balance().await.unwrap(), 12);
    assert_eq!(controller.store().write_count().await, 0);

    let view = controller.view().await;
    assert_eq!(view.confirmation, None);
    assert_eq!(view.notice.map(|n| n.kind), Some(NoticeKind::Error));

    // The gate is closed again, so the sale can be retried.
    assert!(controller.request_resell(target.id).await.is_ok());
}

#[tokio::test]
async fn failed_credit_write_leaves_status_written() {
    let target = creature("Halfway", Rarity::S, 1);
    let controller = loaded(vec![target.clone()], 3).await;
    controller.store().fail_next_set_balance();

    controller.request_resell(target.id).await.unwrap();
    let result = controller.confirm().await;
    assert!(matches!(result, Err(AppError::Store(_))));

    // The status write landed; the credit did not.
    assert_eq!(
        controller.store().creature(target.id).await.map(|c| c.status),
        Some(CreatureStatus::Resold)
    );
    assert_eq!(controller.store().get_balance().await.unwrap(), 3);
    assert_eq!(controller.balance().await, 3);

    let view = controller.view().await;
    assert_eq!(view.confirmation, None);
    assert_eq!(view.notice.map(|n| n.kind), Some(NoticeKind::Error));
}

// ---------------------------------------------------------------------------
// Display and notices
// ---------------------------------------------------------------------------

#[tokio::test]
async fn view_applies_sort_mode_without_reordering_collection() {
    let c = creature("Cinder", Rarity::C, 3);
    let s = creature("Aurora", Rarity::SPlus, 2);
    let f = creature("Fizz", Rarity::F, 1);
    let controller = loaded(vec![f, s, c], 20).await;

    let names = |view: &hatchery_types::ViewState| {
        view.creatures
            .iter()
            .map(|c| c.name.clone())
            .collect::<Vec<_>>()
    };

    let view = controller.view().await;
    assert_eq!(view.sort_mode, SortMode::DateDesc);
    assert_eq!(names(&view), ["Cinder", "Aurora", "Fizz"]);
    assert!(view.show_sort_selector);

    controller.set_sort_mode(SortMode::RarityDesc).await;
    assert_eq!(names(&controller.view().await), ["Aurora", "Cinder", "Fizz"]);

    controller.set_sort_mode(SortMode::NameAsc).await;
    assert_eq!(names(&controller.view().await), ["Aurora", "Cinder", "Fizz"]);
    assert_eq!(controller.sort_mode().await, SortMode::NameAsc);

    let stored: Vec<String> = controller
        .creatures()
        .await
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(stored, ["Cinder", "Aurora", "Fizz"]);
}

#[tokio::test]
async fn view_flags_follow_state() {
    let solo = creature("Solo", Rarity::D, 1);
    let controller = loaded(vec![solo.clone()], 10).await;
    let view = controller.view().await;
    assert_eq!(view.evolvable, vec![solo.id]);
    assert!(view.can_generate);
    assert!(!view.show_sort_selector);
    assert_eq!(view.generation_cost, 10);

    let poor = loaded(Vec::new(), 9).await;
    assert!(!poor.view().await.can_generate);
}

#[tokio::test(start_paused = true)]
async fn notice_clears_itself_after_ttl() {
    let controller = loaded(Vec::new(), 0).await;
    let _ = controller.generate().await;
    assert!(controller.view().await.notice.is_some());

    tokio::time::sleep(NOTICE_TTL + Duration::from_millis(100)).await;
    assert!(controller.view().await.notice.is_none());
}

#[tokio::test]
async fn dismiss_clears_notice() {
    let controller = loaded(Vec::new(), 0).await;
    let _ = controller.generate().await;
    controller.dismiss_notice().await;
    assert!(controller.view().await.notice.is_none());
}
