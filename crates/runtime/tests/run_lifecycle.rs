//! End-to-end run lifecycle tests against null collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use venture_core::{Character, CharacterId, ClassKind, RunStatus, StatBlock};
use venture_runtime::ports::null::{NullContentSource, NullProfileStore, NullScheduler};
use venture_runtime::{
    GatingError, InMemorySessionRepository, RunService, Scheduler, RuntimeError, session_view,
};

/// Scheduler stub that records requested fire timestamps.
#[derive(Clone, Default)]
struct RecordingScheduler {
    fire_times: Arc<Mutex<Vec<i64>>>,
}

#[async_trait]
impl Scheduler for RecordingScheduler {
    async fn schedule_notification(&self, _title: &str, _body: &str, fire_at: i64) {
        self.fire_times.lock().unwrap().push(fire_at);
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn hero(id: u32) -> Character {
    let mut character = Character::new(CharacterId(id), "Asha", ClassKind::Warrior);
    character.level = 12;
    character.max_hp = 170;
    character.hp = 170;
    character.base_stats = StatBlock::uniform(22);
    character
}

const NOW: i64 = 1_754_000_000;

#[tokio::test]
async fn arena_lifecycle_start_resume_finalize_claim() {
    init_tracing();
    let scheduler = RecordingScheduler::default();
    let service = RunService::new(
        NullProfileStore,
        scheduler.clone(),
        NullContentSource,
        InMemorySessionRepository::new(),
    );
    let mut champion = hero(1);

    let session = service.start_arena(&mut champion, 1, NOW).await.unwrap();

    // Pre-rolled: every outcome fixed at commit time.
    assert_eq!(session.results.len() as u32, session.current_step);
    assert!(!session.results.is_empty());
    assert_eq!(session.status, RunStatus::InProgress);

    // The completion notification targets exactly start + duration.
    let fire_times = scheduler.fire_times.lock().unwrap().clone();
    assert_eq!(fire_times, vec![NOW + i64::from(session.duration_secs)]);

    // One free attempt per day.
    let err = service.start_arena(&mut champion, 1, NOW + 60).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Gating(GatingError::ArenaTicketUsed)
    ));

    // Closing and reopening the screen shows the same pre-rolled results.
    let resumed = service.resume(session.id).unwrap();
    assert_eq!(resumed, session);
    let horizon = NOW + i64::from(session.duration_secs) * 2;
    assert_eq!(
        resumed.revealed_results(horizon),
        session.revealed_results(horizon)
    );

    // Finalize waits for the timer, then flips to the decided status.
    let mut active = resumed;
    assert!(service.finalize(&mut active, NOW + 5).is_err());
    let finalize_deadline = NOW + i64::from(active.duration_secs);
    let status = service
        .finalize(&mut active, finalize_deadline)
        .unwrap();
    assert!(status.is_terminal());

    // First claim applies; second is a no-op.
    let gold_before = champion.gold;
    let outcome = service
        .claim(&mut active, std::slice::from_mut(&mut champion), NOW + 700)
        .await
        .unwrap()
        .expect("first claim applies");
    assert_eq!(outcome.applied[0].gold, active.totals.gold);
    assert_eq!(champion.gold, gold_before + active.totals.gold);

    let gold_after_first = champion.gold;
    let second = service
        .claim(&mut active, std::slice::from_mut(&mut champion), NOW + 800)
        .await
        .unwrap();
    assert!(second.is_none());
    assert_eq!(champion.gold, gold_after_first);

    // Next day, the ticket is back.
    assert!(service
        .start_arena(&mut champion, 1, NOW + 86_400)
        .await
        .is_ok());
}

#[tokio::test]
async fn dungeon_rooms_resolve_live_on_the_timer() {
    let service = RunService::new(
        NullProfileStore,
        NullScheduler,
        NullContentSource,
        InMemorySessionRepository::new(),
    );
    let delver = hero(2);

    let mut session = service.start_dungeon(&delver, 1, NOW).await.unwrap();
    assert!(session.results.is_empty(), "live runs resolve nothing at commit");

    let step = i64::from(session.step_duration_secs());
    let party = vec![delver.clone()];

    // Too early.
    let err = service
        .advance_dungeon(&mut session, &party, None, NOW + step - 1)
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Advance(_)));

    // On time, with an approach choice.
    let result = service
        .advance_dungeon(&mut session, &party, Some(0), NOW + step)
        .unwrap();
    assert_eq!(result.step_index, 0);
    assert_eq!(session.results.len(), 1);

    // Persistence kept pace with the transition.
    let stored = service.resume(session.id).unwrap();
    assert_eq!(stored.results.len(), 1);
    assert_eq!(stored.results[0], result);
}

#[tokio::test]
async fn expeditions_gate_on_keys_and_run_cooperatively() {
    let service = RunService::new(
        NullProfileStore,
        NullScheduler,
        NullContentSource,
        InMemorySessionRepository::new(),
    );
    let mut party = vec![hero(3), hero(4)];

    let err = service
        .start_expedition(&mut party, 1, NOW)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Gating(GatingError::NoExpeditionKey)
    ));

    party[0].counters.expedition_keys = 1;
    let session = service.start_expedition(&mut party, 1, NOW).await.unwrap();

    assert!(session.cooperative);
    assert_eq!(party[0].counters.expedition_keys, 0);
    assert_eq!(session.party.len(), 2);

    // The key is spent; a second launch needs another one.
    let err = service
        .start_expedition(&mut party, 1, NOW + 10)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Gating(GatingError::NoExpeditionKey)
    ));
}

#[tokio::test]
async fn abandoning_forfeits_rewards() {
    let service = RunService::new(
        NullProfileStore,
        NullScheduler,
        NullContentSource,
        InMemorySessionRepository::new(),
    );
    let delver = hero(5);

    let mut session = service.start_dungeon(&delver, 1, NOW).await.unwrap();
    service.abandon(&mut session, NOW + 30).unwrap();
    assert_eq!(session.status, RunStatus::Abandoned);

    let mut fled = delver;
    let outcome = service
        .claim(&mut session, std::slice::from_mut(&mut fled), NOW + 60)
        .await
        .unwrap();
    assert!(outcome.is_none());
    assert_eq!(fled.gold, 0);
}

#[tokio::test]
async fn session_views_are_plain_serializable_data() {
    let service = RunService::new(
        NullProfileStore,
        NullScheduler,
        NullContentSource,
        InMemorySessionRepository::new(),
    );
    let mut champion = hero(6);

    let session = service.start_arena(&mut champion, 2, NOW).await.unwrap();
    let midpoint = NOW + i64::from(session.duration_secs) / 2;
    let view = session_view(&session, midpoint);

    assert!((view.progress - 0.5).abs() < 0.01);
    assert_eq!(view.step_count, 10);
    assert!(view.revealed.len() <= session.results.len());

    // The view round-trips through JSON for the binding layer.
    let json = serde_json::to_string(&view).unwrap();
    let back: venture_runtime::SessionView = serde_json::from_str(&json).unwrap();
    assert_eq!(back, view);
}
