//! Run orchestration.
//!
//! [`RunService`] wires the pure engine to the injected collaborators:
//! it enforces attempt gating before sessions exist, persists every
//! mutation, guards reward application with per-character locks, and
//! feeds the scheduler the completion timestamps it needs. All
//! dependencies arrive as explicit parameters — nothing here touches a
//! process-wide singleton.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use venture_core::{
    AppliedRewards, BalanceTables, Character, EncounterDefinition, Env, EngineConfig, PcgRng,
    RaidAttackResult, RaidBoss, RunMachine, RunMode, RunSession, RunStatus, SessionId, StartParams,
    StepResult, apply_hp_losses, apply_party, apply_rewards,
};

use crate::clock;
use crate::error::{GatingError, Result, RuntimeError};
use crate::events::{RewardEvent, reward_events};
use crate::ports::{CharacterSnapshot, ContentSource, ProfileStore, Scheduler};
use crate::repository::SessionRepository;

/// Weekly boss roster, rotated by ISO week number.
const RAID_BOSSES: &[&str] = &[
    "Maw of the Deep",
    "Cinder Colossus",
    "The Hollow King",
    "Grove-Tyrant Vel",
];

/// What a successful claim did.
#[derive(Clone, Debug)]
pub struct ClaimOutcome {
    /// Per-member application summaries, party order.
    pub applied: Vec<AppliedRewards>,
    /// Downstream notifications for quest/achievement/bond systems.
    pub events: Vec<RewardEvent>,
}

/// Orchestrator for run lifecycles against injected collaborators.
pub struct RunService<P, S, C, R> {
    config: EngineConfig,
    tables: BalanceTables,
    profile: P,
    scheduler: S,
    content: C,
    repo: R,
    rng: PcgRng,
    /// One lock per character wallet; applications are single-writer.
    wallet_locks: Mutex<HashMap<u32, Arc<tokio::sync::Mutex<()>>>>,
}

impl<P, S, C, R> RunService<P, S, C, R>
where
    P: ProfileStore,
    S: Scheduler,
    C: ContentSource,
    R: SessionRepository,
{
    pub fn new(profile: P, scheduler: S, content: C, repo: R) -> Self {
        Self {
            config: EngineConfig::default(),
            tables: BalanceTables::default(),
            profile,
            scheduler,
            content,
            repo,
            rng: PcgRng,
            wallet_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Swap in remotely delivered balance tuning.
    pub fn with_tables(mut self, tables: BalanceTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    fn env(&self) -> Env<'_, PcgRng, BalanceTables> {
        Env::new(&self.rng, &self.tables)
    }

    /// Fetch and normalize content for a mode, falling back to the
    /// built-in catalog when the source is silent or empty.
    async fn encounter_set(&self, mode: RunMode, tier: u32) -> (Vec<EncounterDefinition>, u32) {
        if let Some(record) = self.content.fetch_encounter_set(mode, tier).await {
            let set = venture_content::adapter::to_encounter_set(&record);
            if !set.encounters.is_empty() {
                return (set.encounters, set.duration_secs);
            }
            tracing::warn!(%mode, tier, "content source returned an empty set; using fallback");
        }

        let steps = match mode {
            RunMode::Dungeon => venture_content::dungeon_floor(tier),
            RunMode::Arena => venture_content::arena_waves(10, tier),
            RunMode::Expedition => venture_content::expedition_stages(tier),
        };
        (steps, self.config.default_run_duration_secs)
    }

    async fn commit(
        &self,
        mode: RunMode,
        tier: u32,
        party: &[Character],
        cooperative: bool,
        now: i64,
    ) -> Result<RunSession> {
        let (steps, duration_secs) = self.encounter_set(mode, tier).await;
        let members: Vec<_> = party.iter().map(Character::to_party_member).collect();

        let session = RunMachine::start(
            StartParams {
                id: SessionId(rand::random()),
                mode,
                tier,
                seed: rand::random(),
                party: &members,
                cooperative,
                steps,
                started_at: now,
                duration_secs,
            },
            self.env(),
        )?;

        self.repo.save(&session)?;

        self.scheduler
            .schedule_notification(
                "Your party has returned",
                &format!("The {mode} run is ready to resolve."),
                now + i64::from(duration_secs),
            )
            .await;

        tracing::info!(
            session = %session.id,
            %mode,
            tier,
            steps = session.steps.len(),
            "run committed"
        );

        Ok(session)
    }

    // ===== mode entry points (gating happens here, before any session) =====

    /// Start a dungeon run. No attempt cost; the party risks its HP.
    pub async fn start_dungeon(
        &self,
        character: &Character,
        tier: u32,
        now: i64,
    ) -> Result<RunSession> {
        if character.hp == 0 {
            return Err(GatingError::Unconscious.into());
        }
        self.commit(RunMode::Dungeon, tier, std::slice::from_ref(character), false, now)
            .await
    }

    /// Start the daily arena run, consuming today's free ticket.
    pub async fn start_arena(
        &self,
        character: &mut Character,
        bracket: u32,
        now: i64,
    ) -> Result<RunSession> {
        if character.hp == 0 {
            return Err(GatingError::Unconscious.into());
        }
        let today = clock::day_number(now);
        if !character.counters.arena_available(today) {
            return Err(GatingError::ArenaTicketUsed.into());
        }

        let session = self
            .commit(RunMode::Arena, bracket, std::slice::from_ref(character), false, now)
            .await?;
        character.counters.note_arena_entry(today);
        Ok(session)
    }

    /// Launch an expedition, consuming one key from the initiating member.
    ///
    /// Parties of two or more run cooperatively and earn bond experience.
    pub async fn start_expedition(
        &self,
        party: &mut [Character],
        depth: u32,
        now: i64,
    ) -> Result<RunSession> {
        if party.iter().any(|c| c.hp == 0) {
            return Err(GatingError::Unconscious.into());
        }
        let Some(initiator) = party.first_mut() else {
            return Err(venture_core::StartError::EmptyParty.into());
        };
        if !initiator.counters.consume_expedition_key() {
            return Err(GatingError::NoExpeditionKey.into());
        }

        let cooperative = party.len() >= 2;
        self.commit(RunMode::Expedition, depth, party, cooperative, now)
            .await
    }

    // ===== in-flight transitions =====

    /// Resolve the next dungeon room once its timer share has lapsed.
    pub fn advance_dungeon(
        &self,
        session: &mut RunSession,
        party: &[Character],
        approach_index: Option<usize>,
        now: i64,
    ) -> Result<StepResult> {
        let members: Vec<_> = party.iter().map(Character::to_party_member).collect();
        let result = RunMachine::new(session)
            .advance(&members, approach_index, now, self.env())?
            .clone();
        self.repo.save(session)?;

        tracing::debug!(
            session = %session.id,
            step = result.step_index,
            success = result.success,
            "room resolved"
        );
        Ok(result)
    }

    /// Flip a pre-rolled run to its terminal status once its timer lapses.
    pub fn finalize(&self, session: &mut RunSession, now: i64) -> Result<RunStatus> {
        let status = RunMachine::new(session).finalize(now)?;
        self.repo.save(session)?;
        tracing::info!(session = %session.id, ?status, "run finalized");
        Ok(status)
    }

    /// Abandon an in-progress run. Rewards are forfeited.
    pub fn abandon(&self, session: &mut RunSession, now: i64) -> Result<()> {
        RunMachine::new(session).abandon(now)?;
        self.repo.save(session)?;
        tracing::info!(session = %session.id, "run abandoned");
        Ok(())
    }

    /// Reload a session from storage.
    ///
    /// Fails closed: integrity or invariant violations in the stored
    /// record surface as errors and the caller treats the run as
    /// abandoned. No randomness is introduced on resume.
    pub fn resume(&self, id: SessionId) -> Result<RunSession> {
        self.repo
            .load(id)?
            .ok_or(RuntimeError::SessionNotFound(id))
    }

    // ===== claims =====

    /// Apply a resolved run's rewards to the party, exactly once.
    ///
    /// Per-character wallet locks (acquired in id order) serialize this
    /// against any concurrent claim for the same characters, so a
    /// timer-driven auto-resolve racing a manual tap applies the bundle
    /// once. The second call observes the claimed flag and returns
    /// `Ok(None)`.
    pub async fn claim(
        &self,
        session: &mut RunSession,
        party: &mut [Character],
        now: i64,
    ) -> Result<Option<ClaimOutcome>> {
        let _guards = self.lock_wallets(party).await;

        let Some(bundle) = session.claim()? else {
            self.repo.save(session)?;
            return Ok(None);
        };

        let params = self.tables.level;
        let applied = if party.len() == 1 {
            vec![apply_rewards(&bundle, &mut party[0], &params)]
        } else {
            apply_party(&bundle, party, &params)
        };

        let total_hp_loss: u32 = session.results.iter().map(|r| r.hp_loss).sum();
        apply_hp_losses(total_hp_loss, party);

        if session.status == RunStatus::Completed {
            let today = clock::day_number(now);
            for member in party.iter_mut() {
                member.counters.note_completion(today);
            }
        }

        let events = reward_events(session, &bundle);
        self.repo.save(session)?;

        for member in party.iter() {
            self.profile
                .push_character_snapshot(CharacterSnapshot {
                    character: member.clone(),
                    taken_at: now,
                })
                .await;
        }

        tracing::info!(
            session = %session.id,
            exp = bundle.exp,
            gold = bundle.gold,
            items = bundle.items.len(),
            "rewards claimed"
        );

        Ok(Some(ClaimOutcome { applied, events }))
    }

    /// Acquire wallet locks for every party member, in id order.
    async fn lock_wallets(
        &self,
        party: &[Character],
    ) -> Vec<tokio::sync::OwnedMutexGuard<()>> {
        let mut ids: Vec<u32> = party.iter().map(|c| c.id.0).collect();
        ids.sort_unstable();
        ids.dedup();

        let mut guards = Vec::with_capacity(ids.len());
        for id in ids {
            let lock = {
                let mut locks = self.wallet_locks.lock().expect("wallet lock map poisoned");
                Arc::clone(locks.entry(id).or_default())
            };
            guards.push(lock.lock_owned().await);
        }
        guards
    }

    // ===== weekly raid boss =====

    /// Spawn the boss for the week containing `now`.
    pub fn spawn_weekly_boss(&self, now: i64, difficulty: i32, max_hp: u64) -> RaidBoss {
        let week = clock::raid_week(now);
        let name = RAID_BOSSES[week.week as usize % RAID_BOSSES.len()];
        let boss = RaidBoss::spawn(name, week, difficulty, max_hp, rand::random());
        tracing::info!(boss = name, week = week.week, "weekly raid boss spawned");
        boss
    }

    /// Resolve one attack against the shared weekly pool.
    ///
    /// Gated on the boss still belonging to the current week, not being
    /// defeated, and the attacker's daily attack cap.
    pub fn raid_attack(
        &self,
        boss: &mut RaidBoss,
        character: &mut Character,
        now: i64,
    ) -> Result<RaidAttackResult> {
        if !boss.is_current(clock::raid_week(now)) {
            return Err(GatingError::RaidWeekOver.into());
        }
        if boss.is_defeated() {
            return Err(GatingError::RaidBossDefeated.into());
        }
        if character.hp == 0 {
            return Err(GatingError::Unconscious.into());
        }
        let today = clock::day_number(now);
        let cap = self.config.raid_daily_attack_cap;
        if character.counters.raid_attacks_remaining(today, cap) == 0 {
            return Err(GatingError::RaidCapReached { cap }.into());
        }

        let member = character.to_party_member();
        let result = boss.attack(character.id, std::slice::from_ref(&member), self.env());

        character.counters.note_raid_attack(today);
        character.take_damage(result.hp_loss);
        character.revive_to_floor();

        tracing::info!(
            attacker = %character.id,
            damage = result.damage,
            boss_hp = result.boss_hp_after,
            "raid attack resolved"
        );
        Ok(result)
    }
}
