//! Run state machine.
//!
//! [`RunMachine`] is the authoritative reducer for [`RunSession`]. All
//! state mutation flows through it: committing a run, advancing live
//! steps, finalizing pre-rolled runs, and abandoning. Reads (timers,
//! revealed results) live on the session itself and never mutate.

use crate::config::EngineConfig;
use crate::env::{Env, RngOracle, TablesOracle, compute_seed};
use crate::resolve::{apply_damage, resolve_success, success_chance};
use crate::reward::{
    CTX_SUCCESS, RewardBundle, StepContext, StepResult, compute_step_reward,
};
use crate::state::{CharacterId, SessionId};
use crate::stats::{
    PartyMember, StatType, compute_party_power, compute_raw_party_power,
};

use super::error::{AdvanceError, StartError};
use super::{RECORD_VERSION, ResolutionStrategy, RunMode, RunSession, RunStatus, timer};

/// Everything needed to commit a new run.
#[derive(Clone, Debug)]
pub struct StartParams<'a> {
    pub id: SessionId,
    pub mode: RunMode,
    pub tier: u32,
    /// RNG seed for the whole run; fixed here, at commit time.
    pub seed: u64,
    pub party: &'a [PartyMember],
    pub cooperative: bool,
    pub steps: Vec<crate::encounter::EncounterDefinition>,
    /// Unix seconds at commit.
    pub started_at: i64,
    pub duration_secs: u32,
}

/// Reducer over one [`RunSession`].
///
/// Serialize transitions per session: no two concurrent advance calls on
/// the same session. Independent sessions are independent.
pub struct RunMachine<'a> {
    session: &'a mut RunSession,
}

impl<'a> RunMachine<'a> {
    pub fn new(session: &'a mut RunSession) -> Self {
        Self { session }
    }

    /// Commit a new run.
    ///
    /// Attempt caps, currency costs, and key consumption are preconditions
    /// the caller enforces against character state before calling this.
    ///
    /// Pre-rolled modes (arena, expedition) resolve every step here, at
    /// commit time: the timer that follows is pacing only, and closing the
    /// screen can never produce a fresh roll.
    pub fn start<R, T>(
        params: StartParams<'_>,
        env: Env<'_, R, T>,
    ) -> Result<RunSession, StartError>
    where
        R: RngOracle + ?Sized,
        T: TablesOracle + ?Sized,
    {
        if params.party.is_empty() {
            return Err(StartError::EmptyParty);
        }
        if params.party.len() > EngineConfig::MAX_PARTY_SIZE {
            return Err(StartError::PartyTooLarge {
                found: params.party.len(),
                max: EngineConfig::MAX_PARTY_SIZE,
            });
        }
        if params.steps.is_empty() {
            return Err(StartError::NoSteps);
        }
        if params.steps.len() > EngineConfig::MAX_STEPS {
            return Err(StartError::TooManySteps {
                found: params.steps.len(),
                max: EngineConfig::MAX_STEPS,
            });
        }
        if !params.party.iter().any(PartyMember::is_conscious) {
            return Err(StartError::PartyDefeated);
        }
        if params.duration_secs == 0 {
            return Err(StartError::ZeroDuration);
        }

        let hp_pool: u32 = params.party.iter().map(|m| m.hp).sum();
        let max_hp_pool: u32 = params.party.iter().map(|m| m.max_hp).sum();
        let party_ids: Vec<CharacterId> = params.party.iter().map(|m| m.id).collect();

        let mut session = RunSession {
            version: RECORD_VERSION,
            id: params.id,
            mode: params.mode,
            party: party_ids,
            cooperative: params.cooperative,
            tier: params.tier.max(1),
            seed: params.seed,
            steps: params.steps,
            current_step: 0,
            hp_pool,
            max_hp_pool,
            results: Vec::new(),
            totals: RewardBundle::new(),
            status: RunStatus::InProgress,
            started_at: params.started_at,
            duration_secs: params.duration_secs,
            completed_at: None,
            rewards_claimed: false,
        };

        if session.mode.strategy() == ResolutionStrategy::PreRolled {
            Self::pre_roll(&mut session, params.party, env);
        }

        Ok(session)
    }

    /// Resolve every step eagerly at commit time.
    ///
    /// Stops early if the HP pool empties; the remaining steps stay
    /// unresolved forever (the run is destined to fail at that step).
    fn pre_roll<R, T>(session: &mut RunSession, party: &[PartyMember], env: Env<'_, R, T>)
    where
        R: RngOracle + ?Sized,
        T: TablesOracle + ?Sized,
    {
        for index in 0..session.steps.len() {
            let result = Self::resolve_one(session, party, index as u32, None, env);
            Self::record(session, result, env);
            if session.hp_pool == 0 {
                break;
            }
        }
    }

    /// Resolve the next live step once its share of the timer has lapsed.
    ///
    /// `approach_index` selects from the step's available approaches; pass
    /// `None` to resolve plainly. Terminal transitions happen here the
    /// moment the deciding step resolves.
    pub fn advance<R, T>(
        &mut self,
        party: &[PartyMember],
        approach_index: Option<usize>,
        now: i64,
        env: Env<'_, R, T>,
    ) -> Result<&StepResult, AdvanceError>
    where
        R: RngOracle + ?Sized,
        T: TablesOracle + ?Sized,
    {
        let session = &mut *self.session;

        if session.status != RunStatus::InProgress {
            return Err(AdvanceError::NotInProgress);
        }
        if session.mode.strategy() != ResolutionStrategy::LiveStep {
            return Err(AdvanceError::NotLiveMode);
        }
        let index = session.current_step;
        if index as usize >= session.steps.len() {
            return Err(AdvanceError::AllStepsResolved);
        }

        // Step i unlocks once (i + 1) step-durations have lapsed.
        let unlock_at = u64::from(index + 1) * u64::from(session.step_duration_secs());
        let elapsed = timer::elapsed_secs(session.started_at, now);
        if elapsed < unlock_at {
            return Err(AdvanceError::TimerNotElapsed {
                remaining_secs: unlock_at - elapsed,
            });
        }

        let approach_count = session.steps[index as usize].approaches.len();
        if let Some(chosen) = approach_index {
            if chosen >= approach_count {
                return Err(AdvanceError::InvalidApproach {
                    index: chosen,
                    available: approach_count,
                });
            }
        }

        let result = Self::resolve_one(session, party, index, approach_index, env);
        Self::record(session, result, env);

        if session.hp_pool == 0 {
            session.status = RunStatus::Failed;
            session.completed_at = Some(now);
        } else if session.current_step as usize == session.steps.len() {
            session.status = RunStatus::Completed;
            session.completed_at = Some(now);
        }

        Ok(session.results.last().expect("step was just recorded"))
    }

    /// Flip a pre-rolled run to its (already decided) terminal status once
    /// the whole-run timer has lapsed.
    pub fn finalize(&mut self, now: i64) -> Result<RunStatus, AdvanceError> {
        let session = &mut *self.session;

        if session.status != RunStatus::InProgress {
            return Err(AdvanceError::NotInProgress);
        }
        if session.mode.strategy() != ResolutionStrategy::PreRolled {
            return Err(AdvanceError::NotPreRolledMode);
        }
        let remaining = session.remaining_secs(now);
        if remaining > 0 {
            return Err(AdvanceError::TimerNotElapsed {
                remaining_secs: remaining,
            });
        }

        session.status = if session.hp_pool == 0 {
            RunStatus::Failed
        } else {
            RunStatus::Completed
        };
        session.completed_at = Some(now);
        Ok(session.status)
    }

    /// Abandon a run that is still in progress. Terminal and irreversible.
    pub fn abandon(&mut self, now: i64) -> Result<(), AdvanceError> {
        if self.session.status != RunStatus::InProgress {
            return Err(AdvanceError::NotInProgress);
        }
        self.session.status = RunStatus::Abandoned;
        self.session.completed_at = Some(now);
        Ok(())
    }

    // ===== resolution internals =====

    fn resolve_one<R, T>(
        session: &RunSession,
        party: &[PartyMember],
        index: u32,
        approach_index: Option<usize>,
        env: Env<'_, R, T>,
    ) -> StepResult
    where
        R: RngOracle + ?Sized,
        T: TablesOracle + ?Sized,
    {
        let encounter = &session.steps[index as usize];
        let approach = approach_index.and_then(|i| encounter.approaches.get(i));

        let raw_power = compute_raw_party_power(party, encounter, approach);
        let power = compute_party_power(party, encounter, approach);

        let chance = success_chance(power, encounter.difficulty, env.tables);
        let roll = env
            .rng
            .roll_unit(compute_seed(session.seed, index, CTX_SUCCESS));
        let success = resolve_success(chance, roll);

        let party_luck: i32 = party.iter().map(|m| m.stats.get(StatType::Luck)).sum();

        compute_step_reward(
            StepContext {
                step_index: index,
                tier: session.tier,
                encounter,
                approach,
                session_seed: session.seed,
                party_luck,
            },
            success,
            power,
            raw_power,
            env,
        )
    }

    fn record<R, T>(session: &mut RunSession, result: StepResult, env: Env<'_, R, T>)
    where
        R: RngOracle + ?Sized,
        T: TablesOracle + ?Sized,
    {
        session.hp_pool = apply_damage(session.hp_pool, result.hp_loss);
        session.totals.accumulate(&result);
        if session.cooperative && result.success {
            session
                .totals
                .add_bond_exp(env.balance().reward.bond_exp_per_step);
        }
        session.results.push(result);
        session.current_step += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::super::error::{ClaimError, ResumeError};
    use super::*;
    use crate::encounter::EncounterDefinition;
    use crate::env::{BalanceTables, PcgRng};
    use crate::stats::{ClassKind, StatBlock};

    /// Draws just under 1.0, above the chance ceiling: every roll fails.
    struct AlwaysHigh;
    impl RngOracle for AlwaysHigh {
        fn next_u32(&self, _seed: u64) -> u32 {
            u32::MAX
        }
    }

    /// Draws 0.0: every success roll passes (and every drop gate opens).
    struct AlwaysLow;
    impl RngOracle for AlwaysLow {
        fn next_u32(&self, _seed: u64) -> u32 {
            0
        }
    }

    fn party() -> Vec<PartyMember> {
        vec![
            PartyMember::new(CharacterId(1), 5, StatBlock::uniform(12), ClassKind::Warrior),
            PartyMember::new(CharacterId(2), 5, StatBlock::uniform(12), ClassKind::Cleric),
        ]
    }

    fn rooms(count: usize, difficulty: i32) -> Vec<EncounterDefinition> {
        (0..count)
            .map(|i| EncounterDefinition::new(format!("Room {i}"), StatType::Strength, difficulty))
            .collect()
    }

    fn dungeon_params<'a>(
        party: &'a [PartyMember],
        steps: Vec<EncounterDefinition>,
    ) -> StartParams<'a> {
        StartParams {
            id: SessionId(7),
            mode: RunMode::Dungeon,
            tier: 1,
            seed: 0xfeed,
            party,
            cooperative: false,
            steps,
            started_at: 1_000,
            duration_secs: 300,
        }
    }

    #[test]
    fn start_rejects_empty_party() {
        let tables = BalanceTables::default();
        let env = Env::new(&PcgRng, &tables);
        let err = RunMachine::start(dungeon_params(&[], rooms(3, 40)), env).unwrap_err();
        assert_eq!(err, StartError::EmptyParty);
    }

    #[test]
    fn dungeon_steps_wait_for_their_timer() {
        let tables = BalanceTables::default();
        let env = Env::new(&PcgRng, &tables);
        let party = party();
        let mut session = RunMachine::start(dungeon_params(&party, rooms(3, 40)), env).unwrap();

        // 3 rooms over 300s: the first unlocks at started_at + 100.
        let err = RunMachine::new(&mut session)
            .advance(&party, None, 1_050, env)
            .unwrap_err();
        assert!(matches!(err, AdvanceError::TimerNotElapsed { remaining_secs: 50 }));

        let mut machine = RunMachine::new(&mut session);
        let result = machine
            .advance(&party, None, 1_100, env)
            .unwrap();
        assert_eq!(result.step_index, 0);
        assert_eq!(session.current_step, 1);
        assert_eq!(session.results.len(), 1);
    }

    #[test]
    fn dungeon_completes_after_last_room() {
        let tables = BalanceTables::default();
        let env = Env::new(&PcgRng, &tables);
        let party = party();
        let mut session = RunMachine::start(dungeon_params(&party, rooms(2, 10)), env).unwrap();

        let succeed_env = Env::new(&AlwaysLow, &tables);
        RunMachine::new(&mut session)
            .advance(&party, None, 1_150, succeed_env)
            .unwrap();
        RunMachine::new(&mut session)
            .advance(&party, None, 1_300, succeed_env)
            .unwrap();

        assert_eq!(session.status, RunStatus::Completed);
        assert_eq!(session.completed_at, Some(1_300));
        assert!(session.totals.exp > 0);
    }

    #[test]
    fn dungeon_fails_when_hp_pool_empties() {
        let tables = BalanceTables::default();
        let party: Vec<PartyMember> = party()
            .into_iter()
            .map(|m| {
                let max = m.max_hp;
                m.with_hp(3, max)
            })
            .collect();
        let env = Env::new(&PcgRng, &tables);
        let mut session = RunMachine::start(dungeon_params(&party, rooms(5, 200)), env).unwrap();

        // Hostile rolls: each failed room costs at least minimum damage,
        // and the pool holds 6 HP total.
        let fail_env = Env::new(&AlwaysHigh, &tables);
        RunMachine::new(&mut session)
            .advance(&party, None, 1_060, fail_env)
            .unwrap();
        assert_eq!(session.status, RunStatus::Failed);
        assert_eq!(session.hp_pool, 0);

        let err = RunMachine::new(&mut session)
            .advance(&party, None, 1_120, fail_env)
            .unwrap_err();
        assert_eq!(err, AdvanceError::NotInProgress);
    }

    #[test]
    fn arena_pre_rolls_everything_at_commit() {
        let tables = BalanceTables::default();
        let env = Env::new(&PcgRng, &tables);
        let party = party();
        let params = StartParams {
            mode: RunMode::Arena,
            ..dungeon_params(&party, rooms(10, 30))
        };
        let session = RunMachine::start(params, env).unwrap();

        assert_eq!(session.status, RunStatus::InProgress);
        assert_eq!(session.results.len() as u32, session.current_step);
        assert!(!session.results.is_empty());

        // Nothing revealed before time passes; everything after.
        assert!(session.revealed_results(1_000).is_empty());
        assert_eq!(
            session.revealed_results(1_300).len(),
            session.results.len()
        );
    }

    #[test]
    fn identical_commits_roll_identical_outcomes() {
        let tables = BalanceTables::default();
        let env = Env::new(&PcgRng, &tables);
        let party = party();
        let params = StartParams {
            mode: RunMode::Expedition,
            ..dungeon_params(&party, rooms(6, 45))
        };

        let a = RunMachine::start(params.clone(), env).unwrap();
        let b = RunMachine::start(params, env).unwrap();
        assert_eq!(a.results, b.results);
        assert_eq!(a.totals, b.totals);
    }

    #[test]
    fn pre_rolled_runs_cannot_be_advanced() {
        let tables = BalanceTables::default();
        let env = Env::new(&PcgRng, &tables);
        let party = party();
        let params = StartParams {
            mode: RunMode::Arena,
            ..dungeon_params(&party, rooms(4, 30))
        };
        let mut session = RunMachine::start(params, env).unwrap();

        let err = RunMachine::new(&mut session)
            .advance(&party, None, 9_999, env)
            .unwrap_err();
        assert_eq!(err, AdvanceError::NotLiveMode);
    }

    #[test]
    fn finalize_waits_for_the_full_timer() {
        let tables = BalanceTables::default();
        let env = Env::new(&PcgRng, &tables);
        let party = party();
        let params = StartParams {
            mode: RunMode::Arena,
            ..dungeon_params(&party, rooms(4, 30))
        };
        let mut session = RunMachine::start(params, env).unwrap();

        assert!(matches!(
            RunMachine::new(&mut session).finalize(1_200),
            Err(AdvanceError::TimerNotElapsed { .. })
        ));

        let status = RunMachine::new(&mut session).finalize(1_300).unwrap();
        assert!(status.is_terminal());
        assert_eq!(session.completed_at, Some(1_300));
    }

    #[test]
    fn claim_is_idempotent() {
        let tables = BalanceTables::default();
        let env = Env::new(&AlwaysLow, &tables);
        let party = party();
        let params = StartParams {
            mode: RunMode::Arena,
            ..dungeon_params(&party, rooms(3, 10))
        };
        let mut session = RunMachine::start(params, env).unwrap();

        assert_eq!(session.claim().unwrap_err(), ClaimError::NotResolved);

        RunMachine::new(&mut session).finalize(1_300).unwrap();
        let first = session.claim().unwrap();
        assert!(first.is_some());
        let second = session.claim().unwrap();
        assert!(second.is_none());
    }

    #[test]
    fn abandoned_runs_forfeit_rewards() {
        let tables = BalanceTables::default();
        let env = Env::new(&AlwaysLow, &tables);
        let party = party();
        let mut session = RunMachine::start(dungeon_params(&party, rooms(3, 10)), env).unwrap();

        RunMachine::new(&mut session).abandon(1_050).unwrap();
        assert_eq!(session.status, RunStatus::Abandoned);
        assert_eq!(session.claim().unwrap(), None);

        // Terminal: abandoning twice is rejected.
        let err = RunMachine::new(&mut session).abandon(1_060).unwrap_err();
        assert_eq!(err, AdvanceError::NotInProgress);
    }

    #[test]
    fn cooperative_runs_accrue_bond_exp() {
        let tables = BalanceTables::default();
        let env = Env::new(&AlwaysLow, &tables);
        let party = party();
        let params = StartParams {
            mode: RunMode::Expedition,
            cooperative: true,
            ..dungeon_params(&party, rooms(4, 10))
        };
        let session = RunMachine::start(params, env).unwrap();
        assert_eq!(
            session.totals.bond_exp,
            4 * tables.reward.bond_exp_per_step
        );
    }

    #[test]
    fn validated_roundtrip_reconstructs_time_views() {
        let tables = BalanceTables::default();
        let env = Env::new(&PcgRng, &tables);
        let party = party();
        let params = StartParams {
            mode: RunMode::Arena,
            ..dungeon_params(&party, rooms(10, 30))
        };
        let session = RunMachine::start(params, env).unwrap();

        let copy = session.clone();
        assert!(copy.validate().is_ok());
        for now in [1_000, 1_030, 1_150, 1_299, 1_400] {
            assert_eq!(session.remaining_secs(now), copy.remaining_secs(now));
            assert_eq!(
                session.revealed_results(now).len(),
                copy.revealed_results(now).len()
            );
        }
    }

    #[test]
    fn corrupted_records_fail_closed() {
        let tables = BalanceTables::default();
        let env = Env::new(&PcgRng, &tables);
        let party = party();
        let session = RunMachine::start(dungeon_params(&party, rooms(3, 40)), env).unwrap();

        let mut skewed = session.clone();
        skewed.version += 1;
        assert!(matches!(
            skewed.validate(),
            Err(ResumeError::VersionMismatch { .. })
        ));

        let mut torn = session.clone();
        torn.current_step = 2;
        assert!(matches!(
            torn.validate(),
            Err(ResumeError::StepCountMismatch { .. })
        ));

        let mut bloated = session;
        bloated.hp_pool = bloated.max_hp_pool + 10;
        assert!(matches!(
            bloated.validate(),
            Err(ResumeError::HpExceedsMaximum { .. })
        ));
    }
}
