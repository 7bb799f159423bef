//! Run session state and lifecycle.
//!
//! A [`RunSession`] is the stateful aggregate root for one multi-step
//! encounter: a dungeon's room sequence, an arena's wave sequence, or an
//! expedition's stage sequence. All mutation flows through
//! [`RunMachine`]; everything else reads derived values.
//!
//! The weekly raid boss is a different shape (shared persistent HP pool,
//! single-attack steps, calendar-week bound) and lives in [`raid`].

mod error;
mod machine;
pub mod raid;
pub mod timer;

pub use error::{AdvanceError, ClaimError, ResumeError, StartError};
pub use machine::{RunMachine, StartParams};
pub use raid::{RaidAttackResult, RaidBoss, RaidContribution, RaidWeek};

use crate::encounter::EncounterDefinition;
use crate::reward::{RewardBundle, StepResult};
use crate::state::{CharacterId, SessionId};

/// Version stamp written into persisted session records.
///
/// Bumped on any layout change; loads with a different version fail closed.
pub const RECORD_VERSION: u32 = 1;

/// Lifecycle status of a run.
///
/// Transitions only move forward: `InProgress` into exactly one of the
/// terminal states, never back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunStatus {
    #[default]
    InProgress,
    /// All steps exhausted with HP remaining.
    Completed,
    /// HP pool reached zero before the steps ran out.
    Failed,
    /// The player fled or closed out before either terminal condition.
    Abandoned,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Which product mode a session belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RunMode {
    #[default]
    Dungeon,
    Arena,
    Expedition,
}

impl RunMode {
    /// Dungeon rooms resolve live at timer elapse; arena and expedition
    /// outcomes are fixed at commit time. The two strategies encode a real
    /// product difference (suspense vs fixed destiny) and stay separate.
    pub fn strategy(&self) -> ResolutionStrategy {
        match self {
            Self::Dungeon => ResolutionStrategy::LiveStep,
            Self::Arena | Self::Expedition => ResolutionStrategy::PreRolled,
        }
    }
}

/// How a session's random outcomes are scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolutionStrategy {
    /// Every step resolved eagerly when the run is committed; the timer is
    /// pacing only. Closing and reopening the screen can never re-roll.
    PreRolled,
    /// Each step resolved when its share of the timer lapses.
    LiveStep,
}

/// The stateful aggregate root for one in-progress or completed run.
///
/// Persisted as a flat, versioned record; the whole resume story is
/// reconstructable from these fields alone.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSession {
    pub version: u32,
    pub id: SessionId,
    pub mode: RunMode,
    pub party: Vec<CharacterId>,
    /// Bond experience accrues only on cooperative runs.
    pub cooperative: bool,
    /// Payout scaling bracket (dungeon tier, arena bracket, expedition depth).
    pub tier: u32,
    /// RNG seed fixed at commit time.
    pub seed: u64,
    pub steps: Vec<EncounterDefinition>,
    /// Index of the next unresolved step; equals `results.len()`.
    pub current_step: u32,
    pub hp_pool: u32,
    pub max_hp_pool: u32,
    pub results: Vec<StepResult>,
    pub totals: RewardBundle,
    pub status: RunStatus,
    /// Unix seconds at commit.
    pub started_at: i64,
    pub duration_secs: u32,
    pub completed_at: Option<i64>,
    pub rewards_claimed: bool,
}

impl RunSession {
    // ===== derived time values (recomputed on every read) =====

    pub fn elapsed_secs(&self, now: i64) -> u64 {
        timer::elapsed_secs(self.started_at, now)
    }

    pub fn remaining_secs(&self, now: i64) -> u64 {
        timer::remaining_secs(self.started_at, self.duration_secs, now)
    }

    pub fn progress(&self, now: i64) -> f64 {
        timer::progress(self.started_at, self.duration_secs, now)
    }

    /// Seconds each step takes in live mode.
    pub fn step_duration_secs(&self) -> u32 {
        if self.steps.is_empty() {
            return self.duration_secs;
        }
        (self.duration_secs / self.steps.len() as u32).max(1)
    }

    /// The results the presentation layer may show at `now`.
    ///
    /// Pre-rolled runs hold every result from commit time but reveal them
    /// on the timer's schedule; live runs show whatever has been resolved.
    pub fn revealed_results(&self, now: i64) -> &[StepResult] {
        match self.mode.strategy() {
            ResolutionStrategy::LiveStep => &self.results,
            ResolutionStrategy::PreRolled => {
                let revealable = timer::revealable_steps(
                    self.started_at,
                    self.duration_secs,
                    self.steps.len(),
                    now,
                );
                &self.results[..revealable.min(self.results.len())]
            }
        }
    }

    // ===== claims =====

    /// Take the reward bundle for application, exactly once.
    ///
    /// Returns `Ok(Some(bundle))` on the first claim of a resolved run,
    /// `Ok(None)` on any later claim (a documented no-op, guarding against
    /// re-entrant UI calls) and on abandoned runs, which forfeit rewards.
    pub fn claim(&mut self) -> Result<Option<RewardBundle>, ClaimError> {
        if !self.status.is_terminal() {
            return Err(ClaimError::NotResolved);
        }
        if self.rewards_claimed || self.status == RunStatus::Abandoned {
            self.rewards_claimed = true;
            return Ok(None);
        }
        self.rewards_claimed = true;
        Ok(Some(self.totals.clone()))
    }

    // ===== resume validation =====

    /// Check a freshly deserialized record against the session invariants.
    ///
    /// Any violation means the record was corrupted or partially written;
    /// callers must treat the run as abandoned instead of guessing.
    pub fn validate(&self) -> Result<(), ResumeError> {
        if self.version != RECORD_VERSION {
            return Err(ResumeError::VersionMismatch {
                found: self.version,
                expected: RECORD_VERSION,
            });
        }
        if self.results.len() != self.current_step as usize {
            return Err(ResumeError::StepCountMismatch {
                results: self.results.len(),
                index: self.current_step,
            });
        }
        for (position, result) in self.results.iter().enumerate() {
            if result.step_index as usize != position {
                return Err(ResumeError::StepIndexGap { position });
            }
        }
        if self.current_step as usize > self.steps.len() {
            return Err(ResumeError::StepOverflow {
                index: self.current_step,
                steps: self.steps.len(),
            });
        }
        if self.hp_pool > self.max_hp_pool {
            return Err(ResumeError::HpExceedsMaximum {
                hp: self.hp_pool,
                max: self.max_hp_pool,
            });
        }
        match (self.status.is_terminal(), self.completed_at) {
            (true, None) | (false, Some(_)) => return Err(ResumeError::StatusConflict),
            _ => {}
        }
        if self.rewards_claimed && !self.status.is_terminal() {
            return Err(ResumeError::ClaimedBeforeResolution);
        }
        Ok(())
    }
}
