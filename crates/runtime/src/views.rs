//! Presentation snapshots.
//!
//! Plain serializable views the UI layer binds to. No UI types leak in
//! either direction; every time-derived field is computed at snapshot
//! time from the `now` the caller supplies.

use venture_core::{RewardItem, RunMode, RunSession, RunStatus, StepResult};

/// One step, ready for display.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepView {
    pub index: u32,
    pub success: bool,
    pub narrative: String,
    pub exp: u32,
    pub gold: u32,
    pub hp_loss: u32,
    pub drops: Vec<RewardItem>,
}

impl From<&StepResult> for StepView {
    fn from(result: &StepResult) -> Self {
        Self {
            index: result.step_index,
            success: result.success,
            narrative: result.narrative.clone(),
            exp: result.exp,
            gold: result.gold,
            hp_loss: result.hp_loss,
            drops: result.drops.clone(),
        }
    }
}

/// Running totals, ready for display.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RewardView {
    pub exp: u32,
    pub gold: u32,
    pub item_count: u32,
    pub bond_exp: u32,
}

/// One session, ready for display.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SessionView {
    pub id: u64,
    pub mode: RunMode,
    pub status: RunStatus,
    pub hp_pool: u32,
    pub max_hp_pool: u32,
    pub step_count: u32,
    /// Fraction of the run timer consumed, in [0, 1].
    pub progress: f64,
    pub remaining_secs: u64,
    /// Steps the timer has revealed so far.
    pub revealed: Vec<StepView>,
    pub totals: RewardView,
    pub rewards_claimed: bool,
}

/// Snapshot a session for the presentation layer at `now`.
pub fn session_view(session: &RunSession, now: i64) -> SessionView {
    SessionView {
        id: session.id.0,
        mode: session.mode,
        status: session.status,
        hp_pool: session.hp_pool,
        max_hp_pool: session.max_hp_pool,
        step_count: session.steps.len() as u32,
        progress: session.progress(now),
        remaining_secs: session.remaining_secs(now),
        revealed: session
            .revealed_results(now)
            .iter()
            .map(StepView::from)
            .collect(),
        totals: RewardView {
            exp: session.totals.exp,
            gold: session.totals.gold,
            item_count: session.totals.items.len() as u32,
            bond_exp: session.totals.bond_exp,
        },
        rewards_claimed: session.rewards_claimed,
    }
}
