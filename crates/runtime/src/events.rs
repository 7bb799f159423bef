//! Downstream reward notifications.
//!
//! After a bundle is applied, the orchestrator fans these out to quest,
//! achievement, and bond systems. They are plain data — the engine exposes
//! the fields and performs none of the calls itself.

use venture_core::{RewardBundle, RewardItem, RunMode, RunSession, RunStatus};

/// One downstream notification produced by a claim.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RewardEvent {
    /// Progress tick for quest tracking.
    QuestProgress {
        mode: RunMode,
        steps_resolved: u32,
        completed: bool,
    },
    /// Trigger for achievement evaluation.
    AchievementCheck {
        mode: RunMode,
        boss_defeated: bool,
        flawless: bool,
    },
    /// Material income feed for crafting ledgers.
    MaterialIncome { name: String, quantity: u32 },
    /// Bond experience earned by a cooperative run.
    BondExperience { amount: u32 },
}

/// Derive the downstream events for one claimed run.
pub fn reward_events(session: &RunSession, bundle: &RewardBundle) -> Vec<RewardEvent> {
    let mut events = vec![RewardEvent::QuestProgress {
        mode: session.mode,
        steps_resolved: session.current_step,
        completed: session.status == RunStatus::Completed,
    }];

    let boss_defeated = session
        .results
        .iter()
        .zip(session.steps.iter())
        .any(|(result, step)| step.is_boss && result.success);
    let flawless = session.results.iter().all(|r| r.hp_loss == 0);
    events.push(RewardEvent::AchievementCheck {
        mode: session.mode,
        boss_defeated,
        flawless,
    });

    for item in &bundle.items {
        if let RewardItem::Material(drop) = item {
            events.push(RewardEvent::MaterialIncome {
                name: drop.name.clone(),
                quantity: drop.quantity,
            });
        }
    }

    if bundle.bond_exp > 0 {
        events.push(RewardEvent::BondExperience {
            amount: bundle.bond_exp,
        });
    }

    events
}
