//! Reward application and aggregation.
//!
//! The bundle is fully computed before any mutation begins, so application
//! is transactional from the caller's perspective: once a call starts
//! there is nothing left to compute that could fail halfway.
//!
//! Concurrency note: characters are the only mutable state shared between
//! otherwise independent runs. Callers must serialize applications per
//! character (the runtime wraps this in a wallet guard) so a timer-elapsed
//! auto-resolve racing a manual claim cannot double-apply.

use crate::env::LevelParams;
use crate::reward::RewardBundle;
use crate::state::Character;

/// What one application did to one character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedRewards {
    pub exp: u32,
    pub gold: u32,
    pub items: u32,
    pub levels_gained: u32,
    pub bond_exp: u32,
}

/// Apply a full bundle to one character.
///
/// Leveling loops: a single grant can carry a character across several
/// thresholds, each consuming its share and carrying the rest forward.
pub fn apply_rewards(
    bundle: &RewardBundle,
    character: &mut Character,
    params: &LevelParams,
) -> AppliedRewards {
    let mut applied = AppliedRewards {
        exp: bundle.exp,
        gold: bundle.gold,
        items: bundle.items.len() as u32,
        bond_exp: bundle.bond_exp,
        ..AppliedRewards::default()
    };

    character.gold = character.gold.saturating_add(bundle.gold);

    for item in bundle.items.iter().cloned() {
        let loose_gold = character.inventory.insert(item);
        character.gold = character.gold.saturating_add(loose_gold);
        applied.gold += loose_gold;
    }

    character.exp = character.exp.saturating_add(bundle.exp);
    while character.can_level_up(params) {
        character.perform_level_up(params);
        applied.levels_gained += 1;
    }

    character.bond_exp = character.bond_exp.saturating_add(bundle.bond_exp);

    applied
}

/// Apply a bundle across a cooperative party.
///
/// Gold divides by truncating integer division with the remainder granted
/// to the initiating member (`party[0]`), so no gold is destroyed.
/// Experience and bond experience apply to every member in full, not
/// divided. Item drops land in the initiating member's inventory.
pub fn apply_party(
    bundle: &RewardBundle,
    party: &mut [Character],
    params: &LevelParams,
) -> Vec<AppliedRewards> {
    if party.is_empty() {
        return Vec::new();
    }

    let size = party.len() as u32;
    let share = bundle.gold / size;
    let remainder = bundle.gold % size;

    party
        .iter_mut()
        .enumerate()
        .map(|(position, member)| {
            let initiating = position == 0;
            let member_bundle = RewardBundle {
                exp: bundle.exp,
                gold: share + if initiating { remainder } else { 0 },
                items: if initiating {
                    bundle.items.clone()
                } else {
                    Vec::new()
                },
                bond_exp: bundle.bond_exp,
            };
            apply_rewards(&member_bundle, member, params)
        })
        .collect()
}

/// Settle run HP losses onto the party.
///
/// Losses divide evenly (remainder to the initiating member); no one is
/// ever left at zero — characters knocked out revive to 1 HP.
pub fn apply_hp_losses(total_loss: u32, party: &mut [Character]) {
    if party.is_empty() {
        return;
    }

    let size = party.len() as u32;
    let share = total_loss / size;
    let remainder = total_loss % size;

    for (position, member) in party.iter_mut().enumerate() {
        let loss = share + if position == 0 { remainder } else { 0 };
        member.take_damage(loss);
        member.revive_to_floor();
    }
}
