//! Party power calculation.

use crate::encounter::{Approach, EncounterDefinition};

use super::block::StatType;
use super::member::PartyMember;

/// Power granted per character level, independent of stats.
///
/// The baseline keeps low-level parties from being mathematically locked
/// out of low-tier content even with zeroed stats.
pub const LEVEL_POWER_SCALE: i32 = 2;

/// Compute the aggregate power of a party against an encounter.
///
/// # Formula
///
/// ```text
/// member_power = primary_stat + class_bonus + level × LEVEL_POWER_SCALE
/// raw_power    = Σ member_power
/// power        = floor(raw_power × approach_multiplier)
/// ```
///
/// The primary stat axis comes from the encounter unless the approach
/// overrides it. The class bonus doubles when the class's favored stat is
/// the axis in play. Callers compute success chance on the returned
/// (multiplied) value but must compute failure penalties from the
/// un-multiplied power — pass `None` for the approach to obtain it.
///
/// Pure and reproducible; monotonically non-decreasing in every stat input.
pub fn compute_party_power(
    party: &[PartyMember],
    encounter: &EncounterDefinition,
    approach: Option<&Approach>,
) -> i32 {
    let raw = compute_raw_party_power(party, encounter, approach);

    match approach {
        Some(a) => ((raw as f64) * a.power_multiplier.max(0.0)).floor() as i32,
        None => raw,
    }
}

/// Party power with the approach's stat override honored but its power
/// multiplier left out.
///
/// This is the value failure penalties are computed from: the approach
/// raises the success roll, never the party's resilience.
pub fn compute_raw_party_power(
    party: &[PartyMember],
    encounter: &EncounterDefinition,
    approach: Option<&Approach>,
) -> i32 {
    let axis = approach
        .and_then(|a| a.primary_stat_override)
        .unwrap_or(encounter.primary_stat);

    party
        .iter()
        .map(|member| member_power(member, axis))
        .sum()
}

fn member_power(member: &PartyMember, axis: StatType) -> i32 {
    let stat = member.stats.get(axis).max(0);

    let mut class_bonus = member.class.power_bonus();
    if member.class.favored_stat() == axis {
        class_bonus *= 2;
    }

    let level_baseline = member.level as i32 * LEVEL_POWER_SCALE;

    stat + class_bonus + level_baseline
}
