//! Record normalization.
//!
//! Conversion is total: unknown or malformed values map to documented safe
//! defaults (unknown category → combat, unknown stat → strength) instead
//! of failing, preserving availability when remote content is partially
//! invalid. Hard errors are reserved for I/O and syntax in the loaders.

use core::str::FromStr;

use venture_core::{
    Approach, EncounterCategory, EncounterDefinition, EngineConfig, StatType,
};

use crate::builtin::default_approaches;
use crate::records::{ApproachRecord, EncounterRecord, EncounterSetRecord};

/// Difficulty assumed when the record does not carry one.
pub const DEFAULT_DIFFICULTY: i32 = 50;

/// A normalized run's worth of encounters.
#[derive(Clone, Debug, PartialEq)]
pub struct EncounterSet {
    pub name: String,
    pub tier: u32,
    pub duration_secs: u32,
    pub encounters: Vec<EncounterDefinition>,
}

/// Normalize one encounter record. Never fails.
pub fn to_encounter_definition(record: &EncounterRecord) -> EncounterDefinition {
    let category = record
        .category
        .as_deref()
        .and_then(|s| EncounterCategory::from_str(s.trim()).ok())
        .unwrap_or_default();

    let primary_stat = record
        .primary_stat
        .as_deref()
        .and_then(|s| StatType::from_str(s.trim()).ok())
        .unwrap_or_default();

    let difficulty = record.difficulty.unwrap_or(DEFAULT_DIFFICULTY).clamp(1, 999);

    let mut approaches: Vec<Approach> = record.approaches.iter().map(to_approach).collect();
    if approaches.is_empty() {
        approaches = default_approaches();
    }

    EncounterDefinition {
        name: record
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unmarked Passage".to_string()),
        category,
        primary_stat,
        difficulty,
        is_boss: record.boss.unwrap_or(category == EncounterCategory::Boss),
        bonus_loot_chance: record.bonus_loot_chance.unwrap_or(0.0).clamp(0.0, 1.0),
        approaches,
    }
}

/// Normalize one approach record. Never fails.
///
/// Multipliers are clamped to sane tuning ranges so a typo in remote
/// content cannot produce a free-win or an instant-kill option.
pub fn to_approach(record: &ApproachRecord) -> Approach {
    let stat = record
        .stat
        .as_deref()
        .and_then(|s| StatType::from_str(s.trim()).ok());

    let mut approach = Approach::new(
        record
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Standard".to_string()),
        record.power_multiplier.unwrap_or(1.0).clamp(0.5, 2.0),
        record.risk_modifier.unwrap_or(1.0).clamp(0.0, 3.0),
    );
    if let Some(stat) = stat {
        approach = approach.with_stat_override(stat);
    }
    approach
}

/// Normalize a whole set record. Never fails; an empty encounter list
/// stays empty and the caller decides whether to fall back to the
/// built-in catalog.
pub fn to_encounter_set(record: &EncounterSetRecord) -> EncounterSet {
    EncounterSet {
        name: record
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Uncharted Venture".to_string()),
        tier: record.tier.unwrap_or(1).max(1),
        duration_secs: record
            .duration_secs
            .unwrap_or(EngineConfig::DEFAULT_RUN_DURATION_SECS)
            .max(1),
        encounters: record
            .encounters
            .iter()
            .map(to_encounter_definition)
            .collect(),
    }
}
