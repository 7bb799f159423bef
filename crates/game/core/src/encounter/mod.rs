//! Encounter definitions and tactical approaches.
//!
//! An [`EncounterDefinition`] is one discrete challenge inside a run: a
//! dungeon room, an arena wave, an expedition stage, or a raid attack
//! window. Definitions are produced by the content adapter (or generated
//! from a wave rule) and consumed read-only by the resolution pipeline.

use crate::stats::StatType;

/// Category tag for an encounter, used for narrative selection and
/// content-side theming.
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
pub enum EncounterCategory {
    /// Straight fight (default; also the fallback for unknown categories)
    #[default]
    Combat,
    /// Riddle, mechanism, or lore challenge
    Puzzle,
    /// Environmental hazard
    Trap,
    /// Social or bartering challenge
    Parley,
    /// Milestone boss fight
    Boss,
}

/// One discrete challenge within a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterDefinition {
    /// Display name ("Rotting Cellar", "Wave 7", ...).
    pub name: String,
    /// Category tag for narrative and theming.
    pub category: EncounterCategory,
    /// Stat axis used for power calculation unless an approach overrides it.
    pub primary_stat: StatType,
    /// Difficulty rating the party power is compared against.
    pub difficulty: i32,
    /// Boss/milestone steps pay multiplied rewards.
    pub is_boss: bool,
    /// Additive modifier on top of baseline drop chances, in [0, 1].
    pub bonus_loot_chance: f64,
    /// Tactical options available for this encounter.
    pub approaches: Vec<Approach>,
}

impl EncounterDefinition {
    /// Create a plain combat encounter with no approach choices.
    pub fn new(name: impl Into<String>, primary_stat: StatType, difficulty: i32) -> Self {
        Self {
            name: name.into(),
            category: EncounterCategory::Combat,
            primary_stat,
            difficulty,
            is_boss: false,
            bonus_loot_chance: 0.0,
            approaches: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: EncounterCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_boss(mut self, is_boss: bool) -> Self {
        self.is_boss = is_boss;
        self
    }

    pub fn with_bonus_loot_chance(mut self, chance: f64) -> Self {
        self.bonus_loot_chance = chance.clamp(0.0, 1.0);
        self
    }

    pub fn with_approaches(mut self, approaches: Vec<Approach>) -> Self {
        self.approaches = approaches;
        self
    }
}

/// A tactical option for resolving an encounter.
///
/// Approaches are risk/reward levers: the power multiplier raises the
/// effective power used for the success roll (and, above the risky
/// threshold, the reward payout), while the risk modifier scales the HP
/// loss on failure. The two act asymmetrically — failure damage is always
/// computed from un-multiplied power.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Approach {
    /// Display name ("Charge in", "Sneak past", ...).
    pub name: String,
    /// Stat axis override for power calculation.
    pub primary_stat_override: Option<StatType>,
    /// Multiplier applied to raw party power for the success roll.
    pub power_multiplier: f64,
    /// Multiplier applied to HP loss when the step fails.
    pub risk_modifier: f64,
}

impl Approach {
    pub fn new(name: impl Into<String>, power_multiplier: f64, risk_modifier: f64) -> Self {
        Self {
            name: name.into(),
            primary_stat_override: None,
            power_multiplier,
            risk_modifier,
        }
    }

    pub fn with_stat_override(mut self, stat: StatType) -> Self {
        self.primary_stat_override = Some(stat);
        self
    }

    /// The balanced default used when content supplies no approaches.
    pub fn standard() -> Self {
        Self::new("Standard", 1.0, 1.0)
    }
}
