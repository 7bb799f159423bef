//! Stat axes and per-character stat values.
//!
//! [`StatType`] is the closed set of stat axes; [`StatBlock`] maps every
//! axis to a value. Effective stats (equipment folded in) and base stats
//! share the same representation — the layer a block belongs to is a
//! matter of where it came from, not its type.

/// The six stat axes that define a character.
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
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatType {
    /// Physical power; the fallback for unknown stat strings
    #[default]
    Strength,
    /// Speed, reflexes, stealth
    Agility,
    /// Endurance and health
    Vitality,
    /// Learning, lore, problem-solving
    Wisdom,
    /// Persuasion and presence
    Charm,
    /// Fortune; nudges drop rolls
    Luck,
}

/// Per-axis stat values for one character.
///
/// Backed by a fixed array indexed by [`StatType`] discriminants, so adding
/// an axis is a one-line change to the enum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    values: [i32; <StatType as strum::EnumCount>::COUNT],
}

impl StatBlock {
    /// A block with every axis at the same value.
    pub fn uniform(value: i32) -> Self {
        Self {
            values: [value; <StatType as strum::EnumCount>::COUNT],
        }
    }

    pub fn get(&self, stat: StatType) -> i32 {
        self.values[stat as usize]
    }

    pub fn set(&mut self, stat: StatType, value: i32) {
        self.values[stat as usize] = value;
    }

    /// Add `delta` to one axis, clamping the result at zero.
    pub fn add(&mut self, stat: StatType, delta: i32) {
        let slot = &mut self.values[stat as usize];
        *slot = slot.saturating_add(delta).max(0);
    }

    /// Fold another block into this one axis-by-axis (equipment bonuses).
    pub fn merge(&mut self, other: &StatBlock) {
        for (slot, bonus) in self.values.iter_mut().zip(other.values.iter()) {
            *slot = slot.saturating_add(*bonus).max(0);
        }
    }

    pub fn with(mut self, stat: StatType, value: i32) -> Self {
        self.set(stat, value);
        self
    }
}

/// Character class, contributing a flat power bonus that doubles when the
/// encounter's primary axis matches the class's favored stat.
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
pub enum ClassKind {
    /// Frontline fighter; the fallback for unknown class strings
    #[default]
    Warrior,
    Rogue,
    Cleric,
    Mage,
    Ranger,
    Bard,
}

impl ClassKind {
    /// The stat axis this class favors.
    pub fn favored_stat(&self) -> StatType {
        match self {
            Self::Warrior => StatType::Strength,
            Self::Rogue => StatType::Agility,
            Self::Cleric => StatType::Vitality,
            Self::Mage => StatType::Wisdom,
            Self::Ranger => StatType::Luck,
            Self::Bard => StatType::Charm,
        }
    }

    /// Flat power contribution, before the favored-stat doubling.
    pub fn power_bonus(&self) -> i32 {
        match self {
            Self::Warrior => 4,
            Self::Rogue => 3,
            Self::Cleric => 3,
            Self::Mage => 4,
            Self::Ranger => 3,
            Self::Bard => 2,
        }
    }
}
