//! Reward item variants.
//!
//! Every droppable thing in the economy is one closed [`RewardItem`]
//! variant with a uniform apply-to-character path (see [`crate::apply`]),
//! rather than ad hoc branching at call sites.

use crate::stats::StatType;

/// Item rarity tier.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Multiplier applied to stat bonuses and payouts for this tier.
    pub fn bonus_factor(&self) -> i32 {
        match self {
            Self::Common => 1,
            Self::Uncommon => 2,
            Self::Rare => 3,
            Self::Epic => 5,
            Self::Legendary => 8,
        }
    }
}

/// Equipment slot.
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
pub enum EquipmentSlot {
    #[default]
    Weapon,
    Helm,
    Armor,
    Boots,
    Trinket,
}

/// A fully specified equipment drop.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentDrop {
    pub name: String,
    pub rarity: Rarity,
    pub slot: EquipmentSlot,
    pub primary_stat: StatType,
    pub secondary_stat: Option<StatType>,
    pub stat_bonus: i32,
    pub level_requirement: u32,
}

/// A crafting material drop.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialDrop {
    pub name: String,
    pub rarity: Rarity,
    pub quantity: u32,
}

/// A collectible card drop.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDrop {
    pub name: String,
    pub rarity: Rarity,
}

/// Closed set of droppable reward variants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RewardItem {
    Equipment(EquipmentDrop),
    Material(MaterialDrop),
    Card(CardDrop),
    /// Loose gold on top of the step's base payout.
    Currency(u32),
}

impl RewardItem {
    /// Short label for logs and narrative entries.
    pub fn label(&self) -> &str {
        match self {
            Self::Equipment(drop) => &drop.name,
            Self::Material(drop) => &drop.name,
            Self::Card(drop) => &drop.name,
            Self::Currency(_) => "gold",
        }
    }
}
