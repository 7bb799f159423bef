//! Character aggregate.

use crate::env::LevelParams;
use crate::stats::{ClassKind, PartyMember, StatBlock};

use super::counters::AttemptCounters;
use super::inventory::Inventory;

/// Identity of one character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl core::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "character-{}", self.0)
    }
}

/// HP granted at level 1.
const BASE_HP: u32 = 50;

/// HP granted per level beyond the first.
const HP_PER_LEVEL: u32 = 10;

/// Persistent progression state for one character.
///
/// The engine never hands out mutable references to a `Character` during
/// resolution; runs see a [`PartyMember`] projection and all consequences
/// land through [`crate::apply`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub class: ClassKind,
    pub level: u32,
    /// Experience toward the next level (carry-over after level-ups).
    pub exp: u32,
    pub gold: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub base_stats: StatBlock,
    pub inventory: Inventory,
    pub counters: AttemptCounters,
    /// Shared progression with a linked partner; grows only on co-op runs.
    pub bond_exp: u32,
}

impl Character {
    pub fn new(id: CharacterId, name: impl Into<String>, class: ClassKind) -> Self {
        Self {
            id,
            name: name.into(),
            class,
            level: 1,
            exp: 0,
            gold: 0,
            hp: BASE_HP,
            max_hp: BASE_HP,
            base_stats: StatBlock::uniform(10),
            inventory: Inventory::default(),
            counters: AttemptCounters::default(),
            bond_exp: 0,
        }
    }

    /// Effective stats: base plus bonuses from equipped gear.
    pub fn effective_stats(&self) -> StatBlock {
        let mut stats = self.base_stats;
        stats.merge(&self.inventory.equipment_bonuses());
        stats
    }

    /// Read-only combat projection with equipment folded in.
    pub fn to_party_member(&self) -> PartyMember {
        PartyMember::new(self.id, self.level, self.effective_stats(), self.class)
            .with_hp(self.hp, self.max_hp)
    }

    /// Whether `exp` has reached the next level threshold.
    pub fn can_level_up(&self, params: &LevelParams) -> bool {
        self.exp >= params.exp_to_next(self.level)
    }

    /// Consume one threshold's worth of experience and advance a level.
    ///
    /// Raises max HP and grants the same amount of current HP; the
    /// remaining experience carries over toward the next threshold.
    pub fn perform_level_up(&mut self, params: &LevelParams) {
        let threshold = params.exp_to_next(self.level);
        debug_assert!(self.exp >= threshold);

        self.exp -= threshold;
        self.level += 1;
        self.max_hp += HP_PER_LEVEL;
        self.hp = (self.hp + HP_PER_LEVEL).min(self.max_hp);
    }

    /// Reduce HP, never below zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Restore HP up to the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Post-run floor: a character is never left at zero HP after claiming.
    pub fn revive_to_floor(&mut self) {
        if self.hp == 0 {
            self.hp = 1;
        }
    }
}
