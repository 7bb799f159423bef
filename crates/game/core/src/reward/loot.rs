//! Loot drop rolls.
//!
//! Each drop kind (equipment, material, card) is its own independent
//! Bernoulli trial gated by the encounter's bonus loot chance; a failed
//! step never reaches these functions. Drop parameters (rarity, slot,
//! stats, quantity) are derived from further seeded draws so a committed
//! run always reveals the same loot.

use crate::encounter::EncounterDefinition;
use crate::env::{RngOracle, compute_seed};
use crate::stats::StatType;

use super::items::{CardDrop, EquipmentDrop, EquipmentSlot, MaterialDrop, Rarity};

/// Seed context channels for loot parameter draws.
///
/// Channels 0-4 are claimed by the step resolver (success roll, the three
/// drop gates, narrative); parameter draws start at 5.
const CTX_RARITY: u32 = 5;
const CTX_SLOT: u32 = 6;
const CTX_PRIMARY_STAT: u32 = 7;
const CTX_SECONDARY_STAT: u32 = 8;
const CTX_QUANTITY: u32 = 9;
const CTX_NAME: u32 = 10;

const SLOT_NAMES: &[(&str, EquipmentSlot)] = &[
    ("Blade", EquipmentSlot::Weapon),
    ("Helm", EquipmentSlot::Helm),
    ("Hauberk", EquipmentSlot::Armor),
    ("Treads", EquipmentSlot::Boots),
    ("Charm", EquipmentSlot::Trinket),
];

const RARITY_PREFIXES: &[(&str, Rarity)] = &[
    ("Plain", Rarity::Common),
    ("Polished", Rarity::Uncommon),
    ("Runed", Rarity::Rare),
    ("Sunforged", Rarity::Epic),
    ("Mythic", Rarity::Legendary),
];

const MATERIAL_NAMES: &[&str] = &[
    "Iron Shard",
    "Ember Resin",
    "Silk Thread",
    "Moon Salt",
    "Wyrm Scale",
];

const CARD_NAMES: &[&str] = &[
    "The Wanderer",
    "The Sentinel",
    "The Trickster",
    "The Oracle",
    "The Hearthkeeper",
    "The Stormcaller",
];

const STAT_AXES: &[StatType] = &[
    StatType::Strength,
    StatType::Agility,
    StatType::Vitality,
    StatType::Wisdom,
    StatType::Charm,
    StatType::Luck,
];

/// Roll a rarity tier, shifted upward by tier.
///
/// The luck bonus tops out so high-tier content never guarantees epics.
fn roll_rarity(tier: u32, seed: u64, rng: &(impl RngOracle + ?Sized)) -> Rarity {
    let luck_bonus = (f64::from(tier) * 0.01).min(0.10);
    let roll = rng.roll_unit(seed);

    if roll < 0.01 + luck_bonus * 0.1 {
        Rarity::Legendary
    } else if roll < 0.05 + luck_bonus * 0.5 {
        Rarity::Epic
    } else if roll < 0.15 + luck_bonus {
        Rarity::Rare
    } else if roll < 0.40 + luck_bonus {
        Rarity::Uncommon
    } else {
        Rarity::Common
    }
}

fn prefix_for(rarity: Rarity) -> &'static str {
    RARITY_PREFIXES
        .iter()
        .find(|(_, r)| *r == rarity)
        .map(|(name, _)| *name)
        .unwrap_or("Plain")
}

/// Roll a fully specified equipment piece.
pub fn roll_equipment(
    encounter: &EncounterDefinition,
    tier: u32,
    session_seed: u64,
    step: u32,
    rng: &(impl RngOracle + ?Sized),
) -> EquipmentDrop {
    let rarity = roll_rarity(tier, compute_seed(session_seed, step, CTX_RARITY), rng);

    let slot_idx = rng.pick_index(compute_seed(session_seed, step, CTX_SLOT), SLOT_NAMES.len());
    let (slot_name, slot) = SLOT_NAMES[slot_idx];

    // Bias the primary stat toward the encounter's axis: half the drops
    // roll a random axis instead.
    let stat_seed = compute_seed(session_seed, step, CTX_PRIMARY_STAT);
    let primary_stat = if rng.roll_unit(stat_seed) < 0.5 {
        encounter.primary_stat
    } else {
        STAT_AXES[rng.pick_index(stat_seed.wrapping_add(1), STAT_AXES.len())]
    };

    // Rare and better pieces carry a secondary axis.
    let secondary_stat = if rarity >= Rarity::Rare {
        let seed = compute_seed(session_seed, step, CTX_SECONDARY_STAT);
        Some(STAT_AXES[rng.pick_index(seed, STAT_AXES.len())])
    } else {
        None
    };

    let stat_bonus = rarity.bonus_factor() + tier as i32;
    let level_requirement = (tier * 5).saturating_sub(4).max(1);

    EquipmentDrop {
        name: format!("{} {}", prefix_for(rarity), slot_name),
        rarity,
        slot,
        primary_stat,
        secondary_stat,
        stat_bonus,
        level_requirement,
    }
}

/// Roll a material stack.
pub fn roll_material(
    tier: u32,
    session_seed: u64,
    step: u32,
    rng: &(impl RngOracle + ?Sized),
) -> MaterialDrop {
    let rarity = roll_rarity(tier, compute_seed(session_seed, step, CTX_RARITY), rng);
    let name_idx = rng.pick_index(
        compute_seed(session_seed, step, CTX_NAME),
        MATERIAL_NAMES.len(),
    );
    let quantity = rng.range(compute_seed(session_seed, step, CTX_QUANTITY), 1, 3 + tier);

    MaterialDrop {
        name: MATERIAL_NAMES[name_idx].to_string(),
        rarity,
        quantity,
    }
}

/// Roll a collectible card.
pub fn roll_card(
    tier: u32,
    session_seed: u64,
    step: u32,
    rng: &(impl RngOracle + ?Sized),
) -> CardDrop {
    let rarity = roll_rarity(tier, compute_seed(session_seed, step, CTX_RARITY), rng);
    let name_idx = rng.pick_index(compute_seed(session_seed, step, CTX_NAME), CARD_NAMES.len());

    CardDrop {
        name: CARD_NAMES[name_idx].to_string(),
        rarity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn equipment_rolls_are_deterministic() {
        let rng = PcgRng;
        let enc = EncounterDefinition::new("Vault", StatType::Strength, 60);
        let a = roll_equipment(&enc, 3, 42, 1, &rng);
        let b = roll_equipment(&enc, 3, 42, 1, &rng);
        assert_eq!(a, b);
    }

    #[test]
    fn rarity_distribution_skews_common() {
        let rng = PcgRng;
        let mut common_or_uncommon = 0;
        let mut rare_plus = 0;
        for seed in 0..1000 {
            match roll_rarity(1, seed * 7 + 13, &rng) {
                Rarity::Common | Rarity::Uncommon => common_or_uncommon += 1,
                _ => rare_plus += 1,
            }
        }
        assert!(common_or_uncommon > rare_plus * 2);
    }

    #[test]
    fn level_requirement_scales_with_tier() {
        let rng = PcgRng;
        let enc = EncounterDefinition::new("Vault", StatType::Agility, 40);
        let low = roll_equipment(&enc, 1, 9, 0, &rng);
        let high = roll_equipment(&enc, 6, 9, 0, &rng);
        assert_eq!(low.level_requirement, 1);
        assert!(high.level_requirement > low.level_requirement);
    }

    #[test]
    fn material_quantity_is_positive() {
        let rng = PcgRng;
        for seed in 0..100 {
            let drop = roll_material(2, seed, 0, &rng);
            assert!(drop.quantity >= 1);
        }
    }
}
