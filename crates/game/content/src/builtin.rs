//! Compiled-in fallback catalog.
//!
//! When the content source is unreachable or delivers an empty set, these
//! tables keep every mode playable. Numbers here are intentionally modest;
//! live tuning arrives through the remote tables, not this file.

use venture_core::{Approach, EncounterCategory, EncounterDefinition, StatType};

/// The approach choices offered when content supplies none.
pub fn default_approaches() -> Vec<Approach> {
    vec![
        Approach::new("Steady", 1.0, 1.0),
        Approach::new("Reckless", 1.3, 1.6),
        Approach::new("Cautious", 0.85, 0.6),
    ]
}

/// A five-room dungeon floor for the given tier, boss room last.
pub fn dungeon_floor(tier: u32) -> Vec<EncounterDefinition> {
    let tier = tier.max(1);
    let base = 30 + (tier as i32 - 1) * 20;

    let mut rooms = vec![
        EncounterDefinition::new("Collapsed Gallery", StatType::Strength, base)
            .with_approaches(default_approaches()),
        EncounterDefinition::new("Rune-Sealed Door", StatType::Wisdom, base + 5)
            .with_category(EncounterCategory::Puzzle)
            .with_approaches(default_approaches()),
        EncounterDefinition::new("Spore-Choked Hall", StatType::Vitality, base + 10)
            .with_category(EncounterCategory::Trap)
            .with_approaches(default_approaches()),
        EncounterDefinition::new("Toll of the Gravekeeper", StatType::Charm, base + 10)
            .with_category(EncounterCategory::Parley)
            .with_approaches(default_approaches()),
    ];
    rooms.push(
        EncounterDefinition::new("Warden of the Floor", StatType::Strength, base + 25)
            .with_category(EncounterCategory::Boss)
            .with_boss(true)
            .with_bonus_loot_chance(0.15)
            .with_approaches(default_approaches()),
    );
    rooms
}

/// Arena waves for one bracket; difficulty climbs per wave and every
/// fifth wave is a champion paying boss rewards.
pub fn arena_waves(count: usize, bracket: u32) -> Vec<EncounterDefinition> {
    let bracket = bracket.max(1);
    (0..count)
        .map(|wave| {
            let number = wave as u32 + 1;
            let difficulty = 20 + (bracket as i32 - 1) * 15 + wave as i32 * 6;
            let champion = number % 5 == 0;
            EncounterDefinition::new(format!("Wave {number}"), StatType::Strength, difficulty)
                .with_category(if champion {
                    EncounterCategory::Boss
                } else {
                    EncounterCategory::Combat
                })
                .with_boss(champion)
        })
        .collect()
}

/// Expedition stages: long, low-intensity checks against varied axes.
pub fn expedition_stages(depth: u32) -> Vec<EncounterDefinition> {
    let depth = depth.max(1);
    let base = 25 + (depth as i32 - 1) * 15;

    vec![
        EncounterDefinition::new("Breaking Camp", StatType::Vitality, base),
        EncounterDefinition::new("Fording the Mire", StatType::Agility, base + 5)
            .with_category(EncounterCategory::Trap),
        EncounterDefinition::new("Old Waystone Cipher", StatType::Wisdom, base + 10)
            .with_category(EncounterCategory::Puzzle),
        EncounterDefinition::new("Returning Laden", StatType::Strength, base + 5)
            .with_bonus_loot_chance(0.10),
    ]
}
