//! Narrative text selection.
//!
//! Each resolved step carries one line of flavor text picked uniformly from
//! a pool keyed by (encounter category, success flag). Pools always resolve
//! to at least a fallback string, so selection never returns empty text.

use crate::encounter::EncounterCategory;
use crate::env::RngOracle;

const COMBAT_SUCCESS: &[&str] = &[
    "The party cuts through the opposition.",
    "Steel rings out, and the way ahead clears.",
    "A short, brutal exchange ends in your favor.",
];

const COMBAT_FAILURE: &[&str] = &[
    "The line breaks and the party falls back, bloodied.",
    "Blows land hard; the party retreats to regroup.",
];

const PUZZLE_SUCCESS: &[&str] = &[
    "The mechanism clicks open under patient hands.",
    "An old riddle yields to a flash of insight.",
];

const PUZZLE_FAILURE: &[&str] = &[
    "The puzzle resets with a mocking chime.",
    "Hours lost to a cipher that refuses to break.",
];

const TRAP_SUCCESS: &[&str] = &[
    "A tripwire is spotted and stepped over without a sound.",
    "The pressure plate is wedged before it can spring.",
];

const TRAP_FAILURE: &[&str] = &[
    "Darts hiss from the wall before anyone can shout.",
    "The floor gives way beneath the rearguard.",
];

const PARLEY_SUCCESS: &[&str] = &[
    "Sharp words and a shared drink settle the matter.",
    "The sentries wave the party through with a shrug.",
];

const PARLEY_FAILURE: &[&str] = &[
    "Negotiations collapse into shouting.",
    "The toll collector doubles the price out of spite.",
];

const BOSS_SUCCESS: &[&str] = &[
    "The great beast crashes down, and the hall falls silent.",
    "Against all odds, the tyrant of this place is undone.",
];

const BOSS_FAILURE: &[&str] = &[
    "The boss shrugs off the assault and drives the party out.",
];

/// Guaranteed fallbacks when a pool would otherwise be empty.
const FALLBACK_SUCCESS: &str = "Success!";
const FALLBACK_FAILURE: &str = "Failed!";

fn pool(category: EncounterCategory, success: bool) -> &'static [&'static str] {
    match (category, success) {
        (EncounterCategory::Combat, true) => COMBAT_SUCCESS,
        (EncounterCategory::Combat, false) => COMBAT_FAILURE,
        (EncounterCategory::Puzzle, true) => PUZZLE_SUCCESS,
        (EncounterCategory::Puzzle, false) => PUZZLE_FAILURE,
        (EncounterCategory::Trap, true) => TRAP_SUCCESS,
        (EncounterCategory::Trap, false) => TRAP_FAILURE,
        (EncounterCategory::Parley, true) => PARLEY_SUCCESS,
        (EncounterCategory::Parley, false) => PARLEY_FAILURE,
        (EncounterCategory::Boss, true) => BOSS_SUCCESS,
        (EncounterCategory::Boss, false) => BOSS_FAILURE,
    }
}

/// Select a narrative line for a resolved step.
///
/// Uniform over the pool for (category, success); total — falls back to
/// "Success!"/"Failed!" if a pool is ever empty.
pub fn narrative_line(
    category: EncounterCategory,
    success: bool,
    seed: u64,
    rng: &(impl RngOracle + ?Sized),
) -> &'static str {
    let pool = pool(category, success);
    if pool.is_empty() {
        return if success {
            FALLBACK_SUCCESS
        } else {
            FALLBACK_FAILURE
        };
    }
    pool[rng.pick_index(seed, pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn every_pool_yields_text() {
        let rng = PcgRng;
        for category in [
            EncounterCategory::Combat,
            EncounterCategory::Puzzle,
            EncounterCategory::Trap,
            EncounterCategory::Parley,
            EncounterCategory::Boss,
        ] {
            for success in [true, false] {
                let line = narrative_line(category, success, 99, &rng);
                assert!(!line.is_empty());
            }
        }
    }

    #[test]
    fn selection_is_deterministic() {
        let rng = PcgRng;
        let a = narrative_line(EncounterCategory::Combat, true, 7, &rng);
        let b = narrative_line(EncounterCategory::Combat, true, 7, &rng);
        assert_eq!(a, b);
    }
}
