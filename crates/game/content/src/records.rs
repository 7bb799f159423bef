//! Raw external content records.
//!
//! These mirror whatever the content service (or a local data file)
//! delivers: every field is optional or string-typed so a partially valid
//! payload still deserializes. Normalization into engine types happens in
//! [`crate::adapter`], never here.

use serde::{Deserialize, Serialize};

/// One encounter as delivered by the content source.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterRecord {
    pub name: Option<String>,
    /// Category tag as a free string ("combat", "puzzle", ...).
    pub category: Option<String>,
    /// Primary stat axis as a free string ("strength", "wisdom", ...).
    pub primary_stat: Option<String>,
    pub difficulty: Option<i32>,
    pub boss: Option<bool>,
    pub bonus_loot_chance: Option<f64>,
    pub approaches: Vec<ApproachRecord>,
}

/// One approach option as delivered by the content source.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApproachRecord {
    pub name: Option<String>,
    pub stat: Option<String>,
    pub power_multiplier: Option<f64>,
    pub risk_modifier: Option<f64>,
}

/// A whole run's worth of encounters (one dungeon floor, one arena
/// bracket, one expedition route).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterSetRecord {
    pub name: Option<String>,
    pub tier: Option<u32>,
    pub duration_secs: Option<u32>,
    pub encounters: Vec<EncounterRecord>,
}
