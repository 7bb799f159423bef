//! Content definitions, normalization, and loaders.
//!
//! This crate sits between external content (remotely delivered records,
//! RON/TOML data files) and the engine's [`venture_core::EncounterDefinition`]:
//! - Raw records with string-typed enums, tolerant of partial data
//! - A total adapter: malformed records degrade to safe defaults instead
//!   of failing the conversion, so gameplay survives bad remote content
//! - A compiled-in fallback catalog used when no content source answers
//!
//! Content is consumed by the runtime and never appears in session state.

pub mod builtin;

#[cfg(feature = "serde")]
pub mod adapter;
#[cfg(feature = "serde")]
pub mod records;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use builtin::{arena_waves, default_approaches, dungeon_floor, expedition_stages};

#[cfg(feature = "serde")]
pub use adapter::{EncounterSet, to_approach, to_encounter_definition, to_encounter_set};
#[cfg(feature = "serde")]
pub use records::{ApproachRecord, EncounterRecord, EncounterSetRecord};

#[cfg(feature = "loaders")]
pub use loaders::{EncounterSetLoader, TablesLoader};
