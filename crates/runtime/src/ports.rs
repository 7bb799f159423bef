//! Boundary contracts to external collaborators.
//!
//! The engine itself never performs I/O; these ports are the seams where
//! the hosting application plugs in its cloud profile store, notification
//! scheduler, and remote content service. Calls are fire-and-forget from
//! the engine's point of view — retry and backoff policy live entirely on
//! the collaborator side.

use async_trait::async_trait;

use venture_content::records::EncounterSetRecord;
use venture_core::{Character, CharacterId, EquipmentDrop, RunMode};

/// Plain snapshot pushed to and pulled from the profile store.
///
/// The store treats this as an opaque versioned document; the runtime
/// produces and consumes it whole.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CharacterSnapshot {
    pub character: Character,
    /// Unix seconds when the snapshot was taken.
    pub taken_at: i64,
}

/// Cloud persistence for character state.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_character_snapshot(&self, id: CharacterId) -> Option<CharacterSnapshot>;
    async fn fetch_owned_equipment(&self, id: CharacterId) -> Vec<EquipmentDrop>;
    async fn push_character_snapshot(&self, snapshot: CharacterSnapshot);
    async fn push_equipment_change(&self, id: CharacterId, piece: EquipmentDrop);
}

/// Local notification scheduling.
///
/// The runtime only supplies `fire_at` values computed from its own
/// duration math (run start + duration).
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn schedule_notification(&self, title: &str, body: &str, fire_at: i64);
}

/// Remotely delivered encounter content.
///
/// Returning `None` (source unreachable, empty payload) falls back to the
/// compiled-in catalog; malformed records inside a payload are normalized
/// by the content adapter.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_encounter_set(&self, mode: RunMode, tier: u32) -> Option<EncounterSetRecord>;
}

/// No-op collaborators for tests and offline play.
pub mod null {
    use super::*;

    /// Discards snapshots, returns nothing.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct NullProfileStore;

    #[async_trait]
    impl ProfileStore for NullProfileStore {
        async fn fetch_character_snapshot(&self, _id: CharacterId) -> Option<CharacterSnapshot> {
            None
        }

        async fn fetch_owned_equipment(&self, _id: CharacterId) -> Vec<EquipmentDrop> {
            Vec::new()
        }

        async fn push_character_snapshot(&self, _snapshot: CharacterSnapshot) {}

        async fn push_equipment_change(&self, _id: CharacterId, _piece: EquipmentDrop) {}
    }

    /// Swallows notification requests.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct NullScheduler;

    #[async_trait]
    impl Scheduler for NullScheduler {
        async fn schedule_notification(&self, _title: &str, _body: &str, _fire_at: i64) {}
    }

    /// Always falls back to the built-in catalog.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct NullContentSource;

    #[async_trait]
    impl ContentSource for NullContentSource {
        async fn fetch_encounter_set(
            &self,
            _mode: RunMode,
            _tier: u32,
        ) -> Option<EncounterSetRecord> {
            None
        }
    }
}
