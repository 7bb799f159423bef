//! Persistent character state.
//!
//! This module owns the data structures that outlive any single run:
//! characters, wallets, inventories, and attempt counters. Run sessions
//! borrow read-only projections of this state and mutate it exclusively
//! through reward application (see [`crate::apply`]).

mod character;
mod counters;
mod inventory;

pub use character::{Character, CharacterId};
pub use counters::AttemptCounters;
pub use inventory::Inventory;

/// Identity of one run session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionId(pub u64);

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "run-{}", self.0)
    }
}
