//! Stat model and party power.
//!
//! # Architecture
//!
//! - **StatBlock**: enum-keyed stat values; base and effective layers share
//!   the representation
//! - **PartyMember**: read-only combat projection with equipment folded in
//! - **compute_party_power**: the pure aggregate the resolver compares
//!   against encounter difficulty

mod block;
mod member;
mod power;

pub use block::{ClassKind, StatBlock, StatType};
pub use member::PartyMember;
pub use power::{LEVEL_POWER_SCALE, compute_party_power, compute_raw_party_power};
