//! Success resolution system.
//!
//! This module provides pure functions for converting a power-vs-difficulty
//! comparison into a success probability and a resolved outcome. All logic
//! is deterministic given an RNG draw and side-effect free.
//!
//! # Core Functions
//!
//! - `success_chance`: clamped probability from power vs difficulty
//! - `resolve_success`: one uniform draw against the chance
//! - `failure_damage`: HP loss on failure (un-multiplied power, risk-scaled)
//! - `apply_damage`: HP reduction (clamped to 0)

mod chance;
mod damage;

pub use chance::{resolve_success, success_chance};
pub use damage::{apply_damage, failure_damage};
