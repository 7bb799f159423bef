//! Failure damage calculation and application.

use crate::env::TablesOracle;

/// Calculate HP loss for a failed step.
///
/// # Formula
///
/// ```text
/// base  = difficulty / difficulty_divisor + max(0, difficulty - power) / deficit_divisor
/// loss  = clamp(base, minimum, maximum) × risk_modifier
/// ```
///
/// truncated to an integer.
///
/// Uses the **un-multiplied** party power: an approach's power multiplier
/// raises the success roll but never softens the failure penalty. The
/// approach participates only through its risk modifier.
///
/// # Arguments
///
/// * `power` - Raw party power, no approach multiplier applied
/// * `difficulty` - The encounter's difficulty rating
/// * `risk_modifier` - The chosen approach's risk multiplier (1.0 when none)
/// * `tables` - Balance parameters oracle
pub fn failure_damage(
    power: i32,
    difficulty: i32,
    risk_modifier: f64,
    tables: &(impl TablesOracle + ?Sized),
) -> u32 {
    let params = tables.balance().damage;

    let deficit = (difficulty - power).max(0) as u32;
    let base = difficulty.max(0) as u32 / params.difficulty_divisor.max(1)
        + deficit / params.deficit_divisor.max(1);

    let clamped = base.clamp(params.minimum, params.maximum);

    (f64::from(clamped) * risk_modifier.max(0.0)) as u32
}

/// Apply damage to current HP.
///
/// # Returns
///
/// New HP value (clamped to 0)
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}
