//! Success chance calculation.

use crate::env::TablesOracle;

/// Calculate the chance of succeeding at an encounter step.
///
/// # Formula
///
/// ```text
/// chance = center + (power - difficulty) / (4 × band)
/// clamped to [floor, ceiling]
/// ```
///
/// Piecewise-linear in `power - difficulty`: strictly increasing in power
/// and strictly decreasing in difficulty between the clamps, equal to the
/// center (0.5 by default) when power matches difficulty. The clamps keep
/// success from ever being certain or impossible.
///
/// # Arguments
///
/// * `power` - Aggregate party power, approach multiplier already applied
/// * `difficulty` - The encounter's difficulty rating
/// * `tables` - Balance parameters oracle
///
/// # Returns
///
/// Success probability in `[floor, ceiling]` (default `[0.05, 0.95]`)
pub fn success_chance(power: i32, difficulty: i32, tables: &(impl TablesOracle + ?Sized)) -> f64 {
    let params = tables.balance().chance;

    let diff = f64::from(power) - f64::from(difficulty);
    let slope_divisor = f64::from(4 * params.band.max(1));
    let chance = params.center + diff / slope_divisor;

    chance.clamp(params.floor, params.ceiling)
}

/// Decide success from a chance and a uniform draw in `[0, 1)`.
///
/// Success iff `roll <= chance`. The draw comes from the RNG oracle so
/// outcomes are reproducible from a seed.
pub fn resolve_success(chance: f64, roll: f64) -> bool {
    roll <= chance
}
