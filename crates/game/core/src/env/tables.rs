//! Balance tables oracle.
//!
//! All tunable numbers used by the resolver and reward calculator live in
//! [`BalanceTables`]. The engine reads them through [`TablesOracle`] so
//! hosts can swap in remotely delivered tuning without touching core code.

/// Oracle providing game rules and balance tables.
///
/// This oracle defines resolution and economy tuning. It does NOT define
/// content data (encounter templates arrive through the content adapter).
pub trait TablesOracle: Send + Sync {
    fn balance(&self) -> &BalanceTables;
}

/// Complete set of balance parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalanceTables {
    pub chance: ChanceParams,
    pub damage: DamageParams,
    pub reward: RewardParams,
    pub level: LevelParams,
}

impl Default for BalanceTables {
    fn default() -> Self {
        Self {
            chance: ChanceParams::default(),
            damage: DamageParams::default(),
            reward: RewardParams::default(),
            level: LevelParams::default(),
        }
    }
}

impl TablesOracle for BalanceTables {
    fn balance(&self) -> &BalanceTables {
        self
    }
}

/// Success chance curve parameters.
///
/// The curve is piecewise-linear in `power - difficulty`:
///
/// ```text
/// chance = center + (power - difficulty) / (4 × band)
/// clamped to [floor, ceiling]
/// ```
///
/// With the default band of 25, one point of stat advantage moves the
/// chance by one percent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChanceParams {
    /// Chance when power equals difficulty.
    pub center: f64,
    /// Stat-point half-band controlling the slope.
    pub band: i32,
    /// Lower clamp; success is never impossible.
    pub floor: f64,
    /// Upper clamp; success is never guaranteed.
    pub ceiling: f64,
}

impl Default for ChanceParams {
    fn default() -> Self {
        Self {
            center: 0.5,
            band: 25,
            floor: 0.05,
            ceiling: 0.95,
        }
    }
}

/// Failure damage parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageParams {
    /// Minimum HP loss on a failed step.
    pub minimum: u32,
    /// Maximum HP loss on a failed step (before the risk modifier).
    pub maximum: u32,
    /// Divisor applied to difficulty for the base term.
    pub difficulty_divisor: u32,
    /// Divisor applied to the power deficit term.
    pub deficit_divisor: u32,
}

impl Default for DamageParams {
    fn default() -> Self {
        Self {
            minimum: 5,
            maximum: 25,
            difficulty_divisor: 4,
            deficit_divisor: 2,
        }
    }
}

/// Reward scaling parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardParams {
    /// Experience for step 0 at tier 1.
    pub base_exp: u32,
    /// Experience added per step index.
    pub exp_step_scale: u32,
    /// Gold for step 0 at tier 1.
    pub base_gold: u32,
    /// Gold added per step index.
    pub gold_step_scale: u32,
    /// Multiplier applied on boss/milestone steps.
    pub boss_multiplier: u32,
    /// Approach power multipliers above this threshold earn a reward bonus.
    pub risky_threshold: f64,
    /// Baseline equipment drop chance.
    pub equipment_drop_chance: f64,
    /// Baseline material drop chance.
    pub material_drop_chance: f64,
    /// Baseline card drop chance.
    pub card_drop_chance: f64,
    /// Bond experience granted per successful cooperative step.
    pub bond_exp_per_step: u32,
}

impl Default for RewardParams {
    fn default() -> Self {
        Self {
            base_exp: 20,
            exp_step_scale: 8,
            base_gold: 10,
            gold_step_scale: 4,
            boss_multiplier: 2,
            risky_threshold: 1.1,
            equipment_drop_chance: 0.12,
            material_drop_chance: 0.30,
            card_drop_chance: 0.06,
            bond_exp_per_step: 5,
        }
    }
}

/// Level progression parameters.
///
/// ```text
/// exp_to_next(level) = base_threshold + level × per_level
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelParams {
    pub base_threshold: u32,
    pub per_level: u32,
}

impl LevelParams {
    /// Experience required to advance from `level` to `level + 1`.
    pub fn exp_to_next(&self, level: u32) -> u32 {
        self.base_threshold + level * self.per_level
    }
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            base_threshold: 80,
            per_level: 10,
        }
    }
}
