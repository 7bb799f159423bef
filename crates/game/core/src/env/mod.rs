//! Traits describing injected engine dependencies.
//!
//! Oracles expose randomness and balance tuning. The [`Env`] aggregate
//! bundles them so the resolution pipeline can access everything it needs
//! without hard coupling to concrete implementations — and without ever
//! touching a process-wide singleton.
mod rng;
mod tables;

pub use rng::{PcgRng, RngOracle, compute_seed};
pub use tables::{
    BalanceTables, ChanceParams, DamageParams, LevelParams, RewardParams, TablesOracle,
};

/// Aggregates the read-only oracles required by the resolution pipeline.
pub struct Env<'a, R, T>
where
    R: RngOracle + ?Sized,
    T: TablesOracle + ?Sized,
{
    pub rng: &'a R,
    pub tables: &'a T,
}

// Manual impls: the derived versions would demand `R: Copy`/`T: Copy`,
// which trait objects and oracle structs need not satisfy.
impl<R, T> Clone for Env<'_, R, T>
where
    R: RngOracle + ?Sized,
    T: TablesOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, T> Copy for Env<'_, R, T>
where
    R: RngOracle + ?Sized,
    T: TablesOracle + ?Sized,
{
}

impl<'a, R, T> Env<'a, R, T>
where
    R: RngOracle + ?Sized,
    T: TablesOracle + ?Sized,
{
    pub fn new(rng: &'a R, tables: &'a T) -> Self {
        Self { rng, tables }
    }

    /// Shorthand for the balance tables behind the oracle.
    pub fn balance(&self) -> &'a BalanceTables {
        self.tables.balance()
    }
}
