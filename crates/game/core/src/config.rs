/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Seconds a dungeon run takes by default when the template does not say.
    pub default_run_duration_secs: u32,
    /// Daily raid attack cap per player.
    pub raid_daily_attack_cap: u32,
}

impl EngineConfig {
    // ===== compile-time caps =====
    /// Maximum party size for any run.
    pub const MAX_PARTY_SIZE: usize = 4;
    /// Maximum steps in one run (rooms, waves, or stages).
    pub const MAX_STEPS: usize = 50;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_RUN_DURATION_SECS: u32 = 600;
    pub const DEFAULT_RAID_DAILY_ATTACK_CAP: u32 = 3;

    pub fn new() -> Self {
        Self {
            default_run_duration_secs: Self::DEFAULT_RUN_DURATION_SECS,
            raid_daily_attack_cap: Self::DEFAULT_RAID_DAILY_ATTACK_CAP,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
