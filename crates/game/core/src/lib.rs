//! Deterministic encounter-resolution and reward-economy engine.
//!
//! `venture-core` defines the canonical rules (party power, success
//! resolution, rewards, run sessions) and exposes pure APIs that can be
//! reused by the runtime and offline tools. All session mutation flows
//! through [`session::RunMachine`], and supporting crates depend on the
//! types re-exported here.
pub mod apply;
pub mod config;
pub mod encounter;
pub mod env;
pub mod error;
pub mod resolve;
pub mod reward;
pub mod session;
pub mod state;
pub mod stats;

pub use apply::{AppliedRewards, apply_hp_losses, apply_party, apply_rewards};
pub use config::EngineConfig;
pub use encounter::{Approach, EncounterCategory, EncounterDefinition};
pub use env::{
    BalanceTables, ChanceParams, DamageParams, Env, LevelParams, PcgRng, RewardParams, RngOracle,
    TablesOracle, compute_seed,
};
pub use error::{CoreError, ErrorSeverity};
pub use resolve::{apply_damage, failure_damage, resolve_success, success_chance};
pub use reward::{
    CardDrop, EquipmentDrop, EquipmentSlot, MaterialDrop, Rarity, RewardBundle, RewardItem,
    StepContext, StepResult, compute_step_reward, narrative_line,
};
pub use session::{
    AdvanceError, ClaimError, RECORD_VERSION, RaidAttackResult, RaidBoss, RaidContribution,
    RaidWeek, ResolutionStrategy, ResumeError, RunMachine, RunMode, RunSession, RunStatus,
    StartError, StartParams,
};
pub use state::{AttemptCounters, Character, CharacterId, Inventory, SessionId};
pub use stats::{
    ClassKind, PartyMember, StatBlock, StatType, compute_party_power, compute_raw_party_power,
};
