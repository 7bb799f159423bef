//! Orchestration layer over the encounter engine.
//!
//! `venture-runtime` owns everything the pure core delegates outward:
//! wall-clock conversions, attempt gating, session persistence with
//! fail-closed resume, per-character claim locking, and the ports the
//! hosting application implements (profile store, notification scheduler,
//! content source). The presentation layer binds to the plain snapshot
//! types in [`views`].

pub mod clock;
pub mod error;
pub mod events;
pub mod ports;
pub mod repository;
pub mod service;
pub mod views;

pub use clock::{day_number, now_unix, raid_week};
pub use error::{GatingError, Result, RuntimeError};
pub use events::{RewardEvent, reward_events};
pub use ports::{CharacterSnapshot, ContentSource, ProfileStore, Scheduler};
pub use repository::{
    FileSessionRepository, InMemorySessionRepository, RepositoryError, SessionRepository,
};
pub use service::{ClaimOutcome, RunService};
pub use views::{RewardView, SessionView, StepView, session_view};
