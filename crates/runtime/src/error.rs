//! Runtime error taxonomy.

use venture_core::{AdvanceError, ClaimError, ResumeError, StartError};

use crate::repository::RepositoryError;

/// Errors surfaced by the orchestration layer.
///
/// Engine errors pass through typed; gating rejections are preconditions
/// the caller presents to the player; repository problems carry the
/// fail-closed resume story.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("precondition not met: {0}")]
    Gating(#[from] GatingError),

    #[error(transparent)]
    Start(#[from] StartError),

    #[error(transparent)]
    Advance(#[from] AdvanceError),

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error("session record rejected: {0}")]
    InvalidResume(#[from] ResumeError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("session {0} not found")]
    SessionNotFound(venture_core::SessionId),
}

/// Attempt-cap and cost preconditions checked before a session exists.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GatingError {
    #[error("free arena attempt already used today")]
    ArenaTicketUsed,

    #[error("no expedition keys in hand")]
    NoExpeditionKey,

    #[error("daily raid attack cap of {cap} reached")]
    RaidCapReached { cap: u32 },

    #[error("the raid boss has rotated to a new week")]
    RaidWeekOver,

    #[error("the raid boss is already defeated")]
    RaidBossDefeated,

    #[error("character is unconscious")]
    Unconscious,
}

/// Convenience alias used across the runtime crate.
pub type Result<T> = core::result::Result<T, RuntimeError>;
