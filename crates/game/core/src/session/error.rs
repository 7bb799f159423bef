//! Session transition and resume errors.

use crate::error::{CoreError, ErrorSeverity};

/// Errors rejecting run creation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartError {
    #[error("cannot start a run with an empty party")]
    EmptyParty,

    #[error("party size {found} exceeds the maximum of {max}")]
    PartyTooLarge { found: usize, max: usize },

    #[error("cannot start a run with no steps")]
    NoSteps,

    #[error("step count {found} exceeds the maximum of {max}")]
    TooManySteps { found: usize, max: usize },

    #[error("every party member is unconscious")]
    PartyDefeated,

    #[error("run duration must be non-zero")]
    ZeroDuration,
}

impl CoreError for StartError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Errors rejecting a step advance or a finalize call.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdvanceError {
    #[error("run is not in progress")]
    NotInProgress,

    #[error("step timer has {remaining_secs}s remaining")]
    TimerNotElapsed { remaining_secs: u64 },

    #[error("all steps are already resolved")]
    AllStepsResolved,

    #[error("approach index {index} is out of range ({available} available)")]
    InvalidApproach { index: usize, available: usize },

    #[error("pre-rolled runs reveal results by time; they cannot be advanced")]
    NotLiveMode,

    #[error("live runs resolve step by step; they cannot be finalized in bulk")]
    NotPreRolledMode,
}

impl CoreError for AdvanceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TimerNotElapsed { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }
}

/// Errors rejecting reward claims.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClaimError {
    #[error("run is still in progress; rewards are not resolvable yet")]
    NotResolved,
}

impl CoreError for ClaimError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Errors detected when validating a persisted session record.
///
/// Any of these means the record cannot be trusted; the caller must fail
/// closed and treat the run as abandoned rather than guess a step index.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResumeError {
    #[error("record version {found} does not match supported version {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("resolved step count {results} does not match step index {index}")]
    StepCountMismatch { results: usize, index: u32 },

    #[error("step results are not contiguous at position {position}")]
    StepIndexGap { position: usize },

    #[error("step index {index} exceeds the {steps} planned steps")]
    StepOverflow { index: u32, steps: usize },

    #[error("hp pool {hp} exceeds maximum {max}")]
    HpExceedsMaximum { hp: u32, max: u32 },

    #[error("status and completion timestamp disagree")]
    StatusConflict,

    #[error("rewards marked claimed on an unresolved run")]
    ClaimedBeforeResolution,
}

impl CoreError for ResumeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }
}
