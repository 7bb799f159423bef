//! Common error infrastructure for venture-core.
//!
//! Domain-specific errors (e.g., `StartError`, `AdvanceError`) are defined
//! in their respective modules alongside the operations they validate.
//! This module provides the shared severity classification used across all
//! of them.
//!
//! # Design Principles
//!
//! - **Type Safety**: each operation has its own error type with specific
//!   variants
//! - **Severity Classification**: errors are categorized for recovery
//!   strategies, not for impact
//! - **No I/O errors**: core functions perform no I/O and cannot fail for
//!   I/O reasons

/// Severity level of an error, used for categorization and recovery
/// strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with the same call later.
    ///
    /// Examples: a step timer that has not elapsed yet
    Recoverable,

    /// Precondition or validation error - invalid input, should not retry
    /// without changes.
    ///
    /// Examples: empty party, attempt cap reached, bad approach index
    Validation,

    /// Fatal error - persisted state is corrupt or an invariant was
    /// violated; the session must be treated as abandoned.
    ///
    /// Examples: resume record version skew, step-count mismatch
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all venture-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impls
/// - Classify severity based on recoverability, not impact
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;
}
