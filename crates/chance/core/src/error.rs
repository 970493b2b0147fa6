//! Common error infrastructure for chance-core.
//!
//! Domain-specific errors (`StreamError`, `DispatchError`, `RollError`,
//! `ConfigError`) live next to the code that produces them. This module holds
//! the shared classification used to decide how a caller should react.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: invalid input that should be rejected without retry
/// - **Observer**: an event handler failed; the roll itself completed
/// - **Internal**: unexpected state inconsistency that requires investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: negative stream position, malformed stream state text
    Validation,

    /// A registered observer rejected an event.
    ///
    /// The outcome that triggered the event is still valid and available.
    Observer,

    /// Unexpected state inconsistency.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Observer => "observer",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the operation that failed still produced a usable result.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Observer)
    }
}

/// Common trait for all chance-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait ChanceError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log fields and for matching in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
