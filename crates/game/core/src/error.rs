//! Common error infrastructure for folktale-core.
//!
//! Domain errors (`ActionError`, `InventoryError`, `DialogueError`, ...) are
//! defined next to the operations they validate. Every one of them is an
//! expected outcome: the operation is rejected and state is left untouched.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later (cooldown, stamina)
/// - **Validation**: the request itself is invalid (bad slot index, empty slot)
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: the session cannot continue (invalid configuration)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug rather than a rejected request.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all folktale-core errors.
///
/// Implementors derive `thiserror::Error` for Display and classify each
/// variant by recoverability, not by impact.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs, cues and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
