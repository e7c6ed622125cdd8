//! Error types for the fintrack ledger.

use rust_decimal::Decimal;

use crate::models::GoalId;

/// All errors that can occur when using the ledger.
#[derive(Debug, thiserror::Error)]
pub enum FinTrackError {
    /// Input was malformed or out of range (amount, name, category, dates).
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Name of the offending input.
        field: &'static str,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// The referenced goal does not exist.
    #[error("goal not found: {0}")]
    GoalNotFound(GoalId),

    /// A withdrawal asked for more than the goal currently holds.
    #[error("insufficient funds in goal {goal}: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Goal the withdrawal targeted.
        goal: GoalId,
        /// Amount the caller tried to withdraw.
        requested: Decimal,
        /// Amount saved in the goal at the time of the request.
        available: Decimal,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage backend failed.
    #[error("storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),
}

/// Coarse classification of a [`FinTrackError`].
///
/// Lets a presentation layer pick a message without matching on payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-range input.
    Validation,
    /// Referenced entity does not exist.
    NotFound,
    /// Withdrawal exceeds the current balance.
    InsufficientFunds,
    /// Backend or serialization failure.
    Storage,
}

impl FinTrackError {
    /// Builds a [`FinTrackError::Validation`] for the given field.
    #[inline]
    pub fn validation<T: Into<String>>(field: &'static str, reason: T) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the coarse kind of this error.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match *self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::GoalNotFound(_) => ErrorKind::NotFound,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::Serialization(_) | Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, FinTrackError>;
