//! Canteen service error types.

use std::fmt;

use doc_store::StoreError;
use entities::MealType;
use thiserror::Error;

/// Why a transition was refused in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The daily cutoff has passed.
    Locked,
    /// Reconfirmation attempted outside the meal's window.
    OutsideReconfirmWindow,
    /// Reconfirmation attempted for a meal that is not opted in.
    NotOptedIn,
    /// The meal is already reconfirmed and can no longer change today.
    AlreadyReconfirmed,
    /// Opt-in attempted on a work-from-home day.
    WorkingFromHome,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::Locked => "changes are locked after the daily cutoff",
            Rejection::OutsideReconfirmWindow => "the reconfirmation window is not open",
            Rejection::NotOptedIn => "the meal is not opted in",
            Rejection::AlreadyReconfirmed => "the meal is already reconfirmed",
            Rejection::WorkingFromHome => "the day is marked as work from home",
        };
        f.write_str(s)
    }
}

/// Errors returned by canteen services.
#[derive(Debug, Error)]
pub enum CanteenError {
    /// Referenced entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Transition rejected by the current time phase or record state.
    #[error("{meal} change not permitted: {reason}")]
    NotPermitted { meal: MealType, reason: Rejection },

    /// Malformed caller input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A stored record could not be read back.
    #[error("Invalid stored record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    /// The document store failed.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

impl From<StoreError> for CanteenError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidDocument { id, reason } => Self::InvalidRecord { id, reason },
            other => Self::StoreUnavailable(other),
        }
    }
}

impl CanteenError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a not permitted error.
    pub fn not_permitted(meal: MealType, reason: Rejection) -> Self {
        Self::NotPermitted { meal, reason }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns the rejection reason if the error is a refused transition.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::NotPermitted { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Returns true if the caller may retry the operation.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StoreUnavailable(e) if e.is_transient())
    }
}

/// Result type for canteen operations.
pub type CanteenResult<T> = Result<T, CanteenError>;
