//! Error types for the frontdesk library.
//!
//! This module provides the error hierarchy for all reservation and
//! availability operations, using `thiserror` for ergonomic error handling.
//! The variants follow the four failure kinds the core distinguishes:
//! not-found, invalid-state, availability-conflict, and validation.

use chrono::NaiveDate;
use thiserror::Error;

use crate::reservation::ReservationStatus;

/// Result type alias for operations that may fail with a frontdesk error.
///
/// # Examples
///
/// ```
/// use frontdesk::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(101)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the frontdesk library.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested room, guest, or reservation does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A lifecycle transition was attempted from a disallowed status.
    #[error("cannot {action} a {status} reservation")]
    InvalidState {
        /// The transition that was attempted.
        action: &'static str,
        /// The status the reservation is currently in.
        status: ReservationStatus,
    },

    /// Check-in was attempted before the scheduled check-in date.
    #[error("cannot check in before the scheduled date ({scheduled})")]
    CheckInTooEarly {
        /// The scheduled check-in date.
        scheduled: NaiveDate,
    },

    /// The room is not available for the requested dates or party size.
    #[error("room {room} is not available for the requested dates")]
    RoomUnavailable {
        /// The room number (or id when the number is unknown).
        room: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error indicates an unresolved identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use frontdesk::Error;
    ///
    /// let err = Error::NotFound { resource: "room 404".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is an availability conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::RoomUnavailable { .. })
    }

    /// Check if this error is a disallowed lifecycle transition.
    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. } | Self::CheckInTooEarly { .. })
    }
}

/// Error type for field validation failures.
///
/// Builders return this type so callers can report the offending field;
/// it converts into [`Error::Validation`] at the library boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl From<crate::money::InvalidMoneyError> for Error {
    fn from(err: crate::money::InvalidMoneyError) -> Self {
        Self::Validation {
            field: "amount".into(),
            message: err.to_string(),
        }
    }
}
