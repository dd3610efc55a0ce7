//! # Error Types
//!
//! Domain-specific error types for multiplex-core.
//!
//! ## Error Hierarchy
//! ```text
//! multiplex-core errors (this file)
//! ├── CoreError        - Domain rule violations (not-found, invalid seat
//! │                      state, scheduling conflicts, pricing failures)
//! └── ValidationError  - Malformed input, rejected before any state change
//!
//! Flow: ValidationError → CoreError → application layer → end user
//! ```
//!
//! Every error is detected before the operation mutates anything: a failed
//! call leaves the seat ledger, reservation store and schedule exactly as
//! they were.

use thiserror::Error;

use crate::types::{SeatId, SeatStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent domain rule violations. They should be caught and
/// translated to user-facing messages by the application layer; none of them
/// is fatal to the process.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Seat identity is not part of the hall's fixed seat set.
    #[error("Seat not found in hall '{hall}': {seat}")]
    SeatNotInHall { hall: String, seat: SeatId },

    /// Seat identity is not tracked by this screening.
    ///
    /// The screening's seat set is fixed at construction to the hall's seat
    /// set, so this also means the seat does not exist in the hall.
    #[error("Seat not found in this screening: {seat}")]
    SeatNotInScreening { seat: SeatId },

    /// Hall name does not resolve within the cinema.
    #[error("Hall not found in cinema '{cinema}': {hall}")]
    HallNotFound { cinema: String, hall: String },

    /// Cinema name does not resolve within the network.
    #[error("Cinema not found: {name}")]
    CinemaNotFound { name: String },

    /// Reservation identifier does not reference a live reservation.
    #[error("Reservation not found: {reservation_id}")]
    ReservationNotFound { reservation_id: String },

    /// Reservation attempted on a seat that is not `Free`.
    #[error("Seat {seat} is not free (currently {status:?})")]
    SeatNotFree { seat: SeatId, status: SeatStatus },

    /// Purchase attempted on a seat that is already `Sold`.
    #[error("Seat {seat} is already sold")]
    SeatAlreadySold { seat: SeatId },

    /// Screening's hall is not registered on the cinema.
    #[error("Cannot schedule screening in hall '{hall}' not registered in cinema '{cinema}'")]
    HallNotRegistered { cinema: String, hall: String },

    /// New screening's time interval overlaps an existing one in the
    /// same hall.
    #[error(
        "Screening time conflict in hall '{hall}': {existing_start} - {existing_end} \
         overlaps with {requested_start} - {requested_end}"
    )]
    ScheduleConflict {
        hall: String,
        existing_start: chrono::DateTime<chrono::Utc>,
        existing_end: chrono::DateTime<chrono::Utc>,
        requested_start: chrono::DateTime<chrono::Utc>,
        requested_end: chrono::DateTime<chrono::Utc>,
    },

    /// Pricing collaborator failed to produce a price for a seat.
    ///
    /// Surfaced by the purchase flow before any seat transitions to `Sold`.
    #[error("Pricing failed for seat {seat}: {reason}")]
    Pricing { seat: SeatId, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements. Used for early
/// validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing, empty or blank.
    #[error("{field} cannot be blank")]
    Blank { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A reserve/purchase request carried no seat identities.
    #[error("seat selection cannot be empty")]
    EmptySeatSelection,

    /// Duplicate value where uniqueness is required (hall names within a
    /// cinema, cinema names within a network, seat ids within a hall).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let seat = SeatId::new("a", 3).unwrap();
        let err = CoreError::SeatNotFree {
            seat,
            status: SeatStatus::Reserved,
        };
        assert_eq!(err.to_string(), "Seat A3 is not free (currently Reserved)");

        let err = CoreError::ReservationNotFound {
            reservation_id: "r-123".to_string(),
        };
        assert_eq!(err.to_string(), "Reservation not found: r-123");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Blank {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title cannot be blank");

        let err = ValidationError::EmptySeatSelection;
        assert_eq!(err.to_string(), "seat selection cannot be empty");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "number".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
