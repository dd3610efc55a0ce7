//! # Validation Module
//!
//! Input validation utilities for multiplex-core.
//!
//! Every constructor and operation validates its input through these helpers
//! before touching any state, so a rejected call never leaves a partial
//! mutation behind.
//!
//! ## Usage
//! ```rust
//! use multiplex_core::validation::{validate_name, validate_seat_number};
//!
//! let title = validate_name("title", "  Alien  ").unwrap();
//! assert_eq!(title, "Alien");
//! validate_seat_number(12).unwrap();
//! ```

use std::collections::BTreeSet;

use crate::error::{ValidationError, ValidationResult};
use crate::types::SeatId;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required name-like field (movie title, hall name, buyer
/// alias, address).
///
/// ## Rules
/// - Must not be blank after trimming
///
/// ## Returns
/// The trimmed value.
pub fn validate_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Blank {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a seat row label.
///
/// ## Rules
/// - Must not be blank after trimming
///
/// ## Returns
/// The trimmed, uppercased row label ("a " becomes "A"), so two identities
/// written differently compare equal.
pub fn validate_seat_row(row: &str) -> ValidationResult<String> {
    let row = row.trim();

    if row.is_empty() {
        return Err(ValidationError::Blank {
            field: "row".to_string(),
        });
    }

    Ok(row.to_uppercase())
}

/// Validates a movie search query.
///
/// ## Rules
/// - Must not be blank after trimming
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    validate_name("query", query)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a seat number within a row.
pub fn validate_seat_number(number: u32) -> ValidationResult<()> {
    if number == 0 {
        return Err(ValidationError::MustBePositive {
            field: "number".to_string(),
        });
    }

    Ok(())
}

/// Validates a movie runtime in minutes.
pub fn validate_duration_min(minutes: i64) -> ValidationResult<()> {
    if minutes <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "duration_min".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a reserve/purchase seat selection.
///
/// ## Rules
/// - Must contain at least one seat identity
pub fn validate_seat_selection(seat_ids: &BTreeSet<SeatId>) -> ValidationResult<()> {
    if seat_ids.is_empty() {
        return Err(ValidationError::EmptySeatSelection);
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
