//! # Hall
//!
//! Immutable registry of the physical seats in one room.
//!
//! A hall is fixed at construction: seats cannot be added or removed later,
//! and duplicate seat identities are rejected up front. Screenings copy the
//! hall's seat set into their own ledger, so hall immutability is what keeps
//! every screening's tracked seat set equal to the room's real layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Seat, SeatId};
use crate::validation::validate_name;

// =============================================================================
// Hall
// =============================================================================

/// A cinema hall with its fixed seat layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hall {
    name: String,
    seats: BTreeMap<SeatId, Seat>,
}

impl Hall {
    /// Creates a hall from a seat collection.
    ///
    /// ## Rules
    /// - `name` must not be blank (stored trimmed)
    /// - at least one seat
    /// - no duplicate seat identities
    pub fn new(name: &str, seats: Vec<Seat>) -> CoreResult<Self> {
        let name = validate_name("hall name", name)?;

        let mut by_id = BTreeMap::new();
        for seat in seats {
            let id = seat.id().clone();
            if by_id.insert(id.clone(), seat).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "seat id".to_string(),
                    value: id.to_string(),
                }
                .into());
            }
        }

        if by_id.is_empty() {
            return Err(ValidationError::Blank {
                field: "seats".to_string(),
            }
            .into());
        }

        Ok(Hall { name, seats: by_id })
    }

    /// Returns the hall name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a seat by identity.
    ///
    /// Fails with `SeatNotInHall` for identities outside this hall.
    pub fn seat(&self, id: &SeatId) -> CoreResult<&Seat> {
        self.seats.get(id).ok_or_else(|| CoreError::SeatNotInHall {
            hall: self.name.clone(),
            seat: id.clone(),
        })
    }

    /// Returns all seats in row-then-number order.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.values()
    }

    /// Returns all seat identities in row-then-number order.
    pub fn seat_ids(&self) -> impl Iterator<Item = &SeatId> {
        self.seats.keys()
    }

    /// Returns the number of seats.
    #[inline]
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
