//! # Sales Records & Buyers
//!
//! The records produced by the seat lifecycle (reservations, tickets,
//! orders) and the buyer capability they are issued to.
//!
//! Records reference their screening and buyer by identifier plus frozen
//! display snapshot, not by live object. The snapshot is captured at
//! creation time, so a ticket keeps showing the movie title and start time
//! it was sold for.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::money::Money;
use crate::types::{ScreeningClass, ScreeningFormat, SeatId};
use crate::validation::{validate_name, validate_seat_selection};

// =============================================================================
// Buyer Capability
// =============================================================================

/// A party that reserves or buys seats.
///
/// Account-bearing buyers override `add_tickets` to persist their purchase
/// history; anonymous buyers keep the default no-op. Purchase logic treats
/// the absence of an account as normal, never as an error.
pub trait Buyer: fmt::Debug + Send + Sync {
    /// Human-readable name for receipts and logs.
    fn display_name(&self) -> String;

    /// Appends freshly minted tickets to the buyer's history.
    ///
    /// Default is a no-op for buyers without an account.
    fn add_tickets(&self, _tickets: &[Ticket]) {}
}

// =============================================================================
// Customer (account-bearing buyer)
// =============================================================================

/// A registered customer with a ticket history.
#[derive(Debug)]
pub struct Customer {
    customer_id: String,
    first_name: String,
    last_name: String,
    /// Guarded: `add_tickets` runs through `&dyn Buyer` during purchase.
    tickets: Mutex<Vec<Ticket>>,
}

impl Customer {
    /// Creates a customer. All fields must be non-blank.
    pub fn new(customer_id: &str, first_name: &str, last_name: &str) -> ValidationResult<Self> {
        Ok(Customer {
            customer_id: validate_name("customer_id", customer_id)?,
            first_name: validate_name("first_name", first_name)?,
            last_name: validate_name("last_name", last_name)?,
            tickets: Mutex::new(Vec::new()),
        })
    }

    /// Returns the customer identifier.
    #[inline]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Returns a snapshot of the customer's ticket history.
    pub fn tickets(&self) -> Vec<Ticket> {
        self.tickets.lock().expect("Customer mutex poisoned").clone()
    }
}

impl Buyer for Customer {
    fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn add_tickets(&self, tickets: &[Ticket]) {
        self.tickets
            .lock()
            .expect("Customer mutex poisoned")
            .extend_from_slice(tickets);
    }
}

// =============================================================================
// Guest (anonymous buyer)
// =============================================================================

/// An anonymous buyer identified only by an alias.
///
/// Keeps the default `add_tickets` no-op: guest purchases are handed over
/// and not tracked.
#[derive(Debug)]
pub struct Guest {
    alias: String,
}

impl Guest {
    /// Creates a guest with a non-blank alias.
    pub fn new(alias: &str) -> ValidationResult<Self> {
        Ok(Guest {
            alias: validate_name("alias", alias)?,
        })
    }
}

impl Buyer for Guest {
    fn display_name(&self) -> String {
        self.alias.clone()
    }
}

// =============================================================================
// Screening Snapshot
// =============================================================================

/// Frozen view of a screening, embedded in tickets.
///
/// Captured at mint time so the ticket's display data survives independent
/// of the live screening object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningSnapshot {
    pub screening_id: String,
    pub movie_title: String,
    pub hall_name: String,
    pub starts_at: DateTime<Utc>,
    pub format: ScreeningFormat,
    pub class: ScreeningClass,
}

// =============================================================================
// Reservation
// =============================================================================

/// A temporary hold on a set of seats for one buyer.
///
/// Created only by a successful reserve operation; removed only by
/// cancellation. The seat set is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    reservation_id: String,
    screening_id: String,
    buyer_name: String,
    seat_ids: BTreeSet<SeatId>,
    created_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a reservation record.
    ///
    /// ## Rules
    /// - identifiers and buyer name must be non-blank
    /// - the seat set must not be empty
    pub fn new(
        reservation_id: &str,
        screening_id: &str,
        buyer_name: &str,
        seat_ids: BTreeSet<SeatId>,
        created_at: DateTime<Utc>,
    ) -> ValidationResult<Self> {
        validate_seat_selection(&seat_ids)?;

        Ok(Reservation {
            reservation_id: validate_name("reservation_id", reservation_id)?,
            screening_id: validate_name("screening_id", screening_id)?,
            buyer_name: validate_name("buyer_name", buyer_name)?,
            seat_ids,
            created_at,
        })
    }

    /// Returns the reservation identifier.
    #[inline]
    pub fn reservation_id(&self) -> &str {
        &self.reservation_id
    }

    /// Returns the owning screening's identifier.
    #[inline]
    pub fn screening_id(&self) -> &str {
        &self.screening_id
    }

    /// Returns the buyer display name captured at creation.
    #[inline]
    pub fn buyer_name(&self) -> &str {
        &self.buyer_name
    }

    /// Returns the held seat identities.
    #[inline]
    pub fn seat_ids(&self) -> &BTreeSet<SeatId> {
        &self.seat_ids
    }

    /// Returns the creation timestamp.
    #[inline]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// =============================================================================
// Ticket
// =============================================================================

/// A priced ticket for one seat of one screening. Immutable once minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: String,
    pub screening: ScreeningSnapshot,
    pub seat_id: SeatId,
    /// Buyer display name at mint time (frozen).
    pub buyer_name: String,
    /// Price in cents at mint time (frozen).
    pub price_cents: i64,
}

impl Ticket {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Ticket Order
// =============================================================================

/// One completed purchase: a non-empty batch of tickets for one buyer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketOrder {
    order_id: String,
    buyer_name: String,
    tickets: Vec<Ticket>,
    created_at: DateTime<Utc>,
}

impl TicketOrder {
    /// Creates an order from minted tickets.
    ///
    /// ## Rules
    /// - identifier and buyer name must be non-blank
    /// - the ticket list must not be empty
    pub fn new(
        order_id: &str,
        buyer_name: &str,
        tickets: Vec<Ticket>,
        created_at: DateTime<Utc>,
    ) -> ValidationResult<Self> {
        if tickets.is_empty() {
            return Err(crate::error::ValidationError::Blank {
                field: "tickets".to_string(),
            });
        }

        Ok(TicketOrder {
            order_id: validate_name("order_id", order_id)?,
            buyer_name: validate_name("buyer_name", buyer_name)?,
            tickets,
            created_at,
        })
    }

    /// Returns the order identifier.
    #[inline]
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Returns the buyer display name captured at purchase.
    #[inline]
    pub fn buyer_name(&self) -> &str {
        &self.buyer_name
    }

    /// Returns the tickets in this order.
    #[inline]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Sums the ticket prices.
    pub fn total(&self) -> Money {
        self.tickets.iter().map(Ticket::price).sum()
    }

    /// Returns the creation timestamp.
    #[inline]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
