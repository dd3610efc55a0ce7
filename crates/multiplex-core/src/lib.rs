//! # multiplex-core: Pure Business Logic for the Multiplex Network
//!
//! This crate is the heart of the multiplex system. It contains all business
//! logic as pure in-memory types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! apps/boxoffice (console app: wiring, logging, rendering)
//!        │
//!        ▼
//! multiplex-core (THIS CRATE)
//! ├── types      SeatId, Seat, SeatStatus, Movie, screening enums
//! ├── money      integer-cents Money (no floating point)
//! ├── hall       immutable seat registry per room
//! ├── screening  seat ledger + reservations + purchase (the hard core)
//! ├── cinema     scheduling conflict detector, programme, network
//! ├── pricing    PricingPolicy seam, default tariff, ticket factory
//! ├── sales      buyers, reservations, tickets, orders
//! └── validation / error
//!
//! NO I/O - NO DATABASE - NO NETWORK
//! ```
//!
//! ## Design Principles
//!
//! 1. **One owner per invariant**: a screening owns its seat lifecycle; a
//!    cinema owns the no-overlap rule for its halls. Nothing else may
//!    mutate either.
//! 2. **All-or-nothing operations**: every precondition is checked over the
//!    whole request before any mutation, so a failed call changes nothing.
//! 3. **Integer money**: prices are i64 cents, never floats.
//! 4. **Explicit errors**: all failures are typed enum variants, never
//!    strings or panics.
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::Utc;
//! use multiplex_core::{
//!     DefaultPricingPolicy, Guest, Hall, Movie, Screening, Seat, SeatId,
//!     SeatStatus, SeatZone, TicketFactory,
//! };
//! use multiplex_core::types::{AgeRating, LanguageOption, ScreeningClass, ScreeningFormat};
//!
//! let seats = (1..=12)
//!     .map(|n| Seat::new(SeatId::new("A", n).unwrap(), SeatZone::Standard))
//!     .collect();
//! let hall = Arc::new(Hall::new("A", seats).unwrap());
//! let movie = Arc::new(Movie::new(
//!     "Solaris", "Tarkovsky", 167,
//!     LanguageOption::Subtitled, vec![], AgeRating::Over12,
//! ).unwrap());
//!
//! let screening = Screening::new(
//!     movie, hall, Utc::now(),
//!     ScreeningFormat::TwoD, ScreeningClass::Standard,
//! );
//!
//! let buyer = Guest::new("guest#anon").unwrap();
//! let factory = TicketFactory::new(Box::new(DefaultPricingPolicy::new()));
//!
//! let seat = SeatId::new("A", 1).unwrap();
//! let order = screening
//!     .buy_tickets(&buyer, [seat.clone()].into(), &factory)
//!     .unwrap();
//!
//! assert_eq!(order.tickets().len(), 1);
//! assert_eq!(screening.seat_status(&seat).unwrap(), SeatStatus::Sold);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cinema;
pub mod error;
pub mod hall;
pub mod money;
pub mod pricing;
pub mod sales;
pub mod screening;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use multiplex_core::Screening` instead of
// `use multiplex_core::screening::Screening`.

pub use cinema::{Cinema, MultiplexNetwork};
pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use hall::Hall;
pub use money::Money;
pub use pricing::{DefaultPricingPolicy, PricingPolicy, TicketFactory};
pub use sales::{Buyer, Customer, Guest, Reservation, Ticket, TicketOrder};
pub use screening::{Occupancy, Screening};
pub use types::{Movie, Seat, SeatId, SeatStatus, SeatZone};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Cleaning break appended after a movie's runtime, in minutes.
///
/// A hall stays occupied for `runtime + CLEANING_BREAK_MIN` after a
/// screening starts; the overlap detector works on that derived interval.
/// Kept as a named constant so the buffer can be tuned without touching the
/// overlap algorithm.
pub const CLEANING_BREAK_MIN: i64 = 20;
