//! # Screening
//!
//! One scheduled showing of a movie in a hall, owning the seat lifecycle
//! for exactly that showing.
//!
//! ## Seat Ledger
//! ```text
//! Screening
//! ├── seat_states    SeatId -> Free | Reserved | Sold
//! │                  (initialized Free for every hall seat; the key set
//! │                   never changes for the screening's lifetime)
//! └── reservations   reservation_id -> Reservation (live holds only)
//! ```
//!
//! Both live behind one mutex per screening instance: reserve, cancel and
//! purchase are check-then-act atomic against concurrent callers, and their
//! whole-set precondition checks run before any mutation. Operations on
//! different screenings do not contend.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::hall::Hall;
use crate::pricing::TicketFactory;
use crate::sales::{Buyer, Reservation, ScreeningSnapshot, TicketOrder};
use crate::types::{Movie, ScreeningClass, ScreeningFormat, SeatId, SeatStatus};
use crate::validation::validate_seat_selection;
use crate::CLEANING_BREAK_MIN;

// =============================================================================
// Occupancy Summary
// =============================================================================

/// Per-status seat counts for one screening.
///
/// `free + reserved + sold` always equals the hall's seat count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Occupancy {
    pub free: usize,
    pub reserved: usize,
    pub sold: usize,
}

impl Occupancy {
    /// Total number of tracked seats.
    #[inline]
    pub const fn total(&self) -> usize {
        self.free + self.reserved + self.sold
    }
}

// =============================================================================
// Sales Ledger (internal)
// =============================================================================

/// Mutable per-screening state: seat statuses plus live reservations.
///
/// Only reachable through the validated operations below; no direct setter
/// is exposed anywhere.
#[derive(Debug)]
struct SalesLedger {
    seat_states: BTreeMap<SeatId, SeatStatus>,
    reservations: HashMap<String, Reservation>,
}

impl SalesLedger {
    /// Ensures every id exists in this screening. Read-only.
    fn ensure_known(&self, seat_ids: &BTreeSet<SeatId>) -> CoreResult<()> {
        for id in seat_ids {
            if !self.seat_states.contains_key(id) {
                return Err(CoreError::SeatNotInScreening { seat: id.clone() });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Screening
// =============================================================================

/// A scheduled showing with its own seat ledger and reservation store.
///
/// Shared as `Arc<Screening>`; all seat operations take `&self` and
/// serialize on the internal ledger mutex.
#[derive(Debug)]
pub struct Screening {
    screening_id: String,
    movie: Arc<Movie>,
    hall: Arc<Hall>,
    starts_at: DateTime<Utc>,
    format: ScreeningFormat,
    class: ScreeningClass,
    ledger: Mutex<SalesLedger>,
}

impl Screening {
    /// Creates a screening with every hall seat `Free`.
    ///
    /// The ledger's key set is copied from the hall here and is fixed for
    /// the screening's lifetime.
    pub fn new(
        movie: Arc<Movie>,
        hall: Arc<Hall>,
        starts_at: DateTime<Utc>,
        format: ScreeningFormat,
        class: ScreeningClass,
    ) -> Self {
        let seat_states = hall
            .seat_ids()
            .map(|id| (id.clone(), SeatStatus::Free))
            .collect();

        Screening {
            screening_id: Uuid::new_v4().to_string(),
            movie,
            hall,
            starts_at,
            format,
            class,
            ledger: Mutex::new(SalesLedger {
                seat_states,
                reservations: HashMap::new(),
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the screening identifier.
    #[inline]
    pub fn screening_id(&self) -> &str {
        &self.screening_id
    }

    /// Returns the movie being shown.
    #[inline]
    pub fn movie(&self) -> &Arc<Movie> {
        &self.movie
    }

    /// Returns the hosting hall.
    #[inline]
    pub fn hall(&self) -> &Arc<Hall> {
        &self.hall
    }

    /// Returns the start instant.
    #[inline]
    pub const fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// Returns the projection format.
    #[inline]
    pub const fn format(&self) -> ScreeningFormat {
        self.format
    }

    /// Returns the service class.
    #[inline]
    pub const fn class(&self) -> ScreeningClass {
        self.class
    }

    /// Derived end instant: start + runtime + cleaning break.
    ///
    /// Never stored; the hall is occupied until this instant for scheduling
    /// purposes.
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.starts_at + Duration::minutes(self.movie.duration_min() + CLEANING_BREAK_MIN)
    }

    /// Frozen view for embedding in tickets.
    pub fn snapshot(&self) -> ScreeningSnapshot {
        ScreeningSnapshot {
            screening_id: self.screening_id.clone(),
            movie_title: self.movie.title().to_string(),
            hall_name: self.hall.name().to_string(),
            starts_at: self.starts_at,
            format: self.format,
            class: self.class,
        }
    }

    // -------------------------------------------------------------------------
    // Seat Ledger Queries
    // -------------------------------------------------------------------------

    /// Returns the current status of one seat.
    ///
    /// Fails with `SeatNotInScreening` for identities outside the hall's
    /// seat set.
    pub fn seat_status(&self, seat_id: &SeatId) -> CoreResult<SeatStatus> {
        let ledger = self.lock_ledger();
        ledger
            .seat_states
            .get(seat_id)
            .copied()
            .ok_or_else(|| CoreError::SeatNotInScreening {
                seat: seat_id.clone(),
            })
    }

    /// Returns a snapshot of the currently free seat identities.
    ///
    /// A snapshot, not a live view: later mutations do not show up in the
    /// returned set.
    pub fn free_seats(&self) -> BTreeSet<SeatId> {
        let ledger = self.lock_ledger();
        ledger
            .seat_states
            .iter()
            .filter(|(_, status)| **status == SeatStatus::Free)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Returns per-status seat counts.
    pub fn occupancy(&self) -> Occupancy {
        let ledger = self.lock_ledger();
        let mut counts = Occupancy {
            free: 0,
            reserved: 0,
            sold: 0,
        };
        for status in ledger.seat_states.values() {
            match status {
                SeatStatus::Free => counts.free += 1,
                SeatStatus::Reserved => counts.reserved += 1,
                SeatStatus::Sold => counts.sold += 1,
            }
        }
        counts
    }

    /// Number of live reservations.
    pub fn reservation_count(&self) -> usize {
        self.lock_ledger().reservations.len()
    }

    // -------------------------------------------------------------------------
    // Reservation Management
    // -------------------------------------------------------------------------

    /// Reserves a set of seats for a buyer.
    ///
    /// ## Rules
    /// - the set must not be empty
    /// - every seat must exist in this screening
    /// - every seat must currently be `Free`
    ///
    /// The whole set is checked before any mutation: if any seat fails, no
    /// seat is touched and no reservation is created.
    pub fn reserve_seats(
        &self,
        buyer: &dyn Buyer,
        seat_ids: BTreeSet<SeatId>,
    ) -> CoreResult<Reservation> {
        validate_seat_selection(&seat_ids)?;

        let mut ledger = self.lock_ledger();
        ledger.ensure_known(&seat_ids)?;
        for id in &seat_ids {
            let status = ledger.seat_states[id];
            if status != SeatStatus::Free {
                return Err(CoreError::SeatNotFree {
                    seat: id.clone(),
                    status,
                });
            }
        }

        for id in &seat_ids {
            ledger.seat_states.insert(id.clone(), SeatStatus::Reserved);
        }

        let reservation = Reservation::new(
            &Uuid::new_v4().to_string(),
            &self.screening_id,
            &buyer.display_name(),
            seat_ids,
            Utc::now(),
        )?;
        ledger
            .reservations
            .insert(reservation.reservation_id().to_string(), reservation.clone());

        Ok(reservation)
    }

    /// Cancels a reservation and frees its still-reserved seats.
    ///
    /// Seats of the reservation that were sold in the meantime stay `Sold`:
    /// cancellation never downgrades a sale.
    pub fn cancel_reservation(&self, reservation_id: &str) -> CoreResult<()> {
        let mut ledger = self.lock_ledger();

        let reservation = ledger.reservations.remove(reservation_id).ok_or_else(|| {
            CoreError::ReservationNotFound {
                reservation_id: reservation_id.to_string(),
            }
        })?;

        for id in reservation.seat_ids() {
            if ledger.seat_states[id] == SeatStatus::Reserved {
                ledger.seat_states.insert(id.clone(), SeatStatus::Free);
            }
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Ticket Purchase
    // -------------------------------------------------------------------------

    /// Sells a set of seats to a buyer, minting one priced ticket per seat.
    ///
    /// ## Rules
    /// - the set must not be empty
    /// - every seat must exist in this screening
    /// - no seat may already be `Sold`
    ///
    /// `Free` and `Reserved` seats are both eligible: purchase may consume a
    /// seat held by a different buyer's reservation, silently overriding the
    /// hold. A later cancellation of that reservation leaves the sold seats
    /// `Sold`.
    ///
    /// All tickets are minted before any seat changes status, so a pricing
    /// failure leaves the ledger untouched. On success every seat becomes
    /// `Sold`, one order is returned, and account-bearing buyers receive the
    /// tickets in their history.
    pub fn buy_tickets(
        &self,
        buyer: &dyn Buyer,
        seat_ids: BTreeSet<SeatId>,
        ticket_factory: &TicketFactory,
    ) -> CoreResult<TicketOrder> {
        validate_seat_selection(&seat_ids)?;

        let mut ledger = self.lock_ledger();
        ledger.ensure_known(&seat_ids)?;
        for id in &seat_ids {
            if ledger.seat_states[id] == SeatStatus::Sold {
                return Err(CoreError::SeatAlreadySold { seat: id.clone() });
            }
        }

        // Mint first: factory and pricing read only immutable screening data
        // (hall layout, format, class), never this ledger.
        let mut tickets = Vec::with_capacity(seat_ids.len());
        for id in &seat_ids {
            tickets.push(ticket_factory.create_ticket(buyer, self, id)?);
        }

        for id in &seat_ids {
            ledger.seat_states.insert(id.clone(), SeatStatus::Sold);
        }

        let order = TicketOrder::new(
            &Uuid::new_v4().to_string(),
            &buyer.display_name(),
            tickets,
            Utc::now(),
        )?;
        buyer.add_tickets(order.tickets());

        Ok(order)
    }

    // -------------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------------

    fn lock_ledger(&self) -> std::sync::MutexGuard<'_, SalesLedger> {
        self.ledger.lock().expect("Screening ledger mutex poisoned")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{DefaultPricingPolicy, PricingPolicy};
    use crate::sales::{Customer, Guest};
    use crate::types::{AgeRating, LanguageOption, Seat, SeatZone};

    fn hall_a() -> Arc<Hall> {
        let seats = (1..=12)
            .map(|n| Seat::new(SeatId::new("A", n).unwrap(), SeatZone::Standard))
            .collect();
        Arc::new(Hall::new("A", seats).unwrap())
    }

    fn movie() -> Arc<Movie> {
        Arc::new(
            Movie::new(
                "James Bon: Return of the Bug",
                "Ada Lovelace",
                115,
                LanguageOption::Subtitled,
                vec!["action".to_string(), "spy".to_string()],
                AgeRating::Over12,
            )
            .unwrap(),
        )
    }

    fn screening() -> Screening {
        Screening::new(
            movie(),
            hall_a(),
            Utc::now(),
            ScreeningFormat::TwoD,
            ScreeningClass::Standard,
        )
    }

    fn factory() -> TicketFactory {
        TicketFactory::new(Box::new(DefaultPricingPolicy::new()))
    }

    fn seats(numbers: &[u32]) -> BTreeSet<SeatId> {
        numbers
            .iter()
            .map(|n| SeatId::new("A", *n).unwrap())
            .collect()
    }

    fn seat(n: u32) -> SeatId {
        SeatId::new("A", n).unwrap()
    }

    /// Pricing stub that always fails, for atomicity tests.
    #[derive(Debug)]
    struct BrokenPricing;

    impl PricingPolicy for BrokenPricing {
        fn price_for(&self, _screening: &Screening, seat: &Seat) -> CoreResult<crate::Money> {
            Err(CoreError::Pricing {
                seat: seat.id().clone(),
                reason: "tariff table unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_new_screening_has_all_seats_free() {
        let s = screening();
        assert_eq!(s.free_seats().len(), 12);
        assert_eq!(
            s.occupancy(),
            Occupancy {
                free: 12,
                reserved: 0,
                sold: 0
            }
        );
        assert_eq!(s.occupancy().total(), s.hall().seat_count());
    }

    #[test]
    fn test_ends_at_includes_cleaning_break() {
        let s = screening();
        let expected = s.starts_at() + Duration::minutes(115 + CLEANING_BREAK_MIN);
        assert_eq!(s.ends_at(), expected);
    }

    #[test]
    fn test_seat_status_unknown_seat() {
        let s = screening();
        let foreign = SeatId::new("Z", 1).unwrap();
        assert!(matches!(
            s.seat_status(&foreign).unwrap_err(),
            CoreError::SeatNotInScreening { .. }
        ));
    }

    #[test]
    fn test_reserve_transitions_seats() {
        let s = screening();
        let buyer = Customer::new("CUST-001", "Jan", "Kowalski").unwrap();

        let reservation = s.reserve_seats(&buyer, seats(&[1, 2])).unwrap();

        assert_eq!(reservation.buyer_name(), "Jan Kowalski");
        assert_eq!(reservation.screening_id(), s.screening_id());
        assert_eq!(s.seat_status(&seat(1)).unwrap(), SeatStatus::Reserved);
        assert_eq!(s.seat_status(&seat(2)).unwrap(), SeatStatus::Reserved);
        assert_eq!(s.free_seats().len(), 10);
        assert_eq!(s.reservation_count(), 1);
    }

    #[test]
    fn test_reserve_is_all_or_nothing() {
        let s = screening();
        let first = Customer::new("CUST-001", "Jan", "Kowalski").unwrap();
        let second = Customer::new("CUST-002", "Anna", "Nowak").unwrap();

        s.reserve_seats(&first, seats(&[1])).unwrap();

        // A1 is taken, so the whole {A1, A2, A3} request must fail...
        let err = s.reserve_seats(&second, seats(&[1, 2, 3])).unwrap_err();
        assert!(matches!(err, CoreError::SeatNotFree { .. }));

        // ...and leave A2/A3 untouched.
        assert_eq!(s.seat_status(&seat(2)).unwrap(), SeatStatus::Free);
        assert_eq!(s.seat_status(&seat(3)).unwrap(), SeatStatus::Free);
        assert_eq!(s.reservation_count(), 1);
    }

    #[test]
    fn test_reserve_unknown_seat_mutates_nothing() {
        let s = screening();
        let buyer = Guest::new("guest#anon").unwrap();

        let mut ids = seats(&[1, 2]);
        ids.insert(SeatId::new("Z", 9).unwrap());

        assert!(matches!(
            s.reserve_seats(&buyer, ids).unwrap_err(),
            CoreError::SeatNotInScreening { .. }
        ));
        assert_eq!(s.free_seats().len(), 12);
        assert_eq!(s.reservation_count(), 0);
    }

    #[test]
    fn test_reserve_empty_selection_rejected() {
        let s = screening();
        let buyer = Guest::new("guest#anon").unwrap();
        assert!(matches!(
            s.reserve_seats(&buyer, BTreeSet::new()).unwrap_err(),
            CoreError::Validation(_)
        ));
    }

    #[test]
    fn test_cancel_frees_reserved_seats() {
        let s = screening();
        let buyer = Customer::new("CUST-001", "Jan", "Kowalski").unwrap();

        let reservation = s.reserve_seats(&buyer, seats(&[3, 4])).unwrap();
        s.cancel_reservation(reservation.reservation_id()).unwrap();

        assert_eq!(s.seat_status(&seat(3)).unwrap(), SeatStatus::Free);
        assert_eq!(s.seat_status(&seat(4)).unwrap(), SeatStatus::Free);
        assert_eq!(s.free_seats().len(), 12);
        assert_eq!(s.reservation_count(), 0);
    }

    #[test]
    fn test_cancel_unknown_reservation() {
        let s = screening();
        assert!(matches!(
            s.cancel_reservation("no-such-id").unwrap_err(),
            CoreError::ReservationNotFound { .. }
        ));
    }

    #[test]
    fn test_cancel_leaves_sold_seats_sold() {
        let s = screening();
        let holder = Customer::new("CUST-001", "Jan", "Kowalski").unwrap();
        let jumper = Guest::new("guest#anon").unwrap();

        // Holder reserves A1+A2; a purchase jumps the hold on A1.
        let reservation = s.reserve_seats(&holder, seats(&[1, 2])).unwrap();
        s.buy_tickets(&jumper, seats(&[1]), &factory()).unwrap();

        s.cancel_reservation(reservation.reservation_id()).unwrap();

        assert_eq!(s.seat_status(&seat(1)).unwrap(), SeatStatus::Sold);
        assert_eq!(s.seat_status(&seat(2)).unwrap(), SeatStatus::Free);
    }

    #[test]
    fn test_buy_free_seats() {
        let s = screening();
        let buyer = Customer::new("CUST-003", "Piotr", "Familijny").unwrap();

        let order = s
            .buy_tickets(&buyer, seats(&[5, 6, 7, 8]), &factory())
            .unwrap();

        assert_eq!(order.tickets().len(), 4);
        for n in [5, 6, 7, 8] {
            assert_eq!(s.seat_status(&seat(n)).unwrap(), SeatStatus::Sold);
        }
        assert_eq!(
            s.occupancy(),
            Occupancy {
                free: 8,
                reserved: 0,
                sold: 4
            }
        );
        // Account-bearing buyer received the history.
        assert_eq!(buyer.tickets().len(), 4);
    }

    #[test]
    fn test_buy_jumps_foreign_reservation() {
        let s = screening();
        let holder = Customer::new("CUST-001", "Jan", "Kowalski").unwrap();
        let jumper = Customer::new("CUST-002", "Anna", "Nowak").unwrap();

        s.reserve_seats(&holder, seats(&[1, 2])).unwrap();
        let order = s.buy_tickets(&jumper, seats(&[1, 2]), &factory()).unwrap();

        assert_eq!(order.buyer_name(), "Anna Nowak");
        assert_eq!(s.seat_status(&seat(1)).unwrap(), SeatStatus::Sold);
        assert_eq!(s.seat_status(&seat(2)).unwrap(), SeatStatus::Sold);
    }

    #[test]
    fn test_buy_is_all_or_nothing_on_sold_seat() {
        let s = screening();
        let first = Guest::new("first").unwrap();
        let second = Guest::new("second").unwrap();

        s.buy_tickets(&first, seats(&[1]), &factory()).unwrap();

        let err = s
            .buy_tickets(&second, seats(&[1, 2]), &factory())
            .unwrap_err();
        assert!(matches!(err, CoreError::SeatAlreadySold { .. }));
        assert_eq!(s.seat_status(&seat(2)).unwrap(), SeatStatus::Free);
    }

    #[test]
    fn test_pricing_failure_leaves_ledger_untouched() {
        let s = screening();
        let buyer = Guest::new("guest#anon").unwrap();
        let broken = TicketFactory::new(Box::new(BrokenPricing));

        let err = s.buy_tickets(&buyer, seats(&[1, 2]), &broken).unwrap_err();
        assert!(matches!(err, CoreError::Pricing { .. }));

        assert_eq!(s.seat_status(&seat(1)).unwrap(), SeatStatus::Free);
        assert_eq!(s.seat_status(&seat(2)).unwrap(), SeatStatus::Free);
        assert_eq!(s.free_seats().len(), 12);
    }

    #[test]
    fn test_occupancy_counts_always_sum_to_hall_size() {
        let s = screening();
        let buyer = Customer::new("CUST-001", "Jan", "Kowalski").unwrap();

        let r = s.reserve_seats(&buyer, seats(&[1, 2])).unwrap();
        assert_eq!(s.occupancy().total(), 12);

        s.buy_tickets(&buyer, seats(&[3, 4]), &factory()).unwrap();
        assert_eq!(s.occupancy().total(), 12);

        s.cancel_reservation(r.reservation_id()).unwrap();
        assert_eq!(s.occupancy().total(), 12);
    }

    /// End-to-end walk through the seat lifecycle of one screening.
    #[test]
    fn test_seat_lifecycle_end_to_end() {
        let s = screening();
        let x = Customer::new("CUST-001", "Xavier", "Holder").unwrap();
        let y = Customer::new("CUST-002", "Yvonne", "Late").unwrap();
        let z = Guest::new("zed").unwrap();

        // Reserve {A1, A2} for X.
        let reservation = s.reserve_seats(&x, seats(&[1, 2])).unwrap();
        assert_eq!(s.seat_status(&seat(1)).unwrap(), SeatStatus::Reserved);
        assert_eq!(s.free_seats().len(), 10);

        // Y cannot reserve A1 while X holds it.
        assert!(matches!(
            s.reserve_seats(&y, seats(&[1])).unwrap_err(),
            CoreError::SeatNotFree { .. }
        ));
        assert_eq!(s.free_seats().len(), 10);

        // X cancels: everything free again.
        s.cancel_reservation(reservation.reservation_id()).unwrap();
        assert_eq!(s.seat_status(&seat(1)).unwrap(), SeatStatus::Free);
        assert_eq!(s.free_seats().len(), 12);

        // Z buys {A1, A2}: sold, one order, two priced tickets.
        let order = s.buy_tickets(&z, seats(&[1, 2]), &factory()).unwrap();
        assert_eq!(s.seat_status(&seat(1)).unwrap(), SeatStatus::Sold);
        assert_eq!(order.tickets().len(), 2);
        for ticket in order.tickets() {
            // Standard zone, 2D, standard class.
            assert_eq!(ticket.price(), crate::Money::from_cents(2500));
        }
    }
}
