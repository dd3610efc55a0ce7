//! # Pricing & Ticket Factory
//!
//! The pricing seam of the purchase flow. `PricingPolicy` is the pluggable
//! collaborator that maps (screening, seat) to a price; `TicketFactory` is
//! the one place that knows how to mint a `Ticket` from it.
//!
//! Neither ever touches seat state: pricing reads only the immutable
//! attributes of the screening (format, class) and the seat (zone).

use std::fmt;

use uuid::Uuid;

use crate::error::CoreResult;
use crate::money::Money;
use crate::sales::{Buyer, Ticket};
use crate::screening::Screening;
use crate::types::{ScreeningClass, ScreeningFormat, Seat, SeatId, SeatZone};

// =============================================================================
// Pricing Policy
// =============================================================================

/// Maps a screening + seat to a ticket price.
///
/// ## Contract
/// - Pure with respect to seat state: implementations read the screening's
///   immutable attributes and the seat's zone, nothing else.
/// - Must not call back into the screening's seat-state operations; the
///   purchase flow invokes pricing while holding the screening's ledger
///   lock.
/// - Failures surface as `CoreError::Pricing` and abort the purchase before
///   any seat is sold.
pub trait PricingPolicy: fmt::Debug + Send + Sync {
    /// Returns the price for one seat of one screening.
    fn price_for(&self, screening: &Screening, seat: &Seat) -> CoreResult<Money>;
}

// =============================================================================
// Default Pricing Policy
// =============================================================================

/// Zone base price: standard seats.
const BASE_STANDARD: Money = Money::from_cents(2500);
/// Zone base price: VIP seats.
const BASE_VIP: Money = Money::from_cents(3500);
/// Zone base price: promo seats.
const BASE_PROMO: Money = Money::from_cents(1800);
/// Zone base price: super-promo seats.
const BASE_SUPER_PROMO: Money = Money::from_cents(1200);

/// Surcharge for 3D screenings.
const SURCHARGE_THREE_D: Money = Money::from_cents(600);
/// Surcharge for VIP-class screenings.
const SURCHARGE_VIP_CLASS: Money = Money::from_cents(1000);

/// Simple default tariff:
/// - base price by seat zone
/// - surcharge for 3D
/// - surcharge for VIP screening class
#[derive(Debug, Clone, Default)]
pub struct DefaultPricingPolicy;

impl DefaultPricingPolicy {
    /// Creates the default tariff.
    pub fn new() -> Self {
        DefaultPricingPolicy
    }

    fn base_for_zone(zone: SeatZone) -> Money {
        match zone {
            SeatZone::Standard => BASE_STANDARD,
            SeatZone::Vip => BASE_VIP,
            SeatZone::Promo => BASE_PROMO,
            SeatZone::SuperPromo => BASE_SUPER_PROMO,
        }
    }
}

impl PricingPolicy for DefaultPricingPolicy {
    fn price_for(&self, screening: &Screening, seat: &Seat) -> CoreResult<Money> {
        let mut price = Self::base_for_zone(seat.zone());

        if screening.format() == ScreeningFormat::ThreeD {
            price += SURCHARGE_THREE_D;
        }

        if screening.class() == ScreeningClass::Vip {
            price += SURCHARGE_VIP_CLASS;
        }

        Ok(price)
    }
}

// =============================================================================
// Ticket Factory
// =============================================================================

/// Mints priced tickets for the purchase flow.
///
/// Resolves the seat through the screening's hall (fails with NotFound for
/// identities outside the hall) and delegates the price to the configured
/// policy.
#[derive(Debug)]
pub struct TicketFactory {
    pricing: Box<dyn PricingPolicy>,
}

impl TicketFactory {
    /// Creates a factory around a pricing policy.
    pub fn new(pricing: Box<dyn PricingPolicy>) -> Self {
        TicketFactory { pricing }
    }

    /// Mints one ticket for one seat of a screening.
    pub fn create_ticket(
        &self,
        buyer: &dyn Buyer,
        screening: &Screening,
        seat_id: &SeatId,
    ) -> CoreResult<Ticket> {
        // Seat needed to establish the price (zone).
        let seat = screening.hall().seat(seat_id)?;
        let price = self.pricing.price_for(screening, seat)?;

        Ok(Ticket {
            ticket_id: Uuid::new_v4().to_string(),
            screening: screening.snapshot(),
            seat_id: seat_id.clone(),
            buyer_name: buyer.display_name(),
            price_cents: price.cents(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
