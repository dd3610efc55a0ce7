//! # Box Office
//!
//! Console walkthrough of the multiplex domain: builds a two-cinema network,
//! schedules screenings, then runs the reservation, cancellation and
//! purchase flows end to end.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use multiplex_core::types::{AgeRating, LanguageOption, ScreeningClass, ScreeningFormat};
use multiplex_core::{
    Buyer, Cinema, Customer, DefaultPricingPolicy, Guest, Hall, Movie, MultiplexNetwork, Screening,
    Seat, SeatId, SeatZone, TicketFactory,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let ticket_factory = TicketFactory::new(Box::new(DefaultPricingPolicy::new()));

    // -------------------------------------------------------------------------
    // Network setup: two cinemas, three halls
    // -------------------------------------------------------------------------

    let mut network = MultiplexNetwork::new();
    network.add_cinema(Cinema::new("Super Tarasy", "ul. Akademicka 5")?)?;
    network.add_cinema(Cinema::new("Mega Kino", "ul. Centralna 10")?)?;

    let hall_a = Arc::new(Hall::new("Hall A", row_seats("A", 12, SeatZone::Standard))?);
    let hall_vip = Arc::new(Hall::new("Hall VIP", vip_seats())?);
    let hall_b = Arc::new(Hall::new("Hall B", row_seats("B", 10, SeatZone::Standard))?);

    {
        let tarasy = network.find_cinema_mut("Super Tarasy")?;
        tarasy.add_hall(hall_a.clone())?;
        tarasy.add_hall(hall_vip.clone())?;
    }
    network.find_cinema_mut("Mega Kino")?.add_hall(hall_b.clone())?;

    let bond = Arc::new(Movie::new(
        "James Bon: Return of the Bug",
        "Ada Lovelace",
        115,
        LanguageOption::Subtitled,
        vec!["action".to_string(), "spy".to_string()],
        AgeRating::Over12,
    )?);

    let mole = Arc::new(Movie::new(
        "Kret: Zemsta Tunelu",
        "Grace Hopper",
        95,
        LanguageOption::Dubbed,
        vec!["comedy".to_string(), "family".to_string()],
        AgeRating::Family,
    )?);

    let now = Utc::now();

    let s1 = Arc::new(Screening::new(
        bond.clone(),
        hall_a.clone(),
        now + Duration::hours(2),
        ScreeningFormat::TwoD,
        ScreeningClass::Standard,
    ));
    let s2 = Arc::new(Screening::new(
        bond,
        hall_vip,
        now + Duration::hours(4),
        ScreeningFormat::ThreeD,
        ScreeningClass::Vip,
    ));
    let s3 = Arc::new(Screening::new(
        mole.clone(),
        hall_a,
        now + Duration::days(1),
        ScreeningFormat::TwoD,
        ScreeningClass::Standard,
    ));
    let s4 = Arc::new(Screening::new(
        mole,
        hall_b,
        now + Duration::days(2),
        ScreeningFormat::TwoD,
        ScreeningClass::Standard,
    ));

    {
        let tarasy = network.find_cinema_mut("Super Tarasy")?;
        tarasy.schedule(s1.clone())?;
        tarasy.schedule(s2.clone())?;
        tarasy.schedule(s3)?;
    }
    network.find_cinema_mut("Mega Kino")?.schedule(s4)?;

    info!("Programme for the next week:");
    for cinema in network.cinemas() {
        render_programme(cinema);
    }

    // -------------------------------------------------------------------------
    // Reservations
    // -------------------------------------------------------------------------

    let guest = Guest::new("guest#anon")?;
    let customer_a = Customer::new("CUST-001", "Jan", "Kowalski")?;
    let customer_b = Customer::new("CUST-002", "Anna", "Nowak")?;
    let family_buyer = Customer::new("CUST-003", "Piotr", "Familijny")?;

    let res_a = s1.reserve_seats(&customer_a, seat_set("A", &[1, 2])?)?;
    info!(
        reservation_id = res_a.reservation_id(),
        seats = %join_seats(res_a.seat_ids()),
        "Reservation created for {}",
        customer_a.display_name(),
    );

    let res_b = s1.reserve_seats(&customer_b, seat_set("A", &[3, 4])?)?;
    info!(
        reservation_id = res_b.reservation_id(),
        seats = %join_seats(res_b.seat_ids()),
        "Reservation created for {}",
        customer_b.display_name(),
    );

    info!("Second customer cancels their reservation");
    s1.cancel_reservation(res_b.reservation_id())?;
    info!(occupancy = ?s1.occupancy(), "After cancellation");

    // -------------------------------------------------------------------------
    // Purchases
    // -------------------------------------------------------------------------

    let guest_order = s1.buy_tickets(&guest, seat_set("A", &[3, 4])?, &ticket_factory)?;
    info!(
        order_id = guest_order.order_id(),
        total = %guest_order.total(),
        "Guest without an account bought tickets"
    );
    for ticket in guest_order.tickets() {
        info!(seat = %ticket.seat_id, price = %ticket.price(), "  ticket");
    }

    let family_order = s1.buy_tickets(&family_buyer, seat_set("A", &[5, 6, 7, 8])?, &ticket_factory)?;
    info!(
        order_id = family_order.order_id(),
        tickets = family_order.tickets().len(),
        total = %family_order.total(),
        "Family bought several tickets together"
    );

    let vip_order = s2.buy_tickets(&customer_a, seat_set("V", &[1, 2])?, &ticket_factory)?;
    info!(
        order_id = vip_order.order_id(),
        total = %vip_order.total(),
        "VIP 3D purchase"
    );

    info!("Tickets on {}'s account:", customer_a.display_name());
    for ticket in customer_a.tickets() {
        info!(
            movie = %ticket.screening.movie_title,
            starts_at = %ticket.screening.starts_at,
            seat = %ticket.seat_id,
            price = %ticket.price(),
            "  ticket"
        );
    }

    // Reserving a sold seat must fail and change nothing.
    match s1.reserve_seats(&customer_b, seat_set("A", &[3])?) {
        Ok(_) => warn!("reserving a sold seat unexpectedly succeeded"),
        Err(e) => info!(error = %e, "Reservation of a sold seat rejected"),
    }

    // -------------------------------------------------------------------------
    // Browsing
    // -------------------------------------------------------------------------

    for movie in network.find_cinema("Super Tarasy")?.find_movie("James")? {
        info!(
            title = movie.title(),
            director = movie.director(),
            "Movie search hit"
        );
    }

    let free = s1.free_seats();
    info!(
        free = free.len(),
        sample = %join_seats(&free.iter().take(8).cloned().collect()),
        "Free seats remaining"
    );

    Ok(())
}

/// Builds seats 1..=count in one row with a single zone.
fn row_seats(row: &str, count: u32, zone: SeatZone) -> Vec<Seat> {
    (1..=count)
        .map(|n| Seat::new(SeatId::new(row, n).expect("static seat id"), zone))
        .collect()
}

/// VIP hall layout: six VIP seats plus four promo seats.
fn vip_seats() -> Vec<Seat> {
    let mut seats = row_seats("V", 6, SeatZone::Vip);
    seats.extend(row_seats("P", 4, SeatZone::Promo));
    seats
}

fn seat_set(row: &str, numbers: &[u32]) -> Result<BTreeSet<SeatId>, multiplex_core::ValidationError> {
    numbers.iter().map(|n| SeatId::new(row, *n)).collect()
}

fn join_seats(seats: &BTreeSet<SeatId>) -> String {
    seats
        .iter()
        .map(SeatId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_programme(cinema: &Cinema) {
    let today = Utc::now().date_naive();
    let programme = cinema.programme_next_week(today);

    info!("{} ({})", cinema.name(), cinema.address());
    if programme.is_empty() {
        info!("  [no screenings]");
        return;
    }
    for screening in programme {
        info!(
            "  {} | {} | {} | {:?} | {:?}",
            screening.starts_at().format("%Y-%m-%d %H:%M"),
            screening.hall().name(),
            screening.movie().title(),
            screening.format(),
            screening.class(),
        );
    }
}
