//! # Cinema & Network
//!
//! A cinema owns its halls and its repertoire (scheduled screenings) and is
//! the temporal conflict detector: no two screenings in the same hall may
//! overlap in `[start, end)`. Seat reservations and sales are NOT managed
//! here; that lives in `Screening`.
//!
//! `MultiplexNetwork` is the top-level registry of cinemas.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::hall::Hall;
use crate::screening::Screening;
use crate::types::Movie;
use crate::validation::{validate_name, validate_search_query};

// =============================================================================
// Cinema
// =============================================================================

/// A cinema location: registered halls plus the screening repertoire.
#[derive(Debug)]
pub struct Cinema {
    name: String,
    address: String,
    halls: Vec<Arc<Hall>>,
    screenings: Vec<Arc<Screening>>,
}

impl Cinema {
    /// Creates a cinema with no halls and no screenings.
    pub fn new(name: &str, address: &str) -> CoreResult<Self> {
        Ok(Cinema {
            name: validate_name("cinema name", name)?,
            address: validate_name("address", address)?,
            halls: Vec::new(),
            screenings: Vec::new(),
        })
    }

    /// Returns the cinema name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the street address.
    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    // -------------------------------------------------------------------------
    // Halls
    // -------------------------------------------------------------------------

    /// Registers a hall.
    ///
    /// Hall names are unique within a cinema, compared case-insensitively.
    pub fn add_hall(&mut self, hall: Arc<Hall>) -> CoreResult<()> {
        if self.hall_registered(hall.name()) {
            return Err(ValidationError::Duplicate {
                field: "hall name".to_string(),
                value: hall.name().to_string(),
            }
            .into());
        }

        self.halls.push(hall);
        Ok(())
    }

    /// Returns the registered halls.
    #[inline]
    pub fn halls(&self) -> &[Arc<Hall>] {
        &self.halls
    }

    /// Looks up a hall by name, case-insensitively.
    pub fn find_hall(&self, hall_name: &str) -> CoreResult<&Arc<Hall>> {
        let key = validate_name("hall name", hall_name)?;
        self.halls
            .iter()
            .find(|h| names_equal(h.name(), &key))
            .ok_or_else(|| CoreError::HallNotFound {
                cinema: self.name.clone(),
                hall: key,
            })
    }

    fn hall_registered(&self, hall_name: &str) -> bool {
        self.halls.iter().any(|h| names_equal(h.name(), hall_name))
    }

    // -------------------------------------------------------------------------
    // Screenings / Programme
    // -------------------------------------------------------------------------

    /// Admits a screening into the repertoire.
    ///
    /// ## Rules
    /// - the screening's hall must already be registered on this cinema
    /// - its `[start, end)` interval must not overlap any existing screening
    ///   in the same hall; intervals that merely touch at an endpoint
    ///   (`existing.end == new.start`) do not conflict
    ///
    /// On success the screening is appended as-is; nothing is reordered or
    /// deduplicated.
    pub fn schedule(&mut self, screening: Arc<Screening>) -> CoreResult<()> {
        let hall_name = screening.hall().name();
        if !self.hall_registered(hall_name) {
            return Err(CoreError::HallNotRegistered {
                cinema: self.name.clone(),
                hall: hall_name.to_string(),
            });
        }

        for existing in &self.screenings {
            if !names_equal(existing.hall().name(), hall_name) {
                continue;
            }

            if overlaps(
                existing.starts_at(),
                existing.ends_at(),
                screening.starts_at(),
                screening.ends_at(),
            ) {
                return Err(CoreError::ScheduleConflict {
                    hall: hall_name.to_string(),
                    existing_start: existing.starts_at(),
                    existing_end: existing.ends_at(),
                    requested_start: screening.starts_at(),
                    requested_end: screening.ends_at(),
                });
            }
        }

        self.screenings.push(screening);
        Ok(())
    }

    /// Returns every scheduled screening in admission order.
    #[inline]
    pub fn screenings(&self) -> &[Arc<Screening>] {
        &self.screenings
    }

    /// Returns the screenings starting within `[from 00:00, to+1day 00:00)`,
    /// sorted by start time, then hall name (case-insensitive).
    pub fn programme(&self, from: NaiveDate, to: NaiveDate) -> Vec<Arc<Screening>> {
        let start_inclusive = from.and_time(NaiveTime::MIN).and_utc();
        let end_exclusive = to.and_time(NaiveTime::MIN).and_utc() + Duration::days(1);

        let mut programme: Vec<Arc<Screening>> = self
            .screenings
            .iter()
            .filter(|s| s.starts_at() >= start_inclusive && s.starts_at() < end_exclusive)
            .cloned()
            .collect();

        programme.sort_by(|a, b| {
            a.starts_at()
                .cmp(&b.starts_at())
                .then_with(|| a.hall().name().to_lowercase().cmp(&b.hall().name().to_lowercase()))
        });
        programme
    }

    /// Programme for the seven days starting at `today`.
    pub fn programme_next_week(&self, today: NaiveDate) -> Vec<Arc<Screening>> {
        self.programme(today, today + Duration::days(7))
    }

    /// Searches scheduled movies by title or director substring,
    /// case-insensitively.
    ///
    /// Results are deduplicated by (title, director) in first-scheduled
    /// order. A blank query is rejected.
    pub fn find_movie(&self, query: &str) -> CoreResult<Vec<Arc<Movie>>> {
        let q = validate_search_query(query)?.to_lowercase();

        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for screening in &self.screenings {
            let movie = screening.movie();
            let key = format!("{}|{}", movie.title(), movie.director()).to_lowercase();
            if movie.title().to_lowercase().contains(&q)
                || movie.director().to_lowercase().contains(&q)
            {
                if seen.insert(key) {
                    found.push(movie.clone());
                }
            }
        }
        Ok(found)
    }
}

// =============================================================================
// Multiplex Network
// =============================================================================

/// The whole network: every cinema location in one system.
#[derive(Debug, Default)]
pub struct MultiplexNetwork {
    cinemas: Vec<Cinema>,
}

impl MultiplexNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        MultiplexNetwork::default()
    }

    /// Registers a cinema.
    ///
    /// Cinema names are unique within the network, compared
    /// case-insensitively.
    pub fn add_cinema(&mut self, cinema: Cinema) -> CoreResult<()> {
        if self.cinemas.iter().any(|c| names_equal(c.name(), cinema.name())) {
            return Err(ValidationError::Duplicate {
                field: "cinema name".to_string(),
                value: cinema.name().to_string(),
            }
            .into());
        }

        self.cinemas.push(cinema);
        Ok(())
    }

    /// Removes a cinema by name. Removing an unknown name is a no-op.
    pub fn remove_cinema(&mut self, name: &str) {
        self.cinemas.retain(|c| !names_equal(c.name(), name));
    }

    /// Looks up a cinema by name, case-insensitively.
    pub fn find_cinema(&self, name: &str) -> CoreResult<&Cinema> {
        let key = validate_name("cinema name", name)?;
        self.cinemas
            .iter()
            .find(|c| names_equal(c.name(), &key))
            .ok_or(CoreError::CinemaNotFound { name: key })
    }

    /// Mutable variant of [`find_cinema`](Self::find_cinema), for
    /// registering halls and scheduling.
    pub fn find_cinema_mut(&mut self, name: &str) -> CoreResult<&mut Cinema> {
        let key = validate_name("cinema name", name)?;
        self.cinemas
            .iter_mut()
            .find(|c| names_equal(c.name(), &key))
            .ok_or(CoreError::CinemaNotFound { name: key })
    }

    /// Returns every registered cinema.
    #[inline]
    pub fn cinemas(&self) -> &[Cinema] {
        &self.cinemas
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Case-insensitive name comparison used for halls and cinemas.
fn names_equal(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Half-open interval intersection: `[a_start, a_end)` vs `[b_start, b_end)`.
fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgeRating, LanguageOption, ScreeningClass, ScreeningFormat, Seat, SeatId, SeatZone};
    use chrono::TimeZone;

    fn hall(name: &str) -> Arc<Hall> {
        let seats = (1..=10)
            .map(|n| Seat::new(SeatId::new("A", n).unwrap(), SeatZone::Standard))
            .collect();
        Arc::new(Hall::new(name, seats).unwrap())
    }

    /// 120 minute movie: with the 20 minute cleaning break a screening
    /// occupies its hall for exactly 140 minutes.
    fn movie_120(title: &str, director: &str) -> Arc<Movie> {
        Arc::new(
            Movie::new(
                title,
                director,
                120,
                LanguageOption::Original,
                vec![],
                AgeRating::Over12,
            )
            .unwrap(),
        )
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, h, m, 0).unwrap()
    }

    fn screening_at(hall: Arc<Hall>, start: DateTime<Utc>) -> Arc<Screening> {
        Arc::new(Screening::new(
            movie_120("Solaris", "Tarkovsky"),
            hall,
            start,
            ScreeningFormat::TwoD,
            ScreeningClass::Standard,
        ))
    }

    fn cinema_with_hall(hall: &Arc<Hall>) -> Cinema {
        let mut cinema = Cinema::new("Super Tarasy", "ul. Akademicka 5").unwrap();
        cinema.add_hall(hall.clone()).unwrap();
        cinema
    }

    #[test]
    fn test_add_hall_rejects_duplicate_name_case_insensitive() {
        let mut cinema = Cinema::new("Super Tarasy", "ul. Akademicka 5").unwrap();
        cinema.add_hall(hall("Hall A")).unwrap();

        let err = cinema.add_hall(hall("hall a")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_find_hall_case_insensitive() {
        let h = hall("Hall A");
        let cinema = cinema_with_hall(&h);

        assert_eq!(cinema.find_hall("HALL A").unwrap().name(), "Hall A");
        assert!(matches!(
            cinema.find_hall("Hall Z").unwrap_err(),
            CoreError::HallNotFound { .. }
        ));
    }

    #[test]
    fn test_schedule_rejects_unregistered_hall() {
        let mut cinema = Cinema::new("Super Tarasy", "ul. Akademicka 5").unwrap();
        let s = screening_at(hall("Hall A"), at(10, 0));

        assert!(matches!(
            cinema.schedule(s).unwrap_err(),
            CoreError::HallNotRegistered { .. }
        ));
        assert!(cinema.screenings().is_empty());
    }

    #[test]
    fn test_touching_intervals_do_not_conflict() {
        let h = hall("Hall A");
        let mut cinema = cinema_with_hall(&h);

        // [10:00, 12:20) then [12:20, 14:40): end == start is fine.
        cinema.schedule(screening_at(h.clone(), at(10, 0))).unwrap();
        cinema.schedule(screening_at(h.clone(), at(12, 20))).unwrap();

        assert_eq!(cinema.screenings().len(), 2);
    }

    #[test]
    fn test_overlapping_intervals_conflict() {
        let h = hall("Hall A");
        let mut cinema = cinema_with_hall(&h);

        cinema.schedule(screening_at(h.clone(), at(10, 0))).unwrap();

        // [12:00, ...) starts inside [10:00, 12:20).
        let err = cinema
            .schedule(screening_at(h.clone(), at(12, 0)))
            .unwrap_err();
        assert!(matches!(err, CoreError::ScheduleConflict { .. }));
        assert_eq!(cinema.screenings().len(), 1);
    }

    #[test]
    fn test_same_hall_name_different_case_conflicts() {
        let mut cinema = Cinema::new("Super Tarasy", "ul. Akademicka 5").unwrap();
        let upper = hall("Hall A");
        cinema.add_hall(upper.clone()).unwrap();

        cinema.schedule(screening_at(upper, at(10, 0))).unwrap();

        // A second Hall object whose name differs only in case is the same
        // physical room for conflict purposes.
        let lower = hall("hall a");
        let err = cinema.schedule(screening_at(lower, at(11, 0))).unwrap_err();
        assert!(matches!(err, CoreError::ScheduleConflict { .. }));
    }

    #[test]
    fn test_different_halls_may_fully_overlap() {
        let a = hall("Hall A");
        let b = hall("Hall B");
        let mut cinema = Cinema::new("Super Tarasy", "ul. Akademicka 5").unwrap();
        cinema.add_hall(a.clone()).unwrap();
        cinema.add_hall(b.clone()).unwrap();

        cinema.schedule(screening_at(a, at(10, 0))).unwrap();
        cinema.schedule(screening_at(b, at(10, 0))).unwrap();

        assert_eq!(cinema.screenings().len(), 2);
    }

    #[test]
    fn test_programme_window_and_ordering() {
        let a = hall("Hall B");
        let b = hall("Hall A");
        let mut cinema = Cinema::new("Super Tarasy", "ul. Akademicka 5").unwrap();
        cinema.add_hall(a.clone()).unwrap();
        cinema.add_hall(b.clone()).unwrap();

        // Same instant in two halls, plus one later, plus one out of range.
        cinema.schedule(screening_at(a.clone(), at(10, 0))).unwrap();
        cinema.schedule(screening_at(b.clone(), at(10, 0))).unwrap();
        cinema.schedule(screening_at(a.clone(), at(15, 0))).unwrap();
        cinema
            .schedule(screening_at(
                b.clone(),
                Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap(),
            ))
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let programme = cinema.programme(day, day);

        assert_eq!(programme.len(), 3);
        // Equal starts order by hall name, case-insensitively.
        assert_eq!(programme[0].hall().name(), "Hall A");
        assert_eq!(programme[1].hall().name(), "Hall B");
        assert_eq!(programme[2].starts_at(), at(15, 0));
    }

    #[test]
    fn test_programme_next_week_spans_seven_days() {
        let h = hall("Hall A");
        let mut cinema = cinema_with_hall(&h);

        cinema
            .schedule(screening_at(
                h.clone(),
                Utc.with_ymd_and_hms(2026, 3, 21, 23, 0, 0).unwrap(),
            ))
            .unwrap();
        cinema
            .schedule(screening_at(
                h.clone(),
                Utc.with_ymd_and_hms(2026, 3, 22, 10, 0, 0).unwrap(),
            ))
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let programme = cinema.programme_next_week(today);

        // Day 7 at 23:00 is inside the window, day 8 is not.
        assert_eq!(programme.len(), 1);
    }

    #[test]
    fn test_find_movie_matches_title_and_director() {
        let h = hall("Hall A");
        let mut cinema = cinema_with_hall(&h);

        let bond = movie_120("James Bon: Return of the Bug", "Ada Lovelace");
        let mole = movie_120("Kret: Zemsta Tunelu", "Grace Hopper");

        cinema
            .schedule(Arc::new(Screening::new(
                bond.clone(),
                h.clone(),
                at(10, 0),
                ScreeningFormat::TwoD,
                ScreeningClass::Standard,
            )))
            .unwrap();
        cinema
            .schedule(Arc::new(Screening::new(
                mole,
                h.clone(),
                at(13, 0),
                ScreeningFormat::TwoD,
                ScreeningClass::Standard,
            )))
            .unwrap();
        // Same movie twice: must not duplicate in results.
        cinema
            .schedule(Arc::new(Screening::new(
                bond,
                h.clone(),
                at(16, 0),
                ScreeningFormat::TwoD,
                ScreeningClass::Standard,
            )))
            .unwrap();

        let by_title = cinema.find_movie("james").unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title(), "James Bon: Return of the Bug");

        let by_director = cinema.find_movie("HOPPER").unwrap();
        assert_eq!(by_director.len(), 1);
        assert_eq!(by_director[0].director(), "Grace Hopper");

        assert!(cinema.find_movie("  ").is_err());
        assert!(cinema.find_movie("nothing").unwrap().is_empty());
    }

    #[test]
    fn test_network_unique_names_and_lookup() {
        let mut network = MultiplexNetwork::new();
        network
            .add_cinema(Cinema::new("Super Tarasy", "ul. Akademicka 5").unwrap())
            .unwrap();
        network
            .add_cinema(Cinema::new("Mega Kino", "ul. Centralna 10").unwrap())
            .unwrap();

        let err = network
            .add_cinema(Cinema::new("super tarasy", "elsewhere").unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));

        assert_eq!(network.find_cinema("MEGA KINO").unwrap().name(), "Mega Kino");
        assert!(matches!(
            network.find_cinema("Nowhere").unwrap_err(),
            CoreError::CinemaNotFound { .. }
        ));

        network.remove_cinema("Mega Kino");
        assert_eq!(network.cinemas().len(), 1);
        // Removing again is a no-op.
        network.remove_cinema("Mega Kino");
        assert_eq!(network.cinemas().len(), 1);
    }
}
