//! # Domain Types
//!
//! Core domain types used throughout the multiplex network.
//!
//! ## Type Hierarchy
//! ```text
//! SeatId      - value identity of a seat (row + number), map key
//! Seat        - physical seat: identity + pricing zone
//! SeatStatus  - per-screening lifecycle state (Free/Reserved/Sold)
//! Movie       - catalog entry with runtime and audience metadata
//! ScreeningFormat / ScreeningClass - projection attributes that feed pricing
//! ```
//!
//! Booking state deliberately does NOT live on `Seat`: a seat is physical
//! structure, while `Free`/`Reserved`/`Sold` is owned by one screening.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationResult;
use crate::validation::{validate_duration_min, validate_name, validate_seat_number, validate_seat_row};

// =============================================================================
// Seat Identity
// =============================================================================

/// Value identity of a seat within a hall: row label + number.
///
/// The row is normalized (trimmed, uppercased) at construction, so `"a"`/1
/// and `" A "`/1 are the same identity. Ordered so seat maps iterate in a
/// stable row-then-number order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatId {
    row: String,
    number: u32,
}

impl SeatId {
    /// Creates a seat identity.
    ///
    /// ## Rules
    /// - `row` must not be blank (normalized to trimmed uppercase)
    /// - `number` must be positive
    pub fn new(row: &str, number: u32) -> ValidationResult<Self> {
        let row = validate_seat_row(row)?;
        validate_seat_number(number)?;

        Ok(SeatId { row, number })
    }

    /// Returns the normalized row label.
    #[inline]
    pub fn row(&self) -> &str {
        &self.row
    }

    /// Returns the seat number within the row.
    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }
}

/// Renders the compact label, e.g. `H34`.
impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.number)
    }
}

// =============================================================================
// Seat Zone
// =============================================================================

/// Pricing zone classification of a physical seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatZone {
    Standard,
    Vip,
    Promo,
    SuperPromo,
}

// =============================================================================
// Seat
// =============================================================================

/// A physical seat in a hall.
///
/// Carries identity and zone only; reservation/sale state belongs to
/// `Screening`, never to the seat itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    id: SeatId,
    zone: SeatZone,
}

impl Seat {
    /// Creates a seat with the given identity and zone.
    pub fn new(id: SeatId, zone: SeatZone) -> Self {
        Seat { id, zone }
    }

    /// Returns the seat identity.
    #[inline]
    pub fn id(&self) -> &SeatId {
        &self.id
    }

    /// Returns the pricing zone.
    #[inline]
    pub const fn zone(&self) -> SeatZone {
        self.zone
    }
}

// =============================================================================
// Seat Status
// =============================================================================

/// Lifecycle state of a seat within one screening.
///
/// ```text
///            reserve              buy
///   Free ──────────► Reserved ─────────► Sold
///    ▲                   │                ▲
///    └───────────────────┘                │
///          cancel              buy        │
///   Free ─────────────────────────────────┘
/// ```
///
/// `Sold` is terminal: cancellation never downgrades a sold seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Available for reservation or purchase.
    Free,
    /// Held by a live reservation; still purchasable.
    Reserved,
    /// Purchased; terminal.
    Sold,
}

impl Default for SeatStatus {
    fn default() -> Self {
        SeatStatus::Free
    }
}

// =============================================================================
// Screening Attributes
// =============================================================================

/// Projection format of a screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningFormat {
    TwoD,
    ThreeD,
}

/// Service class of a screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningClass {
    Standard,
    Vip,
}

/// Audio/subtitle option a movie is shown with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageOption {
    Original,
    Subtitled,
    Dubbed,
}

/// Minimum audience age classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeRating {
    Family,
    Over7,
    Over12,
    Over16,
    Over18,
}

// =============================================================================
// Movie
// =============================================================================

/// A catalog movie.
///
/// Immutable after construction; runtime feeds the derived screening end
/// time (together with the cleaning break).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    title: String,
    director: String,
    duration_min: i64,
    language: LanguageOption,
    themes: Vec<String>,
    age_rating: AgeRating,
}

impl Movie {
    /// Creates a movie.
    ///
    /// ## Rules
    /// - `title` and `director` must not be blank (stored trimmed)
    /// - `duration_min` must be positive
    pub fn new(
        title: &str,
        director: &str,
        duration_min: i64,
        language: LanguageOption,
        themes: Vec<String>,
        age_rating: AgeRating,
    ) -> ValidationResult<Self> {
        let title = validate_name("title", title)?;
        let director = validate_name("director", director)?;
        validate_duration_min(duration_min)?;

        Ok(Movie {
            title,
            director,
            duration_min,
            language,
            themes,
            age_rating,
        })
    }

    /// Returns the movie title.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the director name.
    #[inline]
    pub fn director(&self) -> &str {
        &self.director
    }

    /// Returns the runtime in minutes.
    #[inline]
    pub const fn duration_min(&self) -> i64 {
        self.duration_min
    }

    /// Returns the language option.
    #[inline]
    pub const fn language(&self) -> LanguageOption {
        self.language
    }

    /// Returns the theme tags.
    #[inline]
    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    /// Returns the age rating.
    #[inline]
    pub const fn age_rating(&self) -> AgeRating {
        self.age_rating
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
