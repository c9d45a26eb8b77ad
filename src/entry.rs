// 🎬 Movie Entry - one diary row
// Raw text in (from the prompt or the store), validated record out.

use crate::error::{MovieLogError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date format used in the store and in reports
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// RAW ENTRY
// ============================================================================

/// RawEntry - the five positional store fields, still unvalidated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub watched_date: String,
    pub title: String,
    pub release_year: String,
    pub rating: String,
    pub first_watch: String,
}

impl RawEntry {
    pub fn new(
        watched_date: impl Into<String>,
        title: impl Into<String>,
        release_year: impl Into<String>,
        rating: impl Into<String>,
        first_watch: impl Into<String>,
    ) -> Self {
        RawEntry {
            watched_date: watched_date.into(),
            title: title.into(),
            release_year: release_year.into(),
            rating: rating.into(),
            first_watch: first_watch.into(),
        }
    }

    /// Fields in store column order
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.watched_date,
            &self.title,
            &self.release_year,
            &self.rating,
            &self.first_watch,
        ]
    }
}

// ============================================================================
// MOVIE ENTRY
// ============================================================================

/// MovieEntry - a validated diary row
///
/// Created once (on append) and never mutated afterwards. All five fields are
/// always present; construction goes through [`MovieEntry::from_raw`] so a
/// record with a bad date, an empty title or a non-numeric year/rating can
/// never exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieEntry {
    pub watched_date: NaiveDate,
    pub title: String,
    pub release_year: i32,
    pub rating: f64,
    pub first_watch: bool,
    /// Field text as entered, surrounding whitespace trimmed from all but the
    /// first-watch answer (whose exact text decides its meaning)
    #[serde(skip)]
    entered: RawEntry,
}

impl MovieEntry {
    pub fn from_raw(raw: &RawEntry) -> Result<Self> {
        let date_text = raw.watched_date.trim();
        let watched_date = NaiveDate::parse_from_str(date_text, DATE_FORMAT).map_err(|source| {
            MovieLogError::InvalidDate {
                value: raw.watched_date.clone(),
                source,
            }
        })?;

        let title = raw.title.trim();
        if title.is_empty() {
            return Err(MovieLogError::EmptyTitle);
        }

        let release_year = raw
            .release_year
            .trim()
            .parse::<i32>()
            .map_err(|_| MovieLogError::InvalidNumber {
                field: "release year",
                value: raw.release_year.clone(),
            })?;

        let rating = parse_rating(&raw.rating)?;

        let entered = RawEntry::new(
            date_text,
            title,
            raw.release_year.trim(),
            raw.rating.trim(),
            raw.first_watch.as_str(),
        );

        Ok(MovieEntry {
            watched_date,
            title: title.to_string(),
            release_year,
            rating,
            first_watch: parse_first_watch(&raw.first_watch),
            entered,
        })
    }

    /// The five store fields, as the user typed them
    pub fn to_raw(&self) -> RawEntry {
        self.entered.clone()
    }

    /// Rating exactly as entered ("9.0", "8.75")
    pub fn rating_text(&self) -> &str {
        &self.entered.rating
    }

    pub fn watch_year(&self) -> i32 {
        self.watched_date.year()
    }

    /// Zero-based month index (January = 0)
    pub fn watch_month0(&self) -> usize {
        self.watched_date.month0() as usize
    }
}

fn parse_rating(text: &str) -> Result<f64> {
    let invalid = || MovieLogError::InvalidNumber {
        field: "rating",
        value: text.to_string(),
    };

    let rating = text.trim().parse::<f64>().map_err(|_| invalid())?;
    // "NaN" and "inf" parse as f64 but would poison every average
    if !rating.is_finite() {
        return Err(invalid());
    }
    Ok(rating)
}

/// Only a case-insensitive "yes" counts as a first watch.
pub fn parse_first_watch(text: &str) -> bool {
    text.eq_ignore_ascii_case("yes")
}

// ============================================================================
// TESTS
// ============================================================================
