//! Sample records shared by unit tests, behaviour tests and benchmarks.
//!
//! The dataset mirrors a tiny slice of the JPL catalogue: 433 Eros, 99942
//! Apophis (unknown diameter, hazardous) and one approach whose designation
//! matches no NEO.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{CloseApproach, NearEarthObject, NeoDatabase};

/// Build a calendar date.
///
/// # Panics
///
/// Panics when the triple is not a valid date.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

/// Build a UTC timestamp with minute precision.
///
/// # Panics
///
/// Panics when the date or time of day is invalid.
#[must_use]
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(hour, minute, 0)
        .unwrap_or_else(|| panic!("invalid test time {hour}:{minute}"))
}

/// 433 Eros: named, 16.84 km, not hazardous.
///
/// # Panics
///
/// Never in practice; the designation is a non-empty literal.
#[must_use]
pub fn eros() -> NearEarthObject {
    NearEarthObject::new("433", Some("Eros".into()), 16.84, false)
        .unwrap_or_else(|err| panic!("sample NEO: {err}"))
}

/// 99942 Apophis: named, unknown diameter, hazardous.
///
/// # Panics
///
/// Never in practice; the designation is a non-empty literal.
#[must_use]
pub fn apophis() -> NearEarthObject {
    NearEarthObject::new("99942", Some("Apophis".into()), f64::NAN, true)
        .unwrap_or_else(|err| panic!("sample NEO: {err}"))
}

/// Close approach of Eros in January 1975.
#[must_use]
pub fn eros_approach() -> CloseApproach {
    CloseApproach::new("433", utc(1975, 1, 23, 7, 39), 0.15, 5.4)
}

/// Close approach of Apophis in April 2029.
#[must_use]
pub fn apophis_approach() -> CloseApproach {
    CloseApproach::new("99942", utc(2029, 4, 13, 21, 46), 0.0002, 30.7)
}

/// Close approach whose designation matches no sample NEO.
#[must_use]
pub fn orphan_approach() -> CloseApproach {
    CloseApproach::new("000000", utc(2000, 1, 1, 0, 0), 0.25, 12.0)
}

/// The sample NEOs in load order.
#[must_use]
pub fn sample_neos() -> Vec<NearEarthObject> {
    vec![eros(), apophis()]
}

/// The sample approaches in load order: Eros, Apophis, orphan.
#[must_use]
pub fn sample_approaches() -> Vec<CloseApproach> {
    vec![eros_approach(), apophis_approach(), orphan_approach()]
}

/// A database built from [`sample_neos`] and [`sample_approaches`].
#[must_use]
pub fn sample_database() -> NeoDatabase {
    NeoDatabase::new(sample_neos(), sample_approaches())
}
