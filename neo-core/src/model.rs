//! Record types for near-Earth objects and their close approaches.
//!
//! Records are plain data. Links between a NEO and its approaches are stored
//! as arena handles ([`NeoId`], [`ApproachId`]) and are only ever written by
//! [`NeoDatabase::new`](crate::NeoDatabase::new); the navigable views live in
//! [`crate::database`].

use std::fmt;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::time::datetime_to_str;

/// Handle to a NEO slot inside a [`NeoDatabase`](crate::NeoDatabase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeoId(pub(crate) usize);

/// Handle to a close-approach slot inside a [`NeoDatabase`](crate::NeoDatabase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApproachId(pub(crate) usize);

impl NeoId {
    /// Position of the NEO in load order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl ApproachId {
    /// Position of the close approach in load order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Errors returned by [`NearEarthObject::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The primary designation was empty or whitespace.
    #[error("near-Earth object must have a non-empty primary designation")]
    EmptyDesignation,
}

/// A near-Earth object catalogued by its primary designation.
///
/// `diameter` is in kilometres and is `NaN` when unknown. The list of
/// approaches starts empty and is filled once, while a database is built.
///
/// # Examples
///
/// ```
/// use neo_core::NearEarthObject;
///
/// # fn main() -> Result<(), neo_core::RecordError> {
/// let eros = NearEarthObject::new("433", Some("Eros".into()), 16.84, false)?;
/// assert_eq!(eros.fullname(), "433 (Eros)");
/// assert_eq!(
///     eros.to_string(),
///     "NEO 433 (Eros) has a diameter of 16.840 km and is not potentially hazardous."
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NearEarthObject {
    designation: String,
    name: Option<String>,
    diameter: f64,
    hazardous: bool,
    pub(crate) approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Validates and constructs a [`NearEarthObject`].
    ///
    /// Surrounding whitespace is trimmed from the designation and name; an
    /// empty name is stored as "no name".
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: f64,
        hazardous: bool,
    ) -> Result<Self, RecordError> {
        let raw: String = designation.into();
        let designation = raw.trim();
        if designation.is_empty() {
            return Err(RecordError::EmptyDesignation);
        }
        let name = name
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        Ok(Self {
            designation: designation.to_owned(),
            name,
            diameter,
            hazardous,
            approaches: Vec::new(),
        })
    }

    /// Primary designation, unique within a loaded dataset.
    #[must_use]
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// IAU name, if the object has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Diameter in kilometres; `NaN` when unknown.
    #[must_use]
    pub const fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Whether the object is flagged as potentially hazardous.
    #[must_use]
    pub const fn hazardous(&self) -> bool {
        self.hazardous
    }

    /// Designation followed by the name in parentheses, when named.
    #[must_use]
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({name})", self.designation),
            None => self.designation.clone(),
        }
    }

    /// Number of close approaches linked to this object.
    #[must_use]
    pub const fn approach_count(&self) -> usize {
        self.approaches.len()
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hazard = if self.hazardous { "is" } else { "is not" };
        if self.diameter.is_nan() {
            write!(
                f,
                "NEO {} has an unknown diameter and {hazard} potentially hazardous.",
                self.fullname()
            )
        } else {
            write!(
                f,
                "NEO {} has a diameter of {:.3} km and {hazard} potentially hazardous.",
                self.fullname(),
                self.diameter
            )
        }
    }
}

/// A single close approach of a NEO to Earth.
///
/// `distance` is in astronomical units and `velocity` in km/s. `time` is a
/// naive timestamp interpreted as UTC.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use neo_core::CloseApproach;
///
/// let time = NaiveDate::from_ymd_opt(2029, 4, 13)
///     .and_then(|date| date.and_hms_opt(21, 46, 0))
///     .expect("valid timestamp");
/// let approach = CloseApproach::new("99942", time, 0.000_254, 7.42);
/// assert_eq!(approach.time_str(), "2029-04-13 21:46");
/// assert!(approach.neo_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproach {
    designation: String,
    time: NaiveDateTime,
    distance: f64,
    velocity: f64,
    pub(crate) neo: Option<NeoId>,
}

impl CloseApproach {
    /// Construct an unlinked close approach.
    #[must_use]
    pub fn new(
        designation: impl Into<String>,
        time: NaiveDateTime,
        distance: f64,
        velocity: f64,
    ) -> Self {
        Self {
            designation: designation.into().trim().to_owned(),
            time,
            distance,
            velocity,
            neo: None,
        }
    }

    /// Designation of the approaching object, used to find its NEO.
    #[must_use]
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// Time of closest approach (UTC).
    #[must_use]
    pub const fn time(&self) -> NaiveDateTime {
        self.time
    }

    /// Time of closest approach rendered as `YYYY-MM-DD HH:MM`.
    #[must_use]
    pub fn time_str(&self) -> String {
        datetime_to_str(&self.time)
    }

    /// Nominal approach distance in astronomical units.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Velocity relative to Earth in km/s.
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Handle of the linked NEO, if a database resolved one.
    #[must_use]
    pub const fn neo_id(&self) -> Option<NeoId> {
        self.neo
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_approach(f, self, &self.designation)
    }
}

/// Shared rendering for plain and linked approaches.
pub(crate) fn write_approach(
    f: &mut fmt::Formatter<'_>,
    approach: &CloseApproach,
    fullname: &str,
) -> fmt::Result {
    write!(
        f,
        "On {}, '{fullname}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
        approach.time_str(),
        approach.distance,
        approach.velocity
    )
}
