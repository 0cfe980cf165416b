//! Output-ready mappings of linked records.
//!
//! Writers consume these instead of the views so they do not need to borrow
//! the database. Keys follow the exported column names.

use crate::model::NearEarthObject;

/// Serialised form of a NEO.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NeoRecord {
    /// Primary designation.
    pub designation: String,
    /// Name, or an empty string when unnamed.
    pub name: String,
    /// Diameter in kilometres; `NaN` when unknown.
    pub diameter_km: f64,
    /// Potentially hazardous flag.
    pub potentially_hazardous: bool,
}

impl From<&NearEarthObject> for NeoRecord {
    fn from(neo: &NearEarthObject) -> Self {
        Self {
            designation: neo.designation().to_owned(),
            name: neo.name().unwrap_or_default().to_owned(),
            diameter_km: neo.diameter(),
            potentially_hazardous: neo.hazardous(),
        }
    }
}

/// Serialised form of a close approach with its NEO nested.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ApproachRecord {
    /// Time of closest approach as `YYYY-MM-DD HH:MM` (UTC).
    pub datetime_utc: String,
    /// Approach distance in astronomical units.
    pub distance_au: f64,
    /// Relative velocity in km/s.
    pub velocity_km_s: f64,
    /// Linked NEO, or `None` for an approach with no matching NEO.
    pub neo: Option<NeoRecord>,
}
