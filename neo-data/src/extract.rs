//! Readers for the NEO catalogue (CSV) and the close-approach export (JSON).
//!
//! Optional NEO attributes are coerced to their defaults (no name, `NaN`
//! diameter, not hazardous). Required approach fields are not: a row with an
//! unreadable time, distance or velocity aborts the load.

use std::{borrow::Cow, io::BufReader};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDateTime;
use log::{info, warn};
use neo_core::{CloseApproach, NearEarthObject};
use neo_fs::open_utf8_file;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Timestamp layout used by the close-approach export (`1900-Jan-01 00:11`).
pub const CAD_DATETIME_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Errors returned while reading the source datasets.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file could not be opened.
    #[error("failed to open {path:?}: {source}")]
    Open {
        /// File that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The CSV reader rejected the file.
    #[error("failed to read CSV data from {path:?}: {source}")]
    Csv {
        /// Source CSV file.
        path: Utf8PathBuf,
        /// Error returned by `csv`.
        #[source]
        source: csv::Error,
    },
    /// The JSON document could not be decoded into the expected shape.
    #[error("failed to parse JSON data from {path:?}: {source}")]
    Json {
        /// Source JSON file.
        path: Utf8PathBuf,
        /// Error returned by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A required column is absent from the file header.
    #[error("{path:?} has no `{field}` column")]
    MissingField {
        /// Offending file.
        path: Utf8PathBuf,
        /// Name of the missing column.
        field: &'static str,
    },
    /// A close-approach row carries an unusable required value.
    #[error("row {row} of {path:?} has an invalid `{field}` value {value:?}")]
    InvalidApproach {
        /// Offending file.
        path: Utf8PathBuf,
        /// Zero-based index into the `data` array.
        row: usize,
        /// Column name of the bad value.
        field: &'static str,
        /// Raw value as found, or empty when the cell is missing.
        value: String,
    },
}

/// Parse a float, returning `NaN` for a missing, empty or malformed value.
///
/// # Examples
/// ```
/// use neo_data::to_float;
///
/// assert_eq!(to_float(Some("16.84")), 16.84);
/// assert!(to_float(Some("")).is_nan());
/// assert!(to_float(None).is_nan());
/// ```
#[must_use]
pub fn to_float(value: Option<&str>) -> f64 {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(f64::NAN)
}

/// Interpret a hazard marker; only `Y` (any case) is affirmative.
#[must_use]
pub fn to_boolean(value: Option<&str>) -> bool {
    value.is_some_and(|raw| raw.trim().eq_ignore_ascii_case("y"))
}

/// Parse a close-approach timestamp such as `2029-Apr-13 21:46`.
pub fn cd_to_datetime(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), CAD_DATETIME_FORMAT)
}

#[derive(Debug, Deserialize)]
struct NeoRow {
    #[serde(default)]
    pdes: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    diameter: Option<String>,
    #[serde(default)]
    pha: Option<String>,
}

/// Read near-Earth objects from a CSV file with a header row.
///
/// Only the `pdes`, `name`, `diameter` and `pha` columns are used. Rows without
/// a primary designation are skipped with a warning. File order is preserved.
pub fn load_neos(path: &Utf8Path) -> Result<Vec<NearEarthObject>, ExtractError> {
    let file = open_utf8_file(path).map_err(|source| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_error = |source| ExtractError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    if !reader.headers().map_err(csv_error)?.iter().any(|h| h == "pdes") {
        return Err(ExtractError::MissingField {
            path: path.to_path_buf(),
            field: "pdes",
        });
    }

    let mut neos = Vec::new();
    let mut skipped = 0_usize;
    for (line, row) in reader.deserialize::<NeoRow>().enumerate() {
        let row = row.map_err(csv_error)?;
        let designation = row.pdes.unwrap_or_default();
        match NearEarthObject::new(
            designation,
            row.name,
            to_float(row.diameter.as_deref()),
            to_boolean(row.pha.as_deref()),
        ) {
            Ok(neo) => neos.push(neo),
            Err(err) => {
                skipped += 1;
                warn!("Skipping NEO record {} in {path}: {err}", line + 1);
            }
        }
    }
    if skipped > 0 {
        warn!("Skipped {skipped} NEO records without a primary designation");
    }
    info!("Loaded {} NEOs from {path}", neos.len());
    Ok(neos)
}

#[derive(Debug, Deserialize)]
struct CadDocument {
    #[serde(default)]
    fields: Option<Vec<String>>,
    data: Vec<Vec<Value>>,
}

/// Column positions of the close-approach fields within a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CadColumns {
    designation: usize,
    time: usize,
    distance: usize,
    velocity: usize,
}

impl CadColumns {
    /// Layout of the JPL SBDB close-approach API.
    const SBDB: Self = Self {
        designation: 0,
        time: 3,
        distance: 4,
        velocity: 7,
    };

    fn resolve(fields: Option<&[String]>) -> Result<Self, &'static str> {
        let Some(fields) = fields else {
            return Ok(Self::SBDB);
        };
        let position = |name: &'static str| {
            fields
                .iter()
                .position(|field| field == name)
                .ok_or(name)
        };
        Ok(Self {
            designation: position("des")?,
            time: position("cd")?,
            distance: position("dist")?,
            velocity: position("v_rel")?,
        })
    }
}

fn cell_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        _ => None,
    }
}

struct RowReader<'a> {
    path: &'a Utf8Path,
    index: usize,
    row: &'a [Value],
}

impl RowReader<'_> {
    fn text(&self, column: usize, field: &'static str) -> Result<Cow<'_, str>, ExtractError> {
        self.row
            .get(column)
            .and_then(cell_text)
            .ok_or_else(|| self.invalid(field, String::new()))
    }

    fn float(&self, column: usize, field: &'static str) -> Result<f64, ExtractError> {
        let raw = self.text(column, field)?;
        raw.trim()
            .parse()
            .map_err(|_| self.invalid(field, raw.clone().into_owned()))
    }

    fn time(&self, column: usize) -> Result<NaiveDateTime, ExtractError> {
        let raw = self.text(column, "cd")?;
        cd_to_datetime(&raw).map_err(|_| self.invalid("cd", raw.clone().into_owned()))
    }

    fn invalid(&self, field: &'static str, value: String) -> ExtractError {
        ExtractError::InvalidApproach {
            path: self.path.to_path_buf(),
            row: self.index,
            field,
            value,
        }
    }
}

/// Read close approaches from a JSON export with `fields` and `data` keys.
///
/// Column positions are looked up in `fields`; without it the SBDB layout
/// (`des`, `cd`, `dist`, `v_rel` at 0, 3, 4, 7) is assumed. Row order is
/// preserved.
pub fn load_approaches(path: &Utf8Path) -> Result<Vec<CloseApproach>, ExtractError> {
    let file = open_utf8_file(path).map_err(|source| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let document: CadDocument =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ExtractError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let columns = CadColumns::resolve(document.fields.as_deref()).map_err(|field| {
        ExtractError::MissingField {
            path: path.to_path_buf(),
            field,
        }
    })?;

    let approaches = document
        .data
        .iter()
        .enumerate()
        .map(|(index, row)| -> Result<CloseApproach, ExtractError> {
            let reader = RowReader { path, index, row };
            Ok(CloseApproach::new(
                reader.text(columns.designation, "des")?.into_owned(),
                reader.time(columns.time)?,
                reader.float(columns.distance, "dist")?,
                reader.float(columns.velocity, "v_rel")?,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;
    info!("Loaded {} close approaches from {path}", approaches.len());
    Ok(approaches)
}
