//! Writers that export query results as CSV or JSON.
//!
//! CSV rows flatten the NEO fields next to the approach fields; JSON keeps
//! the NEO nested under `neo`. Both consume the result stream lazily.

use std::io::{self, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use neo_core::{ApproachRecord, ApproachRef};
use neo_fs::{StagedFile, ensure_parent_dir};
use serde::Serializer as _;
use thiserror::Error;

/// Column order of CSV exports.
pub const CSV_FIELDS: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

/// Errors returned while exporting results.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The output path has no recognised extension.
    #[error("cannot infer output format from {path:?}; use a .csv or .json extension")]
    UnsupportedFormat {
        /// Requested output path.
        path: Utf8PathBuf,
    },
    /// The output file or its parent directory could not be created.
    #[error("failed to create {path:?}: {source}")]
    Create {
        /// Requested output path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The finished export could not be moved over the output path.
    #[error("failed to replace {path:?}: {source}")]
    Persist {
        /// Requested output path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The CSV encoder failed.
    #[error("failed to write CSV output: {0}")]
    Csv(#[from] csv::Error),
    /// The JSON encoder failed.
    #[error("failed to write JSON output: {0}")]
    Json(#[from] serde_json::Error),
    /// Flushing the output failed.
    #[error("failed to flush output: {0}")]
    Io(#[from] io::Error),
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// A pretty-printed JSON array.
    Json,
}

impl OutputFormat {
    /// Choose the format from the file extension (case-insensitive).
    pub fn from_path(path: &Utf8Path) -> Result<Self, WriteError> {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(WriteError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn csv_row(record: &ApproachRecord, designation: &str) -> [String; 7] {
    let (designation, name, diameter, hazardous) = match &record.neo {
        Some(neo) => (
            neo.designation.clone(),
            neo.name.clone(),
            format_float(neo.diameter_km),
            neo.potentially_hazardous.to_string(),
        ),
        None => (designation.to_owned(), String::new(), String::new(), String::new()),
    };
    [
        record.datetime_utc.clone(),
        format_float(record.distance_au),
        format_float(record.velocity_km_s),
        designation,
        name,
        diameter,
        hazardous,
    ]
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_owned()
    } else {
        value.to_string()
    }
}

/// Write results as CSV and return the number of rows written.
///
/// Unlinked approaches keep their own designation and leave the other NEO
/// columns empty.
pub fn write_csv<'db, W, I>(writer: W, results: I) -> Result<usize, WriteError>
where
    W: Write,
    I: IntoIterator<Item = ApproachRef<'db>>,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_FIELDS)?;
    let mut count = 0_usize;
    for approach in results {
        csv.write_record(csv_row(&approach.serialize(), approach.designation()))?;
        count += 1;
    }
    csv.flush()?;
    Ok(count)
}

/// Write results as a pretty-printed JSON array and return the record count.
///
/// Unknown diameters are written as `null`.
pub fn write_json<'db, W, I>(mut writer: W, results: I) -> Result<usize, WriteError>
where
    W: Write,
    I: IntoIterator<Item = ApproachRef<'db>>,
{
    let mut count = 0_usize;
    {
        let mut serializer = serde_json::Serializer::pretty(&mut writer);
        let records = results.into_iter().map(|approach| {
            count += 1;
            approach.serialize()
        });
        serializer.collect_seq(records)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(count)
}

/// Write results to `path`, choosing the format from its extension.
///
/// Missing parent directories are created. The export is staged beside
/// `path` and renamed over it once complete, so on error any previous file at
/// `path` is left as it was and no partial output remains.
pub fn write_results<'db, I>(path: &Utf8Path, results: I) -> Result<usize, WriteError>
where
    I: IntoIterator<Item = ApproachRef<'db>>,
{
    let format = OutputFormat::from_path(path)?;
    let create_error = |source| WriteError::Create {
        path: path.to_path_buf(),
        source,
    };
    ensure_parent_dir(path).map_err(create_error)?;
    let (staged, file) = StagedFile::create(path).map_err(create_error)?;
    let writer = BufWriter::new(file);
    let count = match format {
        OutputFormat::Csv => write_csv(writer, results)?,
        OutputFormat::Json => write_json(writer, results)?,
    };
    staged.commit().map_err(|source| WriteError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {count} close approaches to {path}");
    Ok(count)
}
