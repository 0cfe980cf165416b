//! Extraction and export for near-Earth object datasets.
//!
//! Responsibilities:
//! - Read the NEO catalogue (CSV) and close-approach export (JSON) into
//!   unlinked records, coercing optional fields to their defaults.
//! - Write query results to CSV or JSON.
//!
//! Boundaries:
//! - Linking and querying live in `neo-core`.
//! - Malformed files surface as errors; nothing is recovered silently.

#![forbid(unsafe_code)]

use camino::Utf8Path;
use neo_core::NeoDatabase;

pub mod extract;
pub mod write;

pub use extract::{
    CAD_DATETIME_FORMAT, ExtractError, cd_to_datetime, load_approaches, load_neos, to_boolean,
    to_float,
};
pub use write::{CSV_FIELDS, OutputFormat, WriteError, write_csv, write_json, write_results};

/// Load both datasets and build a linked [`NeoDatabase`].
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use neo_data::load_database;
///
/// # fn main() -> Result<(), neo_data::ExtractError> {
/// let db = load_database(Utf8Path::new("data/neos.csv"), Utf8Path::new("data/cad.json"))?;
/// println!("{} close approaches", db.approach_count());
/// # Ok(())
/// # }
/// ```
pub fn load_database(neofile: &Utf8Path, cadfile: &Utf8Path) -> Result<NeoDatabase, ExtractError> {
    let neos = load_neos(neofile)?;
    let approaches = load_approaches(cadfile)?;
    Ok(NeoDatabase::new(neos, approaches))
}
