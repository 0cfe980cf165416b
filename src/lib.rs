//! Facade crate for the near-Earth object close-approach engine.
//!
//! This crate re-exports the linked database, record and filter types, and
//! exposes dataset extraction and result export behind the `extract` feature.
//!
//! ```
//! use neo_engine::{NearEarthObject, NeoDatabase};
//!
//! # fn main() -> Result<(), neo_engine::RecordError> {
//! let db = NeoDatabase::new(
//!     vec![NearEarthObject::new("99942", Some("Apophis".into()), f64::NAN, true)?],
//!     Vec::new(),
//! );
//! assert!(db.get_neo_by_name("Apophis").is_some());
//! assert_eq!(db.query_all().count(), 0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub use neo_core::{
    ApproachFilter, ApproachId, ApproachRecord, ApproachRef, CloseApproach, Comparison, Criterion,
    DATETIME_FORMAT, NearEarthObject, NeoDatabase, NeoId, NeoRecord, NeoRef, Query, QueryCriteria,
    RecordError, datetime_to_str, from_fn, limit,
};

#[cfg(feature = "extract")]
pub use neo_data::{
    ExtractError, OutputFormat, WriteError, load_approaches, load_database, load_neos, write_csv,
    write_json, write_results,
};
