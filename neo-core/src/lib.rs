//! Core records and the linking database for near-Earth object data.
//!
//! [`NeoDatabase`] owns a collection of [`NearEarthObject`]s and
//! [`CloseApproach`]es, indexes the NEOs by designation and by name, and
//! links every approach to its NEO. [`NeoDatabase::query`] streams the
//! approaches accepted by a set of [`ApproachFilter`]s.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod database;
pub mod filters;
pub mod model;
pub mod record;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
pub mod time;

pub use database::{ApproachRef, NeoDatabase, NeoRef, Query};
pub use filters::{ApproachFilter, Comparison, Criterion, FromFn, QueryCriteria, from_fn, limit};
pub use model::{ApproachId, CloseApproach, NearEarthObject, NeoId, RecordError};
pub use record::{ApproachRecord, NeoRecord};
pub use time::{DATETIME_FORMAT, datetime_to_str};
