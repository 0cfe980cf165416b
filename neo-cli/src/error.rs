//! Error types emitted by the `neo` CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use neo_data::{ExtractError, WriteError};
use thiserror::Error;

/// Errors emitted by the `neo` CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// `inspect` needs exactly one lookup key.
    #[error("inspect needs exactly one of --pdes or --name (or {pdes_env} / {name_env})")]
    AmbiguousLookup {
        /// Environment variable for the designation.
        pdes_env: &'static str,
        /// Environment variable for the name.
        name_env: &'static str,
    },
    /// The requested date window is empty.
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange {
        /// Lower bound.
        start: NaiveDate,
        /// Upper bound.
        end: NaiveDate,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Loading the NEO or close-approach data failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),
    /// Exporting query results failed.
    #[error(transparent)]
    Export(#[from] WriteError),
    /// Writing to stdout failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
