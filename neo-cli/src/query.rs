//! Query command implementation for the `neo` CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::Parser;
use log::info;
use neo_core::{Criterion, NeoDatabase, QueryCriteria, limit};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::sources::DataSources;
use crate::{ARG_CADFILE, ARG_NEOFILE, ARG_OUTFILE, CliError};

/// Number of matches printed to stdout when no positive limit is given.
pub(crate) const DEFAULT_STDOUT_LIMIT: usize = 10;

/// CLI arguments for the `query` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Select close approaches matching every given criterion. \
                 Results are printed to stdout (at most --limit, default 10) \
                 or written to --outfile as CSV or JSON, chosen by the file \
                 extension.",
    about = "Query close approaches"
)]
#[ortho_config(prefix = "NEO")]
pub(crate) struct QueryArgs {
    /// Path to the NEO catalogue (CSV).
    #[arg(long = ARG_NEOFILE, value_name = "path")]
    #[serde(default)]
    pub(crate) neofile: Option<Utf8PathBuf>,
    /// Path to the close-approach export (JSON).
    #[arg(long = ARG_CADFILE, value_name = "path")]
    #[serde(default)]
    pub(crate) cadfile: Option<Utf8PathBuf>,
    /// Only approaches on this date (YYYY-MM-DD).
    #[arg(short, long, value_name = "date")]
    #[serde(default)]
    pub(crate) date: Option<NaiveDate>,
    /// Only approaches on or after this date (YYYY-MM-DD).
    #[arg(short, long, value_name = "date")]
    #[serde(default)]
    pub(crate) start_date: Option<NaiveDate>,
    /// Only approaches on or before this date (YYYY-MM-DD).
    #[arg(short, long, value_name = "date")]
    #[serde(default)]
    pub(crate) end_date: Option<NaiveDate>,
    /// Minimum approach distance in au.
    #[arg(long, value_name = "au")]
    #[serde(default)]
    pub(crate) min_distance: Option<f64>,
    /// Maximum approach distance in au.
    #[arg(long, value_name = "au")]
    #[serde(default)]
    pub(crate) max_distance: Option<f64>,
    /// Minimum relative velocity in km/s.
    #[arg(long, value_name = "km/s")]
    #[serde(default)]
    pub(crate) min_velocity: Option<f64>,
    /// Maximum relative velocity in km/s.
    #[arg(long, value_name = "km/s")]
    #[serde(default)]
    pub(crate) max_velocity: Option<f64>,
    /// Minimum NEO diameter in km.
    #[arg(long, value_name = "km")]
    #[serde(default)]
    pub(crate) min_diameter: Option<f64>,
    /// Maximum NEO diameter in km.
    #[arg(long, value_name = "km")]
    #[serde(default)]
    pub(crate) max_diameter: Option<f64>,
    /// Only potentially hazardous (true) or non-hazardous (false) NEOs.
    #[arg(long, value_name = "bool")]
    #[serde(default)]
    pub(crate) hazardous: Option<bool>,
    /// Maximum number of matches; 0 means no limit.
    #[arg(short, long, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Write matches to this .csv or .json file instead of stdout.
    #[arg(short, long = ARG_OUTFILE, value_name = "path")]
    #[serde(default)]
    pub(crate) outfile: Option<Utf8PathBuf>,
}

impl QueryArgs {
    pub(crate) fn into_config(self) -> Result<QueryConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        QueryConfig::try_from(merged)
    }
}

/// Resolved `query` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QueryConfig {
    pub(crate) sources: DataSources,
    pub(crate) criteria: QueryCriteria,
    pub(crate) limit: Option<usize>,
    pub(crate) outfile: Option<Utf8PathBuf>,
}

impl QueryConfig {
    /// Cap applied when printing to stdout.
    pub(crate) fn stdout_limit(&self) -> usize {
        self.limit
            .filter(|&count| count > 0)
            .unwrap_or(DEFAULT_STDOUT_LIMIT)
    }
}

impl TryFrom<QueryArgs> for QueryConfig {
    type Error = CliError;

    fn try_from(args: QueryArgs) -> Result<Self, Self::Error> {
        if let (Some(start), Some(end)) = (args.start_date, args.end_date)
            && start > end
        {
            return Err(CliError::InvalidDateRange { start, end });
        }
        let criteria = QueryCriteria {
            date: args.date,
            start_date: args.start_date,
            end_date: args.end_date,
            distance_min: args.min_distance,
            distance_max: args.max_distance,
            velocity_min: args.min_velocity,
            velocity_max: args.max_velocity,
            diameter_min: args.min_diameter,
            diameter_max: args.max_diameter,
            hazardous: args.hazardous,
        };
        Ok(Self {
            sources: DataSources::resolve(args.neofile, args.cadfile),
            criteria,
            limit: args.limit,
            outfile: args.outfile,
        })
    }
}

pub(crate) fn run_query_with(args: QueryArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let db = config.sources.load()?;
    query_database(&db, &config, writer)
}

pub(crate) fn query_database(
    db: &NeoDatabase,
    config: &QueryConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let filters: Vec<Criterion> = config.criteria.into_filters();
    if !filters.is_empty() {
        let described: Vec<String> = filters.iter().map(ToString::to_string).collect();
        info!("Querying with {}", described.join(", "));
    }
    let results = db.query(&filters);

    if let Some(outfile) = &config.outfile {
        let count = neo_data::write_results(outfile, limit(results, config.limit))?;
        return writeln!(writer, "Wrote {count} close approaches to {outfile}")
            .map_err(CliError::WriteOutput);
    }

    for approach in limit(results, Some(config.stdout_limit())) {
        writeln!(writer, "{approach}").map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<QueryConfig, CliError> {
    let merged = QueryArgs::merge_from_layers(layers).map_err(CliError::from)?;
    QueryConfig::try_from(merged)
}
