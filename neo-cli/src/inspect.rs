//! Inspect command implementation for the `neo` CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use neo_core::{NeoDatabase, NeoRef};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::sources::DataSources;
use crate::{ARG_CADFILE, ARG_NEOFILE, CliError, ENV_INSPECT_NAME, ENV_INSPECT_PDES};

/// Printed when the requested NEO is not in the database.
pub(crate) const NO_MATCH_MESSAGE: &str = "No matching NEOs exist in the database.";

/// CLI arguments for the `inspect` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Look up one near-Earth object by primary designation or by \
                 name and print its summary. With --verbose, every known \
                 close approach of the object is listed as well.",
    about = "Inspect a single near-Earth object"
)]
#[ortho_config(prefix = "NEO")]
pub(crate) struct InspectArgs {
    /// Path to the NEO catalogue (CSV).
    #[arg(long = ARG_NEOFILE, value_name = "path")]
    #[serde(default)]
    pub(crate) neofile: Option<Utf8PathBuf>,
    /// Path to the close-approach export (JSON).
    #[arg(long = ARG_CADFILE, value_name = "path")]
    #[serde(default)]
    pub(crate) cadfile: Option<Utf8PathBuf>,
    /// Primary designation of the NEO, e.g. "433".
    #[arg(long, value_name = "designation", conflicts_with = "name")]
    #[serde(default)]
    pub(crate) pdes: Option<String>,
    /// IAU name of the NEO, e.g. "Eros".
    #[arg(long, value_name = "name")]
    #[serde(default)]
    pub(crate) name: Option<String>,
    /// Also list every close approach of the NEO.
    #[arg(short, long)]
    #[serde(default)]
    pub(crate) verbose: bool,
}

impl InspectArgs {
    pub(crate) fn into_config(self) -> Result<InspectConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        InspectConfig::try_from(merged)
    }
}

/// How the NEO is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lookup {
    /// By primary designation.
    Designation(String),
    /// By IAU name.
    Name(String),
}

impl Lookup {
    fn find<'db>(&self, db: &'db NeoDatabase) -> Option<NeoRef<'db>> {
        match self {
            Self::Designation(designation) => db.get_neo_by_designation(designation),
            Self::Name(name) => db.get_neo_by_name(name),
        }
    }
}

/// Resolved `inspect` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InspectConfig {
    pub(crate) sources: DataSources,
    pub(crate) lookup: Lookup,
    pub(crate) verbose: bool,
}

impl TryFrom<InspectArgs> for InspectConfig {
    type Error = CliError;

    fn try_from(args: InspectArgs) -> Result<Self, Self::Error> {
        let lookup = match (args.pdes, args.name) {
            (Some(pdes), None) => Lookup::Designation(pdes),
            (None, Some(name)) => Lookup::Name(name),
            _ => {
                return Err(CliError::AmbiguousLookup {
                    pdes_env: ENV_INSPECT_PDES,
                    name_env: ENV_INSPECT_NAME,
                });
            }
        };
        Ok(Self {
            sources: DataSources::resolve(args.neofile, args.cadfile),
            lookup,
            verbose: args.verbose,
        })
    }
}

pub(crate) fn run_inspect_with(args: InspectArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let db = config.sources.load()?;
    inspect_database(&db, &config, writer)
}

pub(crate) fn inspect_database(
    db: &NeoDatabase,
    config: &InspectConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let Some(neo) = config.lookup.find(db) else {
        return writeln!(writer, "{NO_MATCH_MESSAGE}").map_err(CliError::WriteOutput);
    };
    writeln!(writer, "{neo}").map_err(CliError::WriteOutput)?;
    if config.verbose {
        for approach in neo.approaches() {
            writeln!(writer, "- {approach}").map_err(CliError::WriteOutput)?;
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<InspectConfig, CliError> {
    let merged = InspectArgs::merge_from_layers(layers).map_err(CliError::from)?;
    InspectConfig::try_from(merged)
}
