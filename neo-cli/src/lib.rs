//! Command-line interface for exploring near-Earth object close approaches.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod inspect;
mod query;
mod sources;

pub use error::CliError;

use inspect::{InspectArgs, run_inspect_with};
use query::{QueryArgs, run_query_with};

const ARG_NEOFILE: &str = "neofile";
const ARG_CADFILE: &str = "cadfile";
const ARG_OUTFILE: &str = "outfile";
const ENV_INSPECT_PDES: &str = "NEO_CMDS_INSPECT_PDES";
const ENV_INSPECT_NAME: &str = "NEO_CMDS_INSPECT_NAME";

/// Run the `neo` CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Inspect(args) => run_inspect_with(args, &mut stdout),
        Command::Query(args) => run_query_with(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "neo",
    about = "Explore near-Earth objects and their close approaches to Earth",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Inspect a single NEO by designation or name.
    Inspect(InspectArgs),
    /// Query close approaches and print or export the matches.
    Query(QueryArgs),
}

#[cfg(test)]
mod tests;
