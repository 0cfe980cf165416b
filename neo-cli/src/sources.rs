//! Input file resolution shared by every subcommand.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use neo_core::NeoDatabase;

use crate::{ARG_CADFILE, ARG_NEOFILE, CliError};

/// Default location of the NEO catalogue.
pub(crate) const DEFAULT_NEOFILE: &str = "data/neos.csv";
/// Default location of the close-approach export.
pub(crate) const DEFAULT_CADFILE: &str = "data/cad.json";

/// Resolved paths of the two source datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DataSources {
    /// NEO catalogue (CSV).
    pub(crate) neofile: Utf8PathBuf,
    /// Close-approach export (JSON).
    pub(crate) cadfile: Utf8PathBuf,
}

impl DataSources {
    pub(crate) fn resolve(neofile: Option<Utf8PathBuf>, cadfile: Option<Utf8PathBuf>) -> Self {
        Self {
            neofile: neofile.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_NEOFILE)),
            cadfile: cadfile.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CADFILE)),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), CliError> {
        Self::require_existing(&self.neofile, ARG_NEOFILE)?;
        Self::require_existing(&self.cadfile, ARG_CADFILE)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match neo_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Validate both paths and build the linked database.
    pub(crate) fn load(&self) -> Result<NeoDatabase, CliError> {
        self.validate()?;
        let db = neo_data::load_database(&self.neofile, &self.cadfile)?;
        debug!(
            "Database ready with {} NEOs and {} close approaches",
            db.neo_count(),
            db.approach_count()
        );
        Ok(db)
    }
}
