//! Project file loading
//!
//! A project file is the JSON export of one construction site: the imported
//! bill-of-quantities documents, the SAL checkpoints and the raw contract
//! settings as typed by the operator.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use domain_catalogue::{import_documents, Document, DocumentRecord, RejectedRecord};
use domain_ledger::{ContractConfig, ContractSettings, Ledger};
use domain_sal::CheckpointRegistry;

use crate::error::CliError;

/// On-disk shape of a project
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectFile {
    pub documents: Vec<DocumentRecord>,
    pub checkpoints: CheckpointRegistry,
    pub contract: ContractSettings,
}

impl ProjectFile {
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a project file
    pub fn read(path: &Path) -> Result<Self, CliError> {
        let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// A loaded project with its replayed ledger
#[derive(Debug, Clone)]
pub struct Project {
    pub documents: Vec<Document>,
    /// Import records dropped for an unreadable date
    pub rejected: Vec<RejectedRecord>,
    pub checkpoints: CheckpointRegistry,
    pub config: ContractConfig,
    pub ledger: Ledger,
}

impl Project {
    /// Imports the documents, coerces the settings and replays the ledger
    pub fn from_file(file: ProjectFile) -> Self {
        let report = import_documents(file.documents);
        if !report.rejected.is_empty() {
            warn!(rejected = report.rejected.len(), "Some records were dropped during import");
        }

        let ledger = Ledger::build(&report.documents);
        let project = Self {
            documents: report.documents,
            rejected: report.rejected,
            checkpoints: file.checkpoints,
            config: file.contract.into_config(),
            ledger,
        };

        info!(
            documents = project.documents.len(),
            entries = project.ledger.len(),
            checkpoints = project.checkpoints.len(),
            "Project loaded"
        );
        project
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        Ok(Self::from_file(ProjectFile::read(path)?))
    }
}
