//! Catalogue domain errors

use thiserror::Error;

/// Errors that can occur while editing the catalogue
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogueError {
    /// Work group not found in the document
    #[error("Work group not found: {0}")]
    UnknownGroup(String),

    /// Work item not found in the document
    #[error("Work item not found: {0}")]
    UnknownItem(String),

    /// Billing settings can only change after an explicit unlock
    #[error("Document {0} is locked; unlock it before changing billing settings")]
    DocumentLocked(String),

    /// Frozen documents accept no new measurements
    #[error("Document {0} is frozen")]
    DocumentFrozen(String),

    /// Groups with recorded measurements are permanent
    #[error("Work group {0} has recorded measurements and cannot be removed")]
    GroupHasMeasurements(String),
}
