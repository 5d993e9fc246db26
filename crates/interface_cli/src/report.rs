//! The SAL report
//!
//! Everything a reporting collaborator renders for one checkpoint: the
//! register up to its date, the financial snapshot, the cumulative
//! progression of every checkpoint, the payment certificate and the
//! progress roll-up.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::Currency;
use domain_catalogue::RejectedRecord;
use domain_ledger::{AggregatedRow, LedgerEntry, Snapshot};
use domain_sal::{CheckpointValue, PaymentCertificate};

use crate::error::CliError;
use crate::project::Project;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalReport {
    /// Reported SAL, absent when the project has no checkpoint yet
    pub checkpoint: Option<u32>,
    pub cutoff: NaiveDate,
    pub currency: Currency,
    pub lump_sum_value: Decimal,
    /// Register lines up to the cut-off
    pub entries: Vec<LedgerEntry>,
    pub snapshot: Snapshot,
    pub progression: Vec<CheckpointValue>,
    pub certificate: Option<PaymentCertificate>,
    pub progress: Vec<AggregatedRow>,
    pub rejected: Vec<RejectedRecord>,
}

impl SalReport {
    /// Builds the report of one checkpoint
    ///
    /// # Arguments
    ///
    /// * `project` - Loaded project
    /// * `checkpoint` - SAL number to report; the active checkpoint when `None`
    /// * `today` - Cut-off used when the project has no checkpoint
    ///
    /// # Errors
    ///
    /// Returns `UnknownCheckpoint` if the requested SAL does not exist
    pub fn build(project: &Project, checkpoint: Option<u32>, today: NaiveDate) -> Result<Self, CliError> {
        let registry = &project.checkpoints;
        let selected = match checkpoint {
            Some(number) => Some(registry.by_number(number).ok_or(CliError::UnknownCheckpoint(number))?),
            None => registry.active(),
        };
        let cutoff = selected.map(|c| c.date).unwrap_or(today);

        let certificate = selected
            .map(|c| registry.certificate(&c.id, &project.ledger, &project.config))
            .transpose()?;

        Ok(Self {
            checkpoint: selected.map(|c| c.number),
            cutoff,
            currency: project.config.currency,
            lump_sum_value: project.ledger.lump_sum_value(),
            entries: project.ledger.entries_until(cutoff).to_vec(),
            snapshot: project.ledger.snapshot(cutoff, &project.config),
            progression: registry.progression(&project.ledger, &project.config),
            certificate,
            progress: project.ledger.aggregate(&project.documents),
            rejected: project.rejected.clone(),
        })
    }
}
