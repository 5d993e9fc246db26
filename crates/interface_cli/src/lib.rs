//! SAL reporting surface
//!
//! Loads a project file (bill-of-quantities documents, checkpoints and raw
//! contract settings), replays the works ledger and assembles the report
//! printed by the `sal-report` binary.

pub mod config;
pub mod error;
pub mod project;
pub mod report;

pub use config::CliConfig;
pub use error::CliError;
pub use project::{Project, ProjectFile};
pub use report::SalReport;
