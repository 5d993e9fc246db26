//! Core Kernel - Foundational types for the works-accounting ledger
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Decimal money rounding and percentage arithmetic
//! - Calendar dates, defensive date parsing and the site timezone
//! - Strongly typed identifiers for catalogue entities and checkpoints

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{round2, ratio, line_amount, parse_decimal, Currency, Percentage, MoneyError, MAX_LINE_AMOUNT};
pub use temporal::{parse_iso_date, parse_date_lenient, Timezone, TemporalError};
pub use identifiers::{
    DocumentId, WorkGroupId, WorkItemId, MeasurementId, VariationId, CheckpointId,
};
