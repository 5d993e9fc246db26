//! Works-Accounting Ledger Domain
//!
//! This crate reduces the measurements of a works catalogue into a single,
//! chronologically ordered register of debits and derives point-in-time
//! financial snapshots from it.
//!
//! # Replay Model
//!
//! The ledger is never stored. [`Ledger::build`] recomputes it from the
//! current catalogue state on every read:
//!
//! 1. the entry builder flattens measurements into entries, one per
//!    measurement for measured groups and one per (group, date) for
//!    lump-sum groups
//! 2. the indexer stable-sorts entries by date and assigns the progressive
//!    number and running total
//!
//! Building is O(n log n) in the number of entries and a snapshot is O(n),
//! so reporting every checkpoint costs O(checkpoints x entries). The ledger
//! keeps no cache between calls: the same catalogue and configuration always
//! produce identical entries and snapshots, whatever was computed before.
//!
//! # Rounding
//!
//! Every monetary product and every partial sum is rounded to two decimals
//! as soon as it is computed (round-then-accumulate).
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_catalogue::{BillingModel, Document, Measurement, WorkGroup, WorkItem};
//! use domain_ledger::{ContractConfig, Ledger};
//! use rust_decimal_macros::dec;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let mut item = WorkItem::new("A.01", "Excavation", dec!(100), dec!(10));
//! item.add_measurement(Measurement::new(day, dec!(6)));
//! let mut group = WorkGroup::new("A", "Earthworks", BillingModel::Measured);
//! group.add_item(item);
//! let mut document = Document::new("Contract");
//! document.add_group(group);
//!
//! let ledger = Ledger::build(&[document]);
//! let snapshot = ledger.snapshot(day, &ContractConfig::default());
//! assert_eq!(snapshot.total_net, dec!(600.00));
//! ```

pub mod config;
pub mod entry;
pub mod ledger;
pub mod snapshot;
pub mod aggregate;

pub use config::{ContractConfig, ContractSettings, RawPercent};
pub use entry::{build_entries, EntrySubject, LedgerEntry};
pub use ledger::Ledger;
pub use snapshot::Snapshot;
pub use aggregate::AggregatedRow;
