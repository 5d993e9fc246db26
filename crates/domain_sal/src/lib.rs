//! SAL Domain - Billing Checkpoints and Payment Certificates
//!
//! A SAL ("Stato Avanzamento Lavori") is a numbered billing checkpoint that
//! marks the cumulative value of the works at a date. The installment payable
//! at a checkpoint is the difference between its cumulative net value and
//! that of its numeric predecessor, less guarantee retention and advance
//! recovery, plus VAT.
//!
//! # Sequencing Rules
//!
//! - Checkpoint numbers are dense: 1, 2, ..., n
//! - Only the highest-numbered, unlocked checkpoint may be deleted
//! - A locked checkpoint's date cannot change
//!
//! Rule violations are rejected before anything is mutated.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_ledger::{ContractConfig, Ledger};
//! use domain_sal::CheckpointRegistry;
//!
//! let mut registry = CheckpointRegistry::new();
//! let first = registry.create(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()).id;
//! registry.create(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
//!
//! assert!(registry.delete(&first).is_err());
//!
//! let ledger = Ledger::build(&[]);
//! let certificates = registry.certificates(&ledger, &ContractConfig::default());
//! assert_eq!(certificates.len(), 2);
//! ```

pub mod checkpoint;
pub mod certificate;
pub mod error;

pub use checkpoint::{Checkpoint, CheckpointRegistry, CheckpointValue};
pub use certificate::{derive_certificate, PaymentCertificate};
pub use error::SalError;
