//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! works-accounting test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built catalogues and contract settings for known scenarios
//! - `builders`: Builder patterns for catalogue construction
//! - `assertions`: Ledger and snapshot invariant checks
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
