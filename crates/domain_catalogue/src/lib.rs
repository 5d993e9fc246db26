//! Works Catalogue Domain
//!
//! This crate models the bill of quantities a construction contract is
//! accounted against, together with the measurements recorded on site.
//!
//! # Key Concepts
//!
//! - **Document**: an imported bill of quantities; a frozen document is
//!   ignored by accounting
//! - **Work Group**: a catalogue grouping billed either by measured quantity
//!   ("a misura") or as a percentage of a fixed value ("a corpo")
//! - **Work Item**: a priced catalogue line with contractual quantity
//! - **Measurement**: a dated, signed quantity; a negative quantity is a
//!   storno of an earlier measurement and never replaces it
//! - **Variation**: an amendment of the contractual quantity
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_catalogue::{BillingModel, Document, Measurement, WorkGroup, WorkItem};
//! use rust_decimal_macros::dec;
//!
//! let mut item = WorkItem::new("A.01", "Excavation", dec!(100), dec!(10));
//! item.add_measurement(Measurement::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), dec!(4)));
//!
//! let mut group = WorkGroup::new("A", "Earthworks", BillingModel::Measured);
//! group.add_item(item);
//!
//! let mut document = Document::new("Main contract");
//! document.add_group(group);
//! assert!(document.has_measurements());
//! ```

pub mod document;
pub mod work_group;
pub mod work_item;
pub mod measurement;
pub mod import;
pub mod error;

pub use document::Document;
pub use work_group::{BillingModel, WorkGroup};
pub use work_item::{Variation, WorkItem};
pub use measurement::{DimensionalFactors, Measurement};
pub use import::{import_documents, DocumentRecord, ImportReport, RejectedRecord};
pub use error::CatalogueError;
