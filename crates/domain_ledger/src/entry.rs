//! Ledger entries and the entry builder
//!
//! The builder reduces the two billing models to one flat entry shape:
//! - measured groups emit one entry per measurement, debit = quantity x unit price
//! - lump-sum groups emit one entry per (group, date), aggregating every
//!   measurement of every item of the group on that date; the entry quantity
//!   is the share of the group value, not a physical quantity

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::{line_amount, ratio, round2, DocumentId, MeasurementId, WorkGroupId, WorkItemId};
use domain_catalogue::{BillingModel, Document, WorkGroup, WorkItem};

/// What a ledger entry accounts for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum EntrySubject {
    /// A single measured work item
    Item(WorkItemId),
    /// A whole lump-sum group
    Group(WorkGroupId),
}

/// One line of the progressive works register
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// 1-based position in the chronological register; 0 until indexed
    pub progressive_index: u32,
    pub date: NaiveDate,
    pub document_id: DocumentId,
    pub group_id: WorkGroupId,
    pub subject: EntrySubject,
    /// Catalogue code of the item (measured) or group (lump sum)
    pub code: String,
    pub description: String,
    pub billing_model: BillingModel,
    /// Quantity for measured entries, share of the group value for lump-sum ones
    pub quantity_or_percent: Decimal,
    /// Unit price for measured entries, group value for lump-sum ones
    pub reference_price: Decimal,
    pub debit: Decimal,
    /// Cumulative debit up to and including this entry; 0 until indexed
    pub running_total: Decimal,
    pub is_security_cost: bool,
    pub labor_amount: Decimal,
    pub note: Option<String>,
    pub measurement_id: Option<MeasurementId>,
}

/// Flattens the measurements of every non-frozen document into unindexed entries
///
/// Emission order is documents, groups, items, measurements; lump-sum
/// buckets are emitted in ascending date order.
pub fn build_entries(documents: &[Document]) -> Vec<LedgerEntry> {
    let mut entries = Vec::new();

    for document in documents.iter().filter(|d| !d.frozen) {
        for group in &document.groups {
            match group.billing_model {
                BillingModel::Measured => {
                    for item in &group.items {
                        entries.extend(measured_entries(document.id, group, item));
                    }
                }
                BillingModel::LumpSum => {
                    entries.extend(lump_sum_entries(document.id, group));
                }
            }
        }
    }

    entries
}

fn measured_entries<'a>(
    document_id: DocumentId,
    group: &'a WorkGroup,
    item: &'a WorkItem,
) -> impl Iterator<Item = LedgerEntry> + 'a {
    item.measurements.iter().map(move |measurement| {
        let debit = line_debit(item, measurement.quantity);
        LedgerEntry {
            progressive_index: 0,
            date: measurement.date,
            document_id,
            group_id: group.id,
            subject: EntrySubject::Item(item.id),
            code: item.code.clone(),
            description: item.description.clone(),
            billing_model: BillingModel::Measured,
            quantity_or_percent: measurement.quantity,
            reference_price: item.unit_price,
            debit,
            running_total: Decimal::ZERO,
            is_security_cost: group.security_cost,
            labor_amount: item.labor_rate.of(debit),
            note: measurement.note.clone(),
            measurement_id: Some(measurement.id),
        }
    })
}

/// quantity x unit price; a line out of ledger range counts as zero
fn line_debit(item: &WorkItem, quantity: Decimal) -> Decimal {
    line_amount(quantity, item.unit_price).unwrap_or_else(|| {
        warn!(
            code = %item.code,
            %quantity,
            unit_price = %item.unit_price,
            "Line amount out of range, counted as zero"
        );
        Decimal::ZERO
    })
}

#[derive(Default)]
struct DayBucket {
    debit: Decimal,
    labor: Decimal,
}

fn lump_sum_entries(document_id: DocumentId, group: &WorkGroup) -> Vec<LedgerEntry> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for item in &group.items {
        for measurement in &item.measurements {
            let line = line_debit(item, measurement.quantity);
            let bucket = buckets.entry(measurement.date).or_default();
            bucket.debit = round2(bucket.debit + line);
            bucket.labor = round2(bucket.labor + item.labor_rate.of(line));
        }
    }

    buckets
        .into_iter()
        .map(|(date, bucket)| LedgerEntry {
            progressive_index: 0,
            date,
            document_id,
            group_id: group.id,
            subject: EntrySubject::Group(group.id),
            code: group.code.clone(),
            description: group.description.clone(),
            billing_model: BillingModel::LumpSum,
            quantity_or_percent: ratio(bucket.debit, group.value),
            reference_price: group.value,
            debit: bucket.debit,
            running_total: Decimal::ZERO,
            is_security_cost: group.security_cost,
            labor_amount: bucket.labor,
            note: None,
            measurement_id: None,
        })
        .collect()
}
