//! The indexed works register
//!
//! This module provides the indexer and the read API over the indexed
//! entries: register views, snapshots and progress aggregation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::round2;
use domain_catalogue::{BillingModel, Document};
use crate::aggregate::{self, AggregatedRow};
use crate::config::ContractConfig;
use crate::entry::{build_entries, LedgerEntry};
use crate::snapshot::Snapshot;

/// The chronological register of debits derived from a catalogue
///
/// # Invariants
///
/// - Entries are sorted by date; same-date entries keep emission order
/// - `progressive_index` runs 1..=N without gaps
/// - `running_total[i] = running_total[i - 1] + debit[i]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    lump_sum_value: Decimal,
}

impl Ledger {
    /// Builds and indexes the ledger of the given documents
    ///
    /// Frozen documents are skipped wholesale.
    pub fn build(documents: &[Document]) -> Self {
        let entries = build_entries(documents);
        let lump_sum_value = lump_sum_value(documents);

        debug!(
            documents = documents.len(),
            frozen = documents.iter().filter(|d| d.frozen).count(),
            entries = entries.len(),
            "Rebuilt ledger"
        );

        Self::from_entries(entries, lump_sum_value)
    }

    /// Indexes already-built entries
    ///
    /// # Arguments
    ///
    /// * `entries` - Unindexed entries in emission order
    /// * `lump_sum_value` - Denominator of the lump-sum progress percentage
    pub fn from_entries(entries: Vec<LedgerEntry>, lump_sum_value: Decimal) -> Self {
        Self {
            entries: index(entries),
            lump_sum_value,
        }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total value of non-security lump-sum groups
    pub fn lump_sum_value(&self) -> Decimal {
        self.lump_sum_value
    }

    /// Date of the latest entry
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.entries.last().map(|e| e.date)
    }

    /// Cumulative debit of the whole register
    pub fn total(&self) -> Decimal {
        self.entries
            .last()
            .map(|e| e.running_total)
            .unwrap_or(Decimal::ZERO)
    }

    /// Register lines dated on or before the cut-off
    pub fn entries_until(&self, cutoff: NaiveDate) -> &[LedgerEntry] {
        let end = self.entries.partition_point(|e| e.date <= cutoff);
        &self.entries[..end]
    }

    /// Financial snapshot at the cut-off date
    pub fn snapshot(&self, cutoff: NaiveDate, config: &ContractConfig) -> Snapshot {
        Snapshot::compute(self.entries_until(cutoff), self.lump_sum_value, cutoff, config)
    }

    /// Progress rows by catalogue code
    pub fn aggregate(&self, documents: &[Document]) -> Vec<AggregatedRow> {
        aggregate::aggregate(&self.entries, documents)
    }
}

/// Stable-sorts entries by date and assigns progressive numbers and running totals
fn index(mut entries: Vec<LedgerEntry>) -> Vec<LedgerEntry> {
    entries.sort_by_key(|e| e.date);

    let mut running_total = Decimal::ZERO;
    for (position, entry) in entries.iter_mut().enumerate() {
        running_total = round2(running_total + entry.debit);
        entry.progressive_index = position as u32 + 1;
        entry.running_total = running_total;
    }

    entries
}

fn lump_sum_value(documents: &[Document]) -> Decimal {
    documents
        .iter()
        .filter(|d| !d.frozen)
        .flat_map(|d| &d.groups)
        .filter(|g| g.billing_model == BillingModel::LumpSum && !g.security_cost)
        .fold(Decimal::ZERO, |acc, g| round2(acc + g.value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_catalogue::{Measurement, WorkGroup, WorkItem};
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn documents() -> Vec<Document> {
        let mut first = WorkItem::new("A.1", "First", dec!(10), dec!(100));
        first.add_measurement(Measurement::new(day(5), dec!(1)));
        first.add_measurement(Measurement::new(day(1), dec!(2)));
        let mut second = WorkItem::new("A.2", "Second", dec!(1), dec!(100));
        second.add_measurement(Measurement::new(day(5), dec!(3)));

        let mut group = WorkGroup::new("A", "Works", BillingModel::Measured);
        group.add_item(first);
        group.add_item(second);
        let mut body = WorkGroup::new("B", "Body", BillingModel::LumpSum).with_value(dec!(2000));
        body.add_item(WorkItem::new("B.1", "Structure", dec!(2000), dec!(1)));
        let mut document = Document::new("Contract");
        document.add_group(group);
        document.add_group(body);
        vec![document]
    }

    #[test]
    fn test_index_is_stable_and_cumulative() {
        let ledger = Ledger::build(&documents());
        let entries = ledger.entries();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].date, day(1));
        assert_eq!(entries[1].code, "A.1");
        assert_eq!(entries[2].code, "A.2");
        assert_eq!(
            entries.iter().map(|e| e.progressive_index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(entries[2].running_total, dec!(33.00));
        assert_eq!(ledger.total(), dec!(33.00));
        assert_eq!(ledger.lump_sum_value(), dec!(2000));
    }

    #[test]
    fn test_entries_until() {
        let ledger = Ledger::build(&documents());
        assert_eq!(ledger.entries_until(day(4)).len(), 1);
        assert_eq!(ledger.entries_until(day(5)).len(), 3);
        assert!(ledger.entries_until(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()).is_empty());
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = Ledger::build(&[]);
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), Decimal::ZERO);
        assert_eq!(ledger.last_date(), None);
    }
}
