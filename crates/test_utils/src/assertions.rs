//! Custom Test Assertions
//!
//! Specialized assertion helpers for ledger invariants that give more
//! meaningful error messages than standard assertions.

use core_kernel::round2;
use domain_ledger::{Ledger, Snapshot};
use rust_decimal::Decimal;

/// Asserts that two amounts are equal, naming what was compared
pub fn assert_amount_eq(label: &str, actual: Decimal, expected: Decimal) {
    assert_eq!(
        actual, expected,
        "{label}: expected {expected}, got {actual}"
    );
}

/// Asserts that an amount carries at most two decimal places
pub fn assert_rounded(label: &str, amount: Decimal) {
    assert_eq!(
        round2(amount),
        amount,
        "{label} is not rounded to two decimals: {amount}"
    );
}

/// Asserts the indexer invariants of a ledger
///
/// # Panics
///
/// Panics if dates go backwards, progressive numbers are not 1..=N or a
/// running total does not extend the previous one by the entry debit.
pub fn assert_ledger_indexed(ledger: &Ledger) {
    let mut previous_total = Decimal::ZERO;
    let mut previous_date = None;

    for (position, entry) in ledger.entries().iter().enumerate() {
        assert_eq!(
            entry.progressive_index as usize,
            position + 1,
            "Progressive index gap at position {position}"
        );
        if let Some(date) = previous_date {
            assert!(
                entry.date >= date,
                "Entry {} dated {} precedes {}",
                entry.progressive_index,
                entry.date,
                date
            );
        }
        assert_eq!(
            entry.running_total,
            round2(previous_total + entry.debit),
            "Running total broken at entry {}",
            entry.progressive_index
        );
        previous_total = entry.running_total;
        previous_date = Some(entry.date);
    }
}

/// Asserts that a snapshot's derived totals follow from its subtotals
pub fn assert_snapshot_consistent(snapshot: &Snapshot) {
    assert_amount_eq(
        "discount_base",
        snapshot.discount_base,
        round2(round2(snapshot.measure_gross + snapshot.body_gross) - snapshot.labor_excluded),
    );
    assert_amount_eq(
        "net_after_discount",
        snapshot.net_after_discount,
        round2(snapshot.discount_base - snapshot.discount),
    );
    assert_amount_eq(
        "total_net",
        snapshot.total_net,
        round2(round2(snapshot.net_after_discount + snapshot.labor_excluded) + snapshot.security),
    );
    for (label, amount) in [
        ("security", snapshot.security),
        ("measure_gross", snapshot.measure_gross),
        ("body_gross", snapshot.body_gross),
        ("discount", snapshot.discount),
        ("total_net", snapshot.total_net),
    ] {
        assert_rounded(label, amount);
    }
}
