//! Point-in-time financial snapshots
//!
//! A snapshot is the technical SAL summary of every entry dated on or before
//! a cut-off. Security charges are isolated from the discount, labor can be
//! kept out of the discount base, and every step is rounded to two decimals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ratio, round2};
use domain_catalogue::BillingModel;
use crate::config::ContractConfig;
use crate::entry::LedgerEntry;

/// Financial breakdown of the ledger at a cut-off date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Entries dated after the cut-off are excluded
    pub cutoff: NaiveDate,
    /// Number of entries included
    pub entry_count: usize,
    /// Security charges, never discounted
    pub security: Decimal,
    /// Measured works, security excluded
    pub measure_gross: Decimal,
    pub measure_labor: Decimal,
    /// Lump-sum works, security excluded
    pub body_gross: Decimal,
    pub body_labor: Decimal,
    /// Labor kept out of the discount base
    pub labor_excluded: Decimal,
    pub discount_base: Decimal,
    pub discount: Decimal,
    pub net_after_discount: Decimal,
    /// Cumulative net value of the works at the cut-off
    pub total_net: Decimal,
    /// Lump-sum progress as a fraction of the non-security lump-sum value
    pub body_percentage: Decimal,
}

impl Snapshot {
    /// Computes the snapshot of `entries` at `cutoff`
    ///
    /// # Arguments
    ///
    /// * `entries` - Ledger entries in any order
    /// * `lump_sum_value` - Total value of non-security lump-sum groups
    /// * `cutoff` - Inclusive cut-off date
    /// * `config` - Contract rules
    pub fn compute<'a, I>(
        entries: I,
        lump_sum_value: Decimal,
        cutoff: NaiveDate,
        config: &ContractConfig,
    ) -> Self
    where
        I: IntoIterator<Item = &'a LedgerEntry>,
    {
        let mut entry_count = 0;
        let mut security = Decimal::ZERO;
        let mut measure_gross = Decimal::ZERO;
        let mut measure_labor = Decimal::ZERO;
        let mut body_gross = Decimal::ZERO;
        let mut body_labor = Decimal::ZERO;

        for entry in entries.into_iter().filter(|e| e.date <= cutoff) {
            entry_count += 1;

            if entry.is_security_cost {
                security = round2(security + entry.debit);
                continue;
            }

            match entry.billing_model {
                BillingModel::Measured => {
                    measure_gross = round2(measure_gross + entry.debit);
                    measure_labor = round2(measure_labor + entry.labor_amount);
                }
                BillingModel::LumpSum => {
                    body_gross = round2(body_gross + entry.debit);
                    body_labor = round2(body_labor + entry.labor_amount);
                }
            }
        }

        let labor_excluded = if config.exclude_labor_from_discount {
            round2(measure_labor + body_labor)
        } else {
            Decimal::ZERO
        };

        let discount_base = round2(round2(measure_gross + body_gross) - labor_excluded);
        let discount = config.discount_percent.of(discount_base);
        let net_after_discount = round2(discount_base - discount);
        let total_net = round2(round2(net_after_discount + labor_excluded) + security);

        Self {
            cutoff,
            entry_count,
            security,
            measure_gross,
            measure_labor,
            body_gross,
            body_labor,
            labor_excluded,
            discount_base,
            discount,
            net_after_discount,
            total_net,
            body_percentage: ratio(body_gross, lump_sum_value),
        }
    }

    /// Gross value of the works before discount, security included
    pub fn gross_total(&self) -> Decimal {
        round2(round2(self.measure_gross + self.body_gross) + self.security)
    }
}
