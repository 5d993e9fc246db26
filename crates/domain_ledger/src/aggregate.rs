//! Progress roll-up by catalogue code
//!
//! Measured rows compare the measured quantity with the contractual one.
//! Lump-sum rows already carry a share of the group value, so their
//! estimated quantity is 1 and progress is that share times 100.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{ratio, round2};
use domain_catalogue::{BillingModel, Document};
use crate::entry::LedgerEntry;

/// Progress of one catalogue code
///
/// Items sharing a code across documents or groups land on the same row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRow {
    pub code: String,
    pub description: String,
    pub billing_model: BillingModel,
    pub estimated_quantity: Decimal,
    pub total_quantity: Decimal,
    pub total_amount: Decimal,
    pub progress_percent: Decimal,
}

type RowKey = (BillingModel, String);

/// Rolls entries up by (billing model, code), in order of first appearance
pub fn aggregate(entries: &[LedgerEntry], documents: &[Document]) -> Vec<AggregatedRow> {
    let mut contractual: HashMap<&str, Decimal> = HashMap::new();
    for item in documents
        .iter()
        .filter(|d| !d.frozen)
        .flat_map(|d| &d.groups)
        .filter(|g| g.billing_model == BillingModel::Measured)
        .flat_map(|g| &g.items)
    {
        let estimate = contractual.entry(item.code.as_str()).or_insert(Decimal::ZERO);
        *estimate = estimate.checked_add(item.quantity).unwrap_or(*estimate);
    }

    let mut rows: Vec<AggregatedRow> = Vec::new();
    let mut positions: HashMap<RowKey, usize> = HashMap::new();

    for entry in entries {
        let key = (entry.billing_model, entry.code.clone());
        let position = *positions.entry(key).or_insert_with(|| {
            let estimated_quantity = match entry.billing_model {
                BillingModel::Measured => contractual.get(entry.code.as_str()).copied().unwrap_or(Decimal::ZERO),
                BillingModel::LumpSum => Decimal::ONE,
            };
            rows.push(AggregatedRow {
                code: entry.code.clone(),
                description: entry.description.clone(),
                billing_model: entry.billing_model,
                estimated_quantity,
                total_quantity: Decimal::ZERO,
                total_amount: Decimal::ZERO,
                progress_percent: Decimal::ZERO,
            });
            rows.len() - 1
        });

        let row = &mut rows[position];
        row.total_quantity += entry.quantity_or_percent;
        row.total_amount = round2(row.total_amount + entry.debit);
    }

    for row in &mut rows {
        row.progress_percent = match row.billing_model {
            BillingModel::Measured => round2(ratio(row.total_quantity, row.estimated_quantity) * dec!(100)),
            BillingModel::LumpSum => round2(row.total_quantity * dec!(100)),
        };
    }

    rows
}
