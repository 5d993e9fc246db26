//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating catalogues that respect the
//! catalogue invariants: dates in 2024, prices and quantities with realistic
//! precision, signed measurements for storni.

use chrono::{Days, NaiveDate};
use core_kernel::Percentage;
use domain_catalogue::{BillingModel, Document, Measurement, WorkGroup, WorkItem};
use domain_ledger::ContractConfig;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for dates in 2024
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..366u64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|start| start.checked_add_days(Days::new(offset)))
            .unwrap_or(NaiveDate::MIN)
    })
}

/// Strategy for unit prices with two decimals (0.01 to 5000.00)
pub fn unit_price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for signed measured quantities with three decimals
pub fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (-20_000i64..100_000i64).prop_map(|milli| Decimal::new(milli, 3))
}

/// Strategy for positive measured quantities with three decimals
pub fn positive_quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|milli| Decimal::new(milli, 3))
}

/// Strategy for percentages with two decimals (0% to 100%)
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..10_000u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// Strategy for billing models
pub fn billing_model_strategy() -> impl Strategy<Value = BillingModel> {
    prop_oneof![Just(BillingModel::Measured), Just(BillingModel::LumpSum)]
}

/// Strategy for a work item with up to six measurements
pub fn work_item_strategy() -> impl Strategy<Value = WorkItem> {
    (
        "[A-Z]\\.[0-9]{2}",
        unit_price_strategy(),
        positive_quantity_strategy(),
        percentage_strategy(),
        prop::collection::vec((date_strategy(), quantity_strategy()), 0..6),
    )
        .prop_map(|(code, unit_price, quantity, labor_rate, measurements)| {
            let mut item = WorkItem::new(code, "Generated item", unit_price, quantity)
                .with_labor_rate(Percentage::new(labor_rate));
            for (date, measured) in measurements {
                item.add_measurement(Measurement::new(date, measured));
            }
            item
        })
}

/// Strategy for a work group of either billing model
pub fn work_group_strategy() -> impl Strategy<Value = WorkGroup> {
    (
        "[A-Z]{1,2}",
        billing_model_strategy(),
        prop_oneof![Just(Decimal::ZERO), unit_price_strategy()],
        any::<bool>(),
        prop::collection::vec(work_item_strategy(), 1..4),
    )
        .prop_map(|(code, model, value, security_cost, items)| {
            let mut group = WorkGroup::new(code, "Generated group", model).with_value(value);
            group.security_cost = security_cost;
            for item in items {
                group.add_item(item);
            }
            group
        })
}

/// Strategy for a set of documents, some possibly frozen
pub fn documents_strategy() -> impl Strategy<Value = Vec<Document>> {
    prop::collection::vec(
        (any::<bool>(), prop::collection::vec(work_group_strategy(), 1..4)),
        1..3,
    )
    .prop_map(|documents| {
        documents
            .into_iter()
            .enumerate()
            .map(|(n, (frozen, groups))| {
                let mut document = Document::new(format!("Document {}", n + 1));
                for group in groups {
                    document.add_group(group);
                }
                // keep most documents live so ledgers are rarely empty
                document.frozen = frozen && n > 0;
                document
            })
            .collect()
    })
}

/// Strategy for contract configurations
pub fn contract_config_strategy() -> impl Strategy<Value = ContractConfig> {
    (
        percentage_strategy(),
        percentage_strategy(),
        percentage_strategy(),
        percentage_strategy(),
        any::<bool>(),
    )
        .prop_map(|(discount, withholding, vat, advance, exclude_labor)| {
            ContractConfig::default()
                .with_discount(discount)
                .with_withholding_tax(withholding)
                .with_vat(vat)
                .with_advance_payment(advance)
                .excluding_labor_from_discount(exclude_labor)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn dates_stay_in_2024(date in date_strategy()) {
            prop_assert!(date >= NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
            prop_assert!(date <= NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        }

        #[test]
        fn first_document_is_never_frozen(documents in documents_strategy()) {
            prop_assert!(!documents[0].frozen);
        }

        #[test]
        fn percentages_in_range(p in percentage_strategy()) {
            prop_assert!(p >= Decimal::ZERO);
            prop_assert!(p < Decimal::ONE_HUNDRED);
        }
    }
}
