//! Tests for the works catalogue and its import boundary

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_catalogue::import::RejectedKind;
use domain_catalogue::{
    import_documents, BillingModel, CatalogueError, DimensionalFactors, Document, DocumentRecord,
    Measurement, Variation, WorkGroup, WorkItem,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Import Tests
// ============================================================================

mod import_tests {
    use super::*;

    const PROJECT: &str = r#"[
        {
            "name": "Main contract",
            "groups": [
                {
                    "code": "A",
                    "description": "Earthworks",
                    "billingModel": "measured",
                    "items": [
                        {
                            "code": "A.01",
                            "description": "Excavation",
                            "unit": "m3",
                            "unitPrice": 100,
                            "laborRate": "20",
                            "quantity": "10",
                            "measurements": [
                                { "date": "2024-01-01", "quantity": 4, "workers": ["Rossi", "Bianchi"] },
                                { "date": "05/01/2024", "quantity": "6" },
                                { "date": "sometime in spring", "quantity": 1 }
                            ],
                            "variations": [
                                { "date": "2024-02-01", "quantityDelta": 2, "reason": "Deeper foundations" },
                                { "date": "", "quantityDelta": 5 }
                            ]
                        }
                    ]
                },
                {
                    "code": "S",
                    "description": "Safety",
                    "billingModel": "lumpSum",
                    "value": "1.500,00",
                    "securityCost": true
                }
            ]
        },
        { "name": "Superseded estimate", "frozen": true }
    ]"#;

    fn import() -> domain_catalogue::ImportReport {
        let records: Vec<DocumentRecord> = serde_json::from_str(PROJECT).unwrap();
        import_documents(records)
    }

    #[test]
    fn test_documents_and_groups_imported_in_order() {
        let report = import();

        assert_eq!(report.documents.len(), 2);
        let main = &report.documents[0];
        assert_eq!(main.name, "Main contract");
        assert_eq!(main.groups[0].code, "A");
        assert_eq!(main.groups[1].billing_model, BillingModel::LumpSum);
        assert!(main.groups[1].security_cost);
        assert!(report.documents[1].frozen);
    }

    #[test]
    fn test_dates_parsed_and_unreadable_dates_rejected() {
        let report = import();
        let item = &report.documents[0].groups[0].items[0];

        assert_eq!(item.measurements.len(), 2);
        assert_eq!(item.measurements[0].date, date(2024, 1, 1));
        assert_eq!(item.measurements[1].date, date(2024, 1, 5));
        assert_eq!(item.measurements[0].workers.len(), 2);
        assert_eq!(item.variations.len(), 1);

        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].kind, RejectedKind::Measurement);
        assert_eq!(report.rejected[0].raw_date, "sometime in spring");
        assert_eq!(report.rejected[1].kind, RejectedKind::Variation);
        assert_eq!(report.rejected[1].item_code, "A.01");
    }

    #[test]
    fn test_numbers_coerced() {
        let report = import();
        let item = &report.documents[0].groups[0].items[0];

        assert_eq!(item.unit_price, dec!(100));
        assert_eq!(item.labor_rate.value(), dec!(20));
        assert_eq!(item.quantity, dec!(10));
        assert_eq!(item.effective_quantity(), dec!(12));
        assert_eq!(item.residual_quantity(), dec!(2));

        // "1.500,00" mixes separators and is not a readable number
        assert_eq!(report.documents[0].groups[1].value, Decimal::ZERO);
    }
}

// ============================================================================
// Document Editing Tests
// ============================================================================

mod document_tests {
    use super::*;

    #[test]
    fn test_unknown_group_and_item() {
        let mut document = Document::new("Contract");
        document.unlock();
        let stray_group = WorkGroup::new("X", "Stray", BillingModel::Measured);
        let stray_item = WorkItem::new("X.1", "Stray", dec!(1), dec!(1));

        assert!(matches!(
            document.set_security_cost(&stray_group.id, true),
            Err(CatalogueError::UnknownGroup(_))
        ));
        assert!(matches!(
            document.record_measurement(&stray_item.id, Measurement::new(date(2024, 1, 1), dec!(1))),
            Err(CatalogueError::UnknownItem(_))
        ));
    }

    #[test]
    fn test_relock_blocks_toggles() {
        let mut document = Document::new("Contract");
        let group_id = document.add_group(WorkGroup::new("A", "Works", BillingModel::Measured));

        document.unlock();
        document.set_billing_model(&group_id, BillingModel::LumpSum).unwrap();
        document.lock();

        assert_eq!(
            document.set_billing_model(&group_id, BillingModel::Measured),
            Err(CatalogueError::DocumentLocked("Contract".to_string()))
        );
    }

    #[test]
    fn test_remove_empty_group() {
        let mut document = Document::new("Contract");
        let group_id = document.add_group(WorkGroup::new("A", "Works", BillingModel::Measured));

        let removed = document.remove_group(&group_id).unwrap();
        assert_eq!(removed.code, "A");
        assert!(document.groups.is_empty());
    }

    #[test]
    fn test_storno_keeps_original() {
        let mut group = WorkGroup::new("A", "Works", BillingModel::Measured);
        let item_id = group.add_item(WorkItem::new("A.1", "Wall", dec!(50), dec!(20)));
        let mut document = Document::new("Contract");
        document.add_group(group);

        let original = Measurement::new(date(2024, 3, 1), dec!(5));
        let storno = Measurement::reversal_of(&original, date(2024, 3, 2));
        document.record_measurement(&item_id, original).unwrap();
        document.record_measurement(&item_id, storno).unwrap();

        let (_, item) = document.find_item(&item_id).unwrap();
        assert_eq!(item.measurements.len(), 2);
        assert_eq!(item.measured_quantity(), Decimal::ZERO);
    }

    #[test]
    fn test_document_serde_roundtrip_keeps_flags() {
        let mut document = Document::new("Contract");
        document.freeze();
        let json = serde_json::to_string(&document).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, document);
    }
}

// ============================================================================
// Properties
// ============================================================================

fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn factors_strategy() -> impl Strategy<Value = DimensionalFactors> {
    let factor = || prop::option::of((1i64..100_000i64).prop_map(|v| Decimal::new(v, 2)));
    (factor(), factor(), factor(), factor()).prop_map(|(equal_parts, length, width, height)| {
        DimensionalFactors { equal_parts, length, width, height }
    })
}

proptest! {
    #[test]
    fn storno_of_factor_measurement_negates_exactly(factors in factors_strategy(), day in 1u32..29) {
        let original = Measurement::from_factors(date(2024, 2, day), factors.clone(), false);
        let storno = Measurement::reversal_of(&original, date(2024, 3, day));
        let negated = Measurement::from_factors(date(2024, 2, day), factors, true);

        prop_assert_eq!(storno.quantity, -original.quantity);
        prop_assert_eq!(negated.quantity, storno.quantity);
        prop_assert_eq!(original.quantity + storno.quantity, Decimal::ZERO);
        prop_assert_eq!(storno.reverses, Some(original.id));
        prop_assert_eq!(&storno.factors, &original.factors);
    }

    #[test]
    fn residual_tracks_variations_and_measurements(
        contractual in quantity_strategy(),
        deltas in prop::collection::vec(quantity_strategy(), 0..5),
        measured in prop::collection::vec(quantity_strategy(), 0..8),
    ) {
        let mut item = WorkItem::new("A.1", "Wall", dec!(50), contractual);
        for delta in &deltas {
            item.add_variation(Variation::new(date(2024, 1, 1), *delta));
        }
        for quantity in &measured {
            item.add_measurement(Measurement::new(date(2024, 1, 2), *quantity));
        }

        let effective = contractual + deltas.iter().copied().sum::<Decimal>();
        let done: Decimal = measured.iter().copied().sum();
        prop_assert_eq!(item.effective_quantity(), effective);
        prop_assert_eq!(item.measured_quantity(), done);
        prop_assert_eq!(item.residual_quantity(), effective - done);

        let residual = item.residual_quantity();
        let extra = Measurement::new(date(2024, 1, 3), dec!(1.5));
        let storno = Measurement::reversal_of(&extra, date(2024, 1, 4));
        item.add_measurement(extra);
        item.add_measurement(storno);
        prop_assert_eq!(item.residual_quantity(), residual);
    }
}
