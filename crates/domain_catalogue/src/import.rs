//! Import boundary for catalogues produced by document parsing
//!
//! Records arrive with dates and numbers as the importer wrote them. Numbers
//! that cannot be read are coerced to zero; measurements and variations
//! whose date cannot be read are dropped and listed in the report, because a
//! dateless fact cannot be placed in the chronological register.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use core_kernel::{parse_date_lenient, Percentage};
use core_kernel::money::parse_decimal;
use crate::document::Document;
use crate::measurement::{DimensionalFactors, Measurement};
use crate::work_group::{BillingModel, WorkGroup};
use crate::work_item::{Variation, WorkItem};

/// A bill of quantities as produced by the importer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub name: String,
    #[serde(default)]
    pub frozen: bool,
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub billing_model: BillingModel,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub value: Decimal,
    #[serde(default)]
    pub security_cost: bool,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub unit_price: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub labor_rate: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub quantity: Decimal,
    #[serde(default)]
    pub measurements: Vec<MeasurementRecord>,
    #[serde(default)]
    pub variations: Vec<VariationRecord>,
}

/// A measurement line; either `quantity` or dimensional factors are given
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    pub date: String,
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub quantity: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub equal_parts: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub length: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub width: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub height: Option<Decimal>,
    /// Negates a factor-computed quantity
    #[serde(default)]
    pub storno: bool,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub workers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariationRecord {
    pub date: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub quantity_delta: Decimal,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Kind of record dropped during import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectedKind {
    Measurement,
    Variation,
}

/// A record dropped because its date could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRecord {
    pub kind: RejectedKind,
    pub document: String,
    pub item_code: String,
    pub raw_date: String,
}

/// Outcome of an import
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub documents: Vec<Document>,
    pub rejected: Vec<RejectedRecord>,
}

/// Converts importer records into catalogue documents
pub fn import_documents(records: Vec<DocumentRecord>) -> ImportReport {
    let mut report = ImportReport::default();
    for record in records {
        let document = record.into_document(&mut report.rejected);
        debug!(document = %document.name, groups = document.groups.len(), "Imported document");
        report.documents.push(document);
    }
    report
}

impl DocumentRecord {
    /// Builds the document, appending dropped records to `rejected`
    pub fn into_document(self, rejected: &mut Vec<RejectedRecord>) -> Document {
        let mut document = Document::new(self.name);
        document.frozen = self.frozen;

        for group_record in self.groups {
            let mut group = WorkGroup::new(
                group_record.code,
                group_record.description,
                group_record.billing_model,
            )
            .with_value(group_record.value);
            group.security_cost = group_record.security_cost;

            for item_record in group_record.items {
                let item = item_record.into_item(&document.name, rejected);
                group.add_item(item);
            }
            document.add_group(group);
        }

        document
    }
}

impl ItemRecord {
    fn into_item(self, document: &str, rejected: &mut Vec<RejectedRecord>) -> WorkItem {
        let mut item = WorkItem::new(self.code, self.description, self.unit_price, self.quantity)
            .with_unit(self.unit)
            .with_labor_rate(Percentage::new(self.labor_rate));

        for record in self.measurements {
            match parse_date_lenient(&record.date) {
                Ok(date) => {
                    item.add_measurement(record.into_measurement(date));
                }
                Err(e) => {
                    warn!(document, item = %item.code, error = %e, "Dropping measurement with unreadable date");
                    rejected.push(RejectedRecord {
                        kind: RejectedKind::Measurement,
                        document: document.to_string(),
                        item_code: item.code.clone(),
                        raw_date: record.date,
                    });
                }
            }
        }

        for record in self.variations {
            match parse_date_lenient(&record.date) {
                Ok(date) => {
                    let mut variation = Variation::new(date, record.quantity_delta);
                    variation.reason = record.reason;
                    item.add_variation(variation);
                }
                Err(e) => {
                    warn!(document, item = %item.code, error = %e, "Dropping variation with unreadable date");
                    rejected.push(RejectedRecord {
                        kind: RejectedKind::Variation,
                        document: document.to_string(),
                        item_code: item.code.clone(),
                        raw_date: record.date,
                    });
                }
            }
        }

        item
    }
}

impl MeasurementRecord {
    fn into_measurement(self, date: chrono::NaiveDate) -> Measurement {
        let factors = DimensionalFactors {
            equal_parts: self.equal_parts,
            length: self.length,
            width: self.width,
            height: self.height,
        };

        let mut measurement = if factors.is_empty() {
            Measurement::new(date, self.quantity.unwrap_or(Decimal::ZERO))
        } else {
            Measurement::from_factors(date, factors, self.storno)
        };
        measurement.note = self.note;
        measurement.workers = self.workers;
        measurement
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(Decimal),
    Text(String),
}

impl RawNumber {
    fn into_decimal(self) -> Decimal {
        match self {
            RawNumber::Number(value) => value,
            RawNumber::Text(text) => parse_decimal(&text).unwrap_or_else(|_| {
                warn!(raw = %text, "Non-numeric value coerced to zero");
                Decimal::ZERO
            }),
        }
    }
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawNumber>::deserialize(deserializer)?
        .map(RawNumber::into_decimal)
        .unwrap_or(Decimal::ZERO))
}

fn lenient_decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawNumber>::deserialize(deserializer)?.map(RawNumber::into_decimal))
}
