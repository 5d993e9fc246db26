//! Priced catalogue lines
//!
//! A work item carries the contractual quantity and unit price, the labor
//! incidence and the measurements and variations recorded against it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{line_amount, MeasurementId, Percentage, VariationId, WorkItemId};
use crate::measurement::Measurement;

/// An amendment of the contractual quantity of a work item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub id: VariationId,
    pub date: NaiveDate,
    /// Signed change to the contractual quantity
    pub quantity_delta: Decimal,
    pub reason: Option<String>,
}

impl Variation {
    pub fn new(date: NaiveDate, quantity_delta: Decimal) -> Self {
        Self {
            id: VariationId::new_v7(),
            date,
            quantity_delta,
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// A catalogue line with unit price and contractual quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    /// Unique identifier
    pub id: WorkItemId,
    /// Price-list code (e.g. "A.01.002")
    pub code: String,
    /// Description
    pub description: String,
    /// Unit of measure (m, m2, m3, kg, cad)
    pub unit: String,
    /// Price per unit of measure
    pub unit_price: Decimal,
    /// Share of the value attributable to labor
    pub labor_rate: Percentage,
    /// Contractual quantity
    pub quantity: Decimal,
    /// Recorded measurements, in recording order
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    /// Quantity amendments, in recording order
    #[serde(default)]
    pub variations: Vec<Variation>,
}

impl WorkItem {
    /// Creates a new work item
    ///
    /// # Arguments
    ///
    /// * `code` - Price-list code
    /// * `description` - Description
    /// * `unit_price` - Price per unit
    /// * `quantity` - Contractual quantity
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        unit_price: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            id: WorkItemId::new_v7(),
            code: code.into(),
            description: description.into(),
            unit: String::new(),
            unit_price,
            labor_rate: Percentage::zero(),
            quantity,
            measurements: Vec::new(),
            variations: Vec::new(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_labor_rate(mut self, labor_rate: Percentage) -> Self {
        self.labor_rate = labor_rate;
        self
    }

    /// Appends a measurement; measurements are never removed
    pub fn add_measurement(&mut self, measurement: Measurement) -> MeasurementId {
        let id = measurement.id;
        self.measurements.push(measurement);
        id
    }

    pub fn add_variation(&mut self, variation: Variation) -> VariationId {
        let id = variation.id;
        self.variations.push(variation);
        id
    }

    pub fn measurement(&self, id: &MeasurementId) -> Option<&Measurement> {
        self.measurements.iter().find(|m| &m.id == id)
    }

    pub fn has_measurements(&self) -> bool {
        !self.measurements.is_empty()
    }

    /// Contractual quantity adjusted by every variation
    pub fn effective_quantity(&self) -> Decimal {
        self.variations
            .iter()
            .fold(self.quantity, |acc, v| acc + v.quantity_delta)
    }

    /// Net measured quantity, storni included
    pub fn measured_quantity(&self) -> Decimal {
        self.measurements.iter().map(|m| m.quantity).sum()
    }

    /// Quantity still to be measured; negative when over-measured
    pub fn residual_quantity(&self) -> Decimal {
        self.effective_quantity() - self.measured_quantity()
    }

    /// Contractual amount of the line, zero when out of ledger range
    pub fn contractual_amount(&self) -> Decimal {
        line_amount(self.quantity, self.unit_price).unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    #[test]
    fn test_residual_with_variations_and_storno() {
        let mut item = WorkItem::new("B.02", "Concrete", dec!(120), dec!(10));
        item.add_variation(Variation::new(day(1), dec!(2.5)).with_reason("Extra slab"));
        let first = item.add_measurement(Measurement::new(day(2), dec!(8)));
        let original = item.measurement(&first).cloned().unwrap();
        item.add_measurement(Measurement::reversal_of(&original, day(3)));
        item.add_measurement(Measurement::new(day(3), dec!(7)));

        assert_eq!(item.effective_quantity(), dec!(12.5));
        assert_eq!(item.measured_quantity(), dec!(7));
        assert_eq!(item.residual_quantity(), dec!(5.5));
        assert_eq!(item.measurements.len(), 3);
    }

    #[test]
    fn test_contractual_amount_rounded() {
        let item = WorkItem::new("C.01", "Paint", dec!(3.333), dec!(3));
        assert_eq!(item.contractual_amount(), dec!(10.00));
    }
}
