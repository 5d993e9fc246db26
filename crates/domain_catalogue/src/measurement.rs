//! Site measurements
//!
//! A measurement is an immutable, dated quantity recorded against a work item.
//! Corrections are made by recording a storno (negative quantity) so the
//! register keeps both the original and its reversal.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::MeasurementId;

/// Dimensional factors of a measurement line
///
/// The measured quantity is the product of the factors that are present,
/// e.g. 2 equal parts x 3.50 m x 0.40 m x 0.30 m.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionalFactors {
    pub equal_parts: Option<Decimal>,
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub height: Option<Decimal>,
}

impl DimensionalFactors {
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Product of the present factors, 1 if none is present
    ///
    /// A product out of `Decimal` range is reported and counted as zero.
    pub fn product(&self) -> Decimal {
        self.checked_product().unwrap_or_else(|| {
            warn!(factors = ?self, "Dimensional product out of range, counted as zero");
            Decimal::ZERO
        })
    }

    /// Product of the present factors, `None` on overflow
    pub fn checked_product(&self) -> Option<Decimal> {
        self.present()
            .try_fold(Decimal::ONE, |acc, factor| acc.checked_mul(factor))
    }

    fn present(&self) -> impl Iterator<Item = Decimal> + '_ {
        [self.equal_parts, self.length, self.width, self.height]
            .into_iter()
            .flatten()
    }
}

/// A dated, signed quantity recorded on site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Unique identifier
    pub id: MeasurementId,
    /// Date the work was measured
    pub date: NaiveDate,
    /// Signed quantity; negative for a storno
    pub quantity: Decimal,
    /// Free-text note shown in the register
    pub note: Option<String>,
    /// Crew members who carried out the work
    #[serde(default)]
    pub workers: Vec<String>,
    /// Factors the quantity was computed from, if any
    pub factors: Option<DimensionalFactors>,
    /// The measurement this one reverses
    pub reverses: Option<MeasurementId>,
}

impl Measurement {
    /// Creates a measurement with an explicit quantity
    pub fn new(date: NaiveDate, quantity: Decimal) -> Self {
        Self {
            id: MeasurementId::new_v7(),
            date,
            quantity,
            note: None,
            workers: Vec::new(),
            factors: None,
            reverses: None,
        }
    }

    /// Creates a measurement from dimensional factors
    ///
    /// # Arguments
    ///
    /// * `date` - Measurement date
    /// * `factors` - Parts and dimensions; the quantity is their product
    /// * `reversal` - When true the quantity is negated (storno)
    pub fn from_factors(date: NaiveDate, factors: DimensionalFactors, reversal: bool) -> Self {
        let product = factors.product();
        let quantity = if reversal { -product } else { product };
        Self {
            factors: Some(factors),
            ..Self::new(date, quantity)
        }
    }

    /// Builds the storno of this measurement on the given date
    pub fn reversal_of(original: &Measurement, date: NaiveDate) -> Self {
        Self {
            note: Some(format!("Storno of {} ({})", original.id, original.date)),
            workers: original.workers.clone(),
            factors: original.factors.clone(),
            reverses: Some(original.id),
            ..Self::new(date, -original.quantity)
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_workers<I, S>(mut self, workers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.workers = workers.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if this measurement is a storno
    pub fn is_reversal(&self) -> bool {
        self.quantity.is_sign_negative() && !self.quantity.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_factors_product() {
        let factors = DimensionalFactors {
            equal_parts: Some(dec!(2)),
            length: Some(dec!(3.50)),
            width: None,
            height: Some(dec!(0.30)),
        };
        assert_eq!(factors.product(), dec!(2.1));
        assert_eq!(DimensionalFactors::default().product(), Decimal::ONE);
        assert!(DimensionalFactors::default().is_empty());
    }

    #[test]
    fn test_overflowing_factors_count_as_zero() {
        let factors = DimensionalFactors {
            equal_parts: Some(Decimal::MAX),
            length: Some(dec!(10)),
            ..Default::default()
        };
        assert_eq!(factors.checked_product(), None);
        assert_eq!(Measurement::from_factors(day(1), factors, false).quantity, Decimal::ZERO);
    }

    #[test]
    fn test_from_factors_reversal() {
        let factors = DimensionalFactors {
            length: Some(dec!(4)),
            ..Default::default()
        };
        let m = Measurement::from_factors(day(1), factors, true);
        assert_eq!(m.quantity, dec!(-4));
        assert!(m.is_reversal());
    }

    #[test]
    fn test_reversal_of() {
        let original = Measurement::new(day(1), dec!(6)).with_workers(["Rossi"]);
        let storno = Measurement::reversal_of(&original, day(3));

        assert_eq!(storno.quantity, dec!(-6));
        assert_eq!(storno.reverses, Some(original.id));
        assert_eq!(storno.workers, vec!["Rossi".to_string()]);
        assert_ne!(storno.id, original.id);
        assert!(!original.is_reversal());
    }
}
