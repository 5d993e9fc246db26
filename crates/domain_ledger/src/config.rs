//! Contract accounting settings
//!
//! `ContractConfig` is read by every snapshot and certificate. It is only
//! ever produced from `ContractSettings`, the raw values typed on the
//! settings surface, and that conversion never fails: a value that is not a
//! number becomes zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::{Currency, Percentage};

/// Contract rules applied to the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractConfig {
    /// Tender discount ("ribasso d'asta") on the discountable base
    pub discount_percent: Percentage,
    /// Guarantee retention withheld from each installment
    pub withholding_tax_percent: Percentage,
    /// VAT applied to the taxable installment
    pub vat_percent: Percentage,
    /// Recovery of the advance payment from each installment
    pub advance_payment_percent: Percentage,
    /// Keep labor out of the discount base
    pub exclude_labor_from_discount: bool,
    /// Contract currency
    pub currency: Currency,
}

impl ContractConfig {
    pub fn with_discount(mut self, percent: Decimal) -> Self {
        self.discount_percent = Percentage::new(percent);
        self
    }

    pub fn with_withholding_tax(mut self, percent: Decimal) -> Self {
        self.withholding_tax_percent = Percentage::new(percent);
        self
    }

    pub fn with_vat(mut self, percent: Decimal) -> Self {
        self.vat_percent = Percentage::new(percent);
        self
    }

    pub fn with_advance_payment(mut self, percent: Decimal) -> Self {
        self.advance_payment_percent = Percentage::new(percent);
        self
    }

    pub fn excluding_labor_from_discount(mut self, exclude: bool) -> Self {
        self.exclude_labor_from_discount = exclude;
        self
    }
}

/// A percentage as typed by the operator: a number or free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPercent {
    Number(Decimal),
    Text(String),
}

impl RawPercent {
    fn coerce(&self, field: &'static str) -> Percentage {
        match self {
            RawPercent::Number(value) => Percentage::new(*value),
            RawPercent::Text(text) => Percentage::parse(text).unwrap_or_else(|_| {
                warn!(field, raw = %text, "Non-numeric contract percentage coerced to zero");
                Percentage::zero()
            }),
        }
    }
}

impl From<&str> for RawPercent {
    fn from(text: &str) -> Self {
        RawPercent::Text(text.to_string())
    }
}

impl From<Decimal> for RawPercent {
    fn from(value: Decimal) -> Self {
        RawPercent::Number(value)
    }
}

/// Raw contract settings from the settings surface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractSettings {
    pub discount_percent: Option<RawPercent>,
    pub withholding_tax_percent: Option<RawPercent>,
    pub vat_percent: Option<RawPercent>,
    pub advance_payment_percent: Option<RawPercent>,
    pub exclude_labor_from_discount: Option<bool>,
    pub currency: Option<Currency>,
}

impl ContractSettings {
    /// Coerces the raw settings into a contract configuration
    ///
    /// Missing and non-numeric percentages become zero.
    pub fn into_config(self) -> ContractConfig {
        fn percent(raw: &Option<RawPercent>, field: &'static str) -> Percentage {
            raw.as_ref().map(|r| r.coerce(field)).unwrap_or_default()
        }

        ContractConfig {
            discount_percent: percent(&self.discount_percent, "discount_percent"),
            withholding_tax_percent: percent(&self.withholding_tax_percent, "withholding_tax_percent"),
            vat_percent: percent(&self.vat_percent, "vat_percent"),
            advance_payment_percent: percent(&self.advance_payment_percent, "advance_payment_percent"),
            exclude_labor_from_discount: self.exclude_labor_from_discount.unwrap_or(false),
            currency: self.currency.unwrap_or_default(),
        }
    }
}
