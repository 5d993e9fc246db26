//! Decimal money arithmetic
//!
//! Every monetary value in the ledger is a `rust_decimal::Decimal` rounded to
//! the currency precision immediately after each arithmetic step. Totals are
//! therefore built round-then-accumulate, never accumulate-then-round.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Decimal places used for every monetary amount
pub const CURRENCY_DP: u32 = 2;

/// Largest line amount (quantity x price) the ledger carries, 10^15
///
/// Sums of in-range lines stay far below `Decimal::MAX`.
pub const MAX_LINE_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Rounds a monetary amount to two decimal places, midpoint away from zero
///
/// A storno amount rounds to exactly the negation of the amount it reverses.
/// Negative midpoints therefore differ from half-up rounding toward +infinity:
/// `-0.005` becomes `-0.01`, not `0.00`.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Divides `numerator` by `denominator`, yielding zero for a zero denominator
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// `round2(quantity * price)`, or `None` when the product overflows or
/// exceeds [`MAX_LINE_AMOUNT`]
pub fn line_amount(quantity: Decimal, price: Decimal) -> Option<Decimal> {
    quantity
        .checked_mul(price)
        .map(round2)
        .filter(|amount| amount.abs() <= MAX_LINE_AMOUNT)
}

/// Parses an operator-entered decimal
///
/// Surrounding whitespace is ignored, a single decimal comma is accepted
/// (`"0,5"`) and a trailing percent sign is stripped.
pub fn parse_decimal(raw: &str) -> Result<Decimal, MoneyError> {
    let trimmed = raw.trim().trim_end_matches('%').trim();
    if trimmed.is_empty() {
        return Err(MoneyError::InvalidAmount(raw.to_string()));
    }

    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|_| MoneyError::InvalidAmount(raw.to_string()))
}

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
}

impl Currency {
    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "€",
            Currency::USD => "$",
            Currency::GBP => "£",
            Currency::CHF => "CHF",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
        }
    }

    /// Formats an amount with the currency symbol and two decimals
    pub fn format(&self, amount: Decimal) -> String {
        format!("{} {:.2}", self.symbol(), round2(amount))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur while reading monetary input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// A percentage expressed as a fraction of 100 (`22` is 22%)
///
/// Contract rates (discount, retention, advance recovery, VAT) and labor
/// incidence are all percentages of this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    /// Creates a percentage from a percent value (e.g. 5 for 5%)
    pub fn new(percent: Decimal) -> Self {
        Self(percent)
    }

    /// The zero percentage
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Parses an operator-entered percentage
    pub fn parse(raw: &str) -> Result<Self, MoneyError> {
        parse_decimal(raw).map(Self)
    }

    /// Returns the percent value (22 for 22%)
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a fraction of one (0.22 for 22%)
    pub fn as_fraction(&self) -> Decimal {
        self.0 / dec!(100)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Applies this percentage to a monetary amount, rounded to two places
    ///
    /// Yields zero when the product is out of `Decimal` range.
    pub fn of(&self, amount: Decimal) -> Decimal {
        amount
            .checked_mul(self.0)
            .and_then(|product| product.checked_div(dec!(100)))
            .map(round2)
            .unwrap_or(Decimal::ZERO)
    }
}

impl From<Decimal> for Percentage {
    fn from(percent: Decimal) -> Self {
        Self(percent)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_midpoint_away_from_zero() {
        assert_eq!(round2(dec!(160.908)), dec!(160.91));
        assert_eq!(round2(dec!(0.125)), dec!(0.13));
        assert_eq!(round2(dec!(-0.125)), dec!(-0.13));
        assert_eq!(round2(dec!(4.6)), dec!(4.60));
    }

    #[test]
    fn test_round2_negative_half_cent() {
        assert_eq!(round2(dec!(-0.005)), dec!(-0.01));
        assert_eq!(round2(dec!(-2.675)), dec!(-2.68));
    }

    #[test]
    fn test_line_amount_range() {
        assert_eq!(line_amount(dec!(2.5), dec!(12.345)), Some(dec!(30.86)));
        assert_eq!(line_amount(dec!(1000), MAX_LINE_AMOUNT), None);
        assert_eq!(line_amount(Decimal::MAX, dec!(2)), None);
        assert_eq!(line_amount(dec!(-1), MAX_LINE_AMOUNT), Some(-MAX_LINE_AMOUNT));
        assert_eq!(MAX_LINE_AMOUNT, Decimal::new(1_000_000_000_000_000, 0));
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(ratio(dec!(750), dec!(0)), Decimal::ZERO);
        assert_eq!(ratio(dec!(750), dec!(5000)), dec!(0.15));
    }

    #[test]
    fn test_parse_decimal_accepts_comma() {
        assert_eq!(parse_decimal("0,5").unwrap(), dec!(0.5));
        assert_eq!(parse_decimal(" 22 % ").unwrap(), dec!(22));
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("").is_err());
    }

    #[test]
    fn test_percentage_of() {
        let vat = Percentage::new(dec!(22));
        assert_eq!(vat.of(dec!(731.40)), dec!(160.91));
        assert_eq!(Percentage::new(dec!(0.5)).of(dec!(920)), dec!(4.60));
    }

    #[test]
    fn test_percentage_of_out_of_range_is_zero() {
        assert_eq!(Percentage::new(Decimal::MAX).of(dec!(1000)), Decimal::ZERO);
    }

    #[test]
    fn test_currency_format() {
        assert_eq!(Currency::EUR.format(dec!(892.305)), "€ 892.31");
    }
}
