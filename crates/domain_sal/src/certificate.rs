//! Payment certificates
//!
//! The certificate of a checkpoint turns the growth of the cumulative net
//! value since the previous checkpoint into the amount legally payable.
//! Derivation never fails: a correction that lowers the cumulative value
//! yields a negative installment, surfaced as-is.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::round2;
use domain_ledger::{ContractConfig, Ledger};
use crate::checkpoint::Checkpoint;

/// Amounts of the payment certificate for one checkpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCertificate {
    pub checkpoint_number: u32,
    pub date: NaiveDate,
    /// Cumulative net value at the previous checkpoint, 0 for the first
    pub previous_net: Decimal,
    /// Cumulative net value at this checkpoint
    pub current_net: Decimal,
    pub installment_gross: Decimal,
    /// Guarantee retention ("ritenuta a garanzia")
    pub retention: Decimal,
    pub advance_recovery: Decimal,
    pub taxable: Decimal,
    pub vat: Decimal,
    pub payable: Decimal,
}

/// Derives the certificate of `current` given its numeric predecessor
///
/// # Arguments
///
/// * `ledger` - The indexed works ledger
/// * `config` - Contract rules
/// * `current` - Checkpoint being certified
/// * `previous` - Checkpoint numbered `current.number - 1`, if any
pub fn derive_certificate(
    ledger: &Ledger,
    config: &ContractConfig,
    current: &Checkpoint,
    previous: Option<&Checkpoint>,
) -> PaymentCertificate {
    let current_net = ledger.snapshot(current.date, config).total_net;
    let previous_net = previous
        .map(|p| ledger.snapshot(p.date, config).total_net)
        .unwrap_or(Decimal::ZERO);

    let installment_gross = round2(current_net - previous_net);
    let retention = config.withholding_tax_percent.of(installment_gross);
    let advance_recovery = config.advance_payment_percent.of(installment_gross);
    let taxable = round2(installment_gross - retention - advance_recovery);
    let vat = config.vat_percent.of(taxable);
    let payable = round2(taxable + vat);

    PaymentCertificate {
        checkpoint_number: current.number,
        date: current.date,
        previous_net,
        current_net,
        installment_gross,
        retention,
        advance_recovery,
        taxable,
        vat,
        payable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::CheckpointId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_ledger_certificate_is_zero() {
        let checkpoint = Checkpoint {
            id: CheckpointId::new(),
            number: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            locked: false,
        };
        let config = ContractConfig::default().with_vat(dec!(22));

        let certificate = derive_certificate(&Ledger::build(&[]), &config, &checkpoint, None);
        assert_eq!(certificate.installment_gross, Decimal::ZERO);
        assert_eq!(certificate.payable, Decimal::ZERO);
        assert_eq!(certificate.checkpoint_number, 1);
    }
}
