//! Pre-built Test Fixtures
//!
//! Ready-to-use catalogues and contract settings with known reference totals.

use chrono::NaiveDate;
use domain_catalogue::{BillingModel, Document};
use domain_ledger::ContractConfig;
use rust_decimal_macros::dec;

use crate::builders::{TestDocumentBuilder, TestWorkGroupBuilder, TestWorkItemBuilder};

/// Fixture for calendar dates
pub struct DateFixtures;

impl DateFixtures {
    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
    }

    /// A day in January 2024
    pub fn jan(day: u32) -> NaiveDate {
        Self::ymd(2024, 1, day)
    }

    /// A day in February 2024
    pub fn feb(day: u32) -> NaiveDate {
        Self::ymd(2024, 2, day)
    }
}

/// Fixture for contract settings
pub struct ContractFixtures;

impl ContractFixtures {
    /// 10% discount with labor kept out of the discount base
    pub fn discount_excluding_labor() -> ContractConfig {
        ContractConfig::default()
            .with_discount(dec!(10))
            .excluding_labor_from_discount(true)
    }

    /// 0.5% retention, 20% advance recovery, 22% VAT
    pub fn certificate_rates() -> ContractConfig {
        ContractConfig::default()
            .with_withholding_tax(dec!(0.5))
            .with_advance_payment(dec!(20))
            .with_vat(dec!(22))
    }

    /// Every rule of the two fixtures above
    pub fn full_contract() -> ContractConfig {
        Self::certificate_rates()
            .with_discount(dec!(10))
            .excluding_labor_from_discount(true)
    }
}

/// Fixture for catalogues with reference totals
pub struct CatalogueFixtures;

impl CatalogueFixtures {
    /// One measured item: 10 x 100.00 at 20% labor, measured 4 on Jan 1 and 6 on Jan 5
    ///
    /// With a 10% discount excluding labor the snapshot at Jan 5 nets 920.00.
    pub fn measured_excavation() -> Vec<Document> {
        let item = TestWorkItemBuilder::new("A.01.001")
            .with_description("Excavation")
            .with_unit_price(dec!(100))
            .with_quantity(dec!(10))
            .with_labor_rate(dec!(20))
            .measured(DateFixtures::jan(1), dec!(4))
            .measured(DateFixtures::jan(5), dec!(6))
            .build();

        let group = TestWorkGroupBuilder::new("A", BillingModel::Measured)
            .with_item(item)
            .build();

        vec![TestDocumentBuilder::new("Main contract").with_group(group).build()]
    }

    /// A 5000.00 lump-sum group with two items measured on the same day for 500 and 250
    pub fn lump_sum_same_day() -> Vec<Document> {
        let walls = TestWorkItemBuilder::new("C.01")
            .with_unit_price(dec!(500))
            .with_quantity(dec!(1))
            .measured(DateFixtures::feb(10), dec!(1))
            .build();
        let floors = TestWorkItemBuilder::new("C.02")
            .with_unit_price(dec!(1000))
            .with_quantity(dec!(1))
            .measured(DateFixtures::feb(10), dec!(0.25))
            .build();

        let group = TestWorkGroupBuilder::new("C", BillingModel::LumpSum)
            .with_value(dec!(5000))
            .with_item(walls)
            .with_item(floors)
            .build();

        vec![TestDocumentBuilder::new("Main contract").with_group(group).build()]
    }

    /// Measured works, lump-sum works and security charges across two months
    pub fn mixed_contract() -> Vec<Document> {
        let excavation = TestWorkItemBuilder::new("A.01")
            .with_unit_price(dec!(100))
            .with_quantity(dec!(10))
            .with_labor_rate(dec!(20))
            .measured(DateFixtures::jan(1), dec!(4))
            .measured(DateFixtures::jan(20), dec!(3))
            .measured(DateFixtures::feb(15), dec!(3))
            .build();
        let structure = TestWorkItemBuilder::new("B.01")
            .with_unit_price(dec!(8000))
            .with_quantity(dec!(1))
            .with_labor_rate(dec!(35))
            .measured(DateFixtures::jan(25), dec!(0.25))
            .measured(DateFixtures::feb(20), dec!(0.25))
            .build();
        let scaffolding = TestWorkItemBuilder::new("S.01")
            .with_unit_price(dec!(1200))
            .with_quantity(dec!(1))
            .measured(DateFixtures::jan(2), dec!(0.5))
            .measured(DateFixtures::feb(2), dec!(0.5))
            .build();

        let measured = TestWorkGroupBuilder::new("A", BillingModel::Measured)
            .with_item(excavation)
            .build();
        let body = TestWorkGroupBuilder::new("B", BillingModel::LumpSum)
            .with_value(dec!(8000))
            .with_item(structure)
            .build();
        let security = TestWorkGroupBuilder::new("S", BillingModel::LumpSum)
            .with_value(dec!(1200))
            .as_security_cost()
            .with_item(scaffolding)
            .build();

        vec![TestDocumentBuilder::new("Main contract")
            .with_group(measured)
            .with_group(body)
            .with_group(security)
            .build()]
    }
}
