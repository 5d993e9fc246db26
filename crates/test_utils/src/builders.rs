//! Test Data Builders
//!
//! Builder patterns for catalogue data with sensible defaults, so tests only
//! spell out the fields they care about.

use chrono::NaiveDate;
use core_kernel::Percentage;
use domain_catalogue::{BillingModel, Document, Measurement, WorkGroup, WorkItem};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for work items and their measurements
pub struct TestWorkItemBuilder {
    code: String,
    description: String,
    unit_price: Decimal,
    quantity: Decimal,
    labor_rate: Decimal,
    measurements: Vec<Measurement>,
}

impl TestWorkItemBuilder {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: "Test item".to_string(),
            unit_price: dec!(100),
            quantity: dec!(10),
            labor_rate: Decimal::ZERO,
            measurements: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_labor_rate(mut self, percent: Decimal) -> Self {
        self.labor_rate = percent;
        self
    }

    /// Adds a measurement of `quantity` on `date`
    pub fn measured(mut self, date: NaiveDate, quantity: Decimal) -> Self {
        self.measurements.push(Measurement::new(date, quantity));
        self
    }

    pub fn with_measurement(mut self, measurement: Measurement) -> Self {
        self.measurements.push(measurement);
        self
    }

    pub fn build(self) -> WorkItem {
        let mut item = WorkItem::new(self.code, self.description, self.unit_price, self.quantity)
            .with_labor_rate(Percentage::new(self.labor_rate));
        for measurement in self.measurements {
            item.add_measurement(measurement);
        }
        item
    }
}

/// Builder for work groups
pub struct TestWorkGroupBuilder {
    code: String,
    billing_model: BillingModel,
    value: Decimal,
    security_cost: bool,
    items: Vec<WorkItem>,
}

impl TestWorkGroupBuilder {
    pub fn new(code: impl Into<String>, billing_model: BillingModel) -> Self {
        Self {
            code: code.into(),
            billing_model,
            value: Decimal::ZERO,
            security_cost: false,
            items: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: Decimal) -> Self {
        self.value = value;
        self
    }

    pub fn as_security_cost(mut self) -> Self {
        self.security_cost = true;
        self
    }

    pub fn with_item(mut self, item: WorkItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn build(self) -> WorkGroup {
        let description = format!("Group {}", self.code);
        let mut group = WorkGroup::new(self.code, description, self.billing_model)
            .with_value(self.value);
        group.security_cost = self.security_cost;
        for item in self.items {
            group.add_item(item);
        }
        group
    }
}

/// Builder for documents
pub struct TestDocumentBuilder {
    name: String,
    frozen: bool,
    groups: Vec<WorkGroup>,
}

impl TestDocumentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frozen: false,
            groups: Vec::new(),
        }
    }

    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    pub fn with_group(mut self, group: WorkGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn build(self) -> Document {
        let mut document = Document::new(self.name);
        for group in self.groups {
            document.add_group(group);
        }
        document.frozen = self.frozen;
        document
    }
}
