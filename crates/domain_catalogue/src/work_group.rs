//! Catalogue groupings and their billing model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{round2, WorkGroupId, WorkItemId};
use crate::work_item::WorkItem;

/// How a work group is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BillingModel {
    /// Measured quantity times unit price ("a misura")
    #[default]
    Measured,
    /// Percentage of the group's fixed value ("a corpo")
    LumpSum,
}

/// A catalogue grouping of work items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkGroup {
    /// Unique identifier
    pub id: WorkGroupId,
    /// Catalogue code
    pub code: String,
    /// Description
    pub description: String,
    /// Billing model
    pub billing_model: BillingModel,
    /// Fixed value; the denominator of lump-sum progress
    pub value: Decimal,
    /// Security charges are never discounted
    pub security_cost: bool,
    /// Work items, in catalogue order
    #[serde(default)]
    pub items: Vec<WorkItem>,
}

impl WorkGroup {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        billing_model: BillingModel,
    ) -> Self {
        Self {
            id: WorkGroupId::new_v7(),
            code: code.into(),
            description: description.into(),
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

    pub fn add_item(&mut self, item: WorkItem) -> WorkItemId {
        let id = item.id;
        self.items.push(item);
        id
    }

    pub fn item(&self, id: &WorkItemId) -> Option<&WorkItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn item_mut(&mut self, id: &WorkItemId) -> Option<&mut WorkItem> {
        self.items.iter_mut().find(|i| &i.id == id)
    }

    pub fn has_measurements(&self) -> bool {
        self.items.iter().any(WorkItem::has_measurements)
    }

    /// Sum of the contractual amounts of the items
    pub fn contractual_amount(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| round2(acc + item.contractual_amount()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_billing_model_serde_names() {
        assert_eq!(serde_json::to_string(&BillingModel::LumpSum).unwrap(), "\"lumpSum\"");
        assert_eq!(serde_json::to_string(&BillingModel::Measured).unwrap(), "\"measured\"");
    }

    #[test]
    fn test_contractual_amount() {
        let mut group = WorkGroup::new("S", "Scaffolding", BillingModel::LumpSum).with_value(dec!(5000));
        group.add_item(WorkItem::new("S.1", "Frames", dec!(10), dec!(100)));
        group.add_item(WorkItem::new("S.2", "Boards", dec!(2.5), dec!(40)));
        assert_eq!(group.contractual_amount(), dec!(1100.00));
        assert!(!group.has_measurements());
    }
}
