//! Imported bills of quantities
//!
//! A document owns its work groups. Billing-model and security toggles are
//! gated by an explicit unlock so that settings feeding the ledger cannot be
//! changed by accident.

use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{DocumentId, MeasurementId, WorkGroupId, WorkItemId};
use crate::error::CatalogueError;
use crate::measurement::Measurement;
use crate::work_group::{BillingModel, WorkGroup};
use crate::work_item::{Variation, WorkItem};

/// An imported bill of quantities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,
    /// Display name
    pub name: String,
    /// A frozen document contributes nothing to the ledger
    #[serde(default)]
    pub frozen: bool,
    /// Billing settings are editable only while unlocked
    #[serde(default)]
    pub unlocked: bool,
    /// Work groups, in catalogue order
    #[serde(default)]
    pub groups: Vec<WorkGroup>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new_v7(),
            name: name.into(),
            frozen: false,
            unlocked: false,
            groups: Vec::new(),
        }
    }

    pub fn add_group(&mut self, group: WorkGroup) -> WorkGroupId {
        let id = group.id;
        self.groups.push(group);
        id
    }

    pub fn group(&self, id: &WorkGroupId) -> Option<&WorkGroup> {
        self.groups.iter().find(|g| &g.id == id)
    }

    /// Finds an item and the group that owns it
    pub fn find_item(&self, id: &WorkItemId) -> Option<(&WorkGroup, &WorkItem)> {
        self.groups
            .iter()
            .find_map(|g| g.item(id).map(|item| (g, item)))
    }

    pub fn has_measurements(&self) -> bool {
        self.groups.iter().any(WorkGroup::has_measurements)
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn thaw(&mut self) {
        self.frozen = false;
    }

    pub fn unlock(&mut self) {
        self.unlocked = true;
    }

    pub fn lock(&mut self) {
        self.unlocked = false;
    }

    /// Changes the billing model of a group
    ///
    /// # Errors
    ///
    /// - `DocumentLocked` unless the document was unlocked first
    /// - `UnknownGroup` if the group does not belong to this document
    pub fn set_billing_model(
        &mut self,
        group_id: &WorkGroupId,
        model: BillingModel,
    ) -> Result<(), CatalogueError> {
        let group = self.unlocked_group_mut(group_id)?;
        info!(group = %group.code, from = ?group.billing_model, to = ?model, "Billing model changed");
        group.billing_model = model;
        Ok(())
    }

    /// Marks or unmarks a group as security charges
    ///
    /// # Errors
    ///
    /// Same as [`Document::set_billing_model`]
    pub fn set_security_cost(
        &mut self,
        group_id: &WorkGroupId,
        security_cost: bool,
    ) -> Result<(), CatalogueError> {
        let group = self.unlocked_group_mut(group_id)?;
        info!(group = %group.code, security_cost, "Security flag changed");
        group.security_cost = security_cost;
        Ok(())
    }

    /// Removes a group that has no measurements
    pub fn remove_group(&mut self, group_id: &WorkGroupId) -> Result<WorkGroup, CatalogueError> {
        let position = self
            .groups
            .iter()
            .position(|g| &g.id == group_id)
            .ok_or_else(|| CatalogueError::UnknownGroup(group_id.to_string()))?;

        if self.groups[position].has_measurements() {
            return Err(CatalogueError::GroupHasMeasurements(group_id.to_string()));
        }

        Ok(self.groups.remove(position))
    }

    /// Records a measurement against an item of this document
    pub fn record_measurement(
        &mut self,
        item_id: &WorkItemId,
        measurement: Measurement,
    ) -> Result<MeasurementId, CatalogueError> {
        let item = self.editable_item_mut(item_id)?;
        Ok(item.add_measurement(measurement))
    }

    /// Records a quantity variation against an item of this document
    pub fn record_variation(
        &mut self,
        item_id: &WorkItemId,
        variation: Variation,
    ) -> Result<(), CatalogueError> {
        let item = self.editable_item_mut(item_id)?;
        item.add_variation(variation);
        Ok(())
    }

    fn unlocked_group_mut(&mut self, group_id: &WorkGroupId) -> Result<&mut WorkGroup, CatalogueError> {
        if !self.unlocked {
            return Err(CatalogueError::DocumentLocked(self.name.clone()));
        }
        self.groups
            .iter_mut()
            .find(|g| &g.id == group_id)
            .ok_or_else(|| CatalogueError::UnknownGroup(group_id.to_string()))
    }

    fn editable_item_mut(&mut self, item_id: &WorkItemId) -> Result<&mut WorkItem, CatalogueError> {
        if self.frozen {
            return Err(CatalogueError::DocumentFrozen(self.name.clone()));
        }
        self.groups
            .iter_mut()
            .find_map(|g| g.item_mut(item_id))
            .ok_or_else(|| CatalogueError::UnknownItem(item_id.to_string()))
    }
}
