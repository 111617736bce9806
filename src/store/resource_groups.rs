// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource group mutations
//!
//! Resource groups anchor the reference graph: nearly every other entity
//! carries a nullable `resource_group` field healed against this list.
//! Deleting a group never cascades; dependents are healed to null on the
//! reconcile pass that follows.

use crate::config::ResourceGroup;
use crate::cursor;
use crate::errors::StoreResult;
use crate::store::Store;

pub(crate) fn default_resource_groups() -> Vec<ResourceGroup> {
    ["service-rg", "management-rg", "workload-rg"]
        .iter()
        .map(|name| ResourceGroup {
            create: true,
            name: name.to_string(),
            use_prefix: true,
        })
        .collect()
}

impl Store {
    pub fn create_resource_group(&mut self, group: ResourceGroup) {
        self.config.resource_groups.push(group);
        self.update();
    }

    /// Update a group in place. A rename does not follow references; the
    /// reconcile pass nulls anything still pointing at the old name.
    pub fn save_resource_group(&mut self, name: &str, group: ResourceGroup) -> StoreResult<()> {
        let found = cursor::find_mut(&mut self.config.resource_groups, name)?;
        *found = group;
        self.update();
        Ok(())
    }

    pub fn delete_resource_group(&mut self, name: &str) -> StoreResult<()> {
        cursor::carve(&mut self.config.resource_groups, name)?;
        self.update();
        Ok(())
    }

    pub(crate) fn reconcile_resource_groups(&mut self) {
        self.resource_group_list = cursor::names(&self.config.resource_groups);
    }
}
