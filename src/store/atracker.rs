// Copyright (c) 2025 - Cowboy AI, Inc.
//! Activity tracker mutations
//!
//! The tracker is a singleton. Its collector bucket and the service key
//! used to bind it live under object storage; the key name is derived
//! state rather than a wire field, tracked on the store so the bind key
//! can be healed like any other weak reference.

use crate::cursor;
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct AtrackerSave {
    pub collector_bucket_name: Option<String>,
    pub atracker_key: Option<String>,
    pub receive_global_events: bool,
    pub add_route: bool,
    pub resource_group: Option<String>,
}

impl Store {
    pub fn save_atracker(&mut self, params: AtrackerSave) {
        self.config.atracker.collector_bucket_name = params.collector_bucket_name;
        self.config.atracker.receive_global_events = params.receive_global_events;
        self.config.atracker.add_route = params.add_route;
        self.config.atracker.resource_group = params.resource_group;
        self.atracker_key = params.atracker_key;
        self.update();
    }

    pub(crate) fn reconcile_atracker(&mut self) {
        cursor::heal_unfound(
            &self.cos_buckets,
            &mut self.config.atracker.collector_bucket_name,
            "collector bucket",
        );
        cursor::heal_unfound(&self.cos_keys, &mut self.atracker_key, "cos key");
        cursor::heal_unfound(
            &self.resource_group_list,
            &mut self.config.atracker.resource_group,
            "resource group",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deleting_collector_bucket_heals_tracker() {
        let mut store = Store::new();
        store
            .delete_cos_bucket("atracker-cos", "atracker-bucket")
            .unwrap();
        assert_eq!(store.config().atracker.collector_bucket_name, None);
    }

    #[test]
    fn deleting_bind_key_heals_derived_key() {
        let mut store = Store::new();
        store.delete_cos_key("atracker-cos", "cos-bind-key").unwrap();
        assert_eq!(store.atracker_key(), None);
    }

    #[test]
    fn save_replaces_tracker_state() {
        let mut store = Store::new();
        store.save_atracker(AtrackerSave {
            collector_bucket_name: Some("atracker-bucket".to_string()),
            atracker_key: Some("cos-bind-key".to_string()),
            receive_global_events: false,
            add_route: false,
            resource_group: Some("management-rg".to_string()),
        });
        assert!(!store.config().atracker.receive_global_events);
        assert_eq!(
            store.config().atracker.resource_group.as_deref(),
            Some("management-rg")
        );
    }
}
