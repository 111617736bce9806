// Copyright (c) 2025 - Cowboy AI, Inc.
//! App ID mutations
//!
//! Teleport authenticates against App ID, so turning App ID off while
//! teleport is enabled tears the teleport deployment down in the same
//! mutation rather than leaving it pointing at a dead identity provider.

use crate::config::{AppId, TeleportConfig};
use crate::cursor;
use crate::store::Store;

impl Store {
    pub fn save_appid(&mut self, params: AppId) {
        if !params.use_appid && self.enable_teleport {
            self.enable_teleport = false;
            self.config.teleport_config = TeleportConfig::default();
            self.config.teleport_vsi.clear();
        }
        self.config.appid = params;
        self.update();
    }

    pub(crate) fn reconcile_appid(&mut self) {
        cursor::heal_unfound(
            &self.resource_group_list,
            &mut self.config.appid.resource_group,
            "resource group",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::teleport::TeleportSave;
    use pretty_assertions::assert_eq;

    fn enabled_appid() -> AppId {
        AppId {
            use_appid: true,
            name: Some("slz-appid".to_string()),
            resource_group: Some("service-rg".to_string()),
            use_data: Some(false),
            keys: vec!["slz-appid-key".to_string()],
        }
    }

    #[test]
    fn disabling_appid_tears_down_teleport() {
        let mut store = Store::new();
        store.save_appid(enabled_appid());
        store.save_teleport(TeleportSave {
            enable_teleport: true,
            config: Some(TeleportConfig {
                hostname: Some("bastion".to_string()),
                app_id_key_name: Some("slz-appid-key".to_string()),
                ..TeleportConfig::default()
            }),
        });
        assert!(store.enable_teleport());

        let mut params = enabled_appid();
        params.use_appid = false;
        store.save_appid(params);
        assert!(!store.enable_teleport());
        assert_eq!(store.config().teleport_config, TeleportConfig::default());
        assert!(store.config().teleport_vsi.is_empty());
    }

    #[test]
    fn appid_resource_group_heals() {
        let mut store = Store::new();
        let mut params = enabled_appid();
        params.resource_group = Some("ghost-rg".to_string());
        store.save_appid(params);
        assert_eq!(store.config().appid.resource_group, None);
    }
}
