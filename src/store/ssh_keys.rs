// Copyright (c) 2025 - Cowboy AI, Inc.
//! SSH key mutations
//!
//! Key renames follow into server deployments so an in-use key can be
//! renamed without severing it; deletion severs, healed on reconcile.

use crate::config::SshKey;
use crate::cursor;
use crate::errors::StoreResult;
use crate::store::Store;

impl Store {
    pub fn create_ssh_key(&mut self, key: SshKey) {
        self.config.ssh_keys.push(key);
        self.update();
    }

    pub fn save_ssh_key(&mut self, name: &str, key: SshKey) -> StoreResult<()> {
        let found = cursor::find_mut(&mut self.config.ssh_keys, name)?;
        let new_name = key.name.clone();
        *found = key;
        if new_name != name {
            for vsi in &mut self.config.vsi {
                for reference in &mut vsi.ssh_keys {
                    if reference == name {
                        *reference = new_name.clone();
                    }
                }
            }
        }
        self.update();
        Ok(())
    }

    pub fn delete_ssh_key(&mut self, name: &str) -> StoreResult<()> {
        cursor::carve(&mut self.config.ssh_keys, name)?;
        self.update();
        Ok(())
    }

    pub(crate) fn reconcile_ssh_keys(&mut self) {
        self.ssh_key_list = cursor::names(&self.config.ssh_keys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rename_follows_into_server_deployments() {
        let mut store = Store::new();
        store
            .save_ssh_key(
                "slz-ssh-key",
                SshKey {
                    name: "ops-ssh-key".to_string(),
                    public_key: "<REPLACE_WITH_VALID_PUBLIC_KEY>".to_string(),
                    resource_group: Some("management-rg".to_string()),
                },
            )
            .unwrap();
        assert_eq!(store.config().vsi[0].ssh_keys, vec!["ops-ssh-key"]);
    }

    #[test]
    fn delete_severs_server_references() {
        let mut store = Store::new();
        store.delete_ssh_key("slz-ssh-key").unwrap();
        assert!(store.config().vsi[0].ssh_keys.is_empty());
    }
}
