// Copyright (c) 2025 - Cowboy AI, Inc.
//! Key management mutations
//!
//! A single key management instance owns every encryption key. Key names
//! feed the `encryption_keys` list that object storage buckets, clusters,
//! and server boot volumes heal against.

use crate::config::KeyPolicies;
use crate::cursor;
use crate::errors::StoreResult;
use crate::store::{defaults, Store};

/// Instance-level settings
#[derive(Debug, Clone)]
pub struct KeyManagementSave {
    pub name: String,
    pub resource_group: Option<String>,
    pub use_hs_crypto: bool,
    pub use_data: bool,
}

/// Settings for a single encryption key
#[derive(Debug, Clone)]
pub struct EncryptionKeyParams {
    pub name: String,
    pub root_key: bool,
    pub key_ring: Option<String>,
    pub interval_month: u32,
}

impl Store {
    /// Bringing your own HPCS instance forces `use_data`; the instance
    /// already exists and cannot be created by the deployment.
    pub fn save_key_management(&mut self, params: KeyManagementSave) {
        let kms = &mut self.config.key_management;
        kms.name = params.name;
        kms.resource_group = params.resource_group;
        kms.use_hs_crypto = params.use_hs_crypto;
        kms.use_data = if params.use_hs_crypto {
            true
        } else {
            params.use_data
        };
        self.update();
    }

    pub fn create_encryption_key(&mut self, params: EncryptionKeyParams) {
        let mut key = defaults::root_key(&params.name);
        key.root_key = params.root_key;
        key.key_ring = params.key_ring;
        key.policies.rotation.interval_month = params.interval_month;
        self.config.key_management.keys.push(key);
        self.update();
    }

    pub fn save_encryption_key(
        &mut self,
        name: &str,
        params: EncryptionKeyParams,
    ) -> StoreResult<()> {
        let key = cursor::find_mut(&mut self.config.key_management.keys, name)?;
        key.name = params.name;
        key.root_key = params.root_key;
        key.key_ring = params.key_ring;
        key.policies = KeyPolicies {
            rotation: crate::config::RotationPolicy {
                interval_month: params.interval_month,
            },
        };
        self.update();
        Ok(())
    }

    pub fn delete_encryption_key(&mut self, name: &str) -> StoreResult<()> {
        cursor::carve(&mut self.config.key_management.keys, name)?;
        self.update();
        Ok(())
    }

    pub(crate) fn reconcile_key_management(&mut self) {
        self.encryption_keys = cursor::names(&self.config.key_management.keys);
        cursor::heal_unfound(
            &self.resource_group_list,
            &mut self.config.key_management.resource_group,
            "resource group",
        );
    }
}
