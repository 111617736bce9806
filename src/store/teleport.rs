// Copyright (c) 2025 - Cowboy AI, Inc.
//! Teleport bastion mutations
//!
//! Teleport is gated on App ID: the bastion's identity key must belong to
//! the App ID instance, and the session recording bucket and its bound
//! service key must belong to the same object storage instance. Disabling
//! teleport resets the configuration and removes every bastion deployment.

use crate::config::{ClaimToRole, TeleportConfig};
use crate::cursor;
use crate::errors::StoreResult;
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct TeleportSave {
    pub enable_teleport: bool,
    pub config: Option<TeleportConfig>,
}

impl Store {
    pub fn save_teleport(&mut self, params: TeleportSave) {
        let mut config = params.config;
        if !self.config.appid.use_appid {
            if let Some(config) = config.as_mut() {
                config.app_id_key_name = None;
            }
        }
        self.enable_teleport = params.enable_teleport;
        if self.enable_teleport {
            self.config.teleport_config = config.unwrap_or_default();
        } else {
            self.config.teleport_config = TeleportConfig::default();
            self.config.teleport_vsi.clear();
        }
        self.update();
    }

    pub fn create_claim_to_role(&mut self, claim: ClaimToRole) {
        self.config.teleport_config.claims_to_roles.push(claim);
        self.update();
    }

    pub fn save_claim_to_role(&mut self, email: &str, claim: ClaimToRole) -> StoreResult<()> {
        let claims = &mut self.config.teleport_config.claims_to_roles;
        let found = cursor::find_mut(claims, email)?;
        *found = claim;
        self.update();
        Ok(())
    }

    pub fn delete_claim_to_role(&mut self, email: &str) -> StoreResult<()> {
        cursor::carve(&mut self.config.teleport_config.claims_to_roles, email)?;
        self.update();
        Ok(())
    }

    pub(crate) fn reconcile_teleport(&mut self) {
        if self.config.appid.use_appid {
            let keys = self.config.appid.keys.clone();
            cursor::heal_unfound(
                &keys,
                &mut self.config.teleport_config.app_id_key_name,
                "appid key",
            );
        } else {
            self.config.teleport_config.app_id_key_name = None;
        }
        if !self.enable_teleport {
            return;
        }
        match self.config.teleport_config.cos_bucket_name.clone() {
            Some(bucket) if !self.cos_buckets.contains(&bucket) => {
                self.config.teleport_config.cos_bucket_name = None;
                self.config.teleport_config.cos_key_name = None;
            }
            Some(bucket) => {
                // the bound key must belong to the instance owning the bucket
                let keys = self.cos_keys_for_bucket(&bucket);
                cursor::heal_unfound(
                    &keys,
                    &mut self.config.teleport_config.cos_key_name,
                    "cos key",
                );
            }
            None => {}
        }
    }
}
