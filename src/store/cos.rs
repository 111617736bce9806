// Copyright (c) 2025 - Cowboy AI, Inc.
//! Object storage mutations
//!
//! Buckets and service keys are nested inside their instance; the derived
//! lists flatten them so other families can heal against bucket and key
//! names without caring which instance owns them. Renames of the bucket or
//! key backing the activity tracker follow into the tracker state so the
//! tracker never dangles through its own storage being renamed.

use crate::config::{Bucket, CosKey, ObjectStorage};
use crate::cursor;
use crate::errors::StoreResult;
use crate::store::Store;

/// Instance-level settings, buckets and keys are managed separately
#[derive(Debug, Clone)]
pub struct ObjectStorageParams {
    pub name: String,
    pub plan: String,
    pub resource_group: Option<String>,
    pub use_data: bool,
    pub random_suffix: bool,
}

impl Store {
    pub fn create_cos(&mut self, params: ObjectStorageParams) {
        self.config.cos.push(ObjectStorage {
            buckets: vec![],
            keys: vec![],
            name: params.name,
            plan: params.plan,
            resource_group: params.resource_group,
            use_data: params.use_data,
            random_suffix: params.random_suffix,
        });
        self.update();
    }

    pub fn save_cos(&mut self, name: &str, params: ObjectStorageParams) -> StoreResult<()> {
        let instance = cursor::find_mut(&mut self.config.cos, name)?;
        instance.name = params.name;
        instance.plan = params.plan;
        instance.resource_group = params.resource_group;
        instance.use_data = params.use_data;
        instance.random_suffix = params.random_suffix;
        self.update();
        Ok(())
    }

    pub fn delete_cos(&mut self, name: &str) -> StoreResult<()> {
        cursor::carve(&mut self.config.cos, name)?;
        self.update();
        Ok(())
    }

    pub fn create_cos_bucket(&mut self, instance: &str, bucket: Bucket) -> StoreResult<()> {
        let instance = cursor::find_mut(&mut self.config.cos, instance)?;
        instance.buckets.push(bucket);
        self.update();
        Ok(())
    }

    /// Renaming the activity tracker's collector bucket carries the new
    /// name into the tracker state.
    pub fn save_cos_bucket(
        &mut self,
        instance: &str,
        name: &str,
        bucket: Bucket,
    ) -> StoreResult<()> {
        let instance = cursor::find_mut(&mut self.config.cos, instance)?;
        let found = cursor::find_mut(&mut instance.buckets, name)?;
        let renamed = found.name != bucket.name;
        let new_name = bucket.name.clone();
        *found = bucket;
        if renamed && self.config.atracker.collector_bucket_name.as_deref() == Some(name) {
            self.config.atracker.collector_bucket_name = Some(new_name);
        }
        self.update();
        Ok(())
    }

    pub fn delete_cos_bucket(&mut self, instance: &str, name: &str) -> StoreResult<()> {
        let instance = cursor::find_mut(&mut self.config.cos, instance)?;
        cursor::carve(&mut instance.buckets, name)?;
        self.update();
        Ok(())
    }

    pub fn create_cos_key(&mut self, instance: &str, key: CosKey) -> StoreResult<()> {
        let instance = cursor::find_mut(&mut self.config.cos, instance)?;
        instance.keys.push(key);
        self.update();
        Ok(())
    }

    /// Renaming the key bound to the activity tracker carries the new name
    /// into the tracker state.
    pub fn save_cos_key(&mut self, instance: &str, name: &str, key: CosKey) -> StoreResult<()> {
        let instance = cursor::find_mut(&mut self.config.cos, instance)?;
        let found = cursor::find_mut(&mut instance.keys, name)?;
        let renamed = found.name != key.name;
        let new_name = key.name.clone();
        *found = key;
        if renamed && self.atracker_key.as_deref() == Some(name) {
            self.atracker_key = Some(new_name);
        }
        self.update();
        Ok(())
    }

    pub fn delete_cos_key(&mut self, instance: &str, name: &str) -> StoreResult<()> {
        let instance = cursor::find_mut(&mut self.config.cos, instance)?;
        cursor::carve(&mut instance.keys, name)?;
        self.update();
        Ok(())
    }

    /// Service key names of the instance owning the named bucket
    pub(crate) fn cos_keys_for_bucket(&self, bucket: &str) -> Vec<String> {
        self.config
            .cos
            .iter()
            .find(|instance| cursor::contains_key(&instance.buckets, bucket))
            .map(|instance| cursor::names(&instance.keys))
            .unwrap_or_default()
    }

    pub(crate) fn reconcile_cos(&mut self) {
        self.cos_instances = cursor::names(&self.config.cos);
        self.cos_buckets.clear();
        self.cos_keys.clear();
        for instance in &mut self.config.cos {
            cursor::heal_unfound(
                &self.resource_group_list,
                &mut instance.resource_group,
                "resource group",
            );
            for bucket in &mut instance.buckets {
                cursor::heal_unfound(&self.encryption_keys, &mut bucket.kms_key, "encryption key");
                self.cos_buckets.push(bucket.name.clone());
            }
            for key in &instance.keys {
                self.cos_keys.push(key.name.clone());
            }
        }
    }
}
