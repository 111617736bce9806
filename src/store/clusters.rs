// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cluster and worker pool mutations
//!
//! Worker pools live inside their cluster and inherit its network and
//! machine flavor on creation. Moving a cluster to another network clears
//! every subnet selection, including the pools'; subnets do not carry
//! across networks.

use crate::config::{Cluster, KmsConfig, WorkerPool};
use crate::cursor;
use crate::errors::StoreResult;
use crate::store::Store;

/// Cluster fields editable after creation; worker pools are managed
/// through their own operations
#[derive(Debug, Clone)]
pub struct ClusterSave {
    pub name: String,
    pub cos_name: Option<String>,
    pub entitlement: Option<String>,
    pub kube_type: String,
    pub kube_version: String,
    pub operating_system: String,
    pub machine_type: String,
    pub resource_group: Option<String>,
    pub kms_config: KmsConfig,
    pub subnet_names: Vec<String>,
    pub vpc_name: Option<String>,
    pub workers_per_subnet: u32,
}

#[derive(Debug, Clone)]
pub struct WorkerPoolParams {
    pub name: String,
    pub flavor: Option<String>,
    pub entitlement: Option<String>,
    pub workers_per_subnet: u32,
}

impl Store {
    pub fn create_cluster(&mut self, cluster: Cluster) {
        self.config.clusters.push(cluster);
        self.update();
    }

    pub fn save_cluster(&mut self, name: &str, params: ClusterSave) -> StoreResult<()> {
        let cluster = cursor::find_mut(&mut self.config.clusters, name)?;
        if cluster.vpc_name != params.vpc_name {
            for pool in &mut cluster.worker_pools {
                pool.vpc_name = params.vpc_name.clone();
                pool.subnet_names.clear();
            }
        }
        cluster.name = params.name;
        cluster.cos_name = params.cos_name;
        cluster.entitlement = params.entitlement;
        cluster.kube_type = params.kube_type;
        cluster.kube_version = params.kube_version;
        cluster.operating_system = params.operating_system;
        cluster.machine_type = params.machine_type;
        cluster.resource_group = params.resource_group;
        cluster.kms_config = params.kms_config;
        cluster.subnet_names = params.subnet_names;
        cluster.vpc_name = params.vpc_name;
        cluster.workers_per_subnet = params.workers_per_subnet;
        self.update();
        Ok(())
    }

    pub fn delete_cluster(&mut self, name: &str) -> StoreResult<()> {
        cursor::carve(&mut self.config.clusters, name)?;
        self.update();
        Ok(())
    }

    /// New pools inherit the cluster's network, subnets, and machine
    /// flavor unless a flavor is given.
    pub fn create_worker_pool(&mut self, cluster: &str, params: WorkerPoolParams) -> StoreResult<()> {
        let cluster = cursor::find_mut(&mut self.config.clusters, cluster)?;
        cluster.worker_pools.push(WorkerPool {
            entitlement: params.entitlement,
            flavor: params.flavor.unwrap_or_else(|| cluster.machine_type.clone()),
            name: params.name,
            subnet_names: cluster.subnet_names.clone(),
            vpc_name: cluster.vpc_name.clone(),
            workers_per_subnet: params.workers_per_subnet,
        });
        self.update();
        Ok(())
    }

    pub fn save_worker_pool(
        &mut self,
        cluster: &str,
        pool: &str,
        params: WorkerPoolParams,
    ) -> StoreResult<()> {
        let cluster = cursor::find_mut(&mut self.config.clusters, cluster)?;
        let machine_type = cluster.machine_type.clone();
        let found = cursor::find_mut(&mut cluster.worker_pools, pool)?;
        found.name = params.name;
        found.entitlement = params.entitlement;
        found.flavor = params.flavor.unwrap_or(machine_type);
        found.workers_per_subnet = params.workers_per_subnet;
        self.update();
        Ok(())
    }

    pub fn delete_worker_pool(&mut self, cluster: &str, pool: &str) -> StoreResult<()> {
        let cluster = cursor::find_mut(&mut self.config.clusters, cluster)?;
        cursor::carve(&mut cluster.worker_pools, pool)?;
        self.update();
        Ok(())
    }

    pub(crate) fn reconcile_clusters(&mut self) {
        for cluster in &mut self.config.clusters {
            cursor::heal_unfound(&self.cos_instances, &mut cluster.cos_name, "cos instance");
            cursor::heal_unfound(
                &self.encryption_keys,
                &mut cluster.kms_config.crk_name,
                "encryption key",
            );
            cursor::heal_unfound(
                &self.resource_group_list,
                &mut cluster.resource_group,
                "resource group",
            );
            cursor::heal_unfound(&self.vpc_list, &mut cluster.vpc_name, "vpc");
            match &cluster.vpc_name {
                Some(vpc) => {
                    let subnets = self.subnet_map.get(vpc).cloned().unwrap_or_default();
                    cursor::retain_found(&subnets, &mut cluster.subnet_names);
                }
                None => cluster.subnet_names.clear(),
            }
            for pool in &mut cluster.worker_pools {
                cursor::heal_unfound(&self.vpc_list, &mut pool.vpc_name, "vpc");
                match &pool.vpc_name {
                    Some(vpc) => {
                        let subnets = self.subnet_map.get(vpc).cloned().unwrap_or_default();
                        cursor::retain_found(&subnets, &mut pool.subnet_names);
                    }
                    None => pool.subnet_names.clear(),
                }
            }
        }
    }
}
