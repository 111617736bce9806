// Copyright (c) 2025 - Cowboy AI, Inc.
//! VPC, subnet, network ACL and subnet tier mutations
//!
//! Subnets are managed through their tier: a named group of subnets, one
//! per zone, named `{tier}-zone-{n}`. Tier membership is derived state on
//! the store; the wire format only carries the subnets themselves. CIDRs
//! are allocated from the tier's position in the network (see
//! [`crate::cidr`]) and renumbered positionally when a tier is deleted,
//! except for reserved edge tiers, which keep their blocks.

use std::collections::HashMap;

use crate::cidr::{
    cidr_block, edge_cidr_block, edge_tier_index, is_reserved_name, tier_name_from_subnet,
};
use crate::config::{NetworkAcl, Subnet, Vpc};
use crate::cursor;
use crate::errors::{StoreError, StoreResult};
use crate::store::rules::{build_acl_rule, AclRuleParams};
use crate::store::{defaults, Store, SubnetTier};
use crate::zones::{Zones, ZONES};

#[derive(Debug, Clone)]
pub struct VpcParams {
    pub prefix: String,
    pub resource_group: Option<String>,
    pub classic_access: bool,
    pub flow_logs_bucket_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VpcSave {
    pub prefix: String,
    pub resource_group: Option<String>,
    pub classic_access: bool,
    pub flow_logs_bucket_name: Option<String>,
    pub default_network_acl_name: Option<String>,
    pub default_routing_table_name: Option<String>,
    pub default_security_group_name: Option<String>,
    pub use_public_gateways: Zones<bool>,
}

/// Parameters for creating a new subnet tier
#[derive(Debug, Clone)]
pub struct SubnetTierParams {
    pub name: String,
    pub zones: u8,
    pub network_acl: Option<String>,
    pub add_public_gateway: bool,
}

/// Parameters for updating an existing subnet tier.
///
/// `name: None` keeps the current name. The outer option on `network_acl`
/// distinguishes "leave each subnet's ACL alone" (`None`) from "set every
/// subnet's ACL to this value" (`Some`). Zero zones deletes the tier.
#[derive(Debug, Clone, Default)]
pub struct SubnetTierSave {
    pub name: Option<String>,
    pub zones: u8,
    pub network_acl: Option<Option<String>>,
    pub add_public_gateway: Option<bool>,
}

/// Per-subnet settings reachable without going through the tier
#[derive(Debug, Clone)]
pub struct SubnetSave {
    pub acl_name: Option<String>,
    pub public_gateway: bool,
}

pub(crate) fn default_subnet_tiers() -> HashMap<String, Vec<SubnetTier>> {
    let mut tiers = HashMap::new();
    tiers.insert(
        "management".to_string(),
        vec![
            SubnetTier::new("vsi", 3),
            SubnetTier::new("vpe", 3),
            SubnetTier::new("vpn", 1),
        ],
    );
    tiers.insert(
        "workload".to_string(),
        vec![SubnetTier::new("vsi", 3), SubnetTier::new("vpe", 3)],
    );
    tiers
}

/// Recover tier structure from subnet names and CIDRs.
///
/// Used on import, where only the subnets exist on the wire. Tier order is
/// recovered from each tier's third CIDR octet so positional renumbering
/// after the import matches the addressing already in the document.
pub(crate) fn build_subnet_tiers(vpc: &Vpc) -> Vec<SubnetTier> {
    let mut tiers: Vec<SubnetTier> = Vec::new();
    let mut smallest: Option<u32> = None;
    for (_, subnets) in vpc.subnets.iter() {
        for subnet in subnets {
            if !subnet.name.contains("-zone-") {
                continue;
            }
            let tier_name = tier_name_from_subnet(&subnet.name);
            if let Some(tier) = tiers.iter_mut().find(|tier| tier.name == tier_name) {
                tier.zones += 1;
                continue;
            }
            let order: u32 = subnet
                .cidr
                .split('.')
                .nth(2)
                .and_then(|octet| octet.parse().ok())
                .unwrap_or(0);
            match smallest {
                Some(low) if order < low => {
                    smallest = Some(order);
                    tiers.insert(0, SubnetTier::new(tier_name, 1));
                }
                Some(_) => {
                    tiers.push(SubnetTier::new(tier_name, 1));
                }
                None => {
                    smallest = Some(order);
                    tiers.push(SubnetTier::new(tier_name, 1));
                }
            }
        }
    }
    tiers
}

impl Store {
    fn vpc_index(&self, prefix: &str) -> StoreResult<usize> {
        cursor::index_of(&self.config.vpcs, prefix)
            .ok_or_else(|| StoreError::not_found("vpc", prefix))
    }

    pub fn create_vpc(&mut self, params: VpcParams) {
        let mut vpc = defaults::empty_vpc(&params.prefix);
        vpc.resource_group = params.resource_group;
        vpc.classic_access = params.classic_access;
        vpc.flow_logs_bucket_name = params.flow_logs_bucket_name;
        self.subnet_tiers.insert(params.prefix.clone(), vec![]);
        self.config.vpcs.push(vpc);
        self.update();
    }

    /// Renaming a network moves its tier state and, when it carries the
    /// edge deployment, the edge prefix. Entities referencing the old
    /// prefix heal to null on reconcile.
    pub fn save_vpc(&mut self, prefix: &str, params: VpcSave) -> StoreResult<()> {
        let index = self.vpc_index(prefix)?;
        if params.prefix != prefix {
            if let Some(tiers) = self.subnet_tiers.remove(prefix) {
                self.subnet_tiers.insert(params.prefix.clone(), tiers);
            }
            if self.edge_vpc_prefix.as_deref() == Some(prefix) {
                self.edge_vpc_prefix = Some(params.prefix.clone());
            }
        }
        let vpc = &mut self.config.vpcs[index];
        vpc.prefix = params.prefix;
        vpc.resource_group = params.resource_group;
        vpc.classic_access = params.classic_access;
        vpc.flow_logs_bucket_name = params.flow_logs_bucket_name;
        vpc.default_network_acl_name = params.default_network_acl_name;
        vpc.default_routing_table_name = params.default_routing_table_name;
        vpc.default_security_group_name = params.default_security_group_name;
        vpc.use_public_gateways = params.use_public_gateways;
        self.update();
        Ok(())
    }

    pub fn delete_vpc(&mut self, prefix: &str) -> StoreResult<()> {
        cursor::carve(&mut self.config.vpcs, prefix)?;
        self.subnet_tiers.remove(prefix);
        if self.edge_vpc_prefix.as_deref() == Some(prefix) {
            self.edge_vpc_prefix = None;
            self.edge_pattern = None;
        }
        self.update();
        Ok(())
    }

    pub fn save_subnet(&mut self, prefix: &str, name: &str, params: SubnetSave) -> StoreResult<()> {
        let index = self.vpc_index(prefix)?;
        let vpc = &mut self.config.vpcs[index];
        let subnet = find_subnet_mut(vpc, name)?;
        subnet.acl_name = params.acl_name;
        subnet.public_gateway = params.public_gateway;
        self.update();
        Ok(())
    }

    pub fn delete_subnet(&mut self, prefix: &str, name: &str) -> StoreResult<()> {
        let index = self.vpc_index(prefix)?;
        let vpc = &mut self.config.vpcs[index];
        for zone in ZONES {
            let subnets = &mut vpc.subnets[zone];
            if let Some(position) = subnets.iter().position(|subnet| subnet.name == name) {
                subnets.remove(position);
                self.update();
                return Ok(());
            }
        }
        Err(StoreError::not_found("subnet", name))
    }

    pub fn create_network_acl(&mut self, prefix: &str, name: &str) -> StoreResult<()> {
        let index = self.vpc_index(prefix)?;
        self.config.vpcs[index].network_acls.push(NetworkAcl {
            add_ibm_cloud_internal_rules: None,
            add_vpc_connectivity_rules: None,
            add_cluster_rules: None,
            name: name.to_string(),
            rules: vec![],
        });
        self.update();
        Ok(())
    }

    /// Renaming an ACL follows into every subnet of the network using it
    pub fn save_network_acl(&mut self, prefix: &str, name: &str, new_name: &str) -> StoreResult<()> {
        let index = self.vpc_index(prefix)?;
        let vpc = &mut self.config.vpcs[index];
        let acl = cursor::find_mut(&mut vpc.network_acls, name)?;
        acl.name = new_name.to_string();
        for (_, subnets) in vpc.subnets.iter_mut() {
            for subnet in subnets {
                if subnet.acl_name.as_deref() == Some(name) {
                    subnet.acl_name = Some(new_name.to_string());
                }
            }
        }
        self.update();
        Ok(())
    }

    pub fn delete_network_acl(&mut self, prefix: &str, name: &str) -> StoreResult<()> {
        let index = self.vpc_index(prefix)?;
        cursor::carve(&mut self.config.vpcs[index].network_acls, name)?;
        self.update();
        Ok(())
    }

    pub fn create_acl_rule(
        &mut self,
        prefix: &str,
        acl: &str,
        params: AclRuleParams,
    ) -> StoreResult<()> {
        let index = self.vpc_index(prefix)?;
        let acl = cursor::find_mut(&mut self.config.vpcs[index].network_acls, acl)?;
        acl.rules.push(build_acl_rule(&params));
        self.update();
        Ok(())
    }

    pub fn save_acl_rule(
        &mut self,
        prefix: &str,
        acl: &str,
        rule: &str,
        params: AclRuleParams,
    ) -> StoreResult<()> {
        let index = self.vpc_index(prefix)?;
        let acl = cursor::find_mut(&mut self.config.vpcs[index].network_acls, acl)?;
        let found = cursor::find_mut(&mut acl.rules, rule)?;
        crate::store::rules::apply_acl_rule(found, &params);
        self.update();
        Ok(())
    }

    pub fn delete_acl_rule(&mut self, prefix: &str, acl: &str, rule: &str) -> StoreResult<()> {
        let index = self.vpc_index(prefix)?;
        let acl = cursor::find_mut(&mut self.config.vpcs[index].network_acls, acl)?;
        cursor::carve(&mut acl.rules, rule)?;
        self.update();
        Ok(())
    }

    /// Create a tier and carve its subnets, one per requested zone. The
    /// new tier takes the next position in the network, which fixes its
    /// CIDR band.
    pub fn create_subnet_tier(&mut self, prefix: &str, params: SubnetTierParams) -> StoreResult<()> {
        let index = self.vpc_index(prefix)?;
        let tier_index = self.subnet_tiers(prefix).len();
        let vpc = &mut self.config.vpcs[index];
        for zone in ZONES {
            if zone > params.zones {
                break;
            }
            let gateway_allowed = vpc.use_public_gateways[zone];
            vpc.subnets[zone].push(Subnet {
                acl_name: params.network_acl.clone(),
                cidr: cidr_block(index, zone, tier_index),
                name: format!("{}-zone-{}", params.name, zone),
                public_gateway: params.add_public_gateway && gateway_allowed,
            });
        }
        self.subnet_tiers
            .entry(prefix.to_string())
            .or_default()
            .push(SubnetTier::new(params.name, params.zones));
        self.update();
        Ok(())
    }

    /// Rename, rezone, or delete a tier, reshaping its subnets to match.
    ///
    /// Growing the zone count carves the missing subnets; shrinking drops
    /// the out-of-range ones. Deleting (zero zones) removes every subnet
    /// of the tier and renumbers the remaining non-reserved subnets in
    /// each zone by position, keeping the addressing dense.
    pub fn save_subnet_tier(
        &mut self,
        prefix: &str,
        tier_name: &str,
        params: SubnetTierSave,
    ) -> StoreResult<()> {
        let vpc_index = self.vpc_index(prefix)?;
        let tiers = self
            .subnet_tiers
            .get(prefix)
            .cloned()
            .unwrap_or_default();
        if !tiers.iter().any(|tier| tier.name == tier_name) {
            return Err(StoreError::not_found("subnet tier", tier_name));
        }
        let new_name = params.name.clone().unwrap_or_else(|| tier_name.to_string());

        let mut new_tiers: Vec<SubnetTier> = Vec::new();
        for tier in &tiers {
            if tier.name == tier_name {
                if params.zones > 0 {
                    new_tiers.push(SubnetTier::new(new_name.clone(), params.zones));
                }
            } else {
                new_tiers.push(tier.clone());
            }
        }

        let is_edge = self.edge_vpc_prefix.as_deref() == Some(prefix);
        let vpc = &mut self.config.vpcs[vpc_index];
        for zone in ZONES {
            let old_subnet = format!("{tier_name}-zone-{zone}");
            let new_subnet = format!("{new_name}-zone-{zone}");
            let gateway_allowed = vpc.use_public_gateways[zone];
            let subnets = &mut vpc.subnets[zone];
            let position = subnets.iter().position(|subnet| subnet.name == old_subnet);
            match position {
                Some(index) if zone > params.zones => {
                    subnets.remove(index);
                }
                Some(index) => {
                    let subnet = &mut subnets[index];
                    subnet.name = new_subnet;
                    if let Some(acl) = &params.network_acl {
                        subnet.acl_name = acl.clone();
                    }
                    if let Some(gateway) = params.add_public_gateway {
                        subnet.public_gateway = gateway && gateway_allowed;
                    }
                }
                None if zone <= params.zones => {
                    // reserved edge tiers keep their fixed slot in the
                    // edge band regardless of network position
                    let cidr = match edge_tier_index(&new_name).filter(|_| is_edge) {
                        Some(slot) => edge_cidr_block(zone, slot),
                        None => {
                            let tier_index = new_tiers
                                .iter()
                                .position(|tier| tier.name == new_name)
                                .unwrap_or(0);
                            cidr_block(vpc_index, zone, tier_index)
                        }
                    };
                    subnets.push(Subnet {
                        acl_name: params.network_acl.clone().flatten(),
                        cidr,
                        name: new_subnet,
                        public_gateway: params.add_public_gateway.unwrap_or(false)
                            && gateway_allowed,
                    });
                }
                None => {}
            }
        }

        if params.zones == 0 {
            for zone in ZONES {
                for (index, subnet) in vpc.subnets[zone].iter_mut().enumerate() {
                    if !is_reserved_name(tier_name_from_subnet(&subnet.name)) {
                        subnet.cidr = cidr_block(vpc_index, zone, index);
                    }
                }
            }
        }

        self.subnet_tiers.insert(prefix.to_string(), new_tiers);
        self.update();
        Ok(())
    }

    pub fn delete_subnet_tier(&mut self, prefix: &str, tier_name: &str) -> StoreResult<()> {
        self.save_subnet_tier(prefix, tier_name, SubnetTierSave::default())
    }

    pub(crate) fn reconcile_vpcs(&mut self) {
        self.vpc_list.clear();
        self.subnet_map.clear();
        self.network_acl_map.clear();
        for vpc in &mut self.config.vpcs {
            cursor::heal_unfound(
                &self.resource_group_list,
                &mut vpc.resource_group,
                "resource group",
            );
            cursor::heal_unfound(
                &self.cos_buckets,
                &mut vpc.flow_logs_bucket_name,
                "flow logs bucket",
            );
            let acl_names = cursor::names(&vpc.network_acls);
            let mut subnet_names = Vec::new();
            for (zone, subnets) in vpc.subnets.iter_mut() {
                let gateway_allowed = vpc.use_public_gateways[zone];
                for subnet in subnets {
                    cursor::heal_unfound(&acl_names, &mut subnet.acl_name, "network acl");
                    if !gateway_allowed {
                        subnet.public_gateway = false;
                    }
                    subnet_names.push(subnet.name.clone());
                }
            }
            self.vpc_list.push(vpc.prefix.clone());
            self.subnet_map.insert(vpc.prefix.clone(), subnet_names);
            self.network_acl_map.insert(vpc.prefix.clone(), acl_names);
        }
    }
}

fn find_subnet_mut<'a>(vpc: &'a mut Vpc, name: &str) -> StoreResult<&'a mut Subnet> {
    for (_, subnets) in vpc.subnets.iter_mut() {
        if let Some(subnet) = subnets.iter_mut().find(|subnet| subnet.name == name) {
            return Ok(subnet);
        }
    }
    Err(StoreError::not_found("subnet", name))
}
