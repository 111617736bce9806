// Copyright (c) 2025 - Cowboy AI, Inc.
//! Edge network template expansion
//!
//! A single mutation expands an entire edge/firewall network from a
//! pattern: subnet tiers for the F5 interfaces, VPN and VPE, their ACLs,
//! security groups, address prefixes, and (when not layered onto the
//! management network) a dedicated `edge` VPC and resource group. Edge
//! subnets draw from the reserved addressing band so they can never
//! collide with primary-band subnets.
//!
//! Only one edge network may exist per configuration.

use crate::cidr::{edge_cidr_block, EDGE_TIER_ORDER};
use crate::config::{ResourceGroup, Subnet};
use crate::errors::{StoreError, StoreResult};
use crate::store::{defaults, Store, SubnetTier};
use crate::zones::{Zones, ZONES};

/// Firewall traffic pattern the edge network is shaped around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePattern {
    /// VPN-terminating firewall, no web application firewall
    FullTunnel,
    /// Web application firewall, no VPN tiers
    Waf,
    /// Both VPN termination and web application firewall
    VpnAndWaf,
}

impl EdgePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgePattern::FullTunnel => "full-tunnel",
            EdgePattern::Waf => "waf",
            EdgePattern::VpnAndWaf => "vpn-and-waf",
        }
    }

    /// F5 interface tiers for the pattern, in alphabetical order
    pub fn firewall_tiers(&self) -> &'static [&'static str] {
        match self {
            EdgePattern::FullTunnel => &["f5-bastion", "f5-external", "f5-management"],
            EdgePattern::Waf => &["f5-external", "f5-management", "f5-workload"],
            EdgePattern::VpnAndWaf => {
                &["f5-bastion", "f5-external", "f5-management", "f5-workload"]
            }
        }
    }
}

impl Store {
    /// Expand an edge network from a pattern.
    ///
    /// With `use_management` the tiers are layered onto the management
    /// network; otherwise a dedicated `edge` VPC and `edge-rg` resource
    /// group are created in front of the existing networks.
    pub fn create_edge_vpc(
        &mut self,
        pattern: EdgePattern,
        use_management: bool,
    ) -> StoreResult<()> {
        if let Some(prefix) = &self.edge_vpc_prefix {
            return Err(StoreError::EdgeNetworkExists(prefix.clone()));
        }

        // edge addressing requires explicit prefixes on every network
        for vpc in &mut self.config.vpcs {
            vpc.address_prefixes = Some(Zones::splat(vec![]));
        }

        let mut cidr_order: Vec<&str> = EDGE_TIER_ORDER.to_vec();
        let mut security_groups = vec![defaults::f5_management_sg(), defaults::f5_external_sg()];
        match pattern {
            EdgePattern::FullTunnel => {
                cidr_order.remove(4); // no f5-workload slot
                security_groups.push(defaults::f5_bastion_sg());
            }
            EdgePattern::Waf => {
                cidr_order.remove(5); // no f5-bastion slot
                cidr_order.remove(0); // no vpn slots
                cidr_order.remove(0);
                security_groups.push(defaults::f5_workload_sg());
            }
            EdgePattern::VpnAndWaf => {
                security_groups.push(defaults::f5_workload_sg());
                security_groups.push(defaults::f5_bastion_sg());
            }
        }
        security_groups.push(defaults::f5_vpe_sg());

        let mut network = if use_management {
            self.config.vpcs[0].clone()
        } else {
            let mut vpc = defaults::empty_vpc("edge");
            vpc.resource_group = Some("edge-rg".to_string());
            vpc.network_acls = vec![defaults::default_edge_acl(), defaults::f5_external_acl()];
            vpc
        };
        network.address_prefixes = Some(Zones::build(|zone| {
            if use_management {
                vec![
                    format!("10.{}.0.0/16", zone + 4),
                    format!("10.{}0.10.0/16", zone),
                ]
            } else {
                vec![format!("10.{}.0.0/16", zone + 4)]
            }
        }));

        let mut tier_names: Vec<String> = pattern
            .firewall_tiers()
            .iter()
            .map(|tier| tier.to_string())
            .collect();
        if use_management {
            network.network_acls.push(defaults::f5_external_acl());
        } else {
            tier_names.push("vpe".to_string());
        }
        if pattern != EdgePattern::Waf {
            tier_names.push("vpn-1".to_string());
            tier_names.push("vpn-2".to_string());
        }

        for tier in &tier_names {
            let slot = cidr_order
                .iter()
                .position(|name| name == tier)
                .unwrap_or(0);
            let acl = if tier == "f5-external" {
                "f5-external-acl"
            } else if use_management {
                "management-acl"
            } else {
                "edge-acl"
            };
            for zone in ZONES {
                network.subnets[zone].push(Subnet {
                    acl_name: Some(acl.to_string()),
                    cidr: edge_cidr_block(zone, slot),
                    name: format!("{tier}-zone-{zone}"),
                    public_gateway: false,
                });
            }
        }

        let tier_entries: Vec<SubnetTier> = tier_names
            .iter()
            .map(|name| SubnetTier::new(name.clone(), 3))
            .collect();

        if use_management {
            let prefix = network.prefix.clone();
            for group in &mut security_groups {
                group.vpc_name = Some(prefix.clone());
                group.resource_group = network.resource_group.clone();
            }
            self.config.vpcs[0] = network;
            let tiers = self.subnet_tiers.entry(prefix.clone()).or_default();
            let mut combined = tier_entries;
            combined.extend(tiers.iter().cloned());
            *tiers = combined;
            self.edge_vpc_prefix = Some(prefix);
        } else {
            self.config.resource_groups.push(ResourceGroup {
                create: true,
                name: "edge-rg".to_string(),
                use_prefix: true,
            });
            self.config.vpcs.insert(0, network);
            self.subnet_tiers.insert("edge".to_string(), tier_entries);
            self.edge_vpc_prefix = Some("edge".to_string());
        }
        self.edge_pattern = Some(pattern);

        security_groups.extend(self.config.security_groups.drain(..));
        self.config.security_groups = security_groups;
        self.update();
        Ok(())
    }
}
