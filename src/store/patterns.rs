// Copyright (c) 2025 - Cowboy AI, Inc.
//! Starting pattern application
//!
//! A pattern resets the configuration to one of the shipped topologies.
//! All three share the same networks, storage, and key management; they
//! differ in what runs on the workload side: clusters, virtual servers,
//! or nothing.

use crate::config::{AppId, Atracker, TeleportConfig};
use crate::cursor;
use crate::store::{defaults, resource_groups, vpc, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Managed clusters on both networks
    Roks,
    /// Virtual servers on both networks
    Vsi,
    /// Networks only
    Vpc,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Roks => "roks",
            Pattern::Vsi => "vsi",
            Pattern::Vpc => "vpc",
        }
    }
}

impl Store {
    /// Reset the configuration to a shipped pattern, discarding every
    /// customization including the edge network and teleport state.
    pub fn apply_pattern(&mut self, pattern: Pattern) {
        self.config.resource_groups = resource_groups::default_resource_groups();
        let mut key_management = defaults::default_key_management();
        key_management.keys.push(defaults::root_key("slz-roks-key"));
        key_management
            .keys
            .push(defaults::root_key("slz-vsi-volume-key"));
        self.config.key_management = key_management;
        self.config.cos = defaults::default_object_storage();
        self.config.vpcs = defaults::default_vpcs();
        self.config.security_groups = defaults::default_security_groups();
        self.config.clusters = vec![defaults::default_workload_cluster()];
        self.config.ssh_keys = defaults::default_ssh_keys();
        self.config.vpn_gateways = defaults::default_vpn_gateways();
        self.config.enable_transit_gateway = true;
        self.config.transit_gateway_connections =
            vec!["management".to_string(), "workload".to_string()];
        self.config.transit_gateway_resource_group = Some("service-rg".to_string());
        self.config.atracker = Atracker {
            collector_bucket_name: Some("atracker-bucket".to_string()),
            receive_global_events: true,
            resource_group: Some("service-rg".to_string()),
            add_route: true,
        };
        self.config.appid = AppId {
            use_appid: false,
            name: None,
            resource_group: None,
            use_data: Some(false),
            keys: vec![],
        };
        self.config.teleport_config = TeleportConfig::default();
        self.config.teleport_vsi.clear();
        self.config.vsi = vec![defaults::default_management_server()];
        self.config.f5_vsi.clear();
        self.config.f5_template_data = Default::default();

        self.subnet_tiers = vpc::default_subnet_tiers();
        self.edge_vpc_prefix = None;
        self.edge_pattern = None;
        self.f5_on_management = false;
        self.enable_teleport = false;
        self.atracker_key = Some("cos-bind-key".to_string());

        let keys = &mut self.config.key_management.keys;
        match pattern {
            Pattern::Roks => {
                keys.pop();
                self.config.ssh_keys.clear();
                self.config.vsi.clear();
                self.config
                    .clusters
                    .push(defaults::default_management_cluster());
            }
            Pattern::Vsi => {
                let _ = cursor::carve(keys, "slz-roks-key");
                self.config.clusters.clear();
                self.config.vsi = vec![
                    defaults::default_management_server(),
                    defaults::default_workload_server(),
                ];
            }
            Pattern::Vpc => {
                keys.pop();
                self.config.ssh_keys.clear();
                self.config.clusters.clear();
                self.config.vsi.clear();
            }
        }

        self.pattern = Some(pattern.as_str().to_string());
        self.update();
    }
}
