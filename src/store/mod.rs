// Copyright (c) 2025 - Cowboy AI, Inc.
//! Landing-Zone State Store
//!
//! [`Store`] owns the configuration graph plus derived lookup state and
//! exposes a synchronous mutation surface per entity family. Every public
//! mutation ends with a full reconciliation pass: derived name lists are
//! rebuilt and every weak reference that no longer resolves is healed to
//! null, in a fixed family order. The change callback fires exactly once
//! per completed mutation, after reconciliation.
//!
//! Mutations that look up a missing key return [`StoreError::NotFound`]
//! without reconciling; the graph is left as it was before the call.

pub mod appid;
pub mod atracker;
pub mod clusters;
pub mod cos;
pub mod defaults;
pub mod edge;
pub mod f5;
pub mod key_management;
pub mod patterns;
pub mod resource_groups;
pub mod rules;
pub mod security_groups;
pub mod ssh_keys;
pub mod teleport;
pub mod transit_gateway;
pub mod vpc;
pub mod vpn;
pub mod vsi;

use std::collections::HashMap;

use crate::cidr::cidr_blocks_overlap;
use crate::config::{AppId, Atracker, Config, TeleportConfig};
use crate::errors::{StoreError, StoreResult};
use crate::store::vpc::build_subnet_tiers;

pub use edge::EdgePattern;
pub use patterns::Pattern;

/// A named group of subnets spanning one or more zones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetTier {
    pub name: String,
    pub zones: u8,
}

impl SubnetTier {
    pub fn new(name: impl Into<String>, zones: u8) -> Self {
        SubnetTier {
            name: name.into(),
            zones,
        }
    }
}

/// Callback fired after every completed mutation
pub type UpdateCallback = Box<dyn FnMut(&Config)>;

/// In-memory configuration state store
pub struct Store {
    pub(crate) config: Config,

    // derived name lists, rebuilt on every reconcile pass
    pub(crate) resource_group_list: Vec<String>,
    pub(crate) encryption_keys: Vec<String>,
    pub(crate) cos_instances: Vec<String>,
    pub(crate) cos_buckets: Vec<String>,
    pub(crate) cos_keys: Vec<String>,
    pub(crate) ssh_key_list: Vec<String>,
    pub(crate) vpc_list: Vec<String>,
    pub(crate) subnet_map: HashMap<String, Vec<String>>,
    pub(crate) network_acl_map: HashMap<String, Vec<String>>,
    pub(crate) security_group_map: HashMap<String, Vec<String>>,

    // tier state survives reconciliation; it orders CIDR allocation
    pub(crate) subnet_tiers: HashMap<String, Vec<SubnetTier>>,

    pub(crate) edge_vpc_prefix: Option<String>,
    pub(crate) edge_pattern: Option<EdgePattern>,
    pub(crate) f5_on_management: bool,
    pub(crate) enable_teleport: bool,
    pub(crate) atracker_key: Option<String>,
    pub(crate) pattern: Option<String>,
    pub(crate) prefix: String,

    update_callback: Option<UpdateCallback>,
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}

impl Store {
    /// Create a store seeded with the default landing-zone topology:
    /// management and workload networks, key management, object storage,
    /// a workload cluster and a management server.
    pub fn new() -> Self {
        let mut key_management = defaults::default_key_management();
        key_management.keys.push(defaults::root_key("slz-roks-key"));
        key_management
            .keys
            .push(defaults::root_key("slz-vsi-volume-key"));

        let config = Config {
            wait_till: "IngressReady".to_string(),
            network_cidr: "10.0.0.0/8".to_string(),
            resource_groups: resource_groups::default_resource_groups(),
            key_management,
            cos: defaults::default_object_storage(),
            vpcs: defaults::default_vpcs(),
            security_groups: defaults::default_security_groups(),
            clusters: vec![defaults::default_workload_cluster()],
            ssh_keys: defaults::default_ssh_keys(),
            vpn_gateways: defaults::default_vpn_gateways(),
            enable_transit_gateway: true,
            transit_gateway_connections: vec![
                "management".to_string(),
                "workload".to_string(),
            ],
            transit_gateway_resource_group: Some("service-rg".to_string()),
            atracker: Atracker {
                collector_bucket_name: Some("atracker-bucket".to_string()),
                receive_global_events: true,
                resource_group: Some("service-rg".to_string()),
                add_route: true,
            },
            appid: AppId {
                use_appid: false,
                name: None,
                resource_group: None,
                use_data: Some(false),
                keys: vec![],
            },
            teleport_config: TeleportConfig::default(),
            teleport_vsi: vec![],
            vsi: vec![defaults::default_management_server()],
            f5_vsi: vec![],
            f5_template_data: Default::default(),
        };

        let mut store = Store {
            config,
            resource_group_list: vec![],
            encryption_keys: vec![],
            cos_instances: vec![],
            cos_buckets: vec![],
            cos_keys: vec![],
            ssh_key_list: vec![],
            vpc_list: vec![],
            subnet_map: HashMap::new(),
            network_acl_map: HashMap::new(),
            security_group_map: HashMap::new(),
            subnet_tiers: vpc::default_subnet_tiers(),
            edge_vpc_prefix: None,
            edge_pattern: None,
            f5_on_management: false,
            enable_teleport: false,
            atracker_key: Some("cos-bind-key".to_string()),
            pattern: None,
            prefix: "slz".to_string(),
            update_callback: None,
        };
        store.reconcile();
        store
    }

    /// The configuration graph
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.config)?)
    }

    /// Register the change callback, replacing any previous one
    pub fn set_update_callback(&mut self, callback: UpdateCallback) {
        self.update_callback = Some(callback);
    }

    /// Ordered tier list for a VPC prefix, empty when unknown
    pub fn subnet_tiers(&self, prefix: &str) -> &[SubnetTier] {
        self.subnet_tiers
            .get(prefix)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Prefix of the generated edge network, if one exists
    pub fn edge_vpc_prefix(&self) -> Option<&str> {
        self.edge_vpc_prefix.as_deref()
    }

    /// Edge firewall pattern, if an edge network exists
    pub fn edge_pattern(&self) -> Option<EdgePattern> {
        self.edge_pattern
    }

    /// Whether the edge network was layered onto the management VPC
    pub fn f5_on_management(&self) -> bool {
        self.f5_on_management
    }

    /// Whether teleport bastion deployments are enabled
    pub fn enable_teleport(&self) -> bool {
        self.enable_teleport
    }

    /// Service credential name backing the activity tracker bucket
    pub fn atracker_key(&self) -> Option<&str> {
        self.atracker_key.as_deref()
    }

    /// Name of the applied pattern, `custom` after an import
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Deployment prefix prepended to generated resource names
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// VPC prefixes in network order
    pub fn vpc_list(&self) -> &[String] {
        &self.vpc_list
    }

    /// Subnet names within a VPC
    pub fn subnet_names(&self, prefix: &str) -> &[String] {
        self.subnet_map
            .get(prefix)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Encryption key names
    pub fn encryption_keys(&self) -> &[String] {
        &self.encryption_keys
    }

    /// Replace the configuration graph wholesale from serialized JSON.
    ///
    /// The incoming document is validated before anything is touched:
    /// a parse failure or overlapping subnet CIDRs leave the store exactly
    /// as it was. On success subnet tiers are rebuilt from subnet names and
    /// the pattern becomes `custom`.
    pub fn hard_set_config(&mut self, json: &str) -> StoreResult<()> {
        let config: Config = serde_json::from_str(json)?;
        validate_subnet_cidrs(&config)?;

        let mut subnet_tiers = HashMap::new();
        for vpc in &config.vpcs {
            subnet_tiers.insert(vpc.prefix.clone(), build_subnet_tiers(vpc));
        }
        self.config = config;
        self.subnet_tiers = subnet_tiers;
        self.pattern = Some("custom".to_string());
        self.update();
        Ok(())
    }

    /// Run the full reconciliation pass, then fire the change callback
    pub fn update(&mut self) {
        self.reconcile();
        tracing::debug!(vpcs = self.vpc_list.len(), "configuration updated");
        // take the callback so it can borrow the config while running
        if let Some(mut callback) = self.update_callback.take() {
            callback(&self.config);
            self.update_callback = Some(callback);
        }
    }

    /// Rebuild every derived list and heal dangling references, in fixed
    /// family order. Families earlier in the order publish the name lists
    /// later families heal against.
    fn reconcile(&mut self) {
        self.reconcile_resource_groups();
        self.reconcile_key_management();
        self.reconcile_cos();
        self.reconcile_vpcs();
        self.reconcile_atracker();
        self.reconcile_appid();
        self.reconcile_clusters();
        self.reconcile_f5();
        self.reconcile_security_groups();
        self.reconcile_ssh_keys();
        self.reconcile_teleport();
        self.reconcile_vsi();
        self.reconcile_transit_gateway();
        self.reconcile_vpn_gateways();
    }
}

fn validate_subnet_cidrs(config: &Config) -> StoreResult<()> {
    let mut seen: Vec<&str> = Vec::new();
    for vpc in &config.vpcs {
        for (_, subnets) in vpc.subnets.iter() {
            for subnet in subnets {
                for existing in &seen {
                    if cidr_blocks_overlap(existing, &subnet.cidr) {
                        return Err(StoreError::OverlappingCidr(
                            existing.to_string(),
                            subnet.cidr.clone(),
                        ));
                    }
                }
                seen.push(&subnet.cidr);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn new_store_seeds_default_topology() {
        let store = Store::new();
        assert_eq!(store.vpc_list(), &["management", "workload"]);
        assert_eq!(
            store.encryption_keys(),
            &[
                "slz-atracker-key",
                "slz-slz-key",
                "slz-roks-key",
                "slz-vsi-volume-key"
            ]
        );
        assert_eq!(
            store.subnet_names("management"),
            &[
                "vsi-zone-1",
                "vpe-zone-1",
                "vpn-zone-1",
                "vsi-zone-2",
                "vpe-zone-2",
                "vsi-zone-3",
                "vpe-zone-3"
            ]
        );
        assert_eq!(store.pattern(), None);
        assert_eq!(store.edge_vpc_prefix(), None);
    }

    #[test]
    fn callback_fires_once_per_mutation() {
        let mut store = Store::new();
        let count = Rc::new(RefCell::new(0));
        let seen = count.clone();
        store.set_update_callback(Box::new(move |_config| {
            *seen.borrow_mut() += 1;
        }));
        store.create_resource_group(crate::config::ResourceGroup {
            create: true,
            name: "dev-rg".to_string(),
            use_prefix: true,
        });
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn failed_lookup_does_not_fire_callback() {
        let mut store = Store::new();
        let count = Rc::new(RefCell::new(0));
        let seen = count.clone();
        store.set_update_callback(Box::new(move |_config| {
            *seen.borrow_mut() += 1;
        }));
        assert!(store.delete_resource_group("ghost-rg").is_err());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn round_trips_through_json() {
        let mut store = Store::new();
        let json = store.to_json().unwrap();
        store.hard_set_config(&json).unwrap();
        assert_eq!(store.pattern(), Some("custom"));
        assert_eq!(store.vpc_list(), &["management", "workload"]);
    }

    #[test]
    fn import_rejects_overlapping_cidrs_without_side_effects() {
        let mut store = Store::new();
        let mut config = store.config().clone();
        config.vpcs[1].subnets.zone_1[0].cidr = "10.10.10.0/24".to_string();
        let json = serde_json::to_string(&config).unwrap();

        let err = store.hard_set_config(&json).unwrap_err();
        assert!(matches!(err, StoreError::OverlappingCidr(_, _)));
        // store untouched
        assert_eq!(store.pattern(), None);
        assert_eq!(
            store.config().vpcs[1].subnets.zone_1[0].cidr,
            "10.40.10.0/24"
        );
    }

    #[test]
    fn import_rejects_malformed_json() {
        let mut store = Store::new();
        let err = store.hard_set_config("{\"wait_till\": 12}").unwrap_err();
        assert!(matches!(err, StoreError::InvalidImport(_)));
    }
}
