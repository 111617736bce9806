// Copyright (c) 2025 - Cowboy AI, Inc.
//! Configuration Wire Schema
//!
//! Typed model of the serialized landing-zone configuration. Every type here
//! round-trips through serde with the exact field names and nullability of
//! the wire format: nullable fields are `Option<T>` serialized as explicit
//! JSON null, never omitted, with the single exception of fields the wire
//! format itself only carries conditionally (`address_prefixes`, the ACL
//! `add_*` flags).

pub mod compute;
pub mod network;
pub mod services;
pub mod teleport;

use serde::{Deserialize, Serialize};

use crate::cursor::Keyed;

pub use compute::{
    Cluster, F5TemplateData, F5Vsi, KmsConfig, SecondaryInterfaceSg, SshKey, TeleportVsi, Vsi,
    VsiSecurityGroup, WorkerPool,
};
pub use network::{
    AclPortBlock, AclRule, Direction, IcmpBlock, NetworkAcl, PortBlock, RuleAction, SecurityGroup,
    SgRule, Subnet, Vpc,
};
pub use services::{
    AppId, Atracker, Bucket, CosKey, EncryptionKey, KeyManagement, KeyPolicies, ObjectStorage,
    RotationPolicy,
};
pub use teleport::{ClaimToRole, TeleportConfig};

/// Resource group into which entities are provisioned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceGroup {
    pub create: bool,
    pub name: String,
    pub use_prefix: bool,
}

impl Keyed for ResourceGroup {
    const KIND: &'static str = "resource group";

    fn key(&self) -> &str {
        &self.name
    }
}

/// VPN gateway deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGateway {
    pub connections: Vec<String>,
    pub name: String,
    pub resource_group: Option<String>,
    pub subnet_name: Option<String>,
    pub vpc_name: Option<String>,
}

impl Keyed for VpnGateway {
    const KIND: &'static str = "vpn gateway";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Root of the serialized configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub wait_till: String,
    pub network_cidr: String,
    pub resource_groups: Vec<ResourceGroup>,
    pub key_management: KeyManagement,
    pub cos: Vec<ObjectStorage>,
    pub vpcs: Vec<Vpc>,
    pub security_groups: Vec<SecurityGroup>,
    pub clusters: Vec<Cluster>,
    pub ssh_keys: Vec<SshKey>,
    pub vpn_gateways: Vec<VpnGateway>,
    pub enable_transit_gateway: bool,
    pub transit_gateway_connections: Vec<String>,
    pub transit_gateway_resource_group: Option<String>,
    pub atracker: Atracker,
    pub appid: AppId,
    pub teleport_config: TeleportConfig,
    pub teleport_vsi: Vec<TeleportVsi>,
    pub vsi: Vec<Vsi>,
    pub f5_vsi: Vec<F5Vsi>,
    pub f5_template_data: F5TemplateData,
}
