// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network entities: VPCs, subnets, ACLs and security groups

use serde::{Deserialize, Serialize};

use crate::cursor::Keyed;
use crate::zones::Zones;

/// Traffic direction for networking rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

/// Rule action, network ACLs only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Deny,
}

/// ICMP matcher block. Both fields null when the rule is not ICMP scoped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcmpBlock {
    #[serde(rename = "type")]
    pub type_: Option<u32>,
    pub code: Option<u32>,
}

/// TCP/UDP port matcher for security group rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortBlock {
    pub port_min: Option<u32>,
    pub port_max: Option<u32>,
}

/// TCP/UDP port matcher for ACL rules, which also match source ports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclPortBlock {
    pub port_min: Option<u32>,
    pub port_max: Option<u32>,
    pub source_port_min: Option<u32>,
    pub source_port_max: Option<u32>,
}

/// Network ACL rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AclRule {
    pub action: RuleAction,
    pub destination: String,
    pub direction: Direction,
    pub name: String,
    pub source: String,
    pub icmp: IcmpBlock,
    pub tcp: AclPortBlock,
    pub udp: AclPortBlock,
}

impl Keyed for AclRule {
    const KIND: &'static str = "network acl rule";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Security group rule. No action or destination; security groups are
/// stateful allow lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SgRule {
    pub direction: Direction,
    pub name: String,
    pub source: String,
    pub icmp: IcmpBlock,
    pub tcp: PortBlock,
    pub udp: PortBlock,
}

impl Keyed for SgRule {
    const KIND: &'static str = "security group rule";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Network ACL attached to a VPC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAcl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_ibm_cloud_internal_rules: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_vpc_connectivity_rules: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_cluster_rules: Option<bool>,
    pub name: String,
    pub rules: Vec<AclRule>,
}

impl Keyed for NetworkAcl {
    const KIND: &'static str = "network acl";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Subnet within a VPC zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subnet {
    pub acl_name: Option<String>,
    pub cidr: String,
    pub name: String,
    pub public_gateway: bool,
}

impl Keyed for Subnet {
    const KIND: &'static str = "subnet";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Virtual private cloud network. Keyed by `prefix` rather than `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vpc {
    pub classic_access: bool,
    pub default_network_acl_name: Option<String>,
    pub default_routing_table_name: Option<String>,
    pub default_security_group_name: Option<String>,
    pub default_security_group_rules: Vec<SgRule>,
    pub flow_logs_bucket_name: Option<String>,
    pub network_acls: Vec<NetworkAcl>,
    pub prefix: String,
    pub resource_group: Option<String>,
    pub subnets: Zones<Vec<Subnet>>,
    pub use_public_gateways: Zones<bool>,
    /// Only present once an edge network has been generated; terraform
    /// requires the field to compile to a list when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_prefixes: Option<Zones<Vec<String>>>,
}

impl Keyed for Vpc {
    const KIND: &'static str = "vpc";

    fn key(&self) -> &str {
        &self.prefix
    }
}

/// Security group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub name: String,
    pub resource_group: Option<String>,
    pub rules: Vec<SgRule>,
    pub vpc_name: Option<String>,
}

impl Keyed for SecurityGroup {
    const KIND: &'static str = "security group";

    fn key(&self) -> &str {
        &self.name
    }
}
