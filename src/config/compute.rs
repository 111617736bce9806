// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compute entities: clusters, virtual server instances and F5 firewalls

use serde::{Deserialize, Serialize};

use crate::config::network::SgRule;
use crate::cursor::Keyed;

/// Cluster encryption settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KmsConfig {
    pub crk_name: Option<String>,
    pub private_endpoint: bool,
}

/// Additional worker pool attached to a cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerPool {
    pub entitlement: Option<String>,
    pub flavor: String,
    pub name: String,
    pub subnet_names: Vec<String>,
    pub vpc_name: Option<String>,
    pub workers_per_subnet: u32,
}

impl Keyed for WorkerPool {
    const KIND: &'static str = "worker pool";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Managed cluster deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub cos_name: Option<String>,
    pub entitlement: Option<String>,
    pub kube_type: String,
    pub kube_version: String,
    pub operating_system: String,
    pub machine_type: String,
    pub name: String,
    pub resource_group: Option<String>,
    pub kms_config: KmsConfig,
    pub subnet_names: Vec<String>,
    pub vpc_name: Option<String>,
    pub worker_pools: Vec<WorkerPool>,
    pub workers_per_subnet: u32,
}

impl Keyed for Cluster {
    const KIND: &'static str = "cluster";

    fn key(&self) -> &str {
        &self.name
    }
}

/// SSH key uploaded for server access
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshKey {
    pub name: String,
    pub public_key: String,
    pub resource_group: Option<String>,
}

impl Keyed for SshKey {
    const KIND: &'static str = "ssh key";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Security group created alongside a server deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VsiSecurityGroup {
    pub name: String,
    pub rules: Vec<SgRule>,
}

/// Virtual server deployment, one or more instances per subnet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vsi {
    pub boot_volume_encryption_key_name: Option<String>,
    #[serde(default)]
    pub enable_floating_ip: bool,
    pub image_name: Option<String>,
    pub machine_type: Option<String>,
    pub name: String,
    pub resource_group: Option<String>,
    pub security_group: VsiSecurityGroup,
    pub security_groups: Vec<String>,
    pub ssh_keys: Vec<String>,
    pub subnet_names: Vec<String>,
    #[serde(default)]
    pub user_data: Option<String>,
    pub vpc_name: Option<String>,
    pub vsi_per_subnet: Option<u32>,
}

impl Keyed for Vsi {
    const KIND: &'static str = "vsi deployment";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Bastion server deployment. Unlike [Vsi], pinned to a single subnet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeleportVsi {
    pub boot_volume_encryption_key_name: Option<String>,
    pub image_name: Option<String>,
    pub machine_type: Option<String>,
    pub name: String,
    pub resource_group: Option<String>,
    pub security_group: VsiSecurityGroup,
    pub security_groups: Vec<String>,
    pub ssh_keys: Vec<String>,
    pub subnet_name: Option<String>,
    pub vpc_name: Option<String>,
}

impl Keyed for TeleportVsi {
    const KIND: &'static str = "teleport vsi";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Security group attachment for a secondary F5 interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryInterfaceSg {
    pub group_name: String,
    pub interface_name: String,
}

/// BIG-IP firewall instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct F5Vsi {
    pub boot_volume_encryption_key_name: Option<String>,
    pub domain: String,
    pub enable_external_floating_ip: bool,
    pub enable_management_floating_ip: bool,
    pub f5_image_name: String,
    pub hostname: String,
    pub machine_type: String,
    pub name: String,
    pub primary_subnet_name: Option<String>,
    pub resource_group: Option<String>,
    pub secondary_subnet_names: Vec<String>,
    pub secondary_subnet_security_group_names: Vec<SecondaryInterfaceSg>,
    pub security_groups: Vec<String>,
    pub ssh_keys: Vec<String>,
    pub vpc_name: Option<String>,
}

impl Keyed for F5Vsi {
    const KIND: &'static str = "f5 vsi";

    fn key(&self) -> &str {
        &self.name
    }
}

/// BIG-IP template licensing and declaration URLs. String fields default to
/// the literal `"null"` expected by the template, not JSON null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct F5TemplateData {
    pub license_type: String,
    pub byol_license_basekey: String,
    pub license_host: String,
    pub license_password: String,
    pub license_pool: String,
    pub license_sku_keyword_1: String,
    pub license_sku_keyword_2: String,
    pub license_username: String,
    pub license_unit_of_measure: String,
    pub template_source: String,
    pub template_version: String,
    pub app_id: String,
    pub phone_home_url: String,
    pub do_declaration_url: String,
    pub as3_declaration_url: String,
    pub ts_declaration_url: String,
    pub tgstandby_url: String,
    pub tgrefresh_url: String,
    pub tgactive_url: String,
    #[serde(default)]
    pub tmos_admin_password: Option<String>,
}

impl Default for F5TemplateData {
    fn default() -> Self {
        F5TemplateData {
            license_type: "none".to_string(),
            byol_license_basekey: "null".to_string(),
            license_host: "null".to_string(),
            license_password: "null".to_string(),
            license_pool: "null".to_string(),
            license_sku_keyword_1: "null".to_string(),
            license_sku_keyword_2: "null".to_string(),
            license_username: "null".to_string(),
            license_unit_of_measure: "hourly".to_string(),
            template_source: "f5devcentral/ibmcloud_schematics_bigip_multinic_declared"
                .to_string(),
            template_version: "20210201".to_string(),
            app_id: "null".to_string(),
            phone_home_url: "null".to_string(),
            do_declaration_url: "null".to_string(),
            as3_declaration_url: "null".to_string(),
            ts_declaration_url: "null".to_string(),
            tgstandby_url: "null".to_string(),
            tgrefresh_url: "null".to_string(),
            tgactive_url: "null".to_string(),
            tmos_admin_password: None,
        }
    }
}
