// Copyright (c) 2025 - Cowboy AI, Inc.
//! F5 BIG-IP firewall mutations
//!
//! Firewall instances are generated per zone from the edge pattern: one
//! primary interface on the `f5-management` tier and one secondary
//! interface per remaining firewall tier. Creating or re-zoning the
//! deployment regenerates every instance; per-instance edits are limited
//! to the fields that survive regeneration.

use crate::config::{F5TemplateData, F5Vsi, SecondaryInterfaceSg, SshKey};
use crate::cursor;
use crate::errors::{StoreError, StoreResult};
use crate::store::{defaults, EdgePattern, Store};

const DEFAULT_F5_IMAGE: &str = "f5-bigip-16-1-2-2-0-0-28-all-1slot";

/// Overrides applied to every generated instance
#[derive(Debug, Clone, Default)]
pub struct F5VsiSave {
    pub zones: u8,
    pub f5_image_name: Option<String>,
    pub machine_type: Option<String>,
    pub resource_group: Option<String>,
    pub ssh_keys: Option<Vec<String>>,
}

/// Per-instance fields that survive regeneration
#[derive(Debug, Clone)]
pub struct F5InstanceSave {
    pub resource_group: Option<String>,
    pub boot_volume_encryption_key_name: Option<String>,
}

fn new_f5_vsi(
    prefix: &str,
    pattern: EdgePattern,
    zone: u8,
    use_management: bool,
    params: &F5VsiSave,
) -> F5Vsi {
    let vpc = if use_management { "management" } else { "edge" };
    let mut secondary_subnet_names = Vec::new();
    let mut secondary_subnet_security_group_names = Vec::new();
    for tier in pattern.firewall_tiers() {
        if *tier == "f5-management" {
            continue;
        }
        secondary_subnet_names.push(format!("{tier}-zone-{zone}"));
        secondary_subnet_security_group_names.push(SecondaryInterfaceSg {
            group_name: format!("{tier}-sg"),
            interface_name: format!("{prefix}-{vpc}-{tier}-{zone}"),
        });
    }
    F5Vsi {
        boot_volume_encryption_key_name: Some("slz-vsi-volume-key".to_string()),
        domain: "local".to_string(),
        enable_external_floating_ip: true,
        enable_management_floating_ip: false,
        f5_image_name: params
            .f5_image_name
            .clone()
            .unwrap_or_else(|| DEFAULT_F5_IMAGE.to_string()),
        hostname: "f5-ve-01".to_string(),
        machine_type: params
            .machine_type
            .clone()
            .unwrap_or_else(|| "cx2-4x8".to_string()),
        name: format!("f5-zone-{zone}"),
        primary_subnet_name: Some(format!("f5-management-zone-{zone}")),
        resource_group: params
            .resource_group
            .clone()
            .or_else(|| Some(format!("{vpc}-rg"))),
        secondary_subnet_names,
        secondary_subnet_security_group_names,
        security_groups: vec!["f5-management-sg".to_string()],
        ssh_keys: params
            .ssh_keys
            .clone()
            .unwrap_or_else(|| vec!["slz-ssh-key".to_string()]),
        vpc_name: Some(vpc.to_string()),
    }
}

impl Store {
    fn edge_pattern_required(&self) -> StoreResult<EdgePattern> {
        self.edge_pattern
            .ok_or_else(|| StoreError::not_found("edge network", "edge"))
    }

    /// Generate one firewall instance per zone. Requires an edge network.
    ///
    /// The boot volume key and an ssh key are prerequisites of every
    /// instance, so both are created here if missing.
    pub fn create_f5_vsi(&mut self, use_management: bool, zones: u8) -> StoreResult<()> {
        let pattern = self.edge_pattern_required()?;
        self.f5_on_management = use_management;
        if !cursor::contains_key(&self.config.key_management.keys, "slz-vsi-volume-key") {
            self.config
                .key_management
                .keys
                .push(defaults::root_key("slz-vsi-volume-key"));
        }
        if self.config.ssh_keys.is_empty() {
            self.config.ssh_keys.push(SshKey {
                name: "slz-ssh-key".to_string(),
                public_key: "<user-determined-value>".to_string(),
                resource_group: None,
            });
        }
        let prefix = self.prefix.clone();
        self.config.f5_vsi = (1..=zones)
            .map(|zone| new_f5_vsi(&prefix, pattern, zone, use_management, &F5VsiSave::default()))
            .collect();
        self.update();
        Ok(())
    }

    /// Regenerate the deployment with new zone count and overrides
    pub fn save_f5_vsi(&mut self, params: F5VsiSave) -> StoreResult<()> {
        let pattern = self.edge_pattern_required()?;
        let use_management = self.f5_on_management;
        let prefix = self.prefix.clone();
        self.config.f5_vsi = (1..=params.zones)
            .map(|zone| new_f5_vsi(&prefix, pattern, zone, use_management, &params))
            .collect();
        self.update();
        Ok(())
    }

    pub fn save_f5_instance(&mut self, name: &str, params: F5InstanceSave) -> StoreResult<()> {
        let instance = cursor::find_mut(&mut self.config.f5_vsi, name)?;
        instance.resource_group = params.resource_group;
        instance.boot_volume_encryption_key_name = params.boot_volume_encryption_key_name;
        self.update();
        Ok(())
    }

    /// Template fields are strings with the literal `"null"` as the empty
    /// value; blank input normalizes to it. The admin password is the one
    /// genuinely nullable field.
    pub fn save_f5_template(&mut self, mut template: F5TemplateData) {
        for field in [
            &mut template.license_type,
            &mut template.byol_license_basekey,
            &mut template.license_host,
            &mut template.license_password,
            &mut template.license_pool,
            &mut template.license_sku_keyword_1,
            &mut template.license_sku_keyword_2,
            &mut template.license_username,
            &mut template.license_unit_of_measure,
            &mut template.template_source,
            &mut template.template_version,
            &mut template.app_id,
            &mut template.phone_home_url,
            &mut template.do_declaration_url,
            &mut template.as3_declaration_url,
            &mut template.ts_declaration_url,
            &mut template.tgstandby_url,
            &mut template.tgrefresh_url,
            &mut template.tgactive_url,
        ] {
            if field.is_empty() {
                *field = "null".to_string();
            }
        }
        if template.tmos_admin_password.as_deref() == Some("") {
            template.tmos_admin_password = None;
        }
        self.config.f5_template_data = template;
        self.update();
    }

    pub(crate) fn reconcile_f5(&mut self) {
        // runs before the ssh key pass, so resolve key names directly
        let ssh_keys = cursor::names(&self.config.ssh_keys);
        for instance in &mut self.config.f5_vsi {
            cursor::heal_unfound(
                &self.encryption_keys,
                &mut instance.boot_volume_encryption_key_name,
                "encryption key",
            );
            cursor::heal_unfound(
                &self.resource_group_list,
                &mut instance.resource_group,
                "resource group",
            );
            cursor::heal_unfound(&self.vpc_list, &mut instance.vpc_name, "vpc");
            cursor::retain_found(&ssh_keys, &mut instance.ssh_keys);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_requires_an_edge_network() {
        let mut store = Store::new();
        assert!(store.create_f5_vsi(false, 3).is_err());
    }

    #[test]
    fn instances_generate_per_zone_with_secondary_interfaces() {
        let mut store = Store::new();
        store.create_edge_vpc(EdgePattern::VpnAndWaf, false).unwrap();
        store.create_f5_vsi(false, 2).unwrap();

        let instances = &store.config().f5_vsi;
        assert_eq!(instances.len(), 2);
        let first = &instances[0];
        assert_eq!(first.name, "f5-zone-1");
        assert_eq!(first.primary_subnet_name.as_deref(), Some("f5-management-zone-1"));
        assert_eq!(
            first.secondary_subnet_names,
            vec!["f5-bastion-zone-1", "f5-external-zone-1", "f5-workload-zone-1"]
        );
        assert_eq!(
            first.secondary_subnet_security_group_names[0].group_name,
            "f5-bastion-sg"
        );
        assert_eq!(first.resource_group.as_deref(), Some("edge-rg"));
        assert_eq!(first.f5_image_name, DEFAULT_F5_IMAGE);
        assert_eq!(instances[1].name, "f5-zone-2");
    }

    #[test]
    fn create_provisions_missing_prerequisites() {
        let mut store = Store::new();
        store.create_edge_vpc(EdgePattern::Waf, false).unwrap();
        store.delete_encryption_key("slz-vsi-volume-key").unwrap();
        store.delete_ssh_key("slz-ssh-key").unwrap();

        store.create_f5_vsi(false, 1).unwrap();
        assert!(store
            .encryption_keys()
            .contains(&"slz-vsi-volume-key".to_string()));
        assert_eq!(store.config().ssh_keys[0].name, "slz-ssh-key");
        assert_eq!(
            store.config().f5_vsi[0].ssh_keys,
            vec!["slz-ssh-key".to_string()]
        );
    }

    #[test]
    fn save_rezones_with_overrides() {
        let mut store = Store::new();
        store.create_edge_vpc(EdgePattern::FullTunnel, true).unwrap();
        store.create_f5_vsi(true, 3).unwrap();
        store
            .save_f5_vsi(F5VsiSave {
                zones: 1,
                machine_type: Some("cx2-8x16".to_string()),
                ..F5VsiSave::default()
            })
            .unwrap();

        let instances = &store.config().f5_vsi;
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].machine_type, "cx2-8x16");
        assert_eq!(instances[0].vpc_name.as_deref(), Some("management"));
        assert_eq!(instances[0].resource_group.as_deref(), Some("management-rg"));
    }

    #[test]
    fn template_save_normalizes_blank_fields() {
        let mut store = Store::new();
        let mut template = F5TemplateData::default();
        template.license_host = String::new();
        template.app_id = String::new();
        template.tmos_admin_password = Some(String::new());
        store.save_f5_template(template);

        let saved = &store.config().f5_template_data;
        assert_eq!(saved.license_host, "null");
        assert_eq!(saved.app_id, "null");
        assert_eq!(saved.tmos_admin_password, None);
    }
}
