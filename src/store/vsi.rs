// Copyright (c) 2025 - Cowboy AI, Inc.
//! Virtual server deployment mutations
//!
//! Each deployment owns an embedded security group named `{name}-sg`;
//! bastion deployments seed theirs from the teleport template. The
//! embedded group and its rules are edited through the deployment, not
//! the top-level security group operations.

use crate::config::{TeleportVsi, Vsi, VsiSecurityGroup};
use crate::cursor;
use crate::errors::StoreResult;
use crate::store::rules::{apply_sg_rule, build_sg_rule, SgRuleParams};
use crate::store::{defaults, Store};

#[derive(Debug, Clone)]
pub struct VsiParams {
    pub name: String,
    pub vpc_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VsiSave {
    pub name: String,
    pub boot_volume_encryption_key_name: Option<String>,
    pub enable_floating_ip: bool,
    pub image_name: Option<String>,
    pub machine_type: Option<String>,
    pub resource_group: Option<String>,
    pub security_groups: Vec<String>,
    pub ssh_keys: Vec<String>,
    pub subnet_names: Vec<String>,
    pub user_data: Option<String>,
    pub vpc_name: Option<String>,
    pub vsi_per_subnet: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct TeleportVsiParams {
    pub name: String,
    pub vpc_name: Option<String>,
    pub subnet_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TeleportVsiSave {
    pub name: String,
    pub boot_volume_encryption_key_name: Option<String>,
    pub image_name: Option<String>,
    pub machine_type: Option<String>,
    pub resource_group: Option<String>,
    pub security_groups: Vec<String>,
    pub ssh_keys: Vec<String>,
    pub subnet_name: Option<String>,
    pub vpc_name: Option<String>,
}

impl Store {
    pub fn create_vsi(&mut self, params: VsiParams) {
        let group_name = format!("{}-sg", params.name);
        self.config.vsi.push(Vsi {
            boot_volume_encryption_key_name: None,
            enable_floating_ip: false,
            image_name: None,
            machine_type: None,
            name: params.name,
            resource_group: None,
            security_group: VsiSecurityGroup {
                name: group_name,
                rules: vec![],
            },
            security_groups: vec![],
            ssh_keys: vec![],
            subnet_names: vec![],
            user_data: None,
            vpc_name: params.vpc_name,
            vsi_per_subnet: Some(1),
        });
        self.update();
    }

    pub fn save_vsi(&mut self, name: &str, params: VsiSave) -> StoreResult<()> {
        let vsi = cursor::find_mut(&mut self.config.vsi, name)?;
        vsi.name = params.name;
        vsi.boot_volume_encryption_key_name = params.boot_volume_encryption_key_name;
        vsi.enable_floating_ip = params.enable_floating_ip;
        vsi.image_name = params.image_name;
        vsi.machine_type = params.machine_type;
        vsi.resource_group = params.resource_group;
        vsi.security_groups = params.security_groups;
        vsi.ssh_keys = params.ssh_keys;
        vsi.subnet_names = params.subnet_names;
        vsi.user_data = params.user_data;
        vsi.vpc_name = params.vpc_name;
        vsi.vsi_per_subnet = params.vsi_per_subnet;
        self.update();
        Ok(())
    }

    pub fn delete_vsi(&mut self, name: &str) -> StoreResult<()> {
        cursor::carve(&mut self.config.vsi, name)?;
        self.update();
        Ok(())
    }

    pub fn create_teleport_vsi(&mut self, params: TeleportVsiParams) {
        let mut security_group = defaults::teleport_sg();
        security_group.name = format!("{}-sg", params.name);
        self.config.teleport_vsi.push(TeleportVsi {
            boot_volume_encryption_key_name: None,
            image_name: None,
            machine_type: None,
            name: params.name,
            resource_group: None,
            security_group,
            security_groups: vec![],
            ssh_keys: vec![],
            subnet_name: params.subnet_name,
            vpc_name: params.vpc_name,
        });
        self.update();
    }

    pub fn save_teleport_vsi(&mut self, name: &str, params: TeleportVsiSave) -> StoreResult<()> {
        let vsi = cursor::find_mut(&mut self.config.teleport_vsi, name)?;
        vsi.name = params.name;
        vsi.boot_volume_encryption_key_name = params.boot_volume_encryption_key_name;
        vsi.image_name = params.image_name;
        vsi.machine_type = params.machine_type;
        vsi.resource_group = params.resource_group;
        vsi.security_groups = params.security_groups;
        vsi.ssh_keys = params.ssh_keys;
        vsi.subnet_name = params.subnet_name;
        vsi.vpc_name = params.vpc_name;
        self.update();
        Ok(())
    }

    pub fn delete_teleport_vsi(&mut self, name: &str) -> StoreResult<()> {
        cursor::carve(&mut self.config.teleport_vsi, name)?;
        self.update();
        Ok(())
    }

    pub fn save_vsi_security_group(
        &mut self,
        teleport: bool,
        vsi: &str,
        new_name: &str,
    ) -> StoreResult<()> {
        self.vsi_security_group_mut(teleport, vsi)?.name = new_name.to_string();
        self.update();
        Ok(())
    }

    pub fn create_vsi_security_group_rule(
        &mut self,
        teleport: bool,
        vsi: &str,
        params: SgRuleParams,
    ) -> StoreResult<()> {
        let group = self.vsi_security_group_mut(teleport, vsi)?;
        group.rules.push(build_sg_rule(&params));
        self.update();
        Ok(())
    }

    pub fn save_vsi_security_group_rule(
        &mut self,
        teleport: bool,
        vsi: &str,
        rule: &str,
        params: SgRuleParams,
    ) -> StoreResult<()> {
        let group = self.vsi_security_group_mut(teleport, vsi)?;
        let found = cursor::find_mut(&mut group.rules, rule)?;
        apply_sg_rule(found, &params);
        self.update();
        Ok(())
    }

    pub fn delete_vsi_security_group_rule(
        &mut self,
        teleport: bool,
        vsi: &str,
        rule: &str,
    ) -> StoreResult<()> {
        let group = self.vsi_security_group_mut(teleport, vsi)?;
        cursor::carve(&mut group.rules, rule)?;
        self.update();
        Ok(())
    }

    fn vsi_security_group_mut(
        &mut self,
        teleport: bool,
        vsi: &str,
    ) -> StoreResult<&mut VsiSecurityGroup> {
        if teleport {
            Ok(&mut cursor::find_mut(&mut self.config.teleport_vsi, vsi)?.security_group)
        } else {
            Ok(&mut cursor::find_mut(&mut self.config.vsi, vsi)?.security_group)
        }
    }

    pub(crate) fn reconcile_vsi(&mut self) {
        for vsi in &mut self.config.vsi {
            cursor::heal_unfound(
                &self.encryption_keys,
                &mut vsi.boot_volume_encryption_key_name,
                "encryption key",
            );
            cursor::heal_unfound(
                &self.resource_group_list,
                &mut vsi.resource_group,
                "resource group",
            );
            cursor::heal_unfound(&self.vpc_list, &mut vsi.vpc_name, "vpc");
            match &vsi.vpc_name {
                Some(vpc) => {
                    let subnets = self.subnet_map.get(vpc).cloned().unwrap_or_default();
                    cursor::retain_found(&subnets, &mut vsi.subnet_names);
                }
                None => vsi.subnet_names.clear(),
            }
            cursor::retain_found(&self.ssh_key_list, &mut vsi.ssh_keys);
        }
    }
}
