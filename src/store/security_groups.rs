// Copyright (c) 2025 - Cowboy AI, Inc.
//! Security group mutations

use crate::config::SecurityGroup;
use crate::cursor;
use crate::errors::StoreResult;
use crate::store::rules::{apply_sg_rule, build_sg_rule, SgRuleParams};
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct SecurityGroupParams {
    pub name: String,
    pub resource_group: Option<String>,
    pub vpc_name: Option<String>,
}

impl Store {
    pub fn create_security_group(&mut self, params: SecurityGroupParams) {
        self.config.security_groups.push(SecurityGroup {
            name: params.name,
            resource_group: params.resource_group,
            rules: vec![],
            vpc_name: params.vpc_name,
        });
        self.update();
    }

    pub fn save_security_group(
        &mut self,
        name: &str,
        params: SecurityGroupParams,
    ) -> StoreResult<()> {
        let group = cursor::find_mut(&mut self.config.security_groups, name)?;
        group.name = params.name;
        group.resource_group = params.resource_group;
        group.vpc_name = params.vpc_name;
        self.update();
        Ok(())
    }

    pub fn delete_security_group(&mut self, name: &str) -> StoreResult<()> {
        cursor::carve(&mut self.config.security_groups, name)?;
        self.update();
        Ok(())
    }

    pub fn create_security_group_rule(
        &mut self,
        group: &str,
        params: SgRuleParams,
    ) -> StoreResult<()> {
        let group = cursor::find_mut(&mut self.config.security_groups, group)?;
        group.rules.push(build_sg_rule(&params));
        self.update();
        Ok(())
    }

    pub fn save_security_group_rule(
        &mut self,
        group: &str,
        rule: &str,
        params: SgRuleParams,
    ) -> StoreResult<()> {
        let group = cursor::find_mut(&mut self.config.security_groups, group)?;
        let found = cursor::find_mut(&mut group.rules, rule)?;
        apply_sg_rule(found, &params);
        self.update();
        Ok(())
    }

    pub fn delete_security_group_rule(&mut self, group: &str, rule: &str) -> StoreResult<()> {
        let group = cursor::find_mut(&mut self.config.security_groups, group)?;
        cursor::carve(&mut group.rules, rule)?;
        self.update();
        Ok(())
    }

    pub(crate) fn reconcile_security_groups(&mut self) {
        self.security_group_map.clear();
        for group in &mut self.config.security_groups {
            cursor::heal_unfound(&self.vpc_list, &mut group.vpc_name, "vpc");
            cursor::heal_unfound(
                &self.resource_group_list,
                &mut group.resource_group,
                "resource group",
            );
            if let Some(vpc) = &group.vpc_name {
                self.security_group_map
                    .entry(vpc.clone())
                    .or_default()
                    .push(group.name.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::rules::{PortRange, RuleProtocol};
    use crate::config::Direction;
    use pretty_assertions::assert_eq;

    #[test]
    fn groups_index_by_network() {
        let store = Store::new();
        assert_eq!(
            store.security_group_map.get("management").unwrap(),
            &vec!["management-vpe-sg".to_string()]
        );
    }

    #[test]
    fn deleting_a_network_heals_group_binding() {
        let mut store = Store::new();
        store.delete_vpc("workload").unwrap();
        let group = cursor::find(&store.config().security_groups, "workload-vpe-sg").unwrap();
        assert_eq!(group.vpc_name, None);
        assert!(store.security_group_map.get("workload").is_none());
    }

    #[test]
    fn rule_lifecycle_within_a_group() {
        let mut store = Store::new();
        store
            .create_security_group_rule(
                "management-vpe-sg",
                SgRuleParams {
                    name: "allow-ssh".to_string(),
                    direction: Direction::Inbound,
                    source: "10.0.0.0/8".to_string(),
                    protocol: RuleProtocol::Tcp(PortRange {
                        port_min: Some(22),
                        port_max: Some(22),
                        ..PortRange::default()
                    }),
                },
            )
            .unwrap();
        let group = cursor::find(&store.config().security_groups, "management-vpe-sg").unwrap();
        assert_eq!(group.rules.last().unwrap().tcp.port_min, Some(22));

        store
            .delete_security_group_rule("management-vpe-sg", "allow-ssh")
            .unwrap();
        assert!(store
            .delete_security_group_rule("management-vpe-sg", "allow-ssh")
            .is_err());
    }
}
