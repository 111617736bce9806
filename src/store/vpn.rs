// Copyright (c) 2025 - Cowboy AI, Inc.
//! VPN gateway mutations
//!
//! A gateway binds to one subnet in one network. Losing the network also
//! invalidates the subnet; losing just the subnet keeps the network
//! binding intact.

use crate::config::VpnGateway;
use crate::cursor;
use crate::errors::StoreResult;
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct VpnGatewayParams {
    pub name: String,
    pub resource_group: Option<String>,
    pub subnet_name: Option<String>,
    pub vpc_name: Option<String>,
}

impl Store {
    pub fn create_vpn_gateway(&mut self, params: VpnGatewayParams) {
        self.config.vpn_gateways.push(VpnGateway {
            connections: vec![],
            name: params.name,
            resource_group: params.resource_group,
            subnet_name: params.subnet_name,
            vpc_name: params.vpc_name,
        });
        self.update();
    }

    pub fn save_vpn_gateway(&mut self, name: &str, params: VpnGatewayParams) -> StoreResult<()> {
        let gateway = cursor::find_mut(&mut self.config.vpn_gateways, name)?;
        gateway.name = params.name;
        gateway.resource_group = params.resource_group;
        gateway.subnet_name = params.subnet_name;
        gateway.vpc_name = params.vpc_name;
        self.update();
        Ok(())
    }

    pub fn delete_vpn_gateway(&mut self, name: &str) -> StoreResult<()> {
        cursor::carve(&mut self.config.vpn_gateways, name)?;
        self.update();
        Ok(())
    }

    pub(crate) fn reconcile_vpn_gateways(&mut self) {
        for gateway in &mut self.config.vpn_gateways {
            cursor::heal_unfound(&self.vpc_list, &mut gateway.vpc_name, "vpc");
            match &gateway.vpc_name {
                Some(vpc) => {
                    let subnets = self.subnet_map.get(vpc).cloned().unwrap_or_default();
                    cursor::heal_unfound(&subnets, &mut gateway.subnet_name, "subnet");
                }
                None => gateway.subnet_name = None,
            }
            cursor::heal_unfound(
                &self.resource_group_list,
                &mut gateway.resource_group,
                "resource group",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn losing_the_network_clears_subnet_too() {
        let mut store = Store::new();
        store.delete_vpc("management").unwrap();
        let gateway = &store.config().vpn_gateways[0];
        assert_eq!(gateway.vpc_name, None);
        assert_eq!(gateway.subnet_name, None);
    }

    #[test]
    fn losing_just_the_subnet_keeps_the_network() {
        let mut store = Store::new();
        store.delete_subnet_tier("management", "vpn").unwrap();
        let gateway = &store.config().vpn_gateways[0];
        assert_eq!(gateway.vpc_name.as_deref(), Some("management"));
        assert_eq!(gateway.subnet_name, None);
    }

    #[test]
    fn create_starts_with_no_connections() {
        let mut store = Store::new();
        store.create_vpn_gateway(VpnGatewayParams {
            name: "workload-gateway".to_string(),
            resource_group: Some("workload-rg".to_string()),
            subnet_name: Some("vsi-zone-1".to_string()),
            vpc_name: Some("workload".to_string()),
        });
        let gateway = store.config().vpn_gateways.last().unwrap();
        assert!(gateway.connections.is_empty());
    }
}
