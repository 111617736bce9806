// Copyright (c) 2025 - Cowboy AI, Inc.
//! Transit gateway mutations
//!
//! The gateway is singleton state on the root document: an enable flag,
//! a resource group, and the list of connected networks. Connections
//! naming a deleted network are dropped on reconcile.

use crate::cursor;
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct TransitGatewaySave {
    pub enable_transit_gateway: bool,
    pub transit_gateway_resource_group: Option<String>,
    pub transit_gateway_connections: Vec<String>,
}

impl Store {
    pub fn save_transit_gateway(&mut self, params: TransitGatewaySave) {
        self.config.enable_transit_gateway = params.enable_transit_gateway;
        self.config.transit_gateway_resource_group = params.transit_gateway_resource_group;
        self.config.transit_gateway_connections = params.transit_gateway_connections;
        self.update();
    }

    pub(crate) fn reconcile_transit_gateway(&mut self) {
        cursor::retain_found(&self.vpc_list, &mut self.config.transit_gateway_connections);
        cursor::heal_unfound(
            &self.resource_group_list,
            &mut self.config.transit_gateway_resource_group,
            "resource group",
        );
    }
}
