// Copyright (c) 2025 - Cowboy AI, Inc.
//! Edge network expansion and F5 deployment

use landing_zone_store::cidr::cidr_blocks_overlap;
use landing_zone_store::store::f5::F5VsiSave;
use landing_zone_store::{EdgePattern, Store, StoreError};
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case(
    EdgePattern::FullTunnel,
    &["f5-bastion", "f5-external", "f5-management", "vpe", "vpn-1", "vpn-2"];
    "full tunnel keeps vpn tiers"
)]
#[test_case(
    EdgePattern::Waf,
    &["f5-external", "f5-management", "f5-workload", "vpe"];
    "waf drops vpn tiers"
)]
#[test_case(
    EdgePattern::VpnAndWaf,
    &["f5-bastion", "f5-external", "f5-management", "f5-workload", "vpe", "vpn-1", "vpn-2"];
    "vpn and waf keeps everything"
)]
fn dedicated_edge_network_tiers(pattern: EdgePattern, expected: &[&str]) {
    let mut store = Store::new();
    store.create_edge_vpc(pattern, false).unwrap();

    let tiers: Vec<&str> = store
        .subnet_tiers("edge")
        .iter()
        .map(|tier| tier.name.as_str())
        .collect();
    assert_eq!(tiers, expected);
    assert!(store
        .subnet_tiers("edge")
        .iter()
        .all(|tier| tier.zones == 3));

    // one subnet per tier per zone
    let edge = &store.config().vpcs[0];
    let count: usize = edge.subnets.iter().map(|(_, subnets)| subnets.len()).sum();
    assert_eq!(count, expected.len() * 3);

    // edge blocks stay inside the reserved band and clear of primary blocks
    for (_, subnets) in edge.subnets.iter() {
        for subnet in subnets {
            let second: u8 = subnet.cidr.split('.').nth(1).unwrap().parse().unwrap();
            assert!((5..=7).contains(&second), "{} outside edge band", subnet.cidr);
            for vpc in &store.config().vpcs[1..] {
                for (_, primary) in vpc.subnets.iter() {
                    for other in primary {
                        assert!(!cidr_blocks_overlap(&subnet.cidr, &other.cidr));
                    }
                }
            }
        }
    }
}

#[test]
fn management_placement_reuses_the_first_network() {
    let mut store = Store::new();
    store.create_edge_vpc(EdgePattern::Waf, true).unwrap();

    assert_eq!(store.edge_vpc_prefix(), Some("management"));
    assert_eq!(store.vpc_list(), &["management", "workload"]);
    // no dedicated edge resource group is created
    assert!(!store
        .config()
        .resource_groups
        .iter()
        .any(|group| group.name == "edge-rg"));

    // management carries both its own prefixes and the edge band
    let prefixes = store.config().vpcs[0].address_prefixes.as_ref().unwrap();
    assert_eq!(
        prefixes.zone_1,
        vec!["10.5.0.0/16".to_string(), "10.10.10.0/16".to_string()]
    );
    // the untouched workload network still gets empty prefix lists
    let workload = store.config().vpcs[1].address_prefixes.as_ref().unwrap();
    assert!(workload.zone_1.is_empty());
}

#[test]
fn edge_network_is_singleton() {
    let mut store = Store::new();
    store.create_edge_vpc(EdgePattern::FullTunnel, true).unwrap();
    assert!(matches!(
        store.create_edge_vpc(EdgePattern::FullTunnel, true),
        Err(StoreError::EdgeNetworkExists(prefix)) if prefix == "management"
    ));
}

#[test]
fn f5_deployment_binds_to_edge_subnets_and_groups() {
    let mut store = Store::new();
    store.create_edge_vpc(EdgePattern::VpnAndWaf, false).unwrap();
    store.create_f5_vsi(false, 3).unwrap();

    let instances = &store.config().f5_vsi;
    assert_eq!(instances.len(), 3);
    for (index, instance) in instances.iter().enumerate() {
        let zone = index + 1;
        assert_eq!(instance.name, format!("f5-zone-{zone}"));
        assert_eq!(
            instance.primary_subnet_name.as_deref(),
            Some(format!("f5-management-zone-{zone}").as_str())
        );
        // every secondary subnet exists on the edge network
        for subnet in &instance.secondary_subnet_names {
            assert!(
                store.subnet_names("edge").contains(subnet),
                "missing subnet {subnet}"
            );
        }
        // every attached group was created by the expansion
        for attachment in &instance.secondary_subnet_security_group_names {
            assert!(store
                .config()
                .security_groups
                .iter()
                .any(|group| group.name == attachment.group_name));
            assert_eq!(
                attachment.interface_name,
                format!(
                    "slz-edge-{}-{zone}",
                    attachment.group_name.trim_end_matches("-sg")
                )
            );
        }
    }
}

#[test]
fn f5_rezone_and_instance_edits() {
    let mut store = Store::new();
    store.create_edge_vpc(EdgePattern::Waf, false).unwrap();
    store.create_f5_vsi(false, 1).unwrap();
    store
        .save_f5_vsi(F5VsiSave {
            zones: 3,
            ssh_keys: Some(vec!["slz-ssh-key".to_string()]),
            ..F5VsiSave::default()
        })
        .unwrap();
    assert_eq!(store.config().f5_vsi.len(), 3);

    // a deleted boot key heals on the next mutation's reconcile pass
    store.delete_encryption_key("slz-vsi-volume-key").unwrap();
    assert!(store.config().f5_vsi.iter().all(|instance| instance
        .boot_volume_encryption_key_name
        .is_none()));
}
