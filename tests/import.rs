// Copyright (c) 2025 - Cowboy AI, Inc.
//! Wholesale configuration import

use landing_zone_store::{Store, StoreError, SubnetTier};
use pretty_assertions::assert_eq;

#[test]
fn export_then_import_round_trips() {
    let mut store = Store::new();
    let exported = store.to_json().unwrap();

    let mut imported = Store::new();
    imported.hard_set_config(&exported).unwrap();

    assert_eq!(imported.pattern(), Some("custom"));
    assert_eq!(imported.config(), store.config());
    assert_eq!(
        imported.subnet_tiers("management"),
        &[
            SubnetTier::new("vsi", 3),
            SubnetTier::new("vpe", 3),
            SubnetTier::new("vpn", 1),
        ]
    );
    assert_eq!(
        imported.subnet_tiers("workload"),
        &[SubnetTier::new("vsi", 3), SubnetTier::new("vpe", 3)]
    );
}

#[test]
fn tier_order_recovers_from_cidr_bands_not_document_order() {
    let mut store = Store::new();
    let mut json: serde_json::Value =
        serde_json::from_str(&store.to_json().unwrap()).unwrap();
    // list the vpe subnet before vsi in zone 1; its band still places it second
    let zone_1 = json["vpcs"][1]["subnets"]["zone-1"]
        .as_array_mut()
        .unwrap();
    zone_1.reverse();
    store
        .hard_set_config(&serde_json::to_string(&json).unwrap())
        .unwrap();

    assert_eq!(
        store.subnet_tiers("workload"),
        &[SubnetTier::new("vsi", 3), SubnetTier::new("vpe", 3)]
    );
}

#[test]
fn dangling_references_heal_on_import() {
    let mut store = Store::new();
    let mut json: serde_json::Value =
        serde_json::from_str(&store.to_json().unwrap()).unwrap();
    json["clusters"][0]["vpc_name"] = "ghost".into();
    json["clusters"][0]["resource_group"] = "ghost-rg".into();
    json["vsi"][0]["boot_volume_encryption_key_name"] = "ghost-key".into();
    store
        .hard_set_config(&serde_json::to_string(&json).unwrap())
        .unwrap();

    let config = store.config();
    assert_eq!(config.clusters[0].vpc_name, None);
    assert!(config.clusters[0].subnet_names.is_empty());
    assert_eq!(config.clusters[0].resource_group, None);
    assert_eq!(config.vsi[0].boot_volume_encryption_key_name, None);
}

#[test]
fn overlapping_cidrs_reject_the_document() {
    let mut store = Store::new();
    let mut json: serde_json::Value =
        serde_json::from_str(&store.to_json().unwrap()).unwrap();
    json["vpcs"][1]["subnets"]["zone-2"][0]["cidr"] = "10.10.0.0/16".into();

    let err = store
        .hard_set_config(&serde_json::to_string(&json).unwrap())
        .unwrap_err();
    assert!(matches!(err, StoreError::OverlappingCidr(_, _)));
    assert_eq!(store.pattern(), None);
}

#[test]
fn malformed_documents_reject_without_side_effects() {
    let mut store = Store::new();
    let before = store.config().clone();

    assert!(matches!(
        store.hard_set_config("not json"),
        Err(StoreError::InvalidImport(_))
    ));
    // wrong type for a required field
    assert!(store
        .hard_set_config("{\"wait_till\": [], \"network_cidr\": \"10.0.0.0/8\"}")
        .is_err());

    assert_eq!(store.config(), &before);
    assert_eq!(store.pattern(), None);
}

#[test]
fn imported_tiers_drive_later_allocation() {
    let mut store = Store::new();
    let exported = store.to_json().unwrap();
    store.hard_set_config(&exported).unwrap();

    store
        .create_subnet_tier(
            "workload",
            landing_zone_store::store::vpc::SubnetTierParams {
                name: "bastion".to_string(),
                zones: 1,
                network_acl: Some("workload-acl".to_string()),
                add_public_gateway: false,
            },
        )
        .unwrap();
    // third tier on the second network: band 10.40.30.0/24
    let subnet = store.config().vpcs[1]
        .subnets
        .zone_1
        .iter()
        .find(|subnet| subnet.name == "bastion-zone-1")
        .unwrap();
    assert_eq!(subnet.cidr, "10.40.30.0/24");
}
