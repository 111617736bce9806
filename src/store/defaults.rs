// Copyright (c) 2025 - Cowboy AI, Inc.
//! Default entity builders for the landing-zone patterns

use crate::config::{
    AclPortBlock, AclRule, Bucket, Cluster, CosKey, Direction, EncryptionKey, IcmpBlock,
    KeyManagement, KeyPolicies, KmsConfig, NetworkAcl, ObjectStorage, PortBlock, RuleAction,
    SecurityGroup, SgRule, SshKey, Subnet, Vpc, VpnGateway, Vsi, VsiSecurityGroup, WorkerPool,
};
use crate::zones::Zones;

pub(crate) fn sg_rule(
    direction: Direction,
    name: &str,
    source: &str,
    tcp_port: Option<u32>,
) -> SgRule {
    SgRule {
        direction,
        name: name.to_string(),
        source: source.to_string(),
        icmp: IcmpBlock::default(),
        tcp: PortBlock {
            port_min: tcp_port,
            port_max: tcp_port,
        },
        udp: PortBlock::default(),
    }
}

fn acl_allow_rule(direction: Direction, name: &str, source: &str, destination: &str) -> AclRule {
    AclRule {
        action: RuleAction::Allow,
        destination: destination.to_string(),
        direction,
        name: name.to_string(),
        source: source.to_string(),
        icmp: IcmpBlock::default(),
        tcp: AclPortBlock::default(),
        udp: AclPortBlock::default(),
    }
}

/// The standard allow-list shared by the default security groups: IBM
/// service traffic in, VPC traffic both ways, DNS/HTTP/HTTPS egress
pub(crate) fn standard_sg_rules() -> Vec<SgRule> {
    vec![
        sg_rule(Direction::Inbound, "allow-ibm-inbound", "161.26.0.0/16", None),
        sg_rule(Direction::Inbound, "allow-vpc-inbound", "10.0.0.0/8", None),
        sg_rule(Direction::Outbound, "allow-vpc-outbound", "10.0.0.0/8", None),
        sg_rule(
            Direction::Outbound,
            "allow-ibm-tcp-53-outbound",
            "161.26.0.0/16",
            Some(53),
        ),
        sg_rule(
            Direction::Outbound,
            "allow-ibm-tcp-80-outbound",
            "161.26.0.0/16",
            Some(80),
        ),
        sg_rule(
            Direction::Outbound,
            "allow-ibm-tcp-443-outbound",
            "161.26.0.0/16",
            Some(443),
        ),
    ]
}

fn standard_acl_rules() -> Vec<AclRule> {
    vec![
        acl_allow_rule(
            Direction::Inbound,
            "allow-ibm-inbound",
            "161.26.0.0/16",
            "10.0.0.0/8",
        ),
        acl_allow_rule(
            Direction::Inbound,
            "allow-all-network-inbound",
            "10.0.0.0/8",
            "10.0.0.0/8",
        ),
        acl_allow_rule(
            Direction::Outbound,
            "allow-all-outbound",
            "0.0.0.0/0",
            "0.0.0.0/0",
        ),
    ]
}

pub(crate) fn root_key(name: &str) -> EncryptionKey {
    EncryptionKey {
        key_ring: Some("slz-slz-ring".to_string()),
        name: name.to_string(),
        root_key: true,
        payload: None,
        force_delete: None,
        endpoint: None,
        iv_value: None,
        encrypted_nonce: None,
        policies: KeyPolicies::default(),
    }
}

pub(crate) fn default_key_management() -> KeyManagement {
    KeyManagement {
        keys: vec![root_key("slz-atracker-key"), root_key("slz-slz-key")],
        name: "slz-slz-kms".to_string(),
        resource_group: Some("service-rg".to_string()),
        use_hs_crypto: false,
        use_data: false,
    }
}

pub(crate) fn default_object_storage() -> Vec<ObjectStorage> {
    vec![
        ObjectStorage {
            buckets: vec![Bucket {
                endpoint_type: "public".to_string(),
                force_delete: true,
                kms_key: Some("slz-atracker-key".to_string()),
                name: "atracker-bucket".to_string(),
                storage_class: "standard".to_string(),
            }],
            keys: vec![CosKey {
                name: "cos-bind-key".to_string(),
                role: "Writer".to_string(),
                enable_hmac: false,
            }],
            name: "atracker-cos".to_string(),
            plan: "standard".to_string(),
            resource_group: Some("service-rg".to_string()),
            use_data: false,
            random_suffix: true,
        },
        ObjectStorage {
            buckets: vec![
                Bucket {
                    endpoint_type: "public".to_string(),
                    force_delete: true,
                    kms_key: Some("slz-slz-key".to_string()),
                    name: "management-bucket".to_string(),
                    storage_class: "standard".to_string(),
                },
                Bucket {
                    endpoint_type: "public".to_string(),
                    force_delete: true,
                    kms_key: Some("slz-slz-key".to_string()),
                    name: "workload-bucket".to_string(),
                    storage_class: "standard".to_string(),
                },
            ],
            keys: vec![],
            name: "cos".to_string(),
            plan: "standard".to_string(),
            resource_group: Some("service-rg".to_string()),
            use_data: false,
            random_suffix: true,
        },
    ]
}

fn subnet(name: &str, cidr: &str, acl: &str) -> Subnet {
    Subnet {
        acl_name: Some(acl.to_string()),
        cidr: cidr.to_string(),
        name: name.to_string(),
        public_gateway: false,
    }
}

pub(crate) fn default_vpcs() -> Vec<Vpc> {
    vec![
        Vpc {
            classic_access: false,
            default_network_acl_name: None,
            default_routing_table_name: None,
            default_security_group_name: None,
            default_security_group_rules: vec![],
            flow_logs_bucket_name: Some("management-bucket".to_string()),
            network_acls: vec![NetworkAcl {
                add_ibm_cloud_internal_rules: Some(true),
                add_vpc_connectivity_rules: Some(true),
                add_cluster_rules: None,
                name: "management-acl".to_string(),
                rules: standard_acl_rules(),
            }],
            prefix: "management".to_string(),
            resource_group: Some("management-rg".to_string()),
            subnets: Zones {
                zone_1: vec![
                    subnet("vsi-zone-1", "10.10.10.0/24", "management-acl"),
                    subnet("vpe-zone-1", "10.10.20.0/24", "management-acl"),
                    subnet("vpn-zone-1", "10.10.30.0/24", "management-acl"),
                ],
                zone_2: vec![
                    subnet("vsi-zone-2", "10.20.10.0/24", "management-acl"),
                    subnet("vpe-zone-2", "10.20.20.0/24", "management-acl"),
                ],
                zone_3: vec![
                    subnet("vsi-zone-3", "10.30.10.0/24", "management-acl"),
                    subnet("vpe-zone-3", "10.30.20.0/24", "management-acl"),
                ],
            },
            use_public_gateways: Zones::splat(false),
            address_prefixes: None,
        },
        Vpc {
            classic_access: false,
            default_network_acl_name: None,
            default_routing_table_name: None,
            default_security_group_name: None,
            default_security_group_rules: vec![],
            flow_logs_bucket_name: Some("workload-bucket".to_string()),
            network_acls: vec![NetworkAcl {
                add_ibm_cloud_internal_rules: Some(true),
                add_vpc_connectivity_rules: Some(true),
                add_cluster_rules: None,
                name: "workload-acl".to_string(),
                rules: standard_acl_rules(),
            }],
            prefix: "workload".to_string(),
            resource_group: Some("workload-rg".to_string()),
            subnets: Zones {
                zone_1: vec![
                    subnet("vsi-zone-1", "10.40.10.0/24", "workload-acl"),
                    subnet("vpe-zone-1", "10.40.20.0/24", "workload-acl"),
                ],
                zone_2: vec![
                    subnet("vsi-zone-2", "10.50.10.0/24", "workload-acl"),
                    subnet("vpe-zone-2", "10.50.20.0/24", "workload-acl"),
                ],
                zone_3: vec![
                    subnet("vsi-zone-3", "10.60.10.0/24", "workload-acl"),
                    subnet("vpe-zone-3", "10.60.20.0/24", "workload-acl"),
                ],
            },
            use_public_gateways: Zones::splat(false),
            address_prefixes: None,
        },
    ]
}

/// Empty network used as the base for user-created VPCs
pub(crate) fn empty_vpc(prefix: &str) -> Vpc {
    Vpc {
        classic_access: false,
        default_network_acl_name: None,
        default_routing_table_name: None,
        default_security_group_name: None,
        default_security_group_rules: vec![],
        flow_logs_bucket_name: None,
        network_acls: vec![],
        prefix: prefix.to_string(),
        resource_group: None,
        subnets: Zones::default(),
        use_public_gateways: Zones::splat(false),
        address_prefixes: None,
    }
}

fn default_cluster(name: &str, vpc: &str, resource_group: &str) -> Cluster {
    Cluster {
        cos_name: Some("cos".to_string()),
        entitlement: Some("cloud_pak".to_string()),
        kube_type: "openshift".to_string(),
        kube_version: "default".to_string(),
        operating_system: "REDHAT_8_64".to_string(),
        machine_type: "bx2.16x64".to_string(),
        name: name.to_string(),
        resource_group: Some(resource_group.to_string()),
        kms_config: KmsConfig {
            crk_name: Some("slz-roks-key".to_string()),
            private_endpoint: true,
        },
        subnet_names: vec![
            "vsi-zone-1".to_string(),
            "vsi-zone-2".to_string(),
            "vsi-zone-3".to_string(),
        ],
        vpc_name: Some(vpc.to_string()),
        worker_pools: vec![WorkerPool {
            entitlement: Some("cloud_pak".to_string()),
            flavor: "bx2.16x64".to_string(),
            name: "logging-worker-pool".to_string(),
            subnet_names: vec![
                "vsi-zone-1".to_string(),
                "vsi-zone-2".to_string(),
                "vsi-zone-3".to_string(),
            ],
            vpc_name: Some(vpc.to_string()),
            workers_per_subnet: 2,
        }],
        workers_per_subnet: 2,
    }
}

pub(crate) fn default_management_cluster() -> Cluster {
    default_cluster("management-cluster", "management", "management-rg")
}

pub(crate) fn default_workload_cluster() -> Cluster {
    default_cluster("workload-cluster", "workload", "workload-rg")
}

fn default_server(name: &str, vpc: &str, resource_group: &str) -> Vsi {
    Vsi {
        boot_volume_encryption_key_name: Some("slz-vsi-volume-key".to_string()),
        enable_floating_ip: false,
        image_name: Some("ibm-ubuntu-18-04-6-minimal-amd64-2".to_string()),
        machine_type: Some("cx2-4x8".to_string()),
        name: name.to_string(),
        resource_group: Some(resource_group.to_string()),
        security_group: VsiSecurityGroup {
            name: vpc.to_string(),
            rules: standard_sg_rules(),
        },
        security_groups: vec![],
        ssh_keys: vec!["slz-ssh-key".to_string()],
        subnet_names: vec![
            "vsi-zone-1".to_string(),
            "vsi-zone-2".to_string(),
            "vsi-zone-3".to_string(),
        ],
        user_data: None,
        vpc_name: Some(vpc.to_string()),
        vsi_per_subnet: Some(1),
    }
}

pub(crate) fn default_management_server() -> Vsi {
    default_server("management-server", "management", "management-rg")
}

pub(crate) fn default_workload_server() -> Vsi {
    default_server("workload-server", "workload", "workload-rg")
}

pub(crate) fn default_security_groups() -> Vec<SecurityGroup> {
    vec![
        SecurityGroup {
            name: "management-vpe-sg".to_string(),
            resource_group: Some("management-rg".to_string()),
            rules: standard_sg_rules(),
            vpc_name: Some("management".to_string()),
        },
        SecurityGroup {
            name: "workload-vpe-sg".to_string(),
            resource_group: Some("workload-rg".to_string()),
            rules: standard_sg_rules(),
            vpc_name: Some("workload".to_string()),
        },
    ]
}

pub(crate) fn default_ssh_keys() -> Vec<SshKey> {
    vec![SshKey {
        name: "slz-ssh-key".to_string(),
        public_key: "<REPLACE_WITH_VALID_PUBLIC_KEY>".to_string(),
        resource_group: Some("management-rg".to_string()),
    }]
}

pub(crate) fn default_vpn_gateways() -> Vec<VpnGateway> {
    vec![VpnGateway {
        connections: vec![],
        name: "management-gateway".to_string(),
        resource_group: Some("management-rg".to_string()),
        subnet_name: Some("vpn-zone-1".to_string()),
        vpc_name: Some("management".to_string()),
    }]
}

pub(crate) fn default_edge_acl() -> NetworkAcl {
    NetworkAcl {
        add_ibm_cloud_internal_rules: Some(false),
        add_vpc_connectivity_rules: Some(false),
        add_cluster_rules: None,
        name: "edge-acl".to_string(),
        rules: standard_acl_rules(),
    }
}

pub(crate) fn f5_external_acl() -> NetworkAcl {
    let mut rules = standard_acl_rules();
    rules.push(AclRule {
        action: RuleAction::Allow,
        destination: "10.0.0.0/8".to_string(),
        direction: Direction::Inbound,
        name: "allow-f5-external-443-inbound".to_string(),
        source: "0.0.0.0/0".to_string(),
        icmp: IcmpBlock::default(),
        tcp: AclPortBlock {
            port_min: Some(443),
            port_max: Some(443),
            source_port_min: None,
            source_port_max: None,
        },
        udp: AclPortBlock::default(),
    });
    NetworkAcl {
        add_ibm_cloud_internal_rules: Some(false),
        add_vpc_connectivity_rules: Some(false),
        add_cluster_rules: None,
        name: "f5-external-acl".to_string(),
        rules,
    }
}

pub(crate) fn f5_management_sg() -> SecurityGroup {
    SecurityGroup {
        name: "f5-management-sg".to_string(),
        resource_group: Some("edge-rg".to_string()),
        rules: standard_sg_rules(),
        vpc_name: Some("edge".to_string()),
    }
}

pub(crate) fn f5_external_sg() -> SecurityGroup {
    SecurityGroup {
        name: "f5-external-sg".to_string(),
        resource_group: Some("edge-rg".to_string()),
        rules: vec![sg_rule(
            Direction::Inbound,
            "allow-inbound-443",
            "0.0.0.0/0",
            Some(443),
        )],
        vpc_name: Some("edge".to_string()),
    }
}

pub(crate) fn f5_workload_sg() -> SecurityGroup {
    let mut rules: Vec<SgRule> = [
        "10.10.10.0/24",
        "10.20.10.0/24",
        "10.30.10.0/24",
        "10.40.10.0/24",
        "10.50.10.0/24",
        "10.60.10.0/24",
    ]
    .iter()
    .enumerate()
    .map(|(index, source)| {
        sg_rule(
            Direction::Inbound,
            &format!("allow-workload-subnet-{}", index + 1),
            source,
            Some(443),
        )
    })
    .collect();
    rules.extend(standard_sg_rules());
    SecurityGroup {
        name: "f5-workload-sg".to_string(),
        resource_group: Some("edge-rg".to_string()),
        rules,
        vpc_name: Some("edge".to_string()),
    }
}

pub(crate) fn f5_bastion_sg() -> SecurityGroup {
    let mut rules = Vec::new();
    for (zone, source) in ["10.5.80.0/24", "10.6.80.0/24", "10.7.80.0/24"]
        .iter()
        .enumerate()
    {
        rules.push(SgRule {
            direction: Direction::Inbound,
            name: format!("{}-inbound-3023", zone + 1),
            source: source.to_string(),
            icmp: IcmpBlock::default(),
            tcp: PortBlock {
                port_min: Some(3023),
                port_max: Some(3025),
            },
            udp: PortBlock::default(),
        });
        rules.push(sg_rule(
            Direction::Inbound,
            &format!("{}-inbound-3080", zone + 1),
            source,
            Some(3080),
        ));
    }
    SecurityGroup {
        name: "f5-bastion-sg".to_string(),
        resource_group: Some("edge-rg".to_string()),
        rules,
        vpc_name: Some("edge".to_string()),
    }
}

pub(crate) fn f5_vpe_sg() -> SecurityGroup {
    SecurityGroup {
        name: "edge-vpe-sg".to_string(),
        resource_group: Some("edge-rg".to_string()),
        rules: standard_sg_rules(),
        vpc_name: Some("edge".to_string()),
    }
}

/// Security group seeded onto new teleport bastion deployments
pub(crate) fn teleport_sg() -> VsiSecurityGroup {
    let mut rules = standard_sg_rules();
    rules.push(sg_rule(
        Direction::Inbound,
        "allow-inbound-443",
        "0.0.0.0/0",
        Some(443),
    ));
    rules.push(sg_rule(
        Direction::Outbound,
        "allow-all-outbound",
        "0.0.0.0/0",
        None,
    ));
    VsiSecurityGroup {
        name: "bastion-vsi-sg".to_string(),
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_networks_have_disjoint_subnet_cidrs() {
        let vpcs = default_vpcs();
        let mut cidrs: Vec<String> = Vec::new();
        for vpc in &vpcs {
            for (_, subnets) in vpc.subnets.iter() {
                for subnet in subnets {
                    cidrs.push(subnet.cidr.clone());
                }
            }
        }
        for (i, a) in cidrs.iter().enumerate() {
            for b in cidrs.iter().skip(i + 1) {
                assert!(!crate::cidr::cidr_blocks_overlap(a, b), "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn bastion_rules_cover_each_zone() {
        let sg = f5_bastion_sg();
        assert_eq!(sg.rules.len(), 6);
        assert_eq!(sg.rules[0].name, "1-inbound-3023");
        assert_eq!(sg.rules[0].tcp.port_max, Some(3025));
        assert_eq!(sg.rules[5].source, "10.7.80.0/24");
    }
}
