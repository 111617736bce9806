// Copyright (c) 2025 - Cowboy AI, Inc.
//! Deterministic CIDR Allocation
//!
//! Subnet address blocks are a pure function of network position, zone,
//! and tier position. Two addressing bands exist:
//!
//! - **Primary band**: `10.{10 * (zone + 3 * vpc_index)}.{10 * (tier + 1)}.0/24`.
//!   Disjoint /24 blocks for every (network, zone, tier) triple.
//! - **Edge band**: `10.{zone + 4}.{10 * (tier + 1)}.0/24`, reserved for
//!   edge/firewall tiers so edge blocks never collide with the primary band
//!   no matter how many ordinary networks exist.
//!
//! CIDR values are not stable identifiers: removing a tier renumbers the
//! remaining non-reserved subnets in the touched zones by positional index.
//! Subnets belonging to reserved edge tier names keep their blocks forever.

/// Fixed slot order for edge tiers within the reserved addressing band.
///
/// The slot index (not the tier's position in the network) drives the third
/// octet, so edge CIDRs are stable across pattern variants.
pub const EDGE_TIER_ORDER: [&str; 7] = [
    "vpn-1",
    "vpn-2",
    "f5-management",
    "f5-external",
    "f5-workload",
    "f5-bastion",
    "vpe",
];

/// Tier names whose subnets are never renumbered
pub const RESERVED_TIER_NAMES: [&str; 6] = [
    "vpn-1",
    "vpn-2",
    "f5-management",
    "f5-external",
    "f5-workload",
    "f5-bastion",
];

/// Format a primary-band /24 block for a (network, zone, tier) triple
pub fn cidr_block(vpc_index: usize, zone: u8, tier_index: usize) -> String {
    format!(
        "10.{}.{}.0/24",
        10 * (zone as usize + 3 * vpc_index),
        10 * (tier_index + 1)
    )
}

/// Format an edge-band /24 block for a (zone, tier slot) pair
pub fn edge_cidr_block(zone: u8, tier_index: usize) -> String {
    format!("10.{}.{}0.0/24", zone + 4, tier_index + 1)
}

/// Slot index of an edge tier within the reserved band, if reserved
pub fn edge_tier_index(tier_name: &str) -> Option<usize> {
    RESERVED_TIER_NAMES
        .iter()
        .position(|name| *name == tier_name)
}

/// True when a subnet tier name is reserved for the edge network.
///
/// Matches the reserved firewall/vpn tier names exactly, and any name
/// containing `zone` (subnet names embed their zone suffix).
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_TIER_NAMES.contains(&name) || name.contains("zone")
}

/// Strip the `-zone-{n}` suffix from a subnet name, yielding its tier name
pub fn tier_name_from_subnet(subnet_name: &str) -> &str {
    match subnet_name.rfind("-zone-") {
        Some(index) => &subnet_name[..index],
        None => subnet_name,
    }
}

/// Zone number parsed from a `zone-{n}` or `{tier}-zone-{n}` name
pub fn zone_from_name(name: &str) -> Option<u8> {
    name.rsplit('-').next().and_then(|n| n.parse().ok())
}

fn parse_cidr(cidr: &str) -> Option<(u32, u32)> {
    let (address, prefix) = cidr.split_once('/')?;
    let prefix: u32 = prefix.parse().ok()?;
    if prefix > 32 {
        return None;
    }
    let mut block: u32 = 0;
    let mut octets = 0;
    for octet in address.split('.') {
        block = (block << 8) | octet.parse::<u8>().ok()? as u32;
        octets += 1;
    }
    if octets != 4 {
        return None;
    }
    let mask = if prefix == 0 { 0 } else { u32::MAX << (32 - prefix) };
    Some((block & mask, block | !mask))
}

/// True when two IPv4 CIDR blocks share one or more addresses.
///
/// Unparseable blocks are treated as non-overlapping; import validation
/// reports those separately.
pub fn cidr_blocks_overlap(cidr_a: &str, cidr_b: &str) -> bool {
    match (parse_cidr(cidr_a), parse_cidr(cidr_b)) {
        (Some((first_a, last_a)), Some((first_b, last_b))) => {
            first_a <= last_b && first_b <= last_a
        }
        _ => false,
    }
}
