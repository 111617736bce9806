// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-based tests for the CIDR allocator

use landing_zone_store::cidr::{cidr_block, cidr_blocks_overlap, edge_cidr_block};
use proptest::prelude::*;

proptest! {
    /// Any two distinct (network, zone, tier) positions get disjoint blocks
    #[test]
    fn primary_blocks_are_pairwise_disjoint(
        vpc_a in 0usize..6, zone_a in 1u8..=3, tier_a in 0usize..8,
        vpc_b in 0usize..6, zone_b in 1u8..=3, tier_b in 0usize..8,
    ) {
        prop_assume!((vpc_a, zone_a, tier_a) != (vpc_b, zone_b, tier_b));
        let block_a = cidr_block(vpc_a, zone_a, tier_a);
        let block_b = cidr_block(vpc_b, zone_b, tier_b);
        prop_assert!(!cidr_blocks_overlap(&block_a, &block_b), "{block_a} overlaps {block_b}");
    }

    /// The edge band never intersects the primary band
    #[test]
    fn edge_band_is_disjoint_from_primary(
        vpc in 0usize..6, zone in 1u8..=3, tier in 0usize..8,
        edge_zone in 1u8..=3, slot in 0usize..7,
    ) {
        let primary = cidr_block(vpc, zone, tier);
        let edge = edge_cidr_block(edge_zone, slot);
        prop_assert!(!cidr_blocks_overlap(&primary, &edge), "{primary} overlaps {edge}");
    }

    /// Distinct edge slots get disjoint blocks
    #[test]
    fn edge_blocks_are_pairwise_disjoint(
        zone_a in 1u8..=3, slot_a in 0usize..7,
        zone_b in 1u8..=3, slot_b in 0usize..7,
    ) {
        prop_assume!((zone_a, slot_a) != (zone_b, slot_b));
        let block_a = edge_cidr_block(zone_a, slot_a);
        let block_b = edge_cidr_block(zone_b, slot_b);
        prop_assert!(!cidr_blocks_overlap(&block_a, &block_b));
    }

    /// Overlap is reflexive and symmetric over well-formed blocks
    #[test]
    fn overlap_is_symmetric(
        a in 0u32..=u32::MAX, prefix_a in 8u32..=30,
        b in 0u32..=u32::MAX, prefix_b in 8u32..=30,
    ) {
        let format = |address: u32, prefix: u32| {
            format!(
                "{}.{}.{}.{}/{prefix}",
                address >> 24,
                (address >> 16) & 0xff,
                (address >> 8) & 0xff,
                address & 0xff
            )
        };
        let block_a = format(a, prefix_a);
        let block_b = format(b, prefix_b);
        prop_assert!(cidr_blocks_overlap(&block_a, &block_a));
        prop_assert_eq!(
            cidr_blocks_overlap(&block_a, &block_b),
            cidr_blocks_overlap(&block_b, &block_a)
        );
    }
}
