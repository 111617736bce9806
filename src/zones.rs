// Copyright (c) 2025 - Cowboy AI, Inc.
//! Per-zone maps
//!
//! The wire schema spreads zonal data across fixed `zone-1`/`zone-2`/`zone-3`
//! keys. Deployments always span exactly three zones.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Zone numbers in ascending order
pub const ZONES: [u8; 3] = [1, 2, 3];

/// A value held per availability zone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Zones<T> {
    #[serde(rename = "zone-1")]
    pub zone_1: T,
    #[serde(rename = "zone-2")]
    pub zone_2: T,
    #[serde(rename = "zone-3")]
    pub zone_3: T,
}

impl<T> Zones<T> {
    /// Build a map by calling `f` once per zone, in zone order
    pub fn build(mut f: impl FnMut(u8) -> T) -> Self {
        Zones {
            zone_1: f(1),
            zone_2: f(2),
            zone_3: f(3),
        }
    }

    /// Iterate zones in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &T)> {
        [(1, &self.zone_1), (2, &self.zone_2), (3, &self.zone_3)].into_iter()
    }

    /// Iterate zones mutably in ascending order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u8, &mut T)> {
        [
            (1, &mut self.zone_1),
            (2, &mut self.zone_2),
            (3, &mut self.zone_3),
        ]
        .into_iter()
    }
}

impl<T: Clone> Zones<T> {
    /// Fill every zone with a clone of `value`
    pub fn splat(value: T) -> Self {
        Zones {
            zone_1: value.clone(),
            zone_2: value.clone(),
            zone_3: value,
        }
    }
}

impl<T> Index<u8> for Zones<T> {
    type Output = T;

    /// # Panics
    /// When `zone` is not 1, 2, or 3.
    fn index(&self, zone: u8) -> &T {
        match zone {
            1 => &self.zone_1,
            2 => &self.zone_2,
            3 => &self.zone_3,
            _ => panic!("zone out of range: {zone}"),
        }
    }
}

impl<T> IndexMut<u8> for Zones<T> {
    fn index_mut(&mut self, zone: u8) -> &mut T {
        match zone {
            1 => &mut self.zone_1,
            2 => &mut self.zone_2,
            3 => &mut self.zone_3,
            _ => panic!("zone out of range: {zone}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_zone_keys() {
        let zones = Zones::splat(false);
        let json = serde_json::to_string(&zones).unwrap();
        assert_eq!(json, r#"{"zone-1":false,"zone-2":false,"zone-3":false}"#);
    }

    #[test]
    fn build_runs_in_zone_order() {
        let zones = Zones::build(|zone| zone * 10);
        assert_eq!(zones[1], 10);
        assert_eq!(zones[2], 20);
        assert_eq!(zones[3], 30);
    }

    #[test]
    fn iter_yields_all_zones() {
        let zones = Zones::build(|zone| zone);
        let collected: Vec<u8> = zones.iter().map(|(zone, _)| zone).collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }
}
