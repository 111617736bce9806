// Copyright (c) 2025 - Cowboy AI, Inc.
//! Keyed-Collection Navigation Primitives
//!
//! Every entity in the configuration graph lives in a small array and is
//! addressed by a unique string key (usually `name`, `prefix` for VPCs).
//! This module is the single mutation primitive shared by all domain
//! mutators: locate by key, merge, append, or carve out an element.
//!
//! Lookups resolve by linear scan. Collections hold dozens of elements at
//! most, so O(n) hops are an accepted cost.
//!
//! `push` never fails; key uniqueness is the caller's responsibility and
//! is deliberately not checked here.

use crate::errors::{StoreError, StoreResult};

/// An entity addressable by a unique string key within its collection
pub trait Keyed {
    /// Entity kind used in lookup-failure errors
    const KIND: &'static str;

    /// The key this entity is matched on
    fn key(&self) -> &str;
}

/// Find an element by key
pub fn find<'a, T: Keyed>(items: &'a [T], key: &str) -> StoreResult<&'a T> {
    items
        .iter()
        .find(|item| item.key() == key)
        .ok_or_else(|| StoreError::not_found(T::KIND, key))
}

/// Find an element by key for mutation
pub fn find_mut<'a, T: Keyed>(items: &'a mut [T], key: &str) -> StoreResult<&'a mut T> {
    items
        .iter_mut()
        .find(|item| item.key() == key)
        .ok_or_else(|| StoreError::not_found(T::KIND, key))
}

/// Positional index of an element by key
pub fn index_of<T: Keyed>(items: &[T], key: &str) -> Option<usize> {
    items.iter().position(|item| item.key() == key)
}

/// True when the collection contains an element with the given key
pub fn contains_key<T: Keyed>(items: &[T], key: &str) -> bool {
    index_of(items, key).is_some()
}

/// Remove and return the element with the given key
pub fn carve<T: Keyed>(items: &mut Vec<T>, key: &str) -> StoreResult<T> {
    match index_of(items, key) {
        Some(index) => Ok(items.remove(index)),
        None => Err(StoreError::not_found(T::KIND, key)),
    }
}

/// Collect every element's key into an owned list
pub fn names<T: Keyed>(items: &[T]) -> Vec<String> {
    items.iter().map(|item| item.key().to_string()).collect()
}

/// Null out a weak reference when its target key no longer exists
pub fn heal_unfound(valid: &[String], field: &mut Option<String>, what: &str) {
    if let Some(value) = field {
        if !valid.iter().any(|name| name == value) {
            tracing::warn!(reference = %value, "healing dangling {what} reference");
            *field = None;
        }
    }
}

/// Retain only list entries naming an existing target
pub fn retain_found(valid: &[String], list: &mut Vec<String>) {
    list.retain(|entry| valid.iter().any(|name| name == entry));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Named(String);

    impl Keyed for Named {
        const KIND: &'static str = "named";

        fn key(&self) -> &str {
            &self.0
        }
    }

    fn fixture() -> Vec<Named> {
        vec![
            Named("frog".to_string()),
            Named("toad".to_string()),
            Named("newt".to_string()),
        ]
    }

    #[test]
    fn find_mut_locates_by_key() {
        let mut items = fixture();
        let item = find_mut(&mut items, "toad").unwrap();
        item.0 = "todd".to_string();
        assert_eq!(items[1].0, "todd");
    }

    #[test]
    fn find_reports_missing_key() {
        let items = fixture();
        let err = find(&items, "moose").unwrap_err();
        assert_eq!(err.to_string(), "no named found with key \"moose\"");
    }

    #[test]
    fn carve_removes_matching_element() {
        let mut items = fixture();
        carve(&mut items, "frog").unwrap();
        assert_eq!(names(&items), vec!["toad", "newt"]);
    }

    #[test]
    fn carve_fails_without_match() {
        let mut items = fixture();
        assert!(carve(&mut items, "moose").is_err());
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn heal_unfound_nulls_dangling_reference() {
        let valid = vec!["service-rg".to_string()];
        let mut field = Some("deleted-rg".to_string());
        heal_unfound(&valid, &mut field, "resource group");
        assert_eq!(field, None);

        let mut kept = Some("service-rg".to_string());
        heal_unfound(&valid, &mut kept, "resource group");
        assert_eq!(kept, Some("service-rg".to_string()));
    }

    #[test]
    fn retain_found_drops_missing_entries() {
        let valid = vec!["vsi-zone-1".to_string(), "vsi-zone-2".to_string()];
        let mut list = vec![
            "vsi-zone-1".to_string(),
            "vsi-zone-3".to_string(),
            "vsi-zone-2".to_string(),
        ];
        retain_found(&valid, &mut list);
        assert_eq!(list, vec!["vsi-zone-1", "vsi-zone-2"]);
    }
}
