// Copyright (c) 2025 - Cowboy AI, Inc.
//! # Landing Zone Store
//!
//! In-memory state store for landing-zone configurations: a typed
//! configuration graph, a mutation surface per entity family, and a
//! reconciliation pass that keeps every cross-entity reference either
//! valid or null.
//!
//! The graph serializes to the landing-zone JSON wire format via
//! [`Store::to_json`] and imports through [`Store::hard_set_config`].
//! Entities reference each other by name; referential integrity is
//! maintained by healing, never by rejection: deleting an entity nulls
//! or drops every reference to it on the reconcile pass that runs after
//! each mutation. Subnet addressing is deterministic, allocated from a
//! tier's position in its network (see [`cidr`]).
//!
//! ```
//! use landing_zone_store::{Store, Pattern};
//!
//! let mut store = Store::new();
//! store.apply_pattern(Pattern::Roks);
//! store.delete_resource_group("workload-rg").unwrap();
//! // anything referencing workload-rg healed to null
//! let json = store.to_json().unwrap();
//! assert!(!json.contains("workload-rg"));
//! ```

pub mod cidr;
pub mod config;
pub mod cursor;
pub mod errors;
pub mod store;
pub mod zones;

pub use config::Config;
pub use errors::{StoreError, StoreResult};
pub use store::{EdgePattern, Pattern, Store, SubnetTier};
pub use zones::Zones;
