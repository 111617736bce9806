// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service entities: key management, object storage, activity tracking
//! and App ID

use serde::{Deserialize, Serialize};

use crate::cursor::Keyed;

/// Key rotation policy, nested to match the wire schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationPolicy {
    pub interval_month: u32,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        RotationPolicy { interval_month: 12 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPolicies {
    pub rotation: RotationPolicy,
}

/// Encryption key owned by the key management service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptionKey {
    pub key_ring: Option<String>,
    pub name: String,
    pub root_key: bool,
    pub payload: Option<String>,
    pub force_delete: Option<bool>,
    pub endpoint: Option<String>,
    pub iv_value: Option<String>,
    pub encrypted_nonce: Option<String>,
    pub policies: KeyPolicies,
}

impl Keyed for EncryptionKey {
    const KIND: &'static str = "encryption key";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Key management instance. One per configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyManagement {
    pub keys: Vec<EncryptionKey>,
    pub name: String,
    pub resource_group: Option<String>,
    pub use_hs_crypto: bool,
    pub use_data: bool,
}

/// Object storage bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub endpoint_type: String,
    pub force_delete: bool,
    pub kms_key: Option<String>,
    pub name: String,
    pub storage_class: String,
}

impl Keyed for Bucket {
    const KIND: &'static str = "bucket";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Object storage service credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosKey {
    pub name: String,
    pub role: String,
    #[serde(rename = "enable_HMAC")]
    pub enable_hmac: bool,
}

impl Keyed for CosKey {
    const KIND: &'static str = "object storage key";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Object storage instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectStorage {
    pub buckets: Vec<Bucket>,
    pub keys: Vec<CosKey>,
    pub name: String,
    pub plan: String,
    pub resource_group: Option<String>,
    pub use_data: bool,
    pub random_suffix: bool,
}

impl Keyed for ObjectStorage {
    const KIND: &'static str = "object storage instance";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Activity tracker routing. The service credential backing the collector
/// bucket is tracked separately as derived store state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atracker {
    pub collector_bucket_name: Option<String>,
    pub receive_global_events: bool,
    pub resource_group: Option<String>,
    pub add_route: bool,
}

/// App ID instance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppId {
    pub use_appid: bool,
    pub name: Option<String>,
    pub resource_group: Option<String>,
    pub use_data: Option<bool>,
    pub keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cos_key_preserves_hmac_field_casing() {
        let key = CosKey {
            name: "cos-bind-key".to_string(),
            role: "Writer".to_string(),
            enable_hmac: false,
        };
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(
            json,
            r#"{"name":"cos-bind-key","role":"Writer","enable_HMAC":false}"#
        );
    }

    #[test]
    fn rotation_policy_nests_under_policies() {
        let key = EncryptionKey {
            key_ring: None,
            name: "new-key".to_string(),
            root_key: true,
            payload: None,
            force_delete: None,
            endpoint: None,
            iv_value: None,
            encrypted_nonce: None,
            policies: KeyPolicies::default(),
        };
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json["policies"]["rotation"]["interval_month"], 12);
    }
}
