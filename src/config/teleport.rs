// Copyright (c) 2025 - Cowboy AI, Inc.
//! Teleport bastion configuration

use serde::{Deserialize, Serialize};

use crate::cursor::Keyed;

/// Mapping from an email claim to teleport roles. Keyed by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimToRole {
    pub email: String,
    pub roles: Vec<String>,
}

impl Keyed for ClaimToRole {
    const KIND: &'static str = "claim to role";

    fn key(&self) -> &str {
        &self.email
    }
}

/// Teleport deployment configuration. All fields null until teleport is
/// enabled and configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeleportConfig {
    pub teleport_license: Option<String>,
    pub https_cert: Option<String>,
    pub https_key: Option<String>,
    pub domain: Option<String>,
    pub cos_bucket_name: Option<String>,
    pub cos_key_name: Option<String>,
    pub teleport_version: Option<String>,
    pub message_of_the_day: Option<String>,
    pub hostname: Option<String>,
    pub app_id_key_name: Option<String>,
    pub claims_to_roles: Vec<ClaimToRole>,
}
