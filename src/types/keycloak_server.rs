// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::kubernetes::PackagedDefinition;
use crate::types::status::CustomResourceStatus;
use crate::types::{default_replicas, DbmsVendor};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Identity server deployed for a set of applications
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "stagehand.dev", version = "v1", kind = "KeycloakServer")]
#[kube(namespaced)]
#[kube(status = "CustomResourceStatus")]
#[kube(shortname = "kc")]
#[serde(rename_all = "camelCase")]
pub struct KeycloakServerSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dbms: Option<DbmsVendor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_secret_name: Option<String>,
    #[serde(default = "default_replicas")]
    pub replicas: i32,
    #[serde(default)]
    pub is_default: bool,
}

impl PackagedDefinition for KeycloakServer {
    const MANIFEST: &'static str = include_str!("../../crds/keycloakservers.stagehand.dev.yaml");
}

impl KeycloakServer {
    /// Server qualifier used when reporting the identity server's own status
    pub const SERVER_QUALIFIER: &'static str = "server";
    /// Qualifier for the database backing the identity server
    pub const DB_QUALIFIER: &'static str = "db";

    /// Whether TLS is configured for the exposed endpoint
    pub fn uses_tls(&self) -> bool {
        self.spec.tls_secret_name.is_some() && self.spec.ingress_host_name.is_some()
    }
}
