// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::kubernetes::PackagedDefinition;
use crate::types::status::CustomResourceStatus;
use crate::types::{default_replicas, DbmsVendor};
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Application servers stagehand knows how to run without a custom image
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum JeeServer {
    Wildfly,
    Eap,
    Tomcat,
}

/// An application deployment, backed by a database and secured by an identity server
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "stagehand.dev", version = "v1", kind = "App")]
#[kube(namespaced)]
#[kube(status = "CustomResourceStatus")]
#[serde(rename_all = "camelCase")]
pub struct AppSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dbms: Option<DbmsVendor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_server_image: Option<JeeServer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_server_image: Option<String>,
    #[serde(default = "default_replicas")]
    pub replicas: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_secret_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keycloak_secret_to_use: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment_variables: BTreeMap<String, String>,
}

impl PackagedDefinition for App {
    const MANIFEST: &'static str = include_str!("../../crds/apps.stagehand.dev.yaml");
}

impl App {
    /// Qualifier for the application server's status
    pub const SERVER_QUALIFIER: &'static str = "server";
    /// Qualifier for the application's database
    pub const DB_QUALIFIER: &'static str = "db";

    /// The custom image to run, unless a standard server image overrides it
    pub fn custom_server_image(&self) -> Option<&str> {
        match self.spec.standard_server_image {
            Some(_) => None,
            None => self.spec.custom_server_image.as_deref(),
        }
    }
}
