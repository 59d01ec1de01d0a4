// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::kubernetes::PackagedDefinition;
use crate::types::status::CustomResourceStatus;
use crate::types::DbmsVendor;
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A database made available to other components, either deployed in-cluster or external
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "stagehand.dev", version = "v1", kind = "DatabaseService")]
#[kube(namespaced)]
#[kube(status = "CustomResourceStatus")]
#[kube(shortname = "dbs")]
#[serde(rename_all = "camelCase")]
pub struct DatabaseServiceSpec {
    pub dbms: DbmsVendor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tablespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_deployment: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub jdbc_parameters: BTreeMap<String, String>,
}

impl PackagedDefinition for DatabaseService {
    const MANIFEST: &'static str = include_str!("../../crds/databaseservices.stagehand.dev.yaml");
}

impl DatabaseService {
    /// Qualifier for the database component's status
    pub const DB_QUALIFIER: &'static str = "db";

    /// Whether stagehand deploys the database itself instead of pointing at an external one
    pub fn creates_deployment(&self) -> bool {
        self.spec.create_deployment.unwrap_or(false)
    }
}
