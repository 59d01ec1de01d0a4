// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::kubernetes::PackagedDefinition;
use crate::types::status::CustomResourceStatus;
use crate::types::{default_replicas, DbmsVendor};
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How strictly a plugin's endpoints are secured
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PluginSecurityLevel {
    Strict,
    Lenient,
}

/// A microservice that extends an app once linked to it
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "stagehand.dev", version = "v1", kind = "Plugin")]
#[kube(namespaced)]
#[kube(status = "CustomResourceStatus")]
#[serde(rename_all = "camelCase")]
pub struct PluginSpec {
    pub image: String,
    #[serde(default = "default_replicas")]
    pub replicas: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dbms: Option<DbmsVendor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_level: Option<PluginSecurityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_secret_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keycloak_secret_to_use: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connection_config_names: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
}

impl PackagedDefinition for Plugin {
    const MANIFEST: &'static str = include_str!("../../crds/plugins.stagehand.dev.yaml");
}

impl Plugin {
    /// Qualifier for the plugin's own server status
    pub const SERVER_QUALIFIER: &'static str = "server";
    /// Qualifier for the plugin's database
    pub const DB_QUALIFIER: &'static str = "db";

    /// Whether the plugin needs a database server of its own
    pub fn requires_database(&self) -> bool {
        !matches!(self.spec.dbms, None | Some(DbmsVendor::Embedded))
    }

    /// Security level, `Strict` unless relaxed explicitly
    pub fn security_level(&self) -> PluginSecurityLevel {
        self.spec
            .security_level
            .unwrap_or(PluginSecurityLevel::Strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ControllerFailure, DbServerStatus, DeploymentPhase, ExposedServerStatus, StatusExt,
    };

    fn make_plugin(dbms: Option<DbmsVendor>) -> Plugin {
        let spec: PluginSpec =
            serde_json::from_str(r#"{"image":"stagehand/my-plugin:6.0.0"}"#).unwrap();
        let mut plugin = Plugin::new("my-plugin", PluginSpec { dbms, ..spec });
        plugin.metadata.namespace = Some("my-namespace".to_string());
        plugin
    }

    #[test]
    fn test_crd_name() {
        assert_eq!(Plugin::crd_name(), "plugins.stagehand.dev");
    }

    #[test]
    fn test_spec_defaults() {
        let plugin = make_plugin(None);
        assert_eq!(plugin.spec.replicas, 1);
        assert!(plugin.spec.connection_config_names.is_empty());
        assert_eq!(plugin.security_level(), PluginSecurityLevel::Strict);
    }

    #[test]
    fn test_requires_database() {
        assert!(make_plugin(Some(DbmsVendor::Postgresql)).requires_database());
        assert!(!make_plugin(Some(DbmsVendor::Embedded)).requires_database());
        assert!(!make_plugin(None).requires_database());
    }

    #[test]
    fn test_status_survives_json_round_trip() {
        let mut plugin = make_plugin(Some(DbmsVendor::Postgresql));
        plugin.spec.security_level = Some(PluginSecurityLevel::Lenient);
        plugin.spec.connection_config_names = vec!["my-config".to_string()];
        plugin.metadata.generation = Some(7);
        plugin
            .status_or_default()
            .put_server_status(DbServerStatus::new(Plugin::DB_QUALIFIER));
        plugin.status_or_default().put_server_status(
            ExposedServerStatus::new(Plugin::SERVER_QUALIFIER)
                .fail(ControllerFailure::new("readiness probe failed")),
        );
        let verdict = plugin.status_or_default().derive_final_phase();
        plugin.observe_phase(verdict);

        let json = serde_json::to_value(&plugin).unwrap();
        assert_eq!(json["kind"], "Plugin");
        assert_eq!(json["spec"]["securityLevel"], "lenient");
        assert_eq!(json["status"]["phase"], "failed");

        let actual: Plugin = serde_json::from_value(json).unwrap();
        let status = actual.status.unwrap();
        assert_eq!(status.phase(), DeploymentPhase::Failed);
        assert_eq!(status.observed_generation(), Some(7));
        assert!(status.has_failed());
        assert_eq!(actual.spec.connection_config_names, vec!["my-config"]);
    }
}
