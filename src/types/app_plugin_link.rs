// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::kubernetes::PackagedDefinition;
use crate::types::status::CustomResourceStatus;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Exposes a plugin through an app's ingress
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "stagehand.dev", version = "v1", kind = "AppPluginLink")]
#[kube(namespaced)]
#[kube(status = "CustomResourceStatus")]
#[serde(rename_all = "camelCase")]
pub struct AppPluginLinkSpec {
    pub app_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_namespace: Option<String>,
    pub plugin_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_namespace: Option<String>,
}

impl PackagedDefinition for AppPluginLink {
    const MANIFEST: &'static str = include_str!("../../crds/apppluginlinks.stagehand.dev.yaml");
}

impl AppPluginLink {
    /// Qualifier for the ingress path the link adds to the app
    pub const LINK_QUALIFIER: &'static str = "link";

    /// Namespace of the linked app; defaults to the link's own namespace
    pub fn app_namespace(&self) -> Option<&str> {
        self.spec
            .app_namespace
            .as_deref()
            .or(self.metadata.namespace.as_deref())
    }

    /// Namespace of the linked plugin; defaults to the link's own namespace
    pub fn plugin_namespace(&self) -> Option<&str> {
        self.spec
            .plugin_namespace
            .as_deref()
            .or(self.metadata.namespace.as_deref())
    }
}
