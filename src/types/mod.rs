// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resources managed by stagehand and the status model they share.

pub mod app;
pub mod app_plugin_link;
pub mod database_service;
pub mod keycloak_server;
pub mod phase;
pub mod plugin;
pub mod server_status;
pub mod status;

use serde::{Deserialize, Serialize};

pub use app::{App, AppSpec, JeeServer};
pub use app_plugin_link::{AppPluginLink, AppPluginLinkSpec};
pub use database_service::{DatabaseService, DatabaseServiceSpec};
pub use keycloak_server::{KeycloakServer, KeycloakServerSpec};
pub use phase::DeploymentPhase;
pub use plugin::{Plugin, PluginSecurityLevel, PluginSpec};
pub use server_status::{
    ControllerFailure, DbServerStatus, ExposedServerStatus, ServerStatus, ServerStatusBase,
};
pub use status::{CustomResourceStatus, ServerStatuses};

/// Database vendors a component can be deployed against
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DbmsVendor {
    Mysql,
    Postgresql,
    Oracle,
    Embedded,
}

pub(crate) fn default_replicas() -> i32 {
    1
}

/// Access to the status embedded in a stagehand resource
pub trait StatusExt {
    /// The resource's status, materialized with defaults if it has none yet
    fn status_or_default(&mut self) -> &mut CustomResourceStatus;

    /// Commit `phase` as observed for the resource's current generation
    fn observe_phase(&mut self, phase: DeploymentPhase);
}

macro_rules! impl_status_ext {
    ($ty:ty) => {
        impl StatusExt for $ty {
            fn status_or_default(&mut self) -> &mut CustomResourceStatus {
                self.status.get_or_insert_with(CustomResourceStatus::default)
            }

            fn observe_phase(&mut self, phase: DeploymentPhase) {
                let generation = self.metadata.generation.unwrap_or_default();
                self.status_or_default()
                    .update_deployment_phase(phase, generation);
            }
        }
    };
}

impl_status_ext!(KeycloakServer);
impl_status_ext!(DatabaseService);
impl_status_ext!(App);
impl_status_ext!(Plugin);
impl_status_ext!(AppPluginLink);
