// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-component status records reported by reconciliation workers.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use k8s_openapi::chrono::Utc;
use serde::{Deserialize, Serialize};

/// Error embedded in a component status when its deployment went wrong
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ControllerFailure {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_object_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_object_name: Option<String>,
}

impl ControllerFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
            failed_object_kind: None,
            failed_object_name: None,
        }
    }

    pub fn on_object(mut self, kind: impl Into<String>, name: impl Into<String>) -> Self {
        self.failed_object_kind = Some(kind.into());
        self.failed_object_name = Some(name.into());
        self
    }
}

/// Attributes shared by every component status
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatusBase {
    pub qualifier: String,
    pub started: Time,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ControllerFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

impl ServerStatusBase {
    fn new(qualifier: impl Into<String>) -> Self {
        Self {
            qualifier: qualifier.into(),
            started: Time(Utc::now()),
            finished: None,
            failure: None,
            deployment_name: None,
            service_name: None,
        }
    }

    pub fn has_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Status of a managed or linked database component
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DbServerStatus {
    #[serde(flatten)]
    pub base: ServerStatusBase,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persistent_volume_claims: Vec<String>,
}

/// Status of a component that is reachable from outside the cluster
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExposedServerStatus {
    #[serde(flatten)]
    pub base: ServerStatusBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_base_url: Option<String>,
}

macro_rules! status_builders {
    ($ty:ty) => {
        impl $ty {
            pub fn with_started(mut self, started: Time) -> Self {
                self.base.started = started;
                self
            }

            pub fn fail(mut self, failure: ControllerFailure) -> Self {
                self.base.failure = Some(failure);
                self
            }

            pub fn finish(mut self, finished: Time) -> Self {
                self.base.finished = Some(finished);
                self
            }

            pub fn qualifier(&self) -> &str {
                &self.base.qualifier
            }

            pub fn has_failed(&self) -> bool {
                self.base.has_failed()
            }
        }
    };
}

status_builders!(DbServerStatus);
status_builders!(ExposedServerStatus);

impl DbServerStatus {
    /// Start tracking a database component, stamped with the current time
    pub fn new(qualifier: impl Into<String>) -> Self {
        Self {
            base: ServerStatusBase::new(qualifier),
            persistent_volume_claims: Vec::new(),
        }
    }
}

impl ExposedServerStatus {
    /// Start tracking an exposed component, stamped with the current time
    pub fn new(qualifier: impl Into<String>) -> Self {
        Self {
            base: ServerStatusBase::new(qualifier),
            ingress_name: None,
            external_base_url: None,
        }
    }
}

/// A component status, tagged by the kind of component it describes
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(tag = "type")]
pub enum ServerStatus {
    #[serde(rename = "DbServerStatus")]
    DbServer(DbServerStatus),
    #[serde(rename = "ExposedServerStatus")]
    ExposedServer(ExposedServerStatus),
}

impl ServerStatus {
    pub fn base(&self) -> &ServerStatusBase {
        match self {
            ServerStatus::DbServer(s) => &s.base,
            ServerStatus::ExposedServer(s) => &s.base,
        }
    }

    pub fn qualifier(&self) -> &str {
        &self.base().qualifier
    }

    pub fn started(&self) -> &Time {
        &self.base().started
    }

    pub fn has_failed(&self) -> bool {
        self.base().has_failed()
    }

    pub fn as_db(&self) -> Option<&DbServerStatus> {
        match self {
            ServerStatus::DbServer(s) => Some(s),
            ServerStatus::ExposedServer(_) => None,
        }
    }

    pub fn as_exposed(&self) -> Option<&ExposedServerStatus> {
        match self {
            ServerStatus::ExposedServer(s) => Some(s),
            ServerStatus::DbServer(_) => None,
        }
    }
}

impl From<DbServerStatus> for ServerStatus {
    fn from(status: DbServerStatus) -> Self {
        ServerStatus::DbServer(status)
    }
}

impl From<ExposedServerStatus> for ServerStatus {
    fn from(status: ExposedServerStatus) -> Self {
        ServerStatus::ExposedServer(status)
    }
}
