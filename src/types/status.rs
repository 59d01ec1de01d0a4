// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Aggregate deployment status embedded in every managed resource.
//!
//! Component statuses are reported independently, possibly from several workers at
//! once, through [`CustomResourceStatus::put_server_status`], which only needs a
//! shared reference. Folding those reports into a phase is left to the single owner of
//! the resource, which calls [`CustomResourceStatus::derive_final_phase`] and commits
//! the verdict with [`CustomResourceStatus::update_deployment_phase`].

use crate::types::phase::DeploymentPhase;
use crate::types::server_status::{DbServerStatus, ExposedServerStatus, ServerStatus};
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Qualifier-keyed component statuses that accept concurrent writers
#[derive(Debug, Default)]
pub struct ServerStatuses {
    inner: RwLock<BTreeMap<String, ServerStatus>>,
}

impl ServerStatuses {
    pub fn insert(&self, status: ServerStatus) {
        self.inner
            .write()
            .insert(status.qualifier().to_string(), status);
    }

    pub fn get(&self, qualifier: &str) -> Option<ServerStatus> {
        self.inner.read().get(qualifier).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn snapshot(&self) -> BTreeMap<String, ServerStatus> {
        self.inner.read().clone()
    }

    fn any_failed(&self) -> bool {
        self.inner.read().values().any(ServerStatus::has_failed)
    }

    /// Entries are visited in qualifier order, so on equal timestamps the
    /// lexicographically smallest qualifier wins.
    fn most_recently_started(&self) -> Option<ServerStatus> {
        let map = self.inner.read();
        let mut latest: Option<&ServerStatus> = None;
        for status in map.values() {
            match latest {
                Some(current) if current.started().0 >= status.started().0 => {}
                _ => latest = Some(status),
            }
        }
        latest.cloned()
    }
}

impl Clone for ServerStatuses {
    fn clone(&self) -> Self {
        Self {
            inner: RwLock::new(self.snapshot()),
        }
    }
}

impl PartialEq for ServerStatuses {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.snapshot() == other.snapshot()
    }
}

impl From<BTreeMap<String, ServerStatus>> for ServerStatuses {
    fn from(map: BTreeMap<String, ServerStatus>) -> Self {
        Self {
            inner: RwLock::new(map),
        }
    }
}

impl Serialize for ServerStatuses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.read().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ServerStatuses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<String, ServerStatus>::deserialize(deserializer).map(Self::from)
    }
}

impl schemars::JsonSchema for ServerStatuses {
    fn schema_name() -> String {
        "ServerStatuses".to_string()
    }

    fn json_schema(generator: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <BTreeMap<String, ServerStatus> as schemars::JsonSchema>::json_schema(generator)
    }
}

/// Status subresource shared by all stagehand resources
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceStatus {
    #[serde(default)]
    phase: DeploymentPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    observed_generation: Option<i64>,
    #[serde(default)]
    server_statuses: ServerStatuses,
}

impl CustomResourceStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DeploymentPhase {
        self.phase
    }

    pub fn observed_generation(&self) -> Option<i64> {
        self.observed_generation
    }

    pub fn server_statuses(&self) -> &ServerStatuses {
        &self.server_statuses
    }

    /// Record a component status, replacing whatever was stored under its qualifier
    pub fn put_server_status(&self, status: impl Into<ServerStatus>) {
        self.server_statuses.insert(status.into());
    }

    pub fn server_status(&self, qualifier: &str) -> Option<ServerStatus> {
        self.server_statuses.get(qualifier)
    }

    /// Database status under `qualifier`, or `None` if absent or stored as another kind
    pub fn lookup_as_database(&self, qualifier: &str) -> Option<DbServerStatus> {
        match self.server_statuses.get(qualifier)? {
            ServerStatus::DbServer(status) => Some(status),
            ServerStatus::ExposedServer(_) => None,
        }
    }

    /// Exposed-server status under `qualifier`, or `None` if absent or stored as another kind
    pub fn lookup_as_exposed_server(&self, qualifier: &str) -> Option<ExposedServerStatus> {
        match self.server_statuses.get(qualifier)? {
            ServerStatus::ExposedServer(status) => Some(status),
            ServerStatus::DbServer(_) => None,
        }
    }

    pub fn has_failed(&self) -> bool {
        self.server_statuses.any_failed()
    }

    pub fn find_most_recently_started_status(&self) -> Option<ServerStatus> {
        self.server_statuses.most_recently_started()
    }

    /// Overwrite phase and observed generation. Any phase may replace any other.
    pub fn update_deployment_phase(&mut self, phase: DeploymentPhase, observed_generation: i64) {
        self.phase = phase;
        self.observed_generation = Some(observed_generation);
    }

    /// Verdict over the reported component statuses; does not touch `phase`
    pub fn derive_final_phase(&self) -> DeploymentPhase {
        if self.has_failed() {
            DeploymentPhase::Failed
        } else {
            DeploymentPhase::Successful
        }
    }
}
