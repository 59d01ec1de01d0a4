// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Shared record of the CRDs this process has registered

use crate::error::{BootstrapError, Result};
use crate::kubernetes::crd::BootstrapState;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{api::PostParams, Api, Client};
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// CRDs known to be registered with the cluster, keyed by CRD name.
///
/// The lock is held for the whole check-and-create sequence, so at most one
/// registration is in flight per registry. Share a single registry (behind an `Arc`)
/// between all bootstrappers of a process.
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    definitions: Mutex<BTreeMap<String, CustomResourceDefinition>>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_registered(&self, name: &str) -> bool {
        self.definitions.lock().await.contains_key(name)
    }

    /// Make sure the CRD `name` exists, creating it from `manifest` when the cluster lacks it
    #[instrument(skip(self, client, manifest))]
    pub async fn ensure_registered(
        &self,
        client: &Client,
        name: &str,
        manifest: &str,
    ) -> Result<CustomResourceDefinition> {
        let mut definitions = self.definitions.lock().await;

        if let Some(crd) = definitions.get(name) {
            debug!("CRD {} already registered by this process", name);
            return Ok(crd.clone());
        }

        debug!("CRD {}: {:?}", name, BootstrapState::Checking);
        let crds: Api<CustomResourceDefinition> = Api::all(client.clone());

        let crd = match crds.get_opt(name).await? {
            Some(existing) => {
                debug!("CRD {}: {:?}", name, BootstrapState::AlreadyPresent);
                info!("CRD {} already present in cluster", name);
                existing
            }
            None => {
                debug!("CRD {}: {:?}", name, BootstrapState::Creating);
                let definition = load_manifest(name, manifest)?;
                info!("Creating CRD {}", name);
                let created = crds.create(&PostParams::default(), &definition).await?;
                info!("CRD {} created successfully", name);
                created
            }
        };

        definitions.insert(name.to_string(), crd.clone());
        Ok(crd)
    }
}

/// Parse a packaged CRD manifest and prepare it for submission
pub fn load_manifest(name: &str, manifest: &str) -> Result<CustomResourceDefinition> {
    let mut crd: CustomResourceDefinition = serde_yaml::from_str(manifest)?;

    if crd.metadata.name.as_deref() != Some(name) {
        return Err(BootstrapError::InvalidManifest(format!(
            "manifest defines {:?}, expected {}",
            crd.metadata.name, name
        )));
    }

    strip_schema_dependencies(&mut crd);
    Ok(crd)
}

/// Drop `dependencies` from each version's root validation schema.
/// Clients mishandle the nested schema-or-string-array values it carries.
fn strip_schema_dependencies(crd: &mut CustomResourceDefinition) {
    for version in &mut crd.spec.versions {
        if let Some(schema) = version
            .schema
            .as_mut()
            .and_then(|s| s.open_api_v3_schema.as_mut())
        {
            schema.dependencies = None;
        }
    }
}
