// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD bootstrap: register a packaged definition, then wait until its kind is served.

use crate::config::Config;
use crate::constants::crd::NOT_FOUND;
use crate::error::{BootstrapError, Result};
use crate::kubernetes::registry::DefinitionRegistry;
use k8s_openapi::NamespaceResourceScope;
use kube::{api::ListParams, Api, Client, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, instrument, warn};

/// Progress of a single bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Unchecked,
    Checking,
    AlreadyPresent,
    Creating,
    Registered,
    Polling,
    Available,
}

/// A namespaced resource type that ships its own CRD manifest
pub trait PackagedDefinition:
    Resource<DynamicType = (), Scope = NamespaceResourceScope>
    + Clone
    + DeserializeOwned
    + Debug
    + Send
    + Sync
    + 'static
{
    /// The bundled `CustomResourceDefinition` document, as YAML
    const MANIFEST: &'static str;

    /// CRD name, `<plural>.<group>`
    fn crd_name() -> String {
        format!("{}.{}", Self::plural(&()), Self::group(&()))
    }
}

/// Hands out resource clients once their CRD is registered and served
#[derive(Clone)]
pub struct DefinitionBootstrapper {
    client: Client,
    registry: Arc<DefinitionRegistry>,
    config: Config,
}

impl DefinitionBootstrapper {
    pub fn new(client: Client, registry: Arc<DefinitionRegistry>, config: Config) -> Self {
        Self {
            client,
            registry,
            config,
        }
    }

    pub fn registry(&self) -> &Arc<DefinitionRegistry> {
        &self.registry
    }

    /// Register `K`'s CRD if needed and return a client for `K` once the API server serves it.
    ///
    /// While the new kind propagates, list requests answer 404; those are retried every
    /// `poll_interval`. Any other error is returned unchanged. With `wait_timeout` set the
    /// wait ends in [`BootstrapError::Timeout`]; dropping the future also ends it.
    ///
    /// `wait_timeout` bounds only the availability wait. Registration under the registry
    /// lock is a single lookup and at most one create, bounded by the client's own
    /// request timeouts.
    #[instrument(skip(self))]
    pub async fn bootstrap<K: PackagedDefinition>(&self) -> Result<Api<K>> {
        let name = K::crd_name();
        debug!("CRD {}: {:?}", name, BootstrapState::Unchecked);

        self.registry
            .ensure_registered(&self.client, &name, K::MANIFEST)
            .await?;
        debug!("CRD {}: {:?}", name, BootstrapState::Registered);

        let api: Api<K> = Api::all(self.client.clone());
        self.wait_until_served::<K>(&name).await?;

        debug!("CRD {}: {:?}", name, BootstrapState::Available);
        Ok(api)
    }

    async fn wait_until_served<K: PackagedDefinition>(&self, name: &str) -> Result<()> {
        let Some(limit) = self.config.wait_timeout else {
            return self.poll_until_served::<K>(name).await;
        };

        match timeout(limit, self.poll_until_served::<K>(name)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("CRD {} still not served after {:?}, giving up", name, limit);
                Err(BootstrapError::Timeout {
                    name: name.to_string(),
                    waited: limit,
                })
            }
        }
    }

    async fn poll_until_served<K: PackagedDefinition>(&self, name: &str) -> Result<()> {
        debug!("CRD {}: {:?}", name, BootstrapState::Polling);
        let probe: Api<K> = Api::namespaced(self.client.clone(), &self.config.probe_namespace);
        let params = ListParams::default().limit(1);
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            match probe.list(&params).await {
                Ok(_) => {
                    info!("CRD {} is served (after {} attempts)", name, attempts);
                    return Ok(());
                }
                Err(kube::Error::Api(err)) if err.code == NOT_FOUND => {
                    debug!(
                        "CRD {} not served yet, retrying in {:?}",
                        name, self.config.poll_interval
                    );
                }
                Err(e) => return Err(e.into()),
            }

            sleep(self.config.poll_interval).await;
        }
    }
}
