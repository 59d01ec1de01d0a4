// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stagehand::config::Config;
use stagehand::kubernetes::{DefinitionBootstrapper, DefinitionRegistry};
use stagehand::types::{App, AppPluginLink, DatabaseService, KeycloakServer, Plugin};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting stagehand CRD bootstrap");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: poll_interval={:?}, wait_timeout={:?}, probe_namespace={}",
        config.poll_interval, config.wait_timeout, config.probe_namespace
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let registry = Arc::new(DefinitionRegistry::new());
    let bootstrapper = DefinitionBootstrapper::new(client, registry, config);

    // Registration is serialized by the registry; the availability waits overlap
    tokio::try_join!(
        bootstrapper.bootstrap::<KeycloakServer>(),
        bootstrapper.bootstrap::<DatabaseService>(),
        bootstrapper.bootstrap::<App>(),
        bootstrapper.bootstrap::<Plugin>(),
        bootstrapper.bootstrap::<AppPluginLink>()
    )?;

    info!("All stagehand CRDs are registered and served");
    Ok(())
}
