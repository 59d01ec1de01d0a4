// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error(transparent)]
    KubeError(#[from] kube::Error),

    #[error("Failed to parse packaged CRD manifest: {0}")]
    ManifestError(#[from] serde_yaml::Error),

    #[error("Invalid packaged CRD manifest: {0}")]
    InvalidManifest(String),

    #[error("CRD {name} not served after {waited:?}")]
    Timeout { name: String, waited: Duration },
}

pub type Result<T> = std::result::Result<T, BootstrapError>;
