// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for registering CRDs and waiting until they are served.

pub mod crd;
pub mod registry;

pub use crd::{BootstrapState, DefinitionBootstrapper, PackagedDefinition};
pub use registry::DefinitionRegistry;
