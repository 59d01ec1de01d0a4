// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse lifecycle stage of a resource's managed deployment.
///
/// Variants are declared in lifecycle order, so `Ord` follows
/// `Requested < Started < Successful < Failed`. Nothing prevents a caller from
/// moving "backwards"; the order is informational only.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord,
    schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentPhase {
    #[default]
    Requested,
    Started,
    Successful,
    Failed,
}

impl DeploymentPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeploymentPhase::Successful | DeploymentPhase::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentPhase::Requested => "requested",
            DeploymentPhase::Started => "started",
            DeploymentPhase::Successful => "successful",
            DeploymentPhase::Failed => "failed",
        }
    }
}

impl fmt::Display for DeploymentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
