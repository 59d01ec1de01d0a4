// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// CRD bootstrap configuration
pub mod crd {
    /// Delay between availability probes in milliseconds
    pub const POLL_INTERVAL_MILLIS: u64 = 100;
    /// Namespace listed to probe whether a freshly registered kind is served
    pub const PROBE_NAMESPACE: &str = "default";
    /// Status code the API server returns while a new kind is still propagating
    pub const NOT_FOUND: u16 = 404;
}
