// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::crd::{POLL_INTERVAL_MILLIS, PROBE_NAMESPACE};
use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

/// CRD bootstrap configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Delay between availability probes after a CRD is registered
    pub poll_interval: Duration,
    /// Upper bound on the availability wait; `None` waits until the kind is served
    pub wait_timeout: Option<Duration>,
    /// Namespace listed when probing availability
    pub probe_namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            poll_interval: Duration::from_millis(POLL_INTERVAL_MILLIS),
            wait_timeout: None,
            probe_namespace: PROBE_NAMESPACE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(millis) = lookup("CRD_POLL_INTERVAL_MILLIS") {
            let millis: u64 = millis
                .parse()
                .context("CRD_POLL_INTERVAL_MILLIS must be a number of milliseconds")?;
            if millis == 0 {
                bail!("CRD_POLL_INTERVAL_MILLIS must be greater than zero");
            }
            config.poll_interval = Duration::from_millis(millis);
        }

        if let Some(secs) = lookup("CRD_WAIT_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .context("CRD_WAIT_TIMEOUT_SECS must be a number of seconds")?;
            config.wait_timeout = Some(Duration::from_secs(secs));
        }

        if let Some(namespace) = lookup("CRD_PROBE_NAMESPACE") {
            config.probe_namespace = namespace;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert_eq!(config.wait_timeout, None);
        assert_eq!(config.probe_namespace, "default");
    }

    #[test]
    fn test_overrides_from_env() {
        let config = Config::from_lookup(lookup_from(&[
            ("CRD_POLL_INTERVAL_MILLIS", "250"),
            ("CRD_WAIT_TIMEOUT_SECS", "30"),
            ("CRD_PROBE_NAMESPACE", "stagehand-system"),
        ]))
        .unwrap();

        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.wait_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.probe_namespace, "stagehand-system");
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("CRD_WAIT_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("CRD_WAIT_TIMEOUT_SECS"));
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("CRD_POLL_INTERVAL_MILLIS", "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("greater than zero"));

        let config =
            Config::from_lookup(lookup_from(&[("CRD_POLL_INTERVAL_MILLIS", "1")])).unwrap();
        assert_eq!(config.poll_interval, Duration::from_millis(1));
    }
}
