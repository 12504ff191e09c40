//! Runtime configuration, read from the environment (after `.env` is loaded)
//! and optionally overridden from the command line.

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_STORAGE_URL: &str = "sqlite://./storyteller_storage.db?mode=rwc";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_LOG_FILE: &str = "storyteller.log";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub storage_url: String,
    /// Multiplier applied to every simulated API delay. `0.0` disables them.
    pub latency_scale: f64,
    pub log_filter: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_url: DEFAULT_STORAGE_URL.to_string(),
            latency_scale: 1.0,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't have to
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(url) = lookup("STORYTELLER_STORAGE_URL") {
            cfg.storage_url = url;
        }
        if let Some(raw) = lookup("STORYTELLER_LATENCY_SCALE") {
            let scale: f64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "STORYTELLER_LATENCY_SCALE",
                value: raw.clone(),
            })?;
            if !scale.is_finite() || scale < 0.0 {
                return Err(ConfigError::Invalid {
                    key: "STORYTELLER_LATENCY_SCALE",
                    value: raw,
                });
            }
            cfg.latency_scale = scale;
        }
        if let Some(filter) = lookup("STORYTELLER_LOG") {
            cfg.log_filter = filter;
        }
        if let Some(path) = lookup("STORYTELLER_LOG_FILE") {
            cfg.log_file = PathBuf::from(path);
        }

        Ok(cfg)
    }

    pub fn with_storage_url(mut self, url: impl Into<String>) -> Self {
        self.storage_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("STORYTELLER_STORAGE_URL", "sqlite::memory:"),
            ("STORYTELLER_LATENCY_SCALE", "0"),
            ("STORYTELLER_LOG", "debug"),
            ("STORYTELLER_LOG_FILE", "/tmp/x.log"),
        ]))
        .unwrap();
        assert_eq!(cfg.storage_url, "sqlite::memory:");
        assert_eq!(cfg.latency_scale, 0.0);
        assert_eq!(cfg.log_filter, "debug");
        assert_eq!(cfg.log_file, PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn rejects_bad_latency_scale() {
        let err = AppConfig::from_lookup(lookup_from(&[("STORYTELLER_LATENCY_SCALE", "fast")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STORYTELLER_LATENCY_SCALE", .. }));

        assert!(AppConfig::from_lookup(lookup_from(&[("STORYTELLER_LATENCY_SCALE", "-1")])).is_err());
    }
}
