//! # Client Settings
//!
//! Everything the transport needs to reach the remote service. Settings are
//! read once, before the transport is built; the base address cannot change
//! while requests are in flight.
//!
//! # Environment Variables
//!
//! - `REMOTE_CRUD_BASE_URL` - base address of the remote API (default `http://localhost:5000/api/`)
//! - `REMOTE_CRUD_TIMEOUT_SECS` - per-request timeout in seconds (default `30`)
//! - `REMOTE_CRUD_USER_AGENT` - user agent sent with every request

use serde::Deserialize;
use std::env;
use std::time::Duration;
use url::Url;

pub const BASE_URL_VAR: &str = "REMOTE_CRUD_BASE_URL";
pub const TIMEOUT_VAR: &str = "REMOTE_CRUD_TIMEOUT_SECS";
pub const USER_AGENT_VAR: &str = "REMOTE_CRUD_USER_AGENT";

const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid base address '{value}': {reason}")]
    InvalidBaseAddress { value: String, reason: String },
    #[error("Invalid timeout '{0}': expected whole seconds")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    #[serde(deserialize_with = "deserialize_base_address")]
    pub base_address: Url,
    #[serde(with = "seconds")]
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            // DEFAULT_BASE_URL is an absolute http URL, so this cannot fail
            base_address: parse_base_address(DEFAULT_BASE_URL)
                .unwrap_or_else(|_| unreachable!("default base address is valid")),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientSettings {
    /// Reads settings from the process environment, falling back to defaults
    /// for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Self::default();
        if let Some(value) = lookup(BASE_URL_VAR) {
            settings.base_address = parse_base_address(&value)?;
        }
        if let Some(value) = lookup(TIMEOUT_VAR) {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(value.clone()))?;
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(value) = lookup(USER_AGENT_VAR) {
            settings.user_agent = value;
        }
        Ok(settings)
    }

    pub fn with_base_address(mut self, value: &str) -> Result<Self, ConfigError> {
        self.base_address = parse_base_address(value)?;
        Ok(self)
    }
}

/// Parses a base address and makes sure it ends in `/`, so relative resource
/// paths join beneath it instead of replacing its last segment.
pub fn parse_base_address(value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value.trim()).map_err(|e| ConfigError::InvalidBaseAddress {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseAddress {
            value: value.to_string(),
            reason: "not a base URL".to_string(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn deserialize_base_address<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_base_address(&raw).map_err(serde::de::Error::custom)
}

fn default_user_agent() -> String {
    format!("remote-crud/{}", env!("CARGO_PKG_VERSION"))
}

mod seconds {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = ClientSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, ClientSettings::default());
        assert_eq!(settings.base_address.as_str(), "http://localhost:5000/api/");
        assert!(settings.user_agent.starts_with("remote-crud/"));
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let settings = ClientSettings::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://crm.example.com/v2"),
            (TIMEOUT_VAR, "5"),
            (USER_AGENT_VAR, "tests"),
        ]))
        .unwrap();
        assert_eq!(settings.base_address.as_str(), "https://crm.example.com/v2/");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.user_agent, "tests");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ClientSettings::from_lookup(lookup(&[(BASE_URL_VAR, "not a url")])),
            Err(ConfigError::InvalidBaseAddress { .. })
        ));
        assert_eq!(
            ClientSettings::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])),
            Err(ConfigError::InvalidTimeout("soon".to_string()))
        );
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{"baseAddress":"http://svc:8080/api","timeout":10,"userAgent":"x"}"#;
        let settings: ClientSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.base_address.as_str(), "http://svc:8080/api/");
    }
}
