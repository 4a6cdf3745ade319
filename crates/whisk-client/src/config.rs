//! Client configuration: endpoint, credentials, namespace and transport settings

use crate::error::{ClientError, ClientResult};
use crate::messages;
use serde::{Deserialize, Serialize};
use std::env;

pub const ENV_API_HOST: &str = "__OW_API_HOST";
pub const ENV_API_KEY: &str = "__OW_API_KEY";
pub const ENV_NAMESPACE: &str = "__OW_NAMESPACE";
pub const ENV_IGNORE_CERTS: &str = "__OW_IGNORE_CERTS";
pub const ENV_TIMEOUT_MS: &str = "WHISK_TIMEOUT_MS";

/// Namespace placeholder resolved server-side to the caller's own namespace
pub const DEFAULT_NAMESPACE: &str = "_";

const API_PATH: &str = "/api/v1/";

/// Timeout configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub connect_ms: u64,
    pub total_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: 10_000, // 10 seconds
            total_ms: 60_000,   // 60 seconds
        }
    }
}

impl TimeoutConfig {
    /// Total timeout only; the connect timeout never exceeds it
    pub fn with_total(total_ms: u64) -> Self {
        let defaults = Self::default();
        Self {
            connect_ms: defaults.connect_ms.min(total_ms),
            total_ms,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Host name or URL of the platform, e.g. `openwhisk.example.com`
    #[serde(default)]
    pub api_host: Option<String>,

    /// Full API root; takes precedence over `api_host` when set
    #[serde(default)]
    pub api: Option<String>,

    /// `user:password` credential pair
    #[serde(default)]
    pub api_key: Option<String>,

    /// Default namespace for identifiers that do not carry one
    #[serde(default)]
    pub namespace: Option<String>,

    /// Accept self-signed certificates
    #[serde(default)]
    pub ignore_certs: bool,

    /// Unset means `TimeoutConfig::default()`
    #[serde(default)]
    pub timeout: Option<TimeoutConfig>,
}

impl ClientConfig {
    pub fn new(api_host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_host: Some(api_host.into()),
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Load configuration from the platform's standard environment variables
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        let timeout = var(ENV_TIMEOUT_MS)
            .and_then(|v| v.parse::<u64>().ok())
            .map(TimeoutConfig::with_total);

        Self {
            api_host: var(ENV_API_HOST),
            api: None,
            api_key: var(ENV_API_KEY),
            namespace: var(ENV_NAMESPACE),
            ignore_certs: var(ENV_IGNORE_CERTS)
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            timeout,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_ignore_certs(mut self, ignore_certs: bool) -> Self {
        self.ignore_certs = ignore_certs;
        self
    }

    pub fn with_timeout(mut self, timeout: TimeoutConfig) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> TimeoutConfig {
        self.timeout.clone().unwrap_or_default()
    }

    /// Overlay explicitly set fields of `other` onto this configuration
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.api_host.is_some() {
            self.api_host = other.api_host;
        }
        if other.api.is_some() {
            self.api = other.api;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.namespace.is_some() {
            self.namespace = other.namespace;
        }
        self.ignore_certs |= other.ignore_certs;
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }
        self
    }

    pub fn validate(&self) -> ClientResult<()> {
        self.api_url()?;
        self.credentials()?;
        let timeout = self.timeout();
        if timeout.total_ms == 0 {
            return Err(ClientError::Config("total timeout must be greater than 0".into()));
        }
        if timeout.connect_ms > timeout.total_ms {
            return Err(ClientError::Config(
                "connect timeout cannot exceed total timeout".into(),
            ));
        }
        Ok(())
    }

    /// Root URL every resource path is joined onto, always ending in `/`
    pub fn api_url(&self) -> ClientResult<String> {
        if let Some(api) = self.api.as_deref().filter(|a| !a.is_empty()) {
            return Ok(if api.ends_with('/') {
                api.to_string()
            } else {
                format!("{}/", api)
            });
        }

        let host = self
            .api_host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ClientError::Config(messages::MISSING_URL_ERROR.into()))?;

        let host = host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            Ok(format!("{}{}", host, API_PATH))
        } else {
            Ok(format!("https://{}{}", host, API_PATH))
        }
    }

    /// Split the api key into its basic-auth user and password
    pub fn credentials(&self) -> ClientResult<(String, String)> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ClientError::Config(messages::MISSING_AUTH_ERROR.into()))?;

        match key.split_once(':') {
            Some((user, pass)) if !user.is_empty() && !pass.is_empty() => {
                Ok((user.to_string(), pass.to_string()))
            }
            _ => Err(ClientError::Config(messages::INVALID_AUTH_ERROR.into())),
        }
    }

    pub fn default_namespace(&self) -> &str {
        self.namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .unwrap_or(DEFAULT_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_from_host() {
        let config = ClientConfig::new("whisk.example.com", "user:pass");
        assert_eq!(config.api_url().unwrap(), "https://whisk.example.com/api/v1/");

        let config = ClientConfig::new("http://localhost:3233/", "user:pass");
        assert_eq!(config.api_url().unwrap(), "http://localhost:3233/api/v1/");
    }

    #[test]
    fn test_explicit_api_wins() {
        let mut config = ClientConfig::new("ignored.example.com", "user:pass");
        config.api = Some("https://gw.example.com/custom".into());
        assert_eq!(config.api_url().unwrap(), "https://gw.example.com/custom/");
    }

    #[test]
    fn test_missing_host_and_key() {
        let config = ClientConfig::default();
        assert!(matches!(config.api_url(), Err(ClientError::Config(_))));
        assert!(matches!(config.credentials(), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_malformed_key() {
        for key in ["nocolon", ":pass", "user:"] {
            let config = ClientConfig::new("h", key);
            let err = config.credentials().unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Invalid configuration: {}", messages::INVALID_AUTH_ERROR)
            );
        }
    }

    #[test]
    fn test_credentials_split_on_first_colon() {
        let config = ClientConfig::new("h", "user:pa:ss");
        assert_eq!(
            config.credentials().unwrap(),
            ("user".to_string(), "pa:ss".to_string())
        );
    }

    #[test]
    fn test_default_namespace() {
        let config = ClientConfig::new("h", "u:p");
        assert_eq!(config.default_namespace(), DEFAULT_NAMESPACE);
        assert_eq!(config.with_namespace("guest").default_namespace(), "guest");
    }

    #[test]
    fn test_merge_overlays_set_fields() {
        let base = ClientConfig::new("a.example.com", "u:p").with_namespace("base");
        let overlay = ClientConfig {
            namespace: Some("override".into()),
            ignore_certs: true,
            ..Default::default()
        };
        let merged = base.merge(overlay);
        assert_eq!(merged.api_host.as_deref(), Some("a.example.com"));
        assert_eq!(merged.namespace.as_deref(), Some("override"));
        assert!(merged.ignore_certs);
    }

    #[test]
    fn test_short_env_timeout_builds_valid_config() {
        env::set_var(ENV_TIMEOUT_MS, "5000");
        let config = ClientConfig::from_env().merge(ClientConfig::new("h.example.com", "u:p"));
        env::remove_var(ENV_TIMEOUT_MS);

        assert_eq!(
            config.timeout(),
            TimeoutConfig {
                connect_ms: 5_000,
                total_ms: 5_000
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_total_keeps_default_connect_when_larger() {
        assert_eq!(TimeoutConfig::with_total(30_000).connect_ms, 10_000);
        assert_eq!(TimeoutConfig::with_total(2_000).connect_ms, 2_000);
        assert!(ClientConfig::new("h", "u:p")
            .with_timeout(TimeoutConfig::with_total(1_500))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_merge_explicit_default_timeout_overrides() {
        let base = ClientConfig::new("h", "u:p").with_timeout(TimeoutConfig::with_total(5_000));
        let overlay = ClientConfig::default().with_timeout(TimeoutConfig::default());
        assert_eq!(base.clone().merge(overlay).timeout(), TimeoutConfig::default());

        // no timeout in the overlay keeps the base one
        let merged = base.merge(ClientConfig::default());
        assert_eq!(merged.timeout().total_ms, 5_000);
    }

    #[test]
    fn test_validate_timeouts() {
        let config = ClientConfig::new("h", "u:p").with_timeout(TimeoutConfig {
            connect_ms: 5_000,
            total_ms: 1_000,
        });
        assert!(config.validate().is_err());
        assert!(ClientConfig::new("h", "u:p").validate().is_ok());
    }
}
