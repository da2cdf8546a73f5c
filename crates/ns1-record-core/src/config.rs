//! Client configuration
//!
//! This module defines how the host selects and configures the record client.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Environment variable holding the NS1 API key
pub const ENV_API_KEY: &str = "NSONE_APIKEY";

/// Environment variable overriding the NS1 API endpoint
pub const ENV_ENDPOINT: &str = "NSONE_ENDPOINT";

/// Environment variable disabling TLS verification (`true`/`1`)
pub const ENV_IGNORE_SSL: &str = "NSONE_IGNORE_SSL";

/// Record client configuration
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// NS1 REST API
    Ns1 {
        /// API key
        api_key: String,
        /// Endpoint override (e.g. a private NS1 deployment)
        #[serde(default)]
        endpoint: Option<String>,
        /// Skip TLS certificate verification
        #[serde(default)]
        ignore_ssl: bool,
    },

    /// In-process client (tests, offline planning)
    #[default]
    Memory,

    /// Custom client
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// Load the NS1 configuration from `NSONE_*` environment variables
    pub fn from_env() -> Result<Self, crate::Error> {
        let api_key = env::var(ENV_API_KEY).map_err(|_| {
            crate::Error::config(format!(
                "{} is required. Set it via: export {}=your_key",
                ENV_API_KEY, ENV_API_KEY
            ))
        })?;

        let endpoint = env::var(ENV_ENDPOINT).ok().filter(|s| !s.is_empty());

        let ignore_ssl = match env::var(ENV_IGNORE_SSL) {
            Ok(raw) => match raw.to_lowercase().as_str() {
                "1" | "true" => true,
                "" | "0" | "false" => false,
                other => {
                    return Err(crate::Error::config(format!(
                        "{} must be true or false. Got: {}",
                        ENV_IGNORE_SSL, other
                    )));
                }
            },
            Err(_) => false,
        };

        let config = ProviderConfig::Ns1 {
            api_key,
            endpoint,
            ignore_ssl,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the client configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Ns1 {
                api_key, endpoint, ..
            } => {
                if api_key.is_empty() {
                    return Err(crate::Error::config("NS1 API key cannot be empty"));
                }
                if let Some(url) = endpoint
                    && !url.starts_with("https://")
                    && !url.starts_with("http://")
                {
                    return Err(crate::Error::config(format!(
                        "NS1 endpoint must use HTTP or HTTPS scheme. Got: {}",
                        url
                    )));
                }
                Ok(())
            }
            ProviderConfig::Memory => Ok(()),
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config("Custom client factory cannot be empty"));
                }
                if config.is_null() {
                    return Err(crate::Error::config("Custom client config cannot be null"));
                }
                Ok(())
            }
        }
    }

    /// Registry key of the client type
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Ns1 { .. } => "ns1",
            ProviderConfig::Memory => "memory",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

// Custom Debug implementation that hides the API key
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderConfig::Ns1 {
                endpoint,
                ignore_ssl,
                ..
            } => f
                .debug_struct("Ns1")
                .field("api_key", &"<REDACTED>")
                .field("endpoint", endpoint)
                .field("ignore_ssl", ignore_ssl)
                .finish(),
            ProviderConfig::Memory => f.write_str("Memory"),
            ProviderConfig::Custom { factory, config } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .field("config", config)
                .finish(),
        }
    }
}
