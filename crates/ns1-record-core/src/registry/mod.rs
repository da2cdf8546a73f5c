//! Plugin-based client registry
//!
//! The registry lets record clients be registered at runtime, so the host
//! selects an implementation by configuration instead of a hardcoded match.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ns1_record_core::registry::ClientRegistry;
//! use ns1_record_core::config::ProviderConfig;
//!
//! let registry = ClientRegistry::new();
//!
//! // The host's NS1 HTTP client library registers itself under "ns1"
//! registry.register_client("ns1", Box::new(ns1_http_factory));
//!
//! let config = ProviderConfig::from_env()?;
//! let client = registry.create_client(&config)?;
//! ```

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::traits::{RecordClient, RecordClientFactory};
use std::collections::HashMap;
use std::sync::RwLock;

/// Registry of record client factories
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ClientRegistry {
    clients: RwLock<HashMap<String, Box<dyn RecordClientFactory>>>,
}

impl ClientRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client factory under `name`, replacing any previous one
    pub fn register_client(&self, name: impl Into<String>, factory: Box<dyn RecordClientFactory>) {
        let name = name.into();
        tracing::debug!(client = %name, "Registering record client");
        let mut clients = self.clients.write().unwrap();
        clients.insert(name, factory);
    }

    /// Create a record client from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn RecordClient>)`: Created client instance
    /// - `Err(Error)`: If the configuration is invalid, the client type is
    ///   not registered, or creation fails
    pub fn create_client(&self, config: &ProviderConfig) -> Result<Box<dyn RecordClient>> {
        config.validate()?;

        let client_type = config.type_name();
        let clients = self.clients.read().unwrap();

        let factory = clients
            .get(client_type)
            .ok_or_else(|| Error::config(format!("Unknown client type: {}", client_type)))?;

        factory.create(config)
    }

    /// List all registered client types
    pub fn list_clients(&self) -> Vec<String> {
        let clients = self.clients.read().unwrap();
        let mut names: Vec<String> = clients.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a client type is registered
    pub fn has_client(&self, name: &str) -> bool {
        let clients = self.clients.read().unwrap();
        clients.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockClientFactory;

    impl RecordClientFactory for MockClientFactory {
        fn create(&self, _config: &ProviderConfig) -> Result<Box<dyn RecordClient>> {
            Err(Error::not_found("Mock client not implemented"))
        }
    }

    #[test]
    fn test_registry_registration() {
        let registry = ClientRegistry::new();

        // Initially empty
        assert!(!registry.has_client("mock"));

        registry.register_client("mock", Box::new(MockClientFactory));

        assert!(registry.has_client("mock"));
        assert!(registry.list_clients().contains(&"mock".to_string()));
    }

    #[test]
    fn test_create_memory_client() {
        let registry = ClientRegistry::new();
        crate::client::register(&registry);

        let client = registry.create_client(&ProviderConfig::Memory).unwrap();
        assert_eq!(client.client_name(), "memory");
    }

    #[test]
    fn test_unknown_client_type() {
        let registry = ClientRegistry::new();
        let config = ProviderConfig::Ns1 {
            api_key: "key".to_string(),
            endpoint: None,
            ignore_ssl: false,
        };

        let err = registry.create_client(&config).err().unwrap();
        assert!(err.to_string().contains("Unknown client type: ns1"));
    }

    #[test]
    fn test_invalid_config_rejected_before_lookup() {
        let registry = ClientRegistry::new();
        registry.register_client("mock", Box::new(MockClientFactory));

        let config = ProviderConfig::Custom {
            factory: "mock".to_string(),
            config: serde_json::Value::Null,
        };
        let err = registry.create_client(&config).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
