// # Record Client Implementations
//
// This module provides implementations of the RecordClient trait that ship
// with the crate. The NS1 HTTP client lives in the host's client library.

pub mod memory;

pub use memory::{MemoryRecordClient, MemoryRecordClientFactory};

/// Register the built-in clients with a registry
///
/// # Example
///
/// ```rust
/// use ns1_record_core::ClientRegistry;
///
/// let registry = ClientRegistry::new();
/// ns1_record_core::client::register(&registry);
/// assert!(registry.has_client("memory"));
/// ```
pub fn register(registry: &crate::ClientRegistry) {
    registry.register_client("memory", Box::new(MemoryRecordClientFactory));
}
