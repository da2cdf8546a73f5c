// # Record Client Trait
//
// Defines the interface to the remote NS1 record API.
//
// ## Implementations
//
// - In-memory: `client::MemoryRecordClient`
// - HTTP: supplied by the host's NS1 client library and registered under "ns1"
//
// ## Usage
//
// ```rust,ignore
// use ns1_record_core::{RecordClient, RecordType};
//
// #[tokio::main]
// async fn main() -> ns1_record_core::Result<()> {
//     let client = /* RecordClient implementation */;
//
//     let record = client.get("example.com", "www.example.com", RecordType::A).await?;
//     println!("{} answers", record.answers.len());
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::model::{Record, RecordType};

/// Trait for NS1 record API clients
///
/// # Trust Level: Untrusted
///
/// Clients are thin adapters over the provider API:
///
/// ## Allowed Capabilities
/// - ✅ Perform one API call per method invocation
/// - ✅ Parse provider responses into [`Record`]
/// - ✅ Return success or failure
///
/// ## Forbidden Capabilities
/// - ❌ Retry or back off (the orchestration host owns that)
/// - ❌ Cache records between calls
/// - ❌ Rewrite the record beyond what the provider returned
///
/// Errors are propagated to the host unchanged.
#[async_trait]
pub trait RecordClient: Send + Sync {
    /// Create a record; returns the record as stored by the provider
    async fn create(&self, record: &Record) -> Result<Record, crate::Error>;

    /// Fetch the record identified by (zone, domain, type)
    async fn get(
        &self,
        zone: &str,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Record, crate::Error>;

    /// Replace an existing record; returns the record as stored by the provider
    async fn update(&self, record: &Record) -> Result<Record, crate::Error>;

    /// Delete the record identified by (zone, domain, type)
    async fn delete(
        &self,
        zone: &str,
        domain: &str,
        record_type: RecordType,
    ) -> Result<(), crate::Error>;

    /// Client name (for logging/debugging)
    fn client_name(&self) -> &'static str;
}

/// Helper trait for constructing record clients from configuration
pub trait RecordClientFactory: Send + Sync {
    /// Create a RecordClient instance from configuration
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn RecordClient>, crate::Error>;
}
