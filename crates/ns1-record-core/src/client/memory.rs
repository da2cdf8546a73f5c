// # Memory Record Client
//
// In-memory implementation of RecordClient.
//
// ## Purpose
//
// Stands in for the NS1 API when no network is wanted: unit and contract
// tests, demos, and hosts that run offline plans.
//
// ## Provider Behaviour Mirrored
//
// - Records are keyed by (zone, domain, type)
// - Creating an existing record is a conflict
// - A record carrying both a link and answers is rejected as a conflict
// - Reading, updating or deleting a missing record is "not found"
// - The provider assigns the id and a default TTL of 3600 seconds
//
// All state is lost when the client is dropped.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::Error;
use crate::config::ProviderConfig;
use crate::model::{Record, RecordType};
use crate::traits::{RecordClient, RecordClientFactory};

/// TTL the provider applies when a record is created without one
pub const DEFAULT_TTL: u32 = 3600;

type RecordKey = (String, String, RecordType);

fn key(zone: &str, domain: &str, record_type: RecordType) -> RecordKey {
    (zone.to_string(), domain.to_string(), record_type)
}

fn describe(zone: &str, domain: &str, record_type: RecordType) -> String {
    format!("{}/{}/{}", zone, domain, record_type)
}

/// In-memory record client
///
/// Clones share the same record table.
///
/// # Example
///
/// ```rust,no_run
/// use ns1_record_core::client::MemoryRecordClient;
/// use ns1_record_core::model::{Answer, Record, RecordType};
/// use ns1_record_core::traits::RecordClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MemoryRecordClient::new();
///
///     let mut record = Record::new("example.com", "www.example.com", RecordType::A);
///     record.answers.push(Answer::from_rdata_str("1.2.3.4"));
///     let stored = client.create(&record).await?;
///
///     assert_eq!(stored.ttl, 3600);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordClient {
    inner: Arc<RwLock<HashMap<RecordKey, Record>>>,
    next_id: Arc<AtomicU64>,
    calls: Arc<AtomicUsize>,
}

impl MemoryRecordClient {
    /// Create a new empty client
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if no record is stored
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Total API calls served, successful or not
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Store a record as-is, bypassing create semantics
    ///
    /// Lets tests stage provider-side state the mapper would never produce.
    pub async fn insert_raw(&self, record: Record) {
        let mut guard = self.inner.write().await;
        guard.insert(
            key(&record.zone, &record.domain, record.record_type),
            record,
        );
    }

    fn allocate_id(&self) -> String {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{:024x}", id)
    }
}

#[async_trait]
impl RecordClient for MemoryRecordClient {
    async fn create(&self, record: &Record) -> Result<Record, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        record.validate()?;
        let mut guard = self.inner.write().await;

        let k = key(&record.zone, &record.domain, record.record_type);
        if guard.contains_key(&k) {
            return Err(Error::conflict(format!(
                "record already exists: {}",
                record.key()
            )));
        }

        let mut stored = record.clone();
        stored.id = self.allocate_id();
        if stored.ttl == 0 {
            stored.ttl = DEFAULT_TTL;
        }

        tracing::debug!(record = %stored.key(), id = %stored.id, "Stored record");
        guard.insert(k, stored.clone());
        Ok(stored)
    }

    async fn get(&self, zone: &str, domain: &str, record_type: RecordType) -> Result<Record, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let guard = self.inner.read().await;
        guard
            .get(&key(zone, domain, record_type))
            .cloned()
            .ok_or_else(|| Error::not_found(describe(zone, domain, record_type)))
    }

    async fn update(&self, record: &Record) -> Result<Record, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        record.validate()?;
        let mut guard = self.inner.write().await;

        let existing = guard
            .get_mut(&key(&record.zone, &record.domain, record.record_type))
            .ok_or_else(|| Error::not_found(record.key()))?;

        let mut stored = record.clone();
        stored.id = existing.id.clone();
        if stored.ttl == 0 {
            stored.ttl = existing.ttl;
        }

        *existing = stored.clone();
        Ok(stored)
    }

    async fn delete(&self, zone: &str, domain: &str, record_type: RecordType) -> Result<(), Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.inner.write().await;
        guard
            .remove(&key(zone, domain, record_type))
            .map(|_| ())
            .ok_or_else(|| Error::not_found(describe(zone, domain, record_type)))
    }

    fn client_name(&self) -> &'static str {
        "memory"
    }
}

/// Factory for creating in-memory clients
///
/// Every client it creates starts with an empty record table.
pub struct MemoryRecordClientFactory;

impl RecordClientFactory for MemoryRecordClientFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn RecordClient>, Error> {
        match config {
            ProviderConfig::Memory => Ok(Box::new(MemoryRecordClient::new())),
            _ => Err(Error::config("Invalid config for memory client")),
        }
    }
}
