//! Test doubles and common utilities for contract tests
//!
//! This module provides minimal test doubles that verify the lifecycle
//! contract without a real provider.

#![allow(dead_code)]

use ns1_record_core::error::{Error, Result};
use ns1_record_core::model::{Georegion, MetaField, Record, RecordType};
use ns1_record_core::schema::{AnswerConfig, FilterConfig, MetaConfig, RecordConfig, RegionConfig};
use ns1_record_core::traits::RecordClient;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A client that records every call and echoes records back
pub struct RecordingClient {
    create_call_count: Arc<AtomicUsize>,
    get_call_count: Arc<AtomicUsize>,
    update_call_count: Arc<AtomicUsize>,
    delete_call_count: Arc<AtomicUsize>,
    /// Records passed to create()/update()
    sent: Arc<std::sync::Mutex<Vec<Record>>>,
    /// Record returned by get()
    remote: Arc<std::sync::Mutex<Option<Record>>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self {
            create_call_count: Arc::new(AtomicUsize::new(0)),
            get_call_count: Arc::new(AtomicUsize::new(0)),
            update_call_count: Arc::new(AtomicUsize::new(0)),
            delete_call_count: Arc::new(AtomicUsize::new(0)),
            sent: Arc::new(std::sync::Mutex::new(Vec::new())),
            remote: Arc::new(std::sync::Mutex::new(None)),
        }
    }

    /// Stage the record get() returns
    pub fn with_remote(self, record: Record) -> Self {
        *self.remote.lock().unwrap() = Some(record);
        self
    }

    pub fn create_call_count(&self) -> usize {
        self.create_call_count.load(Ordering::SeqCst)
    }

    pub fn get_call_count(&self) -> usize {
        self.get_call_count.load(Ordering::SeqCst)
    }

    pub fn update_call_count(&self) -> usize {
        self.update_call_count.load(Ordering::SeqCst)
    }

    pub fn delete_call_count(&self) -> usize {
        self.delete_call_count.load(Ordering::SeqCst)
    }

    /// Total remote calls of any kind
    pub fn total_calls(&self) -> usize {
        self.create_call_count()
            + self.get_call_count()
            + self.update_call_count()
            + self.delete_call_count()
    }

    /// Records sent to the provider, in call order
    pub fn sent(&self) -> Vec<Record> {
        self.sent.lock().unwrap().clone()
    }
}

fn stamp(record: &Record) -> Record {
    let mut stored = record.clone();
    if stored.id.is_empty() {
        stored.id = "rec-0001".to_string();
    }
    if stored.ttl == 0 {
        stored.ttl = 3600;
    }
    stored
}

#[async_trait::async_trait]
impl RecordClient for RecordingClient {
    async fn create(&self, record: &Record) -> Result<Record> {
        self.create_call_count.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(record.clone());
        Ok(stamp(record))
    }

    async fn get(&self, zone: &str, domain: &str, record_type: RecordType) -> Result<Record> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);
        self.remote
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::not_found(format!("{}/{}/{}", zone, domain, record_type)))
    }

    async fn update(&self, record: &Record) -> Result<Record> {
        self.update_call_count.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(record.clone());
        Ok(stamp(record))
    }

    async fn delete(&self, _zone: &str, _domain: &str, _record_type: RecordType) -> Result<()> {
        self.delete_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn client_name(&self) -> &'static str {
        "recording"
    }
}

/// A client whose every call fails with a client error
pub struct FailingClient {
    pub message: &'static str,
}

#[async_trait::async_trait]
impl RecordClient for FailingClient {
    async fn create(&self, _record: &Record) -> Result<Record> {
        Err(Error::client("failing", self.message))
    }

    async fn get(&self, _zone: &str, _domain: &str, _record_type: RecordType) -> Result<Record> {
        Err(Error::client("failing", self.message))
    }

    async fn update(&self, _record: &Record) -> Result<Record> {
        Err(Error::client("failing", self.message))
    }

    async fn delete(&self, _zone: &str, _domain: &str, _record_type: RecordType) -> Result<()> {
        Err(Error::client("failing", self.message))
    }

    fn client_name(&self) -> &'static str {
        "failing"
    }
}

/// Minimal A record with one answer
pub fn simple_a_config() -> RecordConfig {
    RecordConfig::new("example.com", "www.example.com", RecordType::A)
        .with_answer(AnswerConfig::new("1.2.3.4"))
}

/// A record exercising answers with meta, regions and filters
///
/// Every value is already in canonical form, so it survives a round trip.
pub fn steering_config() -> RecordConfig {
    RecordConfig::new("example.com", "www.example.com", RecordType::A)
        .with_ttl(60)
        .with_use_client_subnet(true)
        .with_answer(
            AnswerConfig::new("1.2.3.4")
                .with_region("east")
                .with_meta(MetaConfig::value(MetaField::Up, "1"))
                .with_meta(MetaConfig::value(MetaField::Country, "CA,US"))
                .with_meta(MetaConfig::value(MetaField::Weight, "2.5"))
                .with_meta(MetaConfig::feed(MetaField::Connections, "conn-feed")),
        )
        .with_answer(
            AnswerConfig::new("5.6.7.8")
                .with_region("west")
                .with_meta(MetaConfig::value(MetaField::Georegion, "US-WEST"))
                .with_meta(MetaConfig::value(MetaField::Priority, "2"))
                .with_meta(MetaConfig::value(MetaField::Note, "backup")),
        )
        .with_region(
            RegionConfig::new("east")
                .with_georegion(Georegion::UsEast)
                .with_country("US")
                .with_us_state("NY")
                .with_up(true),
        )
        .with_region(RegionConfig::new("west").with_georegion(Georegion::UsWest))
        .with_filter(FilterConfig::new("up"))
        .with_filter(FilterConfig::new("geotarget_country"))
        .with_filter(FilterConfig::new("select_first_n").with_config("N", "1"))
}
