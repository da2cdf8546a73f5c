// # ns1-record-core
//
// Record mapper for an NS1-backed DNS record resource.
//
// ## Architecture Overview
//
// An orchestration host holds a declarative record configuration and calls
// Create/Read/Update/Delete on it. This library turns that configuration into
// NS1 record objects and back:
// - **RecordConfig**: Host-side configuration tree (`schema`)
// - **Record**: Provider-side record with typed metadata (`model`)
// - **mapper**: `config_to_record` / `record_to_config`
// - **SchemaSet**: Hash-keyed sets so unordered collections diff stably
// - **RecordClient**: Trait for the remote record API
// - **resource**: The four lifecycle operations
// - **ClientRegistry**: Plugin-based registry for record clients
//
// ## Design Principles
//
// 1. **Stateless**: Every call builds fresh objects; nothing is cached
// 2. **Typed**: Closed enums for record types, georegions and meta fields;
//    feed bindings are a variant, not an untyped value
// 3. **Injected client**: The client is passed into each operation
// 4. **Deterministic**: Set hashes depend on field values only

pub mod client;
pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod registry;
pub mod resource;
pub mod schema;
pub mod traits;

// Re-export core types for convenience
pub use client::MemoryRecordClient;
pub use config::ProviderConfig;
pub use error::{Error, Result};
pub use mapper::{apply_record, config_to_record, record_to_config};
pub use model::{Answer, Filter, FilterValue, Georegion, Meta, MetaField, MetaValue, Record, RecordType, Region};
pub use registry::ClientRegistry;
pub use schema::{AnswerConfig, FilterConfig, MetaConfig, RecordConfig, RegionConfig, SchemaSet};
pub use traits::{RecordClient, RecordClientFactory};
