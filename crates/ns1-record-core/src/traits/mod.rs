//! Core traits for the record mapper
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`RecordClient`]: Remote NS1 record API

pub mod record_client;

pub use record_client::{RecordClient, RecordClientFactory};
