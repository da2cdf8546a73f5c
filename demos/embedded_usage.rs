//! Minimal embedding example for ns1-record-core
//!
//! This example plays the orchestration host: it holds a record
//! configuration, picks a client through the registry and drives the
//! Create/Read/Update/Delete lifecycle against the in-process client.

use ns1_record_core::schema::{AnswerConfig, FilterConfig, MetaConfig, RegionConfig};
use ns1_record_core::{
    ClientRegistry, Georegion, MetaField, ProviderConfig, RecordConfig, RecordType, resource,
};
use std::env;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn log_level() -> Level {
    let raw = env::var("NS1_RECORD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    match raw.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn desired_state() -> RecordConfig {
    RecordConfig::new("example.com", "www.example.com", RecordType::A)
        .with_ttl(60)
        .with_answer(
            AnswerConfig::new("192.0.2.10")
                .with_region("east")
                .with_meta(MetaConfig::feed(MetaField::Up, "east-monitor"))
                .with_meta(MetaConfig::value(MetaField::Weight, "3")),
        )
        .with_answer(
            AnswerConfig::new("198.51.100.20")
                .with_region("west")
                .with_meta(MetaConfig::value(MetaField::Up, "1"))
                .with_meta(MetaConfig::value(MetaField::Country, "US,CA")),
        )
        .with_region(
            RegionConfig::new("east")
                .with_georegion(Georegion::UsEast)
                .with_up(true),
        )
        .with_region(RegionConfig::new("west").with_georegion(Georegion::UsWest))
        .with_filter(FilterConfig::new("up"))
        .with_filter(FilterConfig::new("select_first_n").with_config("N", "1"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(log_level()).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("=== Embedded ns1-record-core Example ===\n");

    // A real host would register its NS1 HTTP client here as well
    println!("1. Building client from configuration...");
    let registry = ClientRegistry::new();
    ns1_record_core::client::register(&registry);
    let client = registry.create_client(&ProviderConfig::Memory)?;
    info!(clients = ?registry.list_clients(), "Registry ready");

    println!("2. Create");
    let mut state = desired_state();
    resource::create(&*client, &mut state).await?;
    println!("{}\n", serde_json::to_string_pretty(&state)?);

    println!("3. Update (ttl 60 -> 300, drop the west answer)");
    let mut planned = state.clone();
    planned.ttl = Some(300);
    planned.answers = state
        .answers
        .iter()
        .filter(|a| a.region.as_deref() != Some("west"))
        .cloned()
        .collect();
    if planned.requires_replacement(&state) {
        anyhow::bail!("plan unexpectedly requires replacement");
    }
    resource::update(&*client, &mut planned).await?;

    println!("4. Read");
    let mut refreshed = RecordConfig::new("example.com", "www.example.com", RecordType::A);
    resource::read(&*client, &mut refreshed).await?;
    println!("{}\n", serde_json::to_string_pretty(&refreshed)?);

    println!("5. Delete");
    resource::delete(&*client, &mut refreshed).await?;
    println!("   id after delete: {:?}", refreshed.id);

    println!("\n=== Embedding Successful ===");
    println!("Key Points:");
    println!("- The host owns state; the library never caches it");
    println!("- Client is chosen by configuration through the registry");
    println!("- Each lifecycle step makes exactly one client call");

    Ok(())
}
