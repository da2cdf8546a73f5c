//! Record resource lifecycle
//!
//! The orchestration host decides when each operation runs; each one maps
//! the configuration, makes exactly one client call, and maps the result back
//! into the host's state.
//!
//! ```text
//!  RecordConfig ──config_to_record──▶ Record ──client──▶ Record ──apply_record──▶ RecordConfig
//! ```
//!
//! Any error aborts the whole operation. There are no retries and no partial
//! recovery; the host owns both.

use tracing::{info, instrument};

use crate::error::Result;
use crate::mapper::{apply_record, config_to_record};
use crate::schema::RecordConfig;
use crate::traits::RecordClient;

/// Create the record described by `state`
///
/// A configuration conflict is reported before the client is called.
#[instrument(
    name = "record.create",
    skip_all,
    fields(zone = %state.zone, domain = %state.domain, record_type = %state.record_type)
)]
pub async fn create(client: &dyn RecordClient, state: &mut RecordConfig) -> Result<()> {
    let record = config_to_record(state)?;
    let created = client.create(&record).await?;
    apply_record(state, &created);
    info!(id = %created.id, client = client.client_name(), "Created record");
    Ok(())
}

/// Refresh `state` from the provider
#[instrument(
    name = "record.read",
    skip_all,
    fields(zone = %state.zone, domain = %state.domain, record_type = %state.record_type)
)]
pub async fn read(client: &dyn RecordClient, state: &mut RecordConfig) -> Result<()> {
    let record = client
        .get(&state.zone, &state.domain, state.record_type)
        .await?;
    apply_record(state, &record);
    info!(id = %record.id, client = client.client_name(), "Read record");
    Ok(())
}

/// Push the configuration in `state` to the provider
#[instrument(
    name = "record.update",
    skip_all,
    fields(zone = %state.zone, domain = %state.domain, record_type = %state.record_type)
)]
pub async fn update(client: &dyn RecordClient, state: &mut RecordConfig) -> Result<()> {
    let record = config_to_record(state)?;
    let updated = client.update(&record).await?;
    apply_record(state, &updated);
    info!(id = %updated.id, client = client.client_name(), "Updated record");
    Ok(())
}

/// Delete the record; the id is cleared even when the client fails
#[instrument(
    name = "record.delete",
    skip_all,
    fields(zone = %state.zone, domain = %state.domain, record_type = %state.record_type)
)]
pub async fn delete(client: &dyn RecordClient, state: &mut RecordConfig) -> Result<()> {
    let result = client
        .delete(&state.zone, &state.domain, state.record_type)
        .await;
    state.id = None;
    if result.is_ok() {
        info!(client = client.client_name(), "Deleted record");
    }
    result
}
