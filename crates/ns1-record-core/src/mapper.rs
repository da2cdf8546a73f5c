//! Bidirectional mapping between [`RecordConfig`] and [`Record`]
//!
//! ## Direction: configuration → record
//!
//! 1. Validate (link and answers are mutually exclusive)
//! 2. Build one [`Answer`] per configured answer; TXT rdata stays opaque,
//!    every other type is split on whitespace
//! 3. Bind meta fields: a feed wins over a literal value; literals are parsed
//!    per field type
//! 4. Copy filters (integer-looking config values become integers) and
//!    regions (each single value becomes a one-element list)
//!
//! ## Direction: record → configuration
//!
//! The inverse, with one documented loss: a region whose list metadata holds
//! several values keeps only the first one, because the configuration layer
//! has a single slot per region field.

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Answer, Filter, FilterValue, Meta, MetaBinding, MetaField, MetaValue, Record, Region};
use crate::schema::{AnswerConfig, FilterConfig, MetaConfig, RecordConfig, RegionConfig, SchemaSet};

/// Build a provider record from configuration
///
/// # Errors
///
/// - [`crate::Error::Conflict`] when both `link` and `answers` are set
/// - [`crate::Error::InvalidInput`] for malformed meta values or identity fields
pub fn config_to_record(config: &RecordConfig) -> Result<Record> {
    config.validate()?;

    let mut record = Record::new(&config.zone, &config.domain, config.record_type);
    record.id = config.id.clone().unwrap_or_default();

    if !config.answers.is_empty() {
        let answers = config
            .answers
            .iter()
            .map(|answer| answer_from_config(&record, answer))
            .collect::<Result<Vec<_>>>()?;
        record.answers = answers;
    }

    if let Some(ttl) = config.ttl {
        record.ttl = ttl;
    }

    if let Some(link) = config.link_target() {
        record.link_to(link);
    }

    record.use_client_subnet = config.use_client_subnet;
    record.filters = config.filters.iter().map(filter_from_config).collect();
    record.regions = config
        .regions
        .iter()
        .map(|region| (region.name.clone(), region_from_config(region)))
        .collect();

    debug!(
        record = %record.key(),
        answers = record.answers.len(),
        regions = record.regions.len(),
        filters = record.filters.len(),
        "Mapped configuration to record"
    );

    Ok(record)
}

fn answer_from_config(record: &Record, config: &AnswerConfig) -> Result<Answer> {
    let mut answer = record.answer_for(&config.answer);
    answer.region_name = config.region_name().map(str::to_string);

    for entry in &config.meta {
        if let Some(feed) = entry.feed_name() {
            if entry.literal().is_some() {
                debug!(
                    field = %entry.field,
                    feed,
                    "Meta entry has both feed and value; using the feed"
                );
            }
            answer.meta.set_feed(entry.field, feed);
        } else if let Some(value) = entry.literal() {
            answer.meta.set_literal(entry.field, value)?;
        }
    }

    Ok(answer)
}

fn filter_from_config(config: &FilterConfig) -> Filter {
    let mut filter = Filter::new(&config.filter);
    filter.disabled = config.disabled;
    filter.config = config
        .config
        .iter()
        .map(|(key, value)| (key.clone(), FilterValue::coerce(value)))
        .collect();
    filter
}

fn region_from_config(config: &RegionConfig) -> Region {
    let mut meta = Meta::default();

    if let Some(georegion) = config.georegion {
        meta.georegion = Some(MetaValue::Literal(vec![georegion]));
    }
    if let Some(country) = config.country.as_deref().filter(|s| !s.is_empty()) {
        meta.country = Some(MetaValue::Literal(vec![country.to_string()]));
    }
    if let Some(us_state) = config.us_state.as_deref().filter(|s| !s.is_empty()) {
        meta.us_state = Some(MetaValue::Literal(vec![us_state.to_string()]));
    }
    if config.up {
        meta.up = Some(MetaValue::Literal(true));
    }

    Region { meta }
}

/// Build a fresh configuration from a provider record
pub fn record_to_config(record: &Record) -> RecordConfig {
    let mut config = RecordConfig::new(&record.zone, &record.domain, record.record_type);
    apply_record(&mut config, record);
    config
}

/// Write a provider record back into existing configuration state
///
/// Identity, TTL and the client-subnet flag are always written. `link`,
/// `filters`, `answers` and `regions` are only overwritten when the record
/// carries them, so configured values survive a sparse response.
pub fn apply_record(config: &mut RecordConfig, record: &Record) {
    config.id = (!record.id.is_empty()).then(|| record.id.clone());
    config.zone = record.zone.clone();
    config.domain = record.domain.clone();
    config.record_type = record.record_type;
    if record.ttl != 0 {
        config.ttl = Some(record.ttl);
    }
    config.use_client_subnet = record.use_client_subnet;

    if let Some(link) = record.link.as_deref().filter(|s| !s.is_empty()) {
        config.link = Some(link.to_string());
    }

    if !record.filters.is_empty() {
        config.filters = record.filters.iter().map(filter_to_config).collect();
    }

    if !record.answers.is_empty() {
        config.answers = record.answers.iter().map(answer_to_config).collect();
    }

    if !record.regions.is_empty() {
        config.regions = record
            .regions
            .iter()
            .map(|(name, region)| region_to_config(name, region))
            .collect();
    }

    debug!(
        record = %record.key(),
        answers = config.answers.len(),
        regions = config.regions.len(),
        "Mapped record to configuration"
    );
}

fn answer_to_config(answer: &Answer) -> AnswerConfig {
    let meta: SchemaSet<MetaConfig> = answer
        .meta
        .bindings()
        .into_iter()
        .map(|(field, binding)| match binding {
            MetaBinding::Value(value) => MetaConfig::value(field, value),
            MetaBinding::Feed(feed) => MetaConfig::feed(field, feed),
        })
        .collect();

    AnswerConfig {
        answer: answer.rdata_string(),
        region: answer.region_name.clone().filter(|s| !s.is_empty()),
        meta,
    }
}

fn filter_to_config(filter: &Filter) -> FilterConfig {
    FilterConfig {
        filter: filter.filter_type.clone(),
        disabled: filter.disabled,
        config: filter
            .config
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect(),
    }
}

/// First literal of a region list field
fn first_value<'a, T>(
    slot: &'a Option<MetaValue<Vec<T>>>,
    region: &str,
    field: MetaField,
) -> Option<&'a T> {
    match slot.as_ref()? {
        MetaValue::Literal(values) => {
            if values.len() > 1 {
                warn!(
                    region,
                    field = %field,
                    dropped = values.len() - 1,
                    "Region meta holds several values; keeping only the first"
                );
            }
            values.first()
        }
        MetaValue::Feed(ptr) => {
            warn!(
                region,
                field = %field,
                feed = %ptr.feed,
                "Feed-bound region meta cannot be expressed in configuration"
            );
            None
        }
    }
}

fn region_to_config(name: &str, region: &Region) -> RegionConfig {
    let meta = &region.meta;
    RegionConfig {
        name: name.to_string(),
        georegion: first_value(&meta.georegion, name, MetaField::Georegion).copied(),
        country: first_value(&meta.country, name, MetaField::Country).cloned(),
        us_state: first_value(&meta.us_state, name, MetaField::UsState).cloned(),
        up: matches!(meta.up, Some(MetaValue::Literal(true))),
    }
}
