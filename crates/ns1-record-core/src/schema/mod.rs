//! Host-side configuration tree for the record resource
//!
//! This module defines the shape in which the orchestration host hands a
//! record to us and in which we hand it back:
//!
//! ```json
//! {
//!   "zone": "example.com",
//!   "domain": "www.example.com",
//!   "type": "A",
//!   "answers": [
//!     {"answer": "1.2.3.4", "region": "east", "meta": [{"field": "up", "feed": "f1"}]}
//!   ],
//!   "regions": [{"name": "east", "georegion": "US-EAST", "up": true}],
//!   "filters": [{"filter": "up"}]
//! }
//! ```
//!
//! `answers`, answer `meta` and `regions` are [`SchemaSet`]s keyed by the
//! hashes in [`hash`]; `filters` is an ordered list.

pub mod hash;
pub mod set;

pub use hash::{SetHash, answer_hash, hash_string, meta_hash, region_hash};
pub use set::{SchemaSet, SetElement};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::{Georegion, MetaField, RecordType};

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// One `{field, feed | value}` entry of an answer's meta set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaConfig {
    pub field: MetaField,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl MetaConfig {
    /// Entry carrying a literal value
    pub fn value(field: MetaField, value: impl Into<String>) -> Self {
        Self {
            field,
            feed: None,
            value: Some(value.into()),
        }
    }

    /// Entry bound to a feed
    pub fn feed(field: MetaField, feed: impl Into<String>) -> Self {
        Self {
            field,
            feed: Some(feed.into()),
            value: None,
        }
    }

    /// Feed name, if set and non-empty
    pub fn feed_name(&self) -> Option<&str> {
        non_empty(&self.feed)
    }

    /// Literal value, if set and non-empty
    pub fn literal(&self) -> Option<&str> {
        non_empty(&self.value)
    }
}

impl SetElement for MetaConfig {
    fn set_hash(&self) -> SetHash {
        meta_hash(self)
    }
}

/// One answer of the record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerConfig {
    /// Rdata, space separated (opaque for TXT)
    pub answer: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "SchemaSet::is_empty")]
    pub meta: SchemaSet<MetaConfig>,
}

impl AnswerConfig {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            region: None,
            meta: SchemaSet::new(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_meta(mut self, meta: MetaConfig) -> Self {
        self.meta.insert(meta);
        self
    }

    /// Region tag, if set and non-empty
    pub fn region_name(&self) -> Option<&str> {
        non_empty(&self.region)
    }
}

impl SetElement for AnswerConfig {
    fn set_hash(&self) -> SetHash {
        answer_hash(self)
    }
}

/// A region; each meta field holds a single value at this layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub georegion: Option<Georegion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub us_state: Option<String>,

    #[serde(default)]
    pub up: bool,
}

impl RegionConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            georegion: None,
            country: None,
            us_state: None,
            up: false,
        }
    }

    pub fn with_georegion(mut self, georegion: Georegion) -> Self {
        self.georegion = Some(georegion);
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_us_state(mut self, us_state: impl Into<String>) -> Self {
        self.us_state = Some(us_state.into());
        self
    }

    pub fn with_up(mut self, up: bool) -> Self {
        self.up = up;
        self
    }
}

impl SetElement for RegionConfig {
    fn set_hash(&self) -> SetHash {
        region_hash(self)
    }
}

/// One filter of the filter chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub filter: String,

    #[serde(default)]
    pub disabled: bool,

    /// Free-form string config; integer-looking values are sent as integers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,
}

impl FilterConfig {
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            disabled: false,
            config: BTreeMap::new(),
        }
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }
}

/// Configuration state of one record resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordConfig {
    /// Provider id; computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub zone: String,

    pub domain: String,

    /// TTL; computed by the provider when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,

    #[serde(rename = "type")]
    pub record_type: RecordType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default)]
    pub use_client_subnet: bool,

    #[serde(default, skip_serializing_if = "SchemaSet::is_empty")]
    pub answers: SchemaSet<AnswerConfig>,

    #[serde(default, skip_serializing_if = "SchemaSet::is_empty")]
    pub regions: SchemaSet<RegionConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterConfig>,
}

impl RecordConfig {
    /// Fields whose change requires destroying and recreating the record
    pub const FORCE_NEW_FIELDS: [&'static str; 4] = ["zone", "domain", "type", "link"];

    /// Create a configuration with no answers, regions or filters
    pub fn new(zone: impl Into<String>, domain: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            id: None,
            zone: zone.into(),
            domain: domain.into(),
            ttl: None,
            record_type,
            link: None,
            use_client_subnet: false,
            answers: SchemaSet::new(),
            regions: SchemaSet::new(),
            filters: Vec::new(),
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_use_client_subnet(mut self, use_client_subnet: bool) -> Self {
        self.use_client_subnet = use_client_subnet;
        self
    }

    pub fn with_answer(mut self, answer: AnswerConfig) -> Self {
        self.answers.insert(answer);
        self
    }

    pub fn with_region(mut self, region: RegionConfig) -> Self {
        self.regions.insert(region);
        self
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filters.push(filter);
        self
    }

    /// Link target, if set and non-empty
    pub fn link_target(&self) -> Option<&str> {
        non_empty(&self.link)
    }

    /// Validate the configuration
    ///
    /// The link/answers conflict is reported as [`Error::Conflict`]; every
    /// other problem is [`Error::InvalidInput`].
    pub fn validate(&self) -> Result<()> {
        if self.zone.is_empty() {
            return Err(Error::invalid_input("zone must not be empty"));
        }
        if self.domain.is_empty() {
            return Err(Error::invalid_input("domain must not be empty"));
        }

        if self.link_target().is_some() && !self.answers.is_empty() {
            return Err(Error::conflict(
                "Cannot have both link and answers in a record",
            ));
        }

        if self.regions.iter().any(|r| r.name.is_empty()) {
            return Err(Error::invalid_input("region name must not be empty"));
        }

        if self.filters.iter().any(|f| f.filter.is_empty()) {
            return Err(Error::invalid_input("filter type must not be empty"));
        }

        Ok(())
    }

    /// Force-new fields that differ between `prior` and `self`
    pub fn replacement_fields(&self, prior: &RecordConfig) -> Vec<&'static str> {
        Self::FORCE_NEW_FIELDS
            .into_iter()
            .filter(|field| match *field {
                "zone" => self.zone != prior.zone,
                "domain" => self.domain != prior.domain,
                "type" => self.record_type != prior.record_type,
                "link" => self.link_target() != prior.link_target(),
                _ => false,
            })
            .collect()
    }

    /// Whether moving from `prior` to `self` changes a force-new field
    pub fn requires_replacement(&self, prior: &RecordConfig) -> bool {
        !self.replacement_fields(prior).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> RecordConfig {
        RecordConfig::new("example.com", "www.example.com", RecordType::A)
    }

    #[test]
    fn test_validate_ok() {
        let config = base()
            .with_answer(AnswerConfig::new("1.2.3.4"))
            .with_region(RegionConfig::new("east"))
            .with_filter(FilterConfig::new("up"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_link_and_answers_conflict() {
        let config = base()
            .with_link("lb.example.com")
            .with_answer(AnswerConfig::new("1.2.3.4"));

        let err = config.validate().unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(err.to_string(), "Cannot have both link and answers in a record");
    }

    #[test]
    fn test_empty_link_is_absent() {
        let config = base()
            .with_link("")
            .with_answer(AnswerConfig::new("1.2.3.4"));
        assert!(config.validate().is_ok());
        assert_eq!(config.link_target(), None);
    }

    #[test]
    fn test_validate_rejects_blank_identity() {
        let config = RecordConfig::new("", "www.example.com", RecordType::A);
        assert!(matches!(config.validate(), Err(Error::InvalidInput(_))));

        let config = base().with_region(RegionConfig::new(""));
        assert!(matches!(config.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_requires_replacement() {
        let prior = base().with_answer(AnswerConfig::new("1.2.3.4"));

        let ttl_change = prior.clone().with_ttl(60);
        assert!(!ttl_change.requires_replacement(&prior));

        let mut type_change = prior.clone();
        type_change.record_type = RecordType::AAAA;
        assert!(type_change.requires_replacement(&prior));

        let link_change = base().with_link("lb.example.com");
        assert!(link_change.requires_replacement(&prior));
        assert_eq!(link_change.replacement_fields(&prior), vec!["link"]);
    }

    #[test]
    fn test_replacement_fields_cover_every_force_new_field() {
        let prior = base().with_link("a.example.com");

        let mut moved = RecordConfig::new("example.org", "www.example.org", RecordType::AAAA)
            .with_link("b.example.com");
        moved.ttl = Some(60);

        assert_eq!(
            moved.replacement_fields(&prior),
            RecordConfig::FORCE_NEW_FIELDS.to_vec()
        );
        assert!(prior.replacement_fields(&prior).is_empty());

        // A blank link counts as no link
        let blank = base().with_link("");
        assert!(blank.replacement_fields(&base()).is_empty());
    }

    #[test]
    fn test_deserialize_host_state() {
        let json = serde_json::json!({
            "zone": "example.com",
            "domain": "www.example.com",
            "type": "A",
            "answers": [
                {"answer": "1.2.3.4", "meta": [{"field": "up", "value": "1"}]},
                {"answer": "5.6.7.8"}
            ],
            "regions": [{"name": "east", "georegion": "US-EAST"}],
            "filters": [{"filter": "select_first_n", "config": {"N": "1"}}]
        });

        let config: RecordConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.answers.len(), 2);
        assert_eq!(config.regions.len(), 1);
        assert!(!config.use_client_subnet);
        assert_eq!(config.filters[0].config["N"], "1");
    }

    #[test]
    fn test_deserialize_rejects_bad_enums() {
        let bad_type = serde_json::json!({
            "zone": "example.com", "domain": "example.com", "type": "SOA"
        });
        assert!(serde_json::from_value::<RecordConfig>(bad_type).is_err());

        let bad_region = serde_json::json!({
            "zone": "example.com", "domain": "example.com", "type": "A",
            "regions": [{"name": "x", "georegion": "MOON"}]
        });
        assert!(serde_json::from_value::<RecordConfig>(bad_region).is_err());
    }
}
