//! Provider-side domain objects
//!
//! These types mirror the JSON bodies of the NS1 record API. They are built
//! fresh from configuration for every lifecycle call and never cached.

pub mod meta;

pub use meta::{FeedPtr, Georegion, Meta, MetaBinding, MetaField, MetaLiteral, MetaValue};

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Decode an explicit `null` as the type's default
///
/// Provider responses send `null` for empty collections.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// DNS record type supported by the record resource
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecordType {
    A,
    AAAA,
    ALIAS,
    AFSDB,
    CNAME,
    DNAME,
    HINFO,
    MX,
    NAPTR,
    NS,
    PTR,
    RP,
    SPF,
    SRV,
    TXT,
}

impl RecordType {
    /// Every supported type
    pub const ALL: [RecordType; 15] = [
        RecordType::A,
        RecordType::AAAA,
        RecordType::ALIAS,
        RecordType::AFSDB,
        RecordType::CNAME,
        RecordType::DNAME,
        RecordType::HINFO,
        RecordType::MX,
        RecordType::NAPTR,
        RecordType::NS,
        RecordType::PTR,
        RecordType::RP,
        RecordType::SPF,
        RecordType::SRV,
        RecordType::TXT,
    ];

    /// Record type mnemonic
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::ALIAS => "ALIAS",
            RecordType::AFSDB => "AFSDB",
            RecordType::CNAME => "CNAME",
            RecordType::DNAME => "DNAME",
            RecordType::HINFO => "HINFO",
            RecordType::MX => "MX",
            RecordType::NAPTR => "NAPTR",
            RecordType::NS => "NS",
            RecordType::PTR => "PTR",
            RecordType::RP => "RP",
            RecordType::SPF => "SPF",
            RecordType::SRV => "SRV",
            RecordType::TXT => "TXT",
        }
    }

    /// Whether answers of this type keep their rdata as one opaque string
    pub fn has_opaque_rdata(&self) -> bool {
        matches!(self, RecordType::TXT)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RecordType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                Error::invalid_input(format!(
                    "only A, AAAA, ALIAS, AFSDB, CNAME, DNAME, HINFO, MX, NAPTR, NS, PTR, RP, SPF, SRV, TXT allowed in \"type\", got {:?}",
                    s
                ))
            })
    }
}

/// A single answer of a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Rdata tokens
    #[serde(rename = "answer")]
    pub rdata: Vec<String>,

    /// Region this answer belongs to
    #[serde(rename = "region", default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,

    /// Answer metadata
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Meta::is_empty"
    )]
    pub meta: Meta,
}

impl Answer {
    /// Create an answer from rdata tokens
    pub fn new(rdata: Vec<String>) -> Self {
        Self {
            rdata,
            ..Default::default()
        }
    }

    /// Create an answer from whitespace-separated rdata (`"10 mx.example.com"`)
    pub fn from_rdata_str(rdata: &str) -> Self {
        Self::new(rdata.split_whitespace().map(str::to_string).collect())
    }

    /// Create a TXT answer; the text is kept as one rdata token
    pub fn txt(text: impl Into<String>) -> Self {
        Self::new(vec![text.into()])
    }

    /// Rdata in configuration form
    pub fn rdata_string(&self) -> String {
        self.rdata.join(" ")
    }
}

/// A traffic-steering region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: Meta,
}

/// A filter config value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Int(i64),
    Bool(bool),
    Float(f64),
    Text(String),
}

impl FilterValue {
    /// Coerce a configuration string: integers become `Int`, everything else `Text`
    pub fn coerce(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(i) => FilterValue::Int(i),
            Err(_) => FilterValue::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Int(i) => write!(f, "{}", i),
            FilterValue::Bool(b) => write!(f, "{}", b),
            FilterValue::Float(v) => write!(f, "{}", v),
            FilterValue::Text(s) => f.write_str(s),
        }
    }
}

/// A filter in the record's filter chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Filter type (e.g. `up`, `geotarget_country`, `select_first_n`)
    #[serde(rename = "filter")]
    pub filter_type: String,

    #[serde(default)]
    pub disabled: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub config: BTreeMap<String, FilterValue>,
}

impl Filter {
    pub fn new(filter_type: impl Into<String>) -> Self {
        Self {
            filter_type: filter_type.into(),
            disabled: false,
            config: BTreeMap::new(),
        }
    }
}

/// An NS1 DNS record, identified by (zone, domain, type)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned id
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    pub zone: String,

    pub domain: String,

    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// TTL in seconds; 0 lets the provider choose
    #[serde(default, skip_serializing_if = "is_zero")]
    pub ttl: u32,

    /// Alias target; mutually exclusive with `answers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default)]
    pub use_client_subnet: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub answers: Vec<Answer>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub regions: BTreeMap<String, Region>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub filters: Vec<Filter>,
}

fn is_zero(v: &u32) -> bool {
    *v == 0
}

impl Record {
    /// Create an empty record
    pub fn new(zone: impl Into<String>, domain: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            id: String::new(),
            zone: zone.into(),
            domain: domain.into(),
            record_type,
            ttl: 0,
            link: None,
            use_client_subnet: false,
            answers: Vec::new(),
            regions: BTreeMap::new(),
            filters: Vec::new(),
        }
    }

    /// Turn the record into a link to `target`, dropping any answers
    pub fn link_to(&mut self, target: impl Into<String>) {
        self.answers.clear();
        self.link = Some(target.into());
    }

    /// Build an answer for this record's type from configuration rdata
    pub fn answer_for(&self, rdata: &str) -> Answer {
        if self.record_type.has_opaque_rdata() {
            Answer::txt(rdata)
        } else {
            Answer::from_rdata_str(rdata)
        }
    }

    /// Check the link/answers exclusivity
    pub fn validate(&self) -> Result<()> {
        if self.link.is_some() && !self.answers.is_empty() {
            return Err(Error::conflict(
                "Cannot have both link and answers in a record",
            ));
        }
        Ok(())
    }

    /// Human-readable identity for logs and errors
    pub fn key(&self) -> String {
        format!("{}/{}/{}", self.zone, self.domain, self.record_type)
    }
}
