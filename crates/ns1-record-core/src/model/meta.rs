// # Answer & Region Metadata
//
// NS1 attaches a fixed bag of metadata to answers and regions. Every field is
// either a literal of the field's type or a pointer to a data feed that the
// provider resolves at query time.
//
// ## Wire Shape
//
// ```json
// {
//   "up": {"feed": "5a1f..."},
//   "weight": 10.5,
//   "country": ["DE", "FR"]
// }
// ```
//
// ## Configuration Shape
//
// The host configuration carries every field as a string (`"1"`, `"DE,FR"`).
// [`MetaLiteral`] is the per-type codec between that string and the typed value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Pointer to a named data feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPtr {
    /// Feed name (or id) the provider resolves
    pub feed: String,
}

/// A metadata value: either a literal or bound to a feed
///
/// `Literal` is listed first so that list literals are never mistaken for a
/// feed pointer when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue<T> {
    /// Literal value
    Literal(T),
    /// Reference to an external data feed
    Feed(FeedPtr),
}

impl<T> MetaValue<T> {
    /// Bind a field to a feed
    pub fn feed(name: impl Into<String>) -> Self {
        Self::Feed(FeedPtr { feed: name.into() })
    }
}

/// Metadata field names understood by NS1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaField {
    Up,
    Connections,
    Requests,
    Loadavg,
    Pulsar,
    Latitude,
    Longitude,
    Georegion,
    Country,
    UsState,
    CaProvince,
    Note,
    IpPrefixes,
    Asn,
    Priority,
    Weight,
    LowWatermark,
    HighWatermark,
}

impl MetaField {
    /// Every field, in provider documentation order
    pub const ALL: [MetaField; 18] = [
        MetaField::Up,
        MetaField::Connections,
        MetaField::Requests,
        MetaField::Loadavg,
        MetaField::Pulsar,
        MetaField::Latitude,
        MetaField::Longitude,
        MetaField::Georegion,
        MetaField::Country,
        MetaField::UsState,
        MetaField::CaProvince,
        MetaField::Note,
        MetaField::IpPrefixes,
        MetaField::Asn,
        MetaField::Priority,
        MetaField::Weight,
        MetaField::LowWatermark,
        MetaField::HighWatermark,
    ];

    /// Configuration name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaField::Up => "up",
            MetaField::Connections => "connections",
            MetaField::Requests => "requests",
            MetaField::Loadavg => "loadavg",
            MetaField::Pulsar => "pulsar",
            MetaField::Latitude => "latitude",
            MetaField::Longitude => "longitude",
            MetaField::Georegion => "georegion",
            MetaField::Country => "country",
            MetaField::UsState => "us_state",
            MetaField::CaProvince => "ca_province",
            MetaField::Note => "note",
            MetaField::IpPrefixes => "ip_prefixes",
            MetaField::Asn => "asn",
            MetaField::Priority => "priority",
            MetaField::Weight => "weight",
            MetaField::LowWatermark => "low_watermark",
            MetaField::HighWatermark => "high_watermark",
        }
    }
}

impl fmt::Display for MetaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetaField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MetaField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| Error::invalid_input(format!("unknown meta field {:?}", s)))
    }
}

/// Geographic region understood by NS1 traffic steering
///
/// Variants are declared in the lexical order of their names, so sorting a
/// `Vec<Georegion>` matches sorting the rendered strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Georegion {
    #[serde(rename = "AFRICA")]
    Africa,
    #[serde(rename = "ASIAPAC")]
    Asiapac,
    #[serde(rename = "EUROPE")]
    Europe,
    #[serde(rename = "SOUTH-AMERICA")]
    SouthAmerica,
    #[serde(rename = "US-CENTRAL")]
    UsCentral,
    #[serde(rename = "US-EAST")]
    UsEast,
    #[serde(rename = "US-WEST")]
    UsWest,
}

impl Georegion {
    /// Every region, in the order the provider documents them
    pub const ALL: [Georegion; 7] = [
        Georegion::UsWest,
        Georegion::UsEast,
        Georegion::UsCentral,
        Georegion::Europe,
        Georegion::Africa,
        Georegion::Asiapac,
        Georegion::SouthAmerica,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Georegion::Africa => "AFRICA",
            Georegion::Asiapac => "ASIAPAC",
            Georegion::Europe => "EUROPE",
            Georegion::SouthAmerica => "SOUTH-AMERICA",
            Georegion::UsCentral => "US-CENTRAL",
            Georegion::UsEast => "US-EAST",
            Georegion::UsWest => "US-WEST",
        }
    }
}

impl fmt::Display for Georegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Georegion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Georegion::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| {
                Error::invalid_input(format!(
                    "only US-WEST, US-EAST, US-CENTRAL, EUROPE, AFRICA, ASIAPAC, SOUTH-AMERICA allowed in \"georegion\", got {:?}",
                    s
                ))
            })
    }
}

/// String codec between configuration values and typed metadata literals
pub trait MetaLiteral: Sized {
    /// Parse the configuration string for `field`
    fn parse_literal(field: MetaField, raw: &str) -> Result<Self>;

    /// Render for configuration; `None` for the type's zero value
    fn render_literal(&self) -> Option<String>;
}

fn malformed(field: MetaField, raw: &str, expected: &str) -> Error {
    Error::invalid_input(format!(
        "meta field {:?} expects {}, got {:?}",
        field.as_str(),
        expected,
        raw
    ))
}

impl MetaLiteral for bool {
    fn parse_literal(field: MetaField, raw: &str) -> Result<Self> {
        match raw.trim() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(malformed(field, raw, "a boolean (1, 0, true, false)")),
        }
    }

    fn render_literal(&self) -> Option<String> {
        self.then(|| "1".to_string())
    }
}

impl MetaLiteral for i64 {
    fn parse_literal(field: MetaField, raw: &str) -> Result<Self> {
        raw.trim()
            .parse()
            .map_err(|_| malformed(field, raw, "an integer"))
    }

    fn render_literal(&self) -> Option<String> {
        (*self != 0).then(|| self.to_string())
    }
}

impl MetaLiteral for f64 {
    fn parse_literal(field: MetaField, raw: &str) -> Result<Self> {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| malformed(field, raw, "a number"))
    }

    fn render_literal(&self) -> Option<String> {
        (*self != 0.0).then(|| self.to_string())
    }
}

impl MetaLiteral for String {
    fn parse_literal(_field: MetaField, raw: &str) -> Result<Self> {
        Ok(raw.to_string())
    }

    fn render_literal(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.clone())
    }
}

/// Non-empty comma-separated tokens; a list with no tokens is malformed
fn split_list(field: MetaField, raw: &str) -> Result<Vec<&str>> {
    let tokens: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(malformed(field, raw, "at least one comma-separated value"));
    }
    Ok(tokens)
}

impl MetaLiteral for Vec<String> {
    fn parse_literal(field: MetaField, raw: &str) -> Result<Self> {
        let mut items: Vec<String> = split_list(field, raw)?
            .into_iter()
            .map(str::to_string)
            .collect();
        items.sort();
        Ok(items)
    }

    fn render_literal(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut items = self.clone();
        items.sort();
        Some(items.join(","))
    }
}

impl MetaLiteral for Vec<Georegion> {
    fn parse_literal(field: MetaField, raw: &str) -> Result<Self> {
        let mut items = split_list(field, raw)?
            .into_iter()
            .map(Georegion::from_str)
            .collect::<Result<Vec<_>>>()?;
        items.sort();
        Ok(items)
    }

    fn render_literal(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut items = self.clone();
        items.sort();
        Some(
            items
                .iter()
                .map(Georegion::as_str)
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

/// How a materialized field is bound, in configuration form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaBinding {
    /// Rendered literal value
    Value(String),
    /// Feed name
    Feed(String),
}

fn binding<T: MetaLiteral>(slot: &Option<MetaValue<T>>) -> Option<MetaBinding> {
    match slot.as_ref()? {
        MetaValue::Literal(value) => value.render_literal().map(MetaBinding::Value),
        MetaValue::Feed(ptr) => Some(MetaBinding::Feed(ptr.feed.clone())),
    }
}

fn literal<T: MetaLiteral>(field: MetaField, raw: &str) -> Result<Option<MetaValue<T>>> {
    Ok(Some(MetaValue::Literal(T::parse_literal(field, raw)?)))
}

/// Answer / region metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up: Option<MetaValue<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<MetaValue<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests: Option<MetaValue<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loadavg: Option<MetaValue<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pulsar: Option<MetaValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<MetaValue<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<MetaValue<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub georegion: Option<MetaValue<Vec<Georegion>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<MetaValue<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub us_state: Option<MetaValue<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_province: Option<MetaValue<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<MetaValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_prefixes: Option<MetaValue<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<MetaValue<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<MetaValue<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<MetaValue<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_watermark: Option<MetaValue<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_watermark: Option<MetaValue<i64>>,
}

impl Meta {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self == &Meta::default()
    }

    /// Bind `field` to the named feed
    pub fn set_feed(&mut self, field: MetaField, name: &str) {
        match field {
            MetaField::Up => self.up = Some(MetaValue::feed(name)),
            MetaField::Connections => self.connections = Some(MetaValue::feed(name)),
            MetaField::Requests => self.requests = Some(MetaValue::feed(name)),
            MetaField::Loadavg => self.loadavg = Some(MetaValue::feed(name)),
            MetaField::Pulsar => self.pulsar = Some(MetaValue::feed(name)),
            MetaField::Latitude => self.latitude = Some(MetaValue::feed(name)),
            MetaField::Longitude => self.longitude = Some(MetaValue::feed(name)),
            MetaField::Georegion => self.georegion = Some(MetaValue::feed(name)),
            MetaField::Country => self.country = Some(MetaValue::feed(name)),
            MetaField::UsState => self.us_state = Some(MetaValue::feed(name)),
            MetaField::CaProvince => self.ca_province = Some(MetaValue::feed(name)),
            MetaField::Note => self.note = Some(MetaValue::feed(name)),
            MetaField::IpPrefixes => self.ip_prefixes = Some(MetaValue::feed(name)),
            MetaField::Asn => self.asn = Some(MetaValue::feed(name)),
            MetaField::Priority => self.priority = Some(MetaValue::feed(name)),
            MetaField::Weight => self.weight = Some(MetaValue::feed(name)),
            MetaField::LowWatermark => self.low_watermark = Some(MetaValue::feed(name)),
            MetaField::HighWatermark => self.high_watermark = Some(MetaValue::feed(name)),
        }
    }

    /// Parse `raw` according to the type of `field` and store it as a literal
    ///
    /// List fields are split on `,` and sorted ascending.
    pub fn set_literal(&mut self, field: MetaField, raw: &str) -> Result<()> {
        match field {
            MetaField::Up => self.up = literal(field, raw)?,
            MetaField::Connections => self.connections = literal(field, raw)?,
            MetaField::Requests => self.requests = literal(field, raw)?,
            MetaField::Loadavg => self.loadavg = literal(field, raw)?,
            MetaField::Pulsar => self.pulsar = literal(field, raw)?,
            MetaField::Latitude => self.latitude = literal(field, raw)?,
            MetaField::Longitude => self.longitude = literal(field, raw)?,
            MetaField::Georegion => self.georegion = literal(field, raw)?,
            MetaField::Country => self.country = literal(field, raw)?,
            MetaField::UsState => self.us_state = literal(field, raw)?,
            MetaField::CaProvince => self.ca_province = literal(field, raw)?,
            MetaField::Note => self.note = literal(field, raw)?,
            MetaField::IpPrefixes => self.ip_prefixes = literal(field, raw)?,
            MetaField::Asn => self.asn = literal(field, raw)?,
            MetaField::Priority => self.priority = literal(field, raw)?,
            MetaField::Weight => self.weight = literal(field, raw)?,
            MetaField::LowWatermark => self.low_watermark = literal(field, raw)?,
            MetaField::HighWatermark => self.high_watermark = literal(field, raw)?,
        }
        Ok(())
    }

    /// Materialized fields in configuration form
    ///
    /// Literal zero values are skipped; feed bindings are always reported.
    pub fn bindings(&self) -> Vec<(MetaField, MetaBinding)> {
        let slots = [
            (MetaField::Up, binding(&self.up)),
            (MetaField::Connections, binding(&self.connections)),
            (MetaField::Requests, binding(&self.requests)),
            (MetaField::Loadavg, binding(&self.loadavg)),
            (MetaField::Pulsar, binding(&self.pulsar)),
            (MetaField::Latitude, binding(&self.latitude)),
            (MetaField::Longitude, binding(&self.longitude)),
            (MetaField::Georegion, binding(&self.georegion)),
            (MetaField::Country, binding(&self.country)),
            (MetaField::UsState, binding(&self.us_state)),
            (MetaField::CaProvince, binding(&self.ca_province)),
            (MetaField::Note, binding(&self.note)),
            (MetaField::IpPrefixes, binding(&self.ip_prefixes)),
            (MetaField::Asn, binding(&self.asn)),
            (MetaField::Priority, binding(&self.priority)),
            (MetaField::Weight, binding(&self.weight)),
            (MetaField::LowWatermark, binding(&self.low_watermark)),
            (MetaField::HighWatermark, binding(&self.high_watermark)),
        ];

        slots
            .into_iter()
            .filter_map(|(field, bound)| bound.map(|b| (field, b)))
            .collect()
    }
}
