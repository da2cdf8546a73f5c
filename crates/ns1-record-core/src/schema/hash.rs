// # Set Hashing
//
// Canonical-string hashes for the unordered configuration collections
// (answers, answer meta, regions). Each hash is a function of field values
// only; wherever a child collection exists its hashes are sorted first.

use sha2::{Digest, Sha256};
use tracing::trace;

use super::{AnswerConfig, MetaConfig, RegionConfig};

/// Hash value keying a set element
pub type SetHash = u32;

/// Hash a canonical string
///
/// First four bytes of SHA-256, big-endian, with the sign bit cleared.
pub fn hash_string(s: &str) -> SetHash {
    let digest = Sha256::digest(s.as_bytes());
    let value = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    value & 0x7fff_ffff
}

fn meta_canonical(meta: &MetaConfig) -> String {
    let mut buf = format!("{}-", meta.field.as_str());
    if let Some(feed) = meta.feed_name() {
        buf.push_str(&format!("feed{}-", feed));
    }
    if let Some(value) = meta.literal() {
        buf.push_str(&format!("value{}-", value));
    }
    buf
}

fn answer_canonical(answer: &AnswerConfig) -> String {
    let mut buf = format!("{}-", answer.answer);
    if let Some(region) = answer.region_name() {
        buf.push_str(&format!("{}-", region));
    }

    let mut metas: Vec<SetHash> = answer.meta.iter().map(meta_hash).collect();
    metas.sort_unstable();
    for hash in metas {
        buf.push_str(&format!("{}-", hash));
    }
    buf
}

fn region_canonical(region: &RegionConfig) -> String {
    format!(
        "{}-{}-{}-{}-{}-",
        region.name,
        region.georegion.map(|g| g.as_str()).unwrap_or_default(),
        region.country.as_deref().unwrap_or_default(),
        region.us_state.as_deref().unwrap_or_default(),
        region.up
    )
}

/// Hash of one answer meta entry
pub fn meta_hash(meta: &MetaConfig) -> SetHash {
    let canonical = meta_canonical(meta);
    let hash = hash_string(&canonical);
    trace!(hash, canonical = %canonical, "meta hash");
    hash
}

/// Hash of one answer, including its meta set
pub fn answer_hash(answer: &AnswerConfig) -> SetHash {
    let canonical = answer_canonical(answer);
    let hash = hash_string(&canonical);
    trace!(hash, canonical = %canonical, "answer hash");
    hash
}

/// Hash of one region
pub fn region_hash(region: &RegionConfig) -> SetHash {
    let canonical = region_canonical(region);
    let hash = hash_string(&canonical);
    trace!(hash, canonical = %canonical, "region hash");
    hash
}
