//! Pack Health bindings: computePackHealth, identifyGaps.
//!
//! Both are pure and run without an initialized runtime. `config` overrides
//! the health section; when omitted the runtime's (or the default) config
//! applies.

use napi_derive::napi;
use proofpack_health as health;

use crate::conversions::{pack_types, time_types};

/// Score a document list. Never fails on content; an unusable config yields
/// a zero score.
#[napi]
pub fn compute_pack_health(
    documents: serde_json::Value,
    config: Option<serde_json::Value>,
    now: Option<String>,
) -> napi::Result<serde_json::Value> {
    let documents = pack_types::documents_from_json(documents)?;
    let config = pack_types::health_config_from_json(config)?;
    let now = time_types::now_or(now)?;
    pack_types::health_to_json(&health::compute_pack_health(&documents, &config, now))
}

/// Required categories the document list does not satisfy.
#[napi]
pub fn identify_gaps(
    documents: serde_json::Value,
    config: Option<serde_json::Value>,
    now: Option<String>,
) -> napi::Result<serde_json::Value> {
    let documents = pack_types::documents_from_json(documents)?;
    let config = pack_types::health_config_from_json(config)?;
    let now = time_types::now_or(now)?;
    pack_types::gaps_to_json(&health::identify_gaps(&documents, &config, now))
}
