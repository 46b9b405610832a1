//! # Repositories
//!
//! Configuration and quotation operations over the blob gateway.
//!
//! ## The Read-Modify-Write Discipline
//! ```text
//! every mutation:
//!   1. get the whole list          ──► Vec<T>
//!   2. validate + change in memory ──► rejected input never reaches step 3
//!   3. put the whole list back
//! ```
//!
//! If two writers race, the later `put` silently replaces the earlier one at
//! whole-list granularity. That is an accepted property of this system's
//! single-operator deployment, not an oversight; the gateway trait is the
//! seam where per-record versioning would go if that ever changes.

pub mod configuration;
pub mod quotation;

pub use configuration::{ConfigurationRepository, NewConfiguration};
pub use quotation::QuotationRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::gateway::BlobGateway;

/// Loads and decodes the list stored under `key`.
///
/// Reads are lenient at the entry level: an entry that fails to decode or
/// fails `keep` is skipped with a warning rather than poisoning the whole
/// list (a hand-edited blob shouldn't take the system down). A payload that
/// isn't a JSON array at all is a hard [`StoreError::Corrupt`].
pub(crate) fn load_list<T, G, F>(gateway: &G, key: &str, keep: F) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned,
    G: BlobGateway,
    F: Fn(&T) -> bool,
{
    let Some(raw) = gateway.get(key)? else {
        return Ok(Vec::new());
    };

    let entries: Vec<serde_json::Value> =
        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

    let mut decoded = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<T>(entry) {
            Ok(value) if keep(&value) => decoded.push(value),
            Ok(_) => {
                warn!(key, index, "skipping stored entry that fails validation");
            }
            Err(e) => {
                warn!(key, index, error = %e, "skipping undecodable stored entry");
            }
        }
    }

    Ok(decoded)
}

/// Encodes and stores the full list under `key`.
pub(crate) fn save_list<T, G>(gateway: &G, key: &str, list: &[T]) -> StoreResult<()>
where
    T: Serialize,
    G: BlobGateway,
{
    let payload = serde_json::to_string_pretty(list).map_err(|e| StoreError::Encode {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    gateway.put(key, &payload)?;
    Ok(())
}

/// Generates the next time-derived record id.
///
/// Ids are epoch-millisecond strings. When the clock collides with (or
/// trails) an existing id - two creates in the same millisecond, or a clock
/// step backwards - the id is bumped past the current maximum so the
/// sequence stays unique and monotonically increasing.
pub(crate) fn next_time_id<'a>(
    now_ms: i64,
    existing: impl Iterator<Item = &'a str>,
) -> String {
    let max_existing = existing.filter_map(|id| id.parse::<i64>().ok()).max();

    let mut candidate = now_ms;
    if let Some(max) = max_existing {
        if candidate <= max {
            candidate = max + 1;
        }
    }

    candidate.to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
