//! # Blob Gateway
//!
//! The persistence seam: a key-addressed JSON blob store with exactly two
//! operations, `get` and `put`. The production deployment backs this with a
//! hosted blob service; tests and single-machine setups use
//! [`MemoryGateway`].
//!
//! ## Storage Layout
//! ```text
//! "configurations" ──► JSON array of Configuration
//! "quotations"     ──► JSON array of Quotation
//! ```
//!
//! Whole lists under single keys, on purpose: the dataset is one operator's
//! working set, and the simplicity of read-modify-write beats per-record
//! addressing at this scale. The consequence is last-writer-wins on
//! concurrent writes, which the repositories document rather than hide.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Key holding the full configuration list.
pub const CONFIGURATIONS_KEY: &str = "configurations";

/// Key holding the full quotation list.
pub const QUOTATIONS_KEY: &str = "quotations";

/// A blob store call failed (network, auth, quota, ...).
///
/// Carries the underlying reason verbatim; the store layer maps this to
/// its retryable `StorageUnavailable` kind.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct GatewayError(pub String);

/// Key-addressed JSON blob storage.
///
/// Implementations must be cheap to clone (repositories hold one each) and
/// safe to call from multiple threads. Calls are synchronous from the
/// store's point of view; an async backend wraps its own runtime handle.
pub trait BlobGateway: Clone {
    /// Fetches the payload under `key`, or `None` if nothing was ever stored.
    fn get(&self, key: &str) -> Result<Option<String>, GatewayError>;

    /// Stores `payload` under `key`, replacing any previous value.
    fn put(&self, key: &str, payload: &str) -> Result<(), GatewayError>;
}

// =============================================================================
// In-Memory Gateway
// =============================================================================

/// In-memory [`BlobGateway`] for tests and storage-less deployments.
///
/// Clones share the same underlying map, mirroring how every repository in
/// a process talks to the same remote store.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryGateway {
    /// Creates an empty in-memory gateway.
    pub fn new() -> Self {
        MemoryGateway::default()
    }
}

impl BlobGateway for MemoryGateway {
    fn get(&self, key: &str) -> Result<Option<String>, GatewayError> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| GatewayError("memory store lock poisoned".to_string()))?;
        Ok(blobs.get(key).cloned())
    }

    fn put(&self, key: &str, payload: &str) -> Result<(), GatewayError> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| GatewayError("memory store lock poisoned".to_string()))?;
        blobs.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
