//! # Store Error Types
//!
//! Error types for persistence and service operations.
//!
//! ## Error Flow
//! ```text
//! GatewayError (blob store unreachable)
//!      │
//!      ▼
//! StoreError (this module) ← adds entity/id context and categorization
//!      │
//!      ▼
//! ApiResponse { success: false, error } ← what the caller sees
//! ```
//!
//! `StorageUnavailable` is the only retryable kind; the store itself never
//! retries - that decision belongs to the caller holding the timeout.

use thiserror::Error;

use crate::gateway::GatewayError;
use pipequote_core::CoreError;

/// Persistence and service layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the stored list.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation (e.g. duplicate configuration name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// The blob gateway failed. Retryable from the caller's side.
    #[error("storage unavailable: {reason}")]
    StorageUnavailable { reason: String },

    /// A stored blob could not be parsed at all.
    ///
    /// Individual bad entries inside an otherwise valid list are skipped
    /// with a warning instead (see [`crate::repository`]); this variant
    /// means the whole payload is unusable.
    #[error("stored data is corrupt under '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// A payload could not be encoded for storage. Should be unreachable
    /// for our own types; surfaced instead of panicking.
    #[error("failed to encode '{key}' payload: {reason}")]
    Encode { key: String, reason: String },

    /// Token validation failed; the operation never started.
    #[error("authentication required")]
    Unauthorized,

    /// Business rule violation from pipequote-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether the caller may reasonably retry the same call.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::StorageUnavailable { .. })
    }
}

impl From<GatewayError> for StoreError {
    fn from(err: GatewayError) -> Self {
        StoreError::StorageUnavailable {
            reason: err.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
