//! # Error Types
//!
//! Domain-specific error types for pipequote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  pipequote-core errors (this file)                                  │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  pipequote-store errors (separate crate)                            │
//! │  └── StoreError       - Gateway / lookup failures                   │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → StoreError → ApiResponse       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, sno, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every rejection happens before any state is touched

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A quotation must carry at least one line item.
    #[error("quotation must contain at least one item")]
    EmptyQuotation,

    /// A line item failed validation; `sno` names the offending row.
    ///
    /// ## When This Occurs
    /// - quantity ≤ 0
    /// - rate < 0, or a rate source with out-of-range percentages
    /// - blank item name or unit
    #[error("item {sno} is invalid: {reason}")]
    InvalidItem { sno: u32, reason: String },

    /// Quotation has exceeded the maximum allowed items.
    #[error("quotation cannot have more than {max} items")]
    TooManyItems { max: usize },

    /// The renderer refused to produce a layout for a structurally broken
    /// quotation. Unreachable for records built through [`crate::quote`],
    /// but the renderer fails closed rather than emit a partial tree.
    #[error("cannot render quotation {id}: {reason}")]
    RenderFailure { id: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs, and always
/// name the offending field.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range (percentages are 0-100).
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A duration is shorter than the floor the retention policy allows.
    #[error("{field} must cover at least {min_days} days")]
    WindowTooShort { field: String, min_days: i64 },

    /// Invalid format (e.g., a timestamp outside the representable range).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
