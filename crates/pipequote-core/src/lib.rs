//! # pipequote-core: Pure Business Logic for PipeQuote
//!
//! This crate is the **heart** of PipeQuote, the quotation backend for the
//! Pipe Center trading business. It contains all business logic as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       PipeQuote Architecture                        │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                     Web Frontend                            │   │
//! │  │    Login ──► Configurations ──► Quotation Builder ──► PDF   │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │ JSON API                           │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │                    pipequote-store                          │   │
//! │  │    repositories, blob gateway, identity, ApiResponse        │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ pipequote-core (THIS CRATE) ★                │   │
//! │  │                                                             │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌──────────────┐   │   │
//! │  │   │ pricing │ │  quote  │ │ retention │ │   document   │   │   │
//! │  │   └─────────┘ └─────────┘ └───────────┘ └──────────────┘   │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌───────────────────────────┐    │   │
//! │  │   │  types  │ │  money  │ │        validation         │    │   │
//! │  │   └─────────┘ └─────────┘ └───────────────────────────┘    │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Configuration, Quotation, QuotationItem)
//! - [`money`] - Rounding and display formatting for monetary values
//! - [`pricing`] - Discount/margin/GST price composition
//! - [`quote`] - Quotation aggregation (items, subtotal, GST, total)
//! - [`retention`] - 30-day visibility window and purge sweep
//! - [`document`] - Deterministic printable layout tree
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, and the wall clock are FORBIDDEN here
//! 3. **Exact Decimals**: Money is `rust_decimal::Decimal`, never `f64`
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use pipequote_core::pricing::compute_final_price;
//! use rust_decimal_macros::dec;
//!
//! // 1000 − 5% − 2.5% + 15% margin, GST left to the quotation level
//! let rate = compute_final_price(dec!(1000), dec!(5), dec!(2.5), dec!(15), false).unwrap();
//! assert_eq!(rate, dec!(1065.19));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod money;
pub mod pricing;
pub mod quote;
pub mod retention;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pipequote_core::Quotation` instead of
// `use pipequote_core::types::Quotation`

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::{Configuration, Quotation, QuotationItem};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// GST rate applied once per quotation, on the item subtotal.
///
/// ## Why a constant?
/// The business operates under a single 18% GST slab. Keeping the rate as a
/// named value means the quotation math and the document summary label stay
/// in sync; it is not a runtime-editable setting.
pub const GST_RATE: Decimal = dec!(0.18);

/// How long a quotation stays visible in listings, in days.
///
/// Measured as elapsed wall-clock time from `createdAt`, not calendar days.
/// A record older than this is hidden from listings but remains stored until
/// a purge sweep removes it (see [`retention`]).
pub const RETENTION_WINDOW_DAYS: i64 = 30;

/// Maximum line items allowed in a single quotation.
///
/// ## Business Reason
/// Prevents runaway drafts and keeps the rendered document to a sane size.
pub const MAX_QUOTATION_ITEMS: usize = 100;
