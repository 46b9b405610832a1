//! # Money Module
//!
//! Rounding and display formatting for monetary values.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In f64 arithmetic:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  Pipe rates are fractional (926.25/metre) and quantities can be     │
//! │  fractional too (2.5 metres), so integer minor units don't fit.     │
//! │                                                                     │
//! │  OUR SOLUTION: rust_decimal::Decimal                                │
//! │    950 × 0.975 = 926.25 exactly, and 1065.1875 rounds to 1065.19    │
//! │    with no binary representation error sneaking into the result.    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is exactly one rounding primitive, [`round2`], and it is applied at
//! the points the business rules call for - never in between.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary value to 2 decimal places, half up.
///
/// All values in this system are non-negative, so "midpoint away from zero"
/// is exactly the half-up rule the business uses.
///
/// ## Example
/// ```rust
/// use pipequote_core::money::round2;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round2(dec!(1065.1875)), dec!(1065.19));
/// assert_eq!(round2(dec!(1.005)), dec!(1.01));
/// assert_eq!(round2(dec!(750)), dec!(750));
/// ```
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a monetary value with exactly two decimal places.
///
/// The value is rounded with [`round2`] first, so callers can hand over
/// raw arithmetic results and still get `"1065.19"`, never `"1065.1875"`.
pub fn format_2dp(value: Decimal) -> String {
    format!("{:.2}", round2(value))
}

/// Formats a quantity with trailing zeros trimmed.
///
/// Quantities print the way people write them: `5`, not `5.00`;
/// `2.5` metres, not `2.50`.
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
