//! # Pricing Module
//!
//! Composes a buyer-facing unit price from a list price through two
//! cascaded trade discounts, a margin, and optionally GST.
//!
//! ## Composition Order
//! ```text
//! list price
//!     │  × (1 − firstDiscount/100)
//!     ▼
//!     │  × (1 − secondDiscount/100)     discounts cascade; they are NOT
//!     ▼                                 added together first
//!     │  × (1 + margin/100)
//!     ▼
//!     │  × 1.18 (only when GST applies at this level)
//!     ▼
//! round half-up to 2 decimal places    ◄── the ONLY rounding step
//! ```
//!
//! Intermediate values are never rounded; rounding each step would compound
//! error across the chain. Inside a quotation, item rates are always derived
//! with GST off - GST is applied once on the quotation subtotal instead
//! (see [`crate::quote`]).

use rust_decimal::Decimal;

use crate::error::CoreResult;
use crate::money::round2;
use crate::types::Configuration;
use crate::validation::{validate_initial_price, validate_percentage};
use crate::GST_RATE;

/// Computes the final unit price for a list price and percentage triple.
///
/// Fully deterministic: identical inputs always yield the identical output,
/// including the rounding result. Performs no I/O.
///
/// ## Errors
/// Rejects any percentage outside `[0, 100]` and any negative
/// `initial_price` before computing anything.
///
/// ## Example
/// ```rust
/// use pipequote_core::pricing::compute_final_price;
/// use rust_decimal_macros::dec;
///
/// // 1000 → 950 → 926.25 → 1065.1875 → 1065.19
/// let price = compute_final_price(dec!(1000), dec!(5), dec!(2.5), dec!(15), false).unwrap();
/// assert_eq!(price, dec!(1065.19));
///
/// // The GST toggle multiplies by 1.18 before the single rounding step
/// let with_gst = compute_final_price(dec!(1000), dec!(5), dec!(2.5), dec!(15), true).unwrap();
/// assert_eq!(with_gst, dec!(1256.92));
/// ```
pub fn compute_final_price(
    initial_price: Decimal,
    first_discount_pct: Decimal,
    second_discount_pct: Decimal,
    margin_pct: Decimal,
    apply_gst: bool,
) -> CoreResult<Decimal> {
    validate_initial_price(initial_price)?;
    validate_percentage("firstDiscount", first_discount_pct)?;
    validate_percentage("secondDiscount", second_discount_pct)?;
    validate_percentage("margin", margin_pct)?;

    let after_first = initial_price * (Decimal::ONE - first_discount_pct / Decimal::ONE_HUNDRED);
    let after_second = after_first * (Decimal::ONE - second_discount_pct / Decimal::ONE_HUNDRED);
    let with_margin = after_second * (Decimal::ONE + margin_pct / Decimal::ONE_HUNDRED);

    let final_price = if apply_gst {
        with_margin * (Decimal::ONE + GST_RATE)
    } else {
        with_margin
    };

    Ok(round2(final_price))
}

/// Derives a suggested rate from a saved configuration.
///
/// Thin wrapper over [`compute_final_price`] so callers holding a
/// [`Configuration`] don't have to unpack the percentage triple themselves.
pub fn rate_from_configuration(
    config: &Configuration,
    initial_price: Decimal,
    apply_gst: bool,
) -> CoreResult<Decimal> {
    compute_final_price(
        initial_price,
        config.first_discount,
        config.second_discount,
        config.margin,
        apply_gst,
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
