//! # Validation Module
//!
//! Input validation utilities for PipeQuote.
//!
//! Validation runs before any business logic or storage write: a rejected
//! create/update must never touch the persisted lists. Each validator names
//! the offending wire field so the frontend can highlight it.
//!
//! ## Usage
//! ```rust
//! use pipequote_core::validation::{validate_percentage, validate_quantity};
//! use rust_decimal_macros::dec;
//!
//! validate_percentage("margin", dec!(15)).unwrap();
//! validate_quantity(dec!(2.5)).unwrap();
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::Configuration;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 100;
const MAX_ADDRESS_LEN: usize = 500;

// =============================================================================
// Percentage Validators
// =============================================================================

/// Validates a discount/margin percentage.
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
///
/// ## Example
/// ```rust
/// use pipequote_core::validation::validate_percentage;
/// use rust_decimal_macros::dec;
///
/// assert!(validate_percentage("firstDiscount", dec!(2.5)).is_ok());
/// assert!(validate_percentage("firstDiscount", dec!(101)).is_err());
/// assert!(validate_percentage("margin", dec!(-1)).is_err());
/// ```
pub fn validate_percentage(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a configuration name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 100 characters
pub fn validate_config_name(name: &str) -> ValidationResult<()> {
    non_empty("name", name, MAX_NAME_LEN)
}

/// Validates a buyer name.
pub fn validate_buyer_name(name: &str) -> ValidationResult<()> {
    non_empty("buyerName", name, MAX_NAME_LEN)
}

/// Validates a buyer address.
pub fn validate_buyer_address(address: &str) -> ValidationResult<()> {
    non_empty("buyerAddress", address, MAX_ADDRESS_LEN)
}

/// Validates an item description.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    non_empty("itemName", name, MAX_NAME_LEN)
}

/// Validates a unit of measure ("Nos", "Mtr", ...).
pub fn validate_unit(unit: &str) -> ValidationResult<()> {
    non_empty("unit", unit, 20)
}

fn non_empty(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit rate.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for free-of-cost lines)
pub fn validate_rate(rate: Decimal) -> ValidationResult<()> {
    if rate < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: "rate".to_string(),
        });
    }

    Ok(())
}

/// Validates an item quantity.
///
/// ## Rules
/// - Must be strictly positive; fractional quantities are fine
pub fn validate_quantity(quantity: Decimal) -> ValidationResult<()> {
    if quantity <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates the price a configuration is applied to.
pub fn validate_initial_price(price: Decimal) -> ValidationResult<()> {
    if price < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: "initialPrice".to_string(),
        });
    }

    Ok(())
}

/// Validates quotation-level transport charges.
pub fn validate_transport_charges(charges: Decimal) -> ValidationResult<()> {
    if charges < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: "transportCharges".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a whole configuration record.
///
/// Used both for operator input and for records read back from storage,
/// so a hand-edited blob can't smuggle an out-of-range percentage into
/// the pricing engine.
pub fn validate_configuration(config: &Configuration) -> ValidationResult<()> {
    validate_config_name(&config.name)?;
    validate_percentage("firstDiscount", config.first_discount)?;
    validate_percentage("secondDiscount", config.second_discount)?;
    validate_percentage("margin", config.margin)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
