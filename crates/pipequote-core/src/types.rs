//! # Domain Types
//!
//! Core domain types used throughout PipeQuote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌──────────────────┐      ┌──────────────────────────────────┐    │
//! │  │  Configuration   │      │           Quotation              │    │
//! │  │  ──────────────  │      │  ──────────────────────────────  │    │
//! │  │  id              │      │  id (time-derived, monotonic)    │    │
//! │  │  name            │ ──►  │  buyerName / buyerAddress        │    │
//! │  │  firstDiscount   │ rate │  items: [QuotationItem] by value │    │
//! │  │  secondDiscount  │      │  subtotal / gst / total          │    │
//! │  │  margin          │      │  createdAt + frozen date         │    │
//! │  └──────────────────┘      └──────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The serialized form of these types IS the wire schema shared with the
//! web frontend and the blob store, so field names are frozen: changing a
//! rename here is a breaking change for stored data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Configuration
// =============================================================================

/// A named, reusable discount/discount/margin triple used to derive rates.
///
/// Percentages are whole percents (5 = 5%), each in `[0, 100]`.
/// Created and deleted explicitly by the operator; never expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Unique identifier (epoch-millisecond string).
    pub id: String,

    /// Display name, unique among configurations (case-insensitive).
    pub name: String,

    /// First trade discount percentage.
    #[ts(as = "f64")]
    pub first_discount: Decimal,

    /// Second (cascaded) discount percentage.
    #[ts(as = "f64")]
    pub second_discount: Decimal,

    /// Margin percentage added after both discounts.
    #[ts(as = "f64")]
    pub margin: Decimal,

    /// Creation instant, epoch milliseconds UTC.
    pub created_at: i64,
}

// =============================================================================
// Quotation Item
// =============================================================================

/// A line item inside a quotation.
///
/// `amount` is the frozen product `round2(rate × quantity)` - it never
/// includes GST, which is applied once at the quotation level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuotationItem {
    /// 1-based serial number, contiguous within its quotation.
    pub sno: u32,

    /// Item description shown on the document.
    pub item_name: String,

    /// Unit rate. May come from direct entry or from pricing composition.
    #[ts(as = "f64")]
    pub rate: Decimal,

    /// Quantity, possibly fractional (e.g. 2.5 metres).
    #[ts(as = "f64")]
    pub quantity: Decimal,

    /// Unit of measure ("Nos", "Mtr", ...).
    pub unit: String,

    /// Line amount, `round2(rate × quantity)`.
    #[ts(as = "f64")]
    pub amount: Decimal,
}

// =============================================================================
// Quotation
// =============================================================================

/// A buyer-facing quotation: items plus frozen totals.
///
/// Immutable once created except through an explicit full-content update,
/// which keeps `id`, `created_at` and `date` and replaces everything else.
/// Visibility over time is governed by [`crate::retention`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    /// Unique identifier: epoch-millisecond string, monotonically increasing.
    pub id: String,

    pub buyer_name: String,

    pub buyer_address: String,

    /// Ordered line items; order is presentation order.
    pub items: Vec<QuotationItem>,

    /// Sum of the already-rounded item amounts.
    #[ts(as = "f64")]
    pub subtotal: Decimal,

    /// GST on the subtotal, or zero when the quotation is GST-free.
    #[ts(as = "f64")]
    pub gst: Decimal,

    /// Flat transport charge added to the total, never negative.
    #[ts(as = "f64")]
    pub transport_charges: Decimal,

    /// `round2(subtotal + gst + transportCharges)`.
    #[ts(as = "f64")]
    pub total: Decimal,

    /// Creation instant, epoch milliseconds UTC. Never changes on update.
    pub created_at: i64,

    /// DD/MM/YYYY, frozen at creation and never recomputed.
    pub date: String,
}

impl Quotation {
    /// Returns the creation instant as a `DateTime`, if representable.
    #[inline]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    /// Number of line items.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Timestamp Helpers
// =============================================================================

/// Derives the frozen DD/MM/YYYY date string for a creation instant.
///
/// Computed once at creation time and stored; re-deriving later must never
/// happen (the stored string is authoritative even across timezone moves).
pub fn date_for_timestamp(created_at_ms: i64) -> Result<String, ValidationError> {
    let instant = DateTime::from_timestamp_millis(created_at_ms).ok_or_else(|| {
        ValidationError::InvalidFormat {
            field: "createdAt".to_string(),
            reason: "timestamp out of representable range".to_string(),
        }
    })?;
    Ok(instant.format("%d/%m/%Y").to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_quotation() -> Quotation {
        Quotation {
            id: "1718000000000".to_string(),
            buyer_name: "Sri Murugan Traders".to_string(),
            buyer_address: "12, Big Bazaar Street, Coimbatore".to_string(),
            items: vec![QuotationItem {
                sno: 1,
                item_name: "PVC Pipe 2in".to_string(),
                rate: dec!(150),
                quantity: dec!(5),
                unit: "Nos".to_string(),
                amount: dec!(750),
            }],
            subtotal: dec!(750),
            gst: dec!(135),
            transport_charges: dec!(25),
            total: dec!(910),
            created_at: 1_718_000_000_000,
            date: "10/06/2024".to_string(),
        }
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let json = serde_json::to_value(sample_quotation()).unwrap();

        assert!(json.get("buyerName").is_some());
        assert!(json.get("buyerAddress").is_some());
        assert!(json.get("transportCharges").is_some());
        assert!(json.get("createdAt").is_some());

        let item = &json["items"][0];
        assert!(item.get("itemName").is_some());
        assert!(item.get("sno").is_some());
    }

    #[test]
    fn test_amounts_serialize_as_numbers() {
        let json = serde_json::to_value(sample_quotation()).unwrap();
        assert!(json["subtotal"].is_number());
        assert!(json["items"][0]["rate"].is_number());
    }

    #[test]
    fn test_configuration_round_trip() {
        let raw = r#"{
            "id": "1718000000001",
            "name": "Finolex Standard",
            "firstDiscount": 5,
            "secondDiscount": 2.5,
            "margin": 15,
            "createdAt": 1718000000001
        }"#;
        let config: Configuration = serde_json::from_str(raw).unwrap();
        assert_eq!(config.name, "Finolex Standard");
        assert_eq!(config.second_discount, dec!(2.5));

        let back = serde_json::to_value(&config).unwrap();
        assert!(back.get("firstDiscount").is_some());
        assert!(back.get("secondDiscount").is_some());
    }

    #[test]
    fn test_date_for_timestamp() {
        // 2024-06-10 06:13:20 UTC
        assert_eq!(date_for_timestamp(1_718_000_000_000).unwrap(), "10/06/2024");
        assert!(date_for_timestamp(i64::MAX).is_err());
    }
}
