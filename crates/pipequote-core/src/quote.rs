//! # Quotation Aggregation
//!
//! Builds a finalized [`Quotation`] from a draft: resolves each item's rate,
//! freezes per-item amounts, and computes the quotation-level totals.
//!
//! ## Totals Contract
//! ```text
//! amount(item) = round2(rate × quantity)        rounded PER ITEM
//! subtotal     = Σ amount(item)                 sums already-rounded values
//! gst          = applyGst ? round2(subtotal × 0.18) : 0
//! total        = round2(subtotal + gst + transportCharges)
//! ```
//!
//! Per-item rounding before summation is a drift-prevention invariant: the
//! printed line amounts must add up to the printed subtotal exactly, so the
//! subtotal is defined over the rounded amounts, not the raw products.
//!
//! GST is applied exactly once, at the quotation level. Rates resolved
//! through the pricing engine inside an item always have the engine's GST
//! flag forced off, so a configuration-derived rate can never smuggle GST
//! into `amount` and get taxed again.

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::money::round2;
use crate::pricing;
use crate::types::{date_for_timestamp, Configuration, Quotation, QuotationItem};
use crate::validation::{
    validate_buyer_address, validate_buyer_name, validate_item_name, validate_quantity,
    validate_rate, validate_transport_charges, validate_unit,
};
use crate::{GST_RATE, MAX_QUOTATION_ITEMS};

// =============================================================================
// Rate Sources
// =============================================================================

/// Where a draft item's unit rate comes from.
///
/// Every variant resolves to a plain rate before any quantity math happens;
/// sources that go through the pricing engine do so GST-free.
#[derive(Debug, Clone, PartialEq)]
pub enum RateSource {
    /// Operator typed the rate directly.
    Direct { rate: Decimal },

    /// Rate derived from a saved configuration applied to a list price.
    Configured {
        configuration: Configuration,
        initial_price: Decimal,
    },

    /// One-off percentage triple not worth saving as a configuration.
    Custom {
        initial_price: Decimal,
        first_discount: Decimal,
        second_discount: Decimal,
        margin: Decimal,
    },
}

impl RateSource {
    /// Resolves the source to a concrete unit rate.
    ///
    /// The pricing engine's GST flag is hard-wired off here; GST belongs to
    /// the quotation level only.
    pub fn resolve(&self) -> CoreResult<Decimal> {
        match self {
            RateSource::Direct { rate } => {
                validate_rate(*rate)?;
                Ok(*rate)
            }
            RateSource::Configured {
                configuration,
                initial_price,
            } => pricing::rate_from_configuration(configuration, *initial_price, false),
            RateSource::Custom {
                initial_price,
                first_discount,
                second_discount,
                margin,
            } => pricing::compute_final_price(
                *initial_price,
                *first_discount,
                *second_discount,
                *margin,
                false,
            ),
        }
    }
}

// =============================================================================
// Drafts
// =============================================================================

/// A line item as entered by the operator, before amounts are frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub item_name: String,
    pub rate: RateSource,
    pub quantity: Decimal,
    pub unit: String,
}

/// A quotation as entered by the operator, before totals are frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotationDraft {
    pub buyer_name: String,
    pub buyer_address: String,
    pub items: Vec<ItemDraft>,
    pub apply_gst: bool,
    pub transport_charges: Decimal,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Builds a finalized quotation from a draft.
///
/// The caller supplies `id` and `created_at` (the store layer owns the clock
/// and id sequence); everything else is computed here. The items keep draft
/// order and receive contiguous 1-based serial numbers.
///
/// ## Errors
/// - [`CoreError::EmptyQuotation`] for a draft with no items
/// - [`CoreError::InvalidItem`] naming the 1-based `sno` of the first bad
///   item (non-positive quantity, negative rate, bad percentages, blank
///   name or unit)
/// - [`CoreError::Validation`] for buyer/transport field problems
pub fn build(draft: &QuotationDraft, id: &str, created_at: i64) -> CoreResult<Quotation> {
    validate_buyer_name(&draft.buyer_name)?;
    validate_buyer_address(&draft.buyer_address)?;
    validate_transport_charges(draft.transport_charges)?;

    if draft.items.is_empty() {
        return Err(CoreError::EmptyQuotation);
    }
    if draft.items.len() > MAX_QUOTATION_ITEMS {
        return Err(CoreError::TooManyItems {
            max: MAX_QUOTATION_ITEMS,
        });
    }

    let mut items = Vec::with_capacity(draft.items.len());
    for (index, item) in draft.items.iter().enumerate() {
        let sno = (index + 1) as u32;
        items.push(build_item(item, sno)?);
    }

    let subtotal: Decimal = items.iter().map(|item| item.amount).sum();
    let gst = if draft.apply_gst {
        round2(subtotal * GST_RATE)
    } else {
        Decimal::ZERO
    };
    let total = round2(subtotal + gst + draft.transport_charges);

    Ok(Quotation {
        id: id.to_string(),
        buyer_name: draft.buyer_name.trim().to_string(),
        buyer_address: draft.buyer_address.trim().to_string(),
        items,
        subtotal,
        gst,
        transport_charges: draft.transport_charges,
        total,
        created_at,
        date: date_for_timestamp(created_at)?,
    })
}

/// Rebuilds a quotation's content from a new draft, keeping its identity.
///
/// The update path: `id`, `created_at` and the frozen `date` survive, the
/// rest is replaced wholesale.
pub fn rebuild(existing: &Quotation, draft: &QuotationDraft) -> CoreResult<Quotation> {
    let mut updated = build(draft, &existing.id, existing.created_at)?;
    updated.date = existing.date.clone();
    Ok(updated)
}

fn build_item(draft: &ItemDraft, sno: u32) -> CoreResult<QuotationItem> {
    let invalid = |err: CoreError| CoreError::InvalidItem {
        sno,
        reason: item_error_reason(err),
    };

    validate_item_name(&draft.item_name).map_err(|e| invalid(e.into()))?;
    validate_unit(&draft.unit).map_err(|e| invalid(e.into()))?;
    validate_quantity(draft.quantity).map_err(|e| invalid(e.into()))?;

    let rate = draft.rate.resolve().map_err(invalid)?;

    Ok(QuotationItem {
        sno,
        item_name: draft.item_name.trim().to_string(),
        rate,
        quantity: draft.quantity,
        unit: draft.unit.trim().to_string(),
        amount: round2(rate * draft.quantity),
    })
}

fn item_error_reason(err: CoreError) -> String {
    match err {
        CoreError::Validation(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CREATED_AT: i64 = 1_718_000_000_000;

    fn direct_item(name: &str, rate: Decimal, quantity: Decimal) -> ItemDraft {
        ItemDraft {
            item_name: name.to_string(),
            rate: RateSource::Direct { rate },
            quantity,
            unit: "Nos".to_string(),
        }
    }

    fn draft(items: Vec<ItemDraft>, apply_gst: bool, transport: Decimal) -> QuotationDraft {
        QuotationDraft {
            buyer_name: "Sri Murugan Traders".to_string(),
            buyer_address: "12, Big Bazaar Street, Coimbatore".to_string(),
            items,
            apply_gst,
            transport_charges: transport,
        }
    }

    #[test]
    fn test_reference_totals() {
        // {rate: 150, qty: 5} → amount 750; +18% GST = 135; +25 transport = 910
        let q = build(
            &draft(vec![direct_item("PVC Pipe 2in", dec!(150), dec!(5))], true, dec!(25)),
            "1718000000000",
            CREATED_AT,
        )
        .unwrap();

        assert_eq!(q.items[0].amount, dec!(750));
        assert_eq!(q.subtotal, dec!(750));
        assert_eq!(q.gst, dec!(135));
        assert_eq!(q.total, dec!(910));
        assert_eq!(q.date, "10/06/2024");
    }

    #[test]
    fn test_gst_off_means_zero() {
        let q = build(
            &draft(vec![direct_item("Elbow", dec!(10), dec!(3))], false, dec!(0)),
            "1",
            CREATED_AT,
        )
        .unwrap();
        assert_eq!(q.gst, dec!(0));
        assert_eq!(q.total, dec!(30));
    }

    #[test]
    fn test_amounts_round_per_item_before_summing() {
        // Each line rounds up half a paisa; a deferred rounding would lose one.
        // 1.115 × 1 → 1.12 per line; two lines → 2.24 (not round2(2.23) = 2.23)
        let q = build(
            &draft(
                vec![
                    direct_item("Washer A", dec!(1.115), dec!(1)),
                    direct_item("Washer B", dec!(1.115), dec!(1)),
                ],
                false,
                dec!(0),
            ),
            "1",
            CREATED_AT,
        )
        .unwrap();

        assert_eq!(q.items[0].amount, dec!(1.12));
        assert_eq!(q.subtotal, dec!(2.24));
    }

    #[test]
    fn test_snos_are_contiguous_and_one_based() {
        let q = build(
            &draft(
                vec![
                    direct_item("A", dec!(1), dec!(1)),
                    direct_item("B", dec!(2), dec!(1)),
                    direct_item("C", dec!(3), dec!(1)),
                ],
                false,
                dec!(0),
            ),
            "1",
            CREATED_AT,
        )
        .unwrap();
        let snos: Vec<u32> = q.items.iter().map(|i| i.sno).collect();
        assert_eq!(snos, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_quotation_rejected() {
        let err = build(&draft(vec![], true, dec!(0)), "1", CREATED_AT).unwrap_err();
        assert!(matches!(err, CoreError::EmptyQuotation));
    }

    #[test]
    fn test_invalid_item_names_offending_sno() {
        let err = build(
            &draft(
                vec![
                    direct_item("A", dec!(1), dec!(1)),
                    direct_item("B", dec!(2), dec!(1)),
                    direct_item("C", dec!(3), dec!(0)), // third item, zero quantity
                ],
                false,
                dec!(0),
            ),
            "1",
            CREATED_AT,
        )
        .unwrap_err();

        match err {
            CoreError::InvalidItem { sno, .. } => assert_eq!(sno, 3),
            other => panic!("expected InvalidItem, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = build(
            &draft(vec![direct_item("A", dec!(-5), dec!(1))], false, dec!(0)),
            "1",
            CREATED_AT,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidItem { sno: 1, .. }));
    }

    #[test]
    fn test_configured_rate_is_gst_free() {
        // The configuration-derived rate must match the engine with GST off,
        // even when the quotation itself applies GST on the subtotal.
        let configuration = Configuration {
            id: "77".to_string(),
            name: "Standard".to_string(),
            first_discount: dec!(5),
            second_discount: dec!(2.5),
            margin: dec!(15),
            created_at: 0,
        };
        let q = build(
            &draft(
                vec![ItemDraft {
                    item_name: "PVC Pipe 4in".to_string(),
                    rate: RateSource::Configured {
                        configuration,
                        initial_price: dec!(1000),
                    },
                    quantity: dec!(1),
                    unit: "Nos".to_string(),
                }],
                true,
                dec!(0),
            ),
            "1",
            CREATED_AT,
        )
        .unwrap();

        assert_eq!(q.items[0].rate, dec!(1065.19)); // not 1256.92
        assert_eq!(q.gst, round2(q.subtotal * GST_RATE));
    }

    #[test]
    fn test_custom_formula_source() {
        let q = build(
            &draft(
                vec![ItemDraft {
                    item_name: "GI Pipe".to_string(),
                    rate: RateSource::Custom {
                        initial_price: dec!(200),
                        first_discount: dec!(10),
                        second_discount: dec!(0),
                        margin: dec!(5),
                    },
                    quantity: dec!(2),
                    unit: "Mtr".to_string(),
                }],
                false,
                dec!(0),
            ),
            "1",
            CREATED_AT,
        )
        .unwrap();

        // 200 × 0.90 × 1.05 = 189
        assert_eq!(q.items[0].rate, dec!(189));
        assert_eq!(q.subtotal, dec!(378));
    }

    #[test]
    fn test_bad_percentage_in_source_names_sno() {
        let err = build(
            &draft(
                vec![ItemDraft {
                    item_name: "GI Pipe".to_string(),
                    rate: RateSource::Custom {
                        initial_price: dec!(200),
                        first_discount: dec!(120),
                        second_discount: dec!(0),
                        margin: dec!(5),
                    },
                    quantity: dec!(1),
                    unit: "Mtr".to_string(),
                }],
                false,
                dec!(0),
            ),
            "1",
            CREATED_AT,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidItem { sno: 1, .. }));
    }

    #[test]
    fn test_rebuild_keeps_identity() {
        let original = build(
            &draft(vec![direct_item("A", dec!(150), dec!(5))], true, dec!(25)),
            "1718000000000",
            CREATED_AT,
        )
        .unwrap();

        let updated = rebuild(
            &original,
            &draft(vec![direct_item("B", dec!(100), dec!(2))], false, dec!(0)),
        )
        .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.date, original.date);
        assert_eq!(updated.subtotal, dec!(200));
        assert_eq!(updated.gst, dec!(0));
    }

    #[test]
    fn test_blank_buyer_rejected() {
        let mut d = draft(vec![direct_item("A", dec!(1), dec!(1))], false, dec!(0));
        d.buyer_name = "  ".to_string();
        assert!(matches!(
            build(&d, "1", CREATED_AT).unwrap_err(),
            CoreError::Validation(_)
        ));
    }

    #[test]
    fn test_negative_transport_rejected() {
        let d = draft(vec![direct_item("A", dec!(1), dec!(1))], false, dec!(-1));
        assert!(build(&d, "1", CREATED_AT).is_err());
    }
}
