//! # Document Module
//!
//! Turns a finalized [`Quotation`] into a printable layout tree.
//!
//! ## The Rendering Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        DocumentTree                                 │
//! │                                                                     │
//! │  1. Header   - fixed company identity (never varies per quote)     │
//! │  2. Meta     - quotation id, frozen date, item count               │
//! │  3. Buyer    - BILL TO block                                        │
//! │  4. Items    - six fixed columns, one row per item, in item order  │
//! │  5. Summary  - subtotal, conditional GST/transport lines, total    │
//! │  6. Footer   - fixed thank-you line                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tree is the boundary between quotation data and any concrete PDF or
//! print backend: every cell is a pre-formatted string, alignment and
//! emphasis are explicit, and nothing in here reads the clock, the locale,
//! or anything else outside the quotation itself. Two structurally equal
//! quotations therefore always render to structurally equal trees, which is
//! what makes re-exporting an old quotation reproducible.
//!
//! The renderer fails closed: a quotation that violates the structural
//! invariants (no items, blank buyer, broken serials) produces a
//! [`CoreError::RenderFailure`], never a partial tree.

use rust_decimal::Decimal;
use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{format_2dp, format_quantity};
use crate::types::Quotation;
use crate::GST_RATE;

// =============================================================================
// Company Identity
// =============================================================================
// Fixed letterhead text. Deliberately configuration-independent: every
// exported document carries the same identity block.

const COMPANY_NAME: &str = "PIPE CENTER";
const COMPANY_ADDRESS: [&str; 2] = [
    "51, MARIYAPPA STREET, KATTOOR,",
    "COIMBATORE, PIN - 641 009",
];
const COMPANY_CONTACT: &str = "+91 9894858006 / +91 9894154439";
const DOCUMENT_TITLE: &str = "QUOTATION";
const FOOTER_MESSAGE: &str = "Thank you for your business!";

// =============================================================================
// Layout Primitives
// =============================================================================

/// Horizontal alignment of a block or table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Visual weight of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Regular,
    Strong,
}

// =============================================================================
// Sections
// =============================================================================

/// Fixed company identity block at the top of every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBlock {
    pub company_name: String,
    pub address_lines: Vec<String>,
    pub contact: String,
    pub title: String,
}

/// Quotation identity: id, frozen date, item count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MetaBlock {
    pub quotation_id: String,
    pub date: String,
    pub item_count: usize,
}

/// BILL TO block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BuyerBlock {
    pub name: String,
    pub address_lines: Vec<String>,
}

/// A table column heading with its alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub heading: String,
    pub align: Align,
}

/// One rendered item row. Every numeric cell is pre-formatted:
/// rate and amount to two decimals, quantity with trailing zeros trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemRow {
    pub serial: String,
    pub name: String,
    pub rate: String,
    pub quantity: String,
    pub unit: String,
    pub amount: String,
}

/// The item table: fixed columns, one row per item in item order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemTable {
    pub columns: Vec<Column>,
    pub rows: Vec<ItemRow>,
}

/// A labelled amount line in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
    pub emphasis: Emphasis,
}

/// Totals block: subtotal always, GST and transport only when non-zero,
/// then the emphasized grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBlock {
    pub lines: Vec<SummaryLine>,
}

/// Fixed sign-off line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FooterBlock {
    pub message: String,
    pub align: Align,
}

/// One section of the document, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Section {
    Header(HeaderBlock),
    Meta(MetaBlock),
    Buyer(BuyerBlock),
    Items(ItemTable),
    Summary(SummaryBlock),
    Footer(FooterBlock),
}

/// The full printable layout of one quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTree {
    pub sections: Vec<Section>,
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders a quotation into its document tree.
///
/// Pure function over the quotation snapshot: same input, same tree,
/// every time. Takes a shared reference and never writes anywhere.
///
/// ## Errors
/// [`CoreError::RenderFailure`] when the quotation is structurally invalid
/// (no items, blank buyer fields, or non-contiguous serial numbers). These
/// states are unreachable for quotations built by [`crate::quote::build`].
pub fn render(quotation: &Quotation) -> CoreResult<DocumentTree> {
    check_renderable(quotation)?;

    let sections = vec![
        Section::Header(header_block()),
        Section::Meta(meta_block(quotation)),
        Section::Buyer(buyer_block(quotation)),
        Section::Items(item_table(quotation)),
        Section::Summary(summary_block(quotation)),
        Section::Footer(FooterBlock {
            message: FOOTER_MESSAGE.to_string(),
            align: Align::Center,
        }),
    ];

    Ok(DocumentTree { sections })
}

fn check_renderable(quotation: &Quotation) -> CoreResult<()> {
    let fail = |reason: &str| CoreError::RenderFailure {
        id: quotation.id.clone(),
        reason: reason.to_string(),
    };

    if quotation.items.is_empty() {
        return Err(fail("quotation has no items"));
    }
    if quotation.buyer_name.trim().is_empty() {
        return Err(fail("buyer name is blank"));
    }
    if quotation.buyer_address.trim().is_empty() {
        return Err(fail("buyer address is blank"));
    }

    // Serial numbers must be 1..=n in order; anything else means the record
    // was not produced by the aggregator and the layout cannot be trusted.
    for (index, item) in quotation.items.iter().enumerate() {
        if item.sno as usize != index + 1 {
            return Err(fail("item serial numbers are not contiguous"));
        }
    }

    Ok(())
}

fn header_block() -> HeaderBlock {
    HeaderBlock {
        company_name: COMPANY_NAME.to_string(),
        address_lines: COMPANY_ADDRESS.iter().map(|s| s.to_string()).collect(),
        contact: format!("Contact: {COMPANY_CONTACT}"),
        title: DOCUMENT_TITLE.to_string(),
    }
}

fn meta_block(quotation: &Quotation) -> MetaBlock {
    MetaBlock {
        quotation_id: quotation.id.clone(),
        date: quotation.date.clone(),
        item_count: quotation.item_count(),
    }
}

fn buyer_block(quotation: &Quotation) -> BuyerBlock {
    BuyerBlock {
        name: quotation.buyer_name.clone(),
        address_lines: quotation
            .buyer_address
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect(),
    }
}

fn item_table(quotation: &Quotation) -> ItemTable {
    let column = |heading: &str, align: Align| Column {
        heading: heading.to_string(),
        align,
    };

    ItemTable {
        columns: vec![
            column("S.No", Align::Center),
            column("Item Name", Align::Left),
            column("Rate (₹)", Align::Right),
            column("Quantity", Align::Right),
            column("Unit", Align::Center),
            column("Amount (₹)", Align::Right),
        ],
        rows: quotation
            .items
            .iter()
            .map(|item| ItemRow {
                serial: item.sno.to_string(),
                name: item.item_name.clone(),
                rate: format_2dp(item.rate),
                quantity: format_quantity(item.quantity),
                unit: item.unit.clone(),
                amount: format_2dp(item.amount),
            })
            .collect(),
    }
}

fn summary_block(quotation: &Quotation) -> SummaryBlock {
    let line = |label: String, value: String, emphasis: Emphasis| SummaryLine {
        label,
        value,
        emphasis,
    };

    let mut lines = vec![line(
        "Subtotal".to_string(),
        format_2dp(quotation.subtotal),
        Emphasis::Regular,
    )];

    if quotation.gst > Decimal::ZERO {
        lines.push(line(
            gst_label(),
            format_2dp(quotation.gst),
            Emphasis::Regular,
        ));
    }

    if quotation.transport_charges > Decimal::ZERO {
        lines.push(line(
            "Transport Charges".to_string(),
            format_2dp(quotation.transport_charges),
            Emphasis::Regular,
        ));
    }

    lines.push(line(
        "TOTAL".to_string(),
        format_2dp(quotation.total),
        Emphasis::Strong,
    ));

    SummaryBlock { lines }
}

/// "GST (18%)" - the percentage comes from the same constant the
/// aggregation math uses, so the label can never drift from the charge.
fn gst_label() -> String {
    let pct = (GST_RATE * Decimal::ONE_HUNDRED).normalize();
    format!("GST ({pct}%)")
}

// =============================================================================
// Unit Tests
// =============================================================================
