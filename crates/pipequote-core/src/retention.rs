//! # Retention Module
//!
//! Governs how long quotations stay visible and when they may be purged.
//!
//! ## Two Independent Clocks
//! ```text
//! createdAt ──── 30 days ────┬───────── purgeAfter ─────────┬──────►
//!                            │                              │
//!        VISIBLE             │   HIDDEN (still recoverable) │  PURGED
//!   appears in listings      │   fetchable by id only       │  gone
//! ```
//!
//! Visibility is elapsed wall-clock time, not calendar-day truncation: a
//! quotation created exactly 30 days ago (to the millisecond) is still
//! visible; one millisecond later it is not. Purging uses a second, longer
//! bound chosen by the integrator so hidden records stay recoverable for a
//! while before they are removed for good.
//!
//! `list_active` never mutates anything; only `sweep` deletes, and sweeping
//! twice with the same inputs removes nothing the first pass didn't.

use chrono::{DateTime, Duration, Utc};
use std::cmp::Ordering;

use crate::error::{CoreResult, ValidationError};
use crate::types::Quotation;
use crate::RETENTION_WINDOW_DAYS;

/// The visibility window as a duration.
#[inline]
pub fn retention_window() -> Duration {
    Duration::days(RETENTION_WINDOW_DAYS)
}

/// Whether a quotation is still visible at `now`.
///
/// Inclusive at the boundary: elapsed time of exactly 30 days is active.
pub fn is_active(quotation: &Quotation, now: DateTime<Utc>) -> bool {
    let elapsed_ms = now.timestamp_millis() - quotation.created_at;
    elapsed_ms <= retention_window().num_milliseconds()
}

/// Filters to active quotations, newest first.
///
/// Ordering is `createdAt` descending; records created in the same
/// millisecond fall back to id descending (ids are digit strings, compared
/// numerically). The input is not mutated.
pub fn list_active(quotations: &[Quotation], now: DateTime<Utc>) -> Vec<Quotation> {
    let mut active: Vec<Quotation> = quotations
        .iter()
        .filter(|q| is_active(q, now))
        .cloned()
        .collect();

    active.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| cmp_ids(&b.id, &a.id))
    });

    active
}

/// Result of a purge sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    /// Records that survive the sweep, in their original order.
    pub retained: Vec<Quotation>,
    /// How many records the sweep removed.
    pub removed: usize,
}

/// Removes quotations whose age exceeds `purge_after`.
///
/// `purge_after` must be at least the visibility window, so a record can
/// never be purged while it is still listable. Idempotent by construction:
/// the predicate depends only on (`createdAt`, `now`, `purge_after`), so a
/// second sweep with the same inputs is a no-op.
///
/// ## Example
/// ```rust,ignore
/// let outcome = sweep(all, now, Duration::days(90))?;
/// store.put(QUOTATIONS_KEY, &outcome.retained)?;
/// ```
pub fn sweep(
    quotations: Vec<Quotation>,
    now: DateTime<Utc>,
    purge_after: Duration,
) -> CoreResult<SweepOutcome> {
    if purge_after < retention_window() {
        return Err(ValidationError::WindowTooShort {
            field: "purgeAfter".to_string(),
            min_days: RETENTION_WINDOW_DAYS,
        }
        .into());
    }

    let cutoff_ms = purge_after.num_milliseconds();
    let before = quotations.len();
    let retained: Vec<Quotation> = quotations
        .into_iter()
        .filter(|q| now.timestamp_millis() - q.created_at <= cutoff_ms)
        .collect();

    let removed = before - retained.len();
    Ok(SweepOutcome { retained, removed })
}

/// Compares quotation ids, numerically when both are digit strings.
///
/// Ids are epoch-millisecond strings, so plain lexicographic order breaks
/// once lengths differ (e.g. a legacy shorter id). Digit strings compare by
/// (length, lexicographic), which equals numeric order without overflow.
fn cmp_ids(a: &str, b: &str) -> Ordering {
    let both_numeric =
        !a.is_empty() && !b.is_empty() && a.bytes().all(|c| c.is_ascii_digit())
            && b.bytes().all(|c| c.is_ascii_digit());

    if both_numeric {
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    } else {
        a.cmp(b)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuotationItem;
    use rust_decimal_macros::dec;

    fn quotation(id: &str, created_at: i64) -> Quotation {
        Quotation {
            id: id.to_string(),
            buyer_name: "Buyer".to_string(),
            buyer_address: "Address".to_string(),
            items: vec![QuotationItem {
                sno: 1,
                item_name: "Item".to_string(),
                rate: dec!(10),
                quantity: dec!(1),
                unit: "Nos".to_string(),
                amount: dec!(10),
            }],
            subtotal: dec!(10),
            gst: dec!(0),
            transport_charges: dec!(0),
            total: dec!(10),
            created_at,
            date: "01/01/2024".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_718_000_000_000).unwrap()
    }

    fn days_ago(days: i64) -> i64 {
        now().timestamp_millis() - Duration::days(days).num_milliseconds()
    }

    #[test]
    fn test_visibility_boundaries() {
        assert!(is_active(&quotation("a", days_ago(29)), now()));
        assert!(!is_active(&quotation("b", days_ago(31)), now()));

        // Exactly 30 days is still visible; one millisecond past is not
        assert!(is_active(&quotation("c", days_ago(30)), now()));
        assert!(!is_active(&quotation("d", days_ago(30) - 1), now()));
    }

    #[test]
    fn test_list_active_filters_and_sorts_newest_first() {
        let all = vec![
            quotation("1", days_ago(10)),
            quotation("2", days_ago(31)), // hidden
            quotation("3", days_ago(1)),
            quotation("4", days_ago(29)),
        ];

        let active = list_active(&all, now());
        let ids: Vec<&str> = active.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "4"]);

        // Input untouched
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_list_active_ties_break_by_id_descending() {
        let stamp = days_ago(1);
        let all = vec![
            quotation("9", stamp),
            quotation("10", stamp), // numerically larger despite sorting before "9" as a string
            quotation("2", stamp),
        ];

        let active = list_active(&all, now());
        let ids: Vec<&str> = active.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["10", "9", "2"]);
    }

    #[test]
    fn test_sweep_removes_only_past_purge_bound() {
        let all = vec![
            quotation("fresh", days_ago(5)),
            quotation("hidden", days_ago(45)),  // hidden but recoverable
            quotation("ancient", days_ago(120)),
        ];

        let outcome = sweep(all, now(), Duration::days(90)).unwrap();
        assert_eq!(outcome.removed, 1);
        let ids: Vec<&str> = outcome.retained.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["fresh", "hidden"]);
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let all = vec![
            quotation("fresh", days_ago(5)),
            quotation("ancient", days_ago(120)),
        ];

        let once = sweep(all, now(), Duration::days(90)).unwrap();
        let twice = sweep(once.retained.clone(), now(), Duration::days(90)).unwrap();

        assert_eq!(twice.removed, 0);
        assert_eq!(once.retained, twice.retained);
    }

    #[test]
    fn test_sweep_rejects_window_shorter_than_visibility() {
        let err = sweep(vec![], now(), Duration::days(7)).unwrap_err();
        assert!(matches!(
            err,
            crate::CoreError::Validation(ValidationError::WindowTooShort { .. })
        ));

        // Equal to the visibility window is the floor, and allowed
        assert!(sweep(vec![], now(), Duration::days(30)).is_ok());
    }

    #[test]
    fn test_cmp_ids_numeric_and_fallback() {
        assert_eq!(cmp_ids("10", "9"), Ordering::Greater);
        assert_eq!(cmp_ids("100", "100"), Ordering::Equal);
        assert_eq!(cmp_ids("abc", "abd"), Ordering::Less);
    }
}
