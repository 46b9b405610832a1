//! # Quotation Repository
//!
//! Lifecycle operations for quotations.
//!
//! ## Quotation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  1. CREATE                                                          │
//! │     └── create() → aggregator freezes amounts, totals, id, date     │
//! │                                                                     │
//! │  2. (OPTIONAL) UPDATE                                               │
//! │     └── update() → same id/createdAt/date, content replaced         │
//! │                                                                     │
//! │  3. EXPORT (any number of times)                                    │
//! │     └── render() → deterministic DocumentTree for the PDF backend   │
//! │                                                                     │
//! │  4. AGE OUT                                                         │
//! │     └── list() hides it after 30 days; sweep() removes it after     │
//! │         the integrator's purge bound                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Listings always pass through the retention filter; `get` and `render`
//! work by id and still reach records that have aged out of listings but
//! have not been purged.

use chrono::{Duration, Utc};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::gateway::{BlobGateway, QUOTATIONS_KEY};
use crate::identity::Identity;
use crate::repository::{load_list, next_time_id, save_list};
use pipequote_core::document::{self, DocumentTree};
use pipequote_core::quote::{self, QuotationDraft};
use pipequote_core::retention;
use pipequote_core::types::Quotation;

/// Repository for quotation operations.
#[derive(Debug, Clone)]
pub struct QuotationRepository<G: BlobGateway> {
    gateway: G,
}

impl<G: BlobGateway> QuotationRepository<G> {
    /// Creates a new QuotationRepository.
    pub fn new(gateway: G) -> Self {
        QuotationRepository { gateway }
    }

    /// Lists visible quotations, newest first.
    ///
    /// Always filtered through the 30-day retention window; callers never
    /// see aged-out records here. Read-only - hidden records are left in
    /// place for `sweep` to remove later.
    pub fn list(&self, identity: &Identity) -> StoreResult<Vec<Quotation>> {
        debug!(subject = identity.subject(), "listing quotations");
        let all = self.load()?;
        Ok(retention::list_active(&all, Utc::now()))
    }

    /// Gets a quotation by its ID, including aged-out (unpurged) records.
    pub fn get(&self, identity: &Identity, id: &str) -> StoreResult<Option<Quotation>> {
        debug!(subject = identity.subject(), id, "fetching quotation");
        Ok(self.load()?.into_iter().find(|q| q.id == id))
    }

    /// Creates a quotation from a draft.
    ///
    /// The aggregator does all the math and validation; this method owns
    /// the clock and the id sequence. A rejected draft never touches the
    /// stored list.
    pub fn create(&self, identity: &Identity, draft: &QuotationDraft) -> StoreResult<Quotation> {
        let mut all = self.load()?;

        let now_ms = Utc::now().timestamp_millis();
        let id = next_time_id(now_ms, all.iter().map(|q| q.id.as_str()));
        let quotation = quote::build(draft, &id, now_ms)?;

        all.push(quotation.clone());
        save_list(&self.gateway, QUOTATIONS_KEY, &all)?;

        info!(
            subject = identity.subject(),
            id = %quotation.id,
            buyer = %quotation.buyer_name,
            total = %quotation.total,
            items = quotation.items.len(),
            "quotation created"
        );
        Ok(quotation)
    }

    /// Replaces a quotation's content, keeping id, `createdAt` and `date`.
    pub fn update(
        &self,
        identity: &Identity,
        id: &str,
        draft: &QuotationDraft,
    ) -> StoreResult<Quotation> {
        let mut all = self.load()?;

        let index = all
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| StoreError::not_found("Quotation", id))?;

        let updated = quote::rebuild(&all[index], draft)?;
        all[index] = updated.clone();
        save_list(&self.gateway, QUOTATIONS_KEY, &all)?;

        info!(subject = identity.subject(), id, total = %updated.total, "quotation updated");
        Ok(updated)
    }

    /// Deletes a quotation.
    pub fn delete(&self, identity: &Identity, id: &str) -> StoreResult<()> {
        let mut all = self.load()?;

        let before = all.len();
        all.retain(|q| q.id != id);
        if all.len() == before {
            return Err(StoreError::not_found("Quotation", id));
        }

        save_list(&self.gateway, QUOTATIONS_KEY, &all)?;
        info!(subject = identity.subject(), id, "quotation deleted");
        Ok(())
    }

    /// Permanently removes quotations older than `purge_after`.
    ///
    /// Same read-modify-write discipline as the other mutations. Skips the
    /// write entirely when nothing aged out, so an idle sweep is a pure
    /// read. Returns how many records were removed.
    pub fn sweep(&self, identity: &Identity, purge_after: Duration) -> StoreResult<usize> {
        let all = self.load()?;

        let outcome = retention::sweep(all, Utc::now(), purge_after)?;
        if outcome.removed > 0 {
            save_list(&self.gateway, QUOTATIONS_KEY, &outcome.retained)?;
            info!(
                subject = identity.subject(),
                removed = outcome.removed,
                "purged aged-out quotations"
            );
        }

        Ok(outcome.removed)
    }

    /// Renders a quotation into its printable document tree.
    pub fn render(&self, identity: &Identity, id: &str) -> StoreResult<DocumentTree> {
        let quotation = self
            .get(identity, id)?
            .ok_or_else(|| StoreError::not_found("Quotation", id))?;

        let tree = document::render(&quotation)?;
        debug!(subject = identity.subject(), id, "quotation rendered");
        Ok(tree)
    }

    fn load(&self) -> StoreResult<Vec<Quotation>> {
        load_list(&self.gateway, QUOTATIONS_KEY, |_: &Quotation| true)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
