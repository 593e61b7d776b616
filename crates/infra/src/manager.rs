//! Application-side invoice manager.
//!
//! The manager owns everything the calculator refuses to: required-field
//! validation, identifier assignment, per-user visibility, and persistence
//! wiring. All figures still come from the domain crate; nothing here does
//! arithmetic.

use chrono::{DateTime, Utc};

use ledgerline_assist::{DashboardSummary, ReminderContext};
use ledgerline_core::{DomainError, DomainResult, InvoiceId, UserId};
use ledgerline_invoicing::{
    normalize_items_checked, CoercionWarning, Invoice, InvoiceDraft, InvoicePatch,
};

use crate::store::InvoiceStore;

/// Manages one user's invoice records over a pluggable store.
///
/// Records belonging to other users are reported as missing, never as
/// forbidden, so callers cannot probe for foreign ids.
pub struct InvoiceManager<S: InvoiceStore> {
    store: S,
}

impl<S: InvoiceStore> InvoiceManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate a draft, assign an id, compute totals and persist.
    ///
    /// Malformed numeric fields do not fail creation; they are logged and
    /// contribute zero.
    pub fn create(
        &self,
        user_id: UserId,
        draft: InvoiceDraft,
        now: DateTime<Utc>,
    ) -> DomainResult<Invoice> {
        let (_, warnings) = normalize_items_checked(&draft.items);
        let invoice = Invoice::from_draft(InvoiceId::new(), user_id, draft, now)?;
        self.store.insert(invoice.clone())?;

        log_coercions(invoice.id, &warnings);
        tracing::info!(
            "created invoice {} for user {} (total {:.2})",
            invoice.id,
            user_id,
            invoice.totals.total
        );
        Ok(invoice)
    }

    /// All invoices visible to the user, newest first.
    pub fn list_for_user(&self, user_id: UserId) -> Vec<Invoice> {
        self.store.list_for_user(user_id)
    }

    pub fn get(&self, user_id: UserId, id: InvoiceId) -> DomainResult<Invoice> {
        self.owned(user_id, id)
    }

    /// Apply a partial update and persist the recomputed record.
    pub fn update(
        &self,
        user_id: UserId,
        id: InvoiceId,
        patch: InvoicePatch,
        now: DateTime<Utc>,
    ) -> DomainResult<Invoice> {
        let existing = self.owned(user_id, id)?;
        let warnings = match patch.items.as_deref() {
            Some(items) => normalize_items_checked(items).1,
            None => Vec::new(),
        };

        let updated = existing.apply_patch(patch, now)?;
        self.store.update(updated.clone())?;

        log_coercions(updated.id, &warnings);
        tracing::info!(
            "updated invoice {} for user {} (total {:.2})",
            updated.id,
            user_id,
            updated.totals.total
        );
        Ok(updated)
    }

    pub fn remove(&self, user_id: UserId, id: InvoiceId) -> DomainResult<()> {
        self.owned(user_id, id)?;
        if self.store.remove(id).is_none() {
            return Err(DomainError::not_found());
        }
        tracing::info!("deleted invoice {} for user {}", id, user_id);
        Ok(())
    }

    /// Aggregate dashboard figures over the user's invoices.
    pub fn dashboard_summary(&self, user_id: UserId) -> DashboardSummary {
        DashboardSummary::from_invoices(&self.list_for_user(user_id))
    }

    /// Context for a payment-reminder prompt about one invoice.
    pub fn reminder_context(
        &self,
        user_id: UserId,
        id: InvoiceId,
    ) -> DomainResult<ReminderContext> {
        Ok(ReminderContext::from_invoice(&self.owned(user_id, id)?))
    }

    fn owned(&self, user_id: UserId, id: InvoiceId) -> DomainResult<Invoice> {
        match self.store.get(id) {
            Some(invoice) if invoice.user_id == user_id => Ok(invoice),
            _ => Err(DomainError::not_found()),
        }
    }
}

fn log_coercions(id: InvoiceId, warnings: &[CoercionWarning]) {
    for warning in warnings {
        tracing::warn!(
            "invoice {}: item {} {:?} was {} and contributed zero",
            id,
            warning.item_index,
            warning.field,
            warning.given
        );
    }
}
