//! Invoice records: drafts in, validated documents out.
//!
//! Construction and patching are pure functions; the caller supplies the
//! clock. Totals are never taken from input, they are recomputed from the
//! line items on every write path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ledgerline_core::{DomainError, DomainResult, InvoiceId, UserId};

use crate::line::{normalize_items, InvoiceTotals, LineItem, RawLineItem};

/// Payment terms applied when a draft does not name any.
pub const DEFAULT_PAYMENT_TERMS: &str = "Net 15";

/// Identity block for either side of an invoice.
///
/// The legacy wire shapes spelled the name `businessName` on the issuer and
/// `clientName` on the recipient; both decode into `name`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyDetails {
    #[serde(alias = "businessName", alias = "clientName")]
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

impl PartyDetails {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }

    /// All four fields are required; `prefix` names the side in error messages
    /// (e.g. `billFrom`).
    fn validate(&self, prefix: &str) -> DomainResult<()> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("address", &self.address),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "{prefix}.{field} is required"
                )));
            }
        }
        Ok(())
    }
}

/// Invoice payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    #[default]
    Unpaid,
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvoiceStatus::Paid => f.write_str("Paid"),
            InvoiceStatus::Unpaid => f.write_str("Unpaid"),
        }
    }
}

/// A stored invoice record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub user_id: UserId,
    pub invoice_number: String,
    pub invoice_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub bill_from: PartyDetails,
    pub bill_to: PartyDetails,
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub payment_terms: String,
    pub status: InvoiceStatus,
    #[serde(flatten)]
    pub totals: InvoiceTotals,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an invoice. Items are raw; totals are not accepted
/// from callers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub invoice_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bill_from: PartyDetails,
    #[serde(default)]
    pub bill_to: PartyDetails,
    #[serde(default)]
    pub items: Vec<RawLineItem>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_terms: Option<String>,
}

/// Partial update for an existing invoice.
///
/// Absent fields keep their stored value. Blank strings also keep the stored
/// value, matching how the legacy clients send untouched form fields. An
/// absent or empty item list means "recompute totals over the stored items".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bill_from: Option<PartyDetails>,
    #[serde(default)]
    pub bill_to: Option<PartyDetails>,
    #[serde(default)]
    pub items: Option<Vec<RawLineItem>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
}

fn keep_unless_given(patch: Option<String>, existing: &str) -> String {
    match patch {
        Some(s) if !s.trim().is_empty() => s,
        _ => existing.to_string(),
    }
}

impl Invoice {
    /// Build a validated invoice from a draft.
    ///
    /// Totals come from the line-item calculator; the draft's status is
    /// always `Unpaid` and its dates default from `now`.
    pub fn from_draft(
        id: InvoiceId,
        user_id: UserId,
        draft: InvoiceDraft,
        now: DateTime<Utc>,
    ) -> DomainResult<Invoice> {
        validate_invoice_number(&draft.invoice_number)?;
        draft.bill_from.validate("billFrom")?;
        draft.bill_to.validate("billTo")?;
        validate_item_names(&draft.items)?;

        let computed = normalize_items(&draft.items);

        Ok(Invoice {
            id,
            user_id,
            invoice_number: draft.invoice_number,
            invoice_date: draft.invoice_date.unwrap_or(now),
            due_date: draft.due_date,
            bill_from: draft.bill_from,
            bill_to: draft.bill_to,
            items: computed.items,
            notes: draft.notes,
            payment_terms: draft
                .payment_terms
                .unwrap_or_else(|| DEFAULT_PAYMENT_TERMS.to_string()),
            status: InvoiceStatus::default(),
            totals: computed.totals,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update, returning the new record.
    ///
    /// Identity, creation time and invoice date never change. Totals are
    /// recomputed whether or not the patch carries items, so a stored record
    /// can never drift out of step with its lines.
    pub fn apply_patch(&self, patch: InvoicePatch, now: DateTime<Utc>) -> DomainResult<Invoice> {
        let invoice_number = keep_unless_given(patch.invoice_number, &self.invoice_number);
        let bill_from = patch.bill_from.unwrap_or_else(|| self.bill_from.clone());
        let bill_to = patch.bill_to.unwrap_or_else(|| self.bill_to.clone());

        validate_invoice_number(&invoice_number)?;
        bill_from.validate("billFrom")?;
        bill_to.validate("billTo")?;

        let source_items: Vec<RawLineItem> = match patch.items {
            Some(items) if !items.is_empty() => {
                validate_item_names(&items)?;
                items
            }
            _ => self.items.iter().map(LineItem::as_raw).collect(),
        };
        let computed = normalize_items(&source_items);

        let notes = match patch.notes {
            Some(s) if !s.trim().is_empty() => Some(s),
            _ => self.notes.clone(),
        };

        Ok(Invoice {
            id: self.id,
            user_id: self.user_id,
            invoice_number,
            invoice_date: self.invoice_date,
            due_date: patch.due_date.or(self.due_date),
            bill_from,
            bill_to,
            items: computed.items,
            notes,
            payment_terms: keep_unless_given(patch.payment_terms, &self.payment_terms),
            status: patch.status.unwrap_or(self.status),
            totals: computed.totals,
            created_at: self.created_at,
            updated_at: now,
        })
    }
}

fn validate_invoice_number(invoice_number: &str) -> DomainResult<()> {
    if invoice_number.trim().is_empty() {
        return Err(DomainError::validation("invoiceNumber is required"));
    }
    Ok(())
}

fn validate_item_names(items: &[RawLineItem]) -> DomainResult<()> {
    for (index, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "items[{index}].name is required"
            )));
        }
    }
    Ok(())
}
