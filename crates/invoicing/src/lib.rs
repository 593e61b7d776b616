//! Invoicing domain module.
//!
//! This crate contains the business rules for invoice records: lenient
//! line-item normalization, totals computation, and draft/patch handling,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod invoice;
pub mod line;

pub use invoice::{
    Invoice, InvoiceDraft, InvoicePatch, InvoiceStatus, PartyDetails, DEFAULT_PAYMENT_TERMS,
};
pub use line::{
    normalize_items, normalize_items_checked, CoercionWarning, InvoiceTotals, ItemizedTotals,
    LineField, LineItem, RawLineItem,
};
