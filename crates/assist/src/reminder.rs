//! Per-invoice details for reminder-email prompts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ledgerline_invoicing::Invoice;

/// What a reminder-email writer needs to know about one invoice.
///
/// The amount is pre-rendered to two decimal places so every prompt spells
/// money the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderContext {
    pub client_name: String,
    pub invoice_number: String,
    pub amount_due: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl ReminderContext {
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            client_name: invoice.bill_to.name.clone(),
            invoice_number: invoice.invoice_number.clone(),
            amount_due: format!("{:.2}", invoice.totals.total),
            due_date: invoice.due_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ledgerline_core::{InvoiceId, UserId};
    use ledgerline_invoicing::{InvoiceDraft, PartyDetails, RawLineItem};

    #[test]
    fn carries_recipient_and_rendered_amount() {
        let now = Utc::now();
        let draft = InvoiceDraft {
            invoice_number: "INV-042".to_string(),
            due_date: Some(now),
            bill_from: PartyDetails::new("Studio", "studio@example.test", "1 Main St", "555-0100"),
            bill_to: PartyDetails::new("Acme Corp", "ap@acme.test", "2 Side St", "555-0200"),
            items: vec![RawLineItem::new("design", 100.0, 2.0).with_tax(10.0)],
            ..InvoiceDraft::default()
        };
        let invoice = Invoice::from_draft(InvoiceId::new(), UserId::new(), draft, now).unwrap();

        let context = ReminderContext::from_invoice(&invoice);
        assert_eq!(context.client_name, "Acme Corp");
        assert_eq!(context.invoice_number, "INV-042");
        assert_eq!(context.amount_due, "220.00");
        assert_eq!(context.due_date, Some(now));
    }
}
