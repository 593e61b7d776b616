//! Dashboard aggregation and the digest fed to insight prompts.

use serde::{Deserialize, Serialize};

use ledgerline_invoicing::{Invoice, InvoiceStatus};

/// How many invoices the digest lists individually.
pub const RECENT_WINDOW: usize = 5;

/// Insight strings returned by the model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InsightsPayload {
    #[serde(default)]
    pub insights: Vec<String>,
}

/// One invoice as it appears in the digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentInvoice {
    pub invoice_number: String,
    pub total: f64,
    pub status: InvoiceStatus,
}

/// Aggregate figures over one user's invoices.
///
/// Revenue counts paid invoices only; everything else is outstanding. The
/// recent list takes the first [`RECENT_WINDOW`] records in the given order,
/// so callers should pass invoices newest first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_invoices: usize,
    pub paid_count: usize,
    pub unpaid_count: usize,
    pub total_revenue: f64,
    pub total_outstanding: f64,
    pub recent: Vec<RecentInvoice>,
}

impl DashboardSummary {
    pub fn from_invoices(invoices: &[Invoice]) -> Self {
        let mut summary = DashboardSummary {
            total_invoices: invoices.len(),
            ..DashboardSummary::default()
        };

        for invoice in invoices {
            match invoice.status {
                InvoiceStatus::Paid => {
                    summary.paid_count += 1;
                    summary.total_revenue += invoice.totals.total;
                }
                InvoiceStatus::Unpaid => {
                    summary.unpaid_count += 1;
                    summary.total_outstanding += invoice.totals.total;
                }
            }
        }

        summary.recent = invoices
            .iter()
            .take(RECENT_WINDOW)
            .map(|invoice| RecentInvoice {
                invoice_number: invoice.invoice_number.clone(),
                total: invoice.totals.total,
                status: invoice.status,
            })
            .collect();

        summary
    }

    /// Deterministic plain-text digest, one fact per line, amounts to two
    /// decimal places. This is the only invoice data an insight prompt sees.
    pub fn render_digest(&self) -> String {
        let mut lines = vec![
            format!("- Total invoices: {}", self.total_invoices),
            format!("- Paid invoices: {}", self.paid_count),
            format!("- Unpaid or pending invoices: {}", self.unpaid_count),
            format!("- Revenue from paid invoices: {:.2}", self.total_revenue),
            format!(
                "- Outstanding from unpaid invoices: {:.2}",
                self.total_outstanding
            ),
        ];
        if !self.recent.is_empty() {
            let rendered: Vec<String> = self
                .recent
                .iter()
                .map(|entry| {
                    format!(
                        "Invoice {} for {:.2} with status {}",
                        entry.invoice_number, entry.total, entry.status
                    )
                })
                .collect();
            lines.push(format!(
                "- Recent invoices (up to {}): {}",
                RECENT_WINDOW,
                rendered.join(", ")
            ));
        }
        lines.join("\n")
    }
}
