//! Rendered invoice views served to the dashboard pages.

use serde::Serialize;

use dashboard_invoicing::{Invoice, InvoiceStatus};

/// One invoice as the dashboard shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceView {
    pub id: String,
    pub customer_id: String,
    /// Minor units, as stored.
    pub amount: i64,
    /// Display string, e.g. `$45.50`.
    pub formatted_amount: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub status: InvoiceStatus,
}

impl From<&Invoice> for InvoiceView {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id.to_string(),
            customer_id: invoice.customer_id.to_string(),
            amount: invoice.amount.minor_units(),
            formatted_amount: invoice.amount.to_string(),
            date: invoice.date.format("%Y-%m-%d").to_string(),
            status: invoice.status,
        }
    }
}

/// The cached `/dashboard/invoices` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceListView {
    pub invoices: Vec<InvoiceView>,
}

impl InvoiceListView {
    pub fn render(invoices: &[Invoice]) -> Self {
        Self {
            invoices: invoices.iter().map(InvoiceView::from).collect(),
        }
    }
}
