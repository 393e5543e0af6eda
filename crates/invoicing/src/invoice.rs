use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dashboard_core::{Amount, CustomerId, DomainError, Entity, InvoiceId};

/// Invoice status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for InvoiceStatus {
    type Err = DomainError;

    /// Exact, case-sensitive match on the stored representation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(DomainError::validation(format!(
                "unknown invoice status '{other}'"
            ))),
        }
    }
}

/// A persisted invoice row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    /// Minor units (cents).
    pub amount: Amount,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Values for an `INSERT`. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: CustomerId,
    pub amount: Amount,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
}

impl NewInvoice {
    pub fn into_invoice(self, id: InvoiceId) -> Invoice {
        Invoice {
            id,
            customer_id: self.customer_id,
            amount: self.amount,
            date: self.date,
            status: self.status,
        }
    }
}

/// Values for an `UPDATE`. The issue date is never rewritten by an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
    pub customer_id: CustomerId,
    pub amount: Amount,
    pub status: InvoiceStatus,
}

impl InvoiceChanges {
    pub fn apply_to(self, invoice: &mut Invoice) {
        invoice.customer_id = self.customer_id;
        invoice.amount = self.amount;
        invoice.status = self.status;
    }
}
