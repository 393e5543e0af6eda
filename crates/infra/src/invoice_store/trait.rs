use std::sync::Arc;

use thiserror::Error;

use dashboard_core::InvoiceId;
use dashboard_invoicing::{Invoice, InvoiceChanges, NewInvoice};

/// Invoice repository operation error.
///
/// These are **infrastructure errors** (connectivity, statement failures,
/// unreadable rows) as opposed to form validation errors. Messages are for
/// logs; users only ever see a generic failure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The statement reached the database and was rejected.
    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// The database could not be reached (pool closed, timeout, IO).
    #[error("database unavailable in {operation}: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },

    /// A stored row does not satisfy the invoice invariants.
    #[error("corrupt invoice row: {0}")]
    CorruptRow(String),
}

/// Invoice storage.
///
/// Each write issues exactly one statement, so a call either fully applies
/// or does not apply at all.
#[async_trait::async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// `INSERT INTO invoices (customer_id, amount, date, status)`.
    async fn insert(&self, invoice: NewInvoice) -> Result<(), RepositoryError>;

    /// `UPDATE invoices SET customer_id, amount, status WHERE id`.
    ///
    /// Returns the number of rows touched; zero is not an error.
    async fn update(&self, id: &InvoiceId, changes: InvoiceChanges) -> Result<u64, RepositoryError>;

    /// `DELETE FROM invoices WHERE id`.
    ///
    /// Returns the number of rows removed; deleting a missing id is a no-op.
    async fn delete(&self, id: &InvoiceId) -> Result<u64, RepositoryError>;

    /// All invoices, newest issue date first.
    async fn list(&self) -> Result<Vec<Invoice>, RepositoryError>;

    async fn find(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepositoryError>;
}

#[async_trait::async_trait]
impl<S> InvoiceRepository for Arc<S>
where
    S: InvoiceRepository + ?Sized,
{
    async fn insert(&self, invoice: NewInvoice) -> Result<(), RepositoryError> {
        (**self).insert(invoice).await
    }

    async fn update(&self, id: &InvoiceId, changes: InvoiceChanges) -> Result<u64, RepositoryError> {
        (**self).update(id, changes).await
    }

    async fn delete(&self, id: &InvoiceId) -> Result<u64, RepositoryError> {
        (**self).delete(id).await
    }

    async fn list(&self) -> Result<Vec<Invoice>, RepositoryError> {
        (**self).list().await
    }

    async fn find(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        (**self).find(id).await
    }
}
