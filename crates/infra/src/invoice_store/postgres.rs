//! Postgres-backed invoice repository.
//!
//! ## Error Mapping
//!
//! | SQLx Error                         | RepositoryError |
//! |------------------------------------|-----------------|
//! | Database (any SQLSTATE)            | `Database`      |
//! | PoolClosed / PoolTimedOut / Io     | `Unavailable`   |
//! | Other                              | `Database`      |
//!
//! Rows violating the invoice invariants (non-positive amount, unknown
//! status) surface as `CorruptRow` instead of being silently skipped.

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use tracing::instrument;

use dashboard_core::{Amount, CustomerId, InvoiceId};
use dashboard_invoicing::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};

use super::r#trait::{InvoiceRepository, RepositoryError};

/// Invoice repository over a shared `sqlx` connection pool.
///
/// `Send + Sync`; clones share the same pool.
#[derive(Debug, Clone)]
pub struct PostgresInvoiceRepository {
    pool: Arc<PgPool>,
}

impl PostgresInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait::async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    #[instrument(skip(self, invoice), fields(customer_id = %invoice.customer_id), err)]
    async fn insert(&self, invoice: NewInvoice) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO invoices (customer_id, amount, date, status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(invoice.customer_id.as_str())
        .bind(invoice.amount.minor_units())
        .bind(invoice.date)
        .bind(invoice.status.as_str())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_invoice", e))?;

        Ok(())
    }

    #[instrument(skip(self, changes), fields(invoice_id = %id), err)]
    async fn update(&self, id: &InvoiceId, changes: InvoiceChanges) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE invoices
            SET customer_id = $1, amount = $2, status = $3
            WHERE id = $4
            "#,
        )
        .bind(changes.customer_id.as_str())
        .bind(changes.amount.minor_units())
        .bind(changes.status.as_str())
        .bind(id.as_str())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_invoice", e))?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(invoice_id = %id), err)]
    async fn delete(&self, id: &InvoiceId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id.as_str())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_invoice", e))?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Invoice>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, amount, date, status
            FROM invoices
            ORDER BY date DESC, id DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_invoices", e))?;

        rows.iter().map(invoice_from_row).collect()
    }

    #[instrument(skip(self), fields(invoice_id = %id), err)]
    async fn find(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, amount, date, status
            FROM invoices
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_invoice", e))?;

        row.as_ref().map(invoice_from_row).transpose()
    }
}

fn invoice_from_row(row: &sqlx::postgres::PgRow) -> Result<Invoice, RepositoryError> {
    let corrupt = |e: sqlx::Error| RepositoryError::CorruptRow(e.to_string());

    let id: String = row.try_get("id").map_err(corrupt)?;
    let customer_id: String = row.try_get("customer_id").map_err(corrupt)?;
    let amount: i64 = row.try_get("amount").map_err(corrupt)?;
    let date: NaiveDate = row.try_get("date").map_err(corrupt)?;
    let status: String = row.try_get("status").map_err(corrupt)?;

    let domain = |e: dashboard_core::DomainError| RepositoryError::CorruptRow(format!("invoice {id}: {e}"));

    Ok(Invoice {
        id: InvoiceId::parse(id.clone()).map_err(domain)?,
        customer_id: CustomerId::parse(customer_id).map_err(domain)?,
        amount: Amount::from_minor_units(amount).map_err(domain)?,
        date,
        status: status.parse::<InvoiceStatus>().map_err(domain)?,
    })
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => RepositoryError::Database {
            operation,
            message: match db_err.code() {
                Some(code) => format!("{} (SQLSTATE {})", db_err.message(), code),
                None => db_err.message().to_string(),
            },
        },
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            RepositoryError::Unavailable {
                operation,
                message: err.to_string(),
            }
        }
        other => RepositoryError::Database {
            operation,
            message: other.to_string(),
        },
    }
}
