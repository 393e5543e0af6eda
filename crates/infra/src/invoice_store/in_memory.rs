use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use dashboard_core::{Entity, InvoiceId};
use dashboard_invoicing::{Invoice, InvoiceChanges, NewInvoice};

use super::r#trait::{InvoiceRepository, RepositoryError};

/// In-memory invoice table.
///
/// Intended for tests/dev. Ids are generated UUIDv7 strings.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceRepository {
    rows: RwLock<HashMap<InvoiceId, Invoice>>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row with a known id.
    ///
    /// Takes the table by value, so a lock poisoned by an earlier panic is
    /// recovered and replaced rather than reported.
    pub fn with_invoice(self, invoice: Invoice) -> Self {
        let mut rows = self.rows.into_inner().unwrap_or_else(PoisonError::into_inner);
        rows.insert(invoice.id().clone(), invoice);
        Self {
            rows: RwLock::new(rows),
        }
    }
}

fn poisoned(operation: &'static str) -> RepositoryError {
    RepositoryError::Unavailable {
        operation,
        message: "lock poisoned".to_string(),
    }
}

#[async_trait::async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn insert(&self, invoice: NewInvoice) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned("insert_invoice"))?;
        let id = InvoiceId::generate();
        rows.insert(id.clone(), invoice.into_invoice(id));
        Ok(())
    }

    async fn update(&self, id: &InvoiceId, changes: InvoiceChanges) -> Result<u64, RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned("update_invoice"))?;
        match rows.get_mut(id) {
            Some(invoice) => {
                changes.apply_to(invoice);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &InvoiceId) -> Result<u64, RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned("delete_invoice"))?;
        Ok(u64::from(rows.remove(id).is_some()))
    }

    async fn list(&self) -> Result<Vec<Invoice>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned("list_invoices"))?;
        let mut invoices: Vec<Invoice> = rows.values().cloned().collect();
        invoices.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(invoices)
    }

    async fn find(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned("find_invoice"))?;
        Ok(rows.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::{Amount, CustomerId};
    use dashboard_invoicing::InvoiceStatus;

    fn new_invoice(customer: &str, cents: i64, day: u32) -> NewInvoice {
        NewInvoice {
            customer_id: CustomerId::parse(customer).unwrap(),
            amount: Amount::from_minor_units(cents).unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            status: InvoiceStatus::Pending,
        }
    }

    #[tokio::test]
    async fn insert_assigns_an_id_and_lists_newest_first() {
        let repo = InMemoryInvoiceRepository::new();
        repo.insert(new_invoice("c1", 100, 1)).await.unwrap();
        repo.insert(new_invoice("c2", 200, 3)).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].customer_id.as_str(), "c2");
        assert_eq!(listed[1].customer_id.as_str(), "c1");
        assert_ne!(listed[0].id, listed[1].id);
    }

    #[tokio::test]
    async fn update_touches_only_the_named_row() {
        let id = InvoiceId::parse("inv-1").unwrap();
        let repo = InMemoryInvoiceRepository::new()
            .with_invoice(new_invoice("c1", 100, 1).into_invoice(id.clone()));

        let changes = InvoiceChanges {
            customer_id: CustomerId::parse("c9").unwrap(),
            amount: Amount::from_minor_units(999).unwrap(),
            status: InvoiceStatus::Paid,
        };
        assert_eq!(repo.update(&id, changes.clone()).await.unwrap(), 1);

        let stored = repo.find(&id).await.unwrap().unwrap();
        assert_eq!(stored.customer_id.as_str(), "c9");
        assert_eq!(stored.amount.minor_units(), 999);
        assert_eq!(stored.status, InvoiceStatus::Paid);
        assert_eq!(stored.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());

        let missing = InvoiceId::parse("nope").unwrap();
        assert_eq!(repo.update(&missing, changes).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_a_no_op() {
        let id = InvoiceId::parse("inv-1").unwrap();
        let repo = InMemoryInvoiceRepository::new()
            .with_invoice(new_invoice("c1", 100, 1).into_invoice(id.clone()));

        assert_eq!(repo.delete(&InvoiceId::parse("nope").unwrap()).await.unwrap(), 0);
        assert_eq!(repo.list().await.unwrap().len(), 1);

        assert_eq!(repo.delete(&id).await.unwrap(), 1);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn poisoned_table_reports_unavailable_until_reseeded() {
        let repo = InMemoryInvoiceRepository::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = repo.rows.write().unwrap();
            panic!("writer died holding the lock");
        }));

        assert!(matches!(
            repo.list().await,
            Err(RepositoryError::Unavailable { operation: "list_invoices", .. })
        ));

        let id = InvoiceId::parse("inv-1").unwrap();
        let repo = repo.with_invoice(new_invoice("c1", 100, 1).into_invoice(id.clone()));
        assert!(repo.find(&id).await.unwrap().is_some());
    }
}
