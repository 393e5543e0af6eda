//! Service wiring: picks the invoice store and view cache for the process.

use std::sync::Arc;

use anyhow::Context;

use dashboard_infra::{
    AppConfig, InMemoryInvoiceRepository, InMemoryViewCache, InvoiceRepository,
    PostgresInvoiceRepository, db,
};

use crate::actions::InvoiceActions;
use crate::views::InvoiceListView;

pub type SharedRepository = Arc<dyn InvoiceRepository>;
pub type ListingCache = Arc<InMemoryViewCache<InvoiceListView>>;

pub struct AppServices {
    pub invoices: InvoiceActions<SharedRepository, ListingCache>,
}

impl AppServices {
    pub fn new(repository: SharedRepository) -> Self {
        Self {
            invoices: InvoiceActions::new(repository, Arc::new(InMemoryViewCache::new())),
        }
    }

    /// Dev/test wiring with nothing persisted.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryInvoiceRepository::new()))
    }
}

pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let Some(database) = &config.database else {
        tracing::warn!("DATABASE_URL not set; invoices are kept in memory");
        return Ok(AppServices::in_memory());
    };

    let pool = db::connect(database)
        .await
        .context("failed to connect to DATABASE_URL")?;
    db::ensure_schema(&pool)
        .await
        .context("failed to prepare invoices schema")?;

    tracing::info!(max_connections = database.max_connections, "using postgres invoice store");
    Ok(AppServices::new(Arc::new(PostgresInvoiceRepository::new(pool))))
}
