//! Infrastructure layer: database, view cache, configuration.

pub mod config;
pub mod db;
pub mod invoice_store;
pub mod view_cache;

pub use config::{AppConfig, ConfigError, DatabaseConfig};
pub use invoice_store::{InMemoryInvoiceRepository, InvoiceRepository, PostgresInvoiceRepository, RepositoryError};
pub use view_cache::{CacheLookup, Generation, InMemoryViewCache, ViewCache};
