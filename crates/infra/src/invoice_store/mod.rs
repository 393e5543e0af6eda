//! Invoice persistence boundary.
//!
//! One trait, one statement per write. The database owns invoice rows; callers
//! hold nothing between requests.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryInvoiceRepository;
pub use postgres::PostgresInvoiceRepository;
pub use r#trait::{InvoiceRepository, RepositoryError};
