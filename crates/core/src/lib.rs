//! `dashboard-core`: domain building blocks shared by every dashboard crate.
//!
//! Pure types only: identifiers, money, and the domain error model. No IO.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, InvoiceId, UserId};
pub use money::{Amount, AmountError};
