//! Invoicing domain module.
//!
//! Invoice records and the validation rules for invoice forms, implemented
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod form;
pub mod invoice;

pub use form::{FieldErrors, FormState, InvoiceField, InvoiceForm, ValidInvoiceForm};
pub use invoice::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};
