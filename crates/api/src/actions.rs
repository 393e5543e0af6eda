//! Invoice mutation handlers.
//!
//! Each mutation runs the same pipeline:
//!
//! 1. validate the raw form (no IO on failure)
//! 2. issue exactly one statement through the repository
//! 3. only after the statement succeeded, revalidate the listing view
//! 4. hand back an explicit `MutationOutcome` for the HTTP layer to act on
//!
//! Nothing here redirects or throws; the caller decides what to do with
//! the outcome.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use dashboard_core::InvoiceId;
use dashboard_infra::{CacheLookup, InvoiceRepository, RepositoryError, ViewCache};
use dashboard_invoicing::{FieldErrors, FormState, InvoiceForm};

use crate::views::{InvoiceListView, InvoiceView};

/// Path of the cached invoice listing; also where successful forms land.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

const CREATE_MISSING_FIELDS: &str = "Missing Fields. Failed to Create Invoice.";
const UPDATE_MISSING_FIELDS: &str = "Missing Fields. Failed to Update Invoice.";
const CREATE_FAILED: &str = "Database Error: Failed to Create Invoice.";
const UPDATE_FAILED: &str = "Database Error: Failed to Update Invoice.";
const DELETE_FAILED: &str = "Database Error: Failed to Delete Invoice.";
const DELETED: &str = "Deleted Invoice.";

/// What the caller should do after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Navigate to the target.
    Redirect(String),
    /// Stay put; the mutation succeeded.
    Completed { message: String },
    /// Stay on the form and show the field errors.
    ValidationFailed(FormState),
    /// Stay on the form and show a generic failure.
    PersistenceFailed { message: String },
}

/// Why a mutation did not go through.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("{message}")]
    Validation {
        message: &'static str,
        errors: FieldErrors,
    },

    #[error("{message}")]
    Persistence {
        message: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl From<MutationError> for MutationOutcome {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::Validation { message, errors } => {
                MutationOutcome::ValidationFailed(FormState {
                    message: message.to_string(),
                    errors,
                })
            }
            MutationError::Persistence { message, .. } => MutationOutcome::PersistenceFailed {
                message: message.to_string(),
            },
        }
    }
}

/// Source of "today" for new invoices.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Calendar date in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Invoice create/update/delete plus the listing read side.
pub struct InvoiceActions<R, C> {
    repository: R,
    views: C,
    clock: Arc<dyn Clock>,
}

impl<R, C> InvoiceActions<R, C>
where
    R: InvoiceRepository,
    C: ViewCache<InvoiceListView>,
{
    pub fn new(repository: R, views: C) -> Self {
        Self {
            repository,
            views,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn create_invoice(&self, form: &InvoiceForm) -> MutationOutcome {
        match self.try_create(form).await {
            Ok(()) => {
                self.views.revalidate_path(INVOICES_PATH).await;
                MutationOutcome::Redirect(INVOICES_PATH.to_string())
            }
            Err(e) => {
                log_failure("create_invoice", None, &e);
                e.into()
            }
        }
    }

    pub async fn update_invoice(&self, id: &InvoiceId, form: &InvoiceForm) -> MutationOutcome {
        match self.try_update(id, form).await {
            Ok(()) => {
                self.views.revalidate_path(INVOICES_PATH).await;
                MutationOutcome::Redirect(INVOICES_PATH.to_string())
            }
            Err(e) => {
                log_failure("update_invoice", Some(id), &e);
                e.into()
            }
        }
    }

    /// Delete by id. Does not redirect; a missing id is a successful no-op.
    pub async fn delete_invoice(&self, id: &InvoiceId) -> MutationOutcome {
        match self.repository.delete(id).await {
            Ok(removed) => {
                tracing::info!(invoice_id = %id, removed, "invoice deleted");
                self.views.revalidate_path(INVOICES_PATH).await;
                MutationOutcome::Completed {
                    message: DELETED.to_string(),
                }
            }
            Err(source) => {
                let e = MutationError::Persistence {
                    message: DELETE_FAILED,
                    source,
                };
                log_failure("delete_invoice", Some(id), &e);
                e.into()
            }
        }
    }

    /// The listing view, rendered from the database on a cache miss.
    pub async fn list_invoices(&self) -> Result<InvoiceListView, RepositoryError> {
        let generation = match self.views.get(INVOICES_PATH).await {
            CacheLookup::Hit(view) => return Ok(view),
            CacheLookup::Miss(generation) => generation,
        };

        // Not cached if a mutation revalidated the path while we read.
        let invoices = self.repository.list().await?;
        let view = InvoiceListView::render(&invoices);
        self.views.store(INVOICES_PATH, generation, view.clone()).await;
        Ok(view)
    }

    /// One invoice for the edit form. Never cached.
    pub async fn fetch_invoice(&self, id: &InvoiceId) -> Result<Option<InvoiceView>, RepositoryError> {
        let invoice = self.repository.find(id).await?;
        Ok(invoice.as_ref().map(InvoiceView::from))
    }

    async fn try_create(&self, form: &InvoiceForm) -> Result<(), MutationError> {
        let valid = form.validate().map_err(|errors| MutationError::Validation {
            message: CREATE_MISSING_FIELDS,
            errors,
        })?;

        let invoice = valid.into_new_invoice(self.clock.today());
        let amount = invoice.amount.minor_units();
        self.repository
            .insert(invoice)
            .await
            .map_err(|source| MutationError::Persistence {
                message: CREATE_FAILED,
                source,
            })?;

        tracing::info!(amount, "invoice created");
        Ok(())
    }

    async fn try_update(&self, id: &InvoiceId, form: &InvoiceForm) -> Result<(), MutationError> {
        let valid = form.validate().map_err(|errors| MutationError::Validation {
            message: UPDATE_MISSING_FIELDS,
            errors,
        })?;

        let touched = self
            .repository
            .update(id, valid.into_changes())
            .await
            .map_err(|source| MutationError::Persistence {
                message: UPDATE_FAILED,
                source,
            })?;

        tracing::info!(invoice_id = %id, touched, "invoice updated");
        Ok(())
    }
}

fn log_failure(operation: &'static str, id: Option<&InvoiceId>, err: &MutationError) {
    let invoice_id = id.map(InvoiceId::as_str).unwrap_or("");
    match err {
        MutationError::Validation { errors, .. } => {
            let fields: Vec<&str> = errors.fields().map(|f| f.as_str()).collect();
            tracing::warn!(operation, invoice_id, ?fields, "invoice form rejected");
        }
        MutationError::Persistence { source, .. } => {
            tracing::error!(operation, invoice_id, error = %source, "invoice statement failed");
        }
    }
}
