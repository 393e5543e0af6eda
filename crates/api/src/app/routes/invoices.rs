use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};

use dashboard_core::InvoiceId;
use dashboard_invoicing::InvoiceForm;

use crate::app::errors;
use crate::app::services::AppServices;

type FormFields = Form<Vec<(String, String)>>;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route("/:id", get(get_invoice).post(update_invoice))
        .route("/:id/delete", post(delete_invoice))
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.invoices.list_invoices().await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.invoices.fetch_invoice(&id).await {
        Ok(Some(view)) => (StatusCode::OK, Json(view)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found"),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Form(fields): FormFields,
) -> axum::response::Response {
    let form = InvoiceForm::from_fields(fields);
    errors::outcome_to_response(services.invoices.create_invoice(&form).await)
}

pub async fn update_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Form(fields): FormFields,
) -> axum::response::Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let form = InvoiceForm::from_fields(fields);
    errors::outcome_to_response(services.invoices.update_invoice(&id, &form).await)
}

pub async fn delete_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    errors::outcome_to_response(services.invoices.delete_invoice(&id).await)
}

fn parse_id(raw: String) -> Result<InvoiceId, axum::response::Response> {
    InvoiceId::parse(raw)
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id"))
}
