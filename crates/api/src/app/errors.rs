use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use serde_json::json;

use dashboard_infra::RepositoryError;

use crate::actions::MutationOutcome;

/// Map a mutation outcome onto HTTP.
///
/// Redirects are 303 so browsers follow a form POST with a GET.
pub fn outcome_to_response(outcome: MutationOutcome) -> axum::response::Response {
    match outcome {
        MutationOutcome::Redirect(target) => Redirect::to(&target).into_response(),
        MutationOutcome::Completed { message } => {
            (StatusCode::OK, axum::Json(json!({ "message": message }))).into_response()
        }
        MutationOutcome::ValidationFailed(state) => {
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(state)).into_response()
        }
        MutationOutcome::PersistenceFailed { message } => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "persistence_error", message)
        }
    }
}

/// Read-side store failure. Details go to the log, not the client.
pub fn repository_error_to_response(err: RepositoryError) -> axum::response::Response {
    tracing::error!(error = %err, "invoice read failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "persistence_error",
        "Database Error: Failed to Fetch Invoices.",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
