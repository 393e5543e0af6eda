use axum::{routing::get, Router};

pub mod invoices;
pub mod pages;
pub mod system;

/// Router for every page behind the session gate.
pub fn router() -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/login", get(pages::login))
        .route("/dashboard", get(pages::dashboard))
        .nest("/dashboard/invoices", invoices::router())
}
