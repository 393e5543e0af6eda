//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: invoice store and view cache selection
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: mutation outcomes and error bodies as responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use dashboard_auth::{GateConfig, Hs256SessionVerifier, SessionVerifier};
use dashboard_infra::AppConfig;

use crate::middleware;

pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    let verifier = Arc::new(Hs256SessionVerifier::new(config.session_secret.as_bytes()));
    Ok(build_router(services, verifier, GateConfig::default()))
}

/// Assemble routes around already-built services.
pub fn build_router(
    services: AppServices,
    verifier: Arc<dyn SessionVerifier>,
    gate: GateConfig,
) -> Router {
    let auth_state = middleware::AuthState {
        verifier,
        gate: Arc::new(gate),
    };

    // Every page goes through the session gate; health checks do not.
    let gated = routes::router()
        .layer(Extension(Arc::new(services)))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::session_gate,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(gated)
        .layer(ServiceBuilder::new())
}
