use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;

use dashboard_auth::{GateConfig, PageDecision, SessionVerifier, authorize_page, sign_in_redirect};

use crate::context::SessionContext;

/// Cookie carrying the session token for browser requests.
pub const SESSION_COOKIE: &str = "session";

#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn SessionVerifier>,
    pub gate: Arc<GateConfig>,
}

/// Resolve the request's session and apply the page gate.
///
/// Allowed requests continue with a `SessionContext` extension; denied ones
/// go to the sign-in page, and signed-in users on public pages go to the
/// landing page.
pub async fn session_gate(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = extract_token(req.headers());
    let session = state.verifier.session_for(token.as_deref(), Utc::now());
    let path = req.uri().path().to_string();

    match authorize_page(&state.gate, &path, &session) {
        PageDecision::Allow => {
            req.extensions_mut().insert(SessionContext::new(session));
            next.run(req).await
        }
        PageDecision::Deny => {
            tracing::debug!(path = %path, "anonymous request to protected page");
            Redirect::to(&sign_in_redirect(&state.gate, &path)).into_response()
        }
        PageDecision::Redirect(target) => Redirect::to(&target).into_response(),
    }
}

/// Bearer token first, then the session cookie.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers)
        .map(str::to_string)
        .or_else(|| session_cookie(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let token = header.to_str().ok()?.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    let token = jar.get(SESSION_COOKIE)?.value_trimmed();
    (!token.is_empty()).then(|| token.to_string())
}
