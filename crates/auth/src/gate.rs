//! Page-level authorization gate.
//!
//! A pure classifier over (is-protected-path, is-authenticated):
//!
//! | protected | authenticated | decision                 |
//! |-----------|---------------|--------------------------|
//! | yes       | yes           | `Allow`                  |
//! | yes       | no            | `Deny`                   |
//! | no        | yes           | `Redirect(landing_page)` |
//! | no        | no            | `Allow`                  |
//!
//! - No IO
//! - No panics
//! - No ambient state: the session is a parameter

use crate::session::Session;

/// Where the protected section starts and where the gate sends people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Any path starting with this prefix requires a session.
    pub protected_prefix: String,
    /// Authenticated users hitting public pages are sent here.
    pub landing_page: String,
    /// Anonymous users hitting protected pages are sent here.
    pub sign_in_page: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            protected_prefix: "/dashboard".to_string(),
            landing_page: "/dashboard".to_string(),
            sign_in_page: "/login".to_string(),
        }
    }
}

/// Outcome of the gate for one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageDecision {
    Allow,
    /// The caller enforces this by sending the user to the sign-in page.
    Deny,
    Redirect(String),
}

pub fn is_protected_path(config: &GateConfig, path: &str) -> bool {
    path.starts_with(config.protected_prefix.as_str())
}

/// The decision table itself.
pub fn decide(is_protected: bool, is_authenticated: bool, landing_page: &str) -> PageDecision {
    match (is_protected, is_authenticated) {
        (true, true) => PageDecision::Allow,
        (true, false) => PageDecision::Deny,
        (false, true) => PageDecision::Redirect(landing_page.to_string()),
        (false, false) => PageDecision::Allow,
    }
}

/// Decide whether `session` may view the page at `path`.
pub fn authorize_page(config: &GateConfig, path: &str, session: &Session) -> PageDecision {
    decide(
        is_protected_path(config, path),
        session.is_authenticated(),
        &config.landing_page,
    )
}

/// Sign-in location for a denied request, remembering where the user was going.
pub fn sign_in_redirect(config: &GateConfig, path: &str) -> String {
    let callback: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
    format!("{}?callbackUrl={callback}", config.sign_in_page)
}
