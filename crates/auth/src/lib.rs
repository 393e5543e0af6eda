//! `dashboard-auth`: session verification and the page authorization gate.
//!
//! This crate is decoupled from HTTP and storage: callers hand it a request
//! path and a token, it hands back a decision.

pub mod claims;
pub mod gate;
pub mod session;
pub mod verifier;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use gate::{GateConfig, PageDecision, authorize_page, decide, is_protected_path, sign_in_redirect};
pub use session::{Session, SessionUser};
pub use verifier::{Hs256SessionVerifier, SessionVerifier};
