//! Session token verification.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{SessionClaims, TokenValidationError, validate_claims};
use crate::session::Session;

/// Turns a presented token into verified claims.
pub trait SessionVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenValidationError>;

    /// Resolve the session for a request.
    ///
    /// Total: a missing, malformed, forged or expired token yields an
    /// anonymous session, never an error.
    fn session_for(&self, token: Option<&str>, now: DateTime<Utc>) -> Session {
        let Some(token) = token else {
            return Session::anonymous();
        };

        match self.verify(token, now) {
            Ok(claims) => Session::from(claims),
            Err(e) => {
                tracing::debug!(error = %e, "session token rejected");
                Session::anonymous()
            }
        }
    }
}

/// HMAC-SHA256 signed session tokens.
pub struct Hs256SessionVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256SessionVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Claims carry RFC3339 timestamps rather than numeric `exp`, so the
        // time window is checked by `validate_claims` instead.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign claims into a token accepted by `verify`.
    pub fn sign(&self, claims: &SessionClaims) -> Result<String, TokenValidationError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenValidationError::Malformed(e.to_string()))
    }
}

impl SessionVerifier for Hs256SessionVerifier {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenValidationError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| TokenValidationError::Malformed(e.to_string()))?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}
