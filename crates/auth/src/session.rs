//! Explicit session context.
//!
//! The gate never reads ambient auth state; whoever handles the request
//! builds a `Session` and passes it in.

use dashboard_core::UserId;

use crate::claims::SessionClaims;

/// The signed-in user behind a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: UserId,
    pub email: Option<String>,
}

/// Session context for one request. Anonymous unless a user is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<SessionUser>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Self::authenticated(SessionUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}
