use dashboard_auth::{Session, SessionUser};

/// Session context for a request that made it past the gate.
///
/// Inserted by the session middleware; handlers read it as an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session: Session,
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.session.user()
    }
}
