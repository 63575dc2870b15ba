//! # Session State
//!
//! Logged-in state for one station, plus the admin gate used by the
//! restricted screens.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::auth::{self, Role};
use crate::error::ScreenError;

/// A logged-in station.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub username: String,
    pub display_name: String,
    pub role: Role,
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Verifies credentials and opens a session.
    pub fn login(username: &str, password: &str) -> Result<Session, ScreenError> {
        let account = auth::verify(username, password).ok_or_else(ScreenError::auth_failed)?;

        info!(username = account.username, role = ?account.role, "Session opened");

        Ok(Session {
            username: account.username.to_string(),
            display_name: account.display_name.to_string(),
            role: account.role,
            started_at: Utc::now(),
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Gate for the admin-only screens (leases, roster, summary).
    pub fn require_admin(&self) -> Result<(), ScreenError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ScreenError::forbidden())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_login_and_admin_gate() {
        let admin = Session::login("admin", "Grubybob").unwrap();
        assert!(admin.require_admin().is_ok());

        let desk = Session::login("pracownik", "kubajestsuper").unwrap();
        let err = desk.require_admin().unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn test_bad_login_is_auth_failed() {
        let err = Session::login("admin", "wrong").unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthFailed);
    }
}
