//! # Station Accounts
//!
//! The clinic runs two shared station accounts, not per-person logins:
//! an admin account for the owner and an employee account for the front
//! desk. Staff identity on shift reports comes from the roster pickers,
//! not from who is logged in.

use serde::Serialize;

/// Access level of a station account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Employee,
}

/// A verified station account.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub username: &'static str,
    pub display_name: &'static str,
    pub role: Role,
}

struct Credential {
    username: &'static str,
    password: &'static str,
    display_name: &'static str,
    role: Role,
}

const ACCOUNTS: &[Credential] = &[
    Credential {
        username: "admin",
        password: "Grubybob",
        display_name: "Właściciel",
        role: Role::Admin,
    },
    Credential {
        username: "pracownik",
        password: "kubajestsuper",
        display_name: "Recepcja",
        role: Role::Employee,
    },
];

/// Verifies a username/password pair against the station accounts.
///
/// Returns `None` on any mismatch; callers must not reveal whether the
/// username or the password was wrong.
pub fn verify(username: &str, password: &str) -> Option<Account> {
    ACCOUNTS
        .iter()
        .find(|c| c.username == username && c.password == password)
        .map(|c| Account {
            username: c.username,
            display_name: c.display_name,
            role: c.role,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        let account = verify("admin", "Grubybob").unwrap();
        assert_eq!(account.role, Role::Admin);

        let account = verify("pracownik", "kubajestsuper").unwrap();
        assert_eq!(account.role, Role::Employee);
    }

    #[test]
    fn test_wrong_password_and_unknown_user() {
        assert!(verify("admin", "grubybob").is_none());
        assert!(verify("szef", "Grubybob").is_none());
        assert!(verify("", "").is_none());
    }
}
