//! # Role-Dependent Menu
//!
//! Which screens a session can open. The employee account gets the data
//! entry screens; the admin account additionally gets leases, the roster,
//! and the monthly summary.

use serde::Serialize;

use crate::auth::Role;

/// Every screen the application has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenName {
    Reception,
    Payables,
    Receivables,
    Shop,
    Farm,
    Leases,
    Employees,
    Summary,
}

impl ScreenName {
    /// Polish label shown in the sidebar.
    pub fn label(&self) -> &'static str {
        match self {
            ScreenName::Reception => "Recepcja",
            ScreenName::Payables => "Faktury kosztowe",
            ScreenName::Receivables => "Faktury przychodowe",
            ScreenName::Shop => "Sklep",
            ScreenName::Farm => "Hodowla",
            ScreenName::Leases => "Leasingi",
            ScreenName::Employees => "Pracownicy",
            ScreenName::Summary => "Podsumowanie",
        }
    }

    /// Whether the screen is restricted to the admin account.
    pub fn admin_only(&self) -> bool {
        matches!(
            self,
            ScreenName::Leases | ScreenName::Employees | ScreenName::Summary
        )
    }
}

/// The menu for a role, in sidebar order.
pub fn menu(role: Role) -> Vec<ScreenName> {
    let all = [
        ScreenName::Reception,
        ScreenName::Payables,
        ScreenName::Receivables,
        ScreenName::Shop,
        ScreenName::Farm,
        ScreenName::Leases,
        ScreenName::Employees,
        ScreenName::Summary,
    ];

    all.into_iter()
        .filter(|screen| role == Role::Admin || !screen.admin_only())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_menu_has_no_admin_screens() {
        let screens = menu(Role::Employee);
        assert_eq!(screens.len(), 5);
        assert!(screens.iter().all(|s| !s.admin_only()));
    }

    #[test]
    fn test_admin_menu_has_everything() {
        let screens = menu(Role::Admin);
        assert_eq!(screens.len(), 8);
        assert!(screens.contains(&ScreenName::Summary));
    }
}
