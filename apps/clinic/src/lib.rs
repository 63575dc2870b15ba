//! # vetfin-clinic: Screen Layer for VetFinance
//!
//! Everything between the person at the front desk and the record store:
//! the two station accounts, the role-dependent menu, form validation,
//! and the admin dashboard assembly.
//!
//! ## Layering
//! ```text
//! login ──► Session (role)
//!              │
//!              ▼
//! menu(role) ──► screens::* handlers ──► vetfin-db repositories
//!                      │
//!                      ▼
//!                vetfin-core (validation, money, aging, summary)
//! ```
//!
//! ## Module Organization
//!
//! - [`auth`] - station account verification
//! - [`session`] - logged-in state and the admin gate
//! - [`menu`] - role-dependent screen list
//! - [`screens`] - one handler module per screen
//! - [`export`] - CSV rendering for the receivables listing
//! - [`error`] - the screen-facing error type

pub mod auth;
pub mod error;
pub mod export;
pub mod menu;
pub mod screens;
pub mod session;

pub use error::{ErrorCode, ScreenError};
pub use menu::{menu, ScreenName};
pub use session::Session;

/// Initializes tracing from `RUST_LOG`, defaulting to `info` for our
/// crates and `warn` for everything else.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,vetfin_clinic=info,vetfin_db=info,vetfin_core=info")
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
