//! # vetfin-db: Database Layer for VetFinance
//!
//! SQLite persistence for the clinic's seven record streams.
//!
//! ## Architecture Position
//! ```text
//! apps/clinic (screen handlers)
//!        │
//!        ▼
//! vetfin-db (THIS CRATE)
//!   ┌──────────┐  ┌──────────────┐  ┌────────────┐
//!   │ Database │  │ Repositories │  │ Migrations │
//!   │ (pool)   │◄─│ shifts, AR,  │  │ (embedded) │
//!   │          │  │ AP, leases,  │  │            │
//!   └──────────┘  │ employees,   │  └────────────┘
//!                 │ shop, farm   │
//!                 └──────────────┘
//!        │
//!        ▼
//! SQLite database file (WAL mode, foreign keys on)
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`filter`] - Typed, composable listing predicates
//! - [`error`] - Database error types
//! - [`repository`] - One repository per record stream
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vetfin_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("clinic.db")).await?;
//! let roster = db.employees().roster().await?;
//! ```

pub mod error;
pub mod filter;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use filter::{DateField, PaidStatus, ReceivableFilter};
pub use pool::{Database, DbConfig};

pub use repository::employee::EmployeeRepository;
pub use repository::farm::FarmRepository;
pub use repository::lease::LeaseRepository;
pub use repository::payable::PayableRepository;
pub use repository::receivable::ReceivableRepository;
pub use repository::shift::ShiftRepository;
pub use repository::shop::ShopRepository;
