//! # Repository Module
//!
//! One repository per record stream, all following the same pattern.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen handler                                                         │
//! │       │                                                                 │
//! │       │  db.receivables().list(&filter)                                 │
//! │       ▼                                                                 │
//! │  ReceivableRepository                                                   │
//! │  ├── insert(&self, invoice)                                             │
//! │  ├── list(&self, filter)                                                │
//! │  ├── mark_paid(&self, id, date)                                         │
//! │  └── paid_total_between(&self, from, to)                                │
//! │       │                                                                 │
//! │       │  SQL with bound parameters                                      │
//! │       ▼                                                                 │
//! │  SQLite                                                                 │
//! │                                                                         │
//! │  SQL stays inside this module; callers see domain types and DbResult.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`shift::ShiftRepository`] - daily shift reports and their crews
//! - [`payable::PayableRepository`] - supplier (AP) invoices
//! - [`receivable::ReceivableRepository`] - customer (AR) invoices
//! - [`lease::LeaseRepository`] - equipment leases
//! - [`employee::EmployeeRepository`] - staff roster and payroll
//! - [`shop::ShopRepository`] - retail shop takings and expenses
//! - [`farm::FarmRepository`] - livestock entries

pub mod employee;
pub mod farm;
pub mod lease;
pub mod payable;
pub mod receivable;
pub mod shift;
pub mod shop;
