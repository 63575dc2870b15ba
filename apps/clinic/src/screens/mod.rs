//! # Screen Handlers
//!
//! One module per screen in the sidebar. Handlers validate form input,
//! delegate to the repositories, and shape view models for rendering.
//!
//! ## Failure Contract
//! - Mutations propagate errors; a failed save must reach the screen.
//! - Listings degrade: on store failure they log a warning and render
//!   empty, so one broken query does not take the whole screen down.

pub mod employees;
pub mod farm;
pub mod leases;
pub mod payables;
pub mod receivables;
pub mod reception;
pub mod shop;
pub mod summary;
