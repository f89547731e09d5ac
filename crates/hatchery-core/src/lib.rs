//! Application state controller for the Hatchery collection game.
//!
//! The [`Controller`] mirrors the persisted collection and token balance in
//! memory and drives the user workflows:
//!
//! | Workflow | Entry point | Tokens |
//! |----------|-------------|--------|
//! | Generate | [`Controller::generate`] | debit, refunded on failure |
//! | Evolve | [`Controller::evolve`] | free |
//! | Resell | [`Controller::request_resell`] then [`Controller::confirm`] | credit |
//! | Reorder | [`Controller::set_sort_mode`] | none |
//!
//! Every workflow reports its outcome as a single notice and also returns
//! a `Result`. The page reads everything through [`Controller::view`].
//!
//! # Modules
//!
//! - [`controller`] -- State and workflows
//! - [`confirm`] -- Single-slot confirmation gate
//! - [`notice`] -- Self-dismissing notifications
//! - [`sort`] -- Display ordering
//! - [`error`] -- [`AppError`]

pub mod confirm;
pub mod controller;
pub mod error;
pub mod notice;
pub mod sort;

// Re-export primary types for convenience.
pub use confirm::{ConfirmAction, Confirmation, Gate};
pub use controller::{ConfirmOutcome, Controller, Resale};
pub use error::AppError;
pub use notice::{NOTICE_TTL, Notifier};
pub use sort::sorted_view;
