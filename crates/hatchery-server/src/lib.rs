//! HTTP API for the Hatchery collection game.
//!
//! An Axum server that forwards user intents from the browser page to the
//! [`Controller`](hatchery_core::Controller) and returns its
//! [`ViewState`](hatchery_types::ViewState). The page itself is out of
//! scope; any client that speaks the JSON routes in [`handlers`] can drive
//! the game.
//!
//! Errors are returned as `{ "error": "...", "status": 409 }` with the
//! matching HTTP status (see [`error::ApiError`]).

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use handlers::{SharedController, SortRequest};
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
