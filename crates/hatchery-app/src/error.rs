//! Startup errors for the Hatchery binary.

use hatchery_genai::GenerationError;
use hatchery_server::ServerError;
use hatchery_store::StoreError;

/// Errors that abort startup or end the server.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// An environment variable is missing or invalid.
    #[error("config error: {0}")]
    Config(String),

    /// The database could not be opened or migrated.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The generation client could not be built.
    #[error("generator error: {0}")]
    Generator(#[from] GenerationError),

    /// The HTTP server failed.
    #[error("server error: {0}")]
    Server(#[from] ServerError),
}
