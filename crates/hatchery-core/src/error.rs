//! Error type shared by every controller workflow.

use hatchery_economy::EconomyError;
use hatchery_genai::GenerationError;
use hatchery_store::StoreError;
use hatchery_types::CreatureId;

/// Errors returned by [`Controller`](crate::Controller) workflows.
///
/// Each workflow also turns its error into a notice before returning it,
/// so callers may ignore the value without hiding the failure from the
/// user.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The balance does not cover a generation.
    #[error("not enough tokens: balance {balance}, a new creature costs {cost}")]
    InsufficientFunds {
        /// Balance at the time of the request.
        balance: u64,
        /// Cost of the refused action.
        cost: u64,
    },

    /// No creature with this id is in the collection.
    #[error("creature {0} not found")]
    NotFound(CreatureId),

    /// The creature was already resold.
    #[error("creature {0} has already been resold")]
    AlreadyResold(CreatureId),

    /// An evolution for this creature is already in flight.
    #[error("creature {0} is already evolving")]
    AlreadyEvolving(CreatureId),

    /// Confirm or cancel was requested with no pending confirmation.
    #[error("no confirmation is pending")]
    NoPendingConfirmation,

    /// A confirmation was requested while another one is open.
    #[error("another confirmation is already open")]
    ConfirmationOpen,

    /// The local store failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The generation client failed.
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Balance arithmetic failed.
    #[error("token arithmetic error: {0}")]
    Economy(#[from] EconomyError),
}
