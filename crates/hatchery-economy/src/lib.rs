//! Token economy rules for the Hatchery collection game.
//!
//! Everything here is pure and deterministic apart from the rarity roll,
//! which takes its random source as an argument.
//!
//! # Modules
//!
//! - [`tables`] -- Fixed resale-value and sort-rank tables, generation cost
//! - [`debit`] -- Two-phase token debit with an idempotent undo, checked credit
//! - [`roll`] -- Weighted rarity roll for freshly generated creatures
//!
//! # Balance mutations
//!
//! | Workflow | Direction | Amount |
//! |----------|-----------|--------|
//! | Generate | debit | [`GENERATION_COST`] |
//! | Resell | credit | [`resale_value`] of the creature's rarity |
//!
//! The balance never goes negative and never wraps. Both directions return
//! [`EconomyError`] instead of panicking.

pub mod debit;
pub mod roll;
pub mod tables;

// Re-export primary items at crate root.
pub use debit::{TokenDebit, credit};
pub use roll::{RARITY_WEIGHTS, rarity_for_roll, roll_rarity};
pub use tables::{GENERATION_COST, UNMAPPED_RARITY, rarity_rank, resale_value};

/// Errors raised by balance arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EconomyError {
    /// The balance does not cover the requested debit.
    #[error("insufficient tokens: balance {balance}, cost {cost}")]
    InsufficientFunds {
        /// Balance at the time of the check.
        balance: u64,
        /// Amount that was requested.
        cost: u64,
    },

    /// A credit would overflow the balance.
    #[error("balance overflow: {balance} + {amount}")]
    Overflow {
        /// Balance before the credit.
        balance: u64,
        /// Amount being credited.
        amount: u64,
    },
}
