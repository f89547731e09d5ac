//! Two-phase token debit and checked credit.
//!
//! A generation spends tokens before the remote call is known to succeed.
//! [`TokenDebit`] captures both sides of that optimistic write so the caller
//! can apply it, and on failure apply its undo. The undo restores an absolute
//! value rather than adding the cost back, so applying it twice is harmless.

use crate::EconomyError;

/// An optimistic debit: the balance before and after spending `cost`.
///
/// # Examples
///
/// ```
/// use hatchery_economy::{TokenDebit, GENERATION_COST};
///
/// let debit = TokenDebit::reserve(25, GENERATION_COST)?;
/// assert_eq!(debit.balance_after(), 15);
/// assert_eq!(debit.undo_target(), 25);
/// # Ok::<(), hatchery_economy::EconomyError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenDebit {
    before: u64,
    after: u64,
    cost: u64,
}

impl TokenDebit {
    /// Check the balance covers `cost` and compute the debited balance.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InsufficientFunds`] when `balance < cost`.
    pub const fn reserve(balance: u64, cost: u64) -> Result<Self, EconomyError> {
        match balance.checked_sub(cost) {
            Some(after) => Ok(Self {
                before: balance,
                after,
                cost,
            }),
            None => Err(EconomyError::InsufficientFunds { balance, cost }),
        }
    }

    /// Balance to write when the debit is applied.
    pub const fn balance_after(&self) -> u64 {
        self.after
    }

    /// Balance to write when the debit is undone.
    pub const fn undo_target(&self) -> u64 {
        self.before
    }

    /// Amount debited.
    pub const fn cost(&self) -> u64 {
        self.cost
    }
}

/// Add `amount` to `balance`.
///
/// # Errors
///
/// Returns [`EconomyError::Overflow`] instead of wrapping.
pub const fn credit(balance: u64, amount: u64) -> Result<u64, EconomyError> {
    match balance.checked_add(amount) {
        Some(total) => Ok(total),
        None => Err(EconomyError::Overflow { balance, amount }),
    }
}
