//! The single-slot confirmation gate.
//!
//! ```text
//! Closed --open--> Pending --begin--> Busy --settle--> Closed
//!                     |
//!                     +-----cancel-----> Closed
//! ```

use hatchery_types::{ConfirmationView, CreatureId};

use crate::error::AppError;

/// Mutation performed when a confirmation is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Resell the creature for its resale value.
    Resell(CreatureId),
}

/// A confirmation dialog and the action behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Dialog title.
    pub title: String,
    /// Dialog body.
    pub body: String,
    /// What happens on confirm.
    pub action: ConfirmAction,
}

/// State of the confirmation gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Gate {
    /// No dialog.
    #[default]
    Closed,
    /// Dialog shown, waiting for the user.
    Pending(Confirmation),
    /// Confirmed; the action is running.
    Busy(Confirmation),
}

impl Gate {
    /// Show a dialog. Only valid while closed.
    pub fn open(&mut self, confirmation: Confirmation) -> Result<(), AppError> {
        if !matches!(self, Self::Closed) {
            return Err(AppError::ConfirmationOpen);
        }
        *self = Self::Pending(confirmation);
        Ok(())
    }

    /// Accept the pending dialog and hand out its action.
    pub fn begin(&mut self) -> Result<ConfirmAction, AppError> {
        match core::mem::take(self) {
            Self::Pending(confirmation) => {
                let action = confirmation.action;
                *self = Self::Busy(confirmation);
                Ok(action)
            }
            other => {
                *self = other;
                Err(AppError::NoPendingConfirmation)
            }
        }
    }

    /// Close the gate after the action finished, whatever the outcome.
    pub fn settle(&mut self) {
        *self = Self::Closed;
    }

    /// Dismiss a pending dialog without running its action.
    ///
    /// Cancelling a closed gate is a no-op; a running action cannot be
    /// cancelled.
    pub fn cancel(&mut self) -> Result<(), AppError> {
        match self {
            Self::Busy(_) => Err(AppError::NoPendingConfirmation),
            Self::Closed | Self::Pending(_) => {
                *self = Self::Closed;
                Ok(())
            }
        }
    }

    /// Whether the confirmed action is running.
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Busy(_))
    }

    /// What the page should draw, if anything.
    pub fn view(&self) -> Option<ConfirmationView> {
        match self {
            Self::Closed => None,
            Self::Pending(c) | Self::Busy(c) => Some(ConfirmationView {
                title: c.title.clone(),
                body: c.body.clone(),
                busy: self.is_busy(),
            }),
        }
    }
}
