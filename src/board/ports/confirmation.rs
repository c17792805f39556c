//! Yes/no prompt shown before destructive actions.

/// Asks the user to confirm a destructive action.
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmationPrompt {
    /// Shows `message` and returns whether the user confirmed.
    fn confirm(&self, message: &str) -> bool;
}
