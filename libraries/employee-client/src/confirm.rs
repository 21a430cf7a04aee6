//! Interactive confirmation before destructive operations.

/// Prompt shown before a delete.
pub const DELETE_PROMPT: &str = "Delete this user?";

/// Asks the user to confirm an action.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    /// Returns `true` if the user agreed.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
