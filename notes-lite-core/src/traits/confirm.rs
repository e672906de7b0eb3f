//! User confirmation for destructive operations

/// Asks the user to approve a destructive operation.
///
/// Closures work directly:
///
/// ```
/// use notes_lite_core::traits::Confirm;
///
/// let always = |_: &str| true;
/// assert!(always.confirm("Delete note?"));
/// ```
pub trait Confirm: Send + Sync {
    /// Returns `true` to proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
