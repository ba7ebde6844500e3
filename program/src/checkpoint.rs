//! All-or-nothing execution across collaborators
//!
//! A ledger operation touches the ownership registry and the payment asset
//! several times. Both collaborators implement [`Checkpoint`] so the ledger can
//! open a checkpoint before the first call and either commit or roll everything
//! back once the outcome is known.

/// Transaction boundary implemented by stateful collaborators
pub trait Checkpoint {
    /// Starts recording changes. Changes made before `begin` are never undone.
    fn begin(&mut self);

    /// Keeps every change made since `begin`.
    fn commit(&mut self);

    /// Undoes every change made since `begin`, newest first.
    fn rollback(&mut self);
}
